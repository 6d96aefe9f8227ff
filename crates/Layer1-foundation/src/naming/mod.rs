//! Naming - 계층형 이름 디렉토리 모델
//!
//! - `name.rs` - Name (segment 목록)
//! - `parser.rs` - NameParser, CompositeNameParser
//! - `value.rs` - BoundValue, Reference
//! - `context.rs` - NamingContext (backend trait)
//! - `spi.rs` - ObjectFactory (Reference 지연 생성)
//! - `memory.rs` - InMemoryDirectory
//! - `file.rs` - FileDirectory (JSON 파일)

mod context;
mod file;
mod memory;
mod name;
mod parser;
mod spi;
mod value;

pub use context::{Binding, NamingContext};
pub use file::FileDirectory;
pub use memory::{InMemoryDirectory, Node};
pub use name::{Name, ESCAPE, SEPARATOR};
pub use parser::{CompositeNameParser, NameParser};
pub use spi::{ObjectFactory, ObjectFactoryRegistry, ObjectHandle, Resolved};
pub use value::{BoundValue, IntoBoundValue, Reference};
