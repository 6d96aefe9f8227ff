//! # nametree-foundation
//!
//! Foundation layer for NameTree:
//! - Naming: Name, NameParser, BoundValue, NamingContext (backend trait)
//! - Spi: ObjectFactory - Reference 바인딩의 지연 생성
//! - Properties: key/value 묶음 + properties 파일 포맷
//! - Storage: JsonStore (설정, 디렉토리 스냅샷)
//! - Config: 통합 설정 (NameTreeConfig)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  NamingContext (trait)                                   │
//! │  ├── create_subcontext / lookup / bind                  │
//! │  └── name_parser                                        │
//! │                     │                                   │
//! │          ┌─────────┴─────────┐                         │
//! │          ▼                   ▼                         │
//! │   InMemoryDirectory    FileDirectory                   │
//! │   (RwLock<Node>)       (JsonStore 저장)                 │
//! │          │                                              │
//! │          ▼                                              │
//! │   ObjectFactoryRegistry (Reference -> 객체)             │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod naming;
pub mod properties;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Naming (이름 / 값 / backend)
// ============================================================================
pub use naming::{
    // Backend
    Binding,
    // Values
    BoundValue,
    CompositeNameParser,
    FileDirectory,
    InMemoryDirectory,
    IntoBoundValue,
    // Name
    Name,
    NameParser,
    NamingContext,
    Node,
    // Spi
    ObjectFactory,
    ObjectFactoryRegistry,
    ObjectHandle,
    Reference,
    Resolved,
};

// ============================================================================
// Properties
// ============================================================================
pub use properties::{load_properties, parse_properties, Properties};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{LdapSettings, NameTreeConfig, NAMETREE_CONFIG_FILE};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;
