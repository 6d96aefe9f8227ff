//! nametree-core: Core Runtime for NameTree
//!
//! Layer2 - 디렉토리 트리 구성 및 바인딩 레이어
//!
//! # 주요 모듈
//!
//! - `tree`: 중간 경로 sub-context 보장 (생성 또는 재사용)
//! - `descriptor`: ValueDescriptor (이름 + 값)
//! - `initializer`: 제네릭 binder (String, Properties)
//! - `ldap`: LDAP 연결 지연 생성 (reference + 파라미터 바인딩, factory)
//! - `args`: `name=payload` 인자 파싱
//! - `bootstrap`: descriptor 배치 실행
//!
//! # 사용 예시
//!
//! ```ignore
//! use nametree_core::{parse_descriptors, Bootstrap, PropertiesFilePayload, LdapDirContextInitializer};
//! use nametree_foundation::InMemoryDirectory;
//!
//! let dir = Arc::new(InMemoryDirectory::new());
//! dir.register_factory(Arc::new(LdapDirContextFactory::new())).await;
//!
//! let descriptors = parse_descriptors(dir.name_parser(), &args, &PropertiesFilePayload)?;
//! let initializer = LdapDirContextInitializer::new(dir.clone());
//! Bootstrap::new().run(&initializer, &descriptors).await?;
//!
//! // lookup 시점에 연결 생성
//! let ldap = dir.lookup_object(&name).await?.downcast::<LdapDirContext>();
//! ```

pub mod args;
pub mod bootstrap;
pub mod descriptor;
pub mod initializer;
pub mod ldap;
pub mod tree;

#[cfg(test)]
mod testing;

// Re-exports: Tree
pub use tree::{ensure_subcontexts, retrieve_or_create_subcontext, Subcontext};

// Re-exports: Descriptor & Initializer
pub use descriptor::ValueDescriptor;
pub use initializer::{
    bind_with_subcontexts, Initializer, PropertiesInitializer, StringInitializer,
    ValueInitializer,
};

// Re-exports: LDAP
pub use ldap::{
    build_properties_name, LdapDirContext, LdapDirContextFactory, LdapDirContextInitializer,
    PROPERTIES_NAME_SUFFIX,
};

// Re-exports: Args
pub use args::{
    parse_descriptors, parse_name, split_argument, PayloadLoader, PropertiesFilePayload,
    StringPayload,
};

// Re-exports: Bootstrap
pub use bootstrap::{BatchFailure, BatchSummary, Bootstrap};
