//! LDAP - 지연 생성되는 LDAP 연결
//!
//! - `initializer.rs` - reference + 파라미터 두 개를 바인딩
//! - `factory.rs` - lookup 시 파라미터를 다시 읽어 연결 생성
//! - `context.rs` - 생성된 연결 핸들 (LdapDirContext)
//!
//! ```text
//!  initialize(conn/ldap1, props)
//!      ├── bind conn/ldap1             = Reference(LdapDirContextFactory)
//!      └── bind conn/ldap1__properties = props
//!
//!  lookup_object(conn/ldap1)
//!      └── LdapDirContextFactory
//!            ├── lookup conn/ldap1__properties
//!            ├── 기본값 병합 (initial context factory)
//!            └── LdapDirContext::new(env)
//! ```

mod context;
mod factory;
mod initializer;

pub use context::{
    LdapDirContext, INITIAL_CONTEXT_FACTORY, PROVIDER_URL, SECURITY_AUTHENTICATION,
    SECURITY_CREDENTIALS, SECURITY_PRINCIPAL,
};
pub use factory::{LdapDirContextFactory, DIR_CONTEXT_CLASS};
pub use initializer::{build_properties_name, LdapDirContextInitializer, PROPERTIES_NAME_SUFFIX};
