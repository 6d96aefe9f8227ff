//! Config - 통합 설정 관리
//!
//! - `settings.rs` - NameTreeConfig 통합 설정 (디렉토리 경로, LDAP 기본값, 배치 정책)

mod settings;

pub use settings::{
    LdapSettings, NameTreeConfig, DEFAULT_DIRECTORY_FILE, DEFAULT_LDAP_CONTEXT_FACTORY,
    ENV_CONTINUE_ON_ERROR, ENV_DIRECTORY, ENV_LDAP_CONTEXT_FACTORY, NAMETREE_CONFIG_FILE,
};
