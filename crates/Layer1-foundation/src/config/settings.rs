//! NameTree Config - 통합 설정

use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 설정 파일명
pub const NAMETREE_CONFIG_FILE: &str = "config.json";

/// 디렉토리 스냅샷 기본 파일명 (프로젝트 설정 디렉토리 안)
pub const DEFAULT_DIRECTORY_FILE: &str = "directory.json";

/// LDAP initial context factory 기본값
pub const DEFAULT_LDAP_CONTEXT_FACTORY: &str = "com.sun.jndi.ldap.LdapCtxFactory";

// 환경변수
pub const ENV_DIRECTORY: &str = "NAMETREE_DIRECTORY";
pub const ENV_LDAP_CONTEXT_FACTORY: &str = "NAMETREE_LDAP_CONTEXT_FACTORY";
pub const ENV_CONTINUE_ON_ERROR: &str = "NAMETREE_CONTINUE_ON_ERROR";

// ============================================================================
// NameTree Config
// ============================================================================

/// NameTree 통합 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameTreeConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 파일 디렉토리 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// LDAP 설정
    #[serde(default)]
    pub ldap: LdapSettings,

    /// 실패한 항목이 있어도 나머지를 계속 처리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_on_error: Option<bool>,
}

impl Default for NameTreeConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            directory: None,
            ldap: LdapSettings::default(),
            continue_on_error: None,
        }
    }
}

impl NameTreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 + 환경변수 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.load_optional::<NameTreeConfig>(NAMETREE_CONFIG_FILE)? {
                config.merge(global_config);
            }
        }

        // 2. 프로젝트 설정
        if let Ok(project) = JsonStore::current_project() {
            if let Some(project_config) =
                project.load_optional::<NameTreeConfig>(NAMETREE_CONFIG_FILE)?
            {
                config.merge(project_config);
            }
        }

        // 3. 환경변수 오버라이드
        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// 환경변수 적용
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var(ENV_DIRECTORY).filter(|p| !p.is_empty()) {
            self.directory = Some(PathBuf::from(path));
        }

        if let Some(factory) = var(ENV_LDAP_CONTEXT_FACTORY).filter(|f| !f.is_empty()) {
            self.ldap.default_context_factory = Some(factory);
        }

        if let Some(flag) = var(ENV_CONTINUE_ON_ERROR) {
            self.continue_on_error = Some(matches!(
                flag.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            ));
        }
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: NameTreeConfig) {
        if other.directory.is_some() {
            self.directory = other.directory;
        }
        if other.ldap.default_context_factory.is_some() {
            self.ldap.default_context_factory = other.ldap.default_context_factory;
        }
        if other.continue_on_error.is_some() {
            self.continue_on_error = other.continue_on_error;
        }
    }

    // effective 값들
    pub fn effective_directory(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(path) => Ok(path.clone()),
            None => Ok(JsonStore::current_project()?.file_path(DEFAULT_DIRECTORY_FILE)),
        }
    }

    pub fn effective_continue_on_error(&self) -> bool {
        self.continue_on_error.unwrap_or(false)
    }
}

// ============================================================================
// LDAP Settings
// ============================================================================

/// LDAP connection factory 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapSettings {
    /// properties에 initial context factory가 없을 때 쓰는 값
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_context_factory: Option<String>,
}

impl LdapSettings {
    pub fn effective_context_factory(&self) -> &str {
        self.default_context_factory
            .as_deref()
            .unwrap_or(DEFAULT_LDAP_CONTEXT_FACTORY)
    }
}

fn default_version() -> u32 {
    1
}
