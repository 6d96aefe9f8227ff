//! LdapDirContext - factory가 만드는 LDAP 연결 핸들

use nametree_foundation::{Error, Properties, Result};
use std::fmt;
use url::Url;

// 환경 키 (표준 이름)
pub const INITIAL_CONTEXT_FACTORY: &str = "java.naming.factory.initial";
pub const PROVIDER_URL: &str = "java.naming.provider.url";
pub const SECURITY_PRINCIPAL: &str = "java.naming.security.principal";
pub const SECURITY_CREDENTIALS: &str = "java.naming.security.credentials";
pub const SECURITY_AUTHENTICATION: &str = "java.naming.security.authentication";

const LDAP_PORT: u16 = 389;
const LDAPS_PORT: u16 = 636;

/// LDAP 디렉토리 연결
///
/// 병합된 환경과 파싱된 provider endpoint를 가진다. 실제 LDAP 프로토콜은
/// 다루지 않는다. 같은 환경으로 여러 번 만들 수 있다.
#[derive(Clone)]
pub struct LdapDirContext {
    environment: Properties,
    provider_urls: Vec<Url>,
}

impl LdapDirContext {
    /// 환경으로 연결 생성 (provider URL 필수)
    pub fn new(environment: Properties) -> Result<Self> {
        let raw = environment
            .get(PROVIDER_URL)
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::Config(format!("{} must be specified", PROVIDER_URL)))?;

        // 공백으로 구분된 여러 URL 허용 (첫 번째가 우선)
        let provider_urls = raw
            .split_whitespace()
            .map(parse_ldap_url)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            environment,
            provider_urls,
        })
    }

    pub fn environment(&self) -> &Properties {
        &self.environment
    }

    /// 우선 endpoint
    pub fn provider_url(&self) -> &Url {
        &self.provider_urls[0]
    }

    pub fn provider_urls(&self) -> &[Url] {
        &self.provider_urls
    }

    pub fn host(&self) -> Option<&str> {
        self.provider_url().host_str()
    }

    pub fn port(&self) -> u16 {
        self.provider_url().port().unwrap_or(if self.is_secure() {
            LDAPS_PORT
        } else {
            LDAP_PORT
        })
    }

    pub fn is_secure(&self) -> bool {
        self.provider_url().scheme() == "ldaps"
    }

    /// DN (URL path, 앞의 `/` 제외, percent-encoding 그대로)
    pub fn base_dn(&self) -> Option<&str> {
        let path = self.provider_url().path().trim_start_matches('/');
        if path.is_empty() {
            None
        } else {
            Some(path)
        }
    }

    pub fn initial_context_factory(&self) -> Option<&str> {
        self.environment.get(INITIAL_CONTEXT_FACTORY)
    }

    pub fn principal(&self) -> Option<&str> {
        self.environment.get(SECURITY_PRINCIPAL)
    }
}

fn parse_ldap_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("Invalid {} '{}': {}", PROVIDER_URL, raw, e)))?;
    match url.scheme() {
        "ldap" | "ldaps" => Ok(url),
        other => Err(Error::Config(format!(
            "Unsupported {} scheme '{}' in '{}'",
            PROVIDER_URL, other, raw
        ))),
    }
}

impl fmt::Debug for LdapDirContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let environment: Vec<(&str, &str)> = self
            .environment
            .iter()
            .map(|(k, v)| {
                if k == SECURITY_CREDENTIALS {
                    (k, "***REDACTED***")
                } else {
                    (k, v)
                }
            })
            .collect();

        f.debug_struct("LdapDirContext")
            .field("provider_urls", &self.provider_urls)
            .field("environment", &environment)
            .finish()
    }
}

impl fmt::Display for LdapDirContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LdapDirContext{{{}}}", self.provider_url())
    }
}
