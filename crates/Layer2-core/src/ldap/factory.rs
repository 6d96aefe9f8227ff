//! LdapDirContextFactory - Reference lookup 시 LDAP 연결 생성
//!
//! backend가 lookup마다 호출한다. 결과를 캐싱하지 않는다.

use super::context::{LdapDirContext, INITIAL_CONTEXT_FACTORY, PROVIDER_URL};
use super::initializer::build_properties_name;
use async_trait::async_trait;
use nametree_foundation::config::DEFAULT_LDAP_CONTEXT_FACTORY;
use nametree_foundation::{
    Binding, BoundValue, Error, LdapSettings, Name, NamingContext, ObjectFactory, ObjectHandle,
    Properties, Reference, Result,
};
use std::sync::Arc;
use tracing::debug;

/// Reference에 기록되는 생성 대상 타입
pub const DIR_CONTEXT_CLASS: &str = "DirContext";

/// LDAP 연결 factory
#[derive(Debug, Clone)]
pub struct LdapDirContextFactory {
    default_context_factory: String,
}

impl Default for LdapDirContextFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl LdapDirContextFactory {
    /// registry 키
    pub const NAME: &'static str = "LdapDirContextFactory";

    pub fn new() -> Self {
        Self {
            default_context_factory: DEFAULT_LDAP_CONTEXT_FACTORY.to_string(),
        }
    }

    pub fn from_settings(settings: &LdapSettings) -> Self {
        Self::new().default_context_factory(settings.effective_context_factory())
    }

    // 빌더
    pub fn default_context_factory(mut self, class_name: impl Into<String>) -> Self {
        self.default_context_factory = class_name.into();
        self
    }

    /// 디렉토리에 바인딩되는 reference (생성자 인자 없음)
    pub fn reference() -> Reference {
        Reference::new(DIR_CONTEXT_CLASS, Self::NAME)
    }

    /// 파라미터에 기본값 병합
    ///
    /// - initial context factory가 없으면 기본값
    /// - provider URL이 없으면 `Error::Config`
    pub fn build_environment(&self, properties: &Properties) -> Result<Properties> {
        let mut environment = properties.clone();

        if !environment.contains_key(INITIAL_CONTEXT_FACTORY) {
            environment.set(INITIAL_CONTEXT_FACTORY, self.default_context_factory.clone());
        }

        if !environment.contains_key(PROVIDER_URL) {
            return Err(Error::Config(format!("{} must be specified", PROVIDER_URL)));
        }

        Ok(environment)
    }

    /// 파라미터 이름에서 Properties 조회
    async fn lookup_properties(context: &dyn NamingContext, name: &Name) -> Result<Properties> {
        let properties_name = build_properties_name(name)?;
        match context.lookup(&properties_name).await? {
            Binding::Value(BoundValue::Properties(properties)) => Ok(properties),
            Binding::Value(other) => Err(Error::Config(format!(
                "expected connection properties at {}, found {}",
                properties_name,
                other.kind()
            ))),
            Binding::Context => Err(Error::Config(format!(
                "expected connection properties at {}, found container",
                properties_name
            ))),
        }
    }
}

#[async_trait]
impl ObjectFactory for LdapDirContextFactory {
    fn factory_name(&self) -> &str {
        Self::NAME
    }

    async fn get_object_instance(
        &self,
        _reference: &Reference,
        name: &Name,
        context: &dyn NamingContext,
    ) -> Result<ObjectHandle> {
        let properties = Self::lookup_properties(context, name).await?;
        let environment = self.build_environment(&properties)?;
        let dir_context = LdapDirContext::new(environment)?;
        debug!("Constructed {} for {}", dir_context, name);
        Ok(Arc::new(dir_context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ValueDescriptor;
    use crate::initializer::Initializer;
    use crate::ldap::LdapDirContextInitializer;
    use crate::testing::name;
    use nametree_foundation::{InMemoryDirectory, Resolved};

    #[test]
    fn test_build_environment_defaults_factory() {
        let factory = LdapDirContextFactory::new();
        let env = factory
            .build_environment(&Properties::new().with(PROVIDER_URL, "ldap://x"))
            .unwrap();
        assert_eq!(env.get(INITIAL_CONTEXT_FACTORY), Some(DEFAULT_LDAP_CONTEXT_FACTORY));

        let env = factory
            .build_environment(
                &Properties::new()
                    .with(PROVIDER_URL, "ldap://x")
                    .with(INITIAL_CONTEXT_FACTORY, "custom.Factory"),
            )
            .unwrap();
        assert_eq!(env.get(INITIAL_CONTEXT_FACTORY), Some("custom.Factory"));
    }

    #[test]
    fn test_build_environment_requires_provider_url() {
        let err = LdapDirContextFactory::new()
            .build_environment(&Properties::new().with(INITIAL_CONTEXT_FACTORY, "x"))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == "java.naming.provider.url must be specified"));
    }

    #[test]
    fn test_configured_default() {
        let settings = LdapSettings {
            default_context_factory: Some("com.example.Ctx".into()),
        };
        let env = LdapDirContextFactory::from_settings(&settings)
            .build_environment(&Properties::new().with(PROVIDER_URL, "ldap://x"))
            .unwrap();
        assert_eq!(env.get(INITIAL_CONTEXT_FACTORY), Some("com.example.Ctx"));
    }

    async fn directory_with_factory() -> Arc<InMemoryDirectory> {
        let dir = Arc::new(InMemoryDirectory::new());
        dir.register_factory(Arc::new(LdapDirContextFactory::new())).await;
        dir
    }

    #[tokio::test]
    async fn test_lookup_constructs_connection() {
        let dir = directory_with_factory().await;
        LdapDirContextInitializer::new(dir.clone())
            .initialize(&ValueDescriptor::of(
                name("conn/ldap1"),
                Properties::new().with(PROVIDER_URL, "ldap://x"),
            ))
            .await
            .unwrap();

        let ldap = dir
            .lookup_object(&name("conn/ldap1"))
            .await
            .unwrap()
            .downcast::<LdapDirContext>()
            .expect("LdapDirContext");
        assert_eq!(ldap.provider_url().as_str(), "ldap://x");
        assert_eq!(ldap.initial_context_factory(), Some(DEFAULT_LDAP_CONTEXT_FACTORY));
    }

    #[tokio::test]
    async fn test_each_lookup_builds_fresh_connection() {
        let dir = directory_with_factory().await;
        let initializer = LdapDirContextInitializer::new(dir.clone());
        let target = name("conn/ldap1");

        initializer
            .initialize(&ValueDescriptor::of(
                target.clone(),
                Properties::new().with(PROVIDER_URL, "ldap://old"),
            ))
            .await
            .unwrap();
        let first = dir.lookup_object(&target).await.unwrap().downcast::<LdapDirContext>().unwrap();

        // 파라미터 leaf만 다시 바인딩
        dir.bind(
            &name("conn/ldap1__properties"),
            BoundValue::Properties(Properties::new().with(PROVIDER_URL, "ldap://new")),
        )
        .await
        .unwrap();
        let second = dir.lookup_object(&target).await.unwrap().downcast::<LdapDirContext>().unwrap();

        assert_eq!(first.host(), Some("old"));
        assert_eq!(second.host(), Some("new"));
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_missing_provider_url_refuses_construction() {
        let dir = directory_with_factory().await;
        LdapDirContextInitializer::new(dir.clone())
            .initialize(&ValueDescriptor::of(
                name("conn/broken"),
                Properties::new().with("java.naming.security.principal", "cn=admin"),
            ))
            .await
            .unwrap();

        let err = dir.lookup_object(&name("conn/broken")).await.unwrap_err();
        assert!(err.is_configuration(), "{err}");
    }

    #[tokio::test]
    async fn test_dangling_reference_fails_lookup() {
        let dir = directory_with_factory().await;
        dir.bind(
            &name("orphan"),
            BoundValue::Reference(LdapDirContextFactory::reference()),
        )
        .await
        .unwrap();

        let err = dir.lookup_object(&name("orphan")).await.unwrap_err();
        assert!(matches!(err, Error::NameNotFound(ref n) if n == "orphan__properties"));
    }

    #[tokio::test]
    async fn test_plain_values_pass_through() {
        let dir = directory_with_factory().await;
        dir.bind(&name("s"), BoundValue::String("v".into())).await.unwrap();

        assert!(matches!(
            dir.lookup_object(&name("s")).await.unwrap(),
            Resolved::Value(BoundValue::String(ref v)) if v == "v"
        ));
    }
}
