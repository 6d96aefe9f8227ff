//! LDAP Initializer - 연결 대신 factory reference + 파라미터를 바인딩
//!
//! `conn/ldap1` 에 대해:
//! - `conn/ldap1` <- Reference (LdapDirContextFactory)
//! - `conn/ldap1__properties` <- 연결 파라미터 (Properties)
//!
//! lookup 시점에 factory가 같은 규칙으로 파라미터 이름을 다시 계산한다.

use super::context::PROVIDER_URL;
use super::factory::LdapDirContextFactory;
use crate::descriptor::ValueDescriptor;
use crate::initializer::{wrap_naming, Initializer};
use crate::tree::ensure_subcontexts;
use async_trait::async_trait;
use nametree_foundation::{BoundValue, Error, Name, NamingContext, Properties, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 파라미터 이름 접미사
pub const PROPERTIES_NAME_SUFFIX: &str = "__properties";

/// 연결 이름에서 파라미터 이름 계산
///
/// 부모 경로는 같고 마지막 segment에 접미사를 붙인다.
/// `a/b/c` -> `a/b/c__properties`
///
/// 사용자가 같은 접미사로 끝나는 이름을 쓰면 충돌한다 (검사하지 않음).
pub fn build_properties_name(ldap_name: &Name) -> Result<Name> {
    let last = ldap_name.last().ok_or_else(|| {
        Error::InvalidName(format!(
            "unable to build properties name for '{}'",
            ldap_name
        ))
    })?;

    let mut properties_name = ldap_name.get_prefix(ldap_name.size() - 1);
    properties_name.add(format!("{}{}", last, PROPERTIES_NAME_SUFFIX))?;
    Ok(properties_name)
}

/// LDAP 연결을 지연 생성되도록 등록
pub struct LdapDirContextInitializer {
    context: Arc<dyn NamingContext>,
}

impl LdapDirContextInitializer {
    pub fn new(context: Arc<dyn NamingContext>) -> Self {
        Self { context }
    }

    async fn bind_pair(&self, descriptor: &ValueDescriptor<Properties>) -> Result<()> {
        let context = self.context.as_ref();
        let factory_name = descriptor.name();
        if factory_name.is_empty() {
            return Err(Error::InvalidName("the root context cannot be bound".to_string()));
        }

        ensure_subcontexts(context, factory_name).await?;
        let properties_name = build_properties_name(factory_name)?;

        let reference = LdapDirContextFactory::reference();
        context
            .bind(factory_name, BoundValue::Reference(reference.clone()))
            .await?;
        info!(
            "Bound LDAP connection factory to {} as {}",
            factory_name, reference
        );

        // 여기서 실패하면 파라미터 없는 reference가 남는다
        context
            .bind(
                &properties_name,
                BoundValue::Properties(descriptor.value().clone()),
            )
            .await?;
        info!(
            "Bound LDAP connection factory properties of {} to {}",
            factory_name, properties_name
        );

        Ok(())
    }
}

#[async_trait]
impl Initializer<Properties> for LdapDirContextInitializer {
    async fn initialize(&self, descriptor: &ValueDescriptor<Properties>) -> Result<()> {
        debug!("initializing {}", descriptor);
        if !descriptor.value().contains_key(PROVIDER_URL) {
            warn!(
                "{} has no {}; lookups of {} will fail",
                descriptor,
                PROVIDER_URL,
                descriptor.name()
            );
        }
        self.bind_pair(descriptor)
            .await
            .map_err(|e| wrap_naming(descriptor, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{name, RecordingContext};
    use nametree_foundation::Binding;

    #[test]
    fn test_build_properties_name() {
        assert_eq!(
            build_properties_name(&name("properties/nothing")).unwrap(),
            name("properties/nothing__properties")
        );
        assert_eq!(
            build_properties_name(&name("conn")).unwrap(),
            name("conn__properties")
        );
        assert!(build_properties_name(&Name::empty()).is_err());
    }

    #[test]
    fn test_derived_names_share_parent_and_never_collide() {
        let a = build_properties_name(&name("conn/ldap1")).unwrap();
        let b = build_properties_name(&name("conn/ldap2")).unwrap();

        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(name("conn")));
        assert_eq!(b.parent(), Some(name("conn")));
        assert_eq!(a, build_properties_name(&name("conn/ldap1")).unwrap());
    }

    #[tokio::test]
    async fn test_binds_reference_then_properties() {
        let ctx = Arc::new(RecordingContext::new());
        let initializer = LdapDirContextInitializer::new(ctx.clone());
        let props = Properties::new().with(PROVIDER_URL, "ldap://x");

        initializer
            .initialize(&ValueDescriptor::of(name("conn/ldap1"), props.clone()))
            .await
            .unwrap();

        let binds = ctx.bound();
        assert_eq!(binds.len(), 2);
        assert_eq!(binds[0].0, name("conn/ldap1"));
        assert_eq!(
            binds[0].1,
            BoundValue::Reference(LdapDirContextFactory::reference())
        );
        assert_eq!(binds[1], (name("conn/ldap1__properties"), BoundValue::Properties(props)));
    }

    #[tokio::test]
    async fn test_failed_properties_bind_leaves_reference() {
        let ctx = Arc::new(RecordingContext {
            fail_bind_at: Some(name("conn/ldap1__properties")),
            ..RecordingContext::new()
        });
        let initializer = LdapDirContextInitializer::new(ctx.clone());

        let err = initializer
            .initialize(&ValueDescriptor::of(
                name("conn/ldap1"),
                Properties::new().with(PROVIDER_URL, "ldap://x"),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Initialization { .. }));
        // 롤백하지 않는다
        assert!(matches!(
            ctx.inner.lookup(&name("conn/ldap1")).await.unwrap(),
            Binding::Value(BoundValue::Reference(_))
        ));
        assert!(ctx.inner.lookup(&name("conn/ldap1__properties")).await.is_err());
    }
}
