//! Object Factory SPI - Reference 바인딩의 지연 생성
//!
//! Reference leaf를 lookup하면 registry에서 factory를 찾아
//! 매번 새로 객체를 만든다. 캐싱은 하지 않는다.

use super::context::{Binding, NamingContext};
use super::name::Name;
use super::value::{BoundValue, Reference};
use crate::{Error, Result};
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// factory가 만든 객체
pub type ObjectHandle = Arc<dyn Any + Send + Sync>;

/// Reference를 실제 객체로 만드는 factory
#[async_trait]
pub trait ObjectFactory: Send + Sync {
    /// registry 키 (Reference::factory 와 일치해야 함)
    fn factory_name(&self) -> &str;

    /// 객체 생성
    ///
    /// `name` 은 요청된 이름, `context` 는 그 이름이 속한 root context.
    async fn get_object_instance(
        &self,
        reference: &Reference,
        name: &Name,
        context: &dyn NamingContext,
    ) -> Result<ObjectHandle>;
}

/// 해석된 조회 결과
#[derive(Debug, Clone)]
pub enum Resolved {
    Context,
    Value(BoundValue),
    Object(ObjectHandle),
}

impl Resolved {
    /// 생성된 객체를 구체 타입으로 변환
    pub fn downcast<T: Any + Send + Sync>(self) -> Option<Arc<T>> {
        match self {
            Resolved::Object(handle) => handle.downcast::<T>().ok(),
            _ => None,
        }
    }
}

// ============================================================================
// ObjectFactoryRegistry
// ============================================================================

/// factory 이름 -> factory
#[derive(Default)]
pub struct ObjectFactoryRegistry {
    factories: RwLock<HashMap<String, Arc<dyn ObjectFactory>>>,
}

impl ObjectFactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// factory 등록 (같은 이름이면 교체)
    pub async fn register(&self, factory: Arc<dyn ObjectFactory>) {
        let name = factory.factory_name().to_string();
        debug!("Registered object factory: {}", name);
        self.factories.write().await.insert(name, factory);
    }

    pub async fn get(&self, name: &str) -> Option<Arc<dyn ObjectFactory>> {
        self.factories.read().await.get(name).cloned()
    }

    /// `name` 을 조회하고 Reference면 factory로 객체 생성
    pub async fn resolve(&self, context: &dyn NamingContext, name: &Name) -> Result<Resolved> {
        match context.lookup(name).await? {
            Binding::Context => Ok(Resolved::Context),
            Binding::Value(BoundValue::Reference(reference)) => {
                let factory = self
                    .get(&reference.factory)
                    .await
                    .ok_or_else(|| Error::FactoryNotFound(reference.factory.clone()))?;
                debug!("Resolving {} through {}", name, reference.factory);
                let object = factory.get_object_instance(&reference, name, context).await?;
                Ok(Resolved::Object(object))
            }
            Binding::Value(value) => Ok(Resolved::Value(value)),
        }
    }
}

impl std::fmt::Debug for ObjectFactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectFactoryRegistry").finish_non_exhaustive()
    }
}
