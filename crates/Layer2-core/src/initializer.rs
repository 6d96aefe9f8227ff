//! Initializer - 경로 보장 후 값 바인딩
//!
//! payload 종류(String, Properties, ...)와 무관하게 같은 절차를 따른다:
//! 1. `ensure_subcontexts`
//! 2. leaf에 값 바인딩 (덮어쓰기)
//! 3. naming 오류는 descriptor 정보를 붙여 `Error::Initialization` 으로 감쌈

use crate::descriptor::ValueDescriptor;
use crate::tree::ensure_subcontexts;
use async_trait::async_trait;
use nametree_foundation::{
    BoundValue, Error, IntoBoundValue, Name, NamingContext, Properties, Result,
};
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

/// descriptor 하나를 디렉토리에 반영하는 초기화기
#[async_trait]
pub trait Initializer<T: Send + Sync>: Send + Sync {
    async fn initialize(&self, descriptor: &ValueDescriptor<T>) -> Result<()>;
}

/// 경로 보장 + 바인딩 (모든 initializer 공통)
pub async fn bind_with_subcontexts(
    context: &dyn NamingContext,
    name: &Name,
    value: BoundValue,
) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName("the root context cannot be bound".to_string()));
    }
    ensure_subcontexts(context, name).await?;
    context.bind(name, value).await
}

/// naming 오류에 descriptor 정보를 붙인다 (입력 오류, 충돌은 그대로)
pub(crate) fn wrap_naming<T: Display>(descriptor: &ValueDescriptor<T>, err: Error) -> Error {
    if err.is_naming() {
        Error::initialization(descriptor.to_string(), err)
    } else {
        err
    }
}

// ============================================================================
// ValueInitializer<T> - 제네릭 binder
// ============================================================================

/// 값을 그대로 바인딩하는 초기화기
pub struct ValueInitializer<T> {
    context: Arc<dyn NamingContext>,
    _payload: PhantomData<fn(T)>,
}

/// 문자열 값
pub type StringInitializer = ValueInitializer<String>;

/// Properties 값
pub type PropertiesInitializer = ValueInitializer<Properties>;

impl<T> ValueInitializer<T> {
    pub fn new(context: Arc<dyn NamingContext>) -> Self {
        Self {
            context,
            _payload: PhantomData,
        }
    }

    pub fn context(&self) -> &Arc<dyn NamingContext> {
        &self.context
    }
}

impl<T> Clone for ValueInitializer<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.context))
    }
}

#[async_trait]
impl<T> Initializer<T> for ValueInitializer<T>
where
    T: IntoBoundValue + Clone + Display + Send + Sync,
{
    async fn initialize(&self, descriptor: &ValueDescriptor<T>) -> Result<()> {
        debug!("initializing {}", descriptor);
        let value = descriptor.value().clone().into_bound_value();
        bind_with_subcontexts(self.context.as_ref(), descriptor.name(), value)
            .await
            .map_err(|e| wrap_naming(descriptor, e))?;
        info!("Initialized {}", descriptor);
        Ok(())
    }
}
