//! NamingContext - 디렉토리 backend 인터페이스
//!
//! backend의 wire protocol은 다루지 않는다. sub-context 생성, 조회, 바인딩
//! 세 가지 연산과 이름 파서만 요구한다.

use super::name::Name;
use super::parser::NameParser;
use super::value::BoundValue;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// 조회 결과 - container 또는 leaf 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// 하위 항목을 가질 수 있는 sub-context
    Context,

    /// 종단 값
    Value(BoundValue),
}

impl Binding {
    pub fn is_context(&self) -> bool {
        matches!(self, Binding::Context)
    }
}

/// 디렉토리 backend (root context)
///
/// 모든 이름은 이 context 기준 상대 경로다.
#[async_trait]
pub trait NamingContext: Send + Sync {
    /// `name` 위치에 sub-context 생성
    ///
    /// 이미 바인딩이 있으면 `Error::NameAlreadyBound`.
    /// 부모가 없으면 `Error::NameNotFound`.
    async fn create_subcontext(&self, name: &Name) -> Result<()>;

    /// `name` 조회 (빈 이름은 자기 자신 = Context)
    async fn lookup(&self, name: &Name) -> Result<Binding>;

    /// `name` 에 값 바인딩 (기존 leaf는 덮어씀)
    async fn bind(&self, name: &Name, value: BoundValue) -> Result<()>;

    /// 이 context의 이름 파서
    fn name_parser(&self) -> &dyn NameParser;
}

#[async_trait]
impl<T: NamingContext + ?Sized> NamingContext for Arc<T> {
    async fn create_subcontext(&self, name: &Name) -> Result<()> {
        (**self).create_subcontext(name).await
    }

    async fn lookup(&self, name: &Name) -> Result<Binding> {
        (**self).lookup(name).await
    }

    async fn bind(&self, name: &Name, value: BoundValue) -> Result<()> {
        (**self).bind(name, value).await
    }

    fn name_parser(&self) -> &dyn NameParser {
        (**self).name_parser()
    }
}
