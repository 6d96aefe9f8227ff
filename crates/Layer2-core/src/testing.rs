//! 테스트용 NamingContext 래퍼

use async_trait::async_trait;
use nametree_foundation::{
    Binding, BoundValue, Error, InMemoryDirectory, Name, NameParser, NamingContext, Result,
};
use std::sync::Mutex;

/// 호출 기록 + 장애 주입
#[derive(Default)]
pub struct RecordingContext {
    pub inner: InMemoryDirectory,
    /// 생성 직전에 다른 인스턴스가 먼저 만든 것처럼 동작
    pub race_creates: bool,
    /// 이 이름에 bind하면 backend 오류
    pub fail_bind_at: Option<Name>,
    /// 모든 create_subcontext가 backend 오류
    pub fail_creates: bool,
    pub creates: Mutex<Vec<Name>>,
    pub binds: Mutex<Vec<(Name, BoundValue)>>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound(&self) -> Vec<(Name, BoundValue)> {
        self.binds.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<Name> {
        self.creates.lock().unwrap().clone()
    }
}

#[async_trait]
impl NamingContext for RecordingContext {
    async fn create_subcontext(&self, name: &Name) -> Result<()> {
        self.creates.lock().unwrap().push(name.clone());
        if self.fail_creates {
            return Err(Error::Naming("connection refused".to_string()));
        }
        if self.race_creates {
            // 다른 인스턴스가 이겼다 - 결과는 AlreadyBound
            let _ = self.inner.create_subcontext(name).await;
            return Err(Error::NameAlreadyBound(name.to_string()));
        }
        self.inner.create_subcontext(name).await
    }

    async fn lookup(&self, name: &Name) -> Result<Binding> {
        self.inner.lookup(name).await
    }

    async fn bind(&self, name: &Name, value: BoundValue) -> Result<()> {
        if self.fail_bind_at.as_ref() == Some(name) {
            return Err(Error::Naming(format!("bind rejected: {}", name)));
        }
        self.binds.lock().unwrap().push((name.clone(), value.clone()));
        self.inner.bind(name, value).await
    }

    fn name_parser(&self) -> &dyn NameParser {
        self.inner.name_parser()
    }
}

pub fn name(raw: &str) -> Name {
    raw.parse().unwrap()
}
