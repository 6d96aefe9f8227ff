//! Bootstrap - descriptor 목록을 순서대로 초기화
//!
//! 기본값은 첫 실패에서 중단. `continue_on_error` 이면 실패를 모아서
//! 나머지를 계속 처리한다.

use crate::descriptor::ValueDescriptor;
use crate::initializer::Initializer;
use nametree_foundation::{Error, Result};
use std::fmt::Display;
use tracing::{info, warn};

/// 실패한 descriptor
#[derive(Debug)]
pub struct BatchFailure {
    pub descriptor: String,
    pub error: Error,
}

/// 배치 실행 결과
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }
}

/// 배치 실행기
#[derive(Debug, Clone, Copy, Default)]
pub struct Bootstrap {
    continue_on_error: bool,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn continue_on_error(mut self, enabled: bool) -> Self {
        self.continue_on_error = enabled;
        self
    }

    /// 입력 순서대로 initialize
    pub async fn run<T, I>(
        &self,
        initializer: &I,
        descriptors: &[ValueDescriptor<T>],
    ) -> Result<BatchSummary>
    where
        T: Display + Send + Sync,
        I: Initializer<T> + ?Sized,
    {
        let mut summary = BatchSummary::default();

        for descriptor in descriptors {
            match initializer.initialize(descriptor).await {
                Ok(()) => summary.succeeded += 1,
                Err(e) if self.continue_on_error => {
                    warn!("Skipping {}: {}", descriptor, e);
                    summary.failed.push(BatchFailure {
                        descriptor: descriptor.to_string(),
                        error: e,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Bootstrap finished: {} bound, {} failed",
            summary.succeeded,
            summary.failed.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initializer::StringInitializer;
    use crate::testing::name;
    use nametree_foundation::{BoundValue, InMemoryDirectory, NamingContext};
    use std::sync::Arc;

    async fn directory_with_leaf() -> Arc<InMemoryDirectory> {
        let dir = Arc::new(InMemoryDirectory::new());
        dir.bind(&name("blocked"), BoundValue::String("leaf".into()))
            .await
            .unwrap();
        dir
    }

    fn descriptors() -> Vec<ValueDescriptor<String>> {
        vec![
            ValueDescriptor::of(name("ok/first"), "1".to_string()),
            ValueDescriptor::of(name("blocked/child"), "2".to_string()),
            ValueDescriptor::of(name("ok/third"), "3".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let dir = directory_with_leaf().await;
        let initializer = StringInitializer::new(dir.clone());

        let err = Bootstrap::new()
            .run(&initializer, &descriptors())
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert!(dir.lookup(&name("ok/first")).await.is_ok());
        assert!(dir.lookup(&name("ok/third")).await.is_err());
    }

    #[tokio::test]
    async fn test_continue_on_error_collects_failures() {
        let dir = directory_with_leaf().await;
        let initializer = StringInitializer::new(dir.clone());

        let summary = Bootstrap::new()
            .continue_on_error(true)
            .run(&initializer, &descriptors())
            .await
            .unwrap();

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.total(), 3);
        assert!(!summary.is_success());
        assert_eq!(summary.failed[0].descriptor, "ValueDescriptor{blocked/child=2}");
        assert!(dir.lookup(&name("ok/third")).await.is_ok());
    }
}
