//! File Directory - JSON 파일에 저장되는 디렉토리
//!
//! 변경 연산이 성공할 때마다 트리 전체를 저장한다. 재실행(redeploy) 시
//! 이전 실행에서 만든 context와 값이 그대로 보인다.
//!
//! 저장에 실패하면 메모리 트리를 변경 전으로 되돌리고 `Error::Naming` 을
//! 반환한다 (backend 장애).

use super::context::{Binding, NamingContext};
use super::memory::{InMemoryDirectory, Node};
use super::name::Name;
use super::parser::NameParser;
use super::spi::{ObjectFactory, Resolved};
use super::value::BoundValue;
use crate::storage::JsonStore;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// JSON 파일 기반 디렉토리 backend
#[derive(Debug)]
pub struct FileDirectory {
    inner: InMemoryDirectory,
    store: JsonStore,
    filename: String,
    path: PathBuf,
    // 변경 + 저장 직렬화
    write_lock: Mutex<()>,
}

impl FileDirectory {
    /// 파일이 있으면 로드, 없으면 빈 트리
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (store, filename) = JsonStore::for_file(path)?;
        let inner = match store.load_optional::<Node>(&filename)? {
            Some(root) => {
                debug!("Loaded directory from {}", path.display());
                InMemoryDirectory::from_node(root)?
            }
            None => InMemoryDirectory::new(),
        };

        Ok(Self {
            inner,
            store,
            filename,
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    pub async fn register_factory(&self, factory: Arc<dyn ObjectFactory>) {
        self.inner.register_factory(factory).await;
    }

    pub async fn lookup_object(&self, name: &Name) -> Result<Resolved> {
        self.inner.factories().resolve(self, name).await
    }

    pub async fn snapshot(&self) -> Node {
        self.inner.snapshot().await
    }

    // 변경된 트리 저장, 실패하면 `before` 로 복원
    async fn persist(&self, before: Node) -> Result<()> {
        let root = self.inner.snapshot().await;
        if let Err(e) = self.store.save(&self.filename, &root) {
            warn!("Rolling back unsaved change to {}: {}", self.path.display(), e);
            self.inner.restore(before).await;
            return Err(Error::Naming(format!(
                "unable to persist directory {}: {}",
                self.path.display(),
                e
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl NamingContext for FileDirectory {
    async fn create_subcontext(&self, name: &Name) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        self.inner.create_subcontext(name).await?;
        self.persist(before).await
    }

    async fn lookup(&self, name: &Name) -> Result<Binding> {
        self.inner.lookup(name).await
    }

    async fn bind(&self, name: &Name, value: BoundValue) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        self.inner.bind(name, value).await?;
        self.persist(before).await
    }

    fn name_parser(&self) -> &dyn NameParser {
        self.inner.name_parser()
    }
}
