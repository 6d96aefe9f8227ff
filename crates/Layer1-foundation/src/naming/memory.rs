//! In-memory Directory - RwLock으로 보호되는 이름 트리
//!
//! ```text
//! root (Context)
//!  ├── properties (Context)
//!  │    └── test (Leaf: Properties)
//!  └── conn (Context)
//!       ├── ldap1 (Leaf: Reference)
//!       └── ldap1__properties (Leaf: Properties)
//! ```

use super::context::{Binding, NamingContext};
use super::name::Name;
use super::parser::{CompositeNameParser, NameParser};
use super::spi::{ObjectFactory, ObjectFactoryRegistry, Resolved};
use super::value::BoundValue;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::trace;

// ============================================================================
// Node - 트리 노드
// ============================================================================

/// 디렉토리 트리 노드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    Context {
        #[serde(default)]
        children: BTreeMap<String, Node>,
    },
    Leaf {
        value: BoundValue,
    },
}

impl Default for Node {
    fn default() -> Self {
        Node::empty_context()
    }
}

impl Node {
    pub fn empty_context() -> Self {
        Node::Context {
            children: BTreeMap::new(),
        }
    }

    pub fn is_context(&self) -> bool {
        matches!(self, Node::Context { .. })
    }

    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Context { children } => Some(children),
            Node::Leaf { .. } => None,
        }
    }

    fn to_binding(&self) -> Binding {
        match self {
            Node::Context { .. } => Binding::Context,
            Node::Leaf { value } => Binding::Value(value.clone()),
        }
    }

    fn walk(&self, path: &Name) -> Result<&Node> {
        let mut node = self;
        for (i, segment) in path.iter().enumerate() {
            node = match node {
                Node::Context { children } => children
                    .get(segment)
                    .ok_or_else(|| Error::NameNotFound(path.get_prefix(i + 1).to_string()))?,
                Node::Leaf { .. } => return Err(Error::NotContext(path.get_prefix(i).to_string())),
            };
        }
        Ok(node)
    }

    fn walk_mut(&mut self, path: &Name) -> Result<&mut Node> {
        let mut node = self;
        for (i, segment) in path.iter().enumerate() {
            node = match node {
                Node::Context { children } => children
                    .get_mut(segment)
                    .ok_or_else(|| Error::NameNotFound(path.get_prefix(i + 1).to_string()))?,
                Node::Leaf { .. } => return Err(Error::NotContext(path.get_prefix(i).to_string())),
            };
        }
        Ok(node)
    }

    // `name` 의 부모 context의 children
    fn parent_children_mut(&mut self, name: &Name) -> Result<&mut BTreeMap<String, Node>> {
        let parent = name.get_prefix(name.size().saturating_sub(1));
        match self.walk_mut(&parent)? {
            Node::Context { children } => Ok(children),
            Node::Leaf { .. } => Err(Error::NotContext(parent.to_string())),
        }
    }

    /// 트리 내 context 개수 (root 제외)
    pub fn count_contexts(&self) -> usize {
        match self {
            Node::Context { children } => children
                .values()
                .map(|child| usize::from(child.is_context()) + child.count_contexts())
                .sum(),
            Node::Leaf { .. } => 0,
        }
    }
}

// ============================================================================
// InMemoryDirectory
// ============================================================================

/// 프로세스 내 디렉토리 backend
#[derive(Debug)]
pub struct InMemoryDirectory {
    root: RwLock<Node>,
    factories: Arc<ObjectFactoryRegistry>,
    parser: CompositeNameParser,
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::empty_context()),
            factories: Arc::new(ObjectFactoryRegistry::new()),
            parser: CompositeNameParser,
        }
    }

    /// 저장된 트리에서 복원 (root는 Context여야 함)
    pub fn from_node(root: Node) -> Result<Self> {
        if !root.is_context() {
            return Err(Error::Config(
                "directory snapshot root must be a context".to_string(),
            ));
        }
        Ok(Self {
            root: RwLock::new(root),
            ..Self::new()
        })
    }

    /// 현재 트리 복사본
    pub async fn snapshot(&self) -> Node {
        self.root.read().await.clone()
    }

    pub fn factories(&self) -> &Arc<ObjectFactoryRegistry> {
        &self.factories
    }

    pub async fn register_factory(&self, factory: Arc<dyn ObjectFactory>) {
        self.factories.register(factory).await;
    }

    /// Reference는 factory로 해석해서 조회
    pub async fn lookup_object(&self, name: &Name) -> Result<Resolved> {
        // lookup 후 lock을 놓은 상태에서 factory 호출
        self.factories.resolve(self, name).await
    }

    /// 트리 전체 교체 (저장 실패 시 되돌리기용)
    pub(crate) async fn restore(&self, root: Node) {
        *self.root.write().await = root;
    }
}

#[async_trait]
impl NamingContext for InMemoryDirectory {
    async fn create_subcontext(&self, name: &Name) -> Result<()> {
        let last = name
            .last()
            .ok_or_else(|| Error::InvalidName("cannot create the root context".to_string()))?;

        let mut root = self.root.write().await;
        let children = root.parent_children_mut(name)?;
        if children.contains_key(last) {
            return Err(Error::NameAlreadyBound(name.to_string()));
        }
        children.insert(last.to_string(), Node::empty_context());
        trace!("create_subcontext({})", name);
        Ok(())
    }

    async fn lookup(&self, name: &Name) -> Result<Binding> {
        let root = self.root.read().await;
        Ok(root.walk(name)?.to_binding())
    }

    async fn bind(&self, name: &Name, value: BoundValue) -> Result<()> {
        let last = name
            .last()
            .ok_or_else(|| Error::InvalidName("cannot bind the root context".to_string()))?;

        let mut root = self.root.write().await;
        let children = root.parent_children_mut(name)?;
        if matches!(children.get(last), Some(Node::Context { .. })) {
            return Err(Error::IllegalState(format!(
                "expected value, found container at {}",
                name
            )));
        }
        children.insert(last.to_string(), Node::Leaf { value });
        trace!("bind({})", name);
        Ok(())
    }

    fn name_parser(&self) -> &dyn NameParser {
        &self.parser
    }
}
