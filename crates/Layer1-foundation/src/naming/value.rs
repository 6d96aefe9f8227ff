//! Bound Value - 디렉토리 leaf에 바인딩되는 값

use crate::properties::Properties;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 지연 생성 참조
///
/// 생성자 인자 없이, lookup 시점에 어떤 factory를 호출할지만 기록한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// 생성될 객체의 타입 이름
    pub class_name: String,

    /// 호출할 factory 이름 (ObjectFactoryRegistry 키)
    pub factory: String,

    /// factory 위치 (선택)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_location: Option<String>,
}

impl Reference {
    pub fn new(class_name: impl Into<String>, factory: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            factory: factory.into(),
            factory_location: None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reference{{class={}, factory={}}}", self.class_name, self.factory)
    }
}

/// leaf 값
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum BoundValue {
    String(String),
    Properties(Properties),
    Reference(Reference),
}

impl BoundValue {
    pub fn kind(&self) -> &'static str {
        match self {
            BoundValue::String(_) => "string",
            BoundValue::Properties(_) => "properties",
            BoundValue::Reference(_) => "reference",
        }
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::String(s) => write!(f, "{}", s),
            BoundValue::Properties(p) => write!(f, "{}", p),
            BoundValue::Reference(r) => write!(f, "{}", r),
        }
    }
}

// ============================================================================
// IntoBoundValue - payload 종류별 변환
// ============================================================================

/// 바인딩 가능한 payload 타입
pub trait IntoBoundValue {
    fn into_bound_value(self) -> BoundValue;
}

impl IntoBoundValue for BoundValue {
    fn into_bound_value(self) -> BoundValue {
        self
    }
}

impl IntoBoundValue for String {
    fn into_bound_value(self) -> BoundValue {
        BoundValue::String(self)
    }
}

impl IntoBoundValue for &str {
    fn into_bound_value(self) -> BoundValue {
        BoundValue::String(self.to_string())
    }
}

impl IntoBoundValue for Properties {
    fn into_bound_value(self) -> BoundValue {
        BoundValue::Properties(self)
    }
}

impl IntoBoundValue for Reference {
    fn into_bound_value(self) -> BoundValue {
        BoundValue::Reference(self)
    }
}
