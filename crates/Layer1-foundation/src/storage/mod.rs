//! Storage module for NameTree
//!
//! - `json`: JSON - 설정/디렉토리 스냅샷 파일 저장/로드

mod json;

// JSON Storage (범용)
pub use json::JsonStore;
