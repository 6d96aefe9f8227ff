//! Name - 계층형 이름 (slash 구분 composite name)

use super::parser::{CompositeNameParser, NameParser};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 구분자
pub const SEPARATOR: char = '/';

/// 이스케이프 문자
pub const ESCAPE: char = '\\';

/// 디렉토리 트리 안의 위치를 나타내는 순서 있는 segment 목록
///
/// 크기 0인 이름은 root를 뜻한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    segments: Vec<String>,
}

impl Name {
    /// 빈 이름 (root)
    pub fn empty() -> Self {
        Self::default()
    }

    /// segment 목록에서 생성 (검증은 parser 책임)
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// 앞쪽 `len`개 segment (0..len)
    pub fn get_prefix(&self, len: usize) -> Name {
        let len = len.min(self.segments.len());
        Name {
            segments: self.segments[..len].to_vec(),
        }
    }

    /// `start`부터 끝까지
    pub fn get_suffix(&self, start: usize) -> Name {
        let start = start.min(self.segments.len());
        Name {
            segments: self.segments[start..].to_vec(),
        }
    }

    /// 마지막을 제외한 부모 이름 (root이면 None)
    pub fn parent(&self) -> Option<Name> {
        if self.is_empty() {
            None
        } else {
            Some(self.get_prefix(self.size() - 1))
        }
    }

    /// segment 추가 (빈 segment는 거부)
    pub fn add(&mut self, segment: impl Into<String>) -> Result<()> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(Error::InvalidName(format!(
                "empty segment cannot be appended to '{}'",
                self
            )));
        }
        self.segments.push(segment);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            for c in segment.chars() {
                if c == SEPARATOR || c == ESCAPE {
                    write!(f, "{}", ESCAPE)?;
                }
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CompositeNameParser.parse(s)
    }
}

// 직렬화는 문자열 형태로
impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(Name::empty());
        }
        raw.parse().map_err(serde::de::Error::custom)
    }
}
