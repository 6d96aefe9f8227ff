//! NameParser - 문자열을 Name으로 변환

use super::name::{Name, ESCAPE, SEPARATOR};
use crate::{Error, Result};

/// 이름 파서 (naming context가 제공)
pub trait NameParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<Name>;
}

/// slash 구분 composite name 파서
///
/// - `\` 다음 문자는 그대로 segment에 포함
/// - 빈 문자열, 빈 segment(`a//b`, `/a`, `a/`)는 거부
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeNameParser;

impl NameParser for CompositeNameParser {
    fn parse(&self, raw: &str) -> Result<Name> {
        if raw.is_empty() {
            return Err(Error::InvalidName("empty name".to_string()));
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            match c {
                ESCAPE => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => {
                        return Err(Error::InvalidName(format!(
                            "'{}' ends with a dangling escape",
                            raw
                        )))
                    }
                },
                SEPARATOR => {
                    if current.is_empty() {
                        return Err(Error::InvalidName(format!(
                            "'{}' contains an empty segment",
                            raw
                        )));
                    }
                    segments.push(std::mem::take(&mut current));
                }
                other => current.push(other),
            }
        }

        if current.is_empty() {
            return Err(Error::InvalidName(format!(
                "'{}' contains an empty segment",
                raw
            )));
        }
        segments.push(current);

        Ok(Name::from_segments(segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let name = CompositeNameParser.parse("properties/test").unwrap();
        assert_eq!(name.size(), 2);
        assert_eq!(name.get(0), Some("properties"));
        assert_eq!(name.to_string(), "properties/test");
    }

    #[test]
    fn test_parse_escaped_separator() {
        let name = CompositeNameParser.parse("a\\/b/c").unwrap();
        assert_eq!(name.size(), 2);
        assert_eq!(name.get(0), Some("a/b"));
    }

    #[test]
    fn test_reject_malformed() {
        for raw in ["", "/a", "a/", "a//b", "a\\"] {
            let err = CompositeNameParser.parse(raw).unwrap_err();
            assert!(matches!(err, Error::InvalidName(_)), "{raw:?} -> {err}");
        }
    }
}
