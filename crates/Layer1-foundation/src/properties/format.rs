//! Properties 파일 포맷
//!
//! 라인 기반 `key=value` 텍스트:
//! - 줄 끝은 `\n`, `\r`, `\r\n` 모두 허용
//! - `#` / `!` 로 시작하는 줄은 주석
//! - 구분자는 이스케이프되지 않은 첫 `=`, `:` 또는 공백
//! - 홀수 개의 `\` 로 끝나는 줄은 다음 줄로 이어짐
//! - `\t \n \r \f \uXXXX` 이스케이프

use super::Properties;
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// 문자열 내용을 Properties로 파싱
pub fn parse_properties(content: &str) -> Result<Properties> {
    let mut properties = Properties::new();
    let mut lines = split_lines(content).into_iter();

    while let Some(line) = lines.next() {
        let line = line.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        properties.set(unescape(key)?, unescape(value)?);
    }

    Ok(properties)
}

/// 파일에서 Properties 로드
pub fn load_properties(path: impl AsRef<Path>) -> Result<Properties> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            Error::Config(format!("File not found: {}", path.display()))
        }
        _ => Error::Config(format!(
            "Unable to load properties: {}: {}",
            path.display(),
            e
        )),
    })?;

    let properties = parse_properties(&content).map_err(|e| {
        Error::Config(format!("Unable to load properties: {}: {}", path.display(), e))
    })?;
    debug!("Loaded {} properties from {}", properties.len(), path.display());
    Ok(properties)
}

// `\n`, `\r`, `\r\n` 기준으로 분리
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(i) => {
                lines.push(&rest[..i]);
                let terminator = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

// 끝의 `\` 개수가 홀수면 다음 줄로 이어짐
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut value = line[key_end..].trim_start_matches(is_blank);
    if let Some(rest) = value.strip_prefix(|c: char| c == '=' || c == ':') {
        value = rest.trim_start_matches(is_blank);
    }
    (key, value)
}

fn unescape(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        Error::InvalidArgument(format!("Malformed \\uxxxx encoding: \\u{}", hex))
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_separators_and_comments() {
        let props = parse_properties(
            "# comment\n! also comment\n\na=1\nb : 2\nc 3\n  d=\ne = = x\n",
        )
        .unwrap();

        assert_eq!(props.len(), 5);
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some(""));
        assert_eq!(props.get("e"), Some("= x"));
    }

    #[test]
    fn test_value_keeps_equals() {
        let props = parse_properties("url=ldap://host:389/dc=example,dc=com").unwrap();
        assert_eq!(props.get("url"), Some("ldap://host:389/dc=example,dc=com"));
    }

    #[test]
    fn test_continuation_lines() {
        let props = parse_properties("fruits=apple, \\\n    banana\nodd=a\\\\\nnext=1").unwrap();
        assert_eq!(props.get("fruits"), Some("apple, banana"));
        assert_eq!(props.get("odd"), Some("a\\"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn test_line_terminators() {
        let props = parse_properties("a=1\rb=2\r\nc=3\nd=con\\\r  tinued\r\ne=\\\r\n  5").unwrap();
        assert_eq!(props.len(), 5);
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("continued"));
        assert_eq!(props.get("e"), Some("5"));
    }

    #[test]
    fn test_escapes() {
        let props = parse_properties("key\\ with\\ space=tab\\there\nsnow=\\u2603").unwrap();
        assert_eq!(props.get("key with space"), Some("tab\there"));
        assert_eq!(props.get("snow"), Some("\u{2603}"));

        assert!(parse_properties("bad=\\u12").is_err());
    }

    #[test]
    fn test_later_duplicate_wins() {
        let props = parse_properties("a=1\na=2").unwrap();
        assert_eq!(props.get("a"), Some("2"));
    }

    #[test]
    fn test_load_properties_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "testfield1=1\ntestfield2=1").unwrap();

        let props = load_properties(file.path()).unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props.get("testfield2"), Some("1"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_properties("/definitely/not/here.properties").unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.starts_with("File not found")));
    }
}
