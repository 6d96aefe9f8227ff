//! Argument Parsing - `name=payload` 인자를 descriptor로 변환
//!
//! `=` 는 첫 번째 것만 구분자로 쓴다 (payload에 `=` 포함 가능).
//! 결과 순서는 입력 순서와 같다.

use crate::descriptor::ValueDescriptor;
use nametree_foundation::{load_properties, Error, Name, NameParser, Properties, Result};

/// payload 문자열을 값으로 변환
pub trait PayloadLoader {
    type Value;

    fn load(&self, payload: &str) -> Result<Self::Value>;
}

/// payload를 그대로 문자열 값으로
#[derive(Debug, Clone, Copy, Default)]
pub struct StringPayload;

impl PayloadLoader for StringPayload {
    type Value = String;

    fn load(&self, payload: &str) -> Result<String> {
        Ok(payload.to_string())
    }
}

/// payload를 properties 파일 경로로 해석
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesFilePayload;

impl PayloadLoader for PropertiesFilePayload {
    type Value = Properties;

    fn load(&self, payload: &str) -> Result<Properties> {
        load_properties(payload)
    }
}

/// `name=payload` 분리 (`=` 가 없으면 `InvalidArgument`)
pub fn split_argument(arg: &str) -> Result<(&str, &str)> {
    arg.split_once('=').ok_or_else(|| {
        Error::InvalidArgument(format!("expected <name>=<payload>, got '{}'", arg))
    })
}

/// 이름 파싱 (파서 오류는 `InvalidName`)
pub fn parse_name(parser: &dyn NameParser, raw: &str) -> Result<Name> {
    parser.parse(raw).map_err(|e| match e {
        Error::InvalidName(reason) => {
            Error::InvalidName(format!("Improper name '{}': {}", raw, reason))
        }
        other => Error::InvalidName(format!("Improper name '{}': {}", raw, other)),
    })
}

/// 인자 목록을 descriptor 목록으로 변환
pub fn parse_descriptors<L, S>(
    parser: &dyn NameParser,
    args: &[S],
    loader: &L,
) -> Result<Vec<ValueDescriptor<L::Value>>>
where
    L: PayloadLoader,
    S: AsRef<str>,
{
    let mut descriptors = Vec::with_capacity(args.len());
    for arg in args {
        let (raw_name, payload) = split_argument(arg.as_ref())?;
        let name = parse_name(parser, raw_name)?;
        let value = loader.load(payload)?;
        descriptors.push(ValueDescriptor::of(name, value));
    }
    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nametree_foundation::CompositeNameParser;
    use std::io::Write;

    #[test]
    fn test_string_arguments_keep_order() {
        let result =
            parse_descriptors(&CompositeNameParser, &["properties/test=test", "properties/mock=value"], &StringPayload)
                .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name().to_string(), "properties/test");
        assert_eq!(result[0].value(), "test");
        assert_eq!(result[1].name().to_string(), "properties/mock");
        assert_eq!(result[1].value(), "value");
    }

    #[test]
    fn test_two_string_values_in_input_order() {
        let result = parse_descriptors(&CompositeNameParser, &["a=1", "b=2"], &StringPayload).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name().to_string(), "a");
        assert_eq!(result[0].value(), "1");
        assert_eq!(result[1].name().to_string(), "b");
        assert_eq!(result[1].value(), "2");
    }

    #[test]
    fn test_not_reordered() {
        let result = parse_descriptors(&CompositeNameParser, &["b=2", "a=1"], &StringPayload).unwrap();
        assert_eq!(result[0].value(), "2");
        assert_eq!(result[1].value(), "1");
    }

    #[test]
    fn test_split_on_first_equals_only() {
        let result =
            parse_descriptors(&CompositeNameParser, &["jdbc/url=a=b=c"], &StringPayload).unwrap();
        assert_eq!(result[0].value(), "a=b=c");

        let result = parse_descriptors(&CompositeNameParser, &["empty="], &StringPayload).unwrap();
        assert_eq!(result[0].value(), "");
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_descriptors(&CompositeNameParser, &["a=1", "nopayload"], &StringPayload)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref m) if m.contains("nopayload")));
    }

    #[test]
    fn test_invalid_name() {
        let err = parse_descriptors(&CompositeNameParser, &["a//b=1"], &StringPayload).unwrap_err();
        assert!(matches!(err, Error::InvalidName(ref m) if m.contains("a//b")));

        let err = parse_descriptors(&CompositeNameParser, &["=1"], &StringPayload).unwrap_err();
        assert!(matches!(err, Error::InvalidName(_)));
    }

    #[test]
    fn test_properties_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "java.naming.provider.url=ldap://x").unwrap();
        let arg = format!("conn/ldap1={}", file.path().display());

        let result = parse_descriptors(&CompositeNameParser, &[arg], &PropertiesFilePayload).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].value().get("java.naming.provider.url"), Some("ldap://x"));
    }

    #[test]
    fn test_missing_properties_file() {
        let err = parse_descriptors(
            &CompositeNameParser,
            &["a=/no/such/file.properties"],
            &PropertiesFilePayload,
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }
}
