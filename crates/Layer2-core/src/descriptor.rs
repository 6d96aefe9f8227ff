//! ValueDescriptor - 바인딩할 (이름, 값) 쌍

use nametree_foundation::Name;
use std::fmt;

/// 디렉토리에 바인딩될 이름과 값
///
/// 파싱 결과를 binder로 넘기는 전달용 객체. 생성 후 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDescriptor<T> {
    name: Name,
    value: T,
}

impl<T> ValueDescriptor<T> {
    pub fn new(name: Name, value: T) -> Self {
        Self { name, value }
    }

    pub fn of(name: Name, value: T) -> Self {
        Self::new(name, value)
    }

    /// 값이 위치할 이름
    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Display> fmt::Display for ValueDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueDescriptor{{{}={}}}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let descriptor = ValueDescriptor::of("properties/nothing".parse().unwrap(), "nose");
        assert_eq!(descriptor.to_string(), "ValueDescriptor{properties/nothing=nose}");
        assert_eq!(descriptor.name().size(), 2);
        assert_eq!(*descriptor.value(), "nose");
    }
}
