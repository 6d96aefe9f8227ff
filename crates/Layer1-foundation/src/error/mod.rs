//! Error types for NameTree
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// NameTree 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 입력 관련 (malformed input)
    // ========================================================================
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Naming 관련 (backend)
    // ========================================================================
    #[error("Name already bound: {0}")]
    NameAlreadyBound(String),

    #[error("Name not found: {0}")]
    NameNotFound(String),

    #[error("Not a context: {0}")]
    NotContext(String),

    #[error("Naming error: {0}")]
    Naming(String),

    #[error("Object factory not found: {0}")]
    FactoryNotFound(String),

    // ========================================================================
    // 충돌 (container 자리에 value)
    // ========================================================================
    #[error("Illegal state: {0}")]
    IllegalState(String),

    // ========================================================================
    // 초기화 실패 (descriptor 정보 포함)
    // ========================================================================
    #[error("Unable to bind {descriptor}: {source}")]
    Initialization {
        descriptor: String,
        #[source]
        source: Box<Error>,
    },

}

impl Error {
    /// Naming backend 에러인지 확인 (binder가 descriptor로 감싸는 대상)
    pub fn is_naming(&self) -> bool {
        matches!(
            self,
            Error::NameAlreadyBound(_)
                | Error::NameNotFound(_)
                | Error::NotContext(_)
                | Error::Naming(_)
                | Error::FactoryNotFound(_)
        )
    }

    /// 설정/입력 오류인지 확인
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidName(_) | Error::InvalidArgument(_) | Error::Config(_)
        )
    }

    /// container 자리에 value가 있어 생긴 충돌
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::IllegalState(_))
    }

    /// 초기화 에러 생성 헬퍼
    pub fn initialization(descriptor: impl Into<String>, source: Error) -> Self {
        Error::Initialization {
            descriptor: descriptor.into(),
            source: Box::new(source),
        }
    }

    /// 감싸진 원인 에러까지 풀어서 반환
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Initialization { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
