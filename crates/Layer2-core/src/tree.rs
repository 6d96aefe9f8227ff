//! Tree Materializer - 이름의 중간 경로를 sub-context로 보장
//!
//! 동시에 여러 인스턴스가 같은 디렉토리에 접근할 수 있으므로 존재 여부를
//! 먼저 확인하지 않는다. 생성을 시도하고, 이미 있으면 다시 조회해서
//! context면 재사용한다. leaf 값이 자리를 차지하고 있으면 실패한다.

use nametree_foundation::{Binding, Error, Name, NamingContext, Result};
use tracing::{debug, info};

/// sub-context 확보 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcontext {
    /// 새로 생성
    Created,
    /// 이미 존재 (이전 실행 또는 동시 실행)
    Existing,
}

/// `name` 의 모든 proper prefix (길이 1..size-1)가 context로 존재하도록 보장
///
/// prefix는 짧은 것부터 순서대로 처리한다.
pub async fn ensure_subcontexts(context: &dyn NamingContext, name: &Name) -> Result<()> {
    debug!("ensure_subcontexts({})", name);
    for i in 1..name.size() {
        retrieve_or_create_subcontext(context, &name.get_prefix(i)).await?;
    }
    Ok(())
}

/// `subcontext` 를 생성하거나 기존 context를 재사용
///
/// - 생성 성공 -> `Created`
/// - `NameAlreadyBound` 후 조회 결과가 context -> `Existing`
/// - 조회 결과가 값 -> `Error::IllegalState` (덮어쓰지 않음)
/// - 그 외 backend 오류는 그대로 전파
pub async fn retrieve_or_create_subcontext(
    context: &dyn NamingContext,
    subcontext: &Name,
) -> Result<Subcontext> {
    match context.create_subcontext(subcontext).await {
        Ok(()) => {
            info!("Created: {}", subcontext);
            Ok(Subcontext::Created)
        }
        Err(Error::NameAlreadyBound(_)) => match context.lookup(subcontext).await? {
            Binding::Context => {
                debug!("Found: {}", subcontext);
                Ok(Subcontext::Existing)
            }
            Binding::Value(value) => Err(Error::IllegalState(format!(
                "expected container, found value at {} ({})",
                subcontext,
                value.kind()
            ))),
        },
        Err(e) => Err(e),
    }
}
