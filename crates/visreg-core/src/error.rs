//! visreg 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 이 에러를 그대로 반환한다.
//! 어떤 에러도 이 레이어에서 재시도하지 않는다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 잘못된 입력 (빈 테스트 설명 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// I/O 에러 (이미지 저장, 레코드 저장)
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 비교 워커 프로세스 시작 실패
    #[error("워커 프로세스 시작 실패: {0}")]
    WorkerSpawn(String),

    /// 워커가 실패를 보고했거나 채널 에러 발생
    #[error("워커 에러: {0}")]
    Worker(String),

    /// 제한 시간 내 워커 응답 없음
    #[error("워커 타임아웃: {timeout_ms}ms 초과")]
    WorkerTimeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },
}
