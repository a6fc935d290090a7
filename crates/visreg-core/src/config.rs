//! 설정 구조체.
//!
//! 비교 워커 타임아웃, 워커 인자, 기본 pixelmatch 임계값을 정의한다.
//! 테스트 러너 전역값을 읽지 않고 항상 이 구조체로 주입한다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 워커 타임아웃 기본값 (밀리초)
pub const DEFAULT_WORKER_TIMEOUT_MS: u64 = 2_500;

/// pixelmatch 임계값 기본값
pub const DEFAULT_PIXELMATCH_THRESHOLD: f64 = 0.1;

/// 최상위 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisregConfig {
    /// 비교 워커 설정
    #[serde(default)]
    pub worker: WorkerConfig,
    /// 비교 설정
    #[serde(default)]
    pub compare: CompareConfig,
}

impl VisregConfig {
    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.worker.timeout_ms == 0 {
            return Err(CoreError::Config(
                "worker.timeout_ms는 0보다 커야 합니다".to_string(),
            ));
        }
        let threshold = self.compare.pixelmatch_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(CoreError::Config(format!(
                "compare.pixelmatch_threshold는 0~1 범위여야 합니다: {threshold}"
            )));
        }
        Ok(())
    }
}

/// 비교 워커 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// 응답 대기 제한 시간 (밀리초, 프로세스 시작 시점부터)
    #[serde(default = "default_worker_timeout_ms")]
    pub timeout_ms: u64,
    /// 워커 실행 파일에 전달할 추가 인자
    #[serde(default)]
    pub args: Vec<String>,
}

impl WorkerConfig {
    /// 타임아웃 Duration 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WORKER_TIMEOUT_MS,
            args: Vec::new(),
        }
    }
}

/// 비교 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// 픽셀 단위 민감도 (0.0 ~ 1.0, 워커 알고리즘이 해석)
    #[serde(default = "default_pixelmatch_threshold")]
    pub pixelmatch_threshold: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            pixelmatch_threshold: DEFAULT_PIXELMATCH_THRESHOLD,
        }
    }
}

fn default_worker_timeout_ms() -> u64 {
    DEFAULT_WORKER_TIMEOUT_MS
}

fn default_pixelmatch_threshold() -> f64 {
    DEFAULT_PIXELMATCH_THRESHOLD
}
