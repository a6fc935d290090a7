//! 픽셀 비교 포트.
//!
//! 구현: `visreg-worker` crate (`ProcessPixelMatcher`, 격리된 워커 프로세스)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::pixelmatch::PixelMatchInput;

/// 두 이미지의 불일치 픽셀 수 계산
#[async_trait]
pub trait PixelMatcher: Send + Sync {
    /// 작업 하나를 실행하고 불일치 픽셀 수 반환.
    ///
    /// 호출당 정확히 한 번 결과(성공 또는 실패)가 확정된다.
    async fn mismatched_pixels(&self, input: &PixelMatchInput) -> Result<u64, CoreError>;
}
