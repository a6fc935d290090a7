//! 스크린샷 레코드 저장 포트.
//!
//! 구현: `visreg-storage` crate (`JsonScreenshotWriter`)

use async_trait::async_trait;
use std::path::Path;

use crate::error::CoreError;
use crate::models::screenshot::Screenshot;

/// 빌드 디렉토리에 스크린샷 레코드 기록
///
/// 멱등이어야 하며, 서로 다른 레코드에 대한 동시 호출에 안전해야 한다.
#[async_trait]
pub trait ScreenshotWriter: Send + Sync {
    async fn write_screenshot_data(
        &self,
        build_dir: &Path,
        screenshot: &Screenshot,
    ) -> Result<(), CoreError>;
}
