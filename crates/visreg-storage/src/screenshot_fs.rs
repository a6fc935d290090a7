//! 스크린샷 레코드 파일 저장소.
//!
//! 구조: `<build_dir>/<screenshot id>.json`
//!
//! 레코드는 모든 계산이 끝난 뒤에만 기록되며 원자적으로 교체된다.

use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use visreg_core::error::CoreError;
use visreg_core::models::screenshot::Screenshot;
use visreg_core::ports::screenshot_writer::ScreenshotWriter;

use crate::atomic::write_atomic;

/// 레코드 파일 확장자
const RECORD_EXTENSION: &str = "json";

/// JSON 스크린샷 레코드 작성기
#[derive(Debug, Default, Clone)]
pub struct JsonScreenshotWriter;

impl JsonScreenshotWriter {
    pub fn new() -> Self {
        Self
    }

    /// 레코드 파일 경로
    pub fn record_path(build_dir: &Path, screenshot_id: &str) -> PathBuf {
        build_dir.join(format!("{screenshot_id}.{RECORD_EXTENSION}"))
    }
}

#[async_trait]
impl ScreenshotWriter for JsonScreenshotWriter {
    async fn write_screenshot_data(
        &self,
        build_dir: &Path,
        screenshot: &Screenshot,
    ) -> Result<(), CoreError> {
        fs::create_dir_all(build_dir).await?;

        let path = Self::record_path(build_dir, &screenshot.id);
        let content = serde_json::to_vec_pretty(screenshot)?;
        write_atomic(&path, &content).await?;

        debug!(
            id = %screenshot.id,
            mismatched_pixels = screenshot.diff.mismatched_pixels,
            "스크린샷 레코드 저장: {}",
            path.display()
        );
        Ok(())
    }
}

/// 마스터 빌드 디렉토리의 레코드에서 ID → 이미지 파일명 맵 생성
///
/// 디렉토리가 없으면 빈 맵을 반환한다. 파싱할 수 없는 파일은 건너뛴다.
pub async fn load_master_screenshots(
    master_build_dir: &Path,
) -> Result<HashMap<String, String>, CoreError> {
    if !fs::try_exists(master_build_dir).await? {
        info!(
            "마스터 빌드 디렉토리 없음, 빈 목록 사용: {}",
            master_build_dir.display()
        );
        return Ok(HashMap::new());
    }

    let mut record_paths = Vec::new();
    let mut entries = fs::read_dir(master_build_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION) {
            record_paths.push(path);
        }
    }

    let records = join_all(record_paths.into_iter().map(|path| async move {
        let content = fs::read(&path).await;
        (path, content)
    }))
    .await;

    let mut masters = HashMap::with_capacity(records.len());
    for (path, content) in records {
        let parsed = content
            .map_err(CoreError::from)
            .and_then(|bytes| serde_json::from_slice::<Screenshot>(&bytes).map_err(CoreError::from));
        match parsed {
            Ok(screenshot) => {
                masters.insert(screenshot.id, screenshot.image);
            }
            Err(e) => warn!("마스터 레코드 건너뜀: {} ({e})", path.display()),
        }
    }

    info!(
        "마스터 스크린샷 {}개 로드: {}",
        masters.len(),
        master_build_dir.display()
    );
    Ok(masters)
}
