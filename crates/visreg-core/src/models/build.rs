//! 빌드 단위 컨텍스트 모델.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::cache::DiffCache;

/// 테스트 실행 1회 동안 공유되는 빌드 컨텍스트
///
/// 호출자가 실행마다 한 번 구성한다. 비교 코어는 `cache`에만 쓴다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotBuildData {
    /// 프로젝트 루트 (테스트 경로 정규화 기준)
    pub root_dir: PathBuf,
    /// 콘텐츠 주소 이미지 디렉토리
    pub images_dir: PathBuf,
    /// 현재 빌드 레코드 출력 디렉토리
    pub current_build_dir: PathBuf,
    /// 스크린샷 ID → 마스터 이미지 파일명
    #[serde(default)]
    pub master_screenshots: HashMap<String, String>,
    /// 캐시 키 → 불일치 픽셀 수
    #[serde(default)]
    pub cache: DiffCache,
    /// 허용 불일치 픽셀 수
    #[serde(default)]
    pub allowable_mismatched_pixels: u64,
    /// 허용 불일치 비율
    #[serde(default)]
    pub allowable_mismatched_ratio: f64,
    /// 마스터 갱신 모드
    #[serde(default)]
    pub update_master: bool,
    /// 비교 워커 실행 파일 경로
    pub pixelmatch_module_path: PathBuf,
}

impl ScreenshotBuildData {
    /// 스크린샷 ID에 해당하는 마스터 이미지 파일명
    pub fn master_image(&self, screenshot_id: &str) -> Option<&str> {
        self.master_screenshots
            .get(screenshot_id)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}
