//! 비교 워커 작업 계약.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 워커 프로세스에 보내는 단일 비교 작업
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelMatchInput {
    /// 기준 이미지 절대 경로
    #[serde(rename = "imageAPath")]
    pub image_a_path: PathBuf,
    /// 현재 이미지 절대 경로
    #[serde(rename = "imageBPath")]
    pub image_b_path: PathBuf,
    /// 실제 픽셀 너비
    pub width: u32,
    /// 실제 픽셀 높이
    pub height: u32,
    /// 픽셀 민감도 (0.0 ~ 1.0, 워커 알고리즘이 해석)
    pub pixelmatch_threshold: f64,
}
