//! 스크린샷 레코드 모델.

use serde::{Deserialize, Serialize};

use super::build::ScreenshotBuildData;
use super::emulate::EmulateConfig;

/// 비교 단위 하나 (현재 빌드 디렉토리에 JSON으로 기록)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    /// 스크린샷 ID (설명 + 에뮬레이션 설정 해시)
    pub id: String,
    /// 현재 캡처의 콘텐츠 주소 파일명
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default)]
    pub user_agent: String,
    /// 테스트 설명
    pub desc: String,
    /// 루트 기준 정규화된 테스트 파일 경로
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_path: Option<String>,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_scale_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_touch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_landscape: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mobile: Option<bool>,
    /// 비교 결과
    pub diff: ScreenshotDiff,
}

/// 비교 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotDiff {
    pub id: String,
    pub desc: String,
    /// 기준 이미지 (마스터가 없으면 imageB와 같음)
    #[serde(rename = "imageA")]
    pub image_a: String,
    /// 현재 캡처 이미지
    #[serde(rename = "imageB")]
    pub image_b: String,
    /// 불일치 픽셀 수
    pub mismatched_pixels: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default)]
    pub user_agent: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_scale_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_touch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_landscape: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mobile: Option<bool>,
    pub allowable_mismatched_pixels: u64,
    pub allowable_mismatched_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_path: Option<String>,
    /// 실제 두 이미지 비교가 수행(또는 가능)된 경우에만 존재
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,
}

/// 레코드 생성에 필요한 캡처 정보
#[derive(Debug, Clone, Copy)]
pub struct CaptureInfo<'a> {
    pub id: &'a str,
    pub image: &'a str,
    pub desc: &'a str,
    pub test_path: Option<&'a str>,
    pub width: u32,
    pub height: u32,
}

impl Screenshot {
    /// 비교 전 초기 레코드 생성 (imageA = imageB = 현재 이미지, 불일치 0)
    pub fn new_unchanged(
        capture: CaptureInfo<'_>,
        emulate: &EmulateConfig,
        build: &ScreenshotBuildData,
    ) -> Self {
        let viewport = emulate.viewport.as_ref();
        let device_scale_factor = viewport.map(|v| v.device_scale_factor);
        let has_touch = viewport.map(|v| v.has_touch);
        let is_landscape = viewport.map(|v| v.is_landscape);
        let is_mobile = viewport.map(|v| v.is_mobile);
        let test_path = capture.test_path.map(str::to_string);

        Self {
            id: capture.id.to_string(),
            image: capture.image.to_string(),
            device: emulate.device.clone(),
            user_agent: emulate.user_agent.clone(),
            desc: capture.desc.to_string(),
            test_path: test_path.clone(),
            width: capture.width,
            height: capture.height,
            device_scale_factor,
            has_touch,
            is_landscape,
            is_mobile,
            diff: ScreenshotDiff {
                id: capture.id.to_string(),
                desc: capture.desc.to_string(),
                image_a: capture.image.to_string(),
                image_b: capture.image.to_string(),
                mismatched_pixels: 0,
                device: emulate.device.clone(),
                user_agent: emulate.user_agent.clone(),
                width: capture.width,
                height: capture.height,
                device_scale_factor,
                has_touch,
                is_landscape,
                is_mobile,
                allowable_mismatched_pixels: build.allowable_mismatched_pixels,
                allowable_mismatched_ratio: build.allowable_mismatched_ratio,
                test_path,
                cache_key: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::emulate::Viewport;

    #[test]
    fn new_unchanged_echoes_capture_fields() {
        let emulate = EmulateConfig {
            device: Some("Pixel 2".to_string()),
            user_agent: "UA".to_string(),
            viewport: Some(Viewport {
                width: 411,
                height: 731,
                device_scale_factor: 2.625,
                has_touch: true,
                is_landscape: true,
                is_mobile: true,
            }),
        };
        let build = ScreenshotBuildData {
            allowable_mismatched_pixels: 9,
            allowable_mismatched_ratio: 0.5,
            ..Default::default()
        };
        let screenshot = Screenshot::new_unchanged(
            CaptureInfo {
                id: "0123abcd",
                image: "aa.png",
                desc: "menu",
                test_path: Some("src/menu.e2e.ts"),
                width: 411,
                height: 731,
            },
            &emulate,
            &build,
        );

        assert_eq!(screenshot.diff.image_a, "aa.png");
        assert_eq!(screenshot.diff.image_b, "aa.png");
        assert_eq!(screenshot.diff.mismatched_pixels, 0);
        assert_eq!(screenshot.diff.cache_key, None);
        assert_eq!(screenshot.diff.is_landscape, Some(true));
        assert_eq!(screenshot.diff.allowable_mismatched_pixels, 9);
        assert_eq!(screenshot.test_path.as_deref(), Some("src/menu.e2e.ts"));
        assert_eq!(screenshot.device.as_deref(), Some("Pixel 2"));
    }
}
