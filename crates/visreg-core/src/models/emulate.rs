//! 에뮬레이션 설정 모델.

use serde::{Deserialize, Serialize};

/// 스크린샷 캡처 시 사용된 에뮬레이션 파라미터 (캡처마다 호출자가 제공)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmulateConfig {
    /// 디바이스 이름 (예: "iPhone X")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// User-Agent 문자열
    #[serde(default)]
    pub user_agent: String,
    /// 뷰포트 (없으면 브라우저 기본값)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

/// 뷰포트 설명
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_device_scale_factor")]
    pub device_scale_factor: f64,
    #[serde(default)]
    pub has_touch: bool,
    #[serde(default)]
    pub is_landscape: bool,
    #[serde(default)]
    pub is_mobile: bool,
}

impl Viewport {
    /// 실제 픽셀 크기 (뷰포트 × deviceScaleFactor, 반올림)
    pub fn natural_size(&self) -> (u32, u32) {
        let scale = |value: u32| (f64::from(value) * self.device_scale_factor).round() as u32;
        (scale(self.width), scale(self.height))
    }
}

fn default_device_scale_factor() -> f64 {
    1.0
}
