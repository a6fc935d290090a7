//! 식별자 해시.
//!
//! - 스크린샷 ID: (설명, 에뮬레이션 설정) → 8자리 hex
//! - 캐시 키: (imageA, imageB, 임계값) → 10자리 hex
//! - 콘텐츠 해시: 이미지 바이트 → 32자리 hex (128bit)
//!
//! 보안 경계가 아닌 콘텐츠 식별용이다. SHA-256 다이제스트를 잘라서 사용한다.

use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::models::emulate::EmulateConfig;

/// 스크린샷 ID 길이 (hex 문자 수)
pub const SCREENSHOT_ID_LEN: usize = 8;

/// 캐시 키 길이 (hex 문자 수)
pub const CACHE_KEY_LEN: usize = 10;

/// 콘텐츠 해시 길이 (hex 문자 수, 128bit)
pub const CONTENT_HASH_LEN: usize = 32;

/// 저장 이미지 확장자
pub const IMAGE_EXTENSION: &str = "png";

/// 스크린샷 ID 계산
///
/// 설명, user agent, 그리고 뷰포트가 있으면 width, height, deviceScaleFactor,
/// hasTouch, isMobile 순서로 해시한다. `isLandscape`는 레코드에는 기록되지만
/// 해시에는 포함하지 않는다 (이 도구로 기록한 마스터 ID와 호환).
pub fn compute_screenshot_id(
    description: &str,
    emulate: &EmulateConfig,
) -> Result<String, CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "테스트 설명이 비어 있습니다".to_string(),
        ));
    }

    let mut hasher = Sha256::new();
    hasher.update(format!("{description}:"));
    hasher.update(format!("{}:", emulate.user_agent));

    if let Some(viewport) = &emulate.viewport {
        hasher.update(format!("{}:", viewport.width));
        hasher.update(format!("{}:", viewport.height));
        hasher.update(format!("{}:", viewport.device_scale_factor));
        hasher.update(format!("{}:", viewport.has_touch));
        hasher.update(format!("{}:", viewport.is_mobile));
    }

    Ok(truncated_hex(hasher, SCREENSHOT_ID_LEN))
}

/// 이미지 쌍 + 임계값 캐시 키 계산
///
/// `imageA:imageB:threshold`를 위치 순서대로 해시한다.
/// A/B 순서를 바꾸면 다른 키가 나온다.
pub fn compute_cache_key(image_a: &str, image_b: &str, pixelmatch_threshold: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{image_a}:{image_b}:{pixelmatch_threshold}"));
    truncated_hex(hasher, CACHE_KEY_LEN)
}

/// 이미지 바이트의 콘텐츠 해시 (32자리 hex)
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    truncated_hex(hasher, CONTENT_HASH_LEN)
}

/// 콘텐츠 주소 파일명 (`<hash>.png`)
pub fn image_file_name(bytes: &[u8]) -> String {
    format!("{}.{IMAGE_EXTENSION}", content_hash(bytes))
}

fn truncated_hex(hasher: Sha256, len: usize) -> String {
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(len);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::emulate::Viewport;

    fn desktop() -> EmulateConfig {
        EmulateConfig {
            device: None,
            user_agent: "UA1".to_string(),
            viewport: Some(Viewport {
                width: 100,
                height: 100,
                device_scale_factor: 1.0,
                has_touch: false,
                is_landscape: false,
                is_mobile: false,
            }),
        }
    }

    #[test]
    fn screenshot_id_is_deterministic() {
        let a = compute_screenshot_id("red square", &desktop()).unwrap();
        let b = compute_screenshot_id("red square", &desktop()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), SCREENSHOT_ID_LEN);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn screenshot_id_depends_on_description() {
        let a = compute_screenshot_id("red square", &desktop()).unwrap();
        let b = compute_screenshot_id("blue square", &desktop()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn screenshot_id_depends_on_hashed_viewport_fields() {
        let base = compute_screenshot_id("card", &desktop()).unwrap();

        let mut touch = desktop();
        touch.viewport.as_mut().unwrap().has_touch = true;
        assert_ne!(base, compute_screenshot_id("card", &touch).unwrap());

        let mut retina = desktop();
        retina.viewport.as_mut().unwrap().device_scale_factor = 2.0;
        assert_ne!(base, compute_screenshot_id("card", &retina).unwrap());

        let mut no_viewport = desktop();
        no_viewport.viewport = None;
        assert_ne!(base, compute_screenshot_id("card", &no_viewport).unwrap());
    }

    #[test]
    fn screenshot_id_ignores_landscape_and_device_name() {
        let base = compute_screenshot_id("card", &desktop()).unwrap();

        let mut landscape = desktop();
        landscape.viewport.as_mut().unwrap().is_landscape = true;
        landscape.device = Some("iPhone X".to_string());
        assert_eq!(base, compute_screenshot_id("card", &landscape).unwrap());
    }

    #[test]
    fn empty_description_is_invalid_input() {
        assert!(matches!(
            compute_screenshot_id("", &desktop()),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_screenshot_id("   ", &desktop()),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn cache_key_is_deterministic_and_sensitive() {
        let key = compute_cache_key("a.png", "b.png", 0.1);
        assert_eq!(key, compute_cache_key("a.png", "b.png", 0.1));
        assert_eq!(key.len(), CACHE_KEY_LEN);

        assert_ne!(key, compute_cache_key("c.png", "b.png", 0.1));
        assert_ne!(key, compute_cache_key("a.png", "c.png", 0.1));
        assert_ne!(key, compute_cache_key("a.png", "b.png", 0.2));
    }

    #[test]
    fn cache_key_is_order_sensitive() {
        assert_ne!(
            compute_cache_key("a.png", "b.png", 0.1),
            compute_cache_key("b.png", "a.png", 0.1)
        );
    }

    #[test]
    fn content_addressed_names() {
        let red = image_file_name(b"red pixels");
        let blue = image_file_name(b"blue pixels");
        assert_eq!(red, image_file_name(b"red pixels"));
        assert_ne!(red, blue);
        assert!(red.ends_with(".png"));
        assert_eq!(red.len(), CONTENT_HASH_LEN + ".png".len());
    }
}
