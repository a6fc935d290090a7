//! 워커 IPC 메시지.
//!
//! - 작업: stdin으로 `PixelMatchInput` JSON 한 줄
//! - 응답: stdout으로 불일치 픽셀 수(숫자) 한 줄

use visreg_core::error::CoreError;
use visreg_core::models::pixelmatch::PixelMatchInput;

/// 작업 메시지 인코딩 (개행으로 끝나는 JSON 한 줄)
pub fn encode_job(input: &PixelMatchInput) -> Result<String, CoreError> {
    let mut line = serde_json::to_string(input)?;
    line.push('\n');
    Ok(line)
}

/// 응답 메시지 디코딩
///
/// 정수 또는 유한한 0 이상의 실수를 받는다 (실수는 반올림).
pub fn decode_reply(line: &str) -> Result<u64, CoreError> {
    let text = line.trim();
    if let Ok(count) = text.parse::<u64>() {
        return Ok(count);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value.round() as u64),
        _ => Err(CoreError::Worker(format!(
            "워커 응답이 숫자가 아님: {text:?}"
        ))),
    }
}
