//! # visreg-worker
//!
//! 픽셀 비교를 격리된 워커 프로세스에 위임한다.
//! 비교는 CPU를 많이 쓰므로 호출 프로세스를 막거나 죽이지 않도록
//! 작업마다 별도 OS 프로세스를 띄우고 제한 시간 안에 응답을 받는다.
//!
//! ## 모듈
//! - `bridge`: `PixelMatcher` 포트 구현 (`ProcessPixelMatcher`)
//! - `protocol`: 작업/응답 메시지 인코딩

pub mod bridge;
pub mod protocol;

pub use bridge::ProcessPixelMatcher;
