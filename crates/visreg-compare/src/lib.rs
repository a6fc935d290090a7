//! # visreg-compare
//!
//! 스크린샷 비교 오케스트레이터.
//! 새 캡처를 콘텐츠 주소로 저장하고, 마스터 이미지와 비교가 필요할 때만
//! 캐시를 확인한 뒤 워커를 호출하여 결과 레코드를 기록한다.
//!
//! ## 모듈
//! - `comparator`: `ScreenshotComparator` (비교 1회 = `compare_screenshot`)
//! - `test_path`: 테스트 파일 경로 정규화

pub mod comparator;
pub mod test_path;

pub use comparator::{CompareRequest, ScreenshotComparator};
