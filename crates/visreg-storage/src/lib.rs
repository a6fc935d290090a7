//! # visreg-storage
//!
//! 로컬 저장소 어댑터.
//! 스크린샷 이미지는 콘텐츠 해시 이름으로 한 번만 저장하고,
//! 스크린샷 레코드와 비교 캐시는 JSON 파일로 기록한다.
//!
//! ## 모듈
//! - `image_store`: 콘텐츠 주소 이미지 저장소 (ImageStore 구현)
//! - `screenshot_fs`: 스크린샷 레코드 저장 (ScreenshotWriter 구현), 마스터 목록 로드
//! - `cache_file`: 비교 캐시 JSON 파일
//! - `atomic`: 임시 파일 + rename 원자적 쓰기

pub mod atomic;
pub mod cache_file;
pub mod image_store;
pub mod screenshot_fs;
