//! visreg 도메인 모델.
//!
//! 스크린샷 비교 파이프라인이 주고받는 데이터 구조체를 정의한다.
//! 디스크에 기록되는 레코드는 리포트 뷰어와 같은 camelCase 필드명을 쓴다.

pub mod build;
pub mod cache;
pub mod emulate;
pub mod pixelmatch;
pub mod screenshot;
