//! 콘텐츠 주소 이미지 저장소 포트.
//!
//! 구현: `visreg-storage` crate (`ContentImageStore`)

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::CoreError;

/// 이미지 바이트를 콘텐츠 해시 파일명으로 저장
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 바이트 저장 후 `<hash>.png` 파일명 반환.
    ///
    /// 같은 바이트를 여러 번 저장해도 물리적 쓰기는 한 번뿐이다.
    async fn store(&self, bytes: &[u8]) -> Result<String, CoreError>;

    /// 저장된 파일명의 절대 경로
    fn path_of(&self, file_name: &str) -> PathBuf;
}
