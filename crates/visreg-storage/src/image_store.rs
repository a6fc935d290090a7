//! 콘텐츠 주소 이미지 저장소.
//!
//! 구조: `<images_dir>/<32자리 hex 해시>.png`
//!
//! 파일명이 내용에서 결정되므로 이미 존재하는 파일은 다시 쓰지 않는다.
//! 같은 내용을 동시에 저장하는 작성자가 있어도 결과는 동일하다.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, info};
use visreg_core::error::CoreError;
use visreg_core::identity::image_file_name;
use visreg_core::ports::image_store::ImageStore;

use crate::atomic::write_atomic;

/// 콘텐츠 주소 이미지 저장소
pub struct ContentImageStore {
    /// 이미지 디렉토리
    images_dir: PathBuf,
    /// 실제 디스크 쓰기 횟수
    write_count: AtomicU64,
}

impl ContentImageStore {
    /// 새 이미지 저장소 생성 (디렉토리가 없으면 생성)
    pub async fn new(images_dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let images_dir = images_dir.into();
        fs::create_dir_all(&images_dir).await?;

        info!("이미지 저장소 초기화: {}", images_dir.display());

        Ok(Self {
            images_dir,
            write_count: AtomicU64::new(0),
        })
    }

    /// 이 저장소가 수행한 실제 디스크 쓰기 횟수
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ImageStore for ContentImageStore {
    async fn store(&self, bytes: &[u8]) -> Result<String, CoreError> {
        let file_name = image_file_name(bytes);
        let path = self.images_dir.join(&file_name);

        if fs::try_exists(&path).await? {
            debug!("이미지 이미 존재, 쓰기 생략: {file_name}");
            return Ok(file_name);
        }

        write_atomic(&path, bytes).await?;
        self.write_count.fetch_add(1, Ordering::Relaxed);

        debug!("이미지 저장: {file_name} ({}bytes)", bytes.len());
        Ok(file_name)
    }

    fn path_of(&self, file_name: &str) -> PathBuf {
        self.images_dir.join(file_name)
    }
}
