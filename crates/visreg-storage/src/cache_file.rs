//! 비교 캐시 파일.
//!
//! 캐시 키 → 불일치 픽셀 수 맵을 JSON으로 저장/로드한다.
//! 실행 사이에 캐시를 이어 쓰려는 호출자를 위한 것이다.

use std::path::Path;
use tokio::fs;
use tracing::debug;
use visreg_core::error::CoreError;
use visreg_core::models::cache::DiffCache;

use crate::atomic::write_atomic;

/// 캐시 파일 로드 (없으면 빈 캐시)
pub async fn load_cache(path: &Path) -> Result<DiffCache, CoreError> {
    if !fs::try_exists(path).await? {
        return Ok(DiffCache::new());
    }
    let content = fs::read(path).await?;
    let cache: DiffCache = serde_json::from_slice(&content)?;
    debug!("캐시 로드: {} ({}개)", path.display(), cache.len());
    Ok(cache)
}

/// 캐시 파일 저장 (원자적)
pub async fn save_cache(path: &Path, cache: &DiffCache) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let content = serde_json::to_vec_pretty(cache)?;
    write_atomic(path, &content).await?;
    debug!("캐시 저장: {} ({}개)", path.display(), cache.len());
    Ok(())
}
