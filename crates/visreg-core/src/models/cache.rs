//! 비교 결과 캐시.
//!
//! (imageA, imageB, 임계값) 캐시 키 → 불일치 픽셀 수.
//! 빌드 하나의 수명 동안만 유지되며 제거 정책은 없다.
//! `Clone`은 같은 저장소를 공유하는 핸들을 만든다.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// 스레드 안전한 캐시 키 → 불일치 픽셀 수 맵
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "HashMap<String, u64>", into = "HashMap<String, u64>")]
pub struct DiffCache {
    entries: Arc<RwLock<HashMap<String, u64>>>,
}

impl DiffCache {
    /// 빈 캐시 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 캐시 조회
    pub fn lookup(&self, key: &str) -> Option<u64> {
        self.entries.read().get(key).copied()
    }

    /// 캐시 저장 (같은 키는 덮어씀)
    pub fn store(&self, key: impl Into<String>, mismatched_pixels: u64) {
        self.entries.write().insert(key.into(), mismatched_pixels);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// 현재 내용 복제본
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.entries.read().clone()
    }
}

impl From<HashMap<String, u64>> for DiffCache {
    fn from(entries: HashMap<String, u64>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }
}

impl From<DiffCache> for HashMap<String, u64> {
    fn from(cache: DiffCache) -> Self {
        cache.snapshot()
    }
}
