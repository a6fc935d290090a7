//! 워커 실패 경로 통합 테스트.
#![cfg(unix)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;
use visreg_compare::{CompareRequest, ScreenshotComparator};
use visreg_core::config::WorkerConfig;
use visreg_core::error::CoreError;
use visreg_core::models::build::ScreenshotBuildData;
use visreg_core::models::emulate::{EmulateConfig, Viewport};
use visreg_storage::image_store::ContentImageStore;
use visreg_storage::screenshot_fs::JsonScreenshotWriter;
use visreg_worker::ProcessPixelMatcher;

const MASTER_IMAGE: &[u8] = b"master";
const CURRENT_IMAGE: &[u8] = b"current";

fn emulate() -> EmulateConfig {
    EmulateConfig {
        user_agent: "ua".to_string(),
        viewport: Some(Viewport {
            width: 320,
            height: 480,
            device_scale_factor: 2.0,
            has_touch: true,
            is_landscape: false,
            is_mobile: true,
        }),
        ..Default::default()
    }
}

/// 마스터가 등록된 빌드 컨텍스트 구성 (마스터 이미지 파일도 기록)
async fn comparator_with_master(
    root: &Path,
    worker: WorkerConfig,
) -> (ScreenshotComparator, Arc<ScreenshotBuildData>, String) {
    let emulate = emulate();
    let seed = Arc::new(ScreenshotBuildData {
        images_dir: root.join("images"),
        current_build_dir: root.join("seed"),
        ..Default::default()
    });
    let seed_images = Arc::new(ContentImageStore::new(&seed.images_dir).await.unwrap());
    let seeded = ScreenshotComparator::new(
        seed,
        seed_images,
        Arc::new(JsonScreenshotWriter::new()),
        Arc::new(ProcessPixelMatcher::new("/bin/sh", worker.clone())),
    )
    .compare_screenshot(request(&emulate, MASTER_IMAGE))
    .await
    .unwrap();

    let build = Arc::new(ScreenshotBuildData {
        images_dir: root.join("images"),
        current_build_dir: root.join("build"),
        master_screenshots: HashMap::from([(seeded.id.clone(), seeded.image_b)]),
        ..Default::default()
    });
    let images = Arc::new(ContentImageStore::new(&build.images_dir).await.unwrap());
    let cmp = ScreenshotComparator::new(
        build.clone(),
        images,
        Arc::new(JsonScreenshotWriter::new()),
        Arc::new(ProcessPixelMatcher::new("/bin/sh", worker)),
    );
    (cmp, build, seeded.id)
}

fn request<'a>(emulate: &'a EmulateConfig, image: &'a [u8]) -> CompareRequest<'a> {
    CompareRequest {
        emulate,
        image,
        description: "login form",
        width: 320,
        height: 480,
        test_path: None,
        pixelmatch_threshold: 0.1,
    }
}

fn sh(script: &str, timeout_ms: u64) -> WorkerConfig {
    WorkerConfig {
        timeout_ms,
        args: vec!["-c".to_string(), script.to_string()],
    }
}

#[tokio::test]
async fn hung_worker_times_out_without_record() {
    let dir = TempDir::new().unwrap();
    let (cmp, build, id) = comparator_with_master(dir.path(), sh("exec sleep 30", 300)).await;
    let emulate = emulate();

    let started = Instant::now();
    let err = cmp
        .compare_screenshot(request(&emulate, CURRENT_IMAGE))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::WorkerTimeout { timeout_ms: 300 }));
    assert!(started.elapsed().as_millis() < 5_000);
    assert!(build.cache.is_empty());
    assert!(!JsonScreenshotWriter::record_path(&build.current_build_dir, &id).exists());
}

#[tokio::test]
async fn worker_reply_garbage_is_error() {
    let dir = TempDir::new().unwrap();
    let (cmp, build, _) =
        comparator_with_master(dir.path(), sh("cat > /dev/null; echo not-a-number", 5_000)).await;
    let emulate = emulate();

    let err = cmp
        .compare_screenshot(request(&emulate, CURRENT_IMAGE))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Worker(_)));
    assert!(build.cache.is_empty());
}

#[tokio::test]
async fn missing_worker_executable_is_spawn_error() {
    let dir = TempDir::new().unwrap();
    let (_, build, _) = comparator_with_master(dir.path(), sh("echo 1", 5_000)).await;
    let images = Arc::new(ContentImageStore::new(&build.images_dir).await.unwrap());
    let cmp = ScreenshotComparator::new(
        build.clone(),
        images,
        Arc::new(JsonScreenshotWriter::new()),
        Arc::new(ProcessPixelMatcher::new(
            dir.path().join("no-such-worker"),
            WorkerConfig::default(),
        )),
    );
    let emulate = emulate();

    let err = cmp
        .compare_screenshot(request(&emulate, CURRENT_IMAGE))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::WorkerSpawn(_)));
}
