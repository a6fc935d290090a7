//! # visreg-app
//!
//! visreg 바이너리 진입점.
//! 설정과 빌드 컨텍스트를 로드하고 어댑터를 와이어링한 뒤
//! 스크린샷 1건을 비교하여 결과를 stdout에 JSON으로 출력한다.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use visreg_compare::{CompareRequest, ScreenshotComparator};
use visreg_core::config::VisregConfig;
use visreg_core::config_manager::ConfigManager;
use visreg_core::models::build::ScreenshotBuildData;
use visreg_core::models::emulate::EmulateConfig;
use visreg_storage::cache_file::{load_cache, save_cache};
use visreg_storage::image_store::ContentImageStore;
use visreg_storage::screenshot_fs::{load_master_screenshots, JsonScreenshotWriter};
use visreg_worker::ProcessPixelMatcher;

/// 시각 회귀 스크린샷 비교
#[derive(Parser, Debug)]
#[command(name = "visreg")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 (JSON, 없으면 기본값으로 생성)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 빌드 컨텍스트 파일 (ScreenshotBuildData JSON)
    #[arg(long)]
    build_data: PathBuf,

    /// 현재 스크린샷 이미지 파일
    #[arg(long)]
    image: PathBuf,

    /// 테스트 설명 (스크린샷 ID의 일부)
    #[arg(long)]
    desc: String,

    /// 에뮬레이션 설정 파일 (EmulateConfig JSON)
    #[arg(long)]
    emulate: Option<PathBuf>,

    /// 보고용 너비 (기본: 뷰포트 너비)
    #[arg(long)]
    width: Option<u32>,

    /// 보고용 높이 (기본: 뷰포트 높이)
    #[arg(long)]
    height: Option<u32>,

    /// 테스트 파일 경로
    #[arg(long)]
    test_path: Option<PathBuf>,

    /// pixelmatch 임계값 (기본: 설정값)
    #[arg(long)]
    threshold: Option<f64>,

    /// 마스터 빌드 디렉토리 (레코드에서 마스터 목록을 읽어 병합)
    #[arg(long)]
    master_dir: Option<PathBuf>,

    /// 비교 캐시 파일 (실행 전 로드, 실행 후 저장)
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// 마스터 갱신 모드 강제
    #[arg(long)]
    update_master: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

fn load_config(path: Option<&Path>) -> Result<VisregConfig> {
    match path {
        Some(path) => Ok(ConfigManager::with_path(path.to_path_buf())?.get().clone()),
        None => {
            let config = VisregConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("파일 읽기 실패: {}", path.display()))?;
    serde_json::from_slice(&content).with_context(|| format!("JSON 파싱 실패: {}", path.display()))
}

async fn load_build_data(args: &Args) -> Result<ScreenshotBuildData> {
    let mut build: ScreenshotBuildData = read_json(&args.build_data).await?;

    if let Some(master_dir) = &args.master_dir {
        let masters = load_master_screenshots(master_dir).await?;
        for (id, image) in masters {
            build.master_screenshots.entry(id).or_insert(image);
        }
    }

    if let Some(cache_file) = &args.cache_file {
        let cached = load_cache(cache_file).await?;
        for (key, count) in cached.snapshot() {
            if build.cache.lookup(&key).is_none() {
                build.cache.store(key, count);
            }
        }
    }

    build.update_master |= args.update_master;
    Ok(build)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout은 결과 JSON 전용
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = load_config(args.config.as_deref())?;
    let build = Arc::new(load_build_data(&args).await?);

    let emulate: EmulateConfig = match &args.emulate {
        Some(path) => read_json(path).await?,
        None => EmulateConfig::default(),
    };

    let viewport_size = emulate.viewport.as_ref().map(|v| (v.width, v.height));
    let width = args
        .width
        .or(viewport_size.map(|(w, _)| w))
        .ok_or_else(|| anyhow!("--width 또는 뷰포트가 필요합니다"))?;
    let height = args
        .height
        .or(viewport_size.map(|(_, h)| h))
        .ok_or_else(|| anyhow!("--height 또는 뷰포트가 필요합니다"))?;

    let threshold = args
        .threshold
        .unwrap_or(config.compare.pixelmatch_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(anyhow!("--threshold는 0~1 범위여야 합니다: {threshold}"));
    }

    let image = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("이미지 읽기 실패: {}", args.image.display()))?;

    let images = Arc::new(ContentImageStore::new(&build.images_dir).await?);
    let writer = Arc::new(JsonScreenshotWriter::new());
    let matcher = Arc::new(ProcessPixelMatcher::new(
        &build.pixelmatch_module_path,
        config.worker.clone(),
    ));
    let comparator = ScreenshotComparator::new(build.clone(), images, writer, matcher);

    let diff = comparator
        .compare_screenshot(CompareRequest {
            emulate: &emulate,
            image: &image,
            description: &args.desc,
            width,
            height,
            test_path: args.test_path.as_deref(),
            pixelmatch_threshold: threshold,
        })
        .await?;

    if let Some(cache_file) = &args.cache_file {
        if let Err(e) = save_cache(cache_file, &build.cache).await {
            warn!("캐시 파일 저장 실패: {e}");
        }
    }

    info!(
        id = %diff.id,
        mismatched_pixels = diff.mismatched_pixels,
        "비교 완료"
    );
    println!("{}", serde_json::to_string_pretty(&diff)?);
    Ok(())
}
