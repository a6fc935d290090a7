//! 스크린샷 비교기.
//!
//! 비교 1회 흐름:
//! 1. 현재 이미지를 콘텐츠 주소로 저장
//! 2. 테스트 경로 정규화
//! 3. 스크린샷 ID 계산
//! 4. 초기 레코드 생성 (imageA = imageB, 불일치 0)
//! 5. 마스터 갱신 모드 또는 마스터 없음 → 그대로 기록
//! 6. 마스터 이미지와 파일명이 같으면 비교 생략
//! 7. 캐시 키 계산 → 캐시 적중이면 재사용, 아니면 워커 호출 후 캐시 저장
//! 8. 레코드 기록
//!
//! 레코드는 모든 계산이 성공한 뒤에만 기록된다.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};
use visreg_core::error::CoreError;
use visreg_core::identity::{compute_cache_key, compute_screenshot_id};
use visreg_core::models::build::ScreenshotBuildData;
use visreg_core::models::emulate::EmulateConfig;
use visreg_core::models::pixelmatch::PixelMatchInput;
use visreg_core::models::screenshot::{CaptureInfo, Screenshot, ScreenshotDiff};
use visreg_core::ports::image_store::ImageStore;
use visreg_core::ports::pixel_matcher::PixelMatcher;
use visreg_core::ports::screenshot_writer::ScreenshotWriter;

use crate::test_path::normalize_test_path;

/// 비교 요청 (캡처 1건)
#[derive(Debug, Clone, Copy)]
pub struct CompareRequest<'a> {
    /// 캡처 시 에뮬레이션 설정
    pub emulate: &'a EmulateConfig,
    /// 현재 스크린샷 바이트
    pub image: &'a [u8],
    /// 테스트 설명 (ID의 일부)
    pub description: &'a str,
    /// 보고용 너비
    pub width: u32,
    /// 보고용 높이
    pub height: u32,
    /// 테스트 파일 경로
    pub test_path: Option<&'a Path>,
    /// pixelmatch 민감도
    pub pixelmatch_threshold: f64,
}

/// 스크린샷 비교기 (빌드 하나 동안 공유)
///
/// `&self`만 받으므로 `Arc`로 감싸 여러 태스크에서 동시에 비교할 수 있다.
pub struct ScreenshotComparator {
    /// 빌드 컨텍스트 (캐시는 공유 핸들)
    build: Arc<ScreenshotBuildData>,
    /// 콘텐츠 주소 이미지 저장소
    images: Arc<dyn ImageStore>,
    /// 레코드 작성기
    writer: Arc<dyn ScreenshotWriter>,
    /// 픽셀 비교기
    matcher: Arc<dyn PixelMatcher>,
}

impl ScreenshotComparator {
    pub fn new(
        build: Arc<ScreenshotBuildData>,
        images: Arc<dyn ImageStore>,
        writer: Arc<dyn ScreenshotWriter>,
        matcher: Arc<dyn PixelMatcher>,
    ) -> Self {
        info!(
            update_master = build.update_master,
            masters = build.master_screenshots.len(),
            cached = build.cache.len(),
            "스크린샷 비교기 초기화"
        );
        Self {
            build,
            images,
            writer,
            matcher,
        }
    }

    pub fn build(&self) -> &ScreenshotBuildData {
        &self.build
    }

    /// 스크린샷 1건 비교 후 결과 반환
    pub async fn compare_screenshot(
        &self,
        request: CompareRequest<'_>,
    ) -> Result<ScreenshotDiff, CoreError> {
        let build = &*self.build;

        let image_name = self.images.store(request.image).await?;

        let test_path = request
            .test_path
            .filter(|path| !path.as_os_str().is_empty())
            .map(|path| normalize_test_path(&build.root_dir, path))
            .transpose()?;

        let id = compute_screenshot_id(request.description, request.emulate)?;

        let mut screenshot = Screenshot::new_unchanged(
            CaptureInfo {
                id: &id,
                image: &image_name,
                desc: request.description,
                test_path: test_path.as_deref(),
                width: request.width,
                height: request.height,
            },
            request.emulate,
            build,
        );

        if build.update_master {
            debug!(id = %id, image = %image_name, "마스터 갱신 모드, 비교 생략");
            return self.persist(screenshot).await;
        }

        let Some(master_image) = build.master_image(&id) else {
            debug!(id = %id, image = %image_name, "마스터 스크린샷 없음, 비교 생략");
            return self.persist(screenshot).await;
        };

        screenshot.diff.image_a = master_image.to_string();

        if screenshot.diff.image_a == screenshot.diff.image_b {
            debug!(id = %id, "마스터와 동일한 이미지");
            return self.persist(screenshot).await;
        }

        let cache_key = compute_cache_key(
            &screenshot.diff.image_a,
            &screenshot.diff.image_b,
            request.pixelmatch_threshold,
        );

        screenshot.diff.mismatched_pixels = match build.cache.lookup(&cache_key) {
            Some(cached) => {
                debug!(id = %id, cache_key = %cache_key, cached, "캐시 적중");
                cached
            }
            None => {
                let count = self
                    .run_pixel_match(&screenshot.diff, &request)
                    .await?;
                build.cache.store(cache_key.clone(), count);
                count
            }
        };
        screenshot.diff.cache_key = Some(cache_key);

        self.persist(screenshot).await
    }

    async fn run_pixel_match(
        &self,
        diff: &ScreenshotDiff,
        request: &CompareRequest<'_>,
    ) -> Result<u64, CoreError> {
        // 뷰포트가 없으면 호출자가 준 크기를 실제 픽셀 크기로 본다
        let (width, height) = request
            .emulate
            .viewport
            .as_ref()
            .map(|viewport| viewport.natural_size())
            .unwrap_or((request.width, request.height));

        let input = PixelMatchInput {
            image_a_path: self.images.path_of(&diff.image_a),
            image_b_path: self.images.path_of(&diff.image_b),
            width,
            height,
            pixelmatch_threshold: request.pixelmatch_threshold,
        };

        let started = Instant::now();
        let count = self.matcher.mismatched_pixels(&input).await?;
        info!(
            id = %diff.id,
            image_a = %diff.image_a,
            image_b = %diff.image_b,
            mismatched_pixels = count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "픽셀 비교 완료"
        );
        Ok(count)
    }

    async fn persist(&self, screenshot: Screenshot) -> Result<ScreenshotDiff, CoreError> {
        self.writer
            .write_screenshot_data(&self.build.current_build_dir, &screenshot)
            .await?;
        Ok(screenshot.diff)
    }
}
