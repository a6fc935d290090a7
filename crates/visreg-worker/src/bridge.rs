//! 프로세스 기반 비교 워커 브리지.
//!
//! ## 실행 흐름
//! 1. 워커 실행 파일 spawn (stdin/stdout 파이프), 데드라인 시작
//! 2. 작업 메시지 한 줄 전송 후 stdin 닫기
//! 3. 응답 한 줄 수신 → 불일치 픽셀 수
//! 4. 성공/실패/타임아웃 모든 경로에서 워커 강제 종료 및 회수
//!
//! 송수신 전체가 하나의 future이고 데드라인과 경쟁하므로
//! 결과는 호출당 정확히 한 번만 확정된다.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, warn};
use visreg_core::config::WorkerConfig;
use visreg_core::error::CoreError;
use visreg_core::models::pixelmatch::PixelMatchInput;
use visreg_core::ports::pixel_matcher::PixelMatcher;

use crate::protocol::{decode_reply, encode_job};

/// 작업마다 워커 프로세스를 띄우는 `PixelMatcher`
#[derive(Debug, Clone)]
pub struct ProcessPixelMatcher {
    /// 워커 실행 파일 경로
    worker_path: PathBuf,
    /// 타임아웃, 추가 인자
    config: WorkerConfig,
}

impl ProcessPixelMatcher {
    pub fn new(worker_path: impl Into<PathBuf>, config: WorkerConfig) -> Self {
        Self {
            worker_path: worker_path.into(),
            config,
        }
    }

    fn spawn(&self) -> Result<Child, CoreError> {
        Command::new(&self.worker_path)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                CoreError::WorkerSpawn(format!("{}: {e}", self.worker_path.display()))
            })
    }
}

#[async_trait]
impl PixelMatcher for ProcessPixelMatcher {
    async fn mismatched_pixels(&self, input: &PixelMatchInput) -> Result<u64, CoreError> {
        let job = encode_job(input)?;
        let timeout = self.config.timeout();
        let started = Instant::now();
        let deadline = tokio::time::Instant::now() + timeout;

        let mut child = self.spawn()?;
        let pid = child.id();
        debug!(
            pid,
            worker = %self.worker_path.display(),
            timeout_ms = self.config.timeout_ms,
            "비교 워커 시작"
        );

        let outcome = tokio::time::timeout_at(deadline, exchange(&mut child, &job)).await;
        terminate(&mut child).await;

        match outcome {
            Ok(Ok(count)) => {
                debug!(
                    pid,
                    mismatched_pixels = count,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "비교 워커 완료"
                );
                Ok(count)
            }
            Ok(Err(e)) => {
                warn!(pid, "비교 워커 실패: {e}");
                Err(e)
            }
            Err(_elapsed) => {
                warn!(
                    pid,
                    timeout_ms = self.config.timeout_ms,
                    "비교 워커 타임아웃, 강제 종료"
                );
                Err(CoreError::WorkerTimeout {
                    timeout_ms: self.config.timeout_ms,
                })
            }
        }
    }
}

/// 작업 전송 후 응답 한 줄 수신
async fn exchange(child: &mut Child, job: &str) -> Result<u64, CoreError> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| CoreError::Worker("워커 stdin 파이프 없음".to_string()))?;
    stdin
        .write_all(job.as_bytes())
        .await
        .map_err(|e| CoreError::Worker(format!("작업 전송 실패: {e}")))?;
    stdin
        .flush()
        .await
        .map_err(|e| CoreError::Worker(format!("작업 전송 실패: {e}")))?;
    drop(stdin);

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| CoreError::Worker("워커 stdout 파이프 없음".to_string()))?;
    let mut reader = BufReader::new(stdout);
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .await
        .map_err(|e| CoreError::Worker(format!("응답 수신 실패: {e}")))?;

    if read == 0 {
        let status = child
            .wait()
            .await
            .map(|s| s.to_string())
            .unwrap_or_else(|e| format!("상태 확인 실패: {e}"));
        return Err(CoreError::Worker(format!(
            "워커가 응답 없이 종료됨 ({status})"
        )));
    }

    decode_reply(&line)
}

/// 워커 강제 종료 후 회수 (이미 종료된 경우 무시)
async fn terminate(child: &mut Child) {
    if let Ok(Some(_)) = child.try_wait() {
        return;
    }
    if let Err(e) = child.start_kill() {
        debug!("워커 종료 신호 실패 (이미 종료됨): {e}");
    }
    if let Err(e) = child.wait().await {
        warn!("워커 회수 실패: {e}");
    }
}
