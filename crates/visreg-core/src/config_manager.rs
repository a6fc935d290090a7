//! 설정 파일 관리.
//!
//! JSON 설정 파일 하나를 읽는다. 파일이 없으면 기본값으로 만들어 둔다.

use crate::config::VisregConfig;
use crate::error::CoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 검증된 설정과 그 출처 파일
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: VisregConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    /// `config_path`에서 설정 로드 (없으면 기본 설정 파일 생성)
    pub fn with_path(config_path: PathBuf) -> Result<Self, CoreError> {
        let config = match fs::read_to_string(&config_path) {
            Ok(content) => {
                let config: VisregConfig = serde_json::from_str(&content)
                    .map_err(|e| config_error("파싱", &config_path, e))?;
                debug!("설정 로드: {}", config_path.display());
                config
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let config = VisregConfig::default();
                write_default(&config_path, &config)?;
                info!("기본 설정 파일 생성: {}", config_path.display());
                config
            }
            Err(e) => return Err(config_error("읽기", &config_path, e)),
        };

        config.validate()?;

        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn get(&self) -> &VisregConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

fn write_default(path: &Path, config: &VisregConfig) -> Result<(), CoreError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| config_error("디렉토리 생성", dir, e))?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content).map_err(|e| config_error("저장", path, e))
}

fn config_error(action: &str, path: &Path, err: impl std::fmt::Display) -> CoreError {
    CoreError::Config(format!("설정 파일 {action} 실패: {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_default_config_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("visreg.json");

        let manager = ConfigManager::with_path(path.clone()).unwrap();
        assert!(path.exists());
        assert_eq!(manager.get().worker.timeout_ms, 2_500);
        assert_eq!(manager.config_path(), path.as_path());
    }

    #[test]
    fn loads_existing_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("visreg.json");
        fs::write(
            &path,
            r#"{"worker": {"timeout_ms": 800, "args": ["--fast"]}, "compare": {"pixelmatch_threshold": 0.2}}"#,
        )
        .unwrap();

        let manager = ConfigManager::with_path(path).unwrap();
        assert_eq!(manager.get().worker.timeout_ms, 800);
        assert_eq!(manager.get().worker.args, vec!["--fast".to_string()]);
        assert!((manager.get().compare.pixelmatch_threshold - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_json_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("visreg.json");
        fs::write(&path, "not json").unwrap();

        let result = ConfigManager::with_path(path);
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
