//! 테스트 파일 경로 정규화.
//!
//! 빌드 루트 기준 상대 경로로 바꾸고 구분자를 `/`로 통일한다.

use std::path::{Component, Path};
use visreg_core::error::CoreError;

/// `test_path`를 `root_dir` 기준 상대 경로 문자열로 변환
///
/// 상대 경로는 둘 다 현재 작업 디렉토리 기준으로 해석한다.
/// 루트 밖의 경로는 `..`로 표현한다.
pub fn normalize_test_path(root_dir: &Path, test_path: &Path) -> Result<String, CoreError> {
    let cwd = std::env::current_dir()?;
    let root_abs = cwd.join(root_dir);
    let target_abs = cwd.join(test_path);

    let root = lexical(&root_abs);
    let target = lexical(&target_abs);
    let common = root
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let relative: Vec<Component<'_>> = std::iter::repeat(Component::ParentDir)
        .take(root.len() - common)
        .chain(target[common..].iter().copied())
        .collect();

    let mut parts = Vec::with_capacity(relative.len());
    for component in relative {
        match component {
            Component::ParentDir => parts.push(".."),
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                CoreError::InvalidInput(format!(
                    "테스트 경로가 UTF-8이 아님: {}",
                    test_path.display()
                ))
            })?),
            _ => {}
        }
    }
    Ok(parts.join("/"))
}

/// `.` 제거, `a/..` 상쇄
fn lexical(path: &Path) -> Vec<Component<'_>> {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}
