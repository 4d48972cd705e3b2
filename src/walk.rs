//! 目录遍历：深度优先递归列出文件，顺序即目录读取顺序

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{GenError, Result};

/// 递归列出多个根目录下的所有文件。
/// 非目录的根被静默跳过；不存在的根直接返回文件系统错误。
pub fn read_directories<P: AsRef<Path>>(roots: &[P]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();
    for root in roots {
        let root = root.as_ref();
        let meta = fs::symlink_metadata(root).map_err(|source| GenError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if meta.is_dir() {
            walk_dir(root, &mut results)?;
        }
    }
    Ok(results)
}

fn walk_dir(dir: &Path, results: &mut Vec<PathBuf>) -> Result<()> {
    let walk_err = |source| GenError::Walk {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(walk_err)? {
        let path = entry.map_err(walk_err)?.path();
        // 跟随符号链接判断类型
        let meta = fs::metadata(&path).map_err(|source| GenError::Walk {
            path: path.clone(),
            source,
        })?;
        if meta.is_dir() {
            walk_dir(&path, results)?;
        } else {
            results.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn walks_nested_directories() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("top.svg"), "").unwrap();
        fs::write(nested.join("deep.svg"), "").unwrap();

        let mut files = read_directories(&[tmp.path()]).unwrap();
        files.sort();
        let mut expected = vec![nested.join("deep.svg"), tmp.path().join("top.svg")];
        expected.sort();
        assert_eq!(files, expected);
    }

    #[test]
    fn skips_file_roots_and_concatenates_roots_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("one.svg"), "").unwrap();
        fs::write(second.path().join("two.svg"), "").unwrap();
        let plain_file = first.path().join("one.svg");

        let files = read_directories(&[
            plain_file.as_path(),
            first.path(),
            second.path(),
        ])
        .unwrap();
        assert_eq!(
            files,
            vec![first.path().join("one.svg"), second.path().join("two.svg")]
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_directories(&[tmp.path().join("missing")]).unwrap_err();
        assert!(matches!(err, GenError::Walk { .. }));
    }
}
