//! 写出生成结果：`icons.ts` 与 `icons.test.tsx`，已存在则直接覆盖

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{GenError, Result};

pub const MODULE_FILE: &str = "icons.ts";
pub const TEST_FILE: &str = "icons.test.tsx";

/// 写出的两个文件路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub module: PathBuf,
    pub tests: PathBuf,
}

pub fn write_outputs(out_dir: &Path, module: &str, tests: &str) -> Result<Written> {
    let written = Written {
        module: out_dir.join(MODULE_FILE),
        tests: out_dir.join(TEST_FILE),
    };
    write_file(&written.module, module)?;
    write_file(&written.tests, tests)?;
    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content.as_bytes()).map_err(|source| GenError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("写入: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn overwrites_existing_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MODULE_FILE), "old").unwrap();
        let written = write_outputs(tmp.path(), "new module", "new tests").unwrap();
        assert_eq!(fs::read_to_string(&written.module).unwrap(), "new module");
        assert_eq!(fs::read_to_string(&written.tests).unwrap(), "new tests");
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let tmp = TempDir::new().unwrap();
        let err = write_outputs(&tmp.path().join("nope"), "", "").unwrap_err();
        assert!(matches!(err, GenError::Write { .. }));
    }
}
