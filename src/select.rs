//! 图标筛选：
//! - 主目录遍历结果 + 二级搜索（路径匹配正则且文件名在白名单中）
//! - 只保留 `.svg`，派生显示名并读取内容
//! - 名称冲突与非法标识符直接报错

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use regex::Regex;

use crate::{
    error::{GenError, Result},
    naming::{display_name, is_valid_identifier},
    walk::read_directories,
};

pub const ICON_EXTENSION: &str = ".svg";

/// 单个图标：显示名 + 源文件 + 原始标记
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

/// 二级搜索参数
#[derive(Debug, Clone)]
pub struct SecondarySearch {
    pub root: PathBuf,
    pub test_regex: Regex,
    pub allow_list: Vec<String>,
}

/// 在二级根目录中查找：完整路径匹配正则，且文件名在白名单内
pub fn secondary_discovery(search: &SecondarySearch) -> Result<Vec<PathBuf>> {
    let files = read_directories(&[&search.root])?;
    Ok(files
        .into_iter()
        .filter(|file| {
            let base = file
                .file_name()
                .map(|s| s.to_string_lossy())
                .unwrap_or_default();
            search.test_regex.is_match(&file.to_string_lossy())
                && search.allow_list.iter().any(|allowed| *allowed == base)
        })
        .collect())
}

/// 遍历主目录并追加二级搜索结果（顺序：主目录在前）
pub fn discover_files(
    icon_directories: &[PathBuf],
    secondary: Option<&SecondarySearch>,
) -> Result<Vec<PathBuf>> {
    let mut files = read_directories(icon_directories)?;
    if let Some(search) = secondary {
        let extra = secondary_discovery(search)?;
        tracing::debug!("二级搜索命中 {} 个文件: {}", extra.len(), search.root.display());
        files.extend(extra);
    }
    Ok(files)
}

/// 过滤 svg、派生名称、检查冲突并读取内容
pub fn load_icons(files: &[PathBuf], clean_pattern: Option<&Regex>) -> Result<Vec<Icon>> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    let mut icons = Vec::new();
    for file in files.iter().filter(|f| is_icon_file(f)) {
        let name = display_name(file, clean_pattern);
        if !is_valid_identifier(&name) {
            return Err(GenError::InvalidIdentifier {
                name,
                path: file.clone(),
            });
        }
        if let Some(first) = seen.get(&name) {
            return Err(GenError::DuplicateIcon {
                name,
                first: first.to_path_buf(),
                second: file.clone(),
            });
        }
        seen.insert(name.clone(), file);
        let content = fs::read_to_string(file).map_err(|source| GenError::ReadIcon {
            path: file.clone(),
            source,
        })?;
        icons.push(Icon {
            name,
            path: file.clone(),
            content,
        });
    }
    Ok(icons)
}

fn is_icon_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with(ICON_EXTENSION)
}
