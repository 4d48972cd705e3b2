//! 名称派生：
//! - `clean_name`：取文件名并删除配置中的清理片段
//! - `title_case`：去扩展名，按 `_` 切分并首字母大写

use std::path::Path;

use regex::Regex;

/// 取路径的文件名部分，删除所有匹配 `pattern` 的片段。
pub fn clean_name(path: &Path, pattern: Option<&Regex>) -> String {
    let base = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match pattern {
        Some(rx) => rx.replace_all(&base, "").into_owned(),
        None => base,
    }
}

/// `icon_home.svg` -> `IconHome`；空片段被忽略。
pub fn title_case(name: &str) -> String {
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    stem.split('_')
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let mut chars = seg.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// 文件路径 -> 组件显示名
pub fn display_name(path: &Path, pattern: Option<&Regex>) -> String {
    title_case(&clean_name(path, pattern))
}

/// 是否为可导出、且能被测试生成器识别的标识符
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}
