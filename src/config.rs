//! 配置与加载模块：
//! - 定义 `IconGenConfig`（搜索根目录、名称清理规则、输出目录等）
//! - 依次尝试 工作目录 / 工具目录 下的 `icongen.config.yaml`，都失败时回退默认值
//! - 加载格式化风格配置 `icongen.format.yaml`
//! - 暴露配置来源信息，便于日志打印

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::{GenError, Result},
    format::FormatOptions,
};

/// 配置文件候选名（按顺序查找）
pub const CONFIG_FILE_NAMES: [&str; 2] = ["icongen.config.yaml", "icongen.config.yml"];

/// 格式化风格配置的固定文件名（位于工具目录）
pub const FORMAT_CONFIG_FILE_NAME: &str = "icongen.format.yaml";

#[derive(Debug, Default, Clone, Deserialize)]
pub struct IconGenConfig {
    /// 二级搜索根目录（相对工作目录）
    #[serde(default, alias = "rootDir")]
    pub root_dir: Option<String>,
    /// 二级搜索的文件名白名单
    #[serde(default)]
    pub search: Vec<String>,
    /// 二级搜索时路径需匹配的正则（忽略大小写）
    #[serde(default, alias = "testRegex")]
    pub test_regex: Option<String>,
    /// 从文件名中删除的片段（正则，忽略大小写）
    #[serde(default, alias = "cleanNameRegex")]
    pub clean_name_regex: Option<String>,
    /// 主图标目录，单个路径或列表；缺省为命令行给出的源目录
    #[serde(default, alias = "iconDirectories")]
    pub icon_directories: Option<OneOrMany>,
    /// 输出目录；缺省为命令行给出的目标目录
    #[serde(default, alias = "outDir")]
    pub out_dir: Option<String>,
    /// 转换器选项
    #[serde(default)]
    pub convert: ConvertSettings,
    /// 可选：模板覆盖目录
    #[serde(default, alias = "templateDir")]
    pub template_dir: Option<String>,
    /// 写入测试文件头部的版权/来源说明，单行或多行
    #[serde(default)]
    pub attribution: Option<OneOrMany>,
}

/// 单个值或列表
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// 转换器选项；默认值即：不加 class/id 前缀、不重命名属性、不过滤元素
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConvertSettings {
    #[serde(default, alias = "classIdPrefix")]
    pub class_id_prefix: Option<String>,
    #[serde(default, alias = "propsMap")]
    pub props_map: BTreeMap<String, String>,
    #[serde(default)]
    pub filters: Vec<String>,
}

/// 配置来源（用于打印和调试）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    WorkingDir(PathBuf),
    ToolDir(PathBuf),
    Defaults,
}

/// 人类可读的来源描述
pub fn describe_source(src: &ConfigSource) -> String {
    match src {
        ConfigSource::WorkingDir(p) => format!("工作目录: {}", p.display()),
        ConfigSource::ToolDir(p) => format!("工具目录: {}", p.display()),
        ConfigSource::Defaults => "默认配置（未找到 icongen.config.yaml）".to_string(),
    }
}

/// 依次尝试工作目录与工具目录；任何失败都视为该来源不存在
pub fn load_icongen_config(cwd: &Path, tool_dir: &Path) -> (IconGenConfig, ConfigSource) {
    if let Some((cfg, path)) = try_load_from(cwd) {
        return (cfg, ConfigSource::WorkingDir(path));
    }
    if let Some((cfg, path)) = try_load_from(tool_dir) {
        return (cfg, ConfigSource::ToolDir(path));
    }
    (IconGenConfig::default(), ConfigSource::Defaults)
}

/// 按候选名依次尝试；某个文件读取或解析失败时继续尝试下一个
fn try_load_from(dir: &Path) -> Option<(IconGenConfig, PathBuf)> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .filter(|p| p.is_file())
        .find_map(|path| load_file(&path).map(|cfg| (cfg, path)))
}

fn load_file(path: &Path) -> Option<IconGenConfig> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("⚠️ 读取配置失败，忽略: {} ({})", path.display(), e);
            return None;
        }
    };
    // 空文件等同于空配置
    if raw.trim().is_empty() {
        return Some(IconGenConfig::default());
    }
    match serde_yaml::from_str::<IconGenConfig>(&raw) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!("⚠️ 解析配置失败，忽略: {} ({})", path.display(), e);
            None
        }
    }
}

/// 加载格式化风格；文件不存在时使用默认值，存在但无法解析则报错
pub fn load_format_options(tool_dir: &Path) -> Result<FormatOptions> {
    let path = tool_dir.join(FORMAT_CONFIG_FILE_NAME);
    if !path.is_file() {
        tracing::debug!("未找到 {}，使用默认格式化风格", path.display());
        return Ok(FormatOptions::default());
    }
    let raw = fs::read_to_string(&path).map_err(|source| GenError::ReadFormatConfig {
        path: path.clone(),
        source,
    })?;
    if raw.trim().is_empty() {
        return Ok(FormatOptions::default());
    }
    serde_yaml::from_str(&raw).map_err(|source| GenError::FormatConfig { path, source })
}
