//! 生成流水线：
//! 源目录检查 -> 读取配置 -> 输出目录检查 -> 发现图标 -> 并发转换 -> 聚合格式化 -> 生成测试 -> 写出
//! 任一步失败都不会写出任何文件。

use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};

use crate::{
    bundle::build_bundle,
    config::{self, ConvertSettings, IconGenConfig, OneOrMany},
    error::{GenError, Result},
    select::{discover_files, load_icons, SecondarySearch},
    templates::load_templates,
    testgen::render_tests,
    writer::{write_outputs, Written},
};

/// 一次调用的输入：工作目录、工具目录、命令行给出的源/目标目录（已解析为绝对路径）
#[derive(Debug, Clone)]
pub struct Invocation {
    pub cwd: PathBuf,
    pub tool_dir: PathBuf,
    pub src: PathBuf,
    pub dest: PathBuf,
}

/// 配置与调用参数合并后的有效设置
#[derive(Debug, Clone)]
pub struct Settings {
    pub icon_directories: Vec<PathBuf>,
    pub secondary: Option<SecondarySearch>,
    pub clean_pattern: Option<Regex>,
    pub out_dir: PathBuf,
    pub convert: ConvertSettings,
    pub template_dir: Option<PathBuf>,
    pub attribution: Vec<String>,
}

impl Settings {
    pub fn resolve(cfg: IconGenConfig, inv: &Invocation) -> Result<Self> {
        let clean_pattern = cfg
            .clean_name_regex
            .as_deref()
            .map(|p| compile("clean_name_regex", p))
            .transpose()?;

        // 未配置 root_dir 时不做二级搜索
        let secondary = match cfg.root_dir.as_deref() {
            Some(root) if !root.is_empty() => Some(SecondarySearch {
                root: inv.cwd.join(root),
                test_regex: compile("test_regex", cfg.test_regex.as_deref().unwrap_or(""))?,
                allow_list: cfg.search,
            }),
            _ => None,
        };

        let icon_directories = match cfg.icon_directories {
            Some(dirs) => dirs.into_vec().iter().map(|d| inv.cwd.join(d)).collect(),
            None => vec![inv.src.clone()],
        };
        let out_dir = cfg
            .out_dir
            .map(|d| inv.cwd.join(d))
            .unwrap_or_else(|| inv.dest.clone());

        Ok(Self {
            icon_directories,
            secondary,
            clean_pattern,
            out_dir,
            convert: cfg.convert,
            template_dir: cfg.template_dir.map(|d| inv.cwd.join(d)),
            attribution: cfg.attribution.map(OneOrMany::into_vec).unwrap_or_default(),
        })
    }
}

fn compile(field: &'static str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| GenError::InvalidPattern { field, source })
}

/// 执行一次完整生成
pub fn run(inv: &Invocation) -> Result<Written> {
    if !inv.src.exists() {
        return Err(GenError::MissingSourceDir(inv.src.clone()));
    }

    let (cfg, source) = config::load_icongen_config(&inv.cwd, &inv.tool_dir);
    tracing::info!("ℹ️ 本次使用的配置来源: {}", config::describe_source(&source));
    let settings = Settings::resolve(cfg, inv)?;

    if !settings.out_dir.exists() {
        return Err(GenError::MissingOutputDir(settings.out_dir));
    }

    let files = discover_files(&settings.icon_directories, settings.secondary.as_ref())?;
    let icons = load_icons(&files, settings.clean_pattern.as_ref())?;
    tracing::info!("🔍 发现 {} 个图标（共遍历 {} 个文件）", icons.len(), files.len());

    let style = config::load_format_options(&inv.tool_dir)?;
    let tera = load_templates(settings.template_dir.as_deref())?;
    let bundle = build_bundle(&tera, &icons, &settings.convert, &style)?;
    let tests = render_tests(&tera, &bundle.identifiers, &settings.attribution)?;

    let written = write_outputs(&settings.out_dir, &bundle.source, &tests)?;
    tracing::info!("✅ 生成完成 -> {}", settings.out_dir.display());
    Ok(written)
}

/// 可执行文件所在目录；取不到时退回工作目录
pub fn tool_dir(cwd: &Path) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| cwd.to_path_buf())
}
