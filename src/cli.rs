//! CLI 定义模块：仅负责命令行参数结构体与解析

use clap::Parser;
use std::path::PathBuf;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(
    name = "icongen",
    about = "把 SVG 图标目录转换为带类型的 React 组件模块与快照测试",
    version
)]
pub struct Cli {
    /// 源图标目录（相对当前目录，默认当前目录）
    #[arg(value_name = "SRC")]
    pub src: Option<PathBuf>,
    /// 输出目录（相对当前目录，默认当前目录；可被配置 out_dir 覆盖）
    #[arg(value_name = "DEST")]
    pub dest: Option<PathBuf>,
}
