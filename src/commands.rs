//! 命令调度模块：
//! - 接收解析好的 CLI 参数，按当前目录解析源/目标路径
//! - 调用生成流水线

use anyhow::{Context, Result};
use std::env;

use crate::{
    cli::Cli,
    pipeline::{self, Invocation},
};

/// 运行一次生成
pub fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir().context("获取当前目录失败")?;
    let invocation = Invocation {
        src: cli.src.map(|p| cwd.join(p)).unwrap_or_else(|| cwd.clone()),
        dest: cli.dest.map(|p| cwd.join(p)).unwrap_or_else(|| cwd.clone()),
        tool_dir: pipeline::tool_dir(&cwd),
        cwd,
    };
    tracing::debug!("调用参数: {:?}", invocation);

    let written = pipeline::run(&invocation)?;
    println!("✅ 已生成 {} 与 {}", written.module.display(), written.tests.display());
    Ok(())
}
