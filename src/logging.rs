//! 日志初始化：stderr 输出，级别由 `ICONGEN_LOG` 控制（默认 info）

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ICONGEN_LOG";

/// 初始化全局日志；重复初始化时静默忽略
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
