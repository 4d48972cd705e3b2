//! 错误类型：
//! - `GenError` 覆盖整条生成流水线的致命错误
//! - 转换器 / 改写 / 格式化各自的错误由其模块定义，这里统一包装

use std::{io, path::PathBuf};
use thiserror::Error;

use crate::{format::FormatError, svg::ConvertError, transform::ShapeError};

#[derive(Debug, Error)]
pub enum GenError {
    #[error("源目录不存在: {}", .0.display())]
    MissingSourceDir(PathBuf),

    #[error("目标目录不存在: {}", .0.display())]
    MissingOutputDir(PathBuf),

    #[error("遍历目录失败: {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("读取图标失败: {}", path.display())]
    ReadIcon {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("配置项 {field} 不是合法的正则表达式")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("图标 {} 派生出的名称 `{name}` 不是合法标识符", path.display())]
    InvalidIdentifier { name: String, path: PathBuf },

    #[error("图标名称冲突 `{name}`: {} 与 {}", first.display(), second.display())]
    DuplicateIcon {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("转换图标 {name} 失败")]
    Convert {
        name: String,
        #[source]
        source: ConvertError,
    },

    #[error("改写图标 {name} 失败")]
    Shape {
        name: String,
        #[source]
        source: ShapeError,
    },

    #[error("读取格式化配置失败: {}", path.display())]
    ReadFormatConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("解析格式化配置失败: {}", path.display())]
    FormatConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("格式化生成代码失败")]
    Format(#[from] FormatError),

    #[error("渲染模板失败")]
    Template(#[from] tera::Error),

    #[error("写出文件失败: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = GenError> = std::result::Result<T, E>;
