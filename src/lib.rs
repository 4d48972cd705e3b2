//! icongen：SVG 图标目录 -> 带类型的 React 组件模块 + 快照测试模块

pub mod bundle;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod lexer;
pub mod logging;
pub mod naming;
pub mod pipeline;
pub mod select;
pub mod svg;
pub mod templates;
pub mod testgen;
pub mod transform;
pub mod walk;
pub mod writer;

pub use error::{GenError, Result};
