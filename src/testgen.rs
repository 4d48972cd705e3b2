//! 测试生成：为每个导出的图标生成一条快照渲染测试

use tera::{Context as TContext, Tera};

use crate::{error::Result, templates::TEST_TEMPLATE};

/// 渲染 `icons.test.tsx`；标识符为空时输出空的 describe。
/// `attribution` 每行以 `//` 注释写在文件头部。
pub fn render_tests(tera: &Tera, identifiers: &[String], attribution: &[String]) -> Result<String> {
    let mut ctx = TContext::new();
    ctx.insert("identifiers", identifiers);
    ctx.insert("attribution", attribution);
    Ok(tera.render(TEST_TEMPLATE, &ctx)?)
}
