//! 内置模板：
//! - `icons.ts` 与 `icons.test.tsx` 两个 tera 模板随二进制一起打包
//! - 可用配置 `template_dir` 中的同名 `.tera` 文件覆盖

use std::{fs, path::Path};

use include_dir::{include_dir, Dir};
use tera::Tera;

use crate::error::Result;

static TEMPLATE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

pub const MODULE_TEMPLATE: &str = "icons.ts";
pub const TEST_TEMPLATE: &str = "icons.test.tsx";

/// 加载模板；覆盖目录中存在的文件优先
pub fn load_templates(override_dir: Option<&Path>) -> Result<Tera> {
    let mut tera = Tera::default();
    for name in [MODULE_TEMPLATE, TEST_TEMPLATE] {
        let file_name = format!("{name}.tera");
        let custom = override_dir
            .map(|dir| dir.join(&file_name))
            .filter(|p| p.is_file());
        match custom {
            Some(path) => {
                tracing::info!("使用自定义模板: {}", path.display());
                let body = fs::read_to_string(&path).map_err(|e| {
                    tera::Error::msg(format!("读取模板失败 {}: {}", path.display(), e))
                })?;
                tera.add_raw_template(name, &body)?;
            }
            None => {
                let body = TEMPLATE_DIR
                    .get_file(&file_name)
                    .and_then(|f| f.contents_utf8())
                    .ok_or_else(|| tera::Error::template_not_found(name))?;
                tera.add_raw_template(name, body)?;
            }
        }
    }
    Ok(tera)
}
