//! 组件改写：把转换器输出的函数声明改写为带类型的导出常量，
//! 补上 displayName 赋值，并丢弃 require / module.exports 样板代码。

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::lexer::{matching_brace, split_statements, LexError};

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("转换结果中没有 `function <Name> (props)` 声明")]
    MissingFunction,
    #[error("函数 {0} 的函数体未闭合")]
    UnclosedFunction(String),
    #[error("函数名 {found} 与期望的组件名 {expected} 不一致")]
    NameMismatch { expected: String, found: String },
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// 改写后的单个组件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedComponent {
    pub name: String,
    pub source: String,
}

fn function_decl() -> &'static Regex {
    static RX: OnceLock<Regex> = OnceLock::new();
    RX.get_or_init(|| {
        Regex::new(r"function\s+([A-Za-z0-9_$]+)\s*\(props\)\s*\{")
            .expect("function declaration pattern is valid")
    })
}

/// 改写一段组件源码；`expected` 为期望的组件名
pub fn rewrite_component(source: &str, expected: &str) -> Result<GeneratedComponent, ShapeError> {
    let caps = function_decl()
        .captures(source)
        .ok_or(ShapeError::MissingFunction)?;
    let (whole, name) = match (caps.get(0), caps.get(1)) {
        (Some(whole), Some(name)) => (whole, name.as_str().to_string()),
        _ => return Err(ShapeError::MissingFunction),
    };
    if name != expected {
        return Err(ShapeError::NameMismatch {
            expected: expected.to_string(),
            found: name,
        });
    }

    let open = whole.end() - 1;
    let close = matching_brace(source, open)?
        .ok_or_else(|| ShapeError::UnclosedFunction(name.clone()))?;
    let body = source[open + 1..close].trim_matches('\n');

    let mut out = String::new();
    out.push_str(&format!(
        "export const {name} = <SvgIconConstructor>function(props: SvgIconProps) {{\n"
    ));
    if !body.trim().is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    out.push_str("};\n");
    out.push_str(&format!("{name}.displayName = '{name}';\n"));

    // 保留函数之后的 `<Name>.<prop> = ...;` 语句（displayName / default 除外）
    let prefix = format!("{name}.");
    for stmt in split_statements(&source[close + 1..])? {
        let Some(rest) = stmt.strip_prefix(&prefix) else {
            continue;
        };
        let prop = rest
            .split(|c: char| c == '=' || c.is_whitespace())
            .next()
            .unwrap_or("");
        if matches!(prop, "displayName" | "default") {
            continue;
        }
        out.push_str(stmt);
        out.push('\n');
    }

    Ok(GeneratedComponent {
        name,
        source: out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::{svg_to_component, ConvertOptions};

    #[test]
    fn rewrites_converter_output() {
        let converted = svg_to_component(
            r#"<svg width="24" height="24" viewBox="0 0 24 24"><path d="M0 0"/></svg>"#,
            &ConvertOptions {
                display_name: "Home".into(),
                ..Default::default()
            },
        )
        .unwrap();
        let component = rewrite_component(&converted, "Home").unwrap();
        assert_eq!(component.name, "Home");
        let expected = r#"export const Home = <SvgIconConstructor>function(props: SvgIconProps) {
    return React.createElement("svg", props, [
        React.createElement("path", { d: "M0 0", key: 0 })
    ]);
};
Home.displayName = 'Home';
Home.defaultProps = { width: "24", height: "24", viewBox: "0 0 24 24" };
"#;
        assert_eq!(component.source, expected);
        assert_eq!(component.source.matches("export const ").count(), 1);
    }

    #[test]
    fn declaration_can_appear_anywhere() {
        let src = "// banner\n\n\n'use strict';\nfunction Star (props) { return null; }\nStar.extra = { a: '}' };\nmodule.exports = Star;";
        let component = rewrite_component(src, "Star").unwrap();
        assert_eq!(
            component.source,
            "export const Star = <SvgIconConstructor>function(props: SvgIconProps) {\n return null; \n};\nStar.displayName = 'Star';\nStar.extra = { a: '}' };\n"
        );
    }

    #[test]
    fn unexpected_shapes_are_fatal() {
        assert!(matches!(
            rewrite_component("const Home = () => null;", "Home"),
            Err(ShapeError::MissingFunction)
        ));
        assert!(matches!(
            rewrite_component("function Home (props) { return (", "Home"),
            Err(ShapeError::UnclosedFunction(_))
        ));
        assert!(matches!(
            rewrite_component("function Other (props) {}", "Home"),
            Err(ShapeError::NameMismatch { .. })
        ));
    }
}
