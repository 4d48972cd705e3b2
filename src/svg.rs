//! SVG -> React 组件转换器：
//! - 用 quick-xml 解析标记为元素树
//! - 属性名改写为 React 风格（className / strokeWidth / xlinkHref ...）
//! - 输出固定形态的 CommonJS 组件源码（函数声明 + displayName + defaultProps）

use std::collections::BTreeMap;

use quick_xml::{
    events::{attributes::AttrError, BytesStart, Event},
    Reader,
};
use thiserror::Error;

use crate::{config::ConvertSettings, naming::is_valid_identifier};

/// 从根 `<svg>` 提取到 defaultProps 的属性
const DEFAULT_PROP_KEYS: [&str; 4] = ["version", "width", "height", "viewBox"];

const INDENT: &str = "    ";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("SVG 解析失败: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("SVG 属性解析失败: {0}")]
    Attr(#[from] AttrError),
    #[error("未找到根元素")]
    MissingRoot,
    #[error("根元素必须是 <svg>，实际为 <{0}>")]
    NotSvg(String),
    #[error("存在多个根元素: <{0}>")]
    MultipleRoots(String),
    #[error("元素 <{0}> 未闭合")]
    Unclosed(String),
    #[error("根元素之外出现文本: {0:?}")]
    TextOutsideRoot(String),
    #[error("组件名 `{0}` 不是合法标识符")]
    InvalidDisplayName(String),
}

/// 转换选项
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub display_name: String,
    /// None 表示不给 class/id 加前缀
    pub class_id_prefix: Option<String>,
    /// 原始属性名 -> 输出属性名
    pub props_map: BTreeMap<String, String>,
    /// 需要丢弃的元素名
    pub filters: Vec<String>,
}

impl ConvertOptions {
    pub fn for_icon(display_name: &str, settings: &ConvertSettings) -> Self {
        Self {
            display_name: display_name.to_string(),
            class_id_prefix: settings.class_id_prefix.clone(),
            props_map: settings.props_map.clone(),
            filters: settings.filters.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    Text(String),
}

/// 把一段 SVG 标记转换为组件源码
pub fn svg_to_component(markup: &str, opts: &ConvertOptions) -> Result<String, ConvertError> {
    if !is_valid_identifier(&opts.display_name) {
        return Err(ConvertError::InvalidDisplayName(opts.display_name.clone()));
    }
    let mut root = parse_markup(markup)?;
    if local_name(&root.name) != "svg" {
        return Err(ConvertError::NotSvg(root.name));
    }
    apply_filters(&mut root, &opts.filters);

    let name = &opts.display_name;
    let mut defaults = Vec::new();
    let mut extras = Vec::new();
    for (key, value) in &root.attrs {
        if is_xmlns(key) {
            continue;
        }
        if DEFAULT_PROP_KEYS.contains(&key.as_str()) {
            defaults.push((key.clone(), value.clone()));
        } else {
            extras.push((key.clone(), value.clone()));
        }
    }

    let root_props = if extras.is_empty() {
        "props".to_string()
    } else {
        let mut fields = render_props(&extras, opts);
        fields.push("...props".to_string());
        format!("{{ {} }}", fields.join(", "))
    };
    let body = render_call("svg", &root_props, &root.children, opts, 1);

    let default_fields: Vec<String> = defaults
        .iter()
        .map(|(k, v)| format!("{}: {}", js_key(k), js_string(v)))
        .collect();
    let default_props = if default_fields.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", default_fields.join(", "))
    };

    Ok(format!(
        "var React = require('react');\n\
         \n\
         function {name} (props) {{\n\
         {INDENT}return {body};\n\
         }}\n\
         \n\
         {name}.displayName = {display};\n\
         \n\
         {name}.defaultProps = {default_props};\n\
         \n\
         module.exports = {name};\n\
         \n\
         {name}.default = {name};\n",
        display = js_string(name),
    ))
}

fn parse_markup(markup: &str) -> Result<Element, ConvertError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(element_from(&e)?),
            Event::Empty(e) => {
                let el = element_from(&e)?;
                attach(Node::Element(el), &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // 结束标签名由 quick-xml 校验
                if let Some(el) = stack.pop() {
                    attach(Node::Element(el), &mut stack, &mut root)?;
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?.into_owned();
                attach(Node::Text(text), &mut stack, &mut root)?;
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c).into_owned();
                attach(Node::Text(text), &mut stack, &mut root)?;
            }
            Event::Eof => break,
            // 注释、声明、处理指令、DOCTYPE 均忽略
            _ => {}
        }
    }
    if let Some(open) = stack.pop() {
        return Err(ConvertError::Unclosed(open.name));
    }
    root.ok_or(ConvertError::MissingRoot)
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, ConvertError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((key, value));
    }
    Ok(Element {
        name,
        attrs,
        children: Vec::new(),
    })
}

fn attach(
    node: Node,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ConvertError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    match node {
        Node::Element(el) if root.is_none() => {
            *root = Some(el);
            Ok(())
        }
        Node::Element(el) => Err(ConvertError::MultipleRoots(el.name)),
        Node::Text(text) => Err(ConvertError::TextOutsideRoot(text)),
    }
}

fn apply_filters(el: &mut Element, filters: &[String]) {
    if filters.is_empty() {
        return;
    }
    el.children.retain(|child| match child {
        Node::Element(c) => !filters.iter().any(|f| *f == c.name),
        Node::Text(_) => true,
    });
    for child in &mut el.children {
        if let Node::Element(c) = child {
            apply_filters(c, filters);
        }
    }
}

fn render_call(
    tag: &str,
    props: &str,
    children: &[Node],
    opts: &ConvertOptions,
    depth: usize,
) -> String {
    let head = format!("React.createElement({}, {}", js_string(tag), props);
    if children.is_empty() {
        return format!("{head})");
    }
    let inner = INDENT.repeat(depth + 1);
    let items: Vec<String> = children
        .iter()
        .enumerate()
        .map(|(idx, child)| match child {
            Node::Element(el) => {
                let mut fields = render_props(&el.attrs, opts);
                fields.push(format!("key: {idx}"));
                let props = format!("{{ {} }}", fields.join(", "));
                format!(
                    "{inner}{}",
                    render_call(&el.name, &props, &el.children, opts, depth + 1)
                )
            }
            Node::Text(text) => format!("{inner}{}", js_string(text)),
        })
        .collect();
    format!("{head}, [\n{}\n{}])", items.join(",\n"), INDENT.repeat(depth))
}

fn render_props(attrs: &[(String, String)], opts: &ConvertOptions) -> Vec<String> {
    attrs
        .iter()
        .filter(|(key, _)| !is_xmlns(key))
        .map(|(key, value)| {
            let value = match &opts.class_id_prefix {
                Some(prefix) => prefix_value(key, value, prefix),
                None => value.clone(),
            };
            let name = react_attr_name(key, &opts.props_map);
            if key == "style" {
                format!("{}: {}", js_key(&name), style_object(&value))
            } else {
                format!("{}: {}", js_key(&name), js_string(&value))
            }
        })
        .collect()
}

/// SVG 属性名 -> React 属性名
fn react_attr_name(key: &str, props_map: &BTreeMap<String, String>) -> String {
    if let Some(mapped) = props_map.get(key) {
        return mapped.clone();
    }
    match key {
        "class" => "className".to_string(),
        "for" => "htmlFor".to_string(),
        k if k.starts_with("data-") || k.starts_with("aria-") => k.to_string(),
        k => camel_case(k, &['-', ':']),
    }
}

fn camel_case(input: &str, separators: &[char]) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper = false;
    for ch in input.chars() {
        if separators.contains(&ch) {
            upper = !out.is_empty();
            continue;
        }
        if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// `fill: red; stroke-width: 2` -> `{ fill: "red", strokeWidth: "2" }`
fn style_object(style: &str) -> String {
    let fields: Vec<String> = style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(prop, value)| (prop.trim(), value.trim()))
        .filter(|(prop, _)| !prop.is_empty())
        .map(|(prop, value)| {
            let key = if prop.starts_with("--") {
                prop.to_string()
            } else if let Some(vendor) = prop.strip_prefix('-') {
                let camel = camel_case(vendor, &['-']);
                let mut chars = camel.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => camel,
                }
            } else {
                camel_case(prop, &['-'])
            };
            format!("{}: {}", js_key(&key), js_string(value))
        })
        .collect();
    if fields.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", fields.join(", "))
    }
}

/// 给 id / class 及其引用（`url(#id)`、`#id`）加前缀
fn prefix_value(key: &str, value: &str, prefix: &str) -> String {
    match key {
        "id" => format!("{prefix}{value}"),
        "class" => value
            .split_whitespace()
            .map(|c| format!("{prefix}{c}"))
            .collect::<Vec<_>>()
            .join(" "),
        "href" | "xlink:href" if value.starts_with('#') => format!("#{prefix}{}", &value[1..]),
        _ => value.replace("url(#", &format!("url(#{prefix}")),
    }
}

fn is_xmlns(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

fn js_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if bare {
        key.to_string()
    } else {
        js_string(key)
    }
}

fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(name: &str) -> ConvertOptions {
        ConvertOptions {
            display_name: name.to_string(),
            ..Default::default()
        }
    }

    const HOME: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
  <!-- house -->
  <path d="M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z" fill-rule="evenodd"/>
</svg>"#;

    #[test]
    fn converts_to_fixed_component_shape() {
        let out = svg_to_component(HOME, &opts("Home")).unwrap();
        let expected = r#"var React = require('react');

function Home (props) {
    return React.createElement("svg", props, [
        React.createElement("path", { d: "M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z", fillRule: "evenodd", key: 0 })
    ]);
}

Home.displayName = "Home";

Home.defaultProps = { width: "24", height: "24", viewBox: "0 0 24 24" };

module.exports = Home;

Home.default = Home;
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn extra_root_attributes_are_spread_before_props() {
        let svg = r#"<svg viewBox="0 0 8 8" fill="none" class="icon"><g><circle cx="4" cy="4" r="2"/><title>Dot &amp; more</title></g></svg>"#;
        let out = svg_to_component(svg, &opts("Dot")).unwrap();
        assert!(out.contains(r#"React.createElement("svg", { fill: "none", className: "icon", ...props }, ["#));
        assert!(out.contains(r#"React.createElement("g", { key: 0 }, ["#));
        assert!(out.contains(r#"React.createElement("circle", { cx: "4", cy: "4", r: "2", key: 0 })"#));
        assert!(out.contains(r#"React.createElement("title", { key: 1 }, ["#));
        assert!(out.contains(r#""Dot & more""#));
        assert!(out.contains(r#"Dot.defaultProps = { viewBox: "0 0 8 8" };"#));
    }

    #[test]
    fn attribute_and_style_renaming() {
        let names = BTreeMap::new();
        assert_eq!(react_attr_name("stroke-width", &names), "strokeWidth");
        assert_eq!(react_attr_name("xlink:href", &names), "xlinkHref");
        assert_eq!(react_attr_name("data-name", &names), "data-name");
        assert_eq!(react_attr_name("class", &names), "className");
        assert_eq!(
            style_object("fill: red; stroke-width:2;-webkit-transform: none;--c: 1"),
            r#"{ fill: "red", strokeWidth: "2", WebkitTransform: "none", "--c": "1" }"#
        );
    }

    #[test]
    fn options_prefix_map_and_filter() {
        let svg = r##"<svg><title>x</title><defs><linearGradient id="g"/></defs><rect fill="url(#g)" class="a b" data-x="1"/></svg>"##;
        let mut o = opts("Box");
        o.class_id_prefix = Some("box-".into());
        o.props_map.insert("data-x".into(), "dataX".into());
        o.filters.push("title".into());
        let out = svg_to_component(svg, &o).unwrap();
        assert!(!out.contains("\"title\""));
        assert!(out.contains(r#"id: "box-g""#));
        assert!(out.contains(r#"fill: "url(#box-g)""#));
        assert!(out.contains(r#"className: "box-a box-b""#));
        assert!(out.contains(r#"dataX: "1""#));
        assert!(out.contains("Box.defaultProps = {};"));
        assert!(out.contains("return React.createElement(\"svg\", props, [\n"));
    }

    #[test]
    fn malformed_markup_is_rejected() {
        assert!(matches!(
            svg_to_component("<svg><path></svg>", &opts("Bad")),
            Err(ConvertError::Xml(_))
        ));
        assert!(matches!(
            svg_to_component("<svg><path/>", &opts("Bad")),
            Err(ConvertError::Unclosed(_))
        ));
        assert!(matches!(
            svg_to_component("<div/>", &opts("Bad")),
            Err(ConvertError::NotSvg(_))
        ));
        assert!(matches!(
            svg_to_component("   ", &opts("Bad")),
            Err(ConvertError::MissingRoot)
        ));
        assert!(matches!(
            svg_to_component("<svg/>", &opts("bad-name")),
            Err(ConvertError::InvalidDisplayName(_))
        ));
    }

    #[test]
    fn empty_svg_has_no_children_array() {
        let out = svg_to_component(r#"<svg width="1" height="1"/>"#, &opts("Blank")).unwrap();
        assert!(out.contains("    return React.createElement(\"svg\", props);\n"));
    }
}
