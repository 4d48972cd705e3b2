//! 代码格式化：
//! - 按括号深度重新缩进（tab_width / use_tabs）
//! - 字符串引号统一为首选风格（需要转义更少的引号优先）
//! - 去除行尾空白、合并连续空行、统一换行符
//! - 格式化前先用 oxc 按 TypeScript 解析，任何解析错误都报语法错误

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::Deserialize;
use thiserror::Error;

use crate::lexer::{tokenize, LexError, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    #[serde(alias = "auto")]
    Lf,
    Crlf,
}

/// 格式化风格，字段名兼容 prettier 配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    #[serde(alias = "tabWidth")]
    pub tab_width: usize,
    #[serde(alias = "useTabs")]
    pub use_tabs: bool,
    pub semi: bool,
    #[serde(alias = "singleQuote")]
    pub single_quote: bool,
    #[serde(alias = "endOfLine")]
    pub end_of_line: EndOfLine,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            tab_width: 2,
            use_tabs: false,
            semi: true,
            single_quote: false,
            end_of_line: EndOfLine::Lf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("{line}:{column} 语法错误: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}

impl From<LexError> for FormatError {
    fn from(e: LexError) -> Self {
        let (line, column) = match e {
            LexError::UnterminatedString { line, column }
            | LexError::UnterminatedTemplate { line, column }
            | LexError::UnterminatedComment { line, column } => (line, column),
        };
        FormatError::Syntax {
            line,
            column,
            message: e.to_string(),
        }
    }
}

struct Open {
    ch: char,
    indent: usize,
    line: usize,
    column: usize,
}

/// 正在拼接的一行
#[derive(Default)]
struct LineBuf {
    text: String,
    indent: Option<usize>,
    /// 行首仍处于“只有空白和闭括号”的状态
    leading: bool,
    ends_with_code: bool,
}

/// 用 oxc 把源码当作 `.ts` 模块解析，返回第一条解析错误
pub fn check_syntax(src: &str) -> Result<(), FormatError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, src, SourceType::ts()).parse();
    let Some(first) = ret.errors.first() else {
        return Ok(());
    };
    let offset = first
        .labels
        .as_ref()
        .and_then(|labels| labels.first())
        .map(|label| label.offset())
        .unwrap_or(0);
    let (line, column) = line_column(src, offset);
    Err(FormatError::Syntax {
        line,
        column,
        message: first.to_string(),
    })
}

/// 字节偏移 -> 1 起始的行号与列号（按字符计列）
fn line_column(src: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(src.len());
    let before = src.get(..offset).unwrap_or(src);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, before[line_start..].chars().count() + 1)
}

/// 格式化一段 TS 源码
pub fn format_source(src: &str, opts: &FormatOptions) -> Result<String, FormatError> {
    let normalized = src.replace("\r\n", "\n");
    check_syntax(&normalized)?;
    let tokens = tokenize(&normalized)?;

    let mut stack: Vec<Open> = Vec::new();
    let mut lines: Vec<(usize, String, bool)> = Vec::new();
    let mut cur = LineBuf {
        leading: true,
        ..Default::default()
    };

    for token in &tokens {
        match token.kind {
            TokenKind::Newline => {
                finish_line(&mut cur, &stack, &mut lines);
            }
            TokenKind::Code => {
                let mut column = token.column;
                for ch in token.text.chars() {
                    match ch {
                        '(' | '[' | '{' => {
                            cur.leading = false;
                            let indent = line_indent(&mut cur, &stack);
                            stack.push(Open {
                                ch,
                                indent,
                                line: token.line,
                                column,
                            });
                        }
                        ')' | ']' | '}' => {
                            let open = stack.pop().ok_or_else(|| FormatError::Syntax {
                                line: token.line,
                                column,
                                message: format!("多余的 `{ch}`"),
                            })?;
                            if closer_for(open.ch) != ch {
                                return Err(FormatError::Syntax {
                                    line: token.line,
                                    column,
                                    message: format!(
                                        "`{}`（{}:{}）与 `{ch}` 不匹配",
                                        open.ch, open.line, open.column
                                    ),
                                });
                            }
                            if cur.leading {
                                cur.indent = Some(open.indent);
                            }
                        }
                        c if c.is_whitespace() => {}
                        _ => {
                            cur.leading = false;
                            line_indent(&mut cur, &stack);
                        }
                    }
                    column += 1;
                }
                cur.text.push_str(token.text);
                if !token.text.trim().is_empty() {
                    cur.ends_with_code = true;
                }
            }
            TokenKind::Str { quote } => {
                cur.leading = false;
                line_indent(&mut cur, &stack);
                cur.text.push_str(&requote(token.text, quote, opts.single_quote));
                cur.ends_with_code = false;
            }
            TokenKind::Template | TokenKind::LineComment | TokenKind::BlockComment => {
                cur.leading = false;
                line_indent(&mut cur, &stack);
                cur.text.push_str(token.text);
                cur.ends_with_code = false;
            }
        }
    }
    finish_line(&mut cur, &stack, &mut lines);

    if let Some(open) = stack.last() {
        return Err(FormatError::Syntax {
            line: open.line,
            column: open.column,
            message: format!("`{}` 未闭合", open.ch),
        });
    }

    Ok(render(&lines, opts))
}

fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// 行首的缩进：若尚未确定，取栈顶所在行的缩进 + 1
fn line_indent(cur: &mut LineBuf, stack: &[Open]) -> usize {
    *cur
        .indent
        .get_or_insert_with(|| stack.last().map(|o| o.indent + 1).unwrap_or(0))
}

fn finish_line(cur: &mut LineBuf, stack: &[Open], lines: &mut Vec<(usize, String, bool)>) {
    let indent = line_indent(cur, stack);
    let text = std::mem::take(&mut cur.text);
    lines.push((indent, text.trim().to_string(), cur.ends_with_code));
    *cur = LineBuf {
        leading: true,
        ..Default::default()
    };
}

fn render(lines: &[(usize, String, bool)], opts: &FormatOptions) -> String {
    let unit = if opts.use_tabs {
        "\t".to_string()
    } else {
        " ".repeat(opts.tab_width)
    };
    let eol = match opts.end_of_line {
        EndOfLine::Lf => "\n",
        EndOfLine::Crlf => "\r\n",
    };

    let mut out: Vec<String> = Vec::new();
    let mut prev_blank = true;
    for (indent, text, ends_with_code) in lines {
        if text.is_empty() {
            if !prev_blank {
                out.push(String::new());
            }
            prev_blank = true;
            continue;
        }
        let mut text = text.as_str();
        if !opts.semi && *ends_with_code {
            text = text.strip_suffix(';').unwrap_or(text).trim_end();
        }
        out.push(format!("{}{}", unit.repeat(*indent), text));
        prev_blank = false;
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    if out.is_empty() {
        return String::new();
    }
    let mut joined = out.join(eol);
    joined.push_str(eol);
    joined
}

/// 把字符串字面量改写为首选引号；若内容中首选引号更多则保留另一种
fn requote(literal: &str, original: char, prefer_single: bool) -> String {
    let body = &literal[1..literal.len() - 1];
    let (singles, doubles) = count_quotes(body);
    let preferred = if prefer_single { '\'' } else { '"' };
    let alternate = if prefer_single { '"' } else { '\'' };
    let (preferred_count, alternate_count) = if prefer_single {
        (singles, doubles)
    } else {
        (doubles, singles)
    };
    let target = if preferred_count > alternate_count {
        alternate
    } else {
        preferred
    };
    if target == original {
        return literal.to_string();
    }

    let mut out = String::with_capacity(literal.len() + 2);
    out.push(target);
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                // 原引号不再需要转义
                Some(q) if q == original => out.push(q),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            c if c == target => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(target);
    out
}

/// 统计未转义与已转义的单/双引号数量（都计入）
fn count_quotes(body: &str) -> (usize, usize) {
    let mut singles = 0;
    let mut doubles = 0;
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        let ch = if ch == '\\' {
            match chars.next() {
                Some(next) => next,
                None => break,
            }
        } else {
            ch
        };
        match ch {
            '\'' => singles += 1,
            '"' => doubles += 1,
            _ => {}
        }
    }
    (singles, doubles)
}
