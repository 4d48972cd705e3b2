//! 最小的 JS/TS 词法切分：只区分 代码 / 字符串 / 模板字符串 / 注释 / 换行，
//! 供括号匹配与格式化使用。正则字面量按普通代码处理。

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// 不含换行的普通代码片段
    Code,
    /// 单行字符串，`quote` 为原始引号
    Str { quote: char },
    /// 模板字符串，可跨行
    Template,
    LineComment,
    /// 块注释，可跨行
    BlockComment,
    Newline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// 字节偏移
    pub start: usize,
    /// 1 起始行号
    pub line: usize,
    /// 1 起始列号（字符计）
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{line}:{column} 字符串未闭合")]
    UnterminatedString { line: usize, column: usize },
    #[error("{line}:{column} 模板字符串未闭合")]
    UnterminatedTemplate { line: usize, column: usize },
    #[error("{line}:{column} 注释未闭合")]
    UnterminatedComment { line: usize, column: usize },
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut it = self.src[self.pos..].chars();
        it.next();
        it.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }
}

/// 切分源码；`\r\n` 应事先规范为 `\n`
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut cur = Cursor {
        src,
        pos: 0,
        line: 1,
        column: 1,
    };
    let mut tokens = Vec::new();
    while let Some(ch) = cur.peek() {
        let (start, line, column) = (cur.pos, cur.line, cur.column);
        let kind = match ch {
            '\n' => {
                cur.bump();
                TokenKind::Newline
            }
            '"' | '\'' => {
                cur.bump();
                loop {
                    match cur.bump() {
                        Some('\\') => {
                            cur.bump();
                        }
                        Some(c) if c == ch => break,
                        Some('\n') | None => {
                            return Err(LexError::UnterminatedString { line, column })
                        }
                        Some(_) => {}
                    }
                }
                TokenKind::Str { quote: ch }
            }
            '`' => {
                cur.bump();
                loop {
                    match cur.bump() {
                        Some('\\') => {
                            cur.bump();
                        }
                        Some('`') => break,
                        None => return Err(LexError::UnterminatedTemplate { line, column }),
                        Some(_) => {}
                    }
                }
                TokenKind::Template
            }
            '/' if cur.peek2() == Some('/') => {
                while let Some(c) = cur.peek() {
                    if c == '\n' {
                        break;
                    }
                    cur.bump();
                }
                TokenKind::LineComment
            }
            '/' if cur.peek2() == Some('*') => {
                cur.bump();
                cur.bump();
                loop {
                    match cur.bump() {
                        Some('*') if cur.peek() == Some('/') => {
                            cur.bump();
                            break;
                        }
                        None => return Err(LexError::UnterminatedComment { line, column }),
                        Some(_) => {}
                    }
                }
                TokenKind::BlockComment
            }
            _ => {
                while let Some(c) = cur.peek() {
                    if matches!(c, '\n' | '"' | '\'' | '`') {
                        break;
                    }
                    if c == '/' && matches!(cur.peek2(), Some('/') | Some('*')) {
                        break;
                    }
                    cur.bump();
                }
                TokenKind::Code
            }
        };
        tokens.push(Token {
            kind,
            text: &src[start..cur.pos],
            start,
            line,
            column,
        });
    }
    Ok(tokens)
}

/// 从 `open_at`（指向 `{`）开始找到与之配对的 `}` 的字节偏移
pub fn matching_brace(src: &str, open_at: usize) -> Result<Option<usize>, LexError> {
    let mut depth = 0usize;
    for token in tokenize(src)? {
        if token.kind != TokenKind::Code || token.start + token.text.len() <= open_at {
            continue;
        }
        for (offset, ch) in token.text.char_indices() {
            let at = token.start + offset;
            if at < open_at {
                continue;
            }
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(Some(at));
                    }
                }
                _ => {}
            }
        }
    }
    Ok(None)
}

/// 按顶层 `;` 切分语句（字符串、注释与括号内部的 `;` 不算）
pub fn split_statements(src: &str) -> Result<Vec<&str>, LexError> {
    let mut statements = Vec::new();
    let mut depth = 0usize;
    let mut begin = 0usize;
    for token in tokenize(src)? {
        if token.kind != TokenKind::Code {
            continue;
        }
        for (offset, ch) in token.text.char_indices() {
            match ch {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                ';' if depth == 0 => {
                    let end = token.start + offset + 1;
                    let stmt = src[begin..end].trim();
                    if !stmt.is_empty() {
                        statements.push(stmt);
                    }
                    begin = end;
                }
                _ => {}
            }
        }
    }
    let rest = src[begin..].trim();
    if !rest.is_empty() {
        statements.push(rest);
    }
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_strings_comments_and_code() {
        let src = "a = \"x;}\" // c\n/* b\n */ `t\n${1}`";
        let kinds: Vec<_> = tokenize(src).unwrap().into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Code,
                TokenKind::Str { quote: '"' },
                TokenKind::Code,
                TokenKind::LineComment,
                TokenKind::Newline,
                TokenKind::BlockComment,
                TokenKind::Code,
                TokenKind::Template,
            ]
        );
    }

    #[test]
    fn string_escapes_do_not_terminate() {
        let tokens = tokenize(r#"'it\'s'"#).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, r#"'it\'s'"#);
    }

    #[test]
    fn unterminated_tokens_report_position() {
        assert_eq!(
            tokenize("x\n  'abc\n").unwrap_err(),
            LexError::UnterminatedString { line: 2, column: 3 }
        );
        assert!(matches!(
            tokenize("/* open").unwrap_err(),
            LexError::UnterminatedComment { .. }
        ));
    }

    #[test]
    fn brace_matching_skips_strings() {
        let src = "function A () { return \"}\" + {a: 1}; } tail";
        let open = src.find('{').unwrap();
        let close = matching_brace(src, open).unwrap().unwrap();
        assert_eq!(&src[close..], "} tail");
        assert_eq!(matching_brace("{ {", 0).unwrap(), None);
    }

    #[test]
    fn statements_split_on_top_level_semicolons() {
        let src = "A.x = { a: 1; };\n\nA.y = \"p;q\";\nmodule.exports = A;";
        assert_eq!(
            split_statements(src).unwrap(),
            vec!["A.x = { a: 1; };", "A.y = \"p;q\";", "module.exports = A;"]
        );
    }
}
