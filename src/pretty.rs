//! HTML pretty-printing.
//!
//! Rendered templates come out with whatever whitespace the template author
//! happened to write. [`HtmlFormatter`] normalizes that:
//!
//! - block elements start on their own line, children indented two spaces
//! - inline elements and text stay together on one line, whitespace collapsed
//! - a block element holding only inline content stays on a single line
//! - `pre`, `textarea`, `script` and `style` bodies and comments are kept verbatim
//! - no trailing whitespace, exactly one trailing newline
//!
//! ```text
//! <ul><li>One</li>     <li>Two <b>!</b></li></ul>
//! ```
//!
//! becomes
//!
//! ```text
//! <ul>
//!   <li>One</li>
//!   <li>Two <b>!</b></li>
//! </ul>
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unterminated {0} starting at byte {1}")]
    Unterminated(&'static str, usize),
    #[error("Unterminated <{0}> element starting at byte {1}")]
    UnterminatedElement(String, usize),
}

pub trait Formatter {
    fn format(&self, markup: &str) -> Result<String, FormatError>;
}

/// Indenting HTML formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn format(&self, markup: &str) -> Result<String, FormatError> {
        let tokens = tokenize(markup)?;
        Ok(layout(&tokens))
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "dfn", "em", "i",
    "img", "input", "kbd", "label", "mark", "q", "s", "samp", "select", "small", "span", "strong",
    "sub", "sup", "time", "u", "var", "wbr",
];

/// Elements whose content is emitted exactly as rendered.
const VERBATIM_ELEMENTS: &[&str] = &["pre", "script", "style", "textarea"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Open { name: String, raw: &'a str },
    Close { name: String, raw: &'a str },
    Text(&'a str),
    /// Comments, doctypes and verbatim elements, tags included.
    Verbatim(&'a str),
}

fn tokenize(markup: &str) -> Result<Vec<Token<'_>>, FormatError> {
    // ASCII lowercasing keeps byte offsets aligned with `markup`
    let lower = markup.to_ascii_lowercase();
    let bytes = markup.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }
        let rest = &lower[pos..];
        let next = bytes.get(pos + 1).copied();

        let end = if rest.starts_with("<!--") {
            let close = rest
                .find("-->")
                .ok_or(FormatError::Unterminated("comment", pos))?;
            Some((pos + close + 3, None))
        } else if next == Some(b'!') || next == Some(b'?') {
            let close = rest
                .find('>')
                .ok_or(FormatError::Unterminated("declaration", pos))?;
            Some((pos + close + 1, None))
        } else if next == Some(b'/') || next.is_some_and(|b| b.is_ascii_alphabetic()) {
            let close = tag_end(bytes, pos).ok_or(FormatError::Unterminated("tag", pos))?;
            Some((close, Some(tag_name(&lower[pos..close]))))
        } else {
            None
        };

        let Some((tag_end_pos, name)) = end else {
            // A bare '<' in text
            pos += 1;
            continue;
        };

        if text_start < pos {
            tokens.push(Token::Text(&markup[text_start..pos]));
        }
        let raw = &markup[pos..tag_end_pos];

        match name {
            None => {
                tokens.push(Token::Verbatim(raw));
                pos = tag_end_pos;
            }
            Some(name) if next == Some(b'/') => {
                tokens.push(Token::Close { name, raw });
                pos = tag_end_pos;
            }
            Some(name) if VERBATIM_ELEMENTS.contains(&name.as_str()) => {
                let closing = format!("</{name}");
                let body_end = lower[tag_end_pos..]
                    .find(&closing)
                    .map(|i| tag_end_pos + i)
                    .ok_or_else(|| FormatError::UnterminatedElement(name.clone(), pos))?;
                let element_end = tag_end(bytes, body_end)
                    .ok_or_else(|| FormatError::UnterminatedElement(name.clone(), pos))?;
                tokens.push(Token::Verbatim(&markup[pos..element_end]));
                pos = element_end;
            }
            Some(name) => {
                tokens.push(Token::Open { name, raw });
                pos = tag_end_pos;
            }
        }
        text_start = pos;
    }

    if text_start < bytes.len() {
        tokens.push(Token::Text(&markup[text_start..]));
    }
    Ok(tokens)
}

/// Byte offset just past the `>` closing the tag that starts at `start`,
/// skipping over quoted attribute values.
fn tag_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut quote = None;
    for (i, &b) in bytes.iter().enumerate().skip(start + 1) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Lowercased element name of a tag, without `<`, `/` or attributes.
fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != '/' && *c != '>')
        .collect()
}

struct Layout {
    lines: Vec<String>,
    /// Inline run being accumulated for the current line.
    line: String,
    depth: usize,
    /// Index of the last emitted line when it is a still-open block tag.
    open_line: Option<usize>,
}

impl Layout {
    fn push(&mut self, content: &str) {
        let line = format!("{}{}", "  ".repeat(self.depth), content);
        self.lines.push(line.trim_end().to_string());
        self.open_line = None;
    }

    fn flush(&mut self) {
        let run = std::mem::take(&mut self.line);
        let run = run.trim();
        if !run.is_empty() {
            self.push(run);
        }
    }

    fn append_text(&mut self, text: &str) {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let leading = text.starts_with(char::is_whitespace);
        let trailing = text.ends_with(char::is_whitespace);

        if (leading || collapsed.is_empty()) && !self.line.is_empty() && !self.line.ends_with(' ')
        {
            self.line.push(' ');
        }
        self.line.push_str(&collapsed);
        if trailing && !collapsed.is_empty() {
            self.line.push(' ');
        }
    }

    fn open_block(&mut self, raw: &str, is_void: bool) {
        self.flush();
        self.push(raw);
        if !is_void {
            self.open_line = Some(self.lines.len() - 1);
            self.depth += 1;
        }
    }

    fn close_block(&mut self, raw: &str) {
        let run = self.line.trim().to_string();
        if let Some(i) = self.open_line.filter(|&i| i + 1 == self.lines.len()) {
            // Block holding only inline content: keep it on one line
            self.line.clear();
            self.depth = self.depth.saturating_sub(1);
            self.lines[i] = format!("{}{}{}", self.lines[i], run, raw);
            self.open_line = None;
            return;
        }
        self.flush();
        self.depth = self.depth.saturating_sub(1);
        self.push(raw);
    }
}

fn layout(tokens: &[Token<'_>]) -> String {
    let mut out = Layout {
        lines: Vec::new(),
        line: String::new(),
        depth: 0,
        open_line: None,
    };

    for token in tokens {
        match token {
            Token::Text(text) => out.append_text(text),
            Token::Open { name, raw } if INLINE_ELEMENTS.contains(&name.as_str()) => {
                out.line.push_str(raw);
            }
            Token::Close { name, raw } if INLINE_ELEMENTS.contains(&name.as_str()) => {
                out.line.push_str(raw);
            }
            Token::Open { name, raw } => {
                let is_void = VOID_ELEMENTS.contains(&name.as_str()) || raw.ends_with("/>");
                out.open_block(raw, is_void);
            }
            Token::Close { raw, .. } => out.close_block(raw),
            Token::Verbatim(raw) => {
                out.flush();
                out.push(raw);
            }
        }
    }
    out.flush();

    if out.lines.is_empty() {
        return String::new();
    }
    let mut formatted = out.lines.join("\n");
    formatted.push('\n');
    formatted
}
