//! Pattern string tokenizer
//!
//! Splits a pattern such as `%d{%H:%M:%S} [%p] %m%n` into literal runs and
//! directives. Grammar:
//!
//! - `%%` is a literal `%`
//! - `%` followed by a run of ASCII letters is a directive named by that run
//! - a directive may be followed by `{...}`; the text up to the first `}` is
//!   its argument, captured verbatim
//! - a lone `%` at the very end of the pattern is a literal `%`
//!
//! Tokenizing never fails. An argument brace that is never closed produces a
//! [`TokenKind::Error`] token, sets [`CompiledPattern::error`], and scanning
//! resumes right after the `{` so later directives still compile.

/// Marker rendered in place of a directive whose argument brace is unclosed
pub const PATTERN_ERROR: &str = "<<pattern_error>>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Literal,
    Directive,
    /// Stands in for a directive that could not be tokenized
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternToken {
    /// Literal text, or the directive name
    pub text: String,
    /// Brace argument of a directive; empty when absent
    pub arg: String,
    pub kind: TokenKind,
}

impl PatternToken {
    fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            arg: String::new(),
            kind: TokenKind::Literal,
        }
    }

    fn error() -> Self {
        Self {
            text: PATTERN_ERROR.to_string(),
            arg: String::new(),
            kind: TokenKind::Error,
        }
    }

    fn directive(name: String, arg: String) -> Self {
        Self {
            text: name,
            arg,
            kind: TokenKind::Directive,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledPattern {
    pub tokens: Vec<PatternToken>,
    pub error: bool,
}

impl CompiledPattern {
    fn flush_literal(&mut self, literal: &mut String) {
        if !literal.is_empty() {
            self.tokens.push(PatternToken::literal(std::mem::take(literal)));
        }
    }
}

/// Tokenize `pattern` left to right.
pub fn compile(pattern: &str) -> CompiledPattern {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = CompiledPattern::default();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            literal.push(chars[i]);
            i += 1;
            continue;
        }

        match chars.get(i + 1) {
            None => {
                literal.push('%');
                i += 1;
                continue;
            }
            Some('%') => {
                literal.push('%');
                i += 2;
                continue;
            }
            Some(_) => {}
        }

        let name_start = i + 1;
        let mut end = name_start;
        while end < chars.len() && chars[end].is_ascii_alphabetic() {
            end += 1;
        }
        let name: String = chars[name_start..end].iter().collect();

        let mut arg = String::new();
        if chars.get(end) == Some(&'{') {
            let arg_start = end + 1;
            match chars[arg_start..].iter().position(|&c| c == '}') {
                Some(len) => {
                    arg = chars[arg_start..arg_start + len].iter().collect();
                    end = arg_start + len + 1;
                }
                None => {
                    out.flush_literal(&mut literal);
                    out.tokens.push(PatternToken::error());
                    out.error = true;
                    i = arg_start;
                    continue;
                }
            }
        }

        out.flush_literal(&mut literal);
        out.tokens.push(PatternToken::directive(name, arg));
        i = end;
    }

    out.flush_literal(&mut literal);
    out
}
