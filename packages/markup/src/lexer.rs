//! HTML lexers built with logos.
//!
//! Markup is lexed in two passes: [`Token`] splits a document into tags and
//! text, then [`AttrToken`] splits the inside of a start tag into attribute
//! names and values.
//!
//! A `<` that does not open a complete tag or comment is text. When a tag
//! match fails partway, the `<` is emitted as [`Token::Lt`] and lexing
//! resumes right after it.

use logos::{Logos, SpannedIter};
use std::ops::Range;

/// Document-level token
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    #[token("<!--", comment)]
    Comment,

    #[regex(r"<![a-zA-Z][^>]*>")]
    Doctype,

    // Whole start tag, including attributes. Quoted values may contain '>'.
    #[regex(r#"<[a-zA-Z][a-zA-Z0-9\-]*([^>"']|"[^"]*"|'[^']*')*>"#, |lex| lex.slice())]
    StartTag(&'src str),

    #[regex(r"</[a-zA-Z][a-zA-Z0-9\-]*[ \t\r\n\f]*>", |lex| lex.slice())]
    EndTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),

    #[token("<")]
    Lt,
}

/// Consume a comment body through the first `-->`
fn comment<'src>(lex: &mut logos::Lexer<'src, Token<'src>>) -> bool {
    match lex.remainder().find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

/// Token inside a start tag, after the tag name
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum AttrToken<'src> {
    #[regex(r#"[^ \t\r\n\f"'<>=]+"#, |lex| lex.slice())]
    Word(&'src str),

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    DoubleQuoted(&'src str),

    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    SingleQuoted(&'src str),
}

/// A token with its byte range in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken<'src> {
    pub token: Token<'src>,
    pub span: Range<usize>,
}

/// Lex a document into tokens. `Err` carries the offending byte offset.
pub fn lex(source: &str) -> Tokens<'_> {
    Tokens {
        source,
        offset: 0,
        inner: Token::lexer(source).spanned(),
    }
}

/// Token stream over a document, see [`lex`]
pub struct Tokens<'src> {
    source: &'src str,
    offset: usize,
    inner: SpannedIter<'src, Token<'src>>,
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Result<SpannedToken<'src>, usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let (result, span) = self.inner.next()?;
        let start = self.offset + span.start;

        match result {
            Ok(token) => Some(Ok(SpannedToken {
                token,
                span: start..self.offset + span.end,
            })),
            Err(()) if self.source.as_bytes().get(start) == Some(&b'<') => {
                self.offset = start + 1;
                self.inner = Token::lexer(&self.source[self.offset..]).spanned();
                Some(Ok(SpannedToken {
                    token: Token::Lt,
                    span: start..start + 1,
                }))
            }
            Err(()) => Some(Err(start)),
        }
    }
}

/// Tag name of a start or end tag slice, lower-cased
pub fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}
