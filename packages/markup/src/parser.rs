//! Forgiving HTML tree builder.
//!
//! Unmatched end tags are ignored and elements still open at the end of the
//! input are closed implicitly. Comments and doctypes are dropped. Open
//! elements may nest at most [`MAX_DEPTH`] levels deep.

use crate::dom::{DomElement, DomNode};
use crate::entities::decode;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{lex, tag_name, AttrToken, Token};
use logos::Logos;

/// Deepest element nesting [`parse`] accepts
pub const MAX_DEPTH: usize = 512;

/// Parse an HTML fragment into a list of top-level nodes
pub fn parse(source: &str) -> ParseResult<Vec<DomNode>> {
    let mut builder = TreeBuilder::default();

    for token in lex(source) {
        let token = token.map_err(ParseError::lexer_error)?;

        match token.token {
            Token::Text(text) => builder.append_text(&decode(text)),
            Token::Lt => builder.append_text("<"),
            Token::StartTag(tag) => {
                let (element, self_closing) = parse_start_tag(tag, token.span.start)?;
                if self_closing || element.is_void() {
                    builder.append(DomNode::Element(element));
                } else {
                    if builder.depth() >= MAX_DEPTH {
                        return Err(ParseError::too_deep(token.span.start, MAX_DEPTH));
                    }
                    builder.open(element);
                }
            }
            Token::EndTag(tag) => builder.close(&tag_name(tag)),
            Token::Comment | Token::Doctype => {}
        }
    }

    Ok(builder.finish())
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<DomElement>,
    roots: Vec<DomNode>,
}

impl TreeBuilder {
    fn siblings(&mut self) -> &mut Vec<DomNode> {
        match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        }
    }

    fn append(&mut self, node: DomNode) {
        self.siblings().push(node);
    }

    fn append_text(&mut self, text: &str) {
        let siblings = self.siblings();
        if let Some(DomNode::Text { content }) = siblings.last_mut() {
            content.push_str(text);
        } else {
            siblings.push(DomNode::text(text));
        }
    }

    fn depth(&self) -> usize {
        self.open.len()
    }

    fn open(&mut self, element: DomElement) {
        self.open.push(element);
    }

    fn close(&mut self, tag: &str) {
        let Some(index) = self.open.iter().rposition(|e| e.tag == tag) else {
            return;
        };

        while self.open.len() > index {
            if let Some(element) = self.open.pop() {
                self.append(DomNode::Element(element));
            }
        }
    }

    fn finish(mut self) -> Vec<DomNode> {
        while let Some(element) = self.open.pop() {
            self.append(DomNode::Element(element));
        }
        self.roots
    }
}

/// Parse a start tag slice such as `<video src="a.mp4">`.
///
/// Returns the element and whether the tag was written self-closing.
fn parse_start_tag(tag: &str, pos: usize) -> ParseResult<(DomElement, bool)> {
    let name = tag_name(tag);
    let inner = &tag[1..tag.len() - 1];
    let mut rest = inner[name.len()..].trim_end();

    let self_closing = rest.ends_with('/');
    if self_closing {
        rest = &rest[..rest.len() - 1];
    }

    let offset = pos + 1 + name.len();
    let mut element = DomElement::new(name);
    let mut tokens = AttrToken::lexer(rest).spanned().peekable();

    while let Some((token, span)) = tokens.next() {
        let at = offset + span.start;
        let name = match token {
            Ok(AttrToken::Word(name)) => name.to_ascii_lowercase(),
            Ok(_) => return Err(ParseError::invalid_attribute(at, "expected attribute name")),
            Err(()) => return Err(ParseError::invalid_attribute(at, "unexpected character")),
        };

        let value = if matches!(tokens.peek(), Some((Ok(AttrToken::Eq), _))) {
            tokens.next();
            match tokens.next() {
                Some((Ok(AttrToken::Word(v)), _))
                | Some((Ok(AttrToken::DoubleQuoted(v)), _))
                | Some((Ok(AttrToken::SingleQuoted(v)), _)) => decode(v),
                _ => {
                    return Err(ParseError::invalid_attribute(
                        at,
                        format!("missing value for '{}'", name),
                    ))
                }
            }
        } else {
            String::new()
        };

        // First occurrence wins, as in browsers
        if !element.has_attribute(&name) {
            element.attributes.push((name, value));
        }
    }

    Ok((element, self_closing))
}
