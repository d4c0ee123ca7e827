//! # Vellum Markup
//!
//! A small DOM model plus an HTML reader and writer. Node types describe
//! their markup form in terms of [`DomElement`], and the editor uses
//! [`parse`] and [`serialize`] to move whole documents in and out of HTML.
//!
//! ```rust
//! use vellum_markup::{parse, serialize, DomElement, DomNode};
//!
//! let video = DomElement::new("video").with_attribute("src", "clip.mp4");
//! let html = serialize(&[DomNode::Element(video)]);
//! assert_eq!(html, r#"<video src="clip.mp4"></video>"#);
//!
//! let nodes = parse(&html).unwrap();
//! assert_eq!(nodes.len(), 1);
//! ```

pub mod dom;
pub mod entities;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use dom::{is_void_element, DomElement, DomNode};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, MAX_DEPTH};
pub use serializer::serialize;
