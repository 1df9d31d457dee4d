//! # gbook-markdown - GitBook-flavored Markdown engine
//!
//! A hand-written, line-oriented Markdown processor for the dialect
//! GitBook exports actually use: headings, emphasis, links/images, code
//! fences, tables, lists, blockquotes, horizontal rules, front-matter,
//! plus the GitBook extensions (hint blocks, content-refs, embedded
//! figure blocks).
//!
//! ## Quick Start
//!
//! ```rust
//! let result = gbook_markdown::parse("# Hello\n\nThis is **bold** text.");
//!
//! println!("HTML: {}", result.html);
//! println!("Headings: {:?}", result.headings);
//! println!("Plain text: {}", result.plain_text);
//! ```
//!
//! The engine is deliberately not a CommonMark implementation. It is a
//! single forward scan with one line of lookahead and an explicit block
//! state, and it never fails: malformed input degrades to literal text
//! or plain paragraphs.

pub mod inline;
pub mod preprocess;
mod parser;
mod types;
pub mod utils;

pub use inline::format_inline;
pub use parser::parse;
pub use preprocess::{Preprocessed, preprocess};
pub use types::{Frontmatter, Heading, ParseResult};
pub use utils::slugify;
