//! A markdown processing library implementing the Sundown/Upskirt dialect.
//!
//! This crate parses a byte sequence containing markdown-flavored text and
//! drives a renderer through a stream of callbacks, the way the original
//! [hoedown]/[sundown] C library does, except the engine itself — block
//! recognition, inline dispatch, reference resolution, autolink scanning —
//! is implemented natively rather than bound to the C library via FFI.
//!
//! A document is parsed in two phases: link-reference definitions are
//! collected first so that later references resolve regardless of document
//! order, then the remaining text is recognized block by block, recursing
//! into nested blocks (blockquotes, list items) and invoking the inline
//! recognizer on leaf text.
//!
//! [hoedown]: https://github.com/hoedown/hoedown
//! [sundown]: https://github.com/vmg/sundown
//!
//! ```
//! use sundown::Markdown;
//! use sundown::renderer::html::{self, Html};
//!
//! let doc = Markdown::new("some _emphasis_ required");
//! let mut html = Html::new(html::Flags::empty(), 0);
//!
//! assert_eq!(
//!     doc.render(&mut html).to_str().unwrap(),
//!     "<p>some <em>emphasis</em> required</p>\n");
//! ```

#[macro_use]
extern crate bitflags;

mod active_char;
mod autolink;
mod block;
mod buffer;
mod document;
mod extensions;
mod html_tags;
mod inline;
mod markdown;
mod pool;
mod refs;
pub mod renderer;
mod tag;

pub use buffer::Buffer;
pub use extensions::Extension;
pub use markdown::Markdown;
pub use renderer::Render;

/// The version of the dialect this crate implements, in the spirit of the
/// original library's `version()` entry point.
pub const VERSION: (u32, u32, u32) = (3, 0, 7);
