//! The `Markdown` document type: owned source bytes plus the configuration
//! to render them with.

use crate::buffer::Buffer;
use crate::extensions::Extension;
use crate::renderer::Render;

/// A markdown document: its source bytes, the extensions to recognize, and
/// the maximum block nesting depth to parse.
#[derive(Debug, Clone)]
pub struct Markdown {
    pub contents: Buffer,
    pub extensions: Extension,
    pub max_nesting: usize,
}

impl Markdown {
    /// Construct a document with no extensions enabled and the default
    /// maximum nesting of 16, matching the teacher's defaults.
    pub fn new(body: &str) -> Markdown {
        Markdown::from(body.as_bytes())
    }

    /// Builder method to enable a set of extensions.
    pub fn extensions(mut self, extensions: Extension) -> Markdown {
        self.extensions = extensions;
        self
    }

    /// Builder method to set the maximum block nesting depth.
    ///
    /// Panics if `max_nesting` is zero: a precondition violation the
    /// implementation detects at construction time.
    pub fn max_nesting(mut self, max_nesting: usize) -> Markdown {
        assert!(max_nesting > 0, "max_nesting must be nonzero");
        self.max_nesting = max_nesting;
        self
    }

    /// Render this document with the given renderer.
    pub fn render<R: Render>(&self, renderer: &mut R) -> Buffer {
        renderer.render(self)
    }

    /// Render this document as an inline run with the given renderer.
    pub fn render_inline<R: Render>(&self, renderer: &mut R) -> Buffer {
        renderer.render_inline(self)
    }
}

impl From<Buffer> for Markdown {
    fn from(buffer: Buffer) -> Markdown {
        Markdown {
            contents: buffer,
            extensions: Extension::empty(),
            max_nesting: 16,
        }
    }
}

impl<'a> From<&'a [u8]> for Markdown {
    fn from(bytes: &'a [u8]) -> Markdown {
        Markdown::from(Buffer::from(bytes))
    }
}

impl<'a> From<&'a str> for Markdown {
    fn from(s: &'a str) -> Markdown {
        Markdown::from(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_default_extensions_and_nesting() {
        let doc = Markdown::new("hi");
        assert_eq!(doc.extensions, Extension::empty());
        assert_eq!(doc.max_nesting, 16);
    }

    #[test]
    #[should_panic(expected = "max_nesting must be nonzero")]
    fn zero_nesting_panics() {
        Markdown::new("hi").max_nesting(0);
    }

    proptest::proptest! {
        #[test]
        fn rendering_the_same_document_twice_is_byte_identical(
            body in "(([a-zA-Z0-9 ]|\n){0,80})",
        ) {
            use crate::renderer::html::{Flags, Html};

            let doc = Markdown::new(&body);
            let mut first = Html::new(Flags::empty());
            let mut second = Html::new(Flags::empty());

            let rendered_first = doc.render(&mut first);
            let rendered_second = doc.render(&mut second);

            proptest::prop_assert_eq!(rendered_first.as_bytes(), rendered_second.as_bytes());
        }
    }
}
