//! Markdown rendering seam.
//!
//! The graph and export crates only need "Markdown in, HTML out"; the
//! concrete renderer lives in `oboe-parser`.

/// Converts Markdown text into an HTML fragment.
pub trait MarkdownRender {
    /// Render `text` to HTML
    fn render(&self, text: &str) -> String;
}

impl<R: MarkdownRender + ?Sized> MarkdownRender for &R {
    fn render(&self, text: &str) -> String {
        (**self).render(text)
    }
}
