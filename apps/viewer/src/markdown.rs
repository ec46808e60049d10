//! Markdown engine capability and the pulldown-cmark implementation.

use pulldown_cmark::{html, Event, Options, Parser};

use crate::error::RenderError;

/// Converts a face's markdown source into markup.
pub trait MarkdownEngine: Send + Sync {
    fn render(&self, source: &str) -> Result<String, RenderError>;
}

/// CommonMark renderer that hands math spans to the typesetter verbatim.
///
/// The parser recognises `$…$` and `$$…$$` itself, so TeX inside them is
/// never read as emphasis and dollars in link destinations or code are left
/// alone. Math is written back with its delimiters, HTML-escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkEngine;

impl MarkdownEngine for CmarkEngine {
    fn render(&self, source: &str) -> Result<String, RenderError> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_MATH);

        let events = Parser::new_ext(source, options).map(|event| match event {
            Event::InlineMath(tex) => Event::Text(format!("${}$", tex).into()),
            Event::DisplayMath(tex) => Event::Text(format!("$${}$$", tex).into()),
            other => other,
        });

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events);
        Ok(out)
    }
}
