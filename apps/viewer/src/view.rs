//! Display surface the renderer writes into.
//!
//! The host provides a card container with distinguishable front and back
//! regions plus previous/next controls; how they are found is its concern.

use deck_core::{Controls, Face};

/// What a face region should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceContent {
    /// Rendered markup, inserted as markup.
    Markup(String),
    /// Literal text, never interpreted as markup.
    Text(String),
}

impl FaceContent {
    pub fn as_markup(&self) -> Option<&str> {
        match self {
            Self::Markup(markup) => Some(markup),
            Self::Text(_) => None,
        }
    }
}

pub trait CardView: Send + Sync {
    fn set_face(&self, face: Face, content: FaceContent);

    /// Show the back (`true`) or front. Any running flip transition must be
    /// settled before this returns so new content never appears mid-rotation.
    fn set_flipped(&self, flipped: bool);

    fn set_controls(&self, controls: Controls);

    /// Replace the card display with a user-visible error.
    fn show_error(&self, message: &str);
}
