//! Browser-style flashcard viewer.
//!
//! Loads a deck, shows one card at a time with a front/back flip, and
//! renders markdown with math through injected engines. The host supplies
//! the [`CardView`] surface, a [`MarkdownEngine`] and a [`Typesetter`].

pub mod config;
pub mod error;
pub mod loader;
pub mod markdown;
pub mod renderer;
pub mod typeset;
pub mod view;
pub mod viewer;

pub use config::ViewerConfig;
pub use error::{LoadError, RenderError, TransportError, TypesetError, ValidationError};
pub use loader::{DeckLoader, DeckTransport, HttpTransport};
pub use markdown::{CmarkEngine, MarkdownEngine};
pub use renderer::{CardRenderer, Control, EventOutcome, Position, UiEvent};
pub use typeset::{PassthroughTypesetter, TypesetCoordinator, Typesetter};
pub use view::{CardView, FaceContent};
pub use viewer::FlashcardViewer;
