//! Core deck library shared by the viewer.
//!
//! Provides:
//! - Deck payload validation (JSON array of front/back cards)
//! - Navigation and flip state for a single card view
//! - Keyboard command mapping
//! - Shared types (Card, Deck, Face, Controls)

pub mod error;
pub mod input;
pub mod navigation;
pub mod parser;
pub mod types;

pub use error::{Result, ValidationError};
pub use input::{command_for_key, Command, Focus, Key};
pub use navigation::Navigator;
pub use parser::parse_deck;
pub use types::{Card, Controls, Deck, Face};
