//! Core types for the deck viewer.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// A single card: two markdown sources.
///
/// Missing faces read as empty strings; any other field in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Markdown source for the given face.
    pub fn face(&self, face: Face) -> &str {
        match face {
            Face::Front => &self.front,
            Face::Back => &self.back,
        }
    }
}

/// Ordered, non-empty, immutable collection of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck, rejecting an empty card list.
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn last_index(&self) -> usize {
        self.cards.len() - 1
    }
}

/// Which side of the card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Front,
    Back,
}

impl Default for Face {
    fn default() -> Self {
        Self::Front
    }
}

impl Face {
    /// The opposite face.
    pub fn other(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

/// Enabled state of the navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl Controls {
    /// Boundary state for `index` within a deck of `len` cards.
    pub fn at(index: usize, len: usize) -> Self {
        Self {
            previous_enabled: index > 0,
            next_enabled: index + 1 < len,
        }
    }

    /// Both controls disabled, shown while no deck is installed.
    pub fn inactive() -> Self {
        Self {
            previous_enabled: false,
            next_enabled: false,
        }
    }
}
