//! Position and flip state for a single card view.
//!
//! ```text
//! Front --flip--> Back --flip--> Front
//! Front/Back --navigate--> Front (of the new index)
//! ```

use crate::types::{Card, Controls, Deck, Face};

/// Owns the loaded deck and everything that decides what is visible.
#[derive(Debug, Clone)]
pub struct Navigator {
    deck: Deck,
    current_index: usize,
    face: Face,
    generation: u64,
}

impl Navigator {
    /// Start at the first card, front side up.
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            current_index: 0,
            face: Face::Front,
            generation: 0,
        }
    }

    /// Continue generation numbering from a previous navigator, so work
    /// tagged before a reload can never match a render after it.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_card(&self) -> &Card {
        // current_index < deck.len() is held by every mutation below
        &self.deck.cards()[self.current_index]
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn controls(&self) -> Controls {
        Controls::at(self.current_index, self.deck.len())
    }

    /// Move back one card. Returns false at the first card.
    pub fn go_previous(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        self.face = Face::Front;
        true
    }

    /// Move forward one card. Returns false at the last card.
    pub fn go_next(&mut self) -> bool {
        if self.current_index >= self.deck.last_index() {
            return false;
        }
        self.current_index += 1;
        self.face = Face::Front;
        true
    }

    /// Toggle the visible face and return the new one.
    pub fn flip(&mut self) -> Face {
        self.face = self.face.other();
        self.face
    }

    pub fn reset_face(&mut self) {
        self.face = Face::Front;
    }

    /// Start a render cycle. Work tagged with an earlier generation is stale.
    pub fn begin_render(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}
