//! Card renderer and navigator.
//!
//! Owns the navigation state, writes both faces of the current card into the
//! view, and coordinates math typesetting so that a result computed for one
//! render cycle is never written into another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use deck_core::{command_for_key, Command, Controls, Deck, Face, Focus, Key, Navigator};
use tokio::task::JoinHandle;

use crate::config::ViewerConfig;
use crate::markdown::MarkdownEngine;
use crate::typeset::{Typesetter, TypesetCoordinator};
use crate::view::{CardView, FaceContent};

/// Navigation control identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
}

/// Input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    CardClicked,
    ControlClicked(Control),
    Key { key: Key, focus: Focus },
}

/// What the host should do with the originating event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub handled: bool,
    pub prevent_default: bool,
    /// The event must not reach the card's own click handler.
    pub stop_propagation: bool,
}

impl EventOutcome {
    fn ignored() -> Self {
        Self::default()
    }
}

/// Read-only view of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub len: usize,
    pub face: Face,
}

#[derive(Default)]
struct RenderState {
    navigator: Option<Navigator>,
    /// Markdown output of the current cycle, front then back. `None` for a
    /// face that fell back to literal text.
    rendered: [Option<String>; 2],
}

struct RendererInner {
    state: Mutex<RenderState>,
    view: Arc<dyn CardView>,
    markdown: Arc<dyn MarkdownEngine>,
    typesetter: TypesetCoordinator,
    config: ViewerConfig,
    background: Mutex<Vec<JoinHandle<()>>>,
}

/// Renders the current card and reacts to navigation.
///
/// Clones share the same state. View writes happen while the state lock is
/// held, so `CardView` implementations must not call back into the renderer.
/// Background typesets are tokio tasks; call from within a runtime.
#[derive(Clone)]
pub struct CardRenderer {
    inner: Arc<RendererInner>,
}

fn slot(face: Face) -> usize {
    match face {
        Face::Front => 0,
        Face::Back => 1,
    }
}

impl CardRenderer {
    pub fn new(
        view: Arc<dyn CardView>,
        markdown: Arc<dyn MarkdownEngine>,
        typesetter: Arc<dyn Typesetter>,
        config: ViewerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(RendererInner {
                state: Mutex::new(RenderState::default()),
                view,
                markdown,
                typesetter: TypesetCoordinator::new(typesetter, config.clone()),
                config,
                background: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Replace the deck wholesale, start at the first card and wire the controls.
    pub fn install(&self, deck: Deck) {
        let mut state = self.inner.state();
        // step past the old deck's last generation so its pending typesets go stale
        let generation = state
            .navigator
            .as_ref()
            .map_or(0, |nav| nav.generation().wrapping_add(1));
        let navigator = Navigator::new(deck).with_generation(generation);

        tracing::debug!(cards = navigator.deck().len(), "Installing deck");
        self.inner.view.set_controls(navigator.controls());
        state.navigator = Some(navigator);
        state.rendered = [None, None];
    }

    /// Whether a deck is installed and input is being handled.
    pub fn is_wired(&self) -> bool {
        self.inner.state().navigator.is_some()
    }

    pub fn position(&self) -> Option<Position> {
        self.inner.state().navigator.as_ref().map(|nav| Position {
            index: nav.current_index(),
            len: nav.deck().len(),
            face: nav.face(),
        })
    }

    /// Replace the card display with an error. Face regions are gone after
    /// this, so in-flight typesets for them are retired.
    pub fn show_error(&self, message: &str) {
        let mut state = self.inner.state();
        if let Some(nav) = state.navigator.as_mut() {
            nav.begin_render();
        }
        state.rendered = [None, None];
        self.inner.view.show_error(message);
    }

    /// Render the current card front side up.
    ///
    /// Completes once the visible face has been typeset (or typesetting has
    /// failed); the hidden face is typeset in the background.
    pub async fn render_current(&self) {
        let Some(cycle) = self.prepare_render() else {
            return;
        };

        if let Some(markup) = cycle.front {
            self.inner
                .typeset_face(cycle.generation, Face::Front, markup)
                .await;
        }
        if let Some(markup) = cycle.back {
            self.spawn_typeset(cycle.generation, Face::Back, markup);
        }
    }

    /// Toggle the visible face of the current card. Returns the face now showing.
    pub fn flip(&self) -> Option<Face> {
        let (face, generation, markup) = {
            let mut state = self.inner.state();
            let nav = state.navigator.as_mut()?;
            let face = nav.flip();
            let generation = nav.generation();
            self.inner.view.set_flipped(face == Face::Back);
            (face, generation, state.rendered[slot(face)].clone())
        };

        tracing::debug!(face = face.as_str(), "Flipped card");
        if let Some(markup) = markup {
            self.spawn_typeset(generation, face, markup);
        }
        Some(face)
    }

    /// Move back one card. No-op at the first card.
    pub async fn go_previous(&self) -> bool {
        let moved = self
            .inner
            .state()
            .navigator
            .as_mut()
            .map_or(false, Navigator::go_previous);
        if moved {
            self.render_current().await;
        }
        moved
    }

    /// Move forward one card. No-op at the last card.
    pub async fn go_next(&self) -> bool {
        let moved = self
            .inner
            .state()
            .navigator
            .as_mut()
            .map_or(false, Navigator::go_next);
        if moved {
            self.render_current().await;
        }
        moved
    }

    /// Route a host event. Everything is ignored until a deck is installed.
    pub async fn dispatch(&self, event: UiEvent) -> EventOutcome {
        if !self.is_wired() {
            return EventOutcome::ignored();
        }

        match event {
            UiEvent::CardClicked => {
                self.flip();
                EventOutcome {
                    handled: true,
                    ..EventOutcome::default()
                }
            }
            UiEvent::ControlClicked(control) => {
                match control {
                    Control::Previous => self.go_previous().await,
                    Control::Next => self.go_next().await,
                };
                EventOutcome {
                    handled: true,
                    prevent_default: true,
                    stop_propagation: true,
                }
            }
            UiEvent::Key { key, focus } => match command_for_key(key, focus) {
                Some(Command::Previous) => {
                    self.go_previous().await;
                    EventOutcome {
                        handled: true,
                        ..EventOutcome::default()
                    }
                }
                Some(Command::Next) => {
                    self.go_next().await;
                    EventOutcome {
                        handled: true,
                        ..EventOutcome::default()
                    }
                }
                Some(Command::Flip) => {
                    self.flip();
                    EventOutcome {
                        handled: true,
                        prevent_default: true,
                        stop_propagation: false,
                    }
                }
                None => EventOutcome::ignored(),
            },
        }
    }

    /// Wait for outstanding background typesets.
    pub async fn settle(&self) {
        loop {
            let handles = std::mem::take(&mut *self.inner.background());
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::warn!(error = %e, "Background typeset task failed");
                }
            }
        }
    }

    fn prepare_render(&self) -> Option<RenderCycle> {
        let inner = &self.inner;
        let mut state = inner.state();

        let Some(nav) = state.navigator.as_mut() else {
            inner
                .view
                .set_face(Face::Front, FaceContent::Text(inner.config.no_cards_message.clone()));
            inner.view.set_face(Face::Back, FaceContent::Text(String::new()));
            inner.view.set_controls(Controls::inactive());
            return None;
        };

        nav.reset_face();
        inner.view.set_flipped(false);

        let generation = nav.begin_render();
        let index = nav.current_index();
        let controls = nav.controls();
        let card = nav.current_card().clone();

        let front = inner.render_face(index, Face::Front, &card.front);
        let back = inner.render_face(index, Face::Back, &card.back);
        let cycle = RenderCycle {
            generation,
            front: front.as_markup().map(str::to_owned),
            back: back.as_markup().map(str::to_owned),
        };

        inner.view.set_face(Face::Front, front);
        inner.view.set_face(Face::Back, back);
        inner.view.set_controls(controls);
        state.rendered = [cycle.front.clone(), cycle.back.clone()];

        tracing::debug!(index, generation, "Rendered card");
        Some(cycle)
    }

    fn spawn_typeset(&self, generation: u64, face: Face, markup: String) {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            inner.typeset_face(generation, face, markup).await;
        });

        let mut background = self.inner.background();
        background.retain(|h| !h.is_finished());
        background.push(handle);
    }
}

struct RenderCycle {
    generation: u64,
    front: Option<String>,
    back: Option<String>,
}

impl RendererInner {
    fn state(&self) -> MutexGuard<'_, RenderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn background(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.background.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn render_face(&self, index: usize, face: Face, source: &str) -> FaceContent {
        match self.markdown.render(source) {
            Ok(markup) => FaceContent::Markup(markup),
            Err(e) => {
                tracing::error!(index, face = face.as_str(), error = %e, "Error rendering markdown");
                FaceContent::Text(source.to_string())
            }
        }
    }

    /// Typeset one face and apply the result if its render cycle is still current.
    async fn typeset_face(&self, generation: u64, face: Face, markup: String) {
        match self.typesetter.typeset(&markup).await {
            Ok(typeset) => {
                let state = self.state();
                let current = state
                    .navigator
                    .as_ref()
                    .map_or(false, |nav| nav.is_current(generation));
                if current {
                    self.view.set_face(face, FaceContent::Markup(typeset));
                } else {
                    tracing::debug!(generation, face = face.as_str(), "Discarding stale typeset");
                }
            }
            Err(e) => {
                tracing::warn!(face = face.as_str(), error = %e, "Typeset failed, showing raw markup");
            }
        }
    }
}
