//! Loader-to-renderer wiring.

use std::sync::Arc;

use crate::config::ViewerConfig;
use crate::error::LoadError;
use crate::loader::DeckLoader;
use crate::markdown::MarkdownEngine;
use crate::renderer::CardRenderer;
use crate::typeset::Typesetter;
use crate::view::CardView;

/// A deck loader paired with the renderer it feeds.
#[derive(Clone)]
pub struct FlashcardViewer {
    loader: DeckLoader,
    renderer: CardRenderer,
    config: ViewerConfig,
}

impl FlashcardViewer {
    pub fn new(loader: DeckLoader, renderer: CardRenderer, config: ViewerConfig) -> Self {
        Self {
            loader,
            renderer,
            config,
        }
    }

    /// Viewer that fetches decks over HTTP.
    pub fn http(
        view: Arc<dyn CardView>,
        markdown: Arc<dyn MarkdownEngine>,
        typesetter: Arc<dyn Typesetter>,
        config: ViewerConfig,
    ) -> Self {
        let loader = DeckLoader::http(&config);
        let renderer = CardRenderer::new(view, markdown, typesetter, config.clone());
        Self::new(loader, renderer, config)
    }

    pub fn renderer(&self) -> &CardRenderer {
        &self.renderer
    }

    /// Load a deck and show its first card.
    ///
    /// On failure the error replaces the card display and any previously
    /// loaded deck keeps its navigation state.
    pub async fn load(&self, source: &str) -> Result<(), LoadError> {
        match self.loader.load(source).await {
            Ok(deck) => {
                self.renderer.install(deck);
                self.renderer.render_current().await;
                Ok(())
            }
            Err(e) => {
                self.renderer
                    .show_error(&format!("{}: {}", self.config.load_error_prefix, e));
                Err(e)
            }
        }
    }
}
