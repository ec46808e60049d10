//! Deck loading: one fetch, then validation.

use std::sync::Arc;

use async_trait::async_trait;
use deck_core::{parse_deck, Deck};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;

use crate::config::ViewerConfig;
use crate::error::{LoadError, TransportError};

/// Fetches raw deck bytes from wherever the host keeps them.
#[async_trait]
pub trait DeckTransport: Send + Sync {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>, TransportError>;
}

/// HTTP transport. Never retries; callers decide whether to load again.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    bypass_cache: bool,
}

impl HttpTransport {
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ViewerConfig) -> Self {
        Self {
            client,
            bypass_cache: config.bypass_cache,
        }
    }
}

#[async_trait]
impl DeckTransport for HttpTransport {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>, TransportError> {
        let mut request = self.client.get(source);
        if self.bypass_cache {
            request = request
                .header(CACHE_CONTROL, "no-store")
                .header(PRAGMA, "no-cache");
        }

        let resp = request.send().await.map_err(|e| TransportError::Request {
            reason: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = resp.bytes().await.map_err(|e| TransportError::Body {
            reason: e.to_string(),
        })?;
        Ok(body.to_vec())
    }
}

/// Turns a deck source into a validated deck.
#[derive(Clone)]
pub struct DeckLoader {
    transport: Arc<dyn DeckTransport>,
}

impl DeckLoader {
    pub fn new(transport: Arc<dyn DeckTransport>) -> Self {
        Self { transport }
    }

    /// Loader backed by [`HttpTransport`].
    pub fn http(config: &ViewerConfig) -> Self {
        Self::new(Arc::new(HttpTransport::new(config)))
    }

    /// Fetch exactly once and validate the payload.
    pub async fn load(&self, source: &str) -> Result<Deck, LoadError> {
        let result = self.fetch_and_parse(source).await;
        match &result {
            Ok(deck) => tracing::info!(source, cards = deck.len(), "Loaded deck"),
            Err(e) => tracing::error!(source, error = %e, "Failed to load flashcards"),
        }
        result
    }

    async fn fetch_and_parse(&self, source: &str) -> Result<Deck, LoadError> {
        let payload = self.transport.fetch(source).await?;
        Ok(parse_deck(&payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::ValidationError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticTransport {
        response: Result<Vec<u8>, TransportError>,
        calls: AtomicUsize,
    }

    impl StaticTransport {
        fn new(response: Result<Vec<u8>, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl DeckTransport for StaticTransport {
        async fn fetch(&self, _source: &str) -> Result<Vec<u8>, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn load_valid_deck() {
        let transport = StaticTransport::new(Ok(br#"[{"front":"Q","back":"A"}]"#.to_vec()));
        let loader = DeckLoader::new(transport.clone());

        let deck = loader.load("cards.json").await.unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transport_failure_is_not_retried() {
        let transport = StaticTransport::new(Err(TransportError::Request {
            reason: "connection refused".to_string(),
        }));
        let loader = DeckLoader::new(transport.clone());

        let result = loader.load("cards.json").await;
        assert!(matches!(result, Err(LoadError::Transport(_))));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_payload_is_validation_error() {
        let loader = DeckLoader::new(StaticTransport::new(Ok(b"[]".to_vec())));
        let result = loader.load("cards.json").await;
        assert_eq!(result, Err(LoadError::Validation(ValidationError::Empty)));
    }
}
