//! Shared test doubles for viewer integration tests.
//!
//! - RecordingView captures everything the renderer writes
//! - MemoryTransport serves a fixed payload without a network
//! - Markdown and typesetting engines with scripted failures

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use deck_core::{Controls, Face};
use deck_viewer::{
    CardRenderer, CardView, CmarkEngine, DeckLoader, DeckTransport, FaceContent, FlashcardViewer,
    MarkdownEngine, RenderError, TransportError, TypesetError, Typesetter, ViewerConfig,
};
use tokio::sync::Semaphore;

pub const EXAMPLE_DECK: &str = r#"[{"front":"**A**","back":"B"},{"front":"C","back":"D"}]"#;

/// Everything the renderer has written to the view.
#[derive(Debug, Clone, Default)]
pub struct ViewLog {
    pub front: Option<FaceContent>,
    pub back: Option<FaceContent>,
    pub flipped: bool,
    pub controls: Option<Controls>,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct RecordingView {
    log: Mutex<ViewLog>,
}

impl RecordingView {
    pub fn snapshot(&self) -> ViewLog {
        self.log.lock().unwrap().clone()
    }
}

impl CardView for RecordingView {
    fn set_face(&self, face: Face, content: FaceContent) {
        let mut log = self.log.lock().unwrap();
        match face {
            Face::Front => log.front = Some(content),
            Face::Back => log.back = Some(content),
        }
    }

    fn set_flipped(&self, flipped: bool) {
        self.log.lock().unwrap().flipped = flipped;
    }

    fn set_controls(&self, controls: Controls) {
        self.log.lock().unwrap().controls = Some(controls);
    }

    fn show_error(&self, message: &str) {
        self.log.lock().unwrap().error = Some(message.to_string());
    }
}

/// Serves one fixed response per fetch.
pub struct MemoryTransport {
    response: Mutex<Result<Vec<u8>, TransportError>>,
    pub calls: AtomicUsize,
}

impl MemoryTransport {
    pub fn ok(payload: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(payload.as_bytes().to_vec())),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn replace(&self, response: Result<Vec<u8>, TransportError>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeckTransport for MemoryTransport {
    async fn fetch(&self, _source: &str) -> Result<Vec<u8>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.lock().unwrap().clone()
    }
}

/// CommonMark, except sources containing `BROKEN` fail.
pub struct FlakyMarkdown;

impl MarkdownEngine for FlakyMarkdown {
    fn render(&self, source: &str) -> Result<String, RenderError> {
        if source.contains("BROKEN") {
            return Err(RenderError("engine threw".to_string()));
        }
        CmarkEngine.render(source)
    }
}

/// Wraps markup in `<mjx>` so applied results are visible. Markup containing
/// `slow` waits until [`GatedTypesetter::release`] is called.
pub struct GatedTypesetter {
    gate: Semaphore,
    pub typeset_calls: AtomicUsize,
}

impl GatedTypesetter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            typeset_calls: AtomicUsize::new(0),
        })
    }

    pub fn release(&self) {
        self.gate.add_permits(1024);
    }
}

#[async_trait]
impl Typesetter for GatedTypesetter {
    async fn ready(&self) -> Result<(), TypesetError> {
        Ok(())
    }

    async fn typeset(&self, markup: &str) -> Result<String, TypesetError> {
        self.typeset_calls.fetch_add(1, Ordering::SeqCst);
        if markup.contains("slow") {
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| TypesetError::Engine(e.to_string()))?;
        }
        Ok(typeset(markup))
    }
}

pub fn typeset(markup: &str) -> String {
    format!("<mjx>{}</mjx>", markup)
}

/// Readiness never resolves.
pub struct HungTypesetter;

#[async_trait]
impl Typesetter for HungTypesetter {
    async fn ready(&self) -> Result<(), TypesetError> {
        std::future::pending().await
    }

    async fn typeset(&self, markup: &str) -> Result<String, TypesetError> {
        Ok(typeset(markup))
    }
}

/// Ready, but every typeset fails.
pub struct BrokenTypesetter;

#[async_trait]
impl Typesetter for BrokenTypesetter {
    async fn ready(&self) -> Result<(), TypesetError> {
        Ok(())
    }

    async fn typeset(&self, _markup: &str) -> Result<String, TypesetError> {
        Err(TypesetError::Engine("Math input error".to_string()))
    }
}

pub struct Harness {
    pub viewer: FlashcardViewer,
    pub view: Arc<RecordingView>,
    pub transport: Arc<MemoryTransport>,
}

impl Harness {
    pub fn new(
        payload: &str,
        markdown: Arc<dyn MarkdownEngine>,
        typesetter: Arc<dyn Typesetter>,
    ) -> Self {
        let config = ViewerConfig::default();
        let view = Arc::new(RecordingView::default());
        let transport = MemoryTransport::ok(payload);
        let renderer = CardRenderer::new(view.clone(), markdown, typesetter, config.clone());
        let viewer = FlashcardViewer::new(DeckLoader::new(transport.clone()), renderer, config);
        Self {
            viewer,
            view,
            transport,
        }
    }

    /// CommonMark with the gated typesetter.
    pub fn standard(payload: &str) -> (Self, Arc<GatedTypesetter>) {
        let typesetter = GatedTypesetter::new();
        let harness = Self::new(payload, Arc::new(CmarkEngine), typesetter.clone());
        (harness, typesetter)
    }

    pub fn renderer(&self) -> &CardRenderer {
        self.viewer.renderer()
    }
}

pub fn markup(text: &str) -> Option<FaceContent> {
    Some(FaceContent::Markup(text.to_string()))
}
