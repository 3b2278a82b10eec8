use std::sync::Arc;

use tracing::warn;

use crate::config::OcrConfig;
use crate::error::{GatewayError, Result};
use crate::language::Language;

use super::engine::{OcrEngine, UnavailableEngine};

/// Image bytes and the language to read them in, owned by one request.
#[derive(Debug, Clone)]
pub struct OcrRequest {
    pub image: Vec<u8>,
    pub language: Language,
}

/// Runs one recognition on a fresh session.
///
/// The session lives on this stack frame, so it is released when the function
/// returns, whichever step failed. Text comes back exactly as the engine
/// produced it.
pub fn recognize(engine: &dyn OcrEngine, image: &[u8], language: Language) -> Result<String> {
    let mut session = engine.new_session();

    session
        .set_language(language.code())
        .map_err(|e| GatewayError::LanguageConfiguration(e.to_string()))?;
    session
        .set_image(image)
        .map_err(|e| GatewayError::ImageLoad(e.to_string()))?;
    session
        .extract_text()
        .map_err(|e| GatewayError::Recognition(e.to_string()))
}

#[derive(Clone)]
pub struct OcrProvider {
    engine: Arc<dyn OcrEngine>,
}

impl OcrProvider {
    /// Builds the provider for the compiled-in engine.
    pub fn new(config: &OcrConfig) -> Self {
        #[cfg(feature = "tesseract")]
        {
            tracing::info!(
                tessdata_dir = config.tessdata_dir.as_deref().unwrap_or("<default>"),
                "Tesseract OCR engine selected"
            );
            Self::with_engine(Arc::new(super::TesseractEngine::new(config)))
        }

        #[cfg(not(feature = "tesseract"))]
        {
            let _ = config;
            let reason = "Tesseract support not compiled in (enable the `tesseract` feature)";
            warn!("{}", reason);
            Self::with_engine(Arc::new(UnavailableEngine::new(reason)))
        }
    }

    pub fn with_engine(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!("OCR unavailable: {}", reason);
        Self::with_engine(Arc::new(UnavailableEngine::new(reason)))
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Recognises on tokio's blocking pool. There is no deadline of its own:
    /// if the caller goes away the engine call still runs to completion.
    pub async fn ocr(&self, request: OcrRequest) -> Result<String> {
        let engine = Arc::clone(&self.engine);
        let OcrRequest { image, language } = request;

        tokio::task::spawn_blocking(move || recognize(engine.as_ref(), &image, language))
            .await
            .map_err(|e| GatewayError::Recognition(format!("OCR task panicked: {e}")))?
    }
}
