use leptess::LepTess;
use tracing::debug;

use crate::config::OcrConfig;

use super::engine::{EngineError, OcrEngine, OcrSession};

/// Local Tesseract engine. Holds no engine state of its own; every session
/// initialises and frees its own `LepTess` handle.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    tessdata_dir: Option<String>,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            tessdata_dir: config.tessdata_dir.clone(),
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn new_session(&self) -> Box<dyn OcrSession> {
        Box::new(TesseractSession {
            tessdata_dir: self.tessdata_dir.clone(),
            handle: None,
            image_loaded: false,
        })
    }
}

// LepTess can only be built with a language, so the handle is created by
// `set_language` and dropped with the session.
struct TesseractSession {
    tessdata_dir: Option<String>,
    handle: Option<LepTess>,
    image_loaded: bool,
}

impl OcrSession for TesseractSession {
    fn set_language(&mut self, code: &str) -> Result<(), EngineError> {
        if self.handle.is_some() {
            return Err(EngineError::new("session already has a language bound"));
        }

        let lt = LepTess::new(self.tessdata_dir.as_deref(), code).map_err(|e| {
            EngineError::new(format!("Tesseract could not load language '{code}': {e}"))
        })?;
        debug!(language = code, "Tesseract session initialised");
        self.handle = Some(lt);
        Ok(())
    }

    fn set_image(&mut self, image: &[u8]) -> Result<(), EngineError> {
        if self.image_loaded {
            return Err(EngineError::new("session already has an image bound"));
        }
        let lt = self
            .handle
            .as_mut()
            .ok_or_else(|| EngineError::new("no language bound to session"))?;

        lt.set_image_from_mem(image)
            .map_err(|e| EngineError::new(e.to_string()))?;
        self.image_loaded = true;
        Ok(())
    }

    fn extract_text(&mut self) -> Result<String, EngineError> {
        let lt = match self.handle.as_mut() {
            Some(lt) if self.image_loaded => lt,
            _ => return Err(EngineError::new("no image loaded into session")),
        };

        lt.get_utf8_text()
            .map_err(|e| EngineError::new(format!("Failed to extract text: {e}")))
    }
}
