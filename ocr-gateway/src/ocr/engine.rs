use thiserror::Error;

/// Failure reported by an engine session. The caller decides which request
/// error it becomes based on the step that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// One recognition call against the engine: one language, one image, one
/// text extraction. Dropping the session releases the engine handle.
pub trait OcrSession {
    fn set_language(&mut self, code: &str) -> Result<(), EngineError>;

    fn set_image(&mut self, image: &[u8]) -> Result<(), EngineError>;

    fn extract_text(&mut self) -> Result<String, EngineError>;
}

pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Opens a fresh, unconfigured session.
    fn new_session(&self) -> Box<dyn OcrSession>;
}

/// Engine used when no backend could be set up. Every session fails at the
/// language step with the stored reason.
#[derive(Debug, Clone)]
pub struct UnavailableEngine {
    reason: String,
}

impl UnavailableEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

struct UnavailableSession {
    reason: String,
}

impl OcrSession for UnavailableSession {
    fn set_language(&mut self, _code: &str) -> Result<(), EngineError> {
        Err(EngineError::new(self.reason.clone()))
    }

    fn set_image(&mut self, _image: &[u8]) -> Result<(), EngineError> {
        Err(EngineError::new(self.reason.clone()))
    }

    fn extract_text(&mut self) -> Result<String, EngineError> {
        Err(EngineError::new(self.reason.clone()))
    }
}

impl OcrEngine for UnavailableEngine {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn new_session(&self) -> Box<dyn OcrSession> {
        Box::new(UnavailableSession {
            reason: self.reason.clone(),
        })
    }
}
