//! OCR (Optical Character Recognition) Module
//!
//! Hands uploaded image bytes to an external recognition engine and returns
//! whatever text it produced.
//!
//! # Architecture
//!
//! - `OcrEngine` / `OcrSession` traits define the narrow engine contract:
//!   set language, set image, extract text
//! - `TesseractEngine` implements it via leptess (feature `tesseract`)
//! - `UnavailableEngine` stands in when no engine could be provided
//! - `OcrProvider` runs one fresh session per request on the blocking pool
//!
//! Sessions are never pooled or shared. A session is dropped, and with it the
//! engine handle released, on every return path of [`recognize`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr);
//! let text = ocr.ocr(OcrRequest { image, language }).await?;
//! ```

mod engine;
mod provider;
#[cfg(feature = "tesseract")]
mod tesseract;

pub use engine::{EngineError, OcrEngine, OcrSession, UnavailableEngine};
pub use provider::{recognize, OcrProvider, OcrRequest};
#[cfg(feature = "tesseract")]
pub use tesseract::TesseractEngine;
