#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::Router;

use ocr_gateway::api::{create_router, AppState};
use ocr_gateway::config::{Config, OcrConfig, ServerConfig};
use ocr_gateway::ocr::{EngineError, OcrEngine, OcrProvider, OcrSession};

pub const BOUNDARY: &str = "ocr-gateway-test-boundary";

/// Which step of a fake session should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    None,
    Language,
    Image,
    Text,
}

/// In-memory engine: returns canned text, records the languages it was asked
/// for and counts how many sessions were opened and released.
#[derive(Clone)]
pub struct FakeEngine {
    pub text: String,
    pub failure: Failure,
    pub delay: Option<Duration>,
    pub opened: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
    pub languages: Arc<Mutex<Vec<String>>>,
}

impl FakeEngine {
    pub fn returning(text: &str) -> Self {
        Self {
            text: text.to_string(),
            failure: Failure::None,
            delay: None,
            opened: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(AtomicUsize::new(0)),
            languages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure,
            ..Self::returning("")
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn languages(&self) -> Vec<String> {
        self.languages.lock().unwrap().clone()
    }
}

struct FakeSession {
    engine: FakeEngine,
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.engine.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl OcrSession for FakeSession {
    fn set_language(&mut self, code: &str) -> Result<(), EngineError> {
        self.engine.languages.lock().unwrap().push(code.to_string());
        match self.engine.failure {
            Failure::Language => Err(EngineError::new(format!("no traineddata for {code}"))),
            _ => Ok(()),
        }
    }

    fn set_image(&mut self, _image: &[u8]) -> Result<(), EngineError> {
        match self.engine.failure {
            Failure::Image => Err(EngineError::new("image format not recognized")),
            _ => Ok(()),
        }
    }

    fn extract_text(&mut self) -> Result<String, EngineError> {
        if let Some(delay) = self.engine.delay {
            std::thread::sleep(delay);
        }
        match self.engine.failure {
            Failure::Text => Err(EngineError::new("recognition failed")),
            _ => Ok(self.engine.text.clone()),
        }
    }
}

impl OcrEngine for FakeEngine {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn new_session(&self) -> Box<dyn OcrSession> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Box::new(FakeSession {
            engine: self.clone(),
        })
    }
}

pub fn test_config(max_upload_size_mb: i64, timeout_secs: i64) -> Config {
    Config {
        server: ServerConfig {
            port: "0".to_string(),
            timeout_secs,
            max_upload_size_mb,
        },
        ocr: OcrConfig::default(),
    }
}

pub fn app_with(engine: &FakeEngine, config: Config) -> Router {
    let provider = OcrProvider::with_engine(Arc::new(engine.clone()));
    create_router(AppState::new(config, provider))
}

pub fn app(engine: &FakeEngine) -> Router {
    app_with(engine, test_config(10, 30))
}

/// One part of a `multipart/form-data` body.
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn file_part(bytes: &[u8]) -> Part<'_> {
    Part::File {
        name: "file",
        filename: "scan.png",
        bytes,
    }
}

pub fn lang_part(value: &str) -> Part<'_> {
    Part::Text {
        name: "lang",
        value,
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn ocr_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn content_type(response: &axum::response::Response) -> String {
    response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
