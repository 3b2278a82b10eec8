pub mod api;
pub mod config;
pub mod error;
pub mod language;
pub mod ocr;
pub mod server;
