pub mod chat;
pub mod config;
pub mod documents;
pub mod error;
pub mod llm;
pub mod server;
pub mod timestamp;

pub use error::{Error, Result};
