use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document not found: {id}")]
    NotFound { id: u64 },

    #[error("Corrupt document {id}: {reason}")]
    CorruptEntry { id: u64, reason: String },

    #[error("No document id left after {max}")]
    IdsExhausted { max: u64 },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM request timed out")]
    Timeout,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn corrupt(id: u64, reason: impl Into<String>) -> Self {
        Self::CorruptEntry {
            id,
            reason: reason.into(),
        }
    }

    /// True for failures caused by the completion call running out of time,
    /// whether detected by our own deadline or by the HTTP client.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::Network(e) => e.is_timeout(),
            Self::OpenAi(async_openai::error::OpenAIError::Reqwest(e)) => e.is_timeout(),
            _ => false,
        }
    }
}
