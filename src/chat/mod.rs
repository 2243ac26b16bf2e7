mod context;
mod gateway;
mod types;

pub use context::{ContextAssembler, build_messages, document_addendum};
pub use gateway::{CompletionGateway, TIMEOUT_REPLY, UNAVAILABLE_REPLY};
pub use types::*;

use crate::{config::LlmConfig, documents::DocumentStore, llm::LlmClient};
use std::sync::Arc;
use tracing::info;

/// Context assembly followed by a single completion call.
pub struct ChatService {
    assembler: ContextAssembler,
    gateway: CompletionGateway,
}

impl ChatService {
    pub fn new(store: Arc<DocumentStore>, client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            assembler: ContextAssembler::new(store, config.system_prompt.clone()),
            gateway: CompletionGateway::new(client, config.timeout(), config.temperature),
        }
    }

    pub async fn respond(&self, request: ChatRequest) -> ChatResponse {
        info!(
            "Chat request with {} messages, document: {:?}",
            request.messages.len(),
            request.document_id
        );

        let messages = self
            .assembler
            .assemble(&request.messages, request.document_id)
            .await;
        let reply = self.gateway.reply(messages).await;

        ChatResponse {
            message: ChatMessage::assistant(reply),
        }
    }
}
