use crate::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, warn};

pub const TIMEOUT_REPLY: &str = "抱歉，请求超时，请稍后再试。";
pub const UNAVAILABLE_REPLY: &str = "抱歉，AI助手暂时无法回应，请稍后再试。";

/// One completion call per reply. Failures never reach the caller; they
/// become one of the fixed placeholder replies.
pub struct CompletionGateway {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
    temperature: Option<f32>,
}

impl CompletionGateway {
    pub fn new(client: Arc<dyn LlmClient>, timeout: Duration, temperature: Option<f32>) -> Self {
        Self {
            client,
            timeout,
            temperature,
        }
    }

    pub async fn reply(&self, messages: Vec<ChatMessage>) -> String {
        match self.complete(messages).await {
            Ok(reply) => reply,
            Err(e) if e.is_timeout() => {
                warn!("Chat completion timed out after {:?}", self.timeout);
                TIMEOUT_REPLY.to_string()
            }
            Err(e) => {
                error!("Chat completion failed: {}", e);
                UNAVAILABLE_REPLY.to_string()
            }
        }
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatCompletionRequest {
            messages,
            temperature: self.temperature,
        };

        let response = tokio::time::timeout(
            self.timeout,
            self.client.create_chat_completion(request),
        )
        .await
        .map_err(|_| Error::Timeout)??;

        debug!(
            "Completion {} from {} (usage: {:?})",
            response.id, response.model, response.usage
        );

        response
            .reply_text()
            .map(str::to_string)
            .ok_or_else(|| Error::llm("completion contained no reply text"))
    }
}
