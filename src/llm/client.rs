use super::types::*;
use crate::{Result, config::LlmConfig};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

/// Client for any OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let timeout = config.timeout();
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url);
        }

        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        // One attempt per call; rate limits surface as errors instead of being retried.
        let no_retry = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(no_retry);

        Ok(Self {
            client,
            model: config.model,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            "Creating chat completion with {} messages",
            request.messages.len()
        );

        let mut messages = Vec::new();
        for msg in &request.messages {
            messages.push(msg.to_openai_message()?);
        }

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(messages);

        if let Some(temperature) = request.temperature {
            request_builder.temperature(temperature);
        }

        let openai_request = request_builder.build()?;

        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let choices: Vec<Choice> = response
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                message: ChatMessage::assistant(choice.message.content.unwrap_or_default()),
                finish_reason: choice.finish_reason.map(|fr| format!("{fr:?}")),
            })
            .collect();

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::types::ChatCompletionRequestMessage;
    use pretty_assertions::assert_eq;

    fn create_test_config() -> LlmConfig {
        LlmConfig {
            base_url: "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string(),
            api_key: "test-api-key".to_string(),
            model: "qwen-plus".to_string(),
            system_prompt: "Test prompt".to_string(),
            timeout_secs: 30,
            temperature: None,
        }
    }

    #[test]
    fn test_openai_client_creation() {
        let client = OpenAiClient::new(create_test_config()).unwrap();
        assert_eq!(client.model, "qwen-plus");
    }

    #[test]
    fn test_openai_client_with_empty_base_url() {
        let mut config = create_test_config();
        config.base_url = String::new();

        let client = OpenAiClient::new(config).unwrap();
        assert_eq!(client.model, "qwen-plus");
    }

    #[test]
    fn test_chat_message_to_openai_roles() {
        assert!(matches!(
            ChatMessage::system("You are a helpful assistant")
                .to_openai_message()
                .unwrap(),
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            ChatMessage::user("Hello").to_openai_message().unwrap(),
            ChatCompletionRequestMessage::User(_)
        ));
        assert!(matches!(
            ChatMessage::assistant("Hi!").to_openai_message().unwrap(),
            ChatCompletionRequestMessage::Assistant(_)
        ));
    }

    #[test]
    fn test_chat_message_invalid_role() {
        let result = ChatMessage::new("tool", "This should fail").to_openai_message();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Unknown message role")
        );
    }

    #[test]
    fn test_reply_text_skips_blank_choice() {
        let response = ChatCompletionResponse {
            id: "chatcmpl-123".to_string(),
            model: "qwen-plus".to_string(),
            choices: vec![Choice {
                index: 0,
                message: ChatMessage::assistant("  "),
                finish_reason: Some("Stop".to_string()),
            }],
            usage: None,
        };
        assert_eq!(response.reply_text(), None);

        let empty = ChatCompletionResponse {
            choices: vec![],
            ..response
        };
        assert_eq!(empty.reply_text(), None);
    }
}
