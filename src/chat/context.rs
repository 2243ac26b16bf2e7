use super::ChatMessage;
use crate::{documents::DocumentStore, llm};
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds the message list for the model: one system entry, optionally carrying
/// the document being edited, followed by the non-blank conversation.
pub struct ContextAssembler {
    store: Arc<DocumentStore>,
    system_prompt: String,
}

impl ContextAssembler {
    pub fn new(store: Arc<DocumentStore>, system_prompt: String) -> Self {
        Self {
            store,
            system_prompt,
        }
    }

    pub async fn assemble(
        &self,
        messages: &[ChatMessage],
        document_id: Option<u64>,
    ) -> Vec<llm::ChatMessage> {
        // An id of 0 never names a document.
        let context = match document_id.filter(|id| *id > 0) {
            Some(id) => self.document_context(id).await,
            None => String::new(),
        };

        build_messages(&self.system_prompt, &context, messages)
    }

    async fn document_context(&self, id: u64) -> String {
        match self.store.get(id).await {
            Ok(document) => {
                debug!("Using document {} as chat context", id);
                document.content
            }
            Err(e) => {
                warn!("Document {} unavailable for chat context: {}", id, e);
                String::new()
            }
        }
    }
}

pub fn document_addendum(content: &str) -> String {
    format!("\n\n用户正在编辑的文档内容如下：\n{content}")
}

pub fn build_messages(
    system_prompt: &str,
    context: &str,
    messages: &[ChatMessage],
) -> Vec<llm::ChatMessage> {
    let mut system = system_prompt.to_string();
    if !context.is_empty() {
        system.push_str(&document_addendum(context));
    }

    std::iter::once(llm::ChatMessage::system(system))
        .chain(
            messages
                .iter()
                .filter(|msg| !msg.content.trim().is_empty())
                .map(|msg| llm::ChatMessage::new(msg.role.as_str(), msg.content.clone())),
        )
        .collect()
}
