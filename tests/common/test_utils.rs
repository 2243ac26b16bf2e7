use super::mocks::MockLlmClient;
use iflow_backend::{
    chat::ChatService,
    config::LlmConfig,
    documents::DocumentStore,
    server::handlers::AppState,
};
use std::sync::Arc;
use tempfile::TempDir;

pub fn create_test_llm_config(base_url: &str) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "qwen-plus".to_string(),
        system_prompt: "You are a helpful assistant.".to_string(),
        timeout_secs: 30,
        temperature: None,
    }
}

/// Create a store inside a fresh temporary directory
pub fn create_test_store() -> (TempDir, Arc<DocumentStore>) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let store = Arc::new(DocumentStore::new(temp_dir.path().join("documents")));
    (temp_dir, store)
}

pub fn create_chat_service(store: Arc<DocumentStore>, client: MockLlmClient) -> ChatService {
    let config = create_test_llm_config("http://unused.invalid");
    ChatService::new(store, Arc::new(client), &config)
}

pub fn create_app_state(store: Arc<DocumentStore>, client: MockLlmClient) -> AppState {
    let chat = create_chat_service(Arc::clone(&store), client);
    AppState {
        store,
        chat: Arc::new(chat),
    }
}

/// Overwrites a document file with arbitrary bytes
pub fn corrupt_document(store: &DocumentStore, id: u64, bytes: &[u8]) {
    std::fs::create_dir_all(store.dir()).unwrap();
    std::fs::write(store.dir().join(format!("{id}.json")), bytes).unwrap();
}
