pub mod handlers;
pub mod types;

use crate::{
    Result, chat::ChatService, config::Config, documents::DocumentStore, llm::OpenAiClient,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/api/documents",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route(
            "/api/documents/",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route(
            "/api/documents/:id",
            get(handlers::get_document)
                .put(handlers::update_document)
                .delete(handlers::delete_document),
        )
        .route("/api/chat/message", post(handlers::chat_message))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let store = Arc::new(DocumentStore::new(&config.server.documents_dir));
    info!("Storing documents in {}", config.server.documents_dir);

    let client = Arc::new(OpenAiClient::new(config.llm.clone())?);
    let chat = ChatService::new(Arc::clone(&store), client, &config.llm);

    let app = router(AppState {
        store,
        chat: Arc::new(chat),
    });

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
