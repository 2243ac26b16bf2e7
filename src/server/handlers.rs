use super::types::{ErrorResponse, HealthResponse, MessageResponse};
use crate::{
    Error,
    chat::{ChatRequest, ChatResponse, ChatService},
    documents::{Document, DocumentCreate, DocumentStore, DocumentUpdate},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub chat: Arc<ChatService>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<T, ApiError>;

fn error_response(e: Error) -> ApiError {
    match e {
        Error::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                detail: "Document not found".to_string(),
            }),
        ),
        e => {
            error!("Request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: "Internal server error".to_string(),
                }),
            )
        }
    }
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to iFlow Backend API".to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

pub async fn create_document(
    State(state): State<AppState>,
    Json(request): Json<DocumentCreate>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    let document = state.store.create(request).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(document)))
}

pub async fn list_documents(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let documents = state.store.list().await.map_err(error_response)?;
    info!("Listing {} documents", documents.len());
    Ok(Json(documents))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Document>> {
    state.store.get(id).await.map(Json).map_err(error_response)
}

pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<DocumentUpdate>,
) -> ApiResult<Json<Document>> {
    state
        .store
        .update(id, request)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.delete(id).await.map_err(error_response)?;
    Ok(Json(MessageResponse {
        message: format!("Document {} deleted successfully", id),
    }))
}

pub async fn chat_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(state.chat.respond(request).await)
}
