// HTTP handlers
//
// Each handler checks for required fields (missing, not empty; emptiness is
// the service layer's call), resolves the model choice, invokes the service,
// and maps the outcome to HTTP. Error-to-HTTP mapping happens here and
// nowhere else.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use super::cors::cors_layer;
use super::types::{
    ClassifyChatRequest, ClassifyChatResponse, ErrorBody, GenerateContentRequest,
    GenerateContentResponse, GenerateQuizRequest, HealthResponse, Limits, ResolveDoubtRequest,
    TeachingContentRequest,
};
use super::AppState;
use crate::ai::tasks::{
    ClassifyParams, DoubtParams, DoubtResolution, Quiz, QuizParams, TeachingContent,
    TeachingParams,
};
use crate::config::constants::MAX_PROMPT_LENGTH;
use crate::error::AiError;
use crate::providers::ModelChoice;

/// Request bodies are bounded prompts plus small metadata; 1 MiB is plenty.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate-content", post(generate_content))
        .route("/api/resolve-doubt", post(resolve_doubt))
        .route("/api/generate-teaching-content", post(generate_teaching_content))
        .route("/api/generate-quiz", post(generate_quiz))
        .route("/api/classify-chat", post(classify_chat))
        .fallback(not_found)
        .layer(cors_layer(&state.config))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Handler-layer error: already mapped to a status and user-facing body.
pub struct ApiError {
    status: StatusCode,
    error: String,
    detail: Option<String>,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.into(),
            detail: None,
        }
    }

    /// Map a service error. Input errors surface their literal message with
    /// 400; everything else becomes a 500 with the route's generic message,
    /// carrying detail only outside production.
    pub(crate) fn from_ai(err: AiError, route_error: &'static str, expose_detail: bool) -> Self {
        if err.is_input_error() {
            Self::bad_request(err.to_string())
        } else {
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: route_error.to_string(),
                detail: expose_detail.then(|| err.to_string()),
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            message: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        models: state.ai.model_status(),
        limits: Limits {
            max_prompt_length: MAX_PROMPT_LENGTH,
        },
    })
}

async fn generate_content(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateContentRequest>,
) -> Result<Json<GenerateContentResponse>, ApiError> {
    let Some(prompt) = body.prompt else {
        return Err(ApiError::bad_request("Prompt is required"));
    };
    let model = ModelChoice::from_name(body.model.as_deref());
    let content = state
        .ai
        .generate_content(&prompt, model)
        .await
        .map_err(|e| state.api_error(e, "Failed to generate content"))?;
    Ok(Json(GenerateContentResponse { content, model }))
}

async fn resolve_doubt(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ResolveDoubtRequest>,
) -> Result<Json<DoubtResolution>, ApiError> {
    let Some(question) = body.question else {
        return Err(ApiError::bad_request("Question is required"));
    };
    let model = ModelChoice::from_name(body.model.as_deref());
    let params = DoubtParams {
        question,
        context: body.context,
        curriculum: body.curriculum,
    };
    let resolution = state
        .ai
        .resolve_doubt(&params, model)
        .await
        .map_err(|e| state.api_error(e, "Failed to resolve doubt"))?;
    Ok(Json(resolution))
}

async fn generate_teaching_content(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TeachingContentRequest>,
) -> Result<Json<TeachingContent>, ApiError> {
    if body.topic.is_none() && body.prompt.is_none() {
        return Err(ApiError::bad_request("Topic or prompt is required"));
    }
    let model = ModelChoice::from_name(body.model.as_deref());
    let params = TeachingParams {
        topic: body.topic.unwrap_or_default(),
        curriculum: body.curriculum,
        prompt: body.prompt,
    };
    let content = state
        .ai
        .teaching_content(&params, model)
        .await
        .map_err(|e| state.api_error(e, "Failed to generate teaching content"))?;
    Ok(Json(content))
}

async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateQuizRequest>,
) -> Result<Json<Quiz>, ApiError> {
    let Some(topic) = body.topic else {
        return Err(ApiError::bad_request("Topic is required"));
    };
    let model = ModelChoice::from_name(body.model.as_deref());
    let params = QuizParams {
        topic,
        context: body.context,
    };
    let quiz = state
        .ai
        .generate_quiz(&params, model)
        .await
        .map_err(|e| state.api_error(e, "Failed to generate quiz"))?;
    Ok(Json(quiz))
}

/// Classification never errors to the caller: a missing message, provider
/// failure, or junk reply all degrade to general chat mode.
async fn classify_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClassifyChatRequest>,
) -> Json<ClassifyChatResponse> {
    let model = ModelChoice::from_name(body.model.as_deref());
    let params = ClassifyParams {
        message: body.message.unwrap_or_default(),
        topic_name: body.topic_name,
        subject_name: body.subject_name,
    };
    let mode = state.ai.classify_chat(&params, model).await;
    Json(ClassifyChatResponse { mode })
}

async fn not_found() -> Response {
    let body = ErrorBody {
        error: "Not found".to_string(),
        message: None,
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
