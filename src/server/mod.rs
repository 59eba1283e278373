// Sage HTTP server
//
// Thin axum surface over the AI dispatch service. All state is built once
// at startup and shared read-only; requests are independent and the server
// imposes no concurrency ceiling of its own.

mod cors;
mod handlers;
mod types;

pub use handlers::create_router;
pub use types::{
    ClassifyChatRequest, ClassifyChatResponse, ErrorBody, GenerateContentRequest,
    GenerateContentResponse, GenerateQuizRequest, HealthResponse, Limits, ResolveDoubtRequest,
    TeachingContentRequest,
};

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;

use crate::ai::AiService;
use crate::config::Config;
use crate::error::AiError;
use handlers::ApiError;

/// Shared per-process state: the dispatch service plus the configuration it
/// was built from.
pub struct AppState {
    pub ai: AiService,
    pub config: Config,
}

impl AppState {
    /// Map a service error using this deployment's detail-exposure policy.
    pub(crate) fn api_error(&self, err: AiError, route_error: &'static str) -> ApiError {
        ApiError::from_ai(err, route_error, self.config.is_development())
    }
}

/// The tutor backend server.
pub struct TutorServer {
    state: Arc<AppState>,
}

impl TutorServer {
    pub fn new(config: Config) -> Result<Self> {
        let ai = AiService::from_config(&config)?;
        Ok(Self {
            state: Arc::new(AppState { ai, config }),
        })
    }

    pub async fn serve(self) -> Result<()> {
        let addr = self.state.config.bind_address.clone();
        let app = create_router(Arc::clone(&self.state));

        tracing::info!(%addr, "starting sage tutor server");

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}
