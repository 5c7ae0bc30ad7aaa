use crate::app::AppState;
use crate::domain::model::{GenerationResult, HomeResponse, ProductInput};
use crate::utils::error::{PostgenError, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::Value;

pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        hello: "world".to_string(),
        timestamp: Utc::now(),
    })
}

/// `POST /api/generate`
///
/// The body is parsed here rather than by the `Json` extractor, so a
/// malformed body, a missing content type or a missing `product` key all
/// surface as [`PostgenError`] and share the generic 500 response.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResult>> {
    let mut body: Value = serde_json::from_slice(&body)?;
    let product = body
        .get_mut("product")
        .map(Value::take)
        .ok_or_else(|| PostgenError::missing_field("product"))?;
    let product: ProductInput = serde_json::from_value(product)?;

    tracing::info!("📝 Generating posts for {}", product.name);
    let posts = state.generator.generate(&product).await?;
    tracing::info!("✅ Generated {} posts for {}", posts.len(), product.name);
    for post in &posts {
        tracing::debug!(
            "{}: {}",
            post.platform().unwrap_or("<no platform>"),
            post.content().unwrap_or("<no content>")
        );
    }

    Ok(Json(GenerationResult::new(posts)))
}

impl IntoResponse for PostgenError {
    fn into_response(self) -> Response {
        tracing::error!("❌ Request failed: {}", self);
        tracing::error!("💡 {}", self.recovery_suggestion());

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Internal Server Error" })),
        )
            .into_response()
    }
}
