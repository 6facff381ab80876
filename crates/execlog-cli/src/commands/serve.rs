use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use execlog_intercept::HttpLogLayer;
use execlog_mask::{MaskDirective, MaskedType};
use serde_json::{Value, json};
use std::collections::HashMap;
use tokio::net::TcpListener;

pub async fn handle(port: u16) -> Result<()> {
    let app = router();

    let addr = format!("127.0.0.1:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    println!("Masking service available at http://{}", addr);
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router() -> Router {
    Router::new()
        .route("/patterns", get(patterns))
        .route("/mask/:pattern", post(mask_value))
        .layer(HttpLogLayer::from_global())
}

async fn patterns() -> Json<Value> {
    let catalog: serde_json::Map<String, Value> = MaskedType::VARIANTS
        .iter()
        .map(|pattern| (pattern.as_str().to_string(), pattern.regex().into()))
        .collect();
    Json(Value::Object(catalog))
}

/// Masks the request body; `?regex=` overrides the path pattern
async fn mask_value(
    Path(pattern): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Result<Json<Value>, (StatusCode, String)> {
    let directive = MaskDirective::from_parts(Some(&pattern), query.get("regex").cloned())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let masked = directive
        .apply(&body)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    Ok(Json(json!({
        "pattern": directive.pattern,
        "masked": masked,
    })))
}
