//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;
use toolrank_core::ToolId;

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
struct ToolIdParams {
    tool_id: String,
}

/// `{tool_id}` path segment parsed into a `ToolId`
#[derive(Debug, Clone)]
pub struct ToolIdPath(pub ToolId);

#[async_trait]
impl<S> FromRequestParts<S> for ToolIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<ToolIdParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        let tool_id = ToolId::parse(params.tool_id)
            .map_err(|e| ApiError::invalid_path(format!("Invalid tool_id: {e}")))?;

        Ok(ToolIdPath(tool_id))
    }
}
