use axum::{
    body::Bytes,
    extract::State,
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::server::AppState;
use std::sync::Arc;

/// Wire shape of a `POST /graphql` body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
    #[serde(default)]
    pub operation_name: Option<String>,
}

impl GraphQlRequest {
    pub fn into_request(self) -> async_graphql::Request {
        let mut request = async_graphql::Request::new(self.query);
        if let Some(variables) = self.variables {
            request = request.variables(async_graphql::Variables::from_json(Value::Object(variables)));
        }
        if let Some(name) = self.operation_name {
            request = request.operation_name(name);
        }
        request
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Execute one query document.
///
/// Anything that parses as a request document gets a 200 with the
/// `{data, errors}` envelope; only an unusable body is a 400.
pub async fn graphql(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<async_graphql::Response>, (StatusCode, Json<ErrorResponse>)> {
    let request: GraphQlRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: format!("malformed request body: {}", e) }))
    })?;

    let response = state.schema.execute(request.into_request()).await;
    if response.is_err() {
        tracing::debug!("Query finished with {} error(s)", response.errors.len());
    }

    Ok(Json(response))
}
