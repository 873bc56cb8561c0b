//! Route handlers: create, query, and delete agents, matching `spec.md`'s
//! §6 route table exactly.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;

use crate::opera::agent::{Agent, FunctionAgent};
use crate::opera::api::AppState;
use crate::opera::error::OperaError;
use crate::opera::percept::Query;
use crate::opera::reasoner::OpenAiReasoner;

#[derive(Deserialize)]
pub struct CreateAgentForm {
    pub model: String,
    #[serde(rename = "system-prompt")]
    pub system_prompt: String,
}

#[derive(Deserialize)]
pub struct QueryForm {
    pub text: String,
}

fn error_status(err: &OperaError) -> StatusCode {
    match err {
        OperaError::NotFound(_) | OperaError::InvalidId(_) | OperaError::InvalidName => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: OperaError) -> Response {
    let status = error_status(&err);
    (status, Json(json!({"error": err.to_string()}))).into_response()
}

/// `Engine::query` errors (bad id is already rejected before this point) are
/// all surfaced as `400`, matching `examples/original_source/pkg/api/handler/agent.go`'s
/// `Query` handler, which reserves `500` for the absent `db.Update` step.
fn engine_error_response(err: OperaError) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({"error": err.to_string()}))).into_response()
}

pub async fn create_agent(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<CreateAgentForm>,
) -> Response {
    let api_key = match headers.get("X-Api-Key").and_then(|v| v.to_str().ok()) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "missing X-Api-Key header"})),
            )
                .into_response();
        }
    };
    if form.model.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "missing model"})),
        )
            .into_response();
    }

    let reasoner = Arc::new(OpenAiReasoner::new(api_key, form.model));
    let agent: Box<dyn Agent> = Box::new(FunctionAgent::new(
        form.system_prompt,
        reasoner,
        state.discovery.clone(),
    ));
    let id = state.store.add(agent);

    (
        StatusCode::CREATED,
        [("Location", format!("/v1/agents/{}", id))],
        Json(json!({"object": "created", "id": id})),
    )
        .into_response()
}

pub async fn query_agent(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<String>,
    Form(form): Form<QueryForm>,
) -> Response {
    if !crate::opera::ids::valid(&agent_id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid agent id"})),
        )
            .into_response();
    }
    if form.text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "text must not be empty"})),
        )
            .into_response();
    }

    let handle = match state.store.get(&agent_id) {
        Ok(h) => h,
        Err(e) => return error_response(e),
    };

    let mut agent = handle.lock().await;
    let query = Query { text: form.text, image: None };
    let cancel = state.cancel.child_token();
    match state.engine.query(query, agent.as_mut(), &cancel).await {
        Ok(answer) => {
            (StatusCode::OK, Json(json!({"object": "answer", "text": answer}))).into_response()
        }
        Err(e) => engine_error_response(e),
    }
}

pub async fn delete_agent(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<String>,
) -> Response {
    match state.store.delete(&agent_id) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_all_map_to_bad_request() {
        for err in [
            OperaError::Reasoner("boom".into()),
            OperaError::MaxIterations(3),
            OperaError::Joined(vec![OperaError::Transport("x".into())]),
            OperaError::Transport("x".into()),
            OperaError::Cancelled,
        ] {
            let response = engine_error_response(err);
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn store_not_found_maps_to_bad_request_not_found() {
        let response = error_response(OperaError::NotFound("age-x".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
