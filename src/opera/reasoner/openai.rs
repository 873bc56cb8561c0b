//! An OpenAI-backed `Reasoner`, grounded on
//! `examples/original_source/pkg/reason/openai/reasoner.go`: translate
//! `History` into chat messages, `Tool`s into function-calling definitions,
//! and decode the completion back into an `Action`.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::opera::action::{self, Action, Call};
use crate::opera::error::OperaError;
use crate::opera::history::{Event, History};
use crate::opera::reasoner::Reasoner;
use crate::opera::tool::Tool;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiReasoner {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiReasoner {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the chat-completions endpoint (used to point at a mock
    /// server in integration tests; production traffic uses the default).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn messages(history: &History) -> Vec<Value> {
        history
            .all()
            .iter()
            .map(|event| match event {
                Event::System { content, .. } => json!({"role": "system", "content": content}),
                Event::User { query, .. } => {
                    if let Some(image) = &query.image {
                        json!({
                            "role": "user",
                            "content": [
                                {"type": "text", "text": query.text},
                                {"type": "image_url", "image_url": {"url": image}},
                            ],
                        })
                    } else {
                        json!({"role": "user", "content": query.text})
                    }
                }
                Event::Assistant { content, .. } => {
                    json!({"role": "assistant", "content": content})
                }
                Event::ToolCalls { calls, .. } => json!({
                    "role": "assistant",
                    "content": Value::Null,
                    "tool_calls": calls.iter().map(|c| json!({
                        "id": c.id,
                        "type": "function",
                        "function": {"name": c.name, "arguments": c.arguments},
                    })).collect::<Vec<_>>(),
                }),
                Event::ToolResponse { response, .. } => json!({
                    "role": "tool",
                    "tool_call_id": response.id,
                    "content": response.content,
                }),
            })
            .collect()
    }

    fn tool_defs(tools: &[Tool]) -> Vec<Value> {
        tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name(),
                        "description": t.description(),
                        "parameters": {
                            "type": "object",
                            "properties": t.parameters().properties,
                            "required": t.parameters().required,
                        },
                    },
                })
            })
            .collect()
    }

    fn decode(body: &Value) -> Result<Action, OperaError> {
        let message = body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .ok_or_else(|| OperaError::Reasoner("missing choices[0].message in response".into()))?;

        let tool_calls = message.get("tool_calls").and_then(Value::as_array);
        match tool_calls {
            Some(raw_calls) if !raw_calls.is_empty() => {
                let mut calls = Vec::with_capacity(raw_calls.len());
                for raw in raw_calls {
                    let id = raw
                        .get("id")
                        .and_then(Value::as_str)
                        .ok_or_else(|| OperaError::Reasoner("tool call missing id".into()))?
                        .to_string();
                    let function = raw.get("function").ok_or_else(|| {
                        OperaError::Reasoner("tool call missing function".into())
                    })?;
                    let name = function
                        .get("name")
                        .and_then(Value::as_str)
                        .ok_or_else(|| OperaError::Reasoner("tool call missing name".into()))?
                        .to_string();
                    let arguments = function
                        .get("arguments")
                        .and_then(Value::as_str)
                        .unwrap_or("{}")
                        .to_string();
                    calls.push(Call { id, name, arguments });
                }
                Ok(action::tool(calls, None))
            }
            _ => {
                let content = message
                    .get("content")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string();
                Ok(action::user(content))
            }
        }
    }
}

#[async_trait]
impl Reasoner for OpenAiReasoner {
    async fn reason(&self, history: &History, tools: &[Tool]) -> Result<Action, OperaError> {
        let mut request = json!({
            "model": self.model,
            "messages": Self::messages(history),
        });
        if !tools.is_empty() {
            request["tools"] = Value::Array(Self::tool_defs(tools));
        }

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("reasoner request: model={} messages={}", self.model, history.len());
        }

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OperaError::Reasoner(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| OperaError::Reasoner(e.to_string()))?;

        if !status.is_success() {
            return Err(OperaError::Reasoner(format!(
                "upstream returned {}: {}",
                status, body
            )));
        }

        Self::decode(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opera::percept::Query;

    #[test]
    fn decode_no_tool_calls_yields_user_action() {
        let body = json!({"choices": [{"message": {"content": "Hello there"}}]});
        let action = OpenAiReasoner::decode(&body).unwrap();
        assert_eq!(action.user(), Some("Hello there"));
    }

    #[test]
    fn decode_tool_calls_yields_tool_action() {
        let body = json!({"choices": [{"message": {
            "tool_calls": [{"id": "c1", "function": {"name": "get_weather", "arguments": "{}"}}],
        }}]});
        let action = OpenAiReasoner::decode(&body).unwrap();
        let (calls, _) = action.tool().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "c1");
        assert_eq!(calls[0].name, "get_weather");
    }

    #[test]
    fn messages_maps_every_event_kind() {
        let mut history = History::new();
        history.add_system("be helpful");
        history.add_percepts(&[crate::opera::percept::user(Query {
            text: "hi".into(),
            image: None,
        })]);
        history.add_action(&action::user("hello"));
        let messages = OpenAiReasoner::messages(&history);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
    }
}
