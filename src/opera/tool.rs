//! The `Tool` value: an immutable descriptor of a callable remote tool.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::opera::error::OperaError;

/// Schema fragment describing a tool's callable parameters.
///
/// `properties` maps a parameter name to an arbitrary JSON-shaped
/// sub-schema; `required` lists the subset of `properties` keys that must
/// be present in a call's arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Parameters {
    pub properties: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub required: Vec<String>,
}

/// An immutable, validated descriptor of a remote tool service.
///
/// Constructed only through [`ToolBuilder`], which fails closed when a
/// mandatory field is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    name: String,
    description: String,
    addr: Url,
    parameters: Parameters,
}

impl Tool {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn addr(&self) -> &Url {
        &self.addr
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

/// Consuming builder for [`Tool`]. Validates all mandatory fields at
/// [`ToolBuilder::build`] and fails closed with `OperaError::InvalidTool`
/// when one is missing.
#[derive(Debug, Default, Clone)]
pub struct ToolBuilder {
    name: Option<String>,
    description: Option<String>,
    addr: Option<Url>,
    parameters: Option<Parameters>,
}

impl ToolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_addr(mut self, addr: Url) -> Self {
        self.addr = Some(addr);
        self
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn build(self) -> Result<Tool, OperaError> {
        let name = self
            .name
            .filter(|s| !s.is_empty())
            .ok_or_else(|| OperaError::InvalidTool("name is empty".into()))?;
        let description = self
            .description
            .filter(|s| !s.is_empty())
            .ok_or_else(|| OperaError::InvalidTool("description is empty".into()))?;
        let addr = self
            .addr
            .filter(|u| u.host_str().is_some_and(|h| !h.is_empty()))
            .ok_or_else(|| OperaError::InvalidTool("addr host is empty".into()))?;
        let parameters = self
            .parameters
            .ok_or_else(|| OperaError::InvalidTool("parameters is missing".into()))?;

        Ok(Tool {
            name,
            description,
            addr,
            parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Parameters {
        Parameters {
            properties: HashMap::from([(
                "location".to_string(),
                serde_json::json!({"type": "string"}),
            )]),
            required: vec!["location".to_string()],
        }
    }

    #[test]
    fn round_trip_reproduces_fields() {
        let addr = Url::parse("http://weather:8080/").unwrap();
        let tool = ToolBuilder::new()
            .with_name("get_weather")
            .with_description("Looks up current weather")
            .with_addr(addr.clone())
            .with_parameters(params())
            .build()
            .unwrap();

        assert_eq!(tool.name(), "get_weather");
        assert_eq!(tool.description(), "Looks up current weather");
        assert_eq!(tool.addr(), &addr);
        assert_eq!(tool.parameters(), &params());
    }

    #[test]
    fn build_fails_on_empty_name() {
        let err = ToolBuilder::new()
            .with_name("")
            .with_description("d")
            .with_addr(Url::parse("http://h/").unwrap())
            .with_parameters(params())
            .build()
            .unwrap_err();
        assert!(matches!(err, OperaError::InvalidTool(_)));
    }

    #[test]
    fn build_fails_on_missing_parameters() {
        let err = ToolBuilder::new()
            .with_name("n")
            .with_description("d")
            .with_addr(Url::parse("http://h/").unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, OperaError::InvalidTool(_)));
    }
}
