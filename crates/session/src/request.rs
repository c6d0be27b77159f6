use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GraphQL-over-HTTP request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Value,
    #[serde(default)]
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    /// The variables object, with absent/`null` normalized to `{}`.
    #[must_use]
    pub fn variables(&self) -> Value {
        if self.variables.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            self.variables.clone()
        }
    }
}

/// A GraphQL-over-HTTP response body: `data` on success, `errors` on
/// fatal resolution failure. Never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
}

/// One entry of a response's `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQLError {
    pub message: String,
}

impl GraphQLResponse {
    #[must_use]
    pub const fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: Some(vec![GraphQLError {
                message: message.into(),
            }]),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.errors.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_defaults_missing_fields() {
        let request: GraphQLRequest =
            serde_json::from_str(r#"{"query": "{ __typename }"}"#).unwrap();
        assert_eq!(request.variables(), json!({}));
        assert_eq!(request.operation_name, None);
    }

    #[test]
    fn request_normalizes_null_variables() {
        let request: GraphQLRequest =
            serde_json::from_str(r#"{"query": "{ x }", "variables": null}"#).unwrap();
        assert_eq!(request.variables(), json!({}));
    }

    #[test]
    fn response_serializes_data_only() {
        let response = GraphQLResponse::data(json!({"x": 1}));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"data": {"x": 1}})
        );
    }

    #[test]
    fn response_serializes_errors_only() {
        let response = GraphQLResponse::error("boom");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"errors": [{"message": "boom"}]})
        );
    }
}
