//! Snapshot formatting for wire responses.
//!
//! Responses are pretty-printed JSON so insta snapshots stay readable
//! and diff cleanly.

use graphql_mock_session::GraphQLResponse;

/// Format a wire response for snapshot testing.
///
/// # Example
///
/// ```ignore
/// let response = server.handle_json(body);
/// insta::assert_snapshot!(format_response(&response));
/// ```
#[must_use]
pub fn format_response(response: &GraphQLResponse) -> String {
    serde_json::to_string_pretty(response)
        .unwrap_or_else(|e| format!("(unserializable response: {e})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_data_response() {
        let response = GraphQLResponse::data(json!({"x": 1}));
        let formatted = format_response(&response);
        assert!(formatted.contains("\"data\""));
        assert!(!formatted.contains("\"errors\""));
    }

    #[test]
    fn test_format_error_response() {
        let response = GraphQLResponse::error("boom");
        let formatted = format_response(&response);
        assert!(formatted.contains("\"errors\""));
        assert!(formatted.contains("boom"));
    }
}
