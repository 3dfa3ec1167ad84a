use serde_json::Value;

/// Status and body of a user-detail call, kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parsed body. A body that is not valid JSON reads as an empty object,
    /// which the normalizer then reports as "no profile".
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "response body is not JSON, using empty document");
            Value::Object(Default::default())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_body_is_empty_object() {
        let raw = RawResponse {
            status: 200,
            body: "<html>rate limited</html>".into(),
        };
        assert_eq!(raw.json(), json!({}));
    }

    #[test]
    fn success_range() {
        let ok = RawResponse { status: 204, body: String::new() };
        let not_found = RawResponse { status: 404, body: String::new() };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }
}
