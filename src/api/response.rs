use serde::Serialize;

/// Response envelope shared by every endpoint: `{success, message}` plus
/// either `data` (payload) or `errors` (field-level messages).
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize = serde_json::Value> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ApiResponse<serde_json::Value> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    pub fn error_with(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_omits_empty_fields() {
        let body = serde_json::to_value(ApiResponse::ok("done")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "done");
        assert!(body.get("data").is_none());
        assert!(body.get("errors").is_none());
    }

    #[test]
    fn test_envelope_with_errors() {
        let body = serde_json::to_value(ApiResponse::error_with(
            "bad input",
            vec!["The name field is required".to_string()],
        ))
        .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"][0], "The name field is required");
    }
}
