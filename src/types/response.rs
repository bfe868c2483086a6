//! Standard API response envelope.

use serde::Serialize;

use super::PaginationMeta;

/// Standard API response wrapper: `{success, data?, message?, pagination?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: Some(pagination),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaginationParams;

    #[test]
    fn test_envelope_shape() {
        let meta = PaginationMeta::new(&PaginationParams::default(), 3);
        let body = ApiResponse::paginated(vec![1, 2, 3], meta);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
        assert_eq!(json["pagination"]["currentPage"], 1);
        assert_eq!(json["pagination"]["totalItems"], 3);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_message_only_envelope() {
        let body = ApiResponse::message("done");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "done");
        assert!(json.get("data").is_none());
    }
}
