//! Response envelopes used by the REST backend.
//!
//! Every JSON endpoint answers with `{success, data?, message?}`; paginated
//! list endpoints answer with `{success, data: [..], pagination: {..}}`.

use serde::{Deserialize, Serialize};

/// Standard `{success, data, message}` response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the backend considers the operation successful.
    pub success: bool,
    /// Payload, present on success for operations that return data.
    #[serde(default = "none")]
    pub data: Option<T>,
    /// Human-readable message, usually present on failure.
    #[serde(default)]
    pub message: Option<String>,
}

// `#[serde(default)]` on a generic `Option<T>` would require `T: Default`.
const fn none<T>() -> Option<T> {
    None
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Failed response carrying `message`.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Returns the payload iff `success` is set and `data` is present.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of matching records.
    pub total: i64,
    /// Page size requested.
    pub limit: i64,
    /// Offset of the first record in this page.
    pub offset: i64,
    /// Total number of pages.
    pub total_pages: i64,
    /// 1-based index of this page.
    pub current_page: i64,
}

/// Paginated `{success, data, pagination}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Whether the backend considers the query successful.
    pub success: bool,
    /// Records in this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Pagination metadata.
    #[serde(default)]
    pub pagination: Pagination,
    /// Backend explanation when `success` is false.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_data_or_message() {
        let response: ApiResponse<Vec<i32>> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(response.success);
        assert!(response.data.is_none());
        assert!(response.message.is_none());
    }

    #[test]
    fn test_envelope_into_data_requires_success() {
        let rejected: ApiResponse<i32> =
            serde_json::from_str(r#"{"success":false,"data":3,"message":"nope"}"#).unwrap();
        assert_eq!(rejected.into_data(), None);

        let accepted: ApiResponse<i32> = serde_json::from_str(r#"{"success":true,"data":3}"#).unwrap();
        assert_eq!(accepted.into_data(), Some(3));
    }

    #[test]
    fn test_envelope_null_data() {
        let response: ApiResponse<String> =
            serde_json::from_str(r#"{"success":true,"data":null,"message":"ok"}"#).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_page_deserialization() {
        let json = r#"{
            "success": true,
            "data": [1, 2, 3],
            "pagination": {"total": 30, "limit": 3, "offset": 0, "total_pages": 10, "current_page": 1}
        }"#;
        let page: Page<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data, vec![1, 2, 3]);
        assert_eq!(page.pagination.total_pages, 10);
    }
}
