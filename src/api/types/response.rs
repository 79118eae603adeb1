//! Success envelope and pagination types

use serde::{Deserialize, Serialize};

/// Success envelope: `{ data, pagination?, message? }`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            pagination: None,
            message: None,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Pagination block of the success envelope.
///
/// `total` is the true matching-row count, not the length of the returned
/// page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_limit() -> u32 {
    10
}

/// Query-string pagination: `page` 1-based defaulting to 1, `limit`
/// defaulting to 10.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageParams {
    /// 1-based page clamped to at least 1.
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Page size clamped to at least 1.
    pub fn limit(&self) -> u32 {
        self.limit.max(1)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            page: self.page(),
            limit: self.limit(),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serialization() {
        let response = ApiResponse::new(vec![1, 2, 3])
            .with_pagination(Pagination {
                page: 2,
                limit: 10,
                total: 23,
            })
            .with_message("ok");

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"data\":[1,2,3]"));
        assert!(json.contains("\"page\":2"));
        assert!(json.contains("\"total\":23"));
        assert!(json.contains("\"message\":\"ok\""));
    }

    #[test]
    fn test_envelope_omits_empty_sections() {
        let response = ApiResponse::new("payload");
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(json, r#"{"data":"payload"}"#);
    }

    #[test]
    fn test_offset_computation() {
        let params = PageParams { page: 3, limit: 10 };
        assert_eq!(params.offset(), 20);

        let params = PageParams { page: 1, limit: 25 };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_zero_page_clamps_to_first() {
        let params = PageParams { page: 0, limit: 0 };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }
}
