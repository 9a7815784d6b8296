//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use toolrank_core::ToolId;
use validator::Validate;

use crate::services::{ServiceError, ServiceResult};

/// Most tool ids accepted by one standings lookup
pub const MAX_STANDINGS_IDS: usize = 100;

/// Default and upper bound for list endpoints
pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp an optional `limit` query value into `1..=MAX_LIST_LIMIT`
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

// ============================================================================
// Maintenance Requests
// ============================================================================

/// Purge request; `asOf` defaults to now
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurgeRequest {
    pub as_of: Option<DateTime<Utc>>,
}

// ============================================================================
// Listing Queries
// ============================================================================

/// `?ids=a,b,c` for the standings lookup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StandingsQuery {
    #[validate(length(min = 1, max = 13000, message = "ids must be a non-empty comma separated list"))]
    pub ids: String,
}

impl StandingsQuery {
    /// Parse the list into tool ids, dropping repeats and keeping first-seen order
    pub fn tool_ids(&self) -> ServiceResult<Vec<ToolId>> {
        let mut ids: Vec<ToolId> = Vec::new();
        for raw in self.ids.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = ToolId::parse(raw)
                .map_err(|e| ServiceError::validation(format!("invalid tool id '{raw}': {e}")))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            return Err(ServiceError::validation("ids must name at least one tool"));
        }
        if ids.len() > MAX_STANDINGS_IDS {
            return Err(ServiceError::validation(format!(
                "at most {MAX_STANDINGS_IDS} tool ids per request"
            )));
        }
        Ok(ids)
    }
}

/// `?limit=n` for list endpoints
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

impl LimitQuery {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_request_camel_case() {
        let req: PurgeRequest =
            serde_json::from_str(r#"{"asOf":"2024-04-02T10:00:00Z"}"#).unwrap();
        assert!(req.as_of.is_some());

        let req: PurgeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.as_of.is_none());
    }

    #[test]
    fn test_standings_ids_parsed_and_deduplicated() {
        let query = StandingsQuery {
            ids: " t1, t2,,t1 ,t3".to_string(),
        };
        let ids: Vec<String> = query
            .tool_ids()
            .unwrap()
            .into_iter()
            .map(ToolId::into_inner)
            .collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_standings_ids_limits() {
        let empty = StandingsQuery {
            ids: " , ".to_string(),
        };
        assert!(empty.tool_ids().is_err());

        let too_many = StandingsQuery {
            ids: (0..=MAX_STANDINGS_IDS)
                .map(|i| format!("t{i}"))
                .collect::<Vec<_>>()
                .join(","),
        };
        assert!(too_many.tool_ids().is_err());
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(500)), 100);
        assert_eq!(LimitQuery { limit: Some(7) }.limit(), 7);
    }
}
