//! Saved search preferences for the remote job search

use serde::{Deserialize, Serialize};

/// User-entered search parameters, persisted between sessions by clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub remote_only: bool,
    #[serde(default)]
    pub date_posted: DatePostedFilter,
}

/// Recency filter for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePostedFilter {
    #[default]
    All,
    Today,
    #[serde(rename = "3days")]
    ThreeDays,
    Week,
    Month,
}

impl DatePostedFilter {
    /// Value the search API expects for this filter.
    #[must_use]
    pub const fn api_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::ThreeDays => "3days",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Label shown in client filter pickers.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::All => "Any time",
            Self::Today => "Today",
            Self::ThreeDays => "Last 3 days",
            Self::Week => "This week",
            Self::Month => "This month",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_criteria() {
        let criteria = SearchCriteria::default();
        assert_eq!(criteria.query, "");
        assert!(!criteria.remote_only);
        assert_eq!(criteria.date_posted, DatePostedFilter::All);
    }

    #[test]
    fn test_filter_wire_values() {
        assert_eq!(DatePostedFilter::ThreeDays.api_value(), "3days");
        let json = serde_json::to_string(&DatePostedFilter::ThreeDays).unwrap();
        assert_eq!(json, "\"3days\"");
    }
}
