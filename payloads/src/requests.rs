use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    pub refresh_token: String,
}

/// Body for creating a dictionary entry. Optional fields that are unset are
/// omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDictionaryEntry {
    pub pnar_word: String,
    pub english_word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_pnar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_frequency: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultural_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_words: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
}

/// Partial update of a dictionary entry; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDictionaryEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnar_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// Query parameters for listing dictionary entries.
///
/// Unset facets and an empty search string are left out of the query
/// string entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilters {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl Default for EntryFilters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            search: None,
            part_of_speech: None,
            difficulty_level: None,
            verified: None,
        }
    }
}

impl EntryFilters {
    /// Set the search term, treating blank input as no search.
    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(DEFAULT_PAGE);
        self
    }

    /// Page sizes are capped at [`MAX_PER_PAGE`].
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_not_serialized() {
        let filters = EntryFilters::default().with_search("   ");
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "page": 1, "per_page": 10 })
        );
    }

    #[test]
    fn per_page_is_capped() {
        let filters = EntryFilters::default().with_per_page(500);
        assert_eq!(filters.per_page, MAX_PER_PAGE);
        let filters = EntryFilters::default().with_page(0);
        assert_eq!(filters.page, DEFAULT_PAGE);
    }
}
