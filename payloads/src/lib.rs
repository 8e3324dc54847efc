pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

use derive_more::Display;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a dictionary entry by the backend.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

pub const DIFFICULTY_BEGINNER: i32 = 1;
pub const DIFFICULTY_INTERMEDIATE: i32 = 2;
pub const DIFFICULTY_ADVANCED: i32 = 3;
pub const DIFFICULTY_EXPERT: i32 = 4;

pub const PARTS_OF_SPEECH: [&str; 8] = [
    "noun",
    "verb",
    "adjective",
    "adverb",
    "pronoun",
    "preposition",
    "conjunction",
    "interjection",
];

/// A Pnar/English dictionary entry as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: EntryId,
    pub pnar_word: String,
    pub english_word: String,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub example_pnar: Option<String>,
    #[serde(default)]
    pub example_english: Option<String>,
    /// 1 (beginner) through 4 (expert)
    #[serde(default)]
    pub difficulty_level: Option<i32>,
    #[serde(default)]
    pub usage_frequency: Option<i32>,
    #[serde(default)]
    pub cultural_context: Option<String>,
    #[serde(default)]
    pub related_words: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub etymology: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl DictionaryEntry {
    /// Minimal entry with only the required words set.
    pub fn new(
        id: impl Into<EntryId>,
        pnar_word: impl Into<String>,
        english_word: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pnar_word: pnar_word.into(),
            english_word: english_word.into(),
            part_of_speech: None,
            definition: None,
            example_pnar: None,
            example_english: None,
            difficulty_level: None,
            usage_frequency: None,
            cultural_context: None,
            related_words: None,
            pronunciation: None,
            etymology: None,
            verified: false,
            created_at: None,
            updated_at: None,
        }
    }
}

/// A user account managed from the admin client, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub password: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[display("admin")]
    Admin,
    #[display("user")]
    User,
    #[display("guest")]
    Guest,
}
