//! Bindings between the wire types and the generic form, view and edit
//! machinery, plus the validators the admin screens use.

use std::borrow::Cow;

use payloads::requests::{
    CreateDictionaryEntry, EntryFilters, MAX_PER_PAGE, UpdateDictionaryEntry,
};
use payloads::{
    APIClient, ClientError, DictionaryEntry, EntryId, PARTS_OF_SPEECH,
    UserAccount,
};

use crate::{
    Editable, FieldErrors, FieldValues, Keyed, Searchable, ViewFilters,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryField {
    PnarWord,
    EnglishWord,
    PartOfSpeech,
    Definition,
    DifficultyLevel,
}

impl EntryField {
    pub fn name(self) -> &'static str {
        match self {
            Self::PnarWord => "pnar_word",
            Self::EnglishWord => "english_word",
            Self::PartOfSpeech => "part_of_speech",
            Self::Definition => "definition",
            Self::DifficultyLevel => "difficulty_level",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PnarWord => "Pnar",
            Self::EnglishWord => "English",
            Self::PartOfSpeech => "Part of speech",
            Self::Definition => "Definition",
            Self::DifficultyLevel => "Difficulty",
        }
    }
}

impl Searchable for DictionaryEntry {
    type Field = EntryField;

    fn searchable_fields() -> &'static [EntryField] {
        &[EntryField::PnarWord, EntryField::EnglishWord]
    }

    fn field_text(&self, field: EntryField) -> Cow<'_, str> {
        match field {
            EntryField::PnarWord => Cow::Borrowed(&self.pnar_word),
            EntryField::EnglishWord => Cow::Borrowed(&self.english_word),
            EntryField::PartOfSpeech => {
                Cow::Borrowed(self.part_of_speech.as_deref().unwrap_or(""))
            }
            EntryField::Definition => {
                Cow::Borrowed(self.definition.as_deref().unwrap_or(""))
            }
            EntryField::DifficultyLevel => self
                .difficulty_level
                .map(|level| Cow::Owned(level.to_string()))
                .unwrap_or(Cow::Borrowed("")),
        }
    }
}

impl Keyed for DictionaryEntry {
    type Key = EntryId;

    fn key(&self) -> EntryId {
        self.id.clone()
    }
}

/// Input values of the create/edit entry form. Every field is held as
/// typed text; blank optional fields are left out of the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryForm {
    pub pnar_word: String,
    pub english_word: String,
    pub part_of_speech: String,
    pub definition: String,
    pub difficulty_level: String,
}

impl FieldValues for EntryForm {
    type Field = EntryField;

    fn fields() -> &'static [EntryField] {
        &[
            EntryField::PnarWord,
            EntryField::EnglishWord,
            EntryField::PartOfSpeech,
            EntryField::Definition,
            EntryField::DifficultyLevel,
        ]
    }

    fn get(&self, field: EntryField) -> Cow<'_, str> {
        Cow::Borrowed(match field {
            EntryField::PnarWord => &self.pnar_word,
            EntryField::EnglishWord => &self.english_word,
            EntryField::PartOfSpeech => &self.part_of_speech,
            EntryField::Definition => &self.definition,
            EntryField::DifficultyLevel => &self.difficulty_level,
        })
    }

    fn set(&mut self, field: EntryField, value: String) {
        let slot = match field {
            EntryField::PnarWord => &mut self.pnar_word,
            EntryField::EnglishWord => &mut self.english_word,
            EntryField::PartOfSpeech => &mut self.part_of_speech,
            EntryField::Definition => &mut self.definition,
            EntryField::DifficultyLevel => &mut self.difficulty_level,
        };
        *slot = value;
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl EntryForm {
    fn difficulty(&self) -> Option<i32> {
        self.difficulty_level.trim().parse().ok()
    }

    pub fn to_create(&self) -> CreateDictionaryEntry {
        CreateDictionaryEntry {
            pnar_word: self.pnar_word.trim().to_string(),
            english_word: self.english_word.trim().to_string(),
            part_of_speech: non_blank(&self.part_of_speech),
            definition: non_blank(&self.definition),
            difficulty_level: self.difficulty(),
            ..Default::default()
        }
    }

    pub fn to_update(&self) -> UpdateDictionaryEntry {
        UpdateDictionaryEntry {
            pnar_word: non_blank(&self.pnar_word),
            english_word: non_blank(&self.english_word),
            part_of_speech: non_blank(&self.part_of_speech),
            definition: non_blank(&self.definition),
            difficulty_level: self.difficulty(),
            verified: None,
        }
    }
}

impl Editable for DictionaryEntry {
    type Draft = EntryForm;

    fn draft(&self) -> EntryForm {
        EntryForm {
            pnar_word: self.pnar_word.clone(),
            english_word: self.english_word.clone(),
            part_of_speech: self.part_of_speech.clone().unwrap_or_default(),
            definition: self.definition.clone().unwrap_or_default(),
            difficulty_level: self
                .difficulty_level
                .map(|level| level.to_string())
                .unwrap_or_default(),
        }
    }

    fn apply_draft(&mut self, draft: &EntryForm) {
        self.pnar_word = draft.pnar_word.trim().to_string();
        self.english_word = draft.english_word.trim().to_string();
        self.part_of_speech = non_blank(&draft.part_of_speech);
        self.definition = non_blank(&draft.definition);
        self.difficulty_level = draft.difficulty();
    }
}

/// Backend query for the page of entries a dictionary view shows. Search
/// and paging run on the backend; only the sort is applied to the fetched
/// rows.
pub fn entry_query(filters: &ViewFilters<EntryField>) -> EntryFilters {
    let page = u32::try_from(filters.page).unwrap_or(u32::MAX);
    let per_page = u32::try_from(filters.page_size).unwrap_or(MAX_PER_PAGE);
    EntryFilters::default()
        .with_search(&filters.search)
        .with_page(page)
        .with_per_page(per_page)
}

pub fn validate_entry(form: &EntryForm) -> FieldErrors<EntryField> {
    let mut errors = FieldErrors::new();
    if form.pnar_word.trim().is_empty() {
        errors.insert(EntryField::PnarWord, "Pnar word is required".into());
    }
    if form.english_word.trim().is_empty() {
        errors.insert(
            EntryField::EnglishWord,
            "English word is required".into(),
        );
    }
    let part_of_speech = form.part_of_speech.trim();
    if !part_of_speech.is_empty()
        && !PARTS_OF_SPEECH.contains(&part_of_speech.to_lowercase().as_str())
    {
        errors.insert(
            EntryField::PartOfSpeech,
            "Unknown part of speech".into(),
        );
    }
    if !form.difficulty_level.trim().is_empty()
        && !matches!(form.difficulty(), Some(1..=4))
    {
        errors.insert(
            EntryField::DifficultyLevel,
            "Difficulty must be between 1 and 4".into(),
        );
    }
    errors
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Email,
    Password,
}

impl UserField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }
}

impl Searchable for UserAccount {
    type Field = UserField;

    fn searchable_fields() -> &'static [UserField] {
        &[UserField::Email, UserField::Password]
    }

    fn field_text(&self, field: UserField) -> Cow<'_, str> {
        match field {
            UserField::Email => Cow::Borrowed(&self.email),
            UserField::Password => Cow::Borrowed(&self.password),
        }
    }
}

impl Keyed for UserAccount {
    type Key = String;

    fn key(&self) -> String {
        self.email.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserForm {
    pub email: String,
    pub password: String,
}

impl FieldValues for UserForm {
    type Field = UserField;

    fn fields() -> &'static [UserField] {
        &[UserField::Email, UserField::Password]
    }

    fn get(&self, field: UserField) -> Cow<'_, str> {
        match field {
            UserField::Email => Cow::Borrowed(&self.email),
            UserField::Password => Cow::Borrowed(&self.password),
        }
    }

    fn set(&mut self, field: UserField, value: String) {
        match field {
            UserField::Email => self.email = value,
            UserField::Password => self.password = value,
        }
    }
}

impl Editable for UserAccount {
    type Draft = UserForm;

    fn draft(&self) -> UserForm {
        UserForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    fn apply_draft(&mut self, draft: &UserForm) {
        self.email = draft.email.trim().to_string();
        self.password = draft.password.clone();
    }
}

/// Validator for the add-user form against the accounts already listed.
pub fn user_validator(
    existing: Vec<UserAccount>,
) -> impl Fn(&UserForm) -> FieldErrors<UserField> {
    move |form| {
        let mut errors = FieldErrors::new();
        let email = form.email.trim();
        if email.is_empty() || form.password.is_empty() {
            let message = "Email and password are required".to_string();
            if email.is_empty() {
                errors.insert(UserField::Email, message.clone());
            }
            if form.password.is_empty() {
                errors.insert(UserField::Password, message);
            }
        } else if existing.iter().any(|user| user.email == email) {
            errors.insert(UserField::Email, "Email already exists".into());
        }
        errors
    }
}

/// Append a validated user to the list. Returns false for a duplicate
/// email.
pub fn add_user(users: &mut Vec<UserAccount>, form: &UserForm) -> bool {
    let email = form.email.trim();
    if users.iter().any(|user| user.email == email) {
        return false;
    }
    users.push(UserAccount {
        email: email.to_string(),
        password: form.password.clone(),
    });
    true
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("No translation found for this word.")]
    NotFound,
}

/// Find the entry for a Pnar word, ignoring case and surrounding
/// whitespace.
pub fn lookup_translation<'a>(
    entries: &'a [DictionaryEntry],
    word: &str,
) -> Result<&'a DictionaryEntry, LookupError> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return Err(LookupError::NotFound);
    }
    entries
        .iter()
        .find(|entry| entry.pnar_word.trim().to_lowercase() == word)
        .ok_or(LookupError::NotFound)
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Translate a Pnar word through the backend: search for it, then take the
/// exact match among the results.
pub async fn fetch_translation(
    client: &APIClient,
    word: &str,
    token: &str,
) -> Result<DictionaryEntry, TranslationError> {
    if word.trim().is_empty() {
        return Err(LookupError::NotFound.into());
    }
    let filters = EntryFilters::default()
        .with_search(word)
        .with_per_page(MAX_PER_PAGE);
    let found = client.get_entries(&filters, token).await?;
    Ok(lookup_translation(&found.items, word)?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormSession, InlineEditSession, ViewFilters, derive_view};
    use test_helpers::mock::{seed_entries, seed_users};

    #[test]
    fn entry_search_covers_both_languages() {
        let entries = seed_entries();
        let mut filters = ViewFilters::new(10);

        filters.set_search("WAT");
        let view = derive_view(&entries, &filters);
        assert_eq!(view.rows[0].pnar_word, "um");

        filters.set_search("kit");
        let view = derive_view(&entries, &filters);
        assert_eq!(view.rows[0].english_word, "book");
        assert_eq!(view.total_matches, 1);
    }

    #[test]
    fn entry_query_carries_search_and_page() {
        let mut filters = ViewFilters::new(20);
        filters.set_search("  kit ");
        filters.set_page(3);

        let query = entry_query(&filters);

        assert_eq!(query.search.as_deref(), Some("kit"));
        assert_eq!(query.page, 3);
        assert_eq!(query.per_page, 20);
        assert_eq!(entry_query(&ViewFilters::new(500)).per_page, MAX_PER_PAGE);
    }

    #[test]
    fn difficulty_must_be_in_range() {
        let mut form = EntryForm {
            pnar_word: "kitab".into(),
            english_word: "book".into(),
            difficulty_level: "7".into(),
            ..Default::default()
        };
        assert!(validate_entry(&form).contains_key(&EntryField::DifficultyLevel));

        form.difficulty_level = "3".into();
        assert!(validate_entry(&form).is_empty());

        form.difficulty_level = "hard".into();
        assert!(validate_entry(&form).contains_key(&EntryField::DifficultyLevel));
    }

    #[test]
    fn unknown_part_of_speech_is_rejected() {
        let form = EntryForm {
            pnar_word: "kitab".into(),
            english_word: "book".into(),
            part_of_speech: "gerund".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_entry(&form).get(&EntryField::PartOfSpeech).map(String::as_str),
            Some("Unknown part of speech")
        );
    }

    #[test]
    fn create_request_drops_blank_optionals() {
        let form = EntryForm {
            pnar_word: " kitab ".into(),
            english_word: "book".into(),
            definition: "  ".into(),
            difficulty_level: "1".into(),
            ..Default::default()
        };

        let request = form.to_create();

        assert_eq!(request.pnar_word, "kitab");
        assert_eq!(request.definition, None);
        assert_eq!(request.difficulty_level, Some(1));
    }

    #[test]
    fn editing_an_entry_round_trips_its_fields() {
        let mut entries = seed_entries();
        let mut session = InlineEditSession::<DictionaryEntry>::new();
        let kitab = EntryId::from("2");

        session.start_edit(&entries, &kitab);
        assert_eq!(
            session.draft().map(|d| d.difficulty_level.as_str()),
            Some("1")
        );
        session.update_draft_field(EntryField::EnglishWord, "books");
        session.save(&mut entries, &kitab);

        assert_eq!(entries[1].english_word, "books");
        assert_eq!(entries[1].part_of_speech.as_deref(), Some("noun"));
        assert_eq!(entries[1].difficulty_level, Some(1));
        assert_eq!(entries[0], seed_entries()[0]);
    }

    #[test]
    fn user_search_matches_email_or_password() {
        let users = seed_users();
        let mut filters = ViewFilters::new(5);

        filters.set_search("USER2");
        assert_eq!(derive_view(&users, &filters).total_matches, 1);

        filters.set_search("password1");
        let view = derive_view(&users, &filters);
        assert_eq!(view.rows[0].email, "user1@example.com");
        assert_eq!(view.total_matches, 1);
    }

    #[test]
    fn user_form_requires_both_fields() {
        let mut form = FormSession::new(UserForm::default())
            .with_validator(user_validator(seed_users()));
        form.handle_change(UserField::Email, "new@example.com");

        assert!(!form.validate());
        assert_eq!(
            form.state().error(&UserField::Password),
            Some("Email and password are required")
        );
        assert_eq!(form.state().error(&UserField::Email), None);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let validate = user_validator(seed_users());
        let form = UserForm {
            email: "user1@example.com".into(),
            password: "pw".into(),
        };

        assert_eq!(
            validate(&form).get(&UserField::Email).map(String::as_str),
            Some("Email already exists")
        );

        let mut users = seed_users();
        assert!(!add_user(&mut users, &form));
        assert!(add_user(
            &mut users,
            &UserForm {
                email: "user3@example.com".into(),
                password: "password3".into(),
            }
        ));
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        let entries = seed_entries();

        let entry = lookup_translation(&entries, "  KITAB ").unwrap();
        assert_eq!(entry.english_word, "book");
        assert_eq!(
            lookup_translation(&entries, "ka iing").map(|e| e.id.clone()),
            Ok(EntryId::from("5"))
        );
    }

    #[test]
    fn lookup_miss_has_user_facing_message() {
        let entries = seed_entries();

        let error = lookup_translation(&entries, "book").unwrap_err();

        assert_eq!(error, LookupError::NotFound);
        assert_eq!(error.to_string(), "No translation found for this word.");
        assert!(lookup_translation(&entries, "").is_err());
    }
}
