//! Framework independent state for the dictionary admin client.
//!
//! Everything in here runs on a single thread: shared state is `Rc` and
//! `RefCell`, and the only suspension points are the futures handed to
//! [`AsyncOperation`] and [`Debouncer`]. The `ui` crate wraps these types in
//! hooks; tests drive them directly.

pub mod debounce;
pub mod edit;
pub mod fields;
pub mod form;
pub mod operation;
pub mod records;
pub mod request_state;
pub mod view;

pub use debounce::{DEFAULT_DEBOUNCE_MS, Debouncer};
pub use edit::{EditDraft, Editable, InlineEditSession, Keyed};
pub use fields::FieldValues;
pub use form::{
    FieldErrors, FormSession, FormState, SubmitError, SubmitOutcome,
};
pub use operation::{AsyncOperation, FALLBACK_ERROR};
pub use records::{
    EntryField, EntryForm, LookupError, TranslationError, UserField, UserForm,
    add_user, entry_query, fetch_translation, lookup_translation,
    user_validator, validate_entry,
};
pub use request_state::RequestState;
pub use view::{
    CollectionView, PageWindow, Searchable, SortOrder, SortState,
    ViewFilters, derive_view,
};
