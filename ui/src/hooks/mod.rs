pub mod use_api;
pub mod use_authentication;
pub mod use_collection_view;
pub mod use_debounced;
pub mod use_form;
pub mod use_inline_edit;
pub mod use_logout;
pub mod use_storage;

pub use use_api::{UseApiHandle, use_api};
pub use use_authentication::{use_authentication, use_login};
pub use use_collection_view::{UseCollectionViewHandle, use_collection_view};
pub use use_debounced::use_debounced;
pub use use_form::{UseFormHandle, use_form};
pub use use_inline_edit::{UseInlineEditHandle, use_inline_edit};
pub use use_logout::use_logout;
pub use use_storage::{use_preferences, use_storage};
