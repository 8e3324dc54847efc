pub mod dictionary_admin;
pub mod dictionary_table;
pub mod entry_form;
pub mod pagination_controls;
pub mod request_status;
pub mod sort_header;
pub mod translation_lookup;
pub mod users_table;

pub use dictionary_admin::DictionaryAdmin;
pub use dictionary_table::DictionaryTable;
pub use entry_form::NewEntryForm;
pub use pagination_controls::PaginationControls;
pub use request_status::RequestStatus;
pub use sort_header::SortHeader;
pub use translation_lookup::TranslationLookup;
pub use users_table::UsersTable;
