use serde::{Serialize, de::DeserializeOwned};
use yew::prelude::*;

use crate::session::{
    PREFERENCES_KEY, StorageKind, UserPreferences, read_json, write_json,
};

/// A JSON value persisted in browser storage under `key`, falling back to
/// `default` when nothing usable is stored.
///
/// Returns the current value and a setter that stores the new value and
/// re-renders.
#[hook]
pub fn use_storage<T>(
    kind: StorageKind,
    key: &'static str,
    default: T,
) -> (T, Callback<T>)
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    let value = use_state(move || read_json(kind, key).unwrap_or(default));

    let set_value = {
        let value = value.clone();
        Callback::from(move |next: T| {
            write_json(kind, key, &next);
            value.set(next);
        })
    };

    ((*value).clone(), set_value)
}

#[hook]
pub fn use_preferences() -> (UserPreferences, Callback<UserPreferences>) {
    use_storage(
        StorageKind::Local,
        PREFERENCES_KEY,
        UserPreferences::default(),
    )
}
