use std::fmt::Debug;
use std::future::Future;

use crate::FieldValues;

/// Items with a stable identity, unique within a list.
pub trait Keyed {
    type Key: Clone + Eq + Debug;

    fn key(&self) -> Self::Key;
}

/// Items whose editable fields can be copied into a draft and written
/// back.
pub trait Editable: Keyed + Clone {
    type Draft: FieldValues;

    fn draft(&self) -> Self::Draft;

    fn apply_draft(&mut self, draft: &Self::Draft);
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft<T: Editable> {
    pub key: T::Key,
    pub values: T::Draft,
}

/// The single row being edited inline, identified by key rather than by
/// its position in any filtered or sorted view.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineEditSession<T: Editable> {
    current: Option<EditDraft<T>>,
}

impl<T: Editable> Default for InlineEditSession<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T: Editable> InlineEditSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&EditDraft<T>> {
        self.current.as_ref()
    }

    pub fn editing_key(&self) -> Option<&T::Key> {
        self.current.as_ref().map(|draft| &draft.key)
    }

    pub fn is_editing(&self, key: &T::Key) -> bool {
        self.editing_key() == Some(key)
    }

    pub fn draft(&self) -> Option<&T::Draft> {
        self.current.as_ref().map(|draft| &draft.values)
    }

    /// Start editing the item with `key`. Any unsaved draft of another row
    /// is dropped. Returns false if no item has that key.
    pub fn start_edit(&mut self, items: &[T], key: &T::Key) -> bool {
        let Some(item) = items.iter().find(|item| item.key() == *key) else {
            tracing::warn!(?key, "cannot edit missing item");
            return false;
        };
        if let Some(previous) = self.editing_key().filter(|k| *k != key) {
            tracing::debug!(?previous, "discarding unsaved draft");
        }
        self.current = Some(EditDraft {
            key: key.clone(),
            values: item.draft(),
        });
        true
    }

    /// Change one field of the draft. The underlying item is untouched.
    pub fn update_draft_field(
        &mut self,
        field: <T::Draft as FieldValues>::Field,
        value: impl Into<String>,
    ) {
        if let Some(current) = &mut self.current {
            current.values.set(field, value.into());
        }
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    /// Write the draft onto the item with `key` and end the edit. Does
    /// nothing unless `key` is the row being edited and the draft keeps
    /// keys unique.
    pub fn save(&mut self, items: &mut [T], key: &T::Key) -> bool {
        let Some(draft) = self.pending_save(items, key) else {
            return false;
        };
        let Some(item) = items.iter_mut().find(|item| item.key() == *key)
        else {
            return false;
        };
        item.apply_draft(&draft);
        self.current = None;
        true
    }

    /// Save through a remote write. `write` receives the key and draft and
    /// resolves to the stored item, or `None` if the write failed (its
    /// error is reported by whoever performed it, typically an
    /// [`AsyncOperation`](crate::AsyncOperation)).
    ///
    /// On failure the draft and the local item are left as they were.
    pub async fn save_with<F, Fut>(
        &mut self,
        items: &mut [T],
        key: &T::Key,
        write: F,
    ) -> bool
    where
        F: FnOnce(T::Key, T::Draft) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let Some(draft) = self.pending_save(items, key) else {
            return false;
        };
        let Some(stored) = write(key.clone(), draft).await else {
            return false;
        };
        self.commit_save(items, key, stored);
        true
    }

    /// The key of another item that saving the draft of `key` would
    /// duplicate.
    pub fn conflicting_key(&self, items: &[T], key: &T::Key) -> Option<T::Key> {
        let draft = self.draft_for(key)?;
        let mut updated =
            items.iter().find(|item| item.key() == *key)?.clone();
        updated.apply_draft(&draft);
        let next = updated.key();
        (next != *key && items.iter().any(|item| item.key() == next))
            .then_some(next)
    }

    /// The draft of `key`, if it is the row being edited and saving it
    /// would not duplicate another item's key.
    pub fn pending_save(&self, items: &[T], key: &T::Key) -> Option<T::Draft> {
        let draft = self.draft_for(key)?;
        if let Some(taken) = self.conflicting_key(items, key) {
            tracing::warn!(?key, ?taken, "draft would duplicate a key");
            return None;
        }
        Some(draft)
    }

    /// Replace the item with `key` by the version the backend stored and
    /// close that row's edit if it is still open. Returns false if the item
    /// is gone from `items`.
    pub fn commit_save(
        &mut self,
        items: &mut [T],
        key: &T::Key,
        stored: T,
    ) -> bool {
        self.forget(key);
        match items.iter_mut().find(|item| item.key() == *key) {
            Some(item) => {
                *item = stored;
                true
            }
            None => false,
        }
    }

    /// Remove the item with `key`, ending its edit if it was being edited.
    pub fn delete(&mut self, items: &mut Vec<T>, key: &T::Key) -> bool {
        let before = items.len();
        items.retain(|item| item.key() != *key);
        self.forget(key);
        items.len() != before
    }

    /// Delete through a remote call, removing the local item only once
    /// `remove` reports success.
    pub async fn delete_with<F, Fut, R>(
        &mut self,
        items: &mut Vec<T>,
        key: &T::Key,
        remove: F,
    ) -> bool
    where
        F: FnOnce(T::Key) -> Fut,
        Fut: Future<Output = Option<R>>,
    {
        if remove(key.clone()).await.is_none() {
            return false;
        }
        self.delete(items, key)
    }

    fn draft_for(&self, key: &T::Key) -> Option<T::Draft> {
        self.current
            .as_ref()
            .filter(|current| current.key == *key)
            .map(|current| current.values.clone())
    }

    fn forget(&mut self, key: &T::Key) {
        if self.is_editing(key) {
            self.current = None;
        }
    }
}
