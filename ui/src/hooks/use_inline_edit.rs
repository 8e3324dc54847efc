use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use client_state::{Editable, FieldValues, InlineEditSession, Keyed};
use yew::prelude::*;

/// Inline editing over a list the hook owns.
///
/// The list lives in one shared cell, so remote saves and deletes that
/// settle out of order each apply their change to the list as it is when
/// they land.
pub struct UseInlineEditHandle<T: Editable> {
    pub session: InlineEditSession<T>,
    /// The list as of this render.
    pub items: Rc<Vec<T>>,
    shared: Rc<RefCell<InlineEditSession<T>>>,
    list: Rc<RefCell<Rc<Vec<T>>>>,
    rerender: Callback<()>,
}

impl<T: Editable> Clone for UseInlineEditHandle<T> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            items: self.items.clone(),
            shared: self.shared.clone(),
            list: self.list.clone(),
            rerender: self.rerender.clone(),
        }
    }
}

impl<T: Editable + 'static> UseInlineEditHandle<T> {
    fn update<R>(&self, f: impl FnOnce(&mut InlineEditSession<T>) -> R) -> R {
        let result = f(&mut *self.shared.borrow_mut());
        self.rerender.emit(());
        result
    }

    fn update_list<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>, &mut InlineEditSession<T>) -> R,
    ) -> R {
        let result = {
            let mut list = self.list.borrow_mut();
            let mut session = self.shared.borrow_mut();
            f(Rc::make_mut(&mut *list), &mut *session)
        };
        self.rerender.emit(());
        result
    }

    /// Replace the whole list, e.g. with a freshly fetched page. An open
    /// edit survives only if its row is still present.
    pub fn set_items(&self, items: Vec<T>) {
        self.update_list(|list, session| {
            let gone = session.editing_key().is_some_and(|key| {
                !items.iter().any(|item| item.key() == *key)
            });
            if gone {
                session.cancel();
            }
            *list = items;
        });
    }

    /// The list as it is now, which may be newer than `items`.
    pub fn snapshot(&self) -> Rc<Vec<T>> {
        self.list.borrow().clone()
    }

    /// Change the current list directly, e.g. to add a row.
    pub fn with_items<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        self.update_list(|list, _| f(list))
    }

    pub fn start_edit(&self, key: &T::Key) -> bool {
        let items = self.snapshot();
        self.update(|session| session.start_edit(&items, key))
    }

    pub fn update_draft_field(
        &self,
        field: <T::Draft as FieldValues>::Field,
        value: String,
    ) {
        self.update(|session| session.update_draft_field(field, value));
    }

    pub fn cancel(&self) {
        self.update(InlineEditSession::cancel);
    }

    /// The key another row already has that saving `key` would duplicate.
    pub fn conflicting_key(&self, key: &T::Key) -> Option<T::Key> {
        self.shared.borrow().conflicting_key(&self.list.borrow(), key)
    }

    /// Save the draft into the local list.
    pub fn save(&self, key: &T::Key) -> bool {
        self.update_list(|items, session| session.save(items, key))
    }

    pub fn delete(&self, key: &T::Key) -> bool {
        self.update_list(|items, session| session.delete(items, key))
    }

    /// Save the draft through `write`, typically an
    /// [`AsyncOperation`](client_state::AsyncOperation) call. The list and
    /// the session only change once the write succeeds.
    pub fn save_with<F, Fut>(&self, key: T::Key, write: F)
    where
        F: FnOnce(T::Key, T::Draft) -> Fut + 'static,
        Fut: Future<Output = Option<T>> + 'static,
    {
        let draft = {
            let items = self.list.borrow();
            self.shared.borrow().pending_save(&items, &key)
        };
        let Some(draft) = draft else {
            return;
        };
        let handle = self.clone();
        yew::platform::spawn_local(async move {
            let Some(stored) = write(key.clone(), draft).await else {
                return;
            };
            handle.update_list(|items, session| {
                session.commit_save(items, &key, stored)
            });
        });
    }

    /// Delete through `remove`, dropping the row locally once it succeeds.
    pub fn delete_with<F, Fut, R>(&self, key: T::Key, remove: F)
    where
        F: FnOnce(T::Key) -> Fut + 'static,
        Fut: Future<Output = Option<R>> + 'static,
    {
        let handle = self.clone();
        yew::platform::spawn_local(async move {
            if remove(key.clone()).await.is_none() {
                return;
            }
            handle.update_list(|items, session| session.delete(items, &key));
        });
    }
}

/// Edit one row of a list at a time, keyed by each row's identity.
#[hook]
pub fn use_inline_edit<T, I>(initial: I) -> UseInlineEditHandle<T>
where
    T: Editable + 'static,
    I: FnOnce() -> Vec<T>,
{
    let shared = use_mut_ref(InlineEditSession::<T>::default);
    let list = use_mut_ref(move || Rc::new(initial()));
    let force_update = use_force_update();
    let rerender = Callback::from(move |_| force_update.force_update());
    let session = shared.borrow().clone();
    let items = list.borrow().clone();

    UseInlineEditHandle {
        session,
        items,
        shared,
        list,
        rerender,
    }
}
