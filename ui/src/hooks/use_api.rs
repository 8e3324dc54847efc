use std::fmt::Display;
use std::future::Future;

use client_state::{AsyncOperation, RequestState};
use yew::prelude::*;

/// State and controls of one wrapped API call.
pub struct UseApiHandle<A, T> {
    pub state: RequestState<T>,
    operation: AsyncOperation<A, T>,
}

impl<A, T: Clone> Clone for UseApiHandle<A, T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            operation: self.operation.clone(),
        }
    }
}

impl<A: 'static, T: Clone + 'static> UseApiHandle<A, T> {
    /// Start a call in the background. Its outcome shows up in `state` on
    /// the next render.
    pub fn run(&self, args: A) {
        let operation = self.operation.clone();
        yew::platform::spawn_local(async move {
            operation.execute(args).await;
        });
    }

    /// A callback that starts a call with the emitted arguments.
    pub fn callback(&self) -> Callback<A> {
        let handle = self.clone();
        Callback::from(move |args| handle.run(args))
    }

    /// The underlying operation, for callers that need to await the result.
    pub fn operation(&self) -> AsyncOperation<A, T> {
        self.operation.clone()
    }

    pub fn reset(&self) {
        self.operation.reset();
    }

    pub fn set_data(&self, data: Option<T>) {
        self.operation.set_data(data);
    }

    /// Render based on the request state with contextual loading and error
    /// messages.
    ///
    /// Without data this shows "Loading {context}..." or the error. Once
    /// data is present `render_fn` receives it along with whether a newer
    /// call is in flight and the error of a failed refresh.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match &self.state.data {
            Some(data) => {
                render_fn(data, self.state.loading, self.state.error.as_ref())
            }
            None => html! {
                <crate::components::RequestStatus
                    context={context.to_string()}
                    loading={self.state.loading}
                    error={self.state.error.clone()}
                />
            },
        }
    }
}

/// Wrap an async API call so that a component tracks its loading, error and
/// data, with results of superseded calls discarded.
///
/// Calls are started explicitly with [`UseApiHandle::run`]. Anything the
/// call needs, the auth token included, is passed in as its argument.
///
/// # Example
///
/// ```rust,ignore
/// let entry = use_api(|(id, token): (EntryId, String)| async move {
///     get_api_client().get_entry(&id, &token).await
/// });
/// ```
#[hook]
pub fn use_api<A, T, F, Fut, E>(call: F) -> UseApiHandle<A, T>
where
    A: 'static,
    T: Clone + 'static,
    F: Fn(A) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
    E: Display + 'static,
{
    let state = use_state(RequestState::<T>::default);
    let operation = {
        let state = state.clone();
        use_memo((), move |_| {
            let operation = AsyncOperation::new(call);
            operation.subscribe(move |snapshot| state.set(snapshot.clone()));
            operation
        })
    };

    // Abort whatever is still in flight when the component goes away
    {
        let operation = (*operation).clone();
        use_effect_with((), move |_| {
            move || {
                operation.subscribe(|_| {});
                operation.reset();
            }
        });
    }

    UseApiHandle {
        state: (*state).clone(),
        operation: (*operation).clone(),
    }
}
