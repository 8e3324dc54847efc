use std::cell::RefCell;
use std::fmt::Display;
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable, FutureExt, LocalBoxFuture};

use crate::RequestState;

/// Message used when a failure carries no message of its own.
pub const FALLBACK_ERROR: &str = "An unexpected error occurred";

type BoxedCall<A, T> =
    Rc<dyn Fn(A) -> LocalBoxFuture<'static, Result<T, String>>>;
type Listener<T> = Rc<dyn Fn(&RequestState<T>)>;

struct Inner<T> {
    state: RequestState<T>,
    /// Sequence number of the most recently issued call.
    latest: u64,
    in_flight: Option<AbortHandle>,
    listener: Option<Listener<T>>,
}

/// Tracks the loading, error and data of repeated calls to one async
/// function.
///
/// Every `execute` is tagged with a sequence number. A result is only
/// committed if its call is still the latest one issued, so a slow response
/// to an earlier call can never overwrite a newer one. Starting a call also
/// aborts the previous in-flight call so its work is not wasted.
///
/// Clones share the same state.
pub struct AsyncOperation<A, T> {
    call: BoxedCall<A, T>,
    inner: Rc<RefCell<Inner<T>>>,
}

impl<A, T> Clone for AsyncOperation<A, T> {
    fn clone(&self) -> Self {
        Self {
            call: self.call.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<A: 'static, T: Clone + 'static> AsyncOperation<A, T> {
    pub fn new<F, Fut, E>(call: F) -> Self
    where
        F: Fn(A) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
        E: Display + 'static,
    {
        let call: BoxedCall<A, T> = Rc::new(move |args| {
            let pending = call(args);
            async move { pending.await.map_err(|e| error_message(&e)) }
                .boxed_local()
        });
        Self {
            call,
            inner: Rc::new(RefCell::new(Inner {
                state: RequestState::default(),
                latest: 0,
                in_flight: None,
                listener: None,
            })),
        }
    }

    pub fn state(&self) -> RequestState<T> {
        self.inner.borrow().state.clone()
    }

    /// Register the function called after every state transition. Replaces
    /// any previous listener.
    pub fn subscribe(&self, listener: impl Fn(&RequestState<T>) + 'static) {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
    }

    /// Run the wrapped function.
    ///
    /// Returns the result on success. Returns `None` on failure, with the
    /// message stored in the state's `error`, and also when the call was
    /// superseded by a later `execute` or a `reset`, in which case the state
    /// is left to the newer call.
    pub async fn execute(&self, args: A) -> Option<T> {
        let (sequence, registration) = {
            let mut inner = self.inner.borrow_mut();
            inner.latest += 1;
            if let Some(previous) = inner.in_flight.take() {
                previous.abort();
            }
            let (handle, registration) = AbortHandle::new_pair();
            inner.in_flight = Some(handle);
            inner.state.begin();
            (inner.latest, registration)
        };
        self.notify();

        let outcome = Abortable::new((self.call)(args), registration).await;

        let value = {
            let mut inner = self.inner.borrow_mut();
            if inner.latest != sequence {
                tracing::debug!(
                    sequence,
                    latest = inner.latest,
                    "discarding stale result"
                );
                return None;
            }
            inner.in_flight = None;
            match outcome {
                Ok(Ok(data)) => {
                    inner.state.succeed(data.clone());
                    Some(data)
                }
                Ok(Err(message)) => {
                    tracing::debug!(sequence, %message, "call failed");
                    inner.state.fail(message);
                    None
                }
                // Aborts always come with a newer sequence number
                Err(_aborted) => return None,
            }
        };
        self.notify();
        value
    }

    /// Whether a call is in flight.
    pub fn is_pending(&self) -> bool {
        self.inner.borrow().in_flight.is_some()
    }

    /// Run the wrapped function unless a call is already in flight.
    ///
    /// Meant for mutations, whose earlier call may already have reached the
    /// server and so must not be superseded. A refused call returns `None`
    /// and leaves the state untouched.
    pub async fn execute_exclusive(&self, args: A) -> Option<T> {
        if self.is_pending() {
            tracing::debug!("call already in flight, ignoring");
            return None;
        }
        self.execute(args).await
    }

    /// Return to the initial state. Any in-flight call is aborted and its
    /// result will be ignored.
    pub fn reset(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.latest += 1;
            if let Some(in_flight) = inner.in_flight.take() {
                in_flight.abort();
            }
            inner.state = RequestState::default();
        }
        self.notify();
    }

    pub fn set_data(&self, data: Option<T>) {
        self.inner.borrow_mut().state.data = data;
        self.notify();
    }

    fn notify(&self) {
        let (listener, state) = {
            let inner = self.inner.borrow();
            match &inner.listener {
                Some(listener) => (listener.clone(), inner.state.clone()),
                None => return,
            }
        };
        listener(&state);
    }
}

fn error_message(error: &impl Display) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}
