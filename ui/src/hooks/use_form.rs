use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use client_state::{
    FieldErrors, FieldValues, FormSession, FormState, SubmitError,
    SubmitOutcome,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Values and validation state of a form, with callbacks for its inputs.
pub struct UseFormHandle<V: FieldValues> {
    pub values: V,
    pub state: FormState<V::Field>,
    session: Rc<RefCell<FormSession<V>>>,
    rerender: Callback<()>,
}

impl<V: FieldValues> Clone for UseFormHandle<V> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            state: self.state.clone(),
            session: self.session.clone(),
            rerender: self.rerender.clone(),
        }
    }
}

impl<V: FieldValues + 'static> UseFormHandle<V> {
    fn update(&self, f: impl FnOnce(&mut FormSession<V>)) {
        f(&mut *self.session.borrow_mut());
        self.rerender.emit(());
    }

    pub fn value(&self, field: V::Field) -> String {
        self.values.get(field).into_owned()
    }

    /// Error to show next to `field`, once it has been touched.
    pub fn error(&self, field: V::Field) -> Option<String> {
        self.state.visible_error(&field).map(str::to_string)
    }

    pub fn set_value(&self, field: V::Field, value: String) {
        self.update(|session| session.handle_change(field, value));
    }

    pub fn oninput(&self, field: V::Field) -> Callback<InputEvent> {
        let handle = self.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            handle.set_value(field, input.value());
        })
    }

    pub fn onblur(&self, field: V::Field) -> Callback<FocusEvent> {
        let handle = self.clone();
        Callback::from(move |_| {
            handle.update(|session| session.handle_blur(field));
        })
    }

    pub fn set_field_error(&self, field: V::Field, message: String) {
        self.update(|session| session.set_field_error(field, message));
    }

    pub fn set_values(&self, values: V) {
        self.update(|session| session.set_values(values));
    }

    pub fn reset(&self) {
        self.update(FormSession::reset);
    }

    /// Submit callback for the form element. Invalid forms never reach
    /// `handler`; `on_done` receives the outcome.
    pub fn onsubmit<H, Fut>(
        &self,
        handler: H,
        on_done: Callback<SubmitOutcome>,
    ) -> Callback<SubmitEvent>
    where
        H: Fn(V) -> Fut + 'static,
        Fut: Future<Output = Result<(), SubmitError<V::Field>>> + 'static,
    {
        let handle = self.clone();
        let handler = Rc::new(handler);
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let values = handle.session.borrow_mut().begin_submit();
            handle.rerender.emit(());
            let Some(values) = values else {
                on_done.emit(SubmitOutcome::Invalid);
                return;
            };

            let handle = handle.clone();
            let handler = handler.clone();
            let on_done = on_done.clone();
            yew::platform::spawn_local(async move {
                let result = handler(values).await;
                let outcome = handle.session.borrow_mut().finish_submit(result);
                handle.rerender.emit(());
                on_done.emit(outcome);
            });
        })
    }
}

#[hook]
pub fn use_form<V, Val>(initial: V, validator: Val) -> UseFormHandle<V>
where
    V: FieldValues + 'static,
    Val: Fn(&V) -> FieldErrors<V::Field> + 'static,
{
    let session =
        use_mut_ref(move || FormSession::new(initial).with_validator(validator));
    let force_update = use_force_update();
    let rerender = Callback::from(move |_| force_update.force_update());

    let (values, state) = {
        let session = session.borrow();
        (session.values().clone(), session.state().clone())
    };

    UseFormHandle {
        values,
        state,
        session,
        rerender,
    }
}
