use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::rc::Rc;

use crate::FieldValues;

/// Field name to error message. A missing or empty message means the field
/// is valid.
pub type FieldErrors<F> = BTreeMap<F, String>;

type Validator<V> = Rc<dyn Fn(&V) -> FieldErrors<<V as FieldValues>::Field>>;

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F: Ord> {
    pub is_submitting: bool,
    pub errors: FieldErrors<F>,
    pub touched: BTreeSet<F>,
    /// Failure reported by the submit handler that belongs to no field.
    pub submit_error: Option<String>,
}

impl<F: Ord> Default for FormState<F> {
    fn default() -> Self {
        Self {
            is_submitting: false,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            submit_error: None,
        }
    }
}

impl<F: Ord> FormState<F> {
    pub fn error(&self, field: &F) -> Option<&str> {
        self.errors
            .get(field)
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }

    pub fn is_touched(&self, field: &F) -> bool {
        self.touched.contains(field)
    }

    /// The error to display next to a field: only shown once the user has
    /// interacted with it.
    pub fn visible_error(&self, field: &F) -> Option<&str> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|message| !message.is_empty())
    }
}

/// Failure reported by a submit handler.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError<F: Ord> {
    /// Problems attributable to specific fields.
    Fields(FieldErrors<F>),
    /// A failure of the submission as a whole.
    Form(String),
}

impl<F: Ord> SubmitError<F> {
    pub fn field(field: F, message: impl Into<String>) -> Self {
        Self::Fields(BTreeMap::from([(field, message.into())]))
    }
}

impl<F: Ord> From<payloads::ClientError> for SubmitError<F> {
    fn from(error: payloads::ClientError) -> Self {
        Self::Form(error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the handler was not run.
    Invalid,
    Submitted,
    /// The handler ran and reported a failure.
    Failed,
}

/// Values, validation errors and touched flags of one form.
///
/// Submitting validates first and only hands the values to the submit
/// handler when every field is valid. A failed validation marks every field
/// touched so all problems show at once.
pub struct FormSession<V: FieldValues> {
    initial: V,
    values: V,
    state: FormState<V::Field>,
    validator: Option<Validator<V>>,
}

impl<V: FieldValues> FormSession<V> {
    pub fn new(initial: V) -> Self {
        Self {
            values: initial.clone(),
            initial,
            state: FormState::default(),
            validator: None,
        }
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&V) -> FieldErrors<V::Field> + 'static,
    ) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    pub fn values(&self) -> &V {
        &self.values
    }

    pub fn state(&self) -> &FormState<V::Field> {
        &self.state
    }

    /// Update a value. Clears that field's error, but does not revalidate.
    pub fn handle_change(&mut self, field: V::Field, value: impl Into<String>) {
        self.values.set(field, value.into());
        if self.state.error(&field).is_some() {
            self.state.errors.remove(&field);
        }
    }

    pub fn handle_blur(&mut self, field: V::Field) {
        self.state.touched.insert(field);
    }

    /// Run the validator over all values, replacing the previous errors.
    /// Returns true when the form is valid.
    pub fn validate(&mut self) -> bool {
        self.state.errors = match &self.validator {
            Some(validator) => validator(&self.values),
            None => FieldErrors::new(),
        };
        !self.state.has_errors()
    }

    /// First half of a submission: validate, and if valid enter the
    /// submitting state and return the values to submit.
    pub fn begin_submit(&mut self) -> Option<V> {
        if !self.validate() {
            self.state.touched = V::fields().iter().copied().collect();
            return None;
        }
        self.state.is_submitting = true;
        self.state.submit_error = None;
        Some(self.values.clone())
    }

    /// Second half of a submission: leave the submitting state and record
    /// what the handler reported.
    pub fn finish_submit(
        &mut self,
        result: Result<(), SubmitError<V::Field>>,
    ) -> SubmitOutcome {
        self.state.is_submitting = false;
        match result {
            Ok(()) => SubmitOutcome::Submitted,
            Err(SubmitError::Fields(errors)) => {
                for (field, message) in errors {
                    self.set_field_error(field, message);
                }
                SubmitOutcome::Failed
            }
            Err(SubmitError::Form(message)) => {
                tracing::error!(%message, "form submission failed");
                self.state.submit_error = Some(message);
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate and, if valid, run `handler` with the current values.
    pub async fn handle_submit<H, Fut>(&mut self, handler: H) -> SubmitOutcome
    where
        H: FnOnce(V) -> Fut,
        Fut: Future<Output = Result<(), SubmitError<V::Field>>>,
    {
        let Some(values) = self.begin_submit() else {
            return SubmitOutcome::Invalid;
        };
        let result = handler(values).await;
        self.finish_submit(result)
    }

    pub fn set_field_error(&mut self, field: V::Field, message: String) {
        self.state.errors.insert(field, message);
    }

    pub fn set_values(&mut self, values: V) {
        self.values = values;
    }

    /// Restore the initial values and a fresh state.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.state = FormState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{EntryField, EntryForm, validate_entry};
    use std::cell::Cell;

    fn entry_form(pnar: &str, english: &str) -> FormSession<EntryForm> {
        let mut form = FormSession::new(EntryForm::default())
            .with_validator(validate_entry);
        form.handle_change(EntryField::PnarWord, pnar);
        form.handle_change(EntryField::EnglishWord, english);
        form
    }

    #[tokio::test]
    async fn invalid_submit_blocks_handler_and_touches_all() {
        let mut form = entry_form("", "ok");
        let called = Cell::new(false);

        let outcome = form
            .handle_submit(|_| async {
                called.set(true);
                Ok(())
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(!called.get());
        let state = form.state();
        assert_eq!(
            state.error(&EntryField::PnarWord),
            Some("Pnar word is required")
        );
        assert_eq!(state.error(&EntryField::EnglishWord), None);
        assert!(state.is_touched(&EntryField::PnarWord));
        assert!(state.is_touched(&EntryField::EnglishWord));
        assert!(!state.is_submitting);
    }

    #[tokio::test]
    async fn valid_submit_runs_handler_with_values() {
        let mut form = entry_form("kitab", "book");

        let outcome = form
            .handle_submit(|values| async move {
                assert_eq!(values.pnar_word, "kitab");
                Ok(())
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert!(!form.state().is_submitting);
        assert!(form.state().touched.is_empty());
    }

    #[tokio::test]
    async fn handler_field_errors_are_surfaced() {
        let mut form = entry_form("kitab", "book");

        let outcome = form
            .handle_submit(|_| async {
                Err(SubmitError::field(
                    EntryField::PnarWord,
                    "Entry already exists",
                ))
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            form.state().error(&EntryField::PnarWord),
            Some("Entry already exists")
        );
        assert!(!form.state().is_submitting);
    }

    #[tokio::test]
    async fn handler_form_error_is_recorded() {
        let mut form = entry_form("kitab", "book");

        form.handle_submit(|_| async {
            Err(SubmitError::Form("Service unavailable".into()))
        })
        .await;

        assert_eq!(
            form.state().submit_error.as_deref(),
            Some("Service unavailable")
        );
        assert!(!form.state().has_errors());
    }

    #[test]
    fn submitting_flag_spans_the_handler() {
        let mut form = entry_form("kitab", "book");

        let values = form.begin_submit().expect("form is valid");
        assert_eq!(values.english_word, "book");
        assert!(form.state().is_submitting);

        form.finish_submit(Ok(()));
        assert!(!form.state().is_submitting);
    }

    #[test]
    fn change_clears_only_that_fields_error() {
        let mut form = entry_form("", "");
        assert!(!form.validate());

        form.handle_change(EntryField::PnarWord, "k");

        assert_eq!(form.state().error(&EntryField::PnarWord), None);
        assert_eq!(
            form.state().error(&EntryField::EnglishWord),
            Some("English word is required")
        );
    }

    #[test]
    fn blur_touches_without_validating() {
        let mut form = entry_form("", "");

        form.handle_blur(EntryField::PnarWord);

        assert!(form.state().is_touched(&EntryField::PnarWord));
        assert!(!form.state().is_touched(&EntryField::EnglishWord));
        assert!(form.state().errors.is_empty());
        assert_eq!(form.state().visible_error(&EntryField::PnarWord), None);
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut form = entry_form("", "water");
        form.validate();
        form.handle_blur(EntryField::EnglishWord);

        form.reset();

        assert_eq!(form.values(), &EntryForm::default());
        assert_eq!(form.state(), &FormState::default());
    }
}
