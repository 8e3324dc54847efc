use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

/// A set of named, string-editable values: a form's inputs or the draft of
/// a row being edited inline.
pub trait FieldValues: Clone + Debug + PartialEq {
    type Field: Copy + Eq + Ord + Hash + Debug + 'static;

    /// Every field, in display order.
    fn fields() -> &'static [Self::Field];

    fn get(&self, field: Self::Field) -> Cow<'_, str>;

    fn set(&mut self, field: Self::Field, value: String);
}
