use std::rc::Rc;

use payloads::DictionaryEntry;
use yew::prelude::*;

use crate::components::{DictionaryTable, NewEntryForm};

/// Counts changes made outside the table that it has to refetch for.
#[derive(Default, PartialEq)]
struct Revision(u32);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

/// The new-entry form above the dictionary table. A created entry
/// refetches the table's current page.
#[function_component]
pub fn DictionaryAdmin() -> Html {
    let revision = use_reducer(Revision::default);

    let on_created = {
        let revision = revision.dispatcher();
        Callback::from(move |entry: DictionaryEntry| {
            tracing::debug!(id = %entry.id, "entry created");
            revision.dispatch(());
        })
    };

    html! {
        <div class="space-y-8">
            <NewEntryForm {on_created} />
            <DictionaryTable revision={revision.0} />
        </div>
    }
}
