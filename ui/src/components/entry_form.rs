use client_state::{
    EntryForm, FieldValues, SubmitError, SubmitOutcome, validate_entry,
};
use payloads::DictionaryEntry;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::hooks::use_form;
use crate::{State, get_api_client};

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Called with the entry the backend stored
    pub on_created: Callback<DictionaryEntry>,
}

/// Form for adding a dictionary entry.
#[function_component]
pub fn NewEntryForm(props: &Props) -> Html {
    let (state, _) = use_store::<State>();
    let form = use_form(EntryForm::default(), validate_entry);

    let onsubmit = {
        let token = state.access_token().map(str::to_string);
        let on_created = props.on_created.clone();
        let reset = form.clone();
        form.onsubmit(
            move |values: EntryForm| {
                let token = token.clone();
                let on_created = on_created.clone();
                async move {
                    let Some(token) = token else {
                        return Err(SubmitError::Form("Not signed in".into()));
                    };
                    let entry = get_api_client()
                        .create_entry(&values.to_create(), &token)
                        .await?;
                    on_created.emit(entry);
                    Ok(())
                }
            },
            Callback::from(move |outcome| {
                if outcome == SubmitOutcome::Submitted {
                    reset.reset();
                }
            }),
        )
    };

    let fields = EntryForm::fields()
        .iter()
        .map(|&field| {
            let error = form.error(field);
            html! {
                <div class="space-y-1">
                    <label class="block text-sm font-medium">
                        {field.label()}
                    </label>
                    <input
                        name={field.name()}
                        class="w-full px-3 py-2 border rounded-md"
                        value={form.value(field)}
                        oninput={form.oninput(field)}
                        onblur={form.onblur(field)}
                    />
                    if let Some(error) = error {
                        <p class="text-sm text-red-700 dark:text-red-400">
                            {error}
                        </p>
                    }
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <form {onsubmit} class="space-y-4">
            {fields}
            if let Some(error) = form.state.submit_error.clone() {
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            }
            <button type="submit" disabled={form.state.is_submitting}>
                {if form.state.is_submitting {
                    "Saving..."
                } else {
                    "Add entry"
                }}
            </button>
        </form>
    }
}
