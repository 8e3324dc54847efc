use client_state::fetch_translation;
use payloads::DictionaryEntry;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::hooks::use_api;
use crate::{State, get_api_client};

/// Translate one Pnar word to English.
#[function_component]
pub fn TranslationLookup() -> Html {
    let (state, _) = use_store::<State>();
    let word = use_state(String::new);
    let lookup = use_api(|(word, token): (String, String)| async move {
        fetch_translation(&get_api_client(), &word, &token).await
    });

    let oninput = {
        let word = word.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            word.set(input.value());
        })
    };

    let onsubmit = {
        let word = word.clone();
        let lookup = lookup.clone();
        let token = state.access_token().map(str::to_string);
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if let Some(token) = token.clone() {
                lookup.run(((*word).clone(), token));
            }
        })
    };

    let result = match (&lookup.state.error, &lookup.state.data) {
        (Some(error), _) => html! {
            <p class="text-sm text-red-700 dark:text-red-400">
                {error.clone()}
            </p>
        },
        (None, Some(entry)) => translation(entry),
        (None, None) => html! {},
    };

    html! {
        <form {onsubmit} class="space-y-4">
            <label class="block text-sm font-medium" for="pnar-word">
                {"Pnar word"}
            </label>
            <input
                id="pnar-word"
                class="w-full px-3 py-2 border rounded-md"
                placeholder="Enter a Pnar word"
                value={(*word).clone()}
                {oninput}
            />
            <button type="submit" disabled={lookup.state.loading}>
                {"Translate"}
            </button>
            {result}
        </form>
    }
}

fn translation(entry: &DictionaryEntry) -> Html {
    html! {
        <p class="text-lg">
            <span class="font-semibold">{entry.pnar_word.clone()}</span>
            {" → "}
            {entry.english_word.clone()}
        </p>
    }
}
