use client_state::{
    DEFAULT_DEBOUNCE_MS, Editable, EntryField, EntryForm, FieldValues,
    SortOrder, ViewFilters, derive_view, entry_query,
};
use payloads::requests::{EntryFilters, UpdateDictionaryEntry};
use payloads::{DictionaryEntry, EntryId};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::{PaginationControls, SortHeader};
use crate::hooks::{use_api, use_debounced, use_inline_edit, use_preferences};
use crate::{State, get_api_client};

const COLUMNS: [EntryField; 4] = [
    EntryField::PnarWord,
    EntryField::EnglishWord,
    EntryField::PartOfSpeech,
    EntryField::DifficultyLevel,
];

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Changing this refetches the current page, e.g. after an entry was
    /// added elsewhere
    #[prop_or_default]
    pub revision: u32,
}

/// Searchable, sortable and paged dictionary table with inline editing.
///
/// Search and paging run on the backend: every settled search term and
/// page change fetches one page, and responses to superseded requests are
/// dropped. Sorting applies to the fetched page.
#[function_component]
pub fn DictionaryTable(props: &Props) -> Html {
    let (state, _) = use_store::<State>();
    let token = state.access_token().map(str::to_string);
    let (preferences, _) = use_preferences();

    let load = use_api(|(filters, token): (EntryFilters, String)| async move {
        get_api_client().get_entries(&filters, &token).await
    });
    let update = use_api(|args: (EntryId, UpdateDictionaryEntry, String)| {
        let (id, changes, token) = args;
        async move {
            get_api_client().update_entry(&id, &changes, &token).await
        }
    });
    let remove = use_api(|(id, token): (EntryId, String)| async move {
        get_api_client().delete_entry(&id, &token).await
    });

    let filters = use_state(|| {
        ViewFilters::new(preferences.page_size)
            .sorted_by(EntryField::PnarWord, SortOrder::Asc)
    });
    let query = entry_query(&filters);

    {
        let load = load.clone();
        use_effect_with(
            (token.clone(), query.clone(), props.revision),
            move |(token, query, _)| {
                if let Some(token) = token.clone() {
                    load.run((query.clone(), token));
                }
            },
        );
    }

    let edit = use_inline_edit(Vec::<DictionaryEntry>::new);
    {
        let edit = edit.clone();
        let filters = filters.clone();
        use_effect_with(load.state.data.clone(), move |data| {
            let Some(page) = data else {
                return;
            };
            edit.set_items(page.items.clone());
            // A delete can empty the last page
            if let Some(pagination) = page.pagination {
                let pages = pagination.pages as usize;
                if pages > 0 && filters.page > pages {
                    let mut next = (*filters).clone();
                    next.set_page(pages);
                    filters.set(next);
                }
            }
        });
    }

    let search_input = use_state(String::new);
    let search = use_debounced((*search_input).clone(), DEFAULT_DEBOUNCE_MS);
    {
        let filters = filters.clone();
        use_effect_with(search, move |search| {
            if filters.search != *search {
                let mut next = (*filters).clone();
                next.set_search(search.clone());
                filters.set(next);
            }
        });
    }

    let on_search_input = {
        let search_input = search_input.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            search_input.set(input.value());
        })
    };

    let select_sort = {
        let filters = filters.clone();
        Callback::from(move |field| {
            let mut next = (*filters).clone();
            next.select_sort(field);
            filters.set(next);
        })
    };

    let set_page = {
        let filters = filters.clone();
        Callback::from(move |page| {
            let mut next = (*filters).clone();
            next.set_page(page);
            filters.set(next);
        })
    };

    let Some(token) = token else {
        return html! {};
    };

    let header = COLUMNS
        .iter()
        .map(|&field| {
            html! {
                <SortHeader<EntryField>
                    label={field.label()}
                    {field}
                    order={filters.sort.and_then(|sort| sort.order_of(field))}
                    on_sort={select_sort.clone()}
                />
            }
        })
        .collect::<Html>();

    let busy = update.state.loading || remove.state.loading;
    let sort = filters.sort_only(edit.items.len());
    let sorted = derive_view(edit.items.as_slice(), &sort);

    let rows = sorted
        .rows
        .iter()
        .map(|entry| {
            let key = entry.id.clone();
            if edit.session.is_editing(&key) {
                let draft = edit.session.draft().cloned().unwrap_or_default();
                let inputs = COLUMNS
                    .iter()
                    .map(|&field| {
                        let oninput = {
                            let edit = edit.clone();
                            Callback::from(move |event: InputEvent| {
                                let input: HtmlInputElement =
                                    event.target_unchecked_into();
                                edit.update_draft_field(field, input.value());
                            })
                        };
                        html! {
                            <td class="px-4 py-2">
                                <input
                                    class="w-full px-2 py-1 border rounded"
                                    value={draft.get(field).into_owned()}
                                    {oninput}
                                />
                            </td>
                        }
                    })
                    .collect::<Html>();

                let on_save = {
                    let edit = edit.clone();
                    let operation = update.operation();
                    let token = token.clone();
                    let key = key.clone();
                    Callback::from(move |_: MouseEvent| {
                        let operation = operation.clone();
                        let token = token.clone();
                        edit.save_with(
                            key.clone(),
                            move |id, draft: EntryForm| async move {
                                let changes = draft.to_update();
                                operation
                                    .execute_exclusive((id, changes, token))
                                    .await
                            },
                        );
                    })
                };
                let on_cancel = {
                    let edit = edit.clone();
                    Callback::from(move |_: MouseEvent| edit.cancel())
                };

                html! {
                    <tr key={key.to_string()}>
                        {inputs}
                        <td class="px-4 py-2 space-x-2">
                            <button onclick={on_save} disabled={busy}>
                                {"Save"}
                            </button>
                            <button onclick={on_cancel}>{"Cancel"}</button>
                        </td>
                    </tr>
                }
            } else {
                let on_edit = {
                    let edit = edit.clone();
                    let key = key.clone();
                    Callback::from(move |_: MouseEvent| {
                        edit.start_edit(&key);
                    })
                };
                let on_delete = {
                    let edit = edit.clone();
                    let operation = remove.operation();
                    let load = load.clone();
                    let query = query.clone();
                    let token = token.clone();
                    let key = key.clone();
                    Callback::from(move |_: MouseEvent| {
                        let operation = operation.clone();
                        let load = load.clone();
                        let query = query.clone();
                        let token = token.clone();
                        edit.delete_with(key.clone(), move |id| async move {
                            let deleted = operation
                                .execute_exclusive((id, token.clone()))
                                .await;
                            // Pull the next entry up into the page
                            if deleted.is_some() {
                                load.run((query, token));
                            }
                            deleted
                        });
                    })
                };
                let cells = COLUMNS
                    .iter()
                    .map(|&field| {
                        html! {
                            <td class="px-4 py-2">
                                {entry.draft().get(field).into_owned()}
                            </td>
                        }
                    })
                    .collect::<Html>();

                html! {
                    <tr key={key.to_string()}>
                        {cells}
                        <td class="px-4 py-2 space-x-2">
                            <button onclick={on_edit}>{"Edit"}</button>
                            <button onclick={on_delete} disabled={busy}>
                                {"Delete"}
                            </button>
                        </td>
                    </tr>
                }
            }
        })
        .collect::<Html>();

    let action_error =
        update.state.error.clone().or_else(|| remove.state.error.clone());

    html! {
        <div class="space-y-4">
            <input
                type="search"
                placeholder="Search Pnar or English"
                class="w-full px-3 py-2 border rounded-md"
                value={(*search_input).clone()}
                oninput={on_search_input}
            />
            if let Some(error) = action_error {
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            }
            {load.render("entries", |page, is_loading, error| html! {
                <>
                    if let Some(error) = error {
                        <p class="text-sm text-red-700 dark:text-red-400">
                            {error.clone()}
                        </p>
                    }
                    <table class="min-w-full">
                        <thead><tr>{header.clone()}<th /></tr></thead>
                        <tbody>{rows.clone()}</tbody>
                    </table>
                    if let Some(pagination) = page.pagination {
                        <p class="text-sm text-neutral-600">
                            {format!("{} entries", pagination.total)}
                        </p>
                        <PaginationControls
                            page={pagination.page as usize}
                            total_pages={pagination.pages as usize}
                            on_page_change={set_page.clone()}
                            {is_loading}
                        />
                    }
                </>
            })}
        </div>
    }
}
