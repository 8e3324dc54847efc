use client_state::{
    Editable, FieldValues, SortOrder, SubmitError, SubmitOutcome, UserField,
    UserForm, ViewFilters, add_user, user_validator,
};
use payloads::UserAccount;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::{PaginationControls, SortHeader};
use crate::hooks::{
    use_collection_view, use_form, use_inline_edit, use_preferences,
};

const COLUMNS: [UserField; 2] = [UserField::Email, UserField::Password];
const DUPLICATE_EMAIL: &str = "Email already exists";

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Accounts listed when the table first renders
    #[prop_or_default]
    pub initial: Vec<UserAccount>,
}

/// User accounts held in the browser: add, search, sort, page, inline edit
/// and delete.
#[function_component]
pub fn UsersTable(props: &Props) -> Html {
    let (preferences, _) = use_preferences();
    let edit = use_inline_edit({
        let initial = props.initial.clone();
        move || initial
    });
    let view = use_collection_view(
        edit.items.clone(),
        ViewFilters::new(preferences.page_size)
            .sorted_by(UserField::Email, SortOrder::Asc),
    );
    let form = {
        let edit = edit.clone();
        use_form(UserForm::default(), move |values: &UserForm| {
            user_validator(edit.snapshot().to_vec())(values)
        })
    };
    let edit_error = use_state(|| None::<String>);

    let onsubmit = {
        let edit = edit.clone();
        let reset = form.clone();
        form.onsubmit(
            move |values: UserForm| {
                let added = edit.with_items(|users| add_user(users, &values));
                async move {
                    if added {
                        Ok(())
                    } else {
                        let email = UserField::Email;
                        Err(SubmitError::field(email, DUPLICATE_EMAIL))
                    }
                }
            },
            Callback::from(move |outcome| {
                if outcome == SubmitOutcome::Submitted {
                    reset.reset();
                }
            }),
        )
    };

    let add_fields = COLUMNS
        .iter()
        .map(|&field| {
            html! {
                <div class="space-y-1">
                    <label class="block text-sm font-medium">
                        {field.label()}
                    </label>
                    <input
                        class="w-full px-3 py-2 border rounded-md"
                        value={form.value(field)}
                        oninput={form.oninput(field)}
                        onblur={form.onblur(field)}
                    />
                    if let Some(error) = form.error(field) {
                        <p class="text-sm text-red-700 dark:text-red-400">
                            {error}
                        </p>
                    }
                </div>
            }
        })
        .collect::<Html>();

    let on_search = {
        let set_search = view.set_search.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            set_search.emit(input.value());
        })
    };

    let header = COLUMNS
        .iter()
        .map(|&field| {
            html! {
                <SortHeader<UserField>
                    label={field.label()}
                    {field}
                    order={view.sort_order_of(field)}
                    on_sort={view.select_sort.clone()}
                />
            }
        })
        .collect::<Html>();

    let rows = view
        .rows
        .iter()
        .map(|user| {
            let key = user.email.clone();
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
                    let edit_error = edit_error.clone();
                    let key = key.clone();
                    Callback::from(move |_: MouseEvent| {
                        if edit.conflicting_key(&key).is_some() {
                            edit_error.set(Some(DUPLICATE_EMAIL.to_string()));
                        } else {
                            edit.save(&key);
                            edit_error.set(None);
                        }
                    })
                };
                let on_cancel = {
                    let edit = edit.clone();
                    let edit_error = edit_error.clone();
                    Callback::from(move |_: MouseEvent| {
                        edit.cancel();
                        edit_error.set(None);
                    })
                };

                html! {
                    <tr key={key.clone()}>
                        {inputs}
                        <td class="px-4 py-2 space-x-2">
                            <button onclick={on_save}>{"Save"}</button>
                            <button onclick={on_cancel}>{"Cancel"}</button>
                        </td>
                    </tr>
                }
            } else {
                let on_edit = {
                    let edit = edit.clone();
                    let edit_error = edit_error.clone();
                    let key = key.clone();
                    Callback::from(move |_: MouseEvent| {
                        edit.start_edit(&key);
                        edit_error.set(None);
                    })
                };
                let on_delete = {
                    let edit = edit.clone();
                    let key = key.clone();
                    Callback::from(move |_: MouseEvent| {
                        edit.delete(&key);
                    })
                };
                let cells = COLUMNS
                    .iter()
                    .map(|&field| {
                        html! {
                            <td class="px-4 py-2">
                                {user.draft().get(field).into_owned()}
                            </td>
                        }
                    })
                    .collect::<Html>();

                html! {
                    <tr key={key.clone()}>
                        {cells}
                        <td class="px-4 py-2 space-x-2">
                            <button onclick={on_edit}>{"Edit"}</button>
                            <button onclick={on_delete}>{"Delete"}</button>
                        </td>
                    </tr>
                }
            }
        })
        .collect::<Html>();

    html! {
        <div class="space-y-6">
            <form {onsubmit} class="space-y-4">
                {add_fields}
                <button type="submit">{"Add User"}</button>
            </form>
            <input
                type="search"
                placeholder="Search users..."
                class="w-full px-3 py-2 border rounded-md"
                value={view.filters.search.clone()}
                oninput={on_search}
            />
            if let Some(error) = (*edit_error).clone() {
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            }
            <table class="min-w-full">
                <thead><tr>{header}<th /></tr></thead>
                <tbody>{rows}</tbody>
            </table>
            <PaginationControls
                page={view.filters.page}
                total_pages={view.total_pages}
                on_page_change={view.set_page.clone()}
            />
        </div>
    }
}
