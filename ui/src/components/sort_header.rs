use client_state::SortOrder;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SortHeaderProps<F: PartialEq> {
    pub label: AttrValue,
    pub field: F,
    /// Order of this column when it is the active sort column
    pub order: Option<SortOrder>,
    pub on_sort: Callback<F>,
}

/// Clickable table header cell showing ▲/▼ on the active sort column.
#[function_component]
pub fn SortHeader<F>(props: &SortHeaderProps<F>) -> Html
where
    F: Copy + PartialEq + 'static,
{
    let onclick = {
        let on_sort = props.on_sort.clone();
        let field = props.field;
        Callback::from(move |_: MouseEvent| on_sort.emit(field))
    };

    html! {
        <th
            {onclick}
            class="px-4 py-2 text-left text-sm font-semibold cursor-pointer \
                   select-none text-neutral-700 dark:text-neutral-300"
        >
            {props.label.clone()}
            if let Some(order) = props.order {
                <span class="ml-1">{order.indicator()}</span>
            }
        </th>
    }
}
