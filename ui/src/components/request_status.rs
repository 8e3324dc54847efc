use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Contextual name like "entries" or "users"
    pub context: AttrValue,
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

/// Placeholder shown while a request has produced no data yet.
#[function_component]
pub fn RequestStatus(props: &Props) -> Html {
    if props.loading {
        html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("Loading {}...", props.context)}
                </p>
            </div>
        }
    } else if let Some(error) = &props.error {
        html! {
            <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border \
                        border-red-200 dark:border-red-800">
                <p class="text-sm text-red-700 dark:text-red-400">
                    {format!("Error loading {}: {}", props.context, error)}
                </p>
            </div>
        }
    } else {
        html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("No {} found", props.context)}
                </p>
            </div>
        }
    }
}
