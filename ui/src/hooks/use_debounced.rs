use client_state::Debouncer;
use gloo_timers::future::TimeoutFuture;
use yew::prelude::*;

/// The last value of `value` that stayed unchanged for `delay_ms`.
///
/// Used for search-as-you-type: the settled value only changes once typing
/// pauses, so a remote search fires once per pause instead of per
/// keystroke.
#[hook]
pub fn use_debounced<V>(value: V, delay_ms: u32) -> V
where
    V: Clone + PartialEq + 'static,
{
    let settled = use_state({
        let value = value.clone();
        move || value
    });
    let debouncer = use_memo((), |_| Debouncer::new());

    {
        let settled = settled.clone();
        let debouncer = (*debouncer).clone();
        use_effect_with(value, move |value| {
            let value = value.clone();
            let pending = debouncer.clone();
            yew::platform::spawn_local(async move {
                let quiet = TimeoutFuture::new(delay_ms);
                if let Some(value) = pending.settle(value, quiet).await {
                    settled.set(value);
                }
            });
            move || debouncer.cancel()
        });
    }

    (*settled).clone()
}
