use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

/// Quiet period for search-as-you-type.
pub const DEFAULT_DEBOUNCE_MS: u32 = 500;

/// Coalesces bursts of input into the last value of each quiet period.
///
/// Each call to [`settle`](Debouncer::settle) supersedes the ones before it:
/// only the most recent input survives its quiet period. The timer itself
/// is supplied by the caller, so the same logic runs on browser timers and
/// under a paused tokio clock.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    generation: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait out `quiet_period`, then yield `value` unless newer input
    /// arrived in the meantime.
    pub async fn settle<V>(
        &self,
        value: V,
        quiet_period: impl Future<Output = ()>,
    ) -> Option<V> {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        quiet_period.await;
        if self.generation.get() == generation {
            Some(value)
        } else {
            tracing::trace!(generation, "debounced input superseded");
            None
        }
    }

    /// Drop any pending input.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    fn quiet() -> tokio::time::Sleep {
        sleep(Duration::from_millis(u64::from(DEFAULT_DEBOUNCE_MS)))
    }

    #[tokio::test(start_paused = true)]
    async fn only_last_keystroke_survives() {
        let debouncer = Debouncer::new();

        let (s, sa, sal) = futures::join!(
            debouncer.settle("s", quiet()),
            async {
                sleep(Duration::from_millis(100)).await;
                debouncer.settle("sa", quiet()).await
            },
            async {
                sleep(Duration::from_millis(200)).await;
                debouncer.settle("sal", quiet()).await
            },
        );

        assert_eq!(s, None);
        assert_eq!(sa, None);
        assert_eq!(sal, Some("sal"));
    }

    #[tokio::test(start_paused = true)]
    async fn separate_quiet_periods_both_fire() {
        let debouncer = Debouncer::new();

        assert_eq!(debouncer.settle(1, quiet()).await, Some(1));
        assert_eq!(debouncer.settle(2, quiet()).await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_input() {
        let debouncer = Debouncer::new();

        let (value, ()) =
            futures::join!(debouncer.settle("kitab", quiet()), async {
                debouncer.cancel();
            });

        assert_eq!(value, None);
    }
}
