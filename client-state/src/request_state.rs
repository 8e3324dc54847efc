/// Snapshot of one asynchronous operation: its latest data, whether a call
/// is in flight, and the error of the last settled call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> RequestState<T> {
    /// A call started. Previous data stays visible until the result lands.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.loading = false;
    }

    /// A call failed. Previous data is left untouched.
    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    /// Loading for the first time: nothing fetched yet and no error.
    pub fn is_initial_loading(&self) -> bool {
        self.loading && self.data.is_none() && self.error.is_none()
    }

    /// Loading while older data is still shown.
    pub fn is_refreshing(&self) -> bool {
        self.loading && self.data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_previous_data() {
        let mut state = RequestState::default();
        state.begin();
        assert!(state.is_initial_loading());
        state.succeed(1);

        state.begin();
        assert!(state.is_refreshing());
        state.fail("boom".into());

        assert_eq!(state.data, Some(1));
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
    }

    #[test]
    fn begin_clears_error() {
        let mut state: RequestState<()> = RequestState::default();
        state.fail("boom".into());
        state.begin();
        assert!(state.loading);
        assert_eq!(state.error, None);
    }
}
