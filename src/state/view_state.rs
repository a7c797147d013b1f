/// Progress of a single request pipeline.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestProgress {
    #[default]
    Idle,
    InProgress,
    Completed,
}

/// One element of a use-case progress sequence.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataState<T> {
    pub data: Option<T>,
    pub success: bool,
    pub is_loading: bool,
    pub message: Option<String>,
    pub error_message: Option<String>,
    pub progress: RequestProgress,
}

impl<T> Default for DataState<T> {
    fn default() -> Self {
        DataState {
            data: None,
            success: false,
            is_loading: false,
            message: None,
            error_message: None,
            progress: RequestProgress::Idle,
        }
    }
}

impl<T> DataState<T> {
    /// Loading marker. `loading(false)` reports a completed request with no
    /// payload.
    ///
    pub fn loading(is_loading: bool) -> Self {
        DataState {
            is_loading,
            progress: if is_loading {
                RequestProgress::InProgress
            } else {
                RequestProgress::Completed
            },
            ..DataState::default()
        }
    }

    pub fn success(data: T) -> Self {
        DataState {
            data: Some(data),
            success: true,
            progress: RequestProgress::Completed,
            ..DataState::default()
        }
    }

    pub fn error(error_message: impl Into<String>) -> Self {
        DataState {
            error_message: Some(error_message.into()),
            progress: RequestProgress::Completed,
            ..DataState::default()
        }
    }
}

/// View state held by a `StateStore`.
///
/// `error_message` is only ever set together with `progress == Completed`
/// and `is_loading == false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState<T> {
    pub is_loading: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error_message: Option<String>,
    pub progress: RequestProgress,
}

impl<T> ViewState<T> {
    /// Idle state holding `data`.
    ///
    pub fn new(data: T) -> Self {
        ViewState {
            is_loading: false,
            data: Some(data),
            message: None,
            error_message: None,
            progress: RequestProgress::Idle,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }
}

impl<T: Default> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::new(T::default())
    }
}

/// Sparse update to a `ViewState`. `None` leaves a field untouched; for the
/// optional fields `Some(None)` clears them.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewStatePatch<T> {
    pub is_loading: Option<bool>,
    pub data: Option<Option<T>>,
    pub message: Option<Option<String>>,
    pub error_message: Option<Option<String>>,
    pub progress: Option<RequestProgress>,
}

impl<T> Default for ViewStatePatch<T> {
    fn default() -> Self {
        ViewStatePatch {
            is_loading: None,
            data: None,
            message: None,
            error_message: None,
            progress: None,
        }
    }
}

impl<T> ViewStatePatch<T> {
    pub fn new() -> Self {
        ViewStatePatch::default()
    }

    pub fn is_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = Some(is_loading);
        self
    }

    pub fn data(mut self, data: Option<T>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn message(mut self, message: Option<String>) -> Self {
        self.message = Some(message);
        self
    }

    pub fn error_message(mut self, error_message: Option<String>) -> Self {
        self.error_message = Some(error_message);
        self
    }

    pub fn progress(mut self, progress: RequestProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Write the fields present in this patch into `state`.
    ///
    pub fn apply_to(self, state: &mut ViewState<T>) {
        if let Some(is_loading) = self.is_loading {
            state.is_loading = is_loading;
        }
        if let Some(data) = self.data {
            state.data = data;
        }
        if let Some(message) = self.message {
            state.message = message;
        }
        if let Some(error_message) = self.error_message {
            state.error_message = error_message;
        }
        if let Some(progress) = self.progress {
            state.progress = progress;
        }
    }
}

impl<T> From<DataState<T>> for ViewStatePatch<T> {
    /// Loading flag, progress and error always travel together so the error
    /// invariant holds after every patch. Payload and message are only
    /// written when present, so a failure keeps the last good data.
    fn from(state: DataState<T>) -> Self {
        ViewStatePatch {
            is_loading: Some(state.is_loading),
            data: state.data.map(Some),
            message: state.message.map(Some),
            error_message: Some(state.error_message),
            progress: Some(state.progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_state_constructors() {
        let loading = DataState::<u32>::loading(true);
        assert!(loading.is_loading);
        assert_eq!(loading.progress, RequestProgress::InProgress);

        let done = DataState::<u32>::loading(false);
        assert!(!done.is_loading);
        assert_eq!(done.progress, RequestProgress::Completed);

        let success = DataState::success(5u32);
        assert!(success.success);
        assert_eq!(success.data, Some(5));
        assert_eq!(success.progress, RequestProgress::Completed);

        let error = DataState::<u32>::error("Not Found");
        assert!(!error.success);
        assert!(!error.is_loading);
        assert_eq!(error.error_message.as_deref(), Some("Not Found"));
        assert_eq!(error.progress, RequestProgress::Completed);
    }

    #[test]
    fn patch_leaves_absent_fields_alone() {
        let mut state = ViewState {
            is_loading: true,
            data: Some(vec![1, 2, 3]),
            message: Some("hello".to_string()),
            error_message: None,
            progress: RequestProgress::InProgress,
        };
        let before = state.clone();

        ViewStatePatch::new().message(None).apply_to(&mut state);
        assert_eq!(state.message, None);
        assert_eq!(state.is_loading, before.is_loading);
        assert_eq!(state.data, before.data);
        assert_eq!(state.error_message, before.error_message);
        assert_eq!(state.progress, before.progress);
    }

    #[test]
    fn empty_patch_is_identity() {
        let mut state = ViewState::new("octocat".to_string());
        let before = state.clone();
        ViewStatePatch::new().apply_to(&mut state);
        assert_eq!(state, before);
    }

    #[test]
    fn error_patch_keeps_data_and_honors_invariant() {
        let mut state = ViewState::new(vec!["Hello-World".to_string()]);
        ViewStatePatch::from(DataState::loading(true)).apply_to(&mut state);
        ViewStatePatch::from(DataState::error("Not Found")).apply_to(&mut state);

        assert_eq!(state.data, Some(vec!["Hello-World".to_string()]));
        assert_eq!(state.error_message.as_deref(), Some("Not Found"));
        assert_eq!(state.progress, RequestProgress::Completed);
        assert!(!state.is_loading);
    }

    #[test]
    fn loading_patch_clears_previous_error() {
        let mut state = ViewState::new(0u32);
        ViewStatePatch::from(DataState::error("boom")).apply_to(&mut state);
        ViewStatePatch::from(DataState::loading(true)).apply_to(&mut state);
        assert_eq!(state.error_message, None);
        assert!(state.is_loading);
        assert_eq!(state.progress, RequestProgress::InProgress);
    }
}
