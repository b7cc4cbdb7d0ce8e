use shared::error::DataLoadError;

/// In-flight, succeeded or failed state of a screen fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AsyncResult<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(DataLoadError),
}

impl<T> AsyncResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, AsyncResult::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, AsyncResult::Ready(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            AsyncResult::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DataLoadError> {
        match self {
            AsyncResult::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AsyncResult<U> {
        match self {
            AsyncResult::Loading => AsyncResult::Loading,
            AsyncResult::Ready(data) => AsyncResult::Ready(f(data)),
            AsyncResult::Failed(err) => AsyncResult::Failed(err),
        }
    }

    pub fn as_ref(&self) -> AsyncResult<&T> {
        match self {
            AsyncResult::Loading => AsyncResult::Loading,
            AsyncResult::Ready(data) => AsyncResult::Ready(data),
            AsyncResult::Failed(err) => AsyncResult::Failed(err.clone()),
        }
    }
}

impl<T: Clone> AsyncResult<T> {
    /// Loaded data, or `fallback()` while loading or after a failure.
    pub fn data_or_else(&self, fallback: impl FnOnce() -> T) -> T {
        self.data().cloned().unwrap_or_else(fallback)
    }
}

impl<T: Clone + Default> AsyncResult<T> {
    /// Loaded data, or `T::default()` while loading or after a failure.
    pub fn data_or_default(&self) -> T {
        self.data().cloned().unwrap_or_default()
    }
}

impl<T> From<Result<T, DataLoadError>> for AsyncResult<T> {
    fn from(value: Result<T, DataLoadError>) -> Self {
        match value {
            Ok(data) => AsyncResult::Ready(data),
            Err(err) => AsyncResult::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::Screen;

    #[test]
    fn defaults_to_loading_with_empty_data() {
        let state: AsyncResult<Vec<u32>> = AsyncResult::default();
        assert!(state.is_loading());
        assert!(state.data().is_none());
        assert!(state.data_or_default().is_empty());
    }

    #[test]
    fn failure_is_kept_through_map() {
        let failed: AsyncResult<u32> =
            Err(DataLoadError::new(Screen::Home, "offline")).into();
        let mapped = failed.map(|v| v + 1);
        assert_eq!(mapped.error().map(|e| e.reason.as_str()), Some("offline"));
        assert_eq!(mapped.data_or_default(), 0);
    }

    #[test]
    fn ready_exposes_data() {
        let ready: AsyncResult<u32> = Ok(7).into();
        assert!(ready.is_ready());
        assert_eq!(ready.as_ref().data(), Some(&&7));
        assert_eq!(ready.map(|v| v * 2).data(), Some(&14));
    }
}
