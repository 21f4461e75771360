use async_trait::async_trait;

use super::events::{ActionOutcome, UiError, UiErrorContext};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Errored,
}

/// Local view state of a list page.
///
/// `items` only ever changes by replacement with a fresh server answer;
/// a failed fetch or mutation keeps whatever was shown before.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    phase: LoadPhase,
    items: Vec<T>,
    error: Option<UiError>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Loading,
            items: Vec::new(),
            error: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }

    pub fn apply_fetch(&mut self, result: ClientResult<Vec<T>>, context: UiErrorContext) {
        match result {
            Ok(items) => {
                self.items = items;
                self.phase = LoadPhase::Ready;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(?context, error = %err, "list fetch failed");
                self.phase = LoadPhase::Errored;
                self.error = Some(UiError::from_client_error(context, &err));
            }
        }
    }

    /// Records a failed action without touching `items` or `phase`.
    pub fn record_failure(&mut self, err: &ClientError, context: UiErrorContext) {
        self.error = Some(UiError::from_client_error(context, err));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// A page that shows one server-side collection and re-fetches it after
/// every mutation instead of patching it locally.
#[async_trait]
pub trait ListController: Send + Sync {
    type Item: Send + Sync;

    const FETCH_CONTEXT: UiErrorContext;

    fn state(&self) -> &ListState<Self::Item>;

    fn state_mut(&mut self) -> &mut ListState<Self::Item>;

    async fn fetch(&self) -> ClientResult<Vec<Self::Item>>;

    async fn refresh(&mut self) {
        let result = self.fetch().await;
        self.state_mut().apply_fetch(result, Self::FETCH_CONTEXT);
    }

    /// Turns a finished mutation into an outcome: refetch on success,
    /// record the error on failure.
    async fn settle<R: Send + 'static>(
        &mut self,
        result: ClientResult<R>,
        context: UiErrorContext,
    ) -> ActionOutcome {
        match result {
            Ok(_) => {
                self.state_mut().clear_error();
                self.refresh().await;
                ActionOutcome::Done
            }
            Err(err) => {
                self.state_mut().record_failure(&err, context);
                ActionOutcome::Failed
            }
        }
    }
}
