use crate::domain::model::{LiveDataset, ReferenceDataset};
use crate::domain::ports::TurnoutSource;
use crate::utils::error::Result;

/// Both datasets, available only after a successful load.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub live: LiveDataset,
    pub reference: ReferenceDataset,
}

#[derive(Debug)]
enum LoadState {
    NotLoaded,
    Loaded(Datasets),
}

/// Holds the two turnout datasets for the lifetime of a session.
///
/// The datasets are fetched at most once; after a successful load every
/// further `ensure_loaded` is a no-op with no network activity. A failed
/// load leaves the session unloaded so the next call retries both sources.
#[derive(Debug)]
pub struct TurnoutSession {
    state: LoadState,
}

impl TurnoutSession {
    pub fn new() -> Self {
        Self {
            state: LoadState::NotLoaded,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    pub fn datasets(&self) -> Option<&Datasets> {
        match &self.state {
            LoadState::Loaded(datasets) => Some(datasets),
            LoadState::NotLoaded => None,
        }
    }

    /// Fetch both datasets concurrently on the first call.
    ///
    /// The joint operation fails as soon as either fetch fails; the state
    /// only becomes loaded once both payloads have been fetched and parsed.
    pub async fn ensure_loaded<S: TurnoutSource>(&mut self, source: &S) -> Result<()> {
        if self.is_loaded() {
            tracing::debug!("datasets already loaded, skipping fetch");
            return Ok(());
        }

        tracing::info!("fetching live and reference turnout datasets");
        let (live, reference) = tokio::try_join!(source.fetch_live(), source.fetch_reference())?;

        tracing::info!(
            kommuner = live.kommuner.len(),
            reference_entries = reference.len(),
            "datasets loaded"
        );
        self.state = LoadState::Loaded(Datasets { live, reference });
        Ok(())
    }
}

impl Default for TurnoutSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{DatasetKind, LookupError};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        live_calls: AtomicUsize,
        reference_calls: AtomicUsize,
        fail_live: AtomicBool,
        fail_reference: AtomicBool,
    }

    impl CountingSource {
        fn live_dataset() -> LiveDataset {
            serde_json::from_str(
                r#"{
                    "timestamp": "2025-11-18T14:02:00Z",
                    "kommuner": {"101": {"navn": "København", "stemmeprocent": 55.2}}
                }"#,
            )
            .unwrap()
        }
    }

    #[async_trait]
    impl TurnoutSource for CountingSource {
        async fn fetch_live(&self) -> Result<LiveDataset> {
            self.live_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_live.load(Ordering::SeqCst) {
                return Err(LookupError::Retrieval {
                    dataset: DatasetKind::Live,
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                });
            }
            Ok(Self::live_dataset())
        }

        async fn fetch_reference(&self) -> Result<ReferenceDataset> {
            self.reference_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_reference.load(Ordering::SeqCst) {
                return Err(LookupError::Retrieval {
                    dataset: DatasetKind::Reference,
                    status: StatusCode::NOT_FOUND,
                });
            }
            Ok(HashMap::new())
        }
    }

    #[tokio::test]
    async fn second_load_performs_no_fetches() {
        let source = CountingSource::default();
        let mut session = TurnoutSession::new();

        session.ensure_loaded(&source).await.unwrap();
        session.ensure_loaded(&source).await.unwrap();

        assert_eq!(source.live_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.reference_calls.load(Ordering::SeqCst), 1);
        assert!(session.is_loaded());
    }

    #[tokio::test]
    async fn failed_load_leaves_session_unloaded_and_retries_both() {
        let source = CountingSource::default();
        source.fail_reference.store(true, Ordering::SeqCst);
        let mut session = TurnoutSession::new();

        let err = session.ensure_loaded(&source).await.unwrap_err();
        assert!(matches!(
            err,
            LookupError::Retrieval {
                dataset: DatasetKind::Reference,
                ..
            }
        ));
        assert!(!session.is_loaded());
        assert!(session.datasets().is_none());

        source.fail_reference.store(false, Ordering::SeqCst);
        session.ensure_loaded(&source).await.unwrap();

        assert_eq!(source.live_calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.reference_calls.load(Ordering::SeqCst), 2);
        assert!(session.is_loaded());
    }

    #[tokio::test]
    async fn failed_live_fetch_reports_live_dataset() {
        let source = CountingSource::default();
        source.fail_live.store(true, Ordering::SeqCst);
        let mut session = TurnoutSession::new();

        let err = session.ensure_loaded(&source).await.unwrap_err();
        assert!(matches!(
            err,
            LookupError::Retrieval {
                dataset: DatasetKind::Live,
                ..
            }
        ));
    }
}
