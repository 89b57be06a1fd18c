//! tsdiag-mock
//!
//! Deterministic fixtures and an in-memory [`SeriesSource`] for CI-safe tests
//! and examples.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tsdiag_core::{DiagError, SeriesSource, SourceKey, TimeSeries};

pub mod fixtures;

/// Instruction for how [`MockSource::load`](SeriesSource::load) behaves.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return a copy of this series.
    Return(TimeSeries),
    /// Fail with this error.
    Fail(DiagError),
}

struct State {
    behavior: MockBehavior,
    revision: u64,
}

/// In-memory source whose content and failure mode can be changed at runtime.
///
/// Each change bumps the revision in [`SeriesSource::key`], so caches keyed by
/// it see the new content. Loads are counted for cache assertions.
pub struct MockSource {
    id: String,
    state: Mutex<State>,
    loads: AtomicUsize,
}

impl MockSource {
    /// A source that returns `series`.
    pub fn new(id: impl Into<String>, series: TimeSeries) -> Self {
        Self::with_behavior(id, MockBehavior::Return(series))
    }

    /// A source serving one of the canned [`fixtures::by_name`] series.
    ///
    /// The name `FAIL` yields a source whose loads always fail.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        if name == "FAIL" {
            return Some(Self::failing(name, "forced failure"));
        }
        fixtures::by_name(name).map(|s| Self::new(name, s))
    }

    /// A source whose loads fail with a `Source` error carrying `msg`.
    pub fn failing(id: impl Into<String>, msg: &str) -> Self {
        Self::with_behavior(id, MockBehavior::Fail(DiagError::source_failed("tsdiag-mock", msg)))
    }

    /// A source with an explicit behavior.
    pub fn with_behavior(id: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            id: id.into(),
            state: Mutex::new(State {
                behavior,
                revision: 0,
            }),
            loads: AtomicUsize::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the served series and bump the revision.
    pub fn set_series(&self, series: TimeSeries) {
        self.set_behavior(MockBehavior::Return(series));
    }

    /// Replace the behavior and bump the revision.
    pub fn set_behavior(&self, behavior: MockBehavior) {
        let mut st = self.state();
        st.behavior = behavior;
        st.revision += 1;
    }

    /// Number of times `load` has been called.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl SeriesSource for MockSource {
    fn name(&self) -> &'static str {
        "tsdiag-mock"
    }

    fn key(&self) -> Result<SourceKey, DiagError> {
        Ok(SourceKey::new(format!("mock:{}", self.id), self.state().revision))
    }

    fn load(&self) -> Result<TimeSeries, DiagError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match &self.state().behavior {
            MockBehavior::Return(series) => Ok(series.clone()),
            MockBehavior::Fail(err) => Err(err.clone()),
        }
    }
}
