//! Last-issued-wins dataset loading.
//!
//! Every "analyze" action issues a new [`RequestToken`]. Responses may resolve
//! in any order; only the response carrying the most recently issued token is
//! allowed to replace the working [`RecordSet`]. Earlier responses are dropped
//! as stale. No transport is cancelled; superseded requests simply lose.
//!
//! Subscribers observe replacements through a `tokio::sync::watch` channel,
//! so every view and chart re-derives from the same snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

use lens_core::{Degradation, Record, RecordSet};
use tokio::sync::watch;

use crate::error::FetchError;
use crate::source::{Query, RecordSource};

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tokens and remembers the latest.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token that supersedes every earlier one.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `token` is the most recently issued.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    /// The most recently issued token, if any.
    #[must_use]
    pub fn latest(&self) -> Option<RequestToken> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            n => Some(RequestToken(n)),
        }
    }
}

/// What happened to one response.
#[derive(Debug)]
pub enum Outcome {
    /// The response was current and replaced the working set.
    Applied(RecordSet),
    /// A newer request was issued before this one resolved.
    Stale(RequestToken),
    /// The current request failed; the previous set is kept.
    Failed(FetchError),
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }
}

/// The working dataset of one dashboard page.
#[derive(Debug)]
pub struct LiveDataset {
    sequencer: RequestSequencer,
    tx: watch::Sender<RecordSet>,
}

impl Default for LiveDataset {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveDataset {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RecordSet::empty());
        Self {
            sequencer: RequestSequencer::new(),
            tx,
        }
    }

    /// Receive every accepted snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RecordSet> {
        self.tx.subscribe()
    }

    /// The current snapshot.
    #[must_use]
    pub fn current(&self) -> RecordSet {
        self.tx.borrow().clone()
    }

    /// Start a request, superseding any in flight.
    pub fn begin(&self) -> RequestToken {
        let token = self.sequencer.issue();
        tracing::debug!(token = token.get(), "request issued");
        token
    }

    /// Offer a response for `token`.
    ///
    /// The staleness check and the replacement happen under the channel's
    /// write lock, so an older response can never overwrite a newer one.
    pub fn resolve(&self, token: RequestToken, result: Result<Vec<Record>, FetchError>) -> Outcome {
        let records = match result {
            Ok(records) => records,
            Err(error) => {
                if !self.sequencer.is_current(token) {
                    return self.stale(token);
                }
                tracing::warn!(
                    token = token.get(),
                    %error,
                    "fetch failed; keeping previous dataset"
                );
                return Outcome::Failed(error);
            }
        };

        let set = RecordSet::new(records);
        let mut applied = false;
        self.tx.send_if_modified(|current| {
            if self.sequencer.is_current(token) {
                *current = set.clone();
                applied = true;
            }
            applied
        });

        if applied {
            tracing::debug!(
                token = token.get(),
                records = set.len(),
                snapshot = set.id(),
                "dataset replaced"
            );
            Outcome::Applied(set)
        } else {
            self.stale(token)
        }
    }

    /// Issue, fetch and resolve one request.
    pub async fn analyze<S: RecordSource>(&self, source: &S, query: &Query) -> Outcome {
        let token = self.begin();
        let result = source.fetch(query).await;
        self.resolve(token, result)
    }

    fn stale(&self, token: RequestToken) -> Outcome {
        let latest = self.sequencer.latest().map_or(0, RequestToken::get);
        Degradation::StaleResponse.report(&format!(
            "response for request {} dropped, latest is {latest}",
            token.get()
        ));
        Outcome::Stale(token)
    }
}
