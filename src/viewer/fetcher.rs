//! Remote Collection Fetcher
//!
//! Runs the injected list operation on a spawned task and reports back over an
//! unbounded channel, the same way the API worker does. Every request carries
//! a generation number; only the most recently issued generation may touch
//! visible state, so a slow response for an old descriptor can never
//! overwrite a newer one.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use super::query::QueryDescriptor;
use super::{CollectionPage, Record};
use crate::logic::errors::FetchError;

/// Boxed future returned by a list operation
pub type ListFuture<T> = Pin<Box<dyn Future<Output = anyhow::Result<CollectionPage<T>>> + Send>>;

/// Fetch one page of a remote collection
///
/// Implemented by the HTTP binding ([`crate::api::ResourceLister`]) and by any
/// `Fn(QueryDescriptor) -> impl Future` closure.
pub trait ListOperation<T>: Send + Sync {
    fn list(&self, descriptor: QueryDescriptor) -> ListFuture<T>;
}

impl<T, F, Fut> ListOperation<T> for F
where
    F: Fn(QueryDescriptor) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<CollectionPage<T>>> + Send + 'static,
{
    fn list(&self, descriptor: QueryDescriptor) -> ListFuture<T> {
        Box::pin(self(descriptor))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// A finished request as reported by its task
#[derive(Debug)]
pub struct FetchOutcome<T> {
    pub generation: u64,
    pub descriptor: QueryDescriptor,
    pub result: Result<CollectionPage<T>, FetchError>,
}

pub struct RemoteCollectionFetcher<T: Record> {
    name: String,
    list: Box<dyn ListOperation<T>>,
    generation: u64,
    descriptor: Option<QueryDescriptor>,
    status: FetchStatus,
    page: Option<CollectionPage<T>>,
    error: Option<FetchError>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome<T>>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome<T>>,
}

impl<T: Record> RemoteCollectionFetcher<T> {
    pub fn new(name: impl Into<String>, list: impl ListOperation<T> + 'static) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            name: name.into(),
            list: Box::new(list),
            generation: 0,
            descriptor: None,
            status: FetchStatus::Idle,
            page: None,
            error: None,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Start a request for `descriptor`, superseding any request in flight
    ///
    /// Must be called from within a tokio runtime.
    pub fn issue(&mut self, descriptor: QueryDescriptor) {
        self.generation += 1;
        let generation = self.generation;
        self.descriptor = Some(descriptor.clone());
        self.status = FetchStatus::Loading;

        crate::log_debug(&format!(
            "DEBUG [Fetcher {}]: issue gen={} page={} per_page={} search={:?}",
            self.name, generation, descriptor.page, descriptor.per_page, descriptor.search_term
        ));

        let request = self.list.list(descriptor.clone());
        let outcome_tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = request.await.map_err(|e| FetchError::from_error(&e));
            // Receiver lives as long as the fetcher; a send error means the
            // screen is gone and nobody wants the result.
            let _ = outcome_tx.send(FetchOutcome {
                generation,
                descriptor,
                result,
            });
        });
    }

    /// Re-issue the last descriptor after a failure
    pub fn retry(&mut self) -> bool {
        self.reissue()
    }

    /// Re-issue the last descriptor after the caller changed the collection
    pub fn invalidate(&mut self) -> bool {
        self.reissue()
    }

    fn reissue(&mut self) -> bool {
        match self.descriptor.clone() {
            Some(descriptor) => {
                self.issue(descriptor);
                true
            }
            None => false,
        }
    }

    /// Apply a finished request
    ///
    /// Returns false (and changes nothing) when the outcome belongs to a
    /// superseded request.
    pub fn apply(&mut self, outcome: FetchOutcome<T>) -> bool {
        if outcome.generation != self.generation {
            crate::log_debug(&format!(
                "DEBUG [Fetcher {}]: discarding stale gen={} (current gen={})",
                self.name, outcome.generation, self.generation
            ));
            return false;
        }

        match outcome.result {
            Ok(page) => {
                crate::log_debug(&format!(
                    "DEBUG [Fetcher {}]: gen={} loaded {} rows of {}",
                    self.name,
                    outcome.generation,
                    page.rows.len(),
                    page.total
                ));
                self.page = Some(page);
                self.error = None;
                self.status = FetchStatus::Success;
            }
            Err(error) => {
                crate::log_debug(&format!(
                    "DEBUG [Fetcher {}]: gen={} failed: {}",
                    self.name, outcome.generation, error.message
                ));
                // Previous page stays for when the error clears
                self.error = Some(error);
                self.status = FetchStatus::Error;
            }
        }
        true
    }

    /// Apply every outcome that has already arrived, without waiting
    ///
    /// Returns true if visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            changed |= self.apply(outcome);
        }
        changed
    }

    /// Wait for the next outcome and apply it
    ///
    /// Only call this with a request outstanding; otherwise it waits forever.
    pub async fn recv(&mut self) -> bool {
        match self.outcome_rx.recv().await {
            Some(outcome) => self.apply(outcome),
            None => false,
        }
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn page(&self) -> Option<&CollectionPage<T>> {
        self.page.as_ref()
    }

    pub fn rows(&self) -> &[T] {
        self.page.as_ref().map(|p| p.rows.as_slice()).unwrap_or(&[])
    }

    pub fn total(&self) -> u64 {
        self.page.as_ref().map(|p| p.total).unwrap_or(0)
    }

    /// Descriptor of the most recently issued request
    pub fn descriptor(&self) -> Option<&QueryDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
