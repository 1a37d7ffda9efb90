use std::collections::{HashSet, VecDeque};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::api::PtwClient;
use crate::log_debug;

/// Unique identifier for deduplicating requests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum RequestKey {
    Delete { resource: &'static str, id: u64 },
}

/// API request types
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// Delete one record of a collection
    DeleteRecord {
        resource: &'static str,
        id: u64,
        /// Shown in the result toast
        label: String,
    },
}

impl ApiRequest {
    /// Generate a unique key for deduplication
    fn key(&self) -> RequestKey {
        match self {
            ApiRequest::DeleteRecord { resource, id, .. } => RequestKey::Delete {
                resource: *resource,
                id: *id,
            },
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    DeleteResult {
        resource: &'static str,
        id: u64,
        label: String,
        result: Result<(), anyhow::Error>,
    },
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(RequestKey),
}

/// API service worker that processes mutations in the background
pub struct ApiService {
    client: PtwClient,
    request_queue: VecDeque<ApiRequest>,
    in_flight: HashSet<RequestKey>,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
}

impl ApiService {
    pub(crate) fn new(
        client: PtwClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            response_tx,
            completion_tx,
            max_concurrent: 4,
        }
    }

    /// Add a request to the queue
    ///
    /// Returns false when the same request is already queued or running.
    fn enqueue(&mut self, request: ApiRequest) -> bool {
        let key = request.key();
        if self.in_flight.contains(&key) || self.request_queue.iter().any(|r| r.key() == key) {
            log_debug(&format!("DEBUG [API Service]: dropping duplicate {:?}", key));
            return false;
        }
        self.request_queue.push_back(request);
        true
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return;
        }

        let Some(request) = self.request_queue.pop_front() else {
            return;
        };

        let key = request.key();
        self.in_flight.insert(key.clone());

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let response = Self::execute_request(&client, request).await;
            let _ = response_tx.send(response);
            let _ = completion_tx.send(InternalMessage::Completed(key));
        });
    }

    async fn execute_request(client: &PtwClient, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::DeleteRecord {
                resource,
                id,
                label,
            } => {
                log_debug(&format!("DEBUG [API Service]: DELETE {} id={}", resource, id));
                let result = client.delete(resource, id).await;
                if let Err(e) = &result {
                    log_debug(&format!(
                        "DEBUG [API Service]: DELETE {} id={} failed: {:#}",
                        resource, id, e
                    ));
                }
                ApiResponse::DeleteResult {
                    resource,
                    id,
                    label,
                    result,
                }
            }
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: PtwClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);

        // Ticker for processing queue
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => {
                            service.enqueue(request);
                        }
                        // App dropped its sender: shut down
                        None => break,
                    }
                }

                Some(InternalMessage::Completed(key)) = completion_rx.recv() => {
                    service.in_flight.remove(&key);
                }

                _ = tick.tick() => {
                    while !service.request_queue.is_empty()
                        && service.in_flight.len() < service.max_concurrent
                    {
                        service.process_next();
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ApiService {
        let client = PtwClient::new("http://127.0.0.1:9", None, Duration::from_secs(1)).unwrap();
        let (response_tx, _response_rx) = mpsc::unbounded_channel();
        let (completion_tx, _completion_rx) = mpsc::unbounded_channel();
        ApiService::new(client, response_tx, completion_tx)
    }

    fn delete(id: u64) -> ApiRequest {
        ApiRequest::DeleteRecord {
            resource: "circles",
            id,
            label: format!("Circle {}", id),
        }
    }

    #[test]
    fn test_duplicate_delete_is_dropped() {
        let mut service = service();
        assert!(service.enqueue(delete(4)));
        assert!(!service.enqueue(delete(4)));
        assert!(service.enqueue(delete(5)));
        assert_eq!(service.request_queue.len(), 2);
    }

    #[test]
    fn test_in_flight_delete_is_dropped() {
        let mut service = service();
        service.in_flight.insert(delete(4).key());
        assert!(!service.enqueue(delete(4)));
        assert!(service.request_queue.is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_reports_error() {
        // Nothing listens on the discard port
        let client = PtwClient::new("http://127.0.0.1:9", None, Duration::from_secs(2)).unwrap();
        let (request_tx, mut response_rx) = spawn_api_service(client);
        request_tx.send(delete(4)).unwrap();

        let ApiResponse::DeleteResult { id, result, .. } = response_rx.recv().await.unwrap();
        assert_eq!(id, 4);
        assert!(result.is_err());
    }
}
