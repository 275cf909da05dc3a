//! Request workers
//!
//! Each request runs on its own thread and reports back over a channel.
//! Exactly one completion is sent per request, even if the job panics.
//! [`RequestSlot`] tracks which of those completions is still wanted.

use crate::error::{NavError, Result};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Identifies one issued request; only the latest one is ever applied
pub type RequestToken = u64;

/// Outcome of one request, tagged with the token it was issued under
pub struct Completion<T> {
    pub token: RequestToken,
    pub outcome: Result<T>,
}

/// Sends a `WorkerLost` completion if dropped before `finish`
struct CompletionGuard<T> {
    token: RequestToken,
    tx: Option<Sender<Completion<T>>>,
}

impl<T> CompletionGuard<T> {
    fn finish(mut self, outcome: Result<T>) {
        if let Some(tx) = self.tx.take() {
            // The receiving view may already be gone
            let _ = tx.send(Completion {
                token: self.token,
                outcome,
            });
        }
    }
}

impl<T> Drop for CompletionGuard<T> {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Completion {
                token: self.token,
                outcome: Err(NavError::WorkerLost),
            });
        }
    }
}

/// Run `job` on a fresh thread and deliver its outcome on `tx`
pub fn spawn_request<T, F>(token: RequestToken, tx: Sender<Completion<T>>, job: F) -> Result<()>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    thread::Builder::new()
        .name(format!("fossnav-request-{}", token))
        .spawn(move || {
            let guard = CompletionGuard {
                token,
                tx: Some(tx),
            };
            let outcome = job();
            guard.finish(outcome);
        })?;
    Ok(())
}

/// Issues requests and hands back only the completion of the latest one.
///
/// Starting a request supersedes the previous one, and `cancel` abandons
/// the current one. Completions for superseded tokens are dropped on receipt.
pub struct RequestSlot<T> {
    tx: Sender<Completion<T>>,
    rx: Receiver<Completion<T>>,
    current: Option<RequestToken>,
    next_token: RequestToken,
}

impl<T: Send + 'static> RequestSlot<T> {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            current: None,
            next_token: 1,
        }
    }

    /// Run `job` on a worker under a fresh token, superseding any request in flight
    pub fn start<F>(&mut self, job: F) -> RequestToken
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let token = self.next_token;
        self.next_token += 1;
        self.current = Some(token);

        if let Err(e) = spawn_request(token, self.tx.clone(), job) {
            // Surface the spawn failure through the normal completion path
            let _ = self.tx.send(Completion {
                token,
                outcome: Err(e),
            });
        }
        token
    }

    /// Stop waiting for the request in flight; its completion will be dropped
    pub fn cancel(&mut self) -> Option<RequestToken> {
        self.current.take()
    }

    /// Token of the request still awaited
    pub fn current(&self) -> Option<RequestToken> {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Completion of the awaited request, if it has arrived
    pub fn try_take(&mut self) -> Option<Completion<T>> {
        while let Ok(completion) = self.rx.try_recv() {
            if self.accept(&completion) {
                return Some(completion);
            }
        }
        None
    }

    /// Block until the awaited request completes or `timeout` passes
    pub fn wait(&mut self, timeout: Duration) -> Option<Completion<T>> {
        let deadline = Instant::now() + timeout;
        while self.current.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    if self.accept(&completion) {
                        return Some(completion);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
        None
    }

    fn accept(&mut self, completion: &Completion<T>) -> bool {
        if self.current != Some(completion.token) {
            debug!(
                token = completion.token,
                current = ?self.current,
                "Discarding stale response"
            );
            return false;
        }
        self.current = None;
        true
    }
}

impl<T: Send + 'static> Default for RequestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
