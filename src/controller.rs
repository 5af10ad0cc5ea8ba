//! Request cycle state machine.
//!
//! One call to [`RequestController::cycle`] runs a full request:
//! `Validating -> Submitting -> Streaming -> Succeeded | Failed`, with the
//! empty-input abort returning straight to `Idle`. The controller holds a single
//! [`RequestState`]; a second cycle started while one is in flight is rejected
//! instead of racing the first for the shared output.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use comment_api::{CommentApiError, CommentRequest, TextStream};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::surface::Surface;
use crate::transport::Transport;

pub const EMPTY_INPUT_NOTICE: &str = "Please enter some code first!";
pub const FAILURE_MESSAGE: &str = "Error generating comments. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Validating,
    Submitting,
    Streaming,
    Succeeded,
    Failed,
}

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("comment request failed: {0}")]
    Request(#[source] CommentApiError),
    #[error("comment stream failed: {0}")]
    Stream(#[source] CommentApiError),
}

impl CycleError {
    fn from_api(error: CommentApiError) -> Self {
        if error.is_stream_failure() {
            Self::Stream(error)
        } else {
            Self::Request(error)
        }
    }
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// Input was empty or whitespace-only; nothing was sent.
    EmptyInput,
    /// Another cycle was already in flight; nothing was touched.
    Rejected,
    Succeeded { chunks: usize },
    Failed(CycleError),
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// The state-machine phase this outcome terminated in.
    pub fn terminal_phase(&self) -> CyclePhase {
        match self {
            Self::EmptyInput | Self::Rejected => CyclePhase::Idle,
            Self::Succeeded { .. } => CyclePhase::Succeeded,
            Self::Failed(_) => CyclePhase::Failed,
        }
    }
}

pub struct RequestController<T> {
    transport: T,
    state: Mutex<RequestState>,
}

impl<T> RequestController<T>
where
    T: Transport,
{
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Mutex::new(RequestState::Idle),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> RequestState {
        *lock_unpoisoned(&self.state)
    }

    /// Runs one request cycle against `surface`.
    ///
    /// Every path that disabled the trigger re-enables it and hides the loading
    /// indicator exactly once, including when this future is dropped mid-stream.
    pub async fn cycle<S>(&self, surface: &mut S) -> CycleOutcome
    where
        S: Surface + ?Sized,
    {
        if self.state() == RequestState::InFlight {
            warn!("request cycle rejected: another request is in flight");
            return CycleOutcome::Rejected;
        }

        debug!(phase = ?CyclePhase::Validating, "request cycle");
        let code = surface.input_text();
        if code.trim().is_empty() {
            surface.notify(EMPTY_INPUT_NOTICE);
            debug!(phase = ?CyclePhase::Idle, "empty input; nothing sent");
            return CycleOutcome::EmptyInput;
        }

        let Some(mut busy) = BusyGuard::enter(&self.state, surface) else {
            warn!("request cycle rejected: another request is in flight");
            return CycleOutcome::Rejected;
        };

        debug!(phase = ?CyclePhase::Submitting, code_len = code.len(), "request cycle");
        let result = self.stream_into(CommentRequest::new(code), &mut *busy).await;
        let outcome = match result {
            Ok(chunks) => {
                info!(chunks, "comments generated");
                CycleOutcome::Succeeded { chunks }
            }
            Err(failure) => {
                error!(error = %failure, "comment generation failed");
                busy.replace_output(FAILURE_MESSAGE);
                CycleOutcome::Failed(failure)
            }
        };
        debug!(phase = ?outcome.terminal_phase(), "request cycle");

        outcome
    }

    async fn stream_into<S>(
        &self,
        request: CommentRequest,
        surface: &mut S,
    ) -> Result<usize, CycleError>
    where
        S: Surface + ?Sized,
    {
        let body = self
            .transport
            .open(&request)
            .await
            .map_err(CycleError::from_api)?;

        debug!(phase = ?CyclePhase::Streaming, "request cycle");
        let mut stream = TextStream::open(body);
        let mut output_len = 0usize;
        let mut chunks = 0usize;

        while let Some(chunk) = stream.next_chunk().await.map_err(CycleError::from_api)? {
            output_len += chunk.len();
            surface.append_output(&chunk);
            surface.scroll_output_to(output_len);
            chunks += 1;
            debug!(
                chunk = chunks,
                len = chunk.len(),
                total = output_len,
                "chunk appended"
            );
        }

        Ok(chunks)
    }
}

/// Busy state held for the Submitting/Streaming span of one cycle.
///
/// Entering clears the output, disables the trigger and shows the loading
/// indicator. Dropping restores the trigger, hides the indicator and returns the
/// controller to `Idle`.
struct BusyGuard<'a, S>
where
    S: Surface + ?Sized,
{
    state: &'a Mutex<RequestState>,
    surface: &'a mut S,
}

impl<'a, S> BusyGuard<'a, S>
where
    S: Surface + ?Sized,
{
    fn enter(state: &'a Mutex<RequestState>, surface: &'a mut S) -> Option<Self> {
        {
            let mut current = lock_unpoisoned(state);
            if *current == RequestState::InFlight {
                return None;
            }
            *current = RequestState::InFlight;
        }

        surface.clear_output();
        surface.set_trigger_enabled(false);
        surface.set_loading_visible(true);
        Some(Self { state, surface })
    }
}

impl<S> Deref for BusyGuard<'_, S>
where
    S: Surface + ?Sized,
{
    type Target = S;

    fn deref(&self) -> &S {
        &*self.surface
    }
}

impl<S> DerefMut for BusyGuard<'_, S>
where
    S: Surface + ?Sized,
{
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S> Drop for BusyGuard<'_, S>
where
    S: Surface + ?Sized,
{
    fn drop(&mut self) {
        self.surface.set_trigger_enabled(true);
        self.surface.set_loading_visible(false);
        *lock_unpoisoned(self.state) = RequestState::Idle;
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
