#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use code_commenter::{BusyStateSink, InputSource, Notifier, OutputSink, Transport};
use comment_api::{CommentApiError, CommentRequest, StatusCode};
use futures_util::stream::{self, LocalBoxStream};
use futures_util::StreamExt;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Clear,
    Append(String),
    Replace(String),
    Scroll(usize),
    Trigger(bool),
    Loading(bool),
    Notice(String),
}

/// Surface double that keeps the rendered output and every call it received.
#[derive(Debug)]
pub struct RecordingSurface {
    pub input: String,
    pub output: String,
    pub trigger_enabled: bool,
    pub loading_visible: bool,
    pub events: Vec<Event>,
    /// Output as it looked after each append.
    pub snapshots: Vec<String>,
}

impl RecordingSurface {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: String::new(),
            trigger_enabled: true,
            loading_visible: false,
            events: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    pub fn appended(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Append(chunk) => Some(chunk.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_idle(&self) -> bool {
        self.trigger_enabled && !self.loading_visible
    }
}

impl InputSource for RecordingSurface {
    fn input_text(&self) -> String {
        self.input.clone()
    }
}

impl OutputSink for RecordingSurface {
    fn clear_output(&mut self) {
        self.output.clear();
        self.events.push(Event::Clear);
    }

    fn append_output(&mut self, chunk: &str) {
        self.output.push_str(chunk);
        self.snapshots.push(self.output.clone());
        self.events.push(Event::Append(chunk.to_string()));
    }

    fn replace_output(&mut self, text: &str) {
        self.output = text.to_string();
        self.events.push(Event::Replace(text.to_string()));
    }

    fn scroll_output_to(&mut self, position: usize) {
        self.events.push(Event::Scroll(position));
    }
}

impl BusyStateSink for RecordingSurface {
    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
        self.events.push(Event::Trigger(enabled));
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.loading_visible = visible;
        self.events.push(Event::Loading(visible));
    }
}

impl Notifier for RecordingSurface {
    fn notify(&mut self, message: &str) {
        self.events.push(Event::Notice(message.to_string()));
    }
}

pub type Read = Result<Vec<u8>, CommentApiError>;

pub enum Reply {
    /// Headers succeed and the body yields these reads, then ends.
    Body(Vec<Read>),
    /// Headers carry this non-success status.
    Status(u16),
    /// Body reads are fed by the test through the paired sender.
    Live(mpsc::UnboundedReceiver<Read>),
}

pub fn ok(bytes: impl AsRef<[u8]>) -> Read {
    Ok(bytes.as_ref().to_vec())
}

pub fn reset(message: &str) -> Read {
    Err(CommentApiError::stream(message))
}

/// Transport double that answers each `open` with the next scripted reply.
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<CommentRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CommentRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    type Chunk = Vec<u8>;
    type Body = LocalBoxStream<'static, Read>;

    async fn open(&self, request: &CommentRequest) -> Result<Self::Body, CommentApiError> {
        self.requests.borrow_mut().push(request.clone());
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .expect("a scripted reply for every request");

        match reply {
            Reply::Body(reads) => Ok(stream::iter(reads).boxed_local()),
            Reply::Status(code) => Err(CommentApiError::Status {
                status: StatusCode::from_u16(code).expect("valid status code"),
            }),
            Reply::Live(receiver) => Ok(stream::unfold(receiver, |mut receiver| async move {
                receiver.recv().await.map(|read| (read, receiver))
            })
            .boxed_local()),
        }
    }
}
