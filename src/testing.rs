//! Shared fakes for unit tests: scripted input, a scripted model, and a
//! renderer that captures everything it is given.

use std::cell::Cell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::browser::DebugConsole;
use crate::chat::{LineReader, ReadOutcome, Responder, RetryPolicy};
use crate::error::GenerationError;
use crate::message::Message;
use crate::output::Renderer;
use crate::provider::{FragmentStream, TextGenerator};

/// Ordered record of reads and requests, shared between fakes.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// One scripted model reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Fragments(Vec<String>),
    /// Emits the fragments, then fails.
    FailAfter(Vec<String>, String),
}

impl Reply {
    pub fn ok(fragments: &[&str]) -> Self {
        Self::Fragments(fragments.iter().map(|s| s.to_string()).collect())
    }

    pub fn fail(fragments: &[&str], err: &str) -> Self {
        Self::FailAfter(
            fragments.iter().map(|s| s.to_string()).collect(),
            err.to_string(),
        )
    }
}

/// Text generator answering from a queue of [`Reply`]s.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Vec<Message>>>,
    log: EventLog,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Reply>, log: EventLog) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            log,
        })
    }

    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, messages: &[Message]) -> Reply {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::fail(&[], "no scripted reply"))
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn ask(&self, messages: &[Message]) -> Result<String, GenerationError> {
        match self.next_reply(messages) {
            Reply::Fragments(parts) => Ok(parts.concat()),
            Reply::FailAfter(_, err) => Err(GenerationError::Request(err)),
        }
    }

    fn stream_ask(&self, messages: &[Message]) -> FragmentStream {
        let reply = self.next_reply(messages);
        let prompt = messages
            .last()
            .map(|m| m.text().to_string())
            .unwrap_or_default();
        let log = self.log.clone();

        Box::pin(async_stream::stream! {
            log.lock().unwrap().push(format!("stream:{}", prompt));
            match reply {
                Reply::Fragments(parts) => {
                    for part in parts {
                        yield Ok(part);
                    }
                    log.lock().unwrap().push("end".to_string());
                }
                Reply::FailAfter(parts, err) => {
                    for part in parts {
                        yield Ok(part);
                    }
                    log.lock().unwrap().push("fail".to_string());
                    yield Err(GenerationError::Stream(err));
                }
            }
        })
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

/// Input that replays a fixed list of outcomes, then reports EOF.
pub struct ScriptedInput {
    outcomes: VecDeque<ReadOutcome>,
    log: EventLog,
    prompts: Rc<Cell<usize>>,
    closes: Rc<Cell<usize>>,
    open: bool,
}

impl ScriptedInput {
    pub fn new(lines: &[&str], log: EventLog) -> Self {
        let outcomes = lines
            .iter()
            .map(|l| ReadOutcome::Line(l.to_string()))
            .collect();
        Self::with_outcomes(outcomes, log)
    }

    pub fn with_outcomes(outcomes: Vec<ReadOutcome>, log: EventLog) -> Self {
        Self {
            outcomes: outcomes.into(),
            log,
            prompts: Rc::new(Cell::new(0)),
            closes: Rc::new(Cell::new(0)),
            open: true,
        }
    }

    /// Number of prompts shown so far.
    pub fn prompts(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.prompts)
    }

    /// Number of times the input was actually released.
    pub fn closes(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.closes)
    }
}

impl LineReader for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> anyhow::Result<ReadOutcome> {
        if !self.open {
            return Ok(ReadOutcome::Eof);
        }
        self.prompts.set(self.prompts.get() + 1);
        let outcome = self.outcomes.pop_front().unwrap_or(ReadOutcome::Eof);
        if let ReadOutcome::Line(ref line) = outcome {
            self.log.lock().unwrap().push(format!("read:{}", line));
        }
        Ok(outcome)
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.closes.set(self.closes.get() + 1);
        }
    }
}

/// Renderer that records everything for assertions.
#[derive(Debug, Default)]
pub struct CaptureRenderer {
    /// Everything in display order, roughly as a terminal would show it.
    pub transcript: String,
    pub fragments: Vec<String>,
    pub notices: Vec<String>,
    pub errors: Vec<String>,
}

impl Renderer for CaptureRenderer {
    fn render_notice(&mut self, text: &str) {
        self.notices.push(text.to_string());
        self.transcript.push_str(text);
        self.transcript.push('\n');
    }

    fn render_fragment(&mut self, fragment: &str) {
        self.fragments.push(fragment.to_string());
        self.transcript.push_str(fragment);
    }

    fn render_done(&mut self) {
        self.transcript.push('\n');
    }

    fn render_error(&mut self, err: &str) {
        self.errors.push(err.to_string());
        self.transcript.push_str("error: ");
        self.transcript.push_str(err);
        self.transcript.push('\n');
    }

    fn render_separator(&mut self) {
        self.transcript.push('\n');
    }
}

/// A responder over `generator` that captures output and never sleeps.
pub fn responder(generator: Arc<ScriptedGenerator>) -> Responder<CaptureRenderer> {
    responder_with_recording(generator, PathBuf::from("/nonexistent/click-recording.json"))
}

pub fn responder_with_recording(
    generator: Arc<ScriptedGenerator>,
    recording_path: PathBuf,
) -> Responder<CaptureRenderer> {
    Responder::new(
        generator,
        CaptureRenderer::default(),
        DebugConsole::new(recording_path),
        RetryPolicy::none(),
    )
}
