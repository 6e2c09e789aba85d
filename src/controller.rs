use crate::api::{GenerateOptions, HistoryEntry, Text2SqlBackend};
use crate::events::{ChatEvent, ChatEventSink, LogSink};
use crate::models::ChatTurn;
use crate::state::{ChatSnapshot, Connectivity, ProcessingState};
use std::sync::Arc;
use std::time::Duration;

const STARTUP_WELCOME: &str = "Hello! I'm your Text2SQL AI Assistant. I can help you analyze data by converting your natural language questions into SQL queries and generating interactive charts. Try asking me something like \"Show me customer balances by income category\" or \"What are the top performing products?\"";

const CLEAR_WELCOME: &str = "Hello! I'm your Text2SQL AI Assistant. I can help you analyze data by converting your natural language questions into SQL queries and generating interactive charts. What would you like to explore?";

const SUCCESS_FALLBACK: &str = "Query executed successfully.";

const CONNECTIVITY_ERROR: &str =
    "Unable to connect to the API server. Please check your connection.";

const GENERIC_FAILURE: &str = "Failed to process your request. Please try again.";

static SAMPLE_QUERIES: [&str; 5] = [
    "Show me customer balances by income category",
    "What are the average account balances for each customer type?",
    "List customers with balances over $10,000",
    "Show transaction trends over time",
    "Which customers have the highest balances?",
];

const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const PREVIEW_MAX_CHARS: usize = 100;

/// Formats a transcript into the conversational context the backend expects:
/// ordered role/content pairs, nothing else.
///
/// Pure function. An empty transcript yields an empty history.
pub fn format_history(turns: &[ChatTurn]) -> Vec<HistoryEntry> {
    turns
        .iter()
        .map(|turn| HistoryEntry {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        })
        .collect()
}

fn apology(message: &str) -> String {
    format!(
        "I apologize, but I encountered an error: {}. Please try rephrasing your question or check if you're asking about data that exists in our database.",
        message
    )
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_MAX_CHARS).collect()
}

/// The conversation controller.
///
/// Owns the transcript and drives the request/response lifecycle of each
/// user turn against the text-to-SQL backend. Every backend failure is
/// converted into visible state (banner + synthetic assistant turn); no
/// error ever propagates to the caller, and the user's own message is
/// appended before any network work so it is never lost.
pub struct ChatController {
    backend: Arc<dyn Text2SqlBackend>,
    sink: Arc<dyn ChatEventSink>,
    transcript: Vec<ChatTurn>,
    connectivity: Connectivity,
    processing: ProcessingState,
    error: Option<String>,
    generate_timeout: Duration,
    probe_timeout: Duration,
}

impl ChatController {
    pub fn new(backend: Arc<dyn Text2SqlBackend>) -> Self {
        Self {
            backend,
            sink: Arc::new(LogSink),
            transcript: Vec::new(),
            connectivity: Connectivity::Unknown,
            processing: ProcessingState::Idle,
            error: None,
            generate_timeout: DEFAULT_GENERATE_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Replaces the default log-based event sink.
    pub fn with_sink(mut self, sink: Arc<dyn ChatEventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Overrides the bound on a single generate call.
    pub fn with_generate_timeout(mut self, timeout: Duration) -> Self {
        self.generate_timeout = timeout;
        self
    }

    /// Overrides the bound on the startup health probe.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Startup sequence: probe backend health, then seed the transcript
    /// with the welcome turn.
    ///
    /// The welcome turn is appended whatever the probe outcome, so the user
    /// always gets a usable chat surface; an unreachable backend only sets
    /// the error banner. Intended to run once, before the first send.
    pub async fn initialize(&mut self) {
        match tokio::time::timeout(self.probe_timeout, self.backend.health_check()).await {
            Ok(Ok(())) => {
                self.connectivity = Connectivity::Healthy;
                self.emit(ChatEvent::ProbeSucceeded);
            }
            Ok(Err(err)) => self.record_probe_failure(err.to_string()),
            Err(_) => self.record_probe_failure(format!(
                "health check timed out after {}s",
                self.probe_timeout.as_secs()
            )),
        }

        if self.transcript.is_empty() {
            self.transcript.push(ChatTurn::assistant(STARTUP_WELCOME));
        }
    }

    fn record_probe_failure(&mut self, message: String) {
        self.connectivity = Connectivity::Unhealthy;
        self.error = Some(CONNECTIVITY_ERROR.to_string());
        self.emit(ChatEvent::ProbeFailed { message });
    }

    /// Processes one user submission.
    ///
    /// Appends the user turn, calls the backend with the prior transcript as
    /// context, and appends either the enriched assistant turn or a
    /// synthetic apology turn. Empty submissions are dropped silently; a
    /// submission while a request is in flight is rejected without touching
    /// any state.
    pub async fn send_turn(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.emit(ChatEvent::EmptySubmission);
            return;
        }
        if self.processing == ProcessingState::AwaitingResponse {
            self.emit(ChatEvent::SendRejected);
            return;
        }

        // Context for the backend is the transcript before this turn; the
        // new message travels as the primary query text, not as history.
        let history = format_history(&self.transcript);

        self.transcript.push(ChatTurn::user(text));
        self.processing = ProcessingState::AwaitingResponse;
        self.error = None;
        self.emit(ChatEvent::TurnStarted { preview: preview(text) });

        let options = GenerateOptions::default();
        let outcome = match tokio::time::timeout(
            self.generate_timeout,
            self.backend.generate_sql(text, &history, &options),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!(
                "the request timed out after {}s",
                self.generate_timeout.as_secs()
            )),
        };

        match outcome {
            Ok(reply) => {
                self.emit(ChatEvent::TurnCompleted {
                    row_count: reply.sql_results.as_deref().map_or(0, |rows| rows.len()),
                    has_chart: reply.chart_html.is_some(),
                });

                let mut turn = ChatTurn::assistant(
                    reply.narrative.unwrap_or_else(|| SUCCESS_FALLBACK.to_string()),
                );
                turn.sql_query = reply.sql_query;
                turn.sql_results = reply.sql_results;
                turn.chart_html = reply.chart_html;
                self.transcript.push(turn);
            }
            Err(err) => {
                let mut message = err.to_string();
                if message.is_empty() {
                    message = GENERIC_FAILURE.to_string();
                }
                self.emit(ChatEvent::TurnFailed { message: message.clone() });

                self.transcript.push(ChatTurn::assistant(apology(&message)));
                self.error = Some(message);
            }
        }

        self.processing = ProcessingState::Idle;
    }

    /// Discards the conversation and starts over with a fresh welcome turn.
    ///
    /// Clears the error banner; does not touch connectivity. Idempotent.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.transcript.push(ChatTurn::assistant(CLEAR_WELCOME));
        self.error = None;
        self.emit(ChatEvent::ConversationCleared);
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn processing(&self) -> ProcessingState {
        self.processing
    }

    pub fn is_loading(&self) -> bool {
        self.processing == ProcessingState::AwaitingResponse
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starter queries, shown only while the conversation is still fresh.
    pub fn suggestions(&self) -> &'static [&'static str] {
        if self.transcript.len() <= 1 {
            &SAMPLE_QUERIES
        } else {
            &[]
        }
    }

    /// Clones the observable state for the renderer.
    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            turns: self.transcript.clone(),
            loading: self.is_loading(),
            connectivity: self.connectivity,
            error: self.error.clone(),
            suggestions: self.suggestions().iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn emit(&self, event: ChatEvent) {
        self.sink.on_event(&event);
    }
}
