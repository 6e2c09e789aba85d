// Observability side channel. The controller reports lifecycle transitions
// through an injected sink; its state machine never depends on what the sink
// does with them.

/// Lifecycle events emitted by the conversation controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    ProbeSucceeded,
    ProbeFailed { message: String },
    /// An empty or whitespace-only submission was dropped.
    EmptySubmission,
    /// A send arrived while another request was still in flight.
    SendRejected,
    TurnStarted { preview: String },
    TurnCompleted { row_count: usize, has_chart: bool },
    TurnFailed { message: String },
    ConversationCleared,
}

/// Receiver for controller lifecycle events.
pub trait ChatEventSink: Send + Sync {
    fn on_event(&self, event: &ChatEvent);
}

/// Default sink: writes events through the `log` facade.
pub struct LogSink;

impl ChatEventSink for LogSink {
    fn on_event(&self, event: &ChatEvent) {
        match event {
            ChatEvent::ProbeSucceeded => log::info!("API health check passed"),
            ChatEvent::ProbeFailed { message } => {
                log::error!("API health check failed: {}", message);
            }
            ChatEvent::EmptySubmission => log::warn!("Empty message submitted"),
            ChatEvent::SendRejected => {
                log::warn!("Send rejected: a request is already in flight");
            }
            ChatEvent::TurnStarted { preview } => {
                log::info!("Starting message processing: {}", preview);
            }
            ChatEvent::TurnCompleted { row_count, has_chart } => {
                log::info!("Turn completed ({} rows, chart: {})", row_count, has_chart);
            }
            ChatEvent::TurnFailed { message } => {
                log::error!("Error processing query: {}", message);
            }
            ChatEvent::ConversationCleared => log::info!("Conversation cleared"),
        }
    }
}

/// Sink that discards every event.
pub struct NullSink;

impl ChatEventSink for NullSink {
    fn on_event(&self, _event: &ChatEvent) {}
}
