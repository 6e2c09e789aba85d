use crate::models::ChatTurn;
use serde::Serialize;

/// Backend reachability, classified once by the startup probe.
///
/// A later generate call succeeding or failing does not revise this; it is
/// a startup-time classification, not a live monitor.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    Unknown,
    Healthy,
    Unhealthy,
}

/// Whether a send request is currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessingState {
    Idle,
    AwaitingResponse,
}

/// Read-only view of the conversation handed to the renderer.
///
/// The renderer is purely reactive to these values; it never mutates the
/// transcript or derives state of its own.
#[derive(Serialize, Clone, Debug)]
pub struct ChatSnapshot {
    pub turns: Vec<ChatTurn>,
    pub loading: bool,
    pub connectivity: Connectivity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Canned starter queries; populated only while the conversation is
    /// fresh (at most the welcome turn).
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_for_the_renderer_boundary() {
        let snapshot = ChatSnapshot {
            turns: vec![ChatTurn::assistant("Hello!")],
            loading: false,
            connectivity: Connectivity::Healthy,
            error: None,
            suggestions: vec!["Show transaction trends over time".to_string()],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["connectivity"], "healthy");
        assert_eq!(json["loading"], false);
        assert_eq!(json["turns"][0]["role"], "assistant");
        assert!(json.get("error").is_none());
        assert_eq!(json["suggestions"][0], "Show transaction trends over time");
    }
}
