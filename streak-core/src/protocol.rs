// Messages exchanged over chrome.runtime between the content script, the
// popup and the background worker

use serde::{Deserialize, Serialize};

use crate::status::{InitialData, StatusSample};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Message {
    /// Content script → background. Fire-and-forget.
    StatusSample(StatusSample),

    /// Popup → background. Answered with [`Response::InitialData`].
    GetInitialData,

    /// Popup → background. Answered with [`Response::Ack`].
    ForceRecheck,
}

impl Message {
    /// Whether the sender waits for an answer on this message.
    pub fn expects_response(&self) -> bool {
        !matches!(self, Message::StatusSample(_))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Ack {
    pub ok: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Response {
    /// `null` when storage could not be read.
    InitialData(Option<InitialData>),
    Ack(Ack),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::SolvedState;
    use serde_json::json;

    #[test]
    fn test_status_sample_wire_format() {
        let message: Message = serde_json::from_value(json!({
            "type": "statusSample",
            "payload": {
                "solved": false,
                "username": "alice",
                "streakCount": 12,
                "timestamp": 1_700_000_000_000i64,
            }
        }))
        .unwrap();

        let Message::StatusSample(sample) = &message else {
            panic!("expected a status sample, got {:?}", message);
        };
        assert_eq!(sample.solved, SolvedState::NotSolved);
        assert_eq!(sample.streak_count, Some(12));
        assert!(!message.expects_response());
    }

    #[test]
    fn test_requests_have_no_payload() {
        assert_eq!(
            serde_json::to_value(Message::GetInitialData).unwrap(),
            json!({"type": "getInitialData"})
        );
        assert_eq!(
            serde_json::from_value::<Message>(json!({"type": "forceRecheck"})).unwrap(),
            Message::ForceRecheck
        );
        assert!(Message::ForceRecheck.expects_response());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(serde_json::from_value::<Message>(json!({"type": "ping"})).is_err());
    }

    #[test]
    fn test_responses() {
        assert_eq!(
            serde_json::to_value(Response::InitialData(None)).unwrap(),
            json!(null)
        );
        assert_eq!(
            serde_json::to_value(Response::Ack(Ack { ok: true })).unwrap(),
            json!({"ok": true})
        );
    }
}
