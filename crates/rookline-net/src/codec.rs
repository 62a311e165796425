//! Frame codec
//!
//! One protocol message per frame, encoded with bincode.

use crate::{Error, Result};
use rookline_core::{ClientRequest, ServerEvent};
use tracing::trace;

/// Encode an outbound request
pub fn encode_request(request: &ClientRequest) -> Result<Vec<u8>> {
    let bytes = bincode::serialize(request).map_err(|e| Error::Serialization(e.to_string()))?;
    trace!(len = bytes.len(), "encoded request");
    Ok(bytes)
}

/// Decode an outbound request (authority side and tests)
pub fn decode_request(bytes: &[u8]) -> Result<ClientRequest> {
    bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode an inbound event (authority side and tests)
pub fn encode_event(event: &ServerEvent) -> Result<Vec<u8>> {
    bincode::serialize(event).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode an inbound event
pub fn decode_event(bytes: &[u8]) -> Result<ServerEvent> {
    let event: ServerEvent =
        bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
    trace!(len = bytes.len(), kind = event.kind(), "decoded event");
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rookline_core::protocol::ActionRequest;
    use rookline_core::{Move, Outcome, Player, Promotion, RoomId, Side};

    #[test]
    fn test_session_started_survives_the_wire() {
        let event = ServerEvent::SessionStarted {
            room_id: RoomId::new("R1"),
            players: vec![
                Player::new("a", "Alice").with_side(Side::White),
                Player::new("b", "Bob"),
            ],
            initial_position: None,
        };
        let bytes = encode_event(&event).unwrap();
        assert_eq!(decode_event(&bytes).unwrap(), event);
    }

    #[test]
    fn test_submit_action_survives_the_wire() {
        let mv = Move::parse("e7e8").unwrap().with_promotion(Promotion::Knight);
        let request = ClientRequest::SubmitAction(ActionRequest {
            room_id: RoomId::new("R1"),
            origin: mv.origin,
            destination: mv.destination,
            promotion: mv.promotion,
            client_timestamp_ms: -5,
            elapsed_think_ms: 1_200,
        });
        let bytes = encode_request(&request).unwrap();
        assert_eq!(decode_request(&bytes).unwrap(), request);
    }

    #[test]
    fn test_garbage_is_a_serialization_error() {
        let err = decode_event(&[0xff, 0xff, 0xff, 0xff, 0x01]).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(matches!(decode_event(&[]), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_outcome_carries_winner() {
        let event = ServerEvent::ended(Outcome::WinBySide, Some(Side::Black));
        let bytes = encode_event(&event).unwrap();
        assert_eq!(decode_event(&bytes).unwrap(), event);
    }
}
