//! Message codec — length framing and serialization for the wire protocol.

use crate::message::ExchangeMessage;
use crate::ExchangeError;

/// Maximum frame size in bytes. Proximity frames are small; anything
/// larger than this is garbage or abuse.
pub const MAX_FRAME_SIZE: usize = 16 * 1024;

/// Length of the frame header (big-endian payload length).
const HEADER_LEN: usize = 4;

/// Encode a message for transmission: 4-byte big-endian length prefix
/// followed by the bincode body.
pub fn encode(message: &ExchangeMessage) -> Result<Vec<u8>, ExchangeError> {
    let body =
        bincode::serialize(message).map_err(|e| ExchangeError::MalformedMessage(e.to_string()))?;
    if body.len() > MAX_FRAME_SIZE {
        return Err(ExchangeError::MessageTooLarge {
            size: body.len(),
            max: MAX_FRAME_SIZE,
        });
    }
    let mut frame = Vec::with_capacity(HEADER_LEN + body.len());
    frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Decode a received frame, validating the length prefix against the body.
pub fn decode(frame: &[u8]) -> Result<ExchangeMessage, ExchangeError> {
    if frame.len() < HEADER_LEN {
        return Err(ExchangeError::MalformedMessage(format!(
            "frame shorter than header: {} bytes",
            frame.len()
        )));
    }
    let declared = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
    if declared > MAX_FRAME_SIZE {
        return Err(ExchangeError::MessageTooLarge {
            size: declared,
            max: MAX_FRAME_SIZE,
        });
    }
    let body = &frame[HEADER_LEN..];
    if body.len() != declared {
        return Err(ExchangeError::MalformedMessage(format!(
            "length prefix {} does not match body length {}",
            declared,
            body.len()
        )));
    }
    bincode::deserialize(body).map_err(|e| ExchangeError::MalformedMessage(e.to_string()))
}
