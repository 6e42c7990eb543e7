//! LE Controller Commands
//!
//! Commands from the LE Controller opcode group (OGF 0x08). Parameter layouts
//! follow the Bluetooth Core Specification, Vol 4, Part E, 7.8.

use super::{CodecError, CommandBuffer, CommandParameters, ConnectionHandle, ReturnParameters};
use crate::constants::{CONNECTION_HANDLE_LENGTH, LONG_TERM_KEY_LENGTH};
use crate::opcode::{self, Opcode};

/// LE Long Term Key Request Reply command
///
/// Replies to an LE Long Term Key Request event when the host can provide
/// the Long Term Key for the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongTermKeyRequestReply {
    /// Handle of the connection the key belongs to
    pub connection_handle: ConnectionHandle,
    /// 128-bit Long Term Key, emitted on the wire as given
    pub long_term_key: [u8; LONG_TERM_KEY_LENGTH],
}

impl CommandParameters for LongTermKeyRequestReply {
    const OPCODE: Opcode = opcode::LE_LONG_TERM_KEY_REQUEST_REPLY;

    type Return = LongTermKeyRequestReplyReturn;

    fn encode(&self) -> CommandBuffer {
        let mut buffer = CommandBuffer::new();
        buffer
            .extend_from_slice(&self.connection_handle.to_le_bytes())
            .ok();
        buffer.extend_from_slice(&self.long_term_key).ok();
        buffer
    }
}

/// Return parameters of [`LongTermKeyRequestReply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongTermKeyRequestReplyReturn {
    /// Handle echoed back by the controller
    pub connection_handle: ConnectionHandle,
}

impl ReturnParameters for LongTermKeyRequestReplyReturn {
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != CONNECTION_HANDLE_LENGTH {
            return Err(CodecError::InvalidLength);
        }
        Ok(Self {
            connection_handle: ConnectionHandle::from_le_bytes([bytes[0], bytes[1]]),
        })
    }
}

/// LE Long Term Key Request Negative Reply command
///
/// Replies to an LE Long Term Key Request event when the host cannot provide
/// a Long Term Key for the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongTermKeyRequestNegativeReply {
    /// Handle of the connection the request arrived on
    pub connection_handle: ConnectionHandle,
}

impl CommandParameters for LongTermKeyRequestNegativeReply {
    const OPCODE: Opcode = opcode::LE_LONG_TERM_KEY_REQUEST_NEGATIVE_REPLY;

    type Return = LongTermKeyRequestNegativeReplyReturn;

    fn encode(&self) -> CommandBuffer {
        let mut buffer = CommandBuffer::new();
        buffer
            .extend_from_slice(&self.connection_handle.to_le_bytes())
            .ok();
        buffer
    }
}

/// Return parameters of [`LongTermKeyRequestNegativeReply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongTermKeyRequestNegativeReplyReturn {
    /// Handle echoed back by the controller
    pub connection_handle: ConnectionHandle,
}

impl ReturnParameters for LongTermKeyRequestNegativeReplyReturn {
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != CONNECTION_HANDLE_LENGTH {
            return Err(CodecError::InvalidLength);
        }
        Ok(Self {
            connection_handle: ConnectionHandle::from_le_bytes([bytes[0], bytes[1]]),
        })
    }
}
