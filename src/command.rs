//! HCI Command Parameter Codec
//!
//! Every HCI command owns a fixed opcode and a canonical byte encoding of its
//! parameter block; every completion payload decodes into a typed return
//! parameter value. The wire contract is bit-exact: multi-byte fields are
//! little-endian, fields are concatenated in declaration order with no
//! padding, and a 16-bit handle always occupies exactly two bytes.
//!
//! Encoding performs no range validation of nominal sub-ranges (reserved
//! handle values are emitted as given), and decoding accepts any
//! representable field value — only a length mismatch is a decode failure.
//! Out-of-range policy belongs to the caller or the controller, not here.

use crate::constants::{CONNECTION_HANDLE_MAX, MAX_COMMAND_PARAMETERS};
use crate::opcode::Opcode;
use heapless::Vec;

pub mod baseband;
pub mod le;

/// Buffer holding an encoded command parameter block
pub type CommandBuffer = Vec<u8, MAX_COMMAND_PARAMETERS>;

/// Command parameter codec errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Input length does not match the expected parameter block size
    InvalidLength,
    /// A field value cannot be represented by the target type
    InvalidValue,
}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLength => write!(f, "Parameter block length mismatch"),
            Self::InvalidValue => write!(f, "Field value out of representable range"),
        }
    }
}

/// A typed HCI command with its opcode and canonical wire encoding
///
/// Implementations are transient value types: built by the caller, serialized
/// once by the transaction engine, then discarded.
pub trait CommandParameters {
    /// Opcode identifying this command class
    const OPCODE: Opcode;

    /// Return parameters carried by this command's completion event
    type Return: ReturnParameters;

    /// Serialize the parameter block exactly as it appears on the wire
    fn encode(&self) -> CommandBuffer;
}

/// Typed return parameters decodable from a completion event payload
pub trait ReturnParameters: Sized {
    /// Deserialize from a completion payload
    ///
    /// # Errors
    /// Returns `CodecError::InvalidLength` if `bytes` does not match the
    /// expected parameter block size.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;
}

/// Commands without return parameters complete with an empty payload
impl ReturnParameters for () {
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.is_empty() {
            Ok(())
        } else {
            Err(CodecError::InvalidLength)
        }
    }
}

/// An ACL connection handle
///
/// Handles identify a connection between the host and a remote device.
/// The specification reserves values above [`ConnectionHandle::MAX`], but the
/// codec carries any 16-bit value unmodified in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectionHandle(u16);

impl ConnectionHandle {
    /// Highest non-reserved handle value (0x0EFF)
    pub const MAX: ConnectionHandle = ConnectionHandle(CONNECTION_HANDLE_MAX);

    /// Wrap a raw handle value
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Get the raw handle value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Little-endian wire encoding
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// Decode from little-endian wire bytes
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }
}

impl From<u16> for ConnectionHandle {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<ConnectionHandle> for u16 {
    fn from(handle: ConnectionHandle) -> Self {
        handle.0
    }
}
