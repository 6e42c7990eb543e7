#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(async_fn_in_trait)]

// This mod MUST go first so the others see its macros.
mod fmt;

pub mod command;
pub mod constants;
pub mod gatt;
pub mod opcode;
pub mod transaction;
pub mod uuid;

pub use command::{CodecError, CommandParameters, ConnectionHandle, ReturnParameters};
pub use opcode::{Opcode, Status};
pub use transaction::{
    CommandComplete, CommandEngine, CommandTransport, DEFAULT_COMMAND_TIMEOUT,
};
pub use uuid::BluetoothUuid;

/// HCI transaction errors with detailed failure information
///
/// Exactly one of these (or a decoded return value) is produced per
/// transaction; failure and success are mutually exclusive outcomes, and no
/// variant is retried automatically by this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HciError {
    /// Caller supplied a zero timeout; rejected before any transmission
    InvalidTimeout,
    /// No matching completion arrived within the deadline
    Timeout,
    /// Controller explicitly reported a non-success status
    Controller(Status),
    /// A completion arrived but its payload did not decode into the
    /// expected return type
    MalformedResponse,
    /// The transport collaborator failed to transmit the command
    Transport,
    /// A transaction on the same opcode is already pending
    AlreadyInProgress,
    /// Every correlation slot is occupied by an in-flight transaction
    Busy,
}

impl core::fmt::Display for HciError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidTimeout => write!(f, "Timeout must be positive"),
            Self::Timeout => write!(f, "Command timed out"),
            Self::Controller(status) => {
                write!(f, "Controller reported status {:#04X}", status.raw())
            }
            Self::MalformedResponse => write!(f, "Completion payload failed to decode"),
            Self::Transport => write!(f, "Command transmission failed"),
            Self::AlreadyInProgress => write!(f, "A command with this opcode is already pending"),
            Self::Busy => write!(f, "All command slots are in flight"),
        }
    }
}
