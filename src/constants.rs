//! `Wagtail` Constants
//!
//! This module contains all the constants used throughout the `Wagtail` library.
//! These constants define various limits, default values, and Bluetooth-specific
//! parameters used in the implementation.

/// Maximum number of command transactions that may be in flight at once
pub const MAX_PENDING_COMMANDS: usize = 4;

/// Maximum size of an HCI command parameter block in bytes
pub const MAX_COMMAND_PARAMETERS: usize = 255;

/// Maximum size of an HCI event parameter block in bytes
pub const MAX_EVENT_PARAMETERS: usize = 255;

/// Default command timeout in milliseconds
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 1000;

/// Highest valid connection handle (0x0F00..=0x0FFF are reserved)
pub const CONNECTION_HANDLE_MAX: u16 = 0x0EFF;

/// Connection handle length in bytes on the wire
pub const CONNECTION_HANDLE_LENGTH: usize = 2;

/// Long Term Key length in bytes
pub const LONG_TERM_KEY_LENGTH: usize = 16;
