//! HCI Command Transaction Engine
//!
//! This module owns the request/response half of the HCI contract: a command
//! is transmitted with its opcode, the caller suspends on a correlation
//! window keyed by that opcode, and the window resolves when the controller's
//! completion signal arrives, an error status comes back, or the deadline
//! expires.
//!
//! ## Architecture
//!
//! The engine keeps a fixed pool of correlation slots. `execute` claims a
//! slot, transmits through the [`CommandTransport`] collaborator, and waits
//! on the slot's signal with a timer racing it. The host's event-dispatch
//! path feeds inbound completions through [`CommandEngine::handle_command_complete`],
//! which matches them to a pending slot by opcode. Nothing outside these two
//! paths touches the transport.
//!
//! Concurrent transactions on different opcodes proceed independently. Two
//! transactions sharing one opcode cannot be multiplexed — the second caller
//! is rejected rather than queued. A transaction dropped mid-wait releases
//! its window; no abort is sent to the controller.
//!
//! ## Usage
//!
//! The engine is `const`-constructible, so it can live in a `static` next to
//! the host's other shared state:
//!
//! ```rust,ignore
//! static ENGINE: CommandEngine = CommandEngine::new();
//!
//! let reply = ENGINE
//!     .execute(&transport, &LongTermKeyRequestNegativeReply { connection_handle }, DEFAULT_COMMAND_TIMEOUT)
//!     .await?;
//! ```

use core::cell::RefCell;

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use heapless::Vec;

use crate::HciError;
use crate::command::{CommandParameters, ReturnParameters};
use crate::constants::{DEFAULT_COMMAND_TIMEOUT_MS, MAX_EVENT_PARAMETERS, MAX_PENDING_COMMANDS};
use crate::opcode::{Opcode, Status};

/// Process-wide default transaction timeout, overridable per call
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(DEFAULT_COMMAND_TIMEOUT_MS);

/// Buffer holding a completion event's parameter block
pub type EventParameters = Vec<u8, MAX_EVENT_PARAMETERS>;

/// Command transmission collaborator
///
/// The physical framing (packet indicator bytes, UART/USB transport, flow
/// control) lives behind this trait; the engine only hands over an opcode and
/// an encoded parameter block.
pub trait CommandTransport {
    /// Transport-specific failure type
    type Error;

    /// Transmit one command packet to the controller
    async fn send_command(&self, opcode: Opcode, parameters: &[u8]) -> Result<(), Self::Error>;
}

/// A completion signal from the controller
///
/// Covers both Command Complete events (success status plus return
/// parameters) and status-only error signals (non-success status; the
/// parameter block is ignored).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandComplete {
    /// Opcode of the command this signal answers
    pub opcode: Opcode,
    /// Outcome reported by the controller
    pub status: Status,
    /// Return parameter block
    pub parameters: EventParameters,
}

/// Correlation window lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    /// Unused, claimable
    Free,
    /// Transaction in flight; matches completions for this opcode
    Pending(Opcode),
    /// Completion handed to the signal; no longer matches, not yet reusable
    Delivered,
}

/// The command transaction engine
///
/// `SLOTS` bounds how many transactions may be in flight at once.
pub struct CommandEngine<const SLOTS: usize = { MAX_PENDING_COMMANDS }> {
    states: Mutex<CriticalSectionRawMutex, RefCell<[SlotState; SLOTS]>>,
    signals: [Signal<CriticalSectionRawMutex, CommandComplete>; SLOTS],
}

impl<const SLOTS: usize> CommandEngine<SLOTS> {
    /// Create an engine with all correlation slots free
    #[must_use]
    pub const fn new() -> Self {
        Self {
            states: Mutex::new(RefCell::new([SlotState::Free; SLOTS])),
            signals: [const { Signal::new() }; SLOTS],
        }
    }

    /// Execute a command transaction with the default timeout
    ///
    /// # Errors
    /// See [`CommandEngine::execute`].
    pub async fn execute_with_default_timeout<C, T>(
        &self,
        transport: &T,
        command: &C,
    ) -> Result<C::Return, HciError>
    where
        C: CommandParameters,
        T: CommandTransport,
    {
        self.execute(transport, command, DEFAULT_COMMAND_TIMEOUT).await
    }

    /// Execute a command transaction
    ///
    /// Serializes `command`, transmits it, and suspends until the matching
    /// completion arrives or `timeout` (measured from transmission) expires.
    /// Exactly one outcome is produced; a failed transaction never yields a
    /// partial return value.
    ///
    /// # Errors
    /// - `InvalidTimeout` — `timeout` is zero; nothing was transmitted.
    ///   (`Duration` is unsigned, so zero is the only non-positive value.)
    /// - `AlreadyInProgress` — a transaction on this opcode is already
    ///   pending; serialize such calls externally.
    /// - `Busy` — every correlation slot is in flight.
    /// - `Transport` — the transport collaborator failed to transmit.
    /// - `Controller(status)` — the controller reported a non-success status.
    /// - `MalformedResponse` — the completion payload did not decode into
    ///   the expected return type.
    /// - `Timeout` — no matching signal arrived within the deadline; the
    ///   correlation window has been deregistered.
    pub async fn execute<C, T>(
        &self,
        transport: &T,
        command: &C,
        timeout: Duration,
    ) -> Result<C::Return, HciError>
    where
        C: CommandParameters,
        T: CommandTransport,
    {
        if timeout.as_ticks() == 0 {
            return Err(HciError::InvalidTimeout);
        }

        let parameters = command.encode();
        let index = self.claim(C::OPCODE)?;
        // Deregisters the window on every exit, including cancellation
        let _window = CorrelationGuard { engine: self, index };

        if transport.send_command(C::OPCODE, &parameters).await.is_err() {
            return Err(HciError::Transport);
        }
        debug!(
            "command sent: opcode={=u16:x} len={=usize}",
            C::OPCODE.raw(),
            parameters.len()
        );

        let completion = match select(self.signals[index].wait(), Timer::after(timeout)).await {
            Either::First(completion) => completion,
            Either::Second(()) => {
                // The deadline fired, but the completion may have been handed
                // to the window before this task re-ran; honor it if so.
                match self.take_delivered(index) {
                    Some(completion) => completion,
                    None => return Err(HciError::Timeout),
                }
            }
        };

        completion.status.to_result().map_err(HciError::Controller)?;
        C::Return::decode(&completion.parameters).map_err(|_| HciError::MalformedResponse)
    }

    /// Dispatch an inbound completion signal to its pending transaction
    ///
    /// Returns whether a transaction consumed the signal. Completions with no
    /// pending window — including duplicates after the first match — are
    /// dropped; they belong to no live transaction.
    pub fn handle_command_complete(&self, completion: CommandComplete) -> bool {
        let opcode = completion.opcode;
        let matched = self.states.lock(|states| {
            let mut states = states.borrow_mut();
            match states.iter().position(|s| *s == SlotState::Pending(opcode)) {
                Some(index) => {
                    states[index] = SlotState::Delivered;
                    self.signals[index].signal(completion);
                    true
                }
                None => false,
            }
        });
        if matched {
            trace!("completion matched: opcode={=u16:x}", opcode.raw());
        } else {
            warn!(
                "dropped completion with no pending window: opcode={=u16:x}",
                opcode.raw()
            );
        }
        matched
    }

    /// Claim a free slot for `opcode`, rejecting duplicates
    fn claim(&self, opcode: Opcode) -> Result<usize, HciError> {
        self.states.lock(|states| {
            let mut states = states.borrow_mut();
            if states.iter().any(|s| *s == SlotState::Pending(opcode)) {
                return Err(HciError::AlreadyInProgress);
            }
            let Some(index) = states.iter().position(|s| *s == SlotState::Free) else {
                return Err(HciError::Busy);
            };
            self.signals[index].reset();
            states[index] = SlotState::Pending(opcode);
            Ok(index)
        })
    }

    /// Take a completion that was delivered but not yet consumed
    fn take_delivered(&self, index: usize) -> Option<CommandComplete> {
        self.states.lock(|states| {
            if states.borrow()[index] == SlotState::Delivered {
                self.signals[index].try_take()
            } else {
                None
            }
        })
    }

    /// Return a slot to the pool
    fn release(&self, index: usize) {
        self.states.lock(|states| {
            states.borrow_mut()[index] = SlotState::Free;
            self.signals[index].reset();
        });
    }
}

impl<const SLOTS: usize> Default for CommandEngine<SLOTS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases a correlation slot when the owning transaction ends, whether by
/// resolution or by the caller abandoning the suspended future
struct CorrelationGuard<'a, const SLOTS: usize> {
    engine: &'a CommandEngine<SLOTS>,
    index: usize,
}

impl<const SLOTS: usize> Drop for CorrelationGuard<'_, SLOTS> {
    fn drop(&mut self) {
        self.engine.release(self.index);
    }
}
