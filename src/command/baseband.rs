//! Controller & Baseband Commands
//!
//! Commands from the Controller & Baseband opcode group (OGF 0x03).

use super::{CommandBuffer, CommandParameters};
use crate::opcode::{self, Opcode};

/// Reset command
///
/// Returns the controller to its power-on state. Carries no parameters and
/// its completion carries none back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reset;

impl CommandParameters for Reset {
    const OPCODE: Opcode = opcode::RESET;

    type Return = ();

    fn encode(&self) -> CommandBuffer {
        CommandBuffer::new()
    }
}
