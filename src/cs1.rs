//! Scan Code Set 1 (XT) decoder.
//!
//! XT boards encode the event in the code itself: bit 7 clear is a make,
//! bit 7 set is the break of `code & 0x7F`. The 83-key boards this
//! family covers emit no prefix bytes at all; later boards wired through
//! an XT interface may still send `E0`/`E1` pages, which fall outside
//! the 16x8 translation space and are swallowed whole.
//!
//! Note there is no self-test detection here: `0xAA` is the break of
//! LShift (`0x2A`), not a status byte, and XT boards announce themselves
//! only at power-on.

use crate::cs2::Control;
use crate::matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    /// After `E0` or `E1`; the next byte is dropped with its prefix.
    Ext,
}

/// The Set 1 byte-stream parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    state: State,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub const fn new() -> Self {
        Decoder { state: State::Init }
    }

    /// Consume one byte, updating `matrix`.
    pub fn feed(&mut self, matrix: &mut Matrix, byte: u8) -> Control {
        use State::*;

        self.state = match self.state {
            Init => match byte {
                0xE0 | 0xE1 => Ext,
                b if b & 0x80 != 0 => {
                    matrix.brk(b & 0x7F);
                    Init
                }
                b => {
                    matrix.make(b);
                    Init
                }
            },
            Ext => Init,
        };
        Control::Continue
    }
}
