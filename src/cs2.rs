//! Scan Code Set 2 decoder.
//!
//! Set 2 is a byte-at-a-time protocol with context: `F0` prefixes a
//! break, `E0` selects the extended code page, and two keys have no
//! regular encoding at all. PrintScreen arrives either as `E0 7C` or,
//! Alt-modified, as a bare `84`; both are funneled to one matrix cell.
//! Pause arrives as the one-shot sequence `E1 14 77 E1 F0 14 F0 77`
//! (or `E0 7E E0 F0 7E` under Ctrl) and never sends a break, so the
//! scan loop fakes its release one tick after the make.
//!
//! ```text
//! text on arrows is input, [] surround matrix updates
//!
//!          E0                F0
//! {Init} ------> {Ext} -----------> {ExtBreak}
//!   |  ^          |  \xx[make|80]       \xx[brk|80]
//!   |  \__________|______________________/
//!   |  F0
//!   +-------> {Break} --xx[brk]--> Init
//!   |  E1                 7E(after E0)
//!   +-------> {Pause(i)}  +------> {CtrlPause(i)}
//!              stepping through the fixed tails, [make PAUSE] at the end
//! ```
//!
//! The keyboard also brackets some keys with shadow-shift codes
//! (`E0 12` / `E0 59`) depending on NumLock and Shift. The host tracks
//! its own modifier state, so those are discarded rather than echoed.

use log::{info, warn};

use crate::matrix::Matrix;

/// Folded matrix code of the F7 key (its raw `0x83` exceeds 7 bits).
pub const F7: u8 = 0x83;
/// Folded matrix code all PrintScreen encodings collapse onto.
pub const PRINT_SCREEN: u8 = 0xFC;
/// Matrix code held - for one scan tick - by Pause.
pub const PAUSE: u8 = 0xFE;

/// Expected bytes after the leading `E1` of a Pause make.
const PAUSE_TAIL: [u8; 7] = [0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77];
/// Expected bytes after `E0 7E` of a Ctrl-modified Pause make.
const CTRL_PAUSE_TAIL: [u8; 3] = [0xE0, 0xF0, 0x7E];

/// What the scan loop must do after feeding a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Stream is healthy; the matrix may have changed.
    Continue,
    /// The stream was corrupt. The matrix has been dropped and the host
    /// must flush its own key state to match.
    Cleared,
    /// The keyboard announced a self test: it was just plugged in or
    /// reset itself. The whole lifecycle must start over.
    Reinit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    /// After `F0`.
    Break,
    /// After `E0`.
    Ext,
    /// After `E0 F0`.
    ExtBreak,
    /// `i` bytes into [`PAUSE_TAIL`].
    Pause(u8),
    /// `i` bytes into [`CTRL_PAUSE_TAIL`].
    CtrlPause(u8),
}

/// The Set 2 byte-stream parser.
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

    /// Consume one byte, updating `matrix` as sequences complete.
    ///
    /// A byte either finishes a sequence (make/break lands in the
    /// matrix), extends one (state advances, matrix untouched), or is
    /// invalid in the current state (matrix dropped, host told to
    /// follow suit via [`Control::Cleared`]).
    pub fn feed(&mut self, matrix: &mut Matrix, byte: u8) -> Control {
        use State::*;

        let mut out = Control::Continue;
        self.state = match self.state {
            Init => match byte {
                0xE0 => Ext,
                0xF0 => Break,
                0xE1 => Pause(0),
                0x83 => {
                    matrix.make(F7);
                    Init
                }
                0x84 => {
                    matrix.make(PRINT_SCREEN);
                    Init
                }
                0x00 => {
                    warn!("cs2: overrun");
                    matrix.clear();
                    out = Control::Cleared;
                    Init
                }
                // Self test mid-stream means a fresh plug-in (pass) or a
                // dead board (fail); either way identification starts over.
                0xAA | 0xFC => {
                    info!("cs2: self test {:#04x}", byte);
                    out = Control::Reinit;
                    Init
                }
                b if b < 0x80 => {
                    matrix.make(b);
                    Init
                }
                b => {
                    warn!("cs2: unexpected {:#04x}", b);
                    matrix.clear();
                    out = Control::Cleared;
                    Init
                }
            },
            Ext => match byte {
                // Shadow shifts; the host keeps its own modifier state.
                0x12 | 0x59 => Init,
                0x7E => CtrlPause(0),
                0xF0 => ExtBreak,
                b if b < 0x80 => {
                    matrix.make(b | 0x80);
                    Init
                }
                b => {
                    warn!("cs2: unexpected E0 {:#04x}", b);
                    matrix.clear();
                    out = Control::Cleared;
                    Init
                }
            },
            Break => match byte {
                0x83 => {
                    matrix.brk(F7);
                    Init
                }
                0x84 => {
                    matrix.brk(PRINT_SCREEN);
                    Init
                }
                b if b < 0x80 => {
                    matrix.brk(b);
                    Init
                }
                b => {
                    warn!("cs2: unexpected F0 {:#04x}", b);
                    matrix.clear();
                    out = Control::Cleared;
                    Init
                }
            },
            ExtBreak => match byte {
                0x12 | 0x59 => Init,
                b if b < 0x80 => {
                    matrix.brk(b | 0x80);
                    Init
                }
                b => {
                    warn!("cs2: unexpected E0 F0 {:#04x}", b);
                    matrix.clear();
                    out = Control::Cleared;
                    Init
                }
            },
            Pause(i) => {
                if byte == PAUSE_TAIL[i as usize] {
                    if i as usize + 1 == PAUSE_TAIL.len() {
                        matrix.make(PAUSE);
                        Init
                    } else {
                        Pause(i + 1)
                    }
                } else {
                    // Not the sequence after all; drop it without emission.
                    Init
                }
            }
            CtrlPause(i) => {
                if byte == CTRL_PAUSE_TAIL[i as usize] {
                    if i as usize + 1 == CTRL_PAUSE_TAIL.len() {
                        matrix.make(PAUSE);
                        Init
                    } else {
                        CtrlPause(i + 1)
                    }
                } else {
                    Init
                }
            }
        };
        out
    }
}
