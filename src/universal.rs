//! The universal key layout.
//!
//! Every supported keyboard family is translated onto one fixed 8-row,
//! 16-column grid of logical key positions, so a single action map can
//! serve XT, AT/PS2 and Terminal boards alike. A position packs into one
//! byte: row in the high nibble, column in the low nibble.
//!
//! Row | Contents
//! ----|---------------------------------------------------------------
//!  0  | Esc, F1-F12, PrintScreen, ScrollLock, Pause
//!  1  | `` ` ``, 1-0, `-`, `=`, Yen, Backspace, Insert
//!  2  | Tab, Q-P, `[`, `]`, `\`, Delete, Home
//!  3  | CapsLock, A-L, `;`, `'`, ISO `#`, Enter, End, PageUp
//!  4  | LShift, ISO `\`, Z-M, `,`, `.`, `/`, Ro, RShift, Up, PageDown
//!  5  | LCtrl, LGui, LAlt, Muhenkan, Space, Henkan, Kana, RAlt, RGui,
//!     | App, RCtrl, Left, Down, Right
//!  6  | F13-F24, NumLock
//!  7  | keypad `/ * - 7 8 9 + 4 5 6 1 2 3 Enter 0 .`

/// One position on the universal grid, or the [`NO`] sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniPos(u8);

/// "This physical key maps to nothing."
pub const NO: UniPos = UniPos(0xFF);

impl UniPos {
    /// Pack a grid coordinate. Rows run 0..8, columns 0..16.
    pub const fn new(row: u8, col: u8) -> Self {
        UniPos(row << 4 | col & 0x0F)
    }

    /// Universal row, 0..8.
    pub const fn row(self) -> u8 {
        self.0 >> 4
    }

    /// Universal column, 0..16.
    pub const fn col(self) -> u8 {
        self.0 & 0x0F
    }

    /// Whether this is the [`NO`] sentinel.
    pub const fn is_no(self) -> bool {
        self.0 == 0xFF
    }
}

// Row 0: function row.
pub const ESC: UniPos = UniPos::new(0, 0);
pub const F1: UniPos = UniPos::new(0, 1);
pub const F2: UniPos = UniPos::new(0, 2);
pub const F3: UniPos = UniPos::new(0, 3);
pub const F4: UniPos = UniPos::new(0, 4);
pub const F5: UniPos = UniPos::new(0, 5);
pub const F6: UniPos = UniPos::new(0, 6);
pub const F7: UniPos = UniPos::new(0, 7);
pub const F8: UniPos = UniPos::new(0, 8);
pub const F9: UniPos = UniPos::new(0, 9);
pub const F10: UniPos = UniPos::new(0, 10);
pub const F11: UniPos = UniPos::new(0, 11);
pub const F12: UniPos = UniPos::new(0, 12);
pub const PSCREEN: UniPos = UniPos::new(0, 13);
pub const SCROLL_LOCK: UniPos = UniPos::new(0, 14);
pub const PAUSE: UniPos = UniPos::new(0, 15);

// Row 1: number row.
pub const GRAVE: UniPos = UniPos::new(1, 0);
pub const KB1: UniPos = UniPos::new(1, 1);
pub const KB2: UniPos = UniPos::new(1, 2);
pub const KB3: UniPos = UniPos::new(1, 3);
pub const KB4: UniPos = UniPos::new(1, 4);
pub const KB5: UniPos = UniPos::new(1, 5);
pub const KB6: UniPos = UniPos::new(1, 6);
pub const KB7: UniPos = UniPos::new(1, 7);
pub const KB8: UniPos = UniPos::new(1, 8);
pub const KB9: UniPos = UniPos::new(1, 9);
pub const KB0: UniPos = UniPos::new(1, 10);
pub const MINUS: UniPos = UniPos::new(1, 11);
pub const EQUAL: UniPos = UniPos::new(1, 12);
pub const YEN: UniPos = UniPos::new(1, 13);
pub const BSPACE: UniPos = UniPos::new(1, 14);
pub const INSERT: UniPos = UniPos::new(1, 15);

// Row 2: top letter row.
pub const TAB: UniPos = UniPos::new(2, 0);
pub const Q: UniPos = UniPos::new(2, 1);
pub const W: UniPos = UniPos::new(2, 2);
pub const E: UniPos = UniPos::new(2, 3);
pub const R: UniPos = UniPos::new(2, 4);
pub const T: UniPos = UniPos::new(2, 5);
pub const Y: UniPos = UniPos::new(2, 6);
pub const U: UniPos = UniPos::new(2, 7);
pub const I: UniPos = UniPos::new(2, 8);
pub const O: UniPos = UniPos::new(2, 9);
pub const P: UniPos = UniPos::new(2, 10);
pub const LBRACKET: UniPos = UniPos::new(2, 11);
pub const RBRACKET: UniPos = UniPos::new(2, 12);
pub const BSLASH: UniPos = UniPos::new(2, 13);
pub const DELETE: UniPos = UniPos::new(2, 14);
pub const HOME: UniPos = UniPos::new(2, 15);

// Row 3: home row.
pub const CAPS_LOCK: UniPos = UniPos::new(3, 0);
pub const A: UniPos = UniPos::new(3, 1);
pub const S: UniPos = UniPos::new(3, 2);
pub const D: UniPos = UniPos::new(3, 3);
pub const F: UniPos = UniPos::new(3, 4);
pub const G: UniPos = UniPos::new(3, 5);
pub const H: UniPos = UniPos::new(3, 6);
pub const J: UniPos = UniPos::new(3, 7);
pub const K: UniPos = UniPos::new(3, 8);
pub const L: UniPos = UniPos::new(3, 9);
pub const SCOLON: UniPos = UniPos::new(3, 10);
pub const QUOTE: UniPos = UniPos::new(3, 11);
pub const NONUS_HASH: UniPos = UniPos::new(3, 12);
pub const ENTER: UniPos = UniPos::new(3, 13);
pub const END: UniPos = UniPos::new(3, 14);
pub const PGUP: UniPos = UniPos::new(3, 15);

// Row 4: bottom letter row.
pub const LSHIFT: UniPos = UniPos::new(4, 0);
pub const NONUS_BSLASH: UniPos = UniPos::new(4, 1);
pub const Z: UniPos = UniPos::new(4, 2);
pub const X: UniPos = UniPos::new(4, 3);
pub const C: UniPos = UniPos::new(4, 4);
pub const V: UniPos = UniPos::new(4, 5);
pub const B: UniPos = UniPos::new(4, 6);
pub const N: UniPos = UniPos::new(4, 7);
pub const M: UniPos = UniPos::new(4, 8);
pub const COMMA: UniPos = UniPos::new(4, 9);
pub const DOT: UniPos = UniPos::new(4, 10);
pub const SLASH: UniPos = UniPos::new(4, 11);
pub const RO: UniPos = UniPos::new(4, 12);
pub const RSHIFT: UniPos = UniPos::new(4, 13);
pub const UP: UniPos = UniPos::new(4, 14);
pub const PGDOWN: UniPos = UniPos::new(4, 15);

// Row 5: modifier row.
pub const LCTRL: UniPos = UniPos::new(5, 0);
pub const LGUI: UniPos = UniPos::new(5, 1);
pub const LALT: UniPos = UniPos::new(5, 2);
pub const MUHENKAN: UniPos = UniPos::new(5, 3);
pub const SPACE: UniPos = UniPos::new(5, 4);
pub const HENKAN: UniPos = UniPos::new(5, 5);
pub const KANA: UniPos = UniPos::new(5, 6);
pub const RALT: UniPos = UniPos::new(5, 7);
pub const RGUI: UniPos = UniPos::new(5, 8);
pub const APP: UniPos = UniPos::new(5, 9);
pub const RCTRL: UniPos = UniPos::new(5, 10);
pub const LEFT: UniPos = UniPos::new(5, 11);
pub const DOWN: UniPos = UniPos::new(5, 12);
pub const RIGHT: UniPos = UniPos::new(5, 13);

// Row 6: extended function keys.
pub const F13: UniPos = UniPos::new(6, 0);
pub const F14: UniPos = UniPos::new(6, 1);
pub const F15: UniPos = UniPos::new(6, 2);
pub const F16: UniPos = UniPos::new(6, 3);
pub const F17: UniPos = UniPos::new(6, 4);
pub const F18: UniPos = UniPos::new(6, 5);
pub const F19: UniPos = UniPos::new(6, 6);
pub const F20: UniPos = UniPos::new(6, 7);
pub const F21: UniPos = UniPos::new(6, 8);
pub const F22: UniPos = UniPos::new(6, 9);
pub const F23: UniPos = UniPos::new(6, 10);
pub const F24: UniPos = UniPos::new(6, 11);
pub const NUM_LOCK: UniPos = UniPos::new(6, 12);

// Row 7: keypad.
pub const KP_SLASH: UniPos = UniPos::new(7, 0);
pub const KP_ASTERISK: UniPos = UniPos::new(7, 1);
pub const KP_MINUS: UniPos = UniPos::new(7, 2);
pub const KP_7: UniPos = UniPos::new(7, 3);
pub const KP_8: UniPos = UniPos::new(7, 4);
pub const KP_9: UniPos = UniPos::new(7, 5);
pub const KP_PLUS: UniPos = UniPos::new(7, 6);
pub const KP_4: UniPos = UniPos::new(7, 7);
pub const KP_5: UniPos = UniPos::new(7, 8);
pub const KP_6: UniPos = UniPos::new(7, 9);
pub const KP_1: UniPos = UniPos::new(7, 10);
pub const KP_2: UniPos = UniPos::new(7, 11);
pub const KP_3: UniPos = UniPos::new(7, 12);
pub const KP_ENTER: UniPos = UniPos::new(7, 13);
pub const KP_0: UniPos = UniPos::new(7, 14);
pub const KP_DOT: UniPos = UniPos::new(7, 15);

#[cfg(test)]
mod test {
    extern crate std;
    use super::*;

    #[test]
    fn pack_and_unpack_round_trip() {
        for row in 0..8 {
            for col in 0..16 {
                let pos = UniPos::new(row, col);
                assert_eq!(pos.row(), row);
                assert_eq!(pos.col(), col);
                assert!(!pos.is_no());
            }
        }
    }

    #[test]
    fn sentinel_is_outside_the_grid() {
        assert!(NO.is_no());
        // Row 15 is not addressable by any named position.
        assert_eq!(NO.row(), 15);
    }

    #[test]
    fn named_positions_spot_checks() {
        assert_eq!(ESC.row(), 0);
        assert_eq!(ESC.col(), 0);
        assert_eq!(A.row(), 3);
        assert_eq!(A.col(), 1);
        assert_eq!(KP_DOT.row(), 7);
        assert_eq!(KP_DOT.col(), 15);
    }
}
