//! Scan-code to universal-position translation.
//!
//! One immutable table per code set maps an internal matrix coordinate
//! (`row = code >> 3`, `col = code & 7`) to a [`UniPos`]. The tables
//! absorb every per-family irregularity, so everything past this point
//! works on one uniform grid:
//!
//! - Set 1 (XT) and Set 3 (Terminal) are indexed directly by the raw
//!   code, 16 rows of 8.
//! - Set 2 (AT/PS2) is indexed by the folded code space: `E0`-prefixed
//!   codes carry the high bit, doubling the table to 32 rows. The three
//!   irregular keys live at fixed folded codes: F7 at `0x83`,
//!   PrintScreen at `0xFC`, Pause at `0xFE`.
//!
//! Cells no keyboard produces hold [`NO`]. The statics are never copied
//! out of read-only storage.

use crate::converter::KeyboardKind;
use crate::universal::*;

/// Look up the universal position for a matrix coordinate of `kind`.
///
/// Unknown families and out-of-range coordinates resolve to [`NO`].
pub fn to_universal(kind: KeyboardKind, row: u8, col: u8) -> UniPos {
    let table: &[[UniPos; 8]] = match kind {
        KeyboardKind::Xt => &SET1[..],
        KeyboardKind::At | KeyboardKind::Other => &SET2[..],
        KeyboardKind::Terminal => &SET3[..],
        KeyboardKind::None => return NO,
    };
    table
        .get(row as usize)
        .and_then(|r| r.get(col as usize))
        .copied()
        .unwrap_or(NO)
}

/// Scan Code Set 1, as emitted by 83-key XT boards. Break codes carry
/// bit 7 and are resolved by the decoder, so the table only spans the
/// 7-bit make space. The 0x70 row holds the JIS extras of AX layouts.
#[rustfmt::skip]
static SET1: [[UniPos; 8]; 16] = [
    [NO,       ESC,      KB1,      KB2,      KB3,      KB4,      KB5,      KB6     ], // 00-07
    [KB7,      KB8,      KB9,      KB0,      MINUS,    EQUAL,    BSPACE,   TAB     ], // 08-0F
    [Q,        W,        E,        R,        T,        Y,        U,        I       ], // 10-17
    [O,        P,        LBRACKET, RBRACKET, ENTER,    LCTRL,    A,        S       ], // 18-1F
    [D,        F,        G,        H,        J,        K,        L,        SCOLON  ], // 20-27
    [QUOTE,    GRAVE,    LSHIFT,   BSLASH,   Z,        X,        C,        V       ], // 28-2F
    [B,        N,        M,        COMMA,    DOT,      SLASH,    RSHIFT,   KP_ASTERISK], // 30-37
    [LALT,     SPACE,    CAPS_LOCK, F1,      F2,       F3,       F4,       F5      ], // 38-3F
    [F6,       F7,       F8,       F9,       F10,      NUM_LOCK, SCROLL_LOCK, KP_7 ], // 40-47
    [KP_8,     KP_9,     KP_MINUS, KP_4,     KP_5,     KP_6,     KP_PLUS,  KP_1    ], // 48-4F
    [KP_2,     KP_3,     KP_0,     KP_DOT,   NO,       NO,       NONUS_BSLASH, F11 ], // 50-57
    [F12,      NO,       NO,       NO,       NO,       NO,       NO,       NO      ], // 58-5F
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       NO      ], // 60-67
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       NO      ], // 68-6F
    [KANA,     NO,       NO,       RO,       NO,       NO,       NO,       NO      ], // 70-77
    [NO,       HENKAN,   NO,       MUHENKAN, NO,       YEN,      NO,       NO      ], // 78-7F
];

/// Scan Code Set 2, as emitted by AT and PS/2 boards. Rows 0x10..0x20
/// (folded codes 0x80..0xFF) are the `E0`-prefixed half. The Hangul and
/// Hanja codes are deliberately absent: folded they collide with the
/// self-test bytes.
#[rustfmt::skip]
static SET2: [[UniPos; 8]; 32] = [
    [NO,       F9,       NO,       F5,       F3,       F1,       F2,       F12     ], // 00-07
    [NO,       F10,      F8,       F6,       F4,       TAB,      GRAVE,    NO      ], // 08-0F
    [NO,       LALT,     LSHIFT,   KANA,     LCTRL,    Q,        KB1,      NO      ], // 10-17
    [NO,       NO,       Z,        S,        A,        W,        KB2,      NO      ], // 18-1F
    [NO,       C,        X,        D,        E,        KB4,      KB3,      NO      ], // 20-27
    [NO,       SPACE,    V,        F,        T,        R,        KB5,      NO      ], // 28-2F
    [NO,       N,        B,        H,        G,        Y,        KB6,      NO      ], // 30-37
    [NO,       NO,       M,        J,        U,        KB7,      KB8,      NO      ], // 38-3F
    [NO,       COMMA,    K,        I,        O,        KB0,      KB9,      NO      ], // 40-47
    [NO,       DOT,      SLASH,    L,        SCOLON,   P,        MINUS,    NO      ], // 48-4F
    [NO,       RO,       QUOTE,    NO,       LBRACKET, EQUAL,    NO,       NO      ], // 50-57
    [CAPS_LOCK, RSHIFT,  ENTER,    RBRACKET, NO,       BSLASH,   NO,       NO      ], // 58-5F
    [NO,       NONUS_BSLASH, NO,   NO,       HENKAN,   NO,       BSPACE,   MUHENKAN], // 60-67
    [NO,       KP_1,     YEN,      KP_4,     KP_7,     NO,       NO,       NO      ], // 68-6F
    [KP_0,     KP_DOT,   KP_2,     KP_5,     KP_6,     KP_8,     ESC,      NUM_LOCK], // 70-77
    [F11,      KP_PLUS,  KP_3,     KP_MINUS, KP_ASTERISK, KP_9,  SCROLL_LOCK, NO   ], // 78-7F
    // E0-prefixed half.
    [NO,       NO,       NO,       F7,       NO,       NO,       NO,       NO      ], // 80-87
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       NO      ], // 88-8F
    [NO,       RALT,     NO,       NO,       RCTRL,    NO,       NO,       NO      ], // 90-97
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       LGUI    ], // 98-9F
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       RGUI    ], // A0-A7
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       APP     ], // A8-AF
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       NO      ], // B0-B7
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       NO      ], // B8-BF
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       NO      ], // C0-C7
    [NO,       NO,       KP_SLASH, NO,       NO,       NO,       NO,       NO      ], // C8-CF
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       NO      ], // D0-D7
    [NO,       NO,       KP_ENTER, NO,       NO,       NO,       NO,       NO      ], // D8-DF
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       NO      ], // E0-E7
    [NO,       END,      NO,       LEFT,     HOME,     NO,       NO,       NO      ], // E8-EF
    [INSERT,   DELETE,   DOWN,     NO,       RIGHT,    UP,       NO,       NO      ], // F0-F7
    [NO,       NO,       PGDOWN,   NO,       PSCREEN,  PGUP,     PAUSE,    NO      ], // F8-FF
];

/// Scan Code Set 3, as emitted by 122-key Terminal boards. Single-byte
/// makes with an `F0` break prefix; no `E0` folding. The top function
/// row of a 122-key board is F13-F24, so those codes shadow the Esc and
/// PrintScreen slots a 101-key Set 3 board would use.
#[rustfmt::skip]
static SET3: [[UniPos; 8]; 16] = [
    [NO,       NO,       NO,       NO,       NO,       NO,       NO,       F1      ], // 00-07
    [F13,      NO,       NO,       NO,       NO,       TAB,      GRAVE,    F2      ], // 08-0F
    [F14,      LCTRL,    LSHIFT,   NO,       CAPS_LOCK, Q,       KB1,      F3      ], // 10-17
    [F15,      LALT,     Z,        S,        A,        W,        KB2,      F4      ], // 18-1F
    [F16,      C,        X,        D,        E,        KB4,      KB3,      F5      ], // 20-27
    [F17,      SPACE,    V,        F,        T,        R,        KB5,      F6      ], // 28-2F
    [F18,      N,        B,        H,        G,        Y,        KB6,      F7      ], // 30-37
    [F19,      RALT,     M,        J,        U,        KB7,      KB8,      F8      ], // 38-3F
    [F20,      COMMA,    K,        I,        O,        KB0,      KB9,      F9      ], // 40-47
    [F21,      DOT,      SLASH,    L,        SCOLON,   P,        MINUS,    F10     ], // 48-4F
    [F22,      NO,       QUOTE,    NO,       LBRACKET, EQUAL,    F11,      F23     ], // 50-57
    [RCTRL,    RSHIFT,   ENTER,    RBRACKET, BSLASH,   NO,       F12,      F24     ], // 58-5F
    [DOWN,     LEFT,     PAUSE,    UP,       DELETE,   END,      BSPACE,   INSERT  ], // 60-67
    [NO,       KP_1,     RIGHT,    KP_4,     KP_7,     PGDOWN,   HOME,     PGUP    ], // 68-6F
    [KP_0,     KP_DOT,   KP_2,     KP_5,     KP_6,     KP_8,     NUM_LOCK, KP_SLASH], // 70-77
    [NO,       KP_ENTER, KP_3,     KP_PLUS,  KP_9,     KP_MINUS, NO,       NO      ], // 78-7F
];

#[cfg(test)]
mod test {
    extern crate std;
    use super::*;

    fn pos_of(kind: KeyboardKind, code: u8) -> UniPos {
        to_universal(kind, code >> 3, code & 7)
    }

    #[test]
    fn set2_main_block_spot_checks() {
        assert_eq!(pos_of(KeyboardKind::At, 0x1C), A);
        assert_eq!(pos_of(KeyboardKind::At, 0x29), SPACE);
        assert_eq!(pos_of(KeyboardKind::At, 0x5A), ENTER);
        assert_eq!(pos_of(KeyboardKind::At, 0x76), ESC);
        assert_eq!(pos_of(KeyboardKind::At, 0x83), F7);
    }

    #[test]
    fn set2_extended_half_spot_checks() {
        // E0-prefixed codes are looked up with the high bit folded in.
        assert_eq!(pos_of(KeyboardKind::At, 0x75 | 0x80), UP);
        assert_eq!(pos_of(KeyboardKind::At, 0x14 | 0x80), RCTRL);
        assert_eq!(pos_of(KeyboardKind::At, 0x7C | 0x80), PSCREEN);
        assert_eq!(pos_of(KeyboardKind::At, 0x7E | 0x80), PAUSE);
        // The plain-code keys must not leak into the extended half.
        assert_eq!(pos_of(KeyboardKind::At, 0x1C | 0x80), NO);
    }

    #[test]
    fn set1_spot_checks() {
        assert_eq!(pos_of(KeyboardKind::Xt, 0x01), ESC);
        assert_eq!(pos_of(KeyboardKind::Xt, 0x1E), A);
        assert_eq!(pos_of(KeyboardKind::Xt, 0x39), SPACE);
        assert_eq!(pos_of(KeyboardKind::Xt, 0x58), F12);
    }

    #[test]
    fn set3_spot_checks() {
        assert_eq!(pos_of(KeyboardKind::Terminal, 0x1C), A);
        assert_eq!(pos_of(KeyboardKind::Terminal, 0x08), F13);
        assert_eq!(pos_of(KeyboardKind::Terminal, 0x5F), F24);
        assert_eq!(pos_of(KeyboardKind::Terminal, 0x62), PAUSE);
    }

    #[test]
    fn unknown_family_resolves_to_no() {
        assert_eq!(pos_of(KeyboardKind::None, 0x1C), NO);
    }

    #[test]
    fn out_of_range_coordinates_resolve_to_no() {
        assert_eq!(to_universal(KeyboardKind::Xt, 16, 0), NO);
        assert_eq!(to_universal(KeyboardKind::At, 32, 0), NO);
        assert_eq!(to_universal(KeyboardKind::At, 0, 8), NO);
    }

    #[test]
    fn lookups_are_deterministic() {
        for row in 0..32 {
            for col in 0..8 {
                let first = to_universal(KeyboardKind::At, row, col);
                assert_eq!(first, to_universal(KeyboardKind::At, row, col));
            }
        }
    }

    #[test]
    fn every_cell_is_on_grid_or_no() {
        for row in 0..32 {
            for col in 0..8 {
                for kind in &[KeyboardKind::Xt, KeyboardKind::At, KeyboardKind::Terminal] {
                    let pos = to_universal(*kind, row, col);
                    assert!(pos.is_no() || pos.row() < 8, "{:?} {}/{}", kind, row, col);
                }
            }
        }
    }
}
