//! The layered action map.
//!
//! Translation tables depend on what keyboard is plugged in; the action
//! map depends only on what the user wants the keys to do. Splitting the
//! two at the universal grid means one map serves all three families.
//!
//! A map is a keyberon [`Layers`] value indexed by
//! `(layer, universal row, universal column)`; the action values are
//! opaque to this crate and handed to the host-side evaluator as-is.

use keyberon::action::Action;
use keyberon::key_code::KeyCode::{self, *};
pub use keyberon::layout::Layers;

use crate::converter::KeyboardKind;
use crate::translate;

const fn k(kc: KeyCode) -> Action {
    Action::KeyCode(kc)
}

const fn l(layer: usize) -> Action {
    Action::Layer(layer)
}

const TRNS: Action = Action::Trans;
const NOP: Action = Action::NoOp;

/// Resolve the action bound to a physical matrix coordinate.
///
/// The coordinate is translated through the table for `kind`; positions
/// the universal grid does not cover, unknown families and out-of-range
/// layer indices all resolve to [`Action::NoOp`].
pub fn action_for_key(
    layers: Layers,
    kind: KeyboardKind,
    layer: usize,
    row: u8,
    col: u8,
) -> Action {
    let pos = translate::to_universal(kind, row, col);
    if pos.is_no() {
        return Action::NoOp;
    }
    layers
        .get(layer)
        .and_then(|rows| rows.get(pos.row() as usize))
        .and_then(|cols| cols.get(pos.col() as usize))
        .copied()
        .unwrap_or(Action::NoOp)
}

/// The stock two-layer map: layer 0 is the universal grid verbatim, with
/// the App key doubling as a momentary shift onto layer 1, which swaps
/// the function row for F13-F24 and CapsLock for another Ctrl.
#[rustfmt::skip]
pub static DEFAULT_LAYERS: Layers = &[
    &[
        &[k(Escape), k(F1), k(F2), k(F3), k(F4), k(F5), k(F6), k(F7), k(F8), k(F9), k(F10), k(F11), k(F12), k(PScreen), k(ScrollLock), k(Pause)],
        &[k(Grave), k(Kb1), k(Kb2), k(Kb3), k(Kb4), k(Kb5), k(Kb6), k(Kb7), k(Kb8), k(Kb9), k(Kb0), k(Minus), k(Equal), k(Intl3), k(BSpace), k(Insert)],
        &[k(Tab), k(Q), k(W), k(E), k(R), k(T), k(Y), k(U), k(I), k(O), k(P), k(LBracket), k(RBracket), k(Bslash), k(Delete), k(Home)],
        &[k(CapsLock), k(A), k(S), k(D), k(F), k(G), k(H), k(J), k(K), k(L), k(SColon), k(Quote), k(NonUsHash), k(Enter), k(End), k(PgUp)],
        &[k(LShift), k(NonUsBslash), k(Z), k(X), k(C), k(V), k(B), k(N), k(M), k(Comma), k(Dot), k(Slash), k(Intl1), k(RShift), k(Up), k(PgDown)],
        &[k(LCtrl), k(LGui), k(LAlt), k(Intl5), k(Space), k(Intl4), k(Intl2), k(RAlt), k(RGui), l(1), k(RCtrl), k(Left), k(Down), k(Right), NOP, NOP],
        &[k(F13), k(F14), k(F15), k(F16), k(F17), k(F18), k(F19), k(F20), k(F21), k(F22), k(F23), k(F24), k(NumLock), NOP, NOP, NOP],
        &[k(KpSlash), k(KpAsterisk), k(KpMinus), k(Kp7), k(Kp8), k(Kp9), k(KpPlus), k(Kp4), k(Kp5), k(Kp6), k(Kp1), k(Kp2), k(Kp3), k(KpEnter), k(Kp0), k(KpDot)],
    ],
    &[
        &[TRNS, k(F13), k(F14), k(F15), k(F16), k(F17), k(F18), k(F19), k(F20), k(F21), k(F22), k(F23), k(F24), TRNS, TRNS, TRNS],
        &[TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS],
        &[TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS],
        &[k(LCtrl), TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS],
        &[TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS],
        &[TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, NOP, NOP],
        &[TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, NOP, NOP, NOP],
        &[TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS, TRNS],
    ],
];

#[cfg(test)]
mod test {
    extern crate std;
    use super::*;

    #[test]
    fn every_layer_covers_the_full_grid() {
        for (i, layer) in DEFAULT_LAYERS.iter().enumerate() {
            assert_eq!(layer.len(), 8, "layer {}", i);
            for (r, row) in layer.iter().enumerate() {
                assert_eq!(row.len(), 16, "layer {} row {}", i, r);
            }
        }
    }

    #[test]
    fn resolves_through_the_set2_table() {
        // Set 2 code 0x1C is A.
        let act = action_for_key(DEFAULT_LAYERS, KeyboardKind::At, 0, 3, 4);
        assert_eq!(act, Action::KeyCode(A));
    }

    #[test]
    fn resolves_through_the_set1_table() {
        // Set 1 code 0x1E is A.
        let act = action_for_key(DEFAULT_LAYERS, KeyboardKind::Xt, 0, 3, 6);
        assert_eq!(act, Action::KeyCode(A));
    }

    #[test]
    fn unmapped_cells_resolve_to_noop() {
        // Set 2 code 0x00 has no key.
        let act = action_for_key(DEFAULT_LAYERS, KeyboardKind::At, 0, 0, 0);
        assert_eq!(act, Action::NoOp);
    }

    #[test]
    fn unknown_family_resolves_to_noop() {
        let act = action_for_key(DEFAULT_LAYERS, KeyboardKind::None, 0, 3, 4);
        assert_eq!(act, Action::NoOp);
    }

    #[test]
    fn out_of_range_layer_resolves_to_noop() {
        let act = action_for_key(DEFAULT_LAYERS, KeyboardKind::At, 9, 3, 4);
        assert_eq!(act, Action::NoOp);
    }

    #[test]
    fn upper_layer_overrides_the_function_row() {
        // Set 2 code 0x05 is F1; on layer 1 it becomes F13.
        let act = action_for_key(DEFAULT_LAYERS, KeyboardKind::At, 1, 0, 5);
        assert_eq!(act, Action::KeyCode(F13));
    }

    #[test]
    fn resolution_is_deterministic() {
        for layer in 0..2 {
            for row in 0..32 {
                for col in 0..8 {
                    let first = action_for_key(DEFAULT_LAYERS, KeyboardKind::At, layer, row, col);
                    let again = action_for_key(DEFAULT_LAYERS, KeyboardKind::At, layer, row, col);
                    assert_eq!(first, again);
                }
            }
        }
    }
}
