//! Converter core for legacy IBM PC keyboards.
//!
//! Bridges XT, AT/PS2 and 122-key Terminal keyboards to a modern host by
//! turning their scan-code streams into a uniform logical keyboard:
//!
//! ```text
//! scan code  --decoder-->  matrix bit  --translate-->  universal
//!  (family-     (cs1/          (32x8,       (per-family   position
//!   specific)    cs2/           sparse)      table)          |
//!                cs3)                                        v
//!                                                    layered action map
//! ```
//!
//! The attached keyboard is classified once at startup by probing it with
//! identification commands ([`converter`]); after that a periodic
//! [`Converter::scan`] call keeps the [`matrix::Matrix`] in step with the
//! wire, and [`Converter::action_for_key`] resolves any matrix coordinate
//! to an action for the host-side evaluator.
//!
//! The crate is hardware-free: the PS/2 line driver, the tick source and
//! the host services are injected through the [`ps2::Ps2Port`],
//! [`host::Clock`] and [`host::Host`] traits.
#![no_std]

pub mod converter;
pub mod cs1;
pub mod cs2;
pub mod cs3;
pub mod host;
pub mod layout;
pub mod matrix;
pub mod ps2;
pub mod translate;
pub mod universal;

pub use converter::{Converter, KeyboardKind};
