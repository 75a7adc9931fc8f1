//! The keyboard-side byte port.
//!
//! The converter drives the attached keyboard through this seam; the
//! actual line driver (bit clocking, parity, inhibits) lives in the
//! embedding firmware. `recv` is non-blocking in the `nb` sense so the
//! scan loop can poll it every tick without stalling.

use packed_struct::prelude::*;

/// Host-to-device command bytes.
pub mod cmd {
    /// Set the lock LEDs; followed by one [`LedReport`] byte.
    pub const SET_LED: u8 = 0xED;
    /// Ask the device for its two-byte ID.
    pub const IDENTIFY: u8 = 0xF2;
    /// Resume scan-code reporting.
    pub const ENABLE_SCAN: u8 = 0xF4;
    /// Stop scan-code reporting.
    pub const DISABLE_SCAN: u8 = 0xF5;
    /// Set 3 only: report both make and break for every key.
    pub const SET_ALL_MAKE_BREAK: u8 = 0xF8;
}

/// Distinguished device-to-host bytes.
pub mod reply {
    /// Key detection error or internal buffer overrun.
    pub const OVERRUN: u8 = 0x00;
    /// Power-on self test passed.
    pub const SELF_TEST_OK: u8 = 0xAA;
    /// Command acknowledged.
    pub const ACK: u8 = 0xFA;
    /// Power-on self test failed.
    pub const SELF_TEST_FAIL: u8 = 0xFC;
}

/// Line-level framing of the attached keyboard.
///
/// XT boards clock a 9-bit start-bit frame and never accept
/// host-to-device traffic; AT and later use the 11-bit bidirectional
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Xt,
    At,
}

/// Transport failures, split by which recovery they demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ps2Error {
    /// Start/stop bit violation on a received frame.
    Frame,
    /// Parity mismatch on a received frame.
    Parity,
    /// The receive buffer overflowed and bytes were dropped.
    BufferFull,
    /// The device never clocked out or acknowledged a sent byte.
    NoAck,
}

impl Ps2Error {
    /// Whether this failure indicates the device itself went away
    /// mid-frame, as opposed to transient flow trouble.
    pub fn needs_reinit(&self) -> bool {
        matches!(self, Ps2Error::Frame | Ps2Error::Parity)
    }
}

/// The lock-LED byte pushed after [`cmd::SET_LED`].
#[derive(PackedStruct, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[packed_struct(size_bytes = "1", bit_numbering = "lsb0")]
pub struct LedReport {
    #[packed_field(bits = "0")]
    pub scroll_lock: bool,
    #[packed_field(bits = "1")]
    pub num_lock: bool,
    #[packed_field(bits = "2")]
    pub caps_lock: bool,
}

impl LedReport {
    /// Translate the host-side HID mask (bit 0 NumLock, bit 1 CapsLock,
    /// bit 2 ScrollLock) into wire order.
    pub fn from_host(leds: u8) -> Self {
        LedReport {
            num_lock: leds & 0x01 != 0,
            caps_lock: leds & 0x02 != 0,
            scroll_lock: leds & 0x04 != 0,
        }
    }
}

/// Byte-oriented access to the keyboard line.
pub trait Ps2Port {
    /// One-time bring-up of the line driver.
    fn init(&mut self);

    /// Drop the line into its idle/inhibited state.
    fn reset(&mut self);

    /// Select the line-level framing.
    fn set_protocol(&mut self, proto: Protocol);

    /// Clock one byte out to the device.
    fn send(&mut self, byte: u8) -> Result<(), Ps2Error>;

    /// Pull the next device byte, or `WouldBlock` when none is pending.
    fn recv(&mut self) -> nb::Result<u8, Ps2Error>;

    /// Push the lock-LED state to the device.
    fn set_led(&mut self, leds: LedReport) -> Result<(), Ps2Error> {
        let packed: [u8; 1] = match leds.pack() {
            Ok(p) => p,
            // Three flag bits always fit the byte; nothing to send if not.
            Err(_) => return Ok(()),
        };
        self.send(cmd::SET_LED)?;
        self.send(packed[0])
    }
}

#[cfg(test)]
mod test {
    extern crate std;
    use super::*;
    use std::vec::Vec;

    #[derive(Default)]
    struct LoggingPort {
        sent: Vec<u8>,
    }

    impl Ps2Port for LoggingPort {
        fn init(&mut self) {}
        fn reset(&mut self) {}
        fn set_protocol(&mut self, _proto: Protocol) {}
        fn send(&mut self, byte: u8) -> Result<(), Ps2Error> {
            self.sent.push(byte);
            Ok(())
        }
        fn recv(&mut self) -> nb::Result<u8, Ps2Error> {
            Err(nb::Error::WouldBlock)
        }
    }

    #[test]
    fn led_report_packs_in_wire_order() {
        let leds = LedReport {
            scroll_lock: true,
            num_lock: false,
            caps_lock: true,
        };
        assert_eq!(leds.pack().unwrap(), [0b101]);
    }

    #[test]
    fn host_mask_is_reordered_for_the_wire() {
        // HID: Num, Caps, Scroll. Wire: Scroll, Num, Caps.
        let leds = LedReport::from_host(0b101);
        assert!(leds.num_lock);
        assert!(!leds.caps_lock);
        assert!(leds.scroll_lock);
        assert_eq!(leds.pack().unwrap(), [0b011]);
    }

    #[test]
    fn set_led_sends_command_then_mask() {
        let mut port = LoggingPort::default();
        port.set_led(LedReport::from_host(0x01)).unwrap();
        assert_eq!(port.sent, [cmd::SET_LED, 0b010]);
    }

    #[test]
    fn error_classes_for_recovery() {
        assert!(Ps2Error::Frame.needs_reinit());
        assert!(Ps2Error::Parity.needs_reinit());
        assert!(!Ps2Error::BufferFull.needs_reinit());
        assert!(!Ps2Error::NoAck.needs_reinit());
    }
}
