//! Host-side collaborators.
//!
//! The converter never owns a timer or the USB-side key state; both are
//! injected so the core runs the same on hardware and under test.

/// A monotonic millisecond tick source.
pub trait Clock {
    /// The current tick. Wraps; only differences are meaningful.
    fn now(&mut self) -> u32;

    /// Milliseconds elapsed since an earlier [`now`](Clock::now) reading.
    fn elapsed_ms(&mut self, since: u32) -> u32 {
        self.now().wrapping_sub(since)
    }
}

/// Services of the host-side stack.
pub trait Host {
    /// The host's lock-LED state as a HID mask: bit 0 NumLock,
    /// bit 1 CapsLock, bit 2 ScrollLock.
    fn keyboard_leds(&mut self) -> u8;

    /// Release every key the host still believes is held. Called when
    /// stream corruption forced the matrix to be dropped, so the two
    /// sides cannot have drifted apart.
    fn clear_keyboard(&mut self);
}
