//! Keyboard identification and the periodic scan loop.
//!
//! A freshly plugged (or just powered) keyboard first streams its BAT
//! result, then answers identification, and only then is worth
//! decoding. The lifecycle walks exactly that path and parks in `Loop`:
//!
//! ```text
//! {Init} -> {WaitStartup} -> {ReadId} -> {LedSet} -> {Loop}
//!    ^          >= 1s          |  mouse                |
//!    |                         v                       |
//!    |                       {End}                     |
//!    +--- receive error / self-test byte --------------+
//! ```
//!
//! Identification is the interesting part: the three families answer the
//! ID probe in three different ways, and the *absence* of an answer is
//! itself the signal. An XT board cannot ack host traffic at all; an
//! 84-key AT acks but has no ID; PS/2 and Terminal boards return two ID
//! bytes.

use keyberon::action::Action;
use log::{debug, info, warn};

use crate::cs1;
use crate::cs2::{self, Control};
use crate::cs3;
use crate::host::{Clock, Host};
use crate::layout::{self, Layers};
use crate::matrix::Matrix;
use crate::ps2::{cmd, reply, LedReport, Protocol, Ps2Port};

/// How long power-on BAT chatter is absorbed before probing.
const STARTUP_MS: u32 = 1000;
/// How long to wait for a command ack.
const ACK_MS: u32 = 500;
/// How long to wait for each ID byte after the ack.
const ID_MS: u32 = 1000;

/// ID recorded when the device never acked the probe (XT).
const ID_NO_HANDSHAKE: u16 = 0xFFFF;
/// ID recorded when the probe was answered with something else than an
/// ack (a PS/2 board with a broken handshake).
const ID_BAD_ACK: u16 = 0xFFFE;
/// ID of a PS/2 mouse; not a keyboard, refused.
const ID_MOUSE: u16 = 0x00FF;

/// The family of the attached keyboard. Fixed from identification until
/// the next re-initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardKind {
    /// Nothing usable attached (or not identified yet).
    None,
    /// 83-key XT board, Scan Code Set 1.
    Xt,
    /// AT or PS/2 board, Scan Code Set 2.
    At,
    /// 122-key Terminal board, Scan Code Set 3.
    Terminal,
    /// Unrecognized ID; driven like an AT board.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    WaitStartup,
    ReadId,
    LedSet,
    Loop,
    End,
}

/// The converter context: every piece of mutable state plus the injected
/// collaborators, owned in one place so the core stays testable.
pub struct Converter<P, C, H> {
    port: P,
    clock: C,
    host: H,
    layers: Layers,
    state: State,
    kind: KeyboardKind,
    keyboard_id: u16,
    /// Tick at which `Init` ran; bounds the startup wait.
    since: u32,
    matrix: Matrix,
    cs1: cs1::Decoder,
    cs2: cs2::Decoder,
    cs3: cs3::Decoder,
}

impl<P, C, H> Converter<P, C, H>
where
    P: Ps2Port,
    C: Clock,
    H: Host,
{
    pub fn new(port: P, clock: C, host: H, layers: Layers) -> Self {
        Converter {
            port,
            clock,
            host,
            layers,
            state: State::Init,
            kind: KeyboardKind::None,
            keyboard_id: 0,
            since: 0,
            matrix: Matrix::new(),
            cs1: cs1::Decoder::new(),
            cs2: cs2::Decoder::new(),
            cs3: cs3::Decoder::new(),
        }
    }

    /// Bring up the line driver and (re)start the lifecycle.
    pub fn init(&mut self) {
        self.port.init();
        self.state = State::Init;
    }

    /// The identified family.
    pub fn kind(&self) -> KeyboardKind {
        self.kind
    }

    /// The raw 16-bit ID captured during identification.
    pub fn keyboard_id(&self) -> u16 {
        self.keyboard_id
    }

    /// The current key-down state.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Resolve the action bound to a matrix coordinate on `layer`,
    /// through the translation table of the identified family.
    pub fn action_for_key(&self, layer: usize, row: u8, col: u8) -> Action {
        layout::action_for_key(self.layers, self.kind, layer, row, col)
    }

    /// Push a host LED mask to the keyboard. AT-family only; other
    /// families either have no LEDs or choke on the command.
    pub fn led_set(&mut self, host_leds: u8) {
        if self.kind != KeyboardKind::At {
            return;
        }
        self.push_leds(host_leds);
    }

    /// The periodic entry point; call every tick. Returns `true` when
    /// the matrix may have changed.
    pub fn scan(&mut self) -> bool {
        let mut changed = false;

        // Pause never sends a break, so its make is released here, one
        // tick later. Consumers see Pause as a momentary press.
        if self.matrix.is_on(cs2::PAUSE >> 3, cs2::PAUSE & 7) {
            self.matrix.brk(cs2::PAUSE);
            changed = true;
        }

        match self.state {
            State::Init => {
                info!("kbd: init");
                self.port.set_protocol(Protocol::At);
                self.kind = KeyboardKind::None;
                self.keyboard_id = 0;
                self.matrix.clear();
                self.cs1 = cs1::Decoder::new();
                self.cs2 = cs2::Decoder::new();
                self.cs3 = cs3::Decoder::new();
                self.since = self.clock.now();
                self.state = State::WaitStartup;
            }
            State::WaitStartup => {
                // BAT chatter is noise here; a self test seen later, in
                // Loop, is what signals a re-plug.
                while let Ok(b) = self.port.recv() {
                    debug!("kbd: startup byte {:#04x}", b);
                }
                if self.clock.elapsed_ms(self.since) >= STARTUP_MS {
                    self.state = State::ReadId;
                }
            }
            State::ReadId => {
                self.read_id();
                info!("kbd: id {:#06x} kind {:?}", self.keyboard_id, self.kind);
                self.state = if self.kind == KeyboardKind::None {
                    State::End
                } else {
                    State::LedSet
                };
            }
            State::LedSet => {
                let leds = self.host.keyboard_leds();
                self.led_set(leds);
                self.state = State::Loop;
            }
            State::Loop => changed |= self.pump(),
            State::End => {}
        }
        changed
    }

    /// Probe and classify the attached device, then configure it.
    fn read_id(&mut self) {
        self.keyboard_id = self.identify();
        self.kind = match self.keyboard_id {
            ID_NO_HANDSHAKE => KeyboardKind::Xt,
            ID_BAD_ACK => KeyboardKind::At,
            ID_MOUSE => KeyboardKind::None,
            0x0000 => KeyboardKind::At,
            id if id & 0xFF00 == 0xAB00 => KeyboardKind::At,
            id if id & 0xFF00 == 0xBF00 => KeyboardKind::Terminal,
            _ => KeyboardKind::Other,
        };
        match self.kind {
            KeyboardKind::Xt => self.port.set_protocol(Protocol::Xt),
            KeyboardKind::Terminal => {
                // Set 3 boards default most keys to make-only; without
                // this they would never report a release.
                if let Err(e) = self.port.send(cmd::SET_ALL_MAKE_BREAK) {
                    warn!("kbd: set all make/break failed: {:?}", e);
                }
                let _ = self.read_reply(ACK_MS);
            }
            _ => {}
        }
    }

    /// Run the ID exchange and fold the outcome into a 16-bit value.
    fn identify(&mut self) -> u16 {
        if self.port.send(cmd::DISABLE_SCAN).is_err() {
            // No handshake at all: XT boards are receive-only.
            return ID_NO_HANDSHAKE;
        }
        let _ = self.read_reply(ACK_MS);

        let id = self.probe_id();

        // Scanning was muted above; restore it whatever the probe said.
        if let Err(e) = self.port.send(cmd::ENABLE_SCAN) {
            warn!("kbd: enable failed: {:?}", e);
        }
        let _ = self.read_reply(ACK_MS);
        id
    }

    fn probe_id(&mut self) -> u16 {
        if self.port.send(cmd::IDENTIFY).is_err() {
            return ID_NO_HANDSHAKE;
        }
        match self.read_reply(ACK_MS) {
            Some(reply::ACK) => {}
            _ => return ID_BAD_ACK,
        }
        match self.read_reply(ID_MS) {
            Some(hi) => (hi as u16) << 8 | self.read_reply(ID_MS).unwrap_or(0) as u16,
            // Acked the probe but has no ID to offer: an 84-key AT.
            None => 0x0000,
        }
    }

    /// Translate and push `host_leds`, consuming the two acks so they
    /// never reach the decoder.
    fn push_leds(&mut self, host_leds: u8) {
        if let Err(e) = self.port.set_led(LedReport::from_host(host_leds)) {
            warn!("kbd: led push failed: {:?}", e);
        }
        let _ = self.read_reply(ACK_MS);
        let _ = self.read_reply(ACK_MS);
    }

    /// Poll the port for one byte for at most `timeout_ms`.
    fn read_reply(&mut self, timeout_ms: u32) -> Option<u8> {
        let start = self.clock.now();
        loop {
            match self.port.recv() {
                Ok(b) => return Some(b),
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(e)) => {
                    warn!("kbd: receive failed during exchange: {:?}", e);
                    return None;
                }
            }
            if self.clock.elapsed_ms(start) >= timeout_ms {
                return None;
            }
        }
    }

    /// Drain the port through the active decoder.
    fn pump(&mut self) -> bool {
        let mut changed = false;
        loop {
            let byte = match self.port.recv() {
                Ok(b) => b,
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => {
                    warn!("kbd: receive error: {:?}", e);
                    if e.needs_reinit() {
                        // The device went away mid-frame; identify
                        // whatever gets plugged in next.
                        self.state = State::Init;
                    }
                    break;
                }
            };
            changed = true;
            let control = match self.kind {
                KeyboardKind::Xt => self.cs1.feed(&mut self.matrix, byte),
                KeyboardKind::At | KeyboardKind::Other => self.cs2.feed(&mut self.matrix, byte),
                KeyboardKind::Terminal => self.cs3.feed(&mut self.matrix, byte),
                KeyboardKind::None => break,
            };
            match control {
                Control::Continue => {}
                Control::Cleared => self.host.clear_keyboard(),
                Control::Reinit => {
                    self.state = State::Init;
                    break;
                }
            }
        }
        changed
    }
}
