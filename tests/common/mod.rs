//! Recording stand-ins for the bus, pins and timer.
//!
//! Every stub appends to one thread-local event list, so a test sees DC
//! changes, chip-select brackets, written bytes and delays in the exact
//! order the driver produced them.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use gc9a01a_async::{Config, GC9A01A, NoPin, Timer, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Dc(bool),
    Begin,
    Write(Vec<u8>),
    End,
    Delay(u64),
    Backlight(bool),
    Reset(bool),
    Cs(bool),
    Flush,
}

thread_local! {
    static EVENTS: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
}

pub fn record(event: Event) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

/// Drain everything recorded so far on this thread.
pub fn take_events() -> Vec<Event> {
    EVENTS.with(|events| events.take())
}

pub struct RecordingTransport;

impl Transport for RecordingTransport {
    type Error = Infallible;

    async fn begin(&mut self) -> Result<(), Infallible> {
        record(Event::Begin);
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        record(Event::Write(bytes.to_vec()));
        Ok(())
    }

    async fn end(&mut self) -> Result<(), Infallible> {
        record(Event::End);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Line {
    Dc,
    Backlight,
    Reset,
    Cs,
}

pub struct RecordingPin(pub Line);

impl RecordingPin {
    fn set(&mut self, high: bool) {
        record(match self.0 {
            Line::Dc => Event::Dc(high),
            Line::Backlight => Event::Backlight(high),
            Line::Reset => Event::Reset(high),
            Line::Cs => Event::Cs(high),
        });
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

pub struct RecordingTimer;

impl Timer for RecordingTimer {
    async fn delay_ms(milliseconds: u64) {
        record(Event::Delay(milliseconds));
    }
}

pub type TestDisplay = GC9A01A<RecordingTransport, RecordingPin, NoPin, NoPin, RecordingTimer>;

pub fn display() -> TestDisplay {
    GC9A01A::new(Config::default(), RecordingTransport, RecordingPin(Line::Dc))
}

/// Run `setup` and throw away what it recorded.
pub async fn ready_display() -> TestDisplay {
    let mut display = display();
    display.setup().await.unwrap();
    take_events();
    display
}

/// One chip-select bracket: the DC level it was sent with and every byte in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub data: bool,
    pub bytes: Vec<u8>,
}

pub fn cmd(command: u8) -> Frame {
    Frame {
        data: false,
        bytes: vec![command],
    }
}

pub fn data(bytes: &[u8]) -> Frame {
    Frame {
        data: true,
        bytes: bytes.to_vec(),
    }
}

pub fn data_16(value: u16) -> Frame {
    data(&value.to_be_bytes())
}

/// Group events into frames, checking that DC was set right before every select.
pub fn frames(events: &[Event]) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut dc = None;
    let mut open: Option<Frame> = None;

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Dc(level) => {
                assert!(open.is_none(), "DC changed inside a transaction at {i}");
                dc = Some(*level);
            }
            Event::Begin => {
                assert!(open.is_none(), "nested begin at {i}");
                assert!(
                    matches!(i.checked_sub(1).map(|p| &events[p]), Some(Event::Dc(_))),
                    "select at {i} not immediately preceded by a DC change"
                );
                open = Some(Frame {
                    data: dc.expect("DC never set"),
                    bytes: Vec::new(),
                });
            }
            Event::Write(bytes) => {
                open.as_mut()
                    .expect("write outside a transaction")
                    .bytes
                    .extend_from_slice(bytes);
            }
            Event::End => frames.push(open.take().expect("end without begin")),
            _ => {}
        }
    }

    assert!(open.is_none(), "transaction left open");
    frames
}

pub fn window_frames(x1: u16, y1: u16, x2: u16, y2: u16) -> Vec<Frame> {
    vec![
        cmd(0x2A),
        data_16(x1),
        data_16(x2),
        cmd(0x2B),
        data_16(y1),
        data_16(y2),
        cmd(0x2C),
    ]
}

/// A repeated-color run of `count` pixels.
pub fn color_run(color: u16, count: usize) -> Frame {
    data(&color.to_be_bytes().repeat(count))
}

/// GC9A01A bring-up registers in the order the panel needs them, with
/// their parameter bytes. Written out by hand so a reordered or edited
/// table fails the tests.
pub const REGISTER_SEQUENCE: &[(u8, &[u8])] = &[
    (0x01, &[]),
    (0x11, &[]),
    (0x3A, &[0x55]),
    (0x36, &[0x08]),
    (0xEF, &[]),
    (0xEB, &[0x14]),
    (0xFE, &[]),
    (0xEF, &[]),
    (0xEB, &[0x14]),
    (0x84, &[0x40]),
    (0x85, &[0xFF]),
    (0x86, &[0xFF]),
    (0x87, &[0xFF]),
    (0x88, &[0x0A]),
    (0x89, &[0x21]),
    (0x8A, &[0x00]),
    (0x8B, &[0x80]),
    (0x8C, &[0x01]),
    (0x8D, &[0x01]),
    (0x8E, &[0xFF]),
    (0x8F, &[0xFF]),
    (0xB6, &[0x00, 0x20]),
    (0x36, &[0x08]),
    (0x3A, &[0x05]),
    (0x90, &[0x08, 0x08, 0x08, 0x08]),
    (0xBD, &[0x06]),
    (0xBC, &[0x00]),
    (0xFF, &[0x60, 0x01, 0x04]),
    (0xC3, &[0x13]),
    (0xC4, &[0x13]),
    (0xC9, &[0x22]),
    (0xBE, &[0x11]),
    (0xE1, &[0x10, 0x0E]),
    (0xDF, &[0x21, 0x0C, 0x02]),
    (0xF0, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF1, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xF2, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF3, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xED, &[0x1B, 0x0B]),
    (0xAE, &[0x77]),
    (0xCD, &[0x63]),
    (0x70, &[0x07, 0x07, 0x04, 0x0E, 0x0F, 0x09, 0x07, 0x08, 0x03]),
    (0xE8, &[0x34]),
    (
        0x62,
        &[0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70],
    ),
    (
        0x63,
        &[0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70],
    ),
    (0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    (0x66, &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00]),
    (0x67, &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98]),
    (0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    (0x98, &[0x3E, 0x07]),
    (0x21, &[]),
    (0x13, &[]),
    (0x29, &[]),
];

/// Frames of the full bring-up: each command, then one frame per parameter byte.
pub fn init_frames() -> Vec<Frame> {
    let mut frames = Vec::new();
    for (command, params) in REGISTER_SEQUENCE {
        frames.push(cmd(*command));
        frames.extend(params.iter().map(|byte| data(&[*byte])));
    }
    frames
}

pub fn count_transactions(events: &[Event]) -> usize {
    events.iter().filter(|e| **e == Event::Begin).count()
}
