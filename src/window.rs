use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Rectangular region of controller memory, inclusive on both ends.
///
/// Always satisfies `x1 <= x2 < SCREEN_WIDTH` and `y1 <= y2 < SCREEN_HEIGHT`;
/// [`AddressWindow::new`] refuses anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressWindow {
    x1: u16,
    y1: u16,
    x2: u16,
    y2: u16,
}

impl AddressWindow {
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Option<Self> {
        if x1 > x2 || y1 > y2 || x2 >= SCREEN_WIDTH || y2 >= SCREEN_HEIGHT {
            return None;
        }
        Some(Self { x1, y1, x2, y2 })
    }

    /// The whole panel, (0,0)-(239,239).
    pub const fn full() -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: SCREEN_WIDTH - 1,
            y2: SCREEN_HEIGHT - 1,
        }
    }

    /// A single pixel, if it lies on the panel.
    pub const fn pixel(x: u16, y: u16) -> Option<Self> {
        Self::new(x, y, x, y)
    }

    pub const fn columns(&self) -> (u16, u16) {
        (self.x1, self.x2)
    }

    pub const fn rows(&self) -> (u16, u16) {
        (self.y1, self.y2)
    }

    pub const fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    pub const fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }

    /// Number of pixels the controller expects after `MemoryWrite`.
    pub const fn pixel_count(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }
}
