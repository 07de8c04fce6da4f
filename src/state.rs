/// Bring-up progress of the panel. `Ready` is never left again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    Uninitialized,
    Ready,
}

/// What kind of pixels the panel can show, as reported to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum DisplayType {
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    lifecycle: Lifecycle,
    ticks: u32,
}

impl DisplayState {
    pub const fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            ticks: 0,
        }
    }

    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Ready)
    }

    /// Scheduler ticks seen so far.
    pub const fn ticks(&self) -> u32 {
        self.ticks
    }

    pub(crate) fn mark_ready(&mut self) {
        self.lifecycle = Lifecycle::Ready;
    }

    /// Count one tick and return the new total.
    pub(crate) fn tick(&mut self) -> u32 {
        self.ticks = self.ticks.saturating_add(1);
        self.ticks
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot handed to the external reporter every `report_interval` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    pub ticks: u32,
    pub lifecycle: Lifecycle,
    pub width: u16,
    pub height: u16,
    pub display_type: DisplayType,
    pub has_backlight: bool,
    pub has_reset: bool,
}
