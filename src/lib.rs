#![no_std]
//! Driver for the GC9A01A 240x240 round RGB565 panel over SPI.
//!
//! The driver is generic over a [`Transport`] (byte writes bracketed by
//! chip-select), a data/command pin, optional reset and backlight pins and a
//! [`Timer`]. With the default `async` feature every bus operation is an
//! `async fn` on top of `embedded-hal-async`; without it the same API is
//! blocking on top of `embedded-hal` and the driver also implements
//! `DrawTarget`.
//!
//! Nothing is read back from the panel. A disconnected or miswired bus
//! looks exactly like a working one, and requests made before [`GC9A01A::setup`]
//! completes or outside the panel are dropped without an error.
//!
//! The driver takes no lock. Calling it from more than one execution context
//! needs external synchronisation.

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::spi::{MODE_0, Mode};

mod color;
mod framing;
mod init;
mod instruction;
mod state;
mod transport;
mod window;

pub use color::{Color565, quantize};
pub use framing::BusFraming;
pub use init::{INIT_SEQUENCE, InitStep};
pub use instruction::{Instruction, MADCTL_BGR, Orientation};
pub use state::{Diagnostics, DisplayState, DisplayType, Lifecycle};
pub use transport::{SpiTransport, Transport};
pub use window::AddressWindow;

// Screen dimensions for GC9A01A 240RGB×240
pub const SCREEN_WIDTH: u16 = 240;
pub const SCREEN_HEIGHT: u16 = 240;
pub const PIXEL_COUNT: u32 = SCREEN_WIDTH as u32 * SCREEN_HEIGHT as u32;

/// Clock idles low, data sampled on the leading edge. Bits go MSB first.
pub const SPI_MODE: Mode = MODE_0;
pub const MAX_SPI_FREQUENCY_HZ: u32 = 40_000_000;

#[derive(Clone, Copy)]
pub struct Config {
    /// Color written to the whole panel at the end of `setup`.
    pub initial_color: Rgb888,
    /// Ticks between diagnostic reports from `update`; 0 disables them.
    pub report_interval: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_color: Rgb888::RED,
            report_interval: 20,
        }
    }
}

#[derive(Debug)]
pub enum Error<E = ()> {
    /// Communication error
    Comm(E),
    /// Pin setting error
    Pin(Infallible),
}

/// Stand-in for an unconnected reset or backlight line.
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

pub struct GC9A01A<T, DC, RST, BL, TIMER> {
    bus: BusFraming<T, DC>,
    rst: Option<RST>,
    bl: Option<BL>,
    config: Config,
    state: DisplayState,
    _timer: PhantomData<TIMER>,
}

impl<T, DC, TIMER> GC9A01A<T, DC, NoPin, NoPin, TIMER> {
    pub fn new(config: Config, transport: T, dc: DC) -> Self {
        Self {
            bus: BusFraming::new(transport, dc),
            rst: None,
            bl: None,
            config,
            state: DisplayState::new(),
            _timer: PhantomData,
        }
    }
}

impl<T, DC, RST, BL, TIMER> GC9A01A<T, DC, RST, BL, TIMER> {
    /// Attach a hardware reset line, pulsed by `setup` before the register sequence.
    pub fn with_reset<R>(self, rst: R) -> GC9A01A<T, DC, R, BL, TIMER> {
        GC9A01A {
            bus: self.bus,
            rst: Some(rst),
            bl: self.bl,
            config: self.config,
            state: self.state,
            _timer: PhantomData,
        }
    }

    /// Attach a backlight enable line, driven high once by `setup`.
    pub fn with_backlight<B>(self, bl: B) -> GC9A01A<T, DC, RST, B, TIMER> {
        GC9A01A {
            bus: self.bus,
            rst: self.rst,
            bl: Some(bl),
            config: self.config,
            state: self.state,
            _timer: PhantomData,
        }
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Called once per scheduler tick. Never touches the bus.
    ///
    /// Returns a diagnostics snapshot when a report is due.
    pub fn update(&mut self) -> Option<Diagnostics> {
        let ticks = self.state.tick();

        if !self.state.is_ready() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Display not ready, skipping update");
        }

        let interval = self.config.report_interval;
        if interval == 0 || ticks % interval != 0 {
            return None;
        }

        let diagnostics = Diagnostics {
            ticks,
            lifecycle: self.state.lifecycle(),
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            display_type: DisplayType::Color,
            has_backlight: self.bl.is_some(),
            has_reset: self.rst.is_some(),
        };

        #[cfg(feature = "defmt")]
        {
            defmt::info!("=== Diagnostic Report (Update #{}) ===", diagnostics.ticks);
            defmt::info!("  Ready State: {}", self.state.is_ready());
            defmt::info!(
                "  Display Dimensions: {}x{}",
                diagnostics.width,
                diagnostics.height
            );
            if !diagnostics.has_backlight {
                defmt::warn!("  No backlight pin configured, display may be dark");
            }
        }

        Some(diagnostics)
    }

    pub fn dump_config(&self) {
        #[cfg(feature = "defmt")]
        {
            defmt::info!("GC9A01A Display:");
            defmt::info!("  Reset Pin: {}", self.rst.is_some());
            defmt::info!("  Backlight Pin: {}", self.bl.is_some());
            defmt::info!("  Width: {}, Height: {}", SCREEN_WIDTH, SCREEN_HEIGHT);
        }
    }

    pub fn release(self) -> (T, DC, Option<RST>, Option<BL>) {
        let (transport, dc) = self.bus.release();
        (transport, dc, self.rst, self.bl)
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "GC9A01A",),
    async(feature = "async", keep_self)
)]
impl<T, DC, RST, BL, TIMER, E> GC9A01A<T, DC, RST, BL, TIMER>
where
    T: Transport<Error = E>,
    DC: OutputPin<Error = Infallible>,
    RST: OutputPin<Error = Infallible>,
    BL: OutputPin<Error = Infallible>,
    TIMER: Timer,
{
    /// Bring the panel from power-on to showing `config.initial_color`.
    ///
    /// The display only counts as ready once every step succeeded.
    pub async fn setup(&mut self) -> Result<(), Error<E>> {
        if self.state.is_ready() {
            #[cfg(feature = "defmt")]
            defmt::warn!("GC9A01A already set up");
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Initializing GC9A01A display...");

        if let Some(bl) = self.bl.as_mut() {
            bl.set_high().map_err(Error::Pin)?;
        }

        self.reset().await?;
        self.init().await?;

        let initial = Color565::from(self.config.initial_color);
        self.fill_window(AddressWindow::full(), initial).await?;
        self.state.mark_ready();

        #[cfg(feature = "defmt")]
        defmt::info!("GC9A01A display ready");
        Ok(())
    }

    /// Pulse the reset line if one is attached.
    pub async fn reset(&mut self) -> Result<(), Error<E>> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(());
        };

        rst.set_high().map_err(Error::Pin)?;
        TIMER::delay_ms(10).await;
        rst.set_low().map_err(Error::Pin)?;
        TIMER::delay_ms(10).await;
        rst.set_high().map_err(Error::Pin)?;
        TIMER::delay_ms(120).await; // Wait for reset to complete

        Ok(())
    }

    /// Run the full register table.
    pub async fn init(&mut self) -> Result<(), Error<E>> {
        self.run_sequence(INIT_SEQUENCE).await
    }

    /// Execute register steps in order, waiting out each step's delay.
    pub async fn run_sequence(&mut self, steps: &[InitStep]) -> Result<(), Error<E>> {
        for step in steps {
            self.bus.write_command(step.command).await?;
            self.bus.write_data(step.params).await?;
            if step.delay_ms > 0 {
                TIMER::delay_ms(u64::from(step.delay_ms)).await;
            }
        }
        Ok(())
    }

    /// Program the column/row bounds and leave the controller in memory-write mode.
    pub async fn set_window(&mut self, window: AddressWindow) -> Result<(), Error<E>> {
        let (x1, x2) = window.columns();
        let (y1, y2) = window.rows();

        self.bus
            .write_command(Instruction::ColumnAddressSet.into())
            .await?;
        self.bus.write_data_16(x1).await?;
        self.bus.write_data_16(x2).await?;

        self.bus
            .write_command(Instruction::RowAddressSet.into())
            .await?;
        self.bus.write_data_16(y1).await?;
        self.bus.write_data_16(y2).await?;

        self.bus.write_command(Instruction::MemoryWrite.into()).await
    }

    /// Fill the whole panel with one color in a single transaction.
    pub async fn fill(&mut self, color: Rgb888) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Fill called with color R:{} G:{} B:{}, ready: {}",
            color.r(),
            color.g(),
            color.b(),
            self.state.is_ready()
        );

        if !self.state.is_ready() {
            return Ok(());
        }

        self.fill_window(AddressWindow::full(), Color565::from(color))
            .await
    }

    /// Draw one pixel. Off-panel coordinates are ignored.
    pub async fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb888) -> Result<(), Error<E>> {
        let Some(window) = pixel_window(x, y) else {
            return Ok(());
        };

        if !self.state.is_ready() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Display not ready for pixel draw");
            return Ok(());
        }

        self.set_window(window).await?;
        self.bus
            .write_data_16(Color565::from(color).into_inner())
            .await
    }

    /// Fill a rectangle, clipped to the panel.
    pub async fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Rgb888,
    ) -> Result<(), Error<E>> {
        if !self.state.is_ready() || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return Ok(());
        }

        let actual_width = width.min(SCREEN_WIDTH - x);
        let actual_height = height.min(SCREEN_HEIGHT - y);
        if actual_width == 0 || actual_height == 0 {
            return Ok(()); // Nothing to draw
        }

        let Some(window) =
            AddressWindow::new(x, y, x + actual_width - 1, y + actual_height - 1)
        else {
            return Ok(());
        };

        self.fill_window(window, Color565::from(color)).await
    }

    /// Stream pixels into `window` row by row. Pixels beyond the window are dropped.
    pub async fn write_pixels(
        &mut self,
        window: AddressWindow,
        pixels: &[Color565],
    ) -> Result<(), Error<E>> {
        if !self.state.is_ready() || pixels.is_empty() {
            return Ok(());
        }

        let count = pixels.len().min(window.pixel_count() as usize);
        self.set_window(window).await?;
        self.bus.write_pixels(&pixels[..count]).await
    }

    pub async fn set_orientation(&mut self, orientation: Orientation) -> Result<(), Error<E>> {
        if !self.state.is_ready() {
            return Ok(());
        }

        self.bus
            .write_command(Instruction::MemoryAccessControl.into())
            .await?;
        self.bus.write_data(&[orientation.madctl()]).await
    }

    async fn fill_window(&mut self, window: AddressWindow, color: Color565) -> Result<(), Error<E>> {
        self.set_window(window).await?;
        self.bus.write_color(color, window.pixel_count()).await
    }
}

fn pixel_window(x: i32, y: i32) -> Option<AddressWindow> {
    let x = u16::try_from(x).ok()?;
    let y = u16::try_from(y).ok()?;
    AddressWindow::pixel(x, y)
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Renderable",),
    async(feature = "async", keep_self)
)]
/// What a pixel-buffer renderer needs from a panel.
pub trait Renderable {
    type Error;

    fn width(&self) -> u16;

    fn height(&self) -> u16;

    fn display_type(&self) -> DisplayType;

    async fn fill(&mut self, color: Rgb888) -> Result<(), Self::Error>;

    async fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb888) -> Result<(), Self::Error>;
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), keep_self),
    async(feature = "async", keep_self)
)]
impl<T, DC, RST, BL, TIMER, E> Renderable for GC9A01A<T, DC, RST, BL, TIMER>
where
    T: Transport<Error = E>,
    DC: OutputPin<Error = Infallible>,
    RST: OutputPin<Error = Infallible>,
    BL: OutputPin<Error = Infallible>,
    TIMER: Timer,
{
    type Error = Error<E>;

    fn width(&self) -> u16 {
        SCREEN_WIDTH
    }

    fn height(&self) -> u16 {
        SCREEN_HEIGHT
    }

    fn display_type(&self) -> DisplayType {
        DisplayType::Color
    }

    async fn fill(&mut self, color: Rgb888) -> Result<(), Self::Error> {
        GC9A01A::fill(self, color).await
    }

    async fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb888) -> Result<(), Self::Error> {
        GC9A01A::draw_pixel(self, x, y, color).await
    }
}

impl<T, DC, RST, BL, TIMER> OriginDimensions for GC9A01A<T, DC, RST, BL, TIMER> {
    fn size(&self) -> Size {
        Size::new(u32::from(SCREEN_WIDTH), u32::from(SCREEN_HEIGHT))
    }
}

#[cfg(not(feature = "async"))]
mod draw_target {
    use core::convert::Infallible;

    use embedded_graphics_core::Pixel;
    use embedded_graphics_core::draw_target::DrawTarget;
    use embedded_graphics_core::geometry::Dimensions;
    use embedded_graphics_core::pixelcolor::Rgb888;
    use embedded_graphics_core::primitives::Rectangle;
    use embedded_hal::digital::OutputPin;

    use crate::{Error, GC9A01A, Timer, Transport};

    impl<T, DC, RST, BL, TIMER, E> DrawTarget for GC9A01A<T, DC, RST, BL, TIMER>
    where
        T: Transport<Error = E>,
        DC: OutputPin<Error = Infallible>,
        RST: OutputPin<Error = Infallible>,
        BL: OutputPin<Error = Infallible>,
        TIMER: Timer,
    {
        type Color = Rgb888;
        type Error = Error<E>;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                GC9A01A::draw_pixel(self, point.x, point.y, color)?;
            }
            Ok(())
        }

        fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
            let area = area.intersection(&self.bounding_box());
            let (Ok(x), Ok(y), Ok(width), Ok(height)) = (
                u16::try_from(area.top_left.x),
                u16::try_from(area.top_left.y),
                u16::try_from(area.size.width),
                u16::try_from(area.size.height),
            ) else {
                return Ok(());
            };
            self.fill_rect(x, y, width, height, color)
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            GC9A01A::fill(self, color)
        }
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Timer",),
    async(feature = "async", keep_self)
)]
/// Simplified timer trait for delay operations.
pub trait Timer {
    /// Delay for the specified number of milliseconds.
    async fn delay_ms(milliseconds: u64);
}

/// [`Timer`] backed by `embassy-time`.
#[cfg(feature = "embassy-time")]
pub struct EmbassyTimer;

#[cfg(all(feature = "embassy-time", feature = "async"))]
impl Timer for EmbassyTimer {
    async fn delay_ms(milliseconds: u64) {
        embassy_time::Timer::after_millis(milliseconds).await;
    }
}

#[cfg(all(feature = "embassy-time", not(feature = "async")))]
impl Timer for EmbassyTimer {
    fn delay_ms(milliseconds: u64) {
        embassy_time::block_for(embassy_time::Duration::from_millis(milliseconds));
    }
}
