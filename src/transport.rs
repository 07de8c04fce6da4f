use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
#[cfg(not(feature = "async"))]
use embedded_hal::spi::SpiBus;
#[cfg(feature = "async")]
use embedded_hal_async::spi::SpiBus;

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Transport",),
    async(feature = "async", keep_self)
)]
/// Byte-level write access to the panel with explicit transaction bracketing.
///
/// `begin` selects the device, `end` releases it once every byte passed to
/// `write` has left the bus. Several `write` calls between one `begin`/`end`
/// pair form a single transaction.
pub trait Transport {
    type Error: core::fmt::Debug;

    async fn begin(&mut self) -> Result<(), Self::Error>;

    async fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    async fn end(&mut self) -> Result<(), Self::Error>;
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), keep_self),
    async(feature = "async", keep_self)
)]
impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    async fn begin(&mut self) -> Result<(), Self::Error> {
        T::begin(self).await
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        T::write(self, bytes).await
    }

    async fn end(&mut self) -> Result<(), Self::Error> {
        T::end(self).await
    }
}

/// [`Transport`] over an exclusively owned SPI bus and a chip-select pin.
///
/// CS is active low. The bus must be configured for [`crate::SPI_MODE`],
/// MSB first, at no more than [`crate::MAX_SPI_FREQUENCY_HZ`].
pub struct SpiTransport<BUS, CS> {
    bus: BUS,
    cs: CS,
}

impl<BUS, CS> SpiTransport<BUS, CS>
where
    CS: OutputPin<Error = Infallible>,
{
    pub fn new(bus: BUS, mut cs: CS) -> Self {
        // Start deselected
        let Ok(()) = cs.set_high();
        Self { bus, cs }
    }

    pub fn release(self) -> (BUS, CS) {
        (self.bus, self.cs)
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), keep_self),
    async(feature = "async", keep_self)
)]
impl<BUS, CS> Transport for SpiTransport<BUS, CS>
where
    BUS: SpiBus,
    CS: OutputPin<Error = Infallible>,
{
    type Error = BUS::Error;

    async fn begin(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(|never| match never {})
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(bytes).await
    }

    async fn end(&mut self) -> Result<(), Self::Error> {
        // CS must not rise before the last byte is clocked out
        let flushed = self.bus.flush().await;
        self.cs.set_high().map_err(|never| match never {})?;
        flushed
    }
}
