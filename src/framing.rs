use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::Error;
use crate::color::Color565;
use crate::transport::Transport;

// Pixels per write inside one transaction
const BATCH_PIXELS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Command,
    Data,
}

/// Sequences DC and CS around every logical transfer.
///
/// Each unit sets DC first (low for a command, high for data), then opens a
/// transaction, writes all of its bytes and closes the transaction again.
/// Multi-byte values go out most significant byte first.
pub struct BusFraming<T, DC> {
    transport: T,
    dc: DC,
}

impl<T, DC> BusFraming<T, DC> {
    pub fn new(transport: T, dc: DC) -> Self {
        Self { transport, dc }
    }

    pub fn release(self) -> (T, DC) {
        (self.transport, self.dc)
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "BusFraming",),
    async(feature = "async", keep_self)
)]
impl<T, DC, E> BusFraming<T, DC>
where
    T: Transport<Error = E>,
    DC: OutputPin<Error = Infallible>,
{
    /// Write a single command byte (DC low)
    pub async fn write_command(&mut self, command: u8) -> Result<(), Error<E>> {
        self.transfer(Mode::Command, &[command]).await
    }

    /// Write parameter bytes (DC high), each byte in its own CS bracket
    pub async fn write_data(&mut self, data: &[u8]) -> Result<(), Error<E>> {
        for byte in data {
            self.transfer(Mode::Data, core::slice::from_ref(byte)).await?;
        }
        Ok(())
    }

    pub async fn write_data_16(&mut self, value: u16) -> Result<(), Error<E>> {
        self.transfer(Mode::Data, &value.to_be_bytes()).await
    }

    /// Write `count` copies of one pixel while CS stays asserted.
    pub async fn write_color(&mut self, color: Color565, count: u32) -> Result<(), Error<E>> {
        if count == 0 {
            return Ok(());
        }

        let [high, low] = color.to_be_bytes();
        let mut batch = [0u8; BATCH_PIXELS * 2];
        for pixel in batch.chunks_exact_mut(2) {
            pixel[0] = high;
            pixel[1] = low;
        }

        self.select(Mode::Data)?;
        self.transport.begin().await.map_err(Error::Comm)?;

        let mut remaining = count as usize;
        let mut written = Ok(());
        while remaining > 0 && written.is_ok() {
            let pixels = remaining.min(BATCH_PIXELS);
            written = self.transport.write(&batch[..pixels * 2]).await;
            remaining -= pixels;
        }

        let released = self.transport.end().await;
        written.and(released).map_err(Error::Comm)
    }

    /// Stream distinct pixels in one data transaction.
    pub async fn write_pixels(&mut self, pixels: &[Color565]) -> Result<(), Error<E>> {
        if pixels.is_empty() {
            return Ok(());
        }

        self.select(Mode::Data)?;
        self.transport.begin().await.map_err(Error::Comm)?;

        let mut batch = [0u8; BATCH_PIXELS * 2];
        let mut written = Ok(());
        for chunk in pixels.chunks(BATCH_PIXELS) {
            for (bytes, pixel) in batch.chunks_exact_mut(2).zip(chunk) {
                bytes.copy_from_slice(&pixel.to_be_bytes());
            }
            written = self.transport.write(&batch[..chunk.len() * 2]).await;
            if written.is_err() {
                break;
            }
        }

        let released = self.transport.end().await;
        written.and(released).map_err(Error::Comm)
    }

    async fn transfer(&mut self, mode: Mode, bytes: &[u8]) -> Result<(), Error<E>> {
        self.select(mode)?;
        self.transport.begin().await.map_err(Error::Comm)?;
        let written = self.transport.write(bytes).await;
        let released = self.transport.end().await;
        written.and(released).map_err(Error::Comm)
    }

    fn select(&mut self, mode: Mode) -> Result<(), Error<E>> {
        match mode {
            Mode::Command => self.dc.set_low().map_err(Error::Pin),
            Mode::Data => self.dc.set_high().map_err(Error::Pin),
        }
    }
}
