use crate::instruction::{Instruction, MADCTL_BGR};

/// One register write of the bring-up table: a command, its parameter
/// bytes, and how long to wait before the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitStep {
    pub command: u8,
    pub params: &'static [u8],
    pub delay_ms: u32,
}

impl InitStep {
    pub const fn new(command: u8, params: &'static [u8]) -> Self {
        Self {
            command,
            params,
            delay_ms: 0,
        }
    }

    pub const fn instruction(instruction: Instruction, params: &'static [u8]) -> Self {
        Self::new(instruction as u8, params)
    }

    pub const fn with_delay(self, delay_ms: u32) -> Self {
        Self { delay_ms, ..self }
    }
}

use Instruction::*;

/// Power-on to display-on register sequence for the GC9A01A.
///
/// The order matters: the inter-register enables (FEh/EFh) must precede the
/// vendor block, and the delays after reset, sleep-out, inversion,
/// normal mode and display-on must not be shortened.
pub const INIT_SEQUENCE: &[InitStep] = &[
    InitStep::instruction(SoftwareReset, &[]).with_delay(120),
    InitStep::instruction(SleepOut, &[]).with_delay(120),
    InitStep::instruction(PixelFormatSet, &[0x55]),
    InitStep::instruction(MemoryAccessControl, &[MADCTL_BGR]),
    InitStep::instruction(InterRegisterEnable2, &[]),
    InitStep::new(0xEB, &[0x14]),
    InitStep::instruction(InterRegisterEnable1, &[]),
    InitStep::instruction(InterRegisterEnable2, &[]),
    InitStep::new(0xEB, &[0x14]),
    InitStep::new(0x84, &[0x40]),
    InitStep::new(0x85, &[0xFF]),
    InitStep::new(0x86, &[0xFF]),
    InitStep::new(0x87, &[0xFF]),
    InitStep::new(0x88, &[0x0A]),
    InitStep::new(0x89, &[0x21]),
    InitStep::new(0x8A, &[0x00]),
    InitStep::new(0x8B, &[0x80]),
    InitStep::new(0x8C, &[0x01]),
    InitStep::new(0x8D, &[0x01]),
    InitStep::new(0x8E, &[0xFF]),
    InitStep::new(0x8F, &[0xFF]),
    InitStep::instruction(DisplayFunctionControl, &[0x00, 0x20]),
    InitStep::instruction(MemoryAccessControl, &[MADCTL_BGR]),
    InitStep::instruction(PixelFormatSet, &[0x05]),
    InitStep::new(0x90, &[0x08, 0x08, 0x08, 0x08]),
    InitStep::new(0xBD, &[0x06]),
    InitStep::new(0xBC, &[0x00]),
    InitStep::new(0xFF, &[0x60, 0x01, 0x04]),
    InitStep::instruction(Vreg1aControl, &[0x13]),
    InitStep::instruction(Vreg1bControl, &[0x13]),
    InitStep::instruction(Vreg2aControl, &[0x22]),
    InitStep::new(0xBE, &[0x11]),
    InitStep::new(0xE1, &[0x10, 0x0E]),
    InitStep::new(0xDF, &[0x21, 0x0C, 0x02]),
    // Gamma
    InitStep::instruction(GammaSet1, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    InitStep::instruction(GammaSet2, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    InitStep::instruction(GammaSet3, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    InitStep::instruction(GammaSet4, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    InitStep::new(0xED, &[0x1B, 0x0B]),
    InitStep::new(0xAE, &[0x77]),
    InitStep::new(0xCD, &[0x63]),
    InitStep::new(
        0x70,
        &[0x07, 0x07, 0x04, 0x0E, 0x0F, 0x09, 0x07, 0x08, 0x03],
    ),
    InitStep::instruction(FrameRate, &[0x34]),
    InitStep::new(
        0x62,
        &[
            0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70,
        ],
    ),
    InitStep::new(
        0x63,
        &[
            0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70,
        ],
    ),
    InitStep::new(0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    InitStep::new(
        0x66,
        &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00],
    ),
    InitStep::new(
        0x67,
        &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98],
    ),
    InitStep::new(0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    InitStep::new(0x98, &[0x3E, 0x07]),
    InitStep::instruction(DisplayInversionOn, &[]).with_delay(10),
    InitStep::instruction(NormalDisplayOn, &[]).with_delay(10),
    InitStep::instruction(DisplayOn, &[]).with_delay(120),
];
