#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// Software Reset (01h) - Restore registers to power-on defaults
    SoftwareReset = 0x01,

    /// Sleep Out (11h) - Exit low-power mode
    SleepOut = 0x11,
    /// Normal Display Mode On (13h) - Full-screen mode
    NormalDisplayOn = 0x13,

    /// Display Inversion On (21h) - Enable color inversion
    DisplayInversionOn = 0x21,

    /// Display On (29h) - Enable panel output
    DisplayOn = 0x29,
    /// Column Address Set (2Ah) - Horizontal addressing bounds
    ColumnAddressSet = 0x2A,
    /// Row Address Set (2Bh) - Vertical addressing bounds
    RowAddressSet = 0x2B,
    /// Memory Write (2Ch) - Write to memory
    MemoryWrite = 0x2C,

    /// Memory Access Control (36h) - GRAM orientation/order
    MemoryAccessControl = 0x36,
    /// Pixel Format Set (3Ah) - Color depth configuration
    PixelFormatSet = 0x3A,

    /// Display Function Control (B6h) - Scan direction/number
    DisplayFunctionControl = 0xB6,

    /// VREG1A Voltage Control (C3h)
    Vreg1aControl = 0xC3,
    /// VREG1B Voltage Control (C4h)
    Vreg1bControl = 0xC4,
    /// VREG2A Voltage Control (C9h)
    Vreg2aControl = 0xC9,

    /// Frame Rate (E8h)
    FrameRate = 0xE8,

    /// Inter Register Enable 2 (EFh)
    InterRegisterEnable2 = 0xEF,
    /// Gamma Set 1 (F0h)
    GammaSet1 = 0xF0,
    /// Gamma Set 2 (F1h)
    GammaSet2 = 0xF1,
    /// Gamma Set 3 (F2h)
    GammaSet3 = 0xF2,
    /// Gamma Set 4 (F3h)
    GammaSet4 = 0xF3,
    /// Inter Register Enable 1 (FEh)
    InterRegisterEnable1 = 0xFE,
}

impl From<Instruction> for u8 {
    fn from(instruction: Instruction) -> Self {
        instruction as u8
    }
}

/// RGB-BGR order bit of MADCTL. The panel is wired BGR.
pub const MADCTL_BGR: u8 = 0x08;

/// Row/column order bits of MADCTL (MY, MX, MV).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    Portrait = 0x00,
    Landscape = 0x60,
    PortraitSwapped = 0xC0,
    LandscapeSwapped = 0xA0,
}

impl Orientation {
    /// MADCTL payload for this orientation on a BGR panel.
    pub const fn madctl(self) -> u8 {
        self as u8 | MADCTL_BGR
    }
}
