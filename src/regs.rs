//! OMAP WDT register block.
//!
//! OMAP35x TRM, section 16.4 (WDTIMER registers).

use core::fmt;

use bit_field::BitField;
use volatile_register::{RO, RW};

#[allow(dead_code)]
#[repr(C)]
pub(crate) struct WdtRegs {
    pub widr:       RO<u32>,
    _pad0:          [u8; 12],
    pub sysconfig:  RW<u32>,
    pub sysstatus:  RO<u32>,
    pub wisr:       RW<u32>,
    pub wier:       RW<u32>,
    _pad1:          [u8; 4],
    pub wclr:       RW<u32>,
    pub wcrr:       RW<u32>,
    pub wldr:       RW<u32>,
    pub wtgr:       RW<u32>,
    pub wwps:       RO<u32>,
    _pad2:          [u8; 16],
    pub wspr:       RW<u32>,
}

/// First word of the start sequence written to WSPR.
pub const WSPR_START_A: u32 = 0xBBBB;
/// Second word of the start sequence written to WSPR.
pub const WSPR_START_B: u32 = 0x4444;
/// First word of the stop sequence written to WSPR.
pub const WSPR_STOP_A: u32 = 0xAAAA;
/// Second word of the stop sequence written to WSPR.
pub const WSPR_STOP_B: u32 = 0x5555;

/// Registers driven by the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /// Control
    Wclr,
    /// Counter
    Wcrr,
    /// Load
    Wldr,
    /// Trigger
    Wtgr,
    /// Write-posting status
    Wwps,
    /// Start/stop key
    Wspr,
}

impl Register {
    /// Byte offset from the peripheral base address.
    pub const fn offset(self) -> usize {
        match self {
            Register::Wclr => 0x24,
            Register::Wcrr => 0x28,
            Register::Wldr => 0x2C,
            Register::Wtgr => 0x30,
            Register::Wwps => 0x34,
            Register::Wspr => 0x48,
        }
    }
}

/// Write-pending flags reported in WWPS.
///
/// A posted write to a register is not visible to the timer until its flag
/// clears. Writing the same register again before that is undefined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pending {
    Wclr = 0,
    Wcrr = 1,
    Wldr = 2,
    Wtgr = 3,
    Wspr = 4,
}

impl Pending {
    pub const fn bit(self) -> usize {
        self as usize
    }

    pub const fn mask(self) -> u32 {
        1 << self as u32
    }

    pub(crate) fn is_set(self, wwps: u32) -> bool {
        wwps.get_bit(self.bit())
    }
}

impl fmt::Display for Pending {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Pending::Wclr => "WCLR",
            Pending::Wcrr => "WCRR",
            Pending::Wldr => "WLDR",
            Pending::Wtgr => "WTGR",
            Pending::Wspr => "WSPR",
        };
        f.write_str(name)
    }
}

/// WCLR value enabling the prescaler with a divisor of `2^ptv`.
///
/// `ptv` must fit the 3 bit PTV field.
pub fn control_value(ptv: u8) -> u32 {
    let mut wclr: u32 = 0;
    // PRE
    wclr.set_bit(5, true);
    wclr.set_bits(2..5, ptv as u32);
    wclr
}
