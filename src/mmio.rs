use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::Config;
use crate::regs::{Register, WdtRegs};

/// Access to the registers the sequencer drives.
///
/// The sequencer only ever goes through this trait, so the same code runs
/// against the peripheral and against a simulated register file.
pub trait RegisterIo {
    fn read(&mut self, reg: Register) -> u32;
    fn write(&mut self, reg: Register, value: u32);
}

impl<'a, T> RegisterIo for &'a mut T
where
    T: RegisterIo + ?Sized,
{
    fn read(&mut self, reg: Register) -> u32 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Register, value: u32) {
        (**self).write(reg, value)
    }
}

static WDT_TAKEN: AtomicBool = AtomicBool::new(false);

/// Volatile access to the memory mapped watchdog.
pub struct Mmio {
    base: *mut WdtRegs,
    owned: bool,
}

impl Mmio {
    /// Hands out the watchdog at `config.base`, once.
    ///
    /// There is a single watchdog, so at most one `Mmio` obtained from here
    /// is alive at a time, whatever base it was taken for. Returns `None`
    /// otherwise.
    pub fn take(config: &Config) -> Option<Mmio> {
        if WDT_TAKEN.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Mmio {
            base: config.base as *mut WdtRegs,
            owned: true,
        })
    }

    /// # Safety
    ///
    /// `base` must be the address of an OMAP WDT register block, and nothing
    /// else may access that block while the returned value is alive.
    pub unsafe fn new(base: usize) -> Mmio {
        Mmio {
            base: base as *mut WdtRegs,
            owned: false,
        }
    }

    fn reg(&self) -> &WdtRegs {
        unsafe { &*self.base }
    }

    /// Address of the register block.
    pub fn base(&self) -> usize {
        self.base as usize
    }
}

impl RegisterIo for Mmio {
    fn read(&mut self, reg: Register) -> u32 {
        match reg {
            Register::Wclr => self.reg().wclr.read(),
            Register::Wcrr => self.reg().wcrr.read(),
            Register::Wldr => self.reg().wldr.read(),
            Register::Wtgr => self.reg().wtgr.read(),
            Register::Wwps => self.reg().wwps.read(),
            Register::Wspr => self.reg().wspr.read(),
        }
    }

    fn write(&mut self, reg: Register, value: u32) {
        let regs = self.reg();
        let cell = match reg {
            Register::Wclr => &regs.wclr,
            Register::Wcrr => &regs.wcrr,
            Register::Wldr => &regs.wldr,
            Register::Wtgr => &regs.wtgr,
            Register::Wspr => &regs.wspr,
            Register::Wwps => {
                log::warn!("WWPS is read-only, dropping write of {:#x}", value);
                return;
            }
        };
        unsafe { cell.write(value) }
    }
}

impl Drop for Mmio {
    fn drop(&mut self) {
        if self.owned {
            WDT_TAKEN.store(false, Ordering::Release);
        }
    }
}
