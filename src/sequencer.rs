//! Register sequences for the OMAP WDT.
//!
//! Writes to the WDT registers are posted: the value only reaches the timer's
//! clock domain some cycles later, and WWPS reports which registers still have
//! a write in flight. Each sequence below waits on the relevant flag before a
//! dependent access, and every sequence leaves the flags it touched clear.

use core::hint::spin_loop;

use void::Void;

use crate::config::{PollPolicy, Seconds, PTV, TICK_HZ};
use crate::error::{Error, Result};
use crate::mmio::RegisterIo;
use crate::regs::{
    control_value, Pending, Register, WSPR_START_A, WSPR_START_B, WSPR_STOP_A, WSPR_STOP_B,
};

/// WLDR value for `timeout`.
///
/// The counter counts up from WLDR and resets the system when it overflows,
/// so the load value is `2^32 - timeout * TICK_HZ`. Timeouts are clamped to
/// `1..=MAX_TIMEOUT_SECS`.
pub const fn load_value(timeout: Seconds) -> u32 {
    0u32.wrapping_sub(timeout.clamped().0 * TICK_HZ)
}

pub struct Sequencer<R> {
    io: R,
    poll: PollPolicy,
}

impl<R> Sequencer<R>
where
    R: RegisterIo,
{
    pub fn new(io: R, poll: PollPolicy) -> Sequencer<R> {
        Sequencer { io, poll }
    }

    pub fn io(&self) -> &R {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut R {
        &mut self.io
    }

    pub fn free(self) -> R {
        self.io
    }

    /// Reads WWPS once.
    pub fn poll_idle(&mut self, pending: Pending) -> nb::Result<(), Void> {
        if pending.is_set(self.io.read(Register::Wwps)) {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    /// Current counter value.
    pub fn counter(&mut self) -> u32 {
        self.io.read(Register::Wcrr)
    }

    /// Reloads the counter from WLDR.
    pub fn reload(&mut self) -> Result<()> {
        self.wait_idle(Pending::Wtgr)?;

        // Writing anything other than the current WTGR value triggers the
        // reload.
        let wtgr = self.io.read(Register::Wtgr);
        self.write(Register::Wtgr, !wtgr);

        self.wait_idle(Pending::Wtgr)
    }

    /// Starts the counter.
    pub fn enable(&mut self) -> Result<()> {
        log::debug!("watchdog start sequence");
        self.write_key(WSPR_START_A, WSPR_START_B)
    }

    /// Stops the counter. Safe to call on a timer that was never started.
    pub fn disable(&mut self) -> Result<()> {
        log::debug!("watchdog stop sequence");
        self.write_key(WSPR_STOP_A, WSPR_STOP_B)
    }

    /// Programs WLDR for `timeout`. Takes effect on the next reload.
    pub fn set_timer(&mut self, timeout: Seconds) -> Result<()> {
        let load = load_value(timeout);

        self.wait_idle(Pending::Wldr)?;
        self.write(Register::Wldr, load);
        self.wait_idle(Pending::Wldr)
    }

    /// Sets up the prescaler, loads `timeout` and arms the timer.
    pub fn start(&mut self, timeout: Seconds) -> Result<()> {
        log::debug!("arming watchdog for {} s", timeout.clamped().0);

        self.wait_idle(Pending::Wclr)?;
        self.write(Register::Wclr, control_value(PTV));
        self.wait_idle(Pending::Wclr)?;

        // The counter has to hold the new load value before it starts.
        self.set_timer(timeout)?;
        self.reload()?;
        self.enable()
    }

    fn write_key(&mut self, first: u32, second: u32) -> Result<()> {
        self.write(Register::Wspr, first);
        self.wait_idle(Pending::Wspr)?;

        self.write(Register::Wspr, second);
        self.wait_idle(Pending::Wspr)
    }

    fn write(&mut self, reg: Register, value: u32) {
        log::trace!("{:?} <- {:#010x}", reg, value);
        self.io.write(reg, value);
    }

    fn wait_idle(&mut self, pending: Pending) -> Result<()> {
        let mut polls: u32 = 0;
        let mut spins: u32 = 1;

        loop {
            match self.poll_idle(pending) {
                Ok(()) => break,
                Err(nb::Error::Other(never)) => void::unreachable(never),
                Err(nb::Error::WouldBlock) => {}
            }
            polls = polls.saturating_add(1);

            match self.poll {
                PollPolicy::Unbounded => spin_loop(),
                PollPolicy::Bounded {
                    max_polls,
                    max_backoff,
                } => {
                    if polls >= max_polls {
                        return Err(Error::WritePending { pending, polls });
                    }
                    for _ in 0..spins {
                        spin_loop();
                    }
                    spins = spins.saturating_mul(2).min(max_backoff.max(1));
                }
            }
        }

        if polls > 0 {
            log::trace!("{} write landed after {} polls", pending, polls);
        }
        Ok(())
    }
}
