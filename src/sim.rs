//! Simulated WDT register file for host tests.
//!
//! Every access is appended to a log; an access's index in the log is its
//! timestamp. Writes set their WWPS flag for `latency` reads of WWPS.

use crate::mmio::RegisterIo;
use crate::regs::{Pending, Register, WSPR_START_A, WSPR_START_B, WSPR_STOP_A, WSPR_STOP_B};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read(Register, u32),
    Write(Register, u32),
}

pub struct SimRegs {
    wclr: u32,
    wcrr: u32,
    wldr: u32,
    wtgr: u32,
    wspr: u32,
    pending: [u32; 5],
    stuck: u32,
    latency: u32,
    key: Option<u32>,
    running: bool,
    reloads: u32,
    log: Vec<Access>,
}

fn pending_for(reg: Register) -> Option<Pending> {
    match reg {
        Register::Wclr => Some(Pending::Wclr),
        Register::Wcrr => Some(Pending::Wcrr),
        Register::Wldr => Some(Pending::Wldr),
        Register::Wtgr => Some(Pending::Wtgr),
        Register::Wspr => Some(Pending::Wspr),
        Register::Wwps => None,
    }
}

impl SimRegs {
    /// Writes land immediately.
    pub fn new() -> SimRegs {
        SimRegs::with_latency(0)
    }

    /// Writes stay pending for `polls` reads of WWPS.
    pub fn with_latency(polls: u32) -> SimRegs {
        SimRegs {
            wclr: 0,
            wcrr: 0,
            wldr: 0,
            wtgr: 0,
            wspr: 0,
            pending: [0; 5],
            stuck: 0,
            latency: polls,
            key: None,
            running: false,
            reloads: 0,
            log: Vec::new(),
        }
    }

    /// Marks a write as already in flight.
    pub fn preset_busy(&mut self, pending: Pending, polls: u32) {
        self.pending[pending.bit()] = polls;
    }

    /// The flag never clears.
    pub fn stick(&mut self, pending: Pending) {
        self.stuck |= pending.mask();
    }

    /// Sets a register without logging or side effects.
    pub fn poke(&mut self, reg: Register, value: u32) {
        *self.slot(reg) = value;
    }

    pub fn value(&mut self, reg: Register) -> u32 {
        *self.slot(reg)
    }

    pub fn log(&self) -> &[Access] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn writes_to(&self, reg: Register) -> Vec<u32> {
        self.log
            .iter()
            .filter_map(|access| match *access {
                Access::Write(r, v) if r == reg => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn writes(&self) -> Vec<(Register, u32)> {
        self.log
            .iter()
            .filter_map(|access| match *access {
                Access::Write(r, v) => Some((r, v)),
                _ => None,
            })
            .collect()
    }

    /// Timestamp of the first write to `reg`.
    pub fn first_write(&self, reg: Register) -> Option<usize> {
        self.log
            .iter()
            .position(|access| matches!(*access, Access::Write(r, _) if r == reg))
    }

    /// WWPS reads with a timestamp in `range`.
    pub fn status_reads(&self, range: core::ops::Range<usize>) -> Vec<u32> {
        self.log[range]
            .iter()
            .filter_map(|access| match *access {
                Access::Read(Register::Wwps, v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    fn slot(&mut self, reg: Register) -> &mut u32 {
        match reg {
            Register::Wclr => &mut self.wclr,
            Register::Wcrr => &mut self.wcrr,
            Register::Wldr => &mut self.wldr,
            Register::Wtgr => &mut self.wtgr,
            Register::Wspr => &mut self.wspr,
            // only the stuck flags persist
            Register::Wwps => &mut self.stuck,
        }
    }

    fn wwps(&mut self) -> u32 {
        let mut wwps = self.stuck;
        for (bit, left) in self.pending.iter_mut().enumerate() {
            if *left > 0 {
                wwps |= 1 << bit;
                *left -= 1;
            }
        }
        wwps
    }
}

impl RegisterIo for SimRegs {
    fn read(&mut self, reg: Register) -> u32 {
        let value = match reg {
            Register::Wwps => self.wwps(),
            _ => *self.slot(reg),
        };
        self.log.push(Access::Read(reg, value));
        value
    }

    fn write(&mut self, reg: Register, value: u32) {
        self.log.push(Access::Write(reg, value));
        if reg == Register::Wwps {
            return;
        }
        if let Some(pending) = pending_for(reg) {
            self.pending[pending.bit()] = self.latency;
        }

        let old = *self.slot(reg);
        *self.slot(reg) = value;

        match reg {
            Register::Wtgr if value != old => {
                self.wcrr = self.wldr;
                self.reloads += 1;
            }
            Register::Wspr => match (self.key.take(), value) {
                (Some(WSPR_START_A), WSPR_START_B) => self.running = true,
                (Some(WSPR_STOP_A), WSPR_STOP_B) => self.running = false,
                (_, WSPR_START_A) | (_, WSPR_STOP_A) => self.key = Some(value),
                _ => {}
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_counts_status_reads() {
        let mut sim = SimRegs::with_latency(2);
        sim.write(Register::Wldr, 7);
        assert_eq!(Pending::Wldr.mask(), sim.read(Register::Wwps));
        assert_eq!(Pending::Wldr.mask(), sim.read(Register::Wwps));
        assert_eq!(0, sim.read(Register::Wwps));
    }

    #[test]
    fn key_sequences() {
        let mut sim = SimRegs::new();
        sim.write(Register::Wspr, WSPR_START_B);
        assert!(!sim.is_running());
        sim.write(Register::Wspr, WSPR_START_A);
        sim.write(Register::Wspr, WSPR_START_B);
        assert!(sim.is_running());
        sim.write(Register::Wspr, WSPR_STOP_A);
        sim.write(Register::Wspr, WSPR_START_B);
        assert!(sim.is_running());
        sim.write(Register::Wspr, WSPR_STOP_A);
        sim.write(Register::Wspr, WSPR_STOP_B);
        assert!(!sim.is_running());
    }

    #[test]
    fn trigger_reloads_on_change_only() {
        let mut sim = SimRegs::new();
        sim.poke(Register::Wldr, 0xFFFF_0000);
        sim.write(Register::Wtgr, 0);
        assert_eq!(0, sim.reloads());
        sim.write(Register::Wtgr, 1);
        assert_eq!(1, sim.reloads());
        assert_eq!(0xFFFF_0000, sim.value(Register::Wcrr));
    }
}
