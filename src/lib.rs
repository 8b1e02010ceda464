//! Boot-time driver for the OMAP 32 kHz watchdog timer.
//!
//! ```ignore
//! let config = Config::default();
//! let mmio = Mmio::take(&config).unwrap();
//! let mut wdt = Watchdog::new(mmio, &config);
//! wdt.init(&mut console)?;
//! // later, from the shell
//! do_wdog(&mut wdt, &["wdog", "off"]);
//! ```
#![cfg_attr(not(test), no_std)]

pub mod cmd;
pub mod config;
pub mod error;
pub mod mmio;
pub mod regs;
pub mod sequencer;
pub mod watchdog;

#[cfg(test)]
mod sim;

pub use crate::cmd::{do_wdog, CmdInfo, CmdRet, WDOG_CMD};
pub use crate::config::{Config, PollPolicy, Seconds};
pub use crate::error::{Error, Result};
pub use crate::mmio::{Mmio, RegisterIo};
pub use crate::sequencer::Sequencer;
pub use crate::watchdog::{State, Watchdog};
