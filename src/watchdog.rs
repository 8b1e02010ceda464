use core::fmt;

use embedded_hal::watchdog as hal;

use crate::config::{Config, Seconds};
use crate::error::Result;
use crate::mmio::RegisterIo;
use crate::sequencer::Sequencer;

/// Last state the driver put the timer in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Whatever the reset left behind.
    Unknown,
    Armed,
    Disabled,
}

/// The boot watchdog.
///
/// Armed once during startup by `init`; the `wdog off` command stops it again.
pub struct Watchdog<R> {
    seq: Sequencer<R>,
    timeout: Seconds,
    state: State,
}

/// Renders a timeout the way the boot warning spells it.
struct Countdown(Seconds);

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let secs = (self.0).0;
        match secs {
            60 => f.write_str("1 min"),
            s if s % 60 == 0 => write!(f, "{} mins", s / 60),
            1 => f.write_str("1 sec"),
            s => write!(f, "{} secs", s),
        }
    }
}

impl<R> Watchdog<R>
where
    R: RegisterIo,
{
    pub fn new(io: R, config: &Config) -> Watchdog<R> {
        Watchdog {
            seq: Sequencer::new(io, config.poll),
            timeout: config.timeout.clamped(),
            state: State::Unknown,
        }
    }

    /// Arms the timer with the configured timeout and tells the user about it.
    ///
    /// The warning quotes the timeout as programmed, after clamping.
    pub fn init<W>(&mut self, console: &mut W) -> Result<()>
    where
        W: fmt::Write,
    {
        self.arm(self.timeout)?;

        log::warn!("hardware watchdog armed, {} until reset", Countdown(self.timeout));
        write!(
            console,
            "\nWARNING: HW watchdog resets the system in {}!\n         \
             To disable watchdog issue command 'wdog off'\n\n",
            Countdown(self.timeout)
        )?;
        Ok(())
    }

    /// Arms the timer with `timeout`.
    pub fn arm(&mut self, timeout: Seconds) -> Result<()> {
        self.seq.start(timeout)?;
        self.state = State::Armed;
        Ok(())
    }

    /// Stops the timer.
    ///
    /// Failures are only possible with a bounded poll policy; they are logged
    /// and the state is left untouched.
    pub fn disable(&mut self) {
        match self.seq.disable() {
            Ok(()) => {
                log::info!("hardware watchdog disabled");
                self.state = State::Disabled;
            }
            Err(e) => log::error!("failed to disable watchdog: {}", e),
        }
    }

    /// Restarts the countdown from the loaded timeout.
    pub fn feed(&mut self) {
        if let Err(e) = self.seq.reload() {
            log::error!("failed to feed watchdog: {}", e);
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Timeout armed by `init`, clamped to what the counter can hold.
    pub fn timeout(&self) -> Seconds {
        self.timeout
    }

    pub fn sequencer(&mut self) -> &mut Sequencer<R> {
        &mut self.seq
    }

    pub fn free(self) -> R {
        self.seq.free()
    }
}

impl<R> hal::WatchdogEnable for Watchdog<R>
where
    R: RegisterIo,
{
    type Time = Seconds;

    fn start<T>(&mut self, period: T)
    where
        T: Into<Self::Time>,
    {
        if let Err(e) = self.arm(period.into()) {
            log::error!("failed to arm watchdog: {}", e);
        }
    }
}

impl<R> hal::WatchdogDisable for Watchdog<R>
where
    R: RegisterIo,
{
    fn disable(&mut self) {
        Watchdog::disable(self)
    }
}

impl<R> hal::Watchdog for Watchdog<R>
where
    R: RegisterIo,
{
    fn feed(&mut self) {
        Watchdog::feed(self)
    }
}
