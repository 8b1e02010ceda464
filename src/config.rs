//! Build-time constants and the runtime configuration handed to the driver.

/// WDT2, the watchdog available to the MPU on OMAP34xx/35xx.
pub const WDT_BASE_ADDR: usize = 0x4831_4000;

/// Timeout programmed by `Watchdog::init`.
pub const DEFAULT_TIMEOUT_SECS: u32 = 120;

/// Prescaler exponent. The counter clock is divided by `1 << PTV`.
pub const PTV: u8 = 0;

/// Functional clock of the watchdog counter.
pub const COUNTER_CLOCK_HZ: u32 = 32_768;

/// Counter increments per second after prescaling.
pub const TICK_HZ: u32 = COUNTER_CLOCK_HZ >> PTV;

/// Longest timeout the 32 bit counter can represent at `TICK_HZ`.
pub const MAX_TIMEOUT_SECS: u32 = u32::MAX / TICK_HZ;

/// Spin hints between two polls of a bounded wait, upper limit.
pub const DEFAULT_MAX_BACKOFF: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Seconds(pub u32);

impl Seconds {
    /// The timeout the counter can actually hold: `1..=MAX_TIMEOUT_SECS`.
    pub const fn clamped(self) -> Seconds {
        if self.0 < 1 {
            Seconds(1)
        } else if self.0 > MAX_TIMEOUT_SECS {
            Seconds(MAX_TIMEOUT_SECS)
        } else {
            self
        }
    }
}

impl From<u32> for Seconds {
    fn from(secs: u32) -> Seconds {
        Seconds(secs)
    }
}

/// How long to wait for a posted write to land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollPolicy {
    /// Poll until the pending flag clears, however long that takes.
    ///
    /// This is what the hardware expects. A dead peripheral hangs the caller.
    Unbounded,
    /// Give up after `max_polls` reads of WWPS. Between polls the caller
    /// spins, doubling the spin count up to `max_backoff`.
    Bounded { max_polls: u32, max_backoff: u32 },
}

impl PollPolicy {
    pub const fn bounded(max_polls: u32) -> PollPolicy {
        PollPolicy::Bounded {
            max_polls,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> PollPolicy {
        PollPolicy::Unbounded
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Peripheral base address.
    pub base: usize,
    /// Timeout armed by `Watchdog::init`.
    pub timeout: Seconds,
    pub poll: PollPolicy,
}

impl Config {
    pub const fn new() -> Config {
        Config {
            base: WDT_BASE_ADDR,
            timeout: Seconds(DEFAULT_TIMEOUT_SECS),
            poll: PollPolicy::Unbounded,
        }
    }

    pub const fn with_base(mut self, base: usize) -> Config {
        self.base = base;
        self
    }

    pub const fn with_timeout(mut self, timeout: Seconds) -> Config {
        self.timeout = timeout;
        self
    }

    pub const fn with_poll(mut self, poll: PollPolicy) -> Config {
        self.poll = poll;
        self
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}
