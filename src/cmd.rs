//! `wdog` shell command.

use embedded_hal::watchdog::WatchdogDisable;

/// What a command handler reports back to the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmdRet {
    Success,
    Failure,
    /// Bad arguments; the shell prints the command's help.
    Usage,
}

impl CmdRet {
    pub const fn code(self) -> i32 {
        match self {
            CmdRet::Success => 0,
            CmdRet::Failure => 1,
            CmdRet::Usage => -1,
        }
    }
}

/// Command table entry metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CmdInfo {
    pub name: &'static str,
    /// Including the command name itself.
    pub max_args: usize,
    pub repeatable: bool,
    pub usage: &'static str,
    pub help: &'static str,
}

pub const WDOG_CMD: CmdInfo = CmdInfo {
    name: "wdog",
    max_args: 2,
    repeatable: true,
    usage: "Watchdog management",
    help: "wdog off\t\t- disable watchdog",
};

/// Handles `wdog <subcommand>`. `argv[0]` is the command name.
pub fn do_wdog<W>(wdt: &mut W, argv: &[&str]) -> CmdRet
where
    W: WatchdogDisable,
{
    match argv {
        [_, "off"] => {
            wdt.disable();
            CmdRet::Success
        }
        _ => {
            log::debug!("wdog: bad arguments {:?}", argv);
            CmdRet::Usage
        }
    }
}
