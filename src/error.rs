use core::fmt;

use crate::regs::Pending;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A bounded wait ran out of polls with the flag still set. The sequence
    /// that issued the write was abandoned at that point.
    #[error("{pending} write still pending after {polls} polls")]
    WritePending { pending: Pending, polls: u32 },
    #[error("console write failed")]
    Console(#[from] fmt::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
