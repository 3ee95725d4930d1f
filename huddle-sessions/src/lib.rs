// SPDX-License-Identifier: MIT OR Apache-2.0

//! The personal study log: a stopwatch that accumulates focus time and a
//! repository that persists finished sessions per user.
//!
//! [`Stopwatch`] is a pure accumulation state machine; the caller supplies
//! every instant, so the widget driving it owns the clock. [`SessionLog`]
//! records what the stopwatch measured.

mod log;
mod stopwatch;

pub use log::{SessionError, SessionLog};
pub use stopwatch::Stopwatch;
