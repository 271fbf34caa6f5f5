// SPDX-License-Identifier: GPL-3.0-only

pub mod clipboard;
pub mod style;
mod time;

pub use clipboard::{ClipboardAccess, copy_verified};
pub use time::{millis_until_next_step, step_end_millis, time_step, unix_millis};
