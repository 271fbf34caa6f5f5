// SPDX-License-Identifier: GPL-3.0-only

pub mod board;
pub mod clock;
pub mod hub;
pub mod registry;
pub mod ticker;
pub mod totp;

pub use board::{Board, SlotView, Status};
pub use clock::{Clock, SystemClock};
pub use registry::{Registry, SlotId};
pub use ticker::{TickEvent, TickHub, Ticker, TickerHandle};
pub use totp::Secret;
