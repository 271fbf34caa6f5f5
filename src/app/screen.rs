// SPDX-License-Identifier: GPL-3.0-only

pub mod codes;

pub use codes::CodesPage;

pub enum Screen {
    Codes(CodesPage),
}
