// SPDX-License-Identifier: GPL-3.0-only

use iced::Font;

mod app;
mod config;

const APP_ID: &str = "dev.tickcode.Tickcode";

fn main() -> iced::Result {
    init_logging();

    iced::application(app::Tickcode::new, app::Tickcode::update, app::Tickcode::view)
        .subscription(app::Tickcode::subscription)
        .theme(app::Tickcode::theme)
        .default_font(Font::MONOSPACE)
        .window_size((440., 680.))
        .run()
}

/// `RUST_LOG` takes precedence, otherwise everything from `info` up is shown
fn init_logging() {
    let mut builder = env_logger::Builder::new();

    match std::env::var("RUST_LOG") {
        Ok(filter) => {
            builder.parse_filters(&filter);
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Info);
        }
    }

    builder.init();
    log::debug!("logging initialized");
}
