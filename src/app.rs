// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use anywho::anywho;
use iced::{
    Element, Subscription, Task, Theme,
    widget::{center, text},
};

use crate::{APP_ID, config::Config};
use self::core::{Board, Clock, SystemClock, TickHub, Ticker, TickerHandle};
use self::screen::{CodesPage, Screen};
use self::utils::style;

pub mod core;
pub mod screen;
pub mod utils;

pub struct Tickcode {
    state: State,
}

enum State {
    Loading,
    Ready {
        screen: Screen,
        /// Stops the ticker thread once the app goes away
        _ticker: TickerHandle,
    },
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Callback after loading the [`Config`], starts the ticker if Ok
    ConfigLoaded(Result<Config, anywho::Error>),
    /// Messages of the [`CodesPage`]
    Codes(screen::codes::Message),
}

impl Tickcode {
    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                state: State::Loading,
            },
            Task::perform(Config::load(APP_ID), Message::ConfigLoaded),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ConfigLoaded(result) => {
                self.state = match result.and_then(start) {
                    Ok((screen, ticker)) => State::Ready {
                        screen,
                        _ticker: ticker,
                    },
                    Err(err) => {
                        log::error!("{err}");
                        State::Failed(err.to_string())
                    }
                };

                Task::none()
            }
            Message::Codes(message) => {
                let State::Ready { screen, .. } = &mut self.state else {
                    return Task::none();
                };
                let Screen::Codes(page) = screen;

                page.update(message);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.state {
            State::Loading => center(text("Loading...")).into(),
            State::Failed(err) => center(text(err).style(style::error_text)).into(),
            State::Ready { screen, .. } => match screen {
                Screen::Codes(page) => page.view().map(Message::Codes),
            },
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let State::Ready { screen, .. } = &self.state else {
            return Subscription::none();
        };

        match screen {
            Screen::Codes(page) => page.subscription().map(Message::Codes),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::CatppuccinMocha
    }
}

/// Spawns the ticker and builds the codes page on top of it
fn start(config: Config) -> Result<(Screen, TickerHandle), anywho::Error> {
    let hub = Arc::new(TickHub::new());
    // subscribe before spawning so the first tick can't be missed
    let ticks = hub.subscribe();

    let ticker = Ticker::new(hub)
        .spawn()
        .map_err(|e| anywho!("Failed to start the ticker: {}", e))?;

    let registry = config.registry();
    log::info!("showing {} configured code(s)", registry.len());
    let board = Board::new(&registry, config.fallback(), SystemClock.now());

    Ok((Screen::Codes(CodesPage::new(board, ticks)), ticker))
}
