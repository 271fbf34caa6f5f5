// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use arboard::Clipboard;
use iced::{
    Alignment, Element, Font,
    Length::{self},
    Subscription, Theme,
    widget::{Column, button, column, container, row, scrollable, space, text, text_input},
};
use smol::channel::{Receiver, TryRecvError};

use crate::app::{
    core::{Board, Clock, SlotId, SlotView, Status, SystemClock, TickEvent},
    utils::{copy_verified, style, time_step},
};

/// How often the page picks up ticker events
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct CodesPage {
    board: Board,
    ticks: Receiver<TickEvent>,
    clipboard: Option<Clipboard>,
    ticker_gone: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Applies the [`TickEvent`]s received since the last poll, runs on a subscription
    PollTicks,
    /// The manual secret input changed
    UpdateSecret(String),
    /// Compute a code for the manual secret
    Generate,
    /// Copy the manual code to the user clipboard
    CopyManual,
    /// Copy the code of a registry slot to the user clipboard
    CopySlot(SlotId),
}

impl CodesPage {
    pub fn new(board: Board, ticks: Receiver<TickEvent>) -> Self {
        let clipboard = Clipboard::new();
        if let Err(clip_err) = &clipboard {
            log::warn!("clipboard unavailable: {clip_err}");
        }

        Self {
            board,
            ticks,
            clipboard: clipboard.ok(),
            ticker_gone: false,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("Tickcode").size(style::font_size::TITLE),
            text(format!("Codes refresh in {}s", self.board.seconds_left()))
                .size(style::font_size::SMALL)
                .style(style::muted_text),
        ]
        .spacing(style::spacing::TINY);

        let content = column![
            header,
            manual_view(&self.board),
            text("Automatic").size(style::font_size::LARGE),
            slots_view(&self.board),
            status_view(self.board.status()),
        ]
        .spacing(style::spacing::LARGE)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::PollTicks => self.drain_ticks(),
            Message::UpdateSecret(value) => self.board.set_manual_input(value),
            Message::Generate => {
                let step = time_step(SystemClock.now());
                if let Err(err) = self.board.generate_manual(step) {
                    log::warn!("manual secret rejected: {err}");
                    self.board.set_status(Status::Error(format!(
                        "Wrong secret, no code generated ({err})"
                    )));
                }
            }
            Message::CopyManual => {
                let code = self.board.manual_code().map(ToString::to_string);
                self.copy(code);
            }
            Message::CopySlot(id) => {
                let code = self
                    .board
                    .slot(id)
                    .and_then(|slot| slot.code.as_ref().ok())
                    .map(ToString::to_string);
                self.copy(code);
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(POLL_INTERVAL).map(|_| Message::PollTicks)
    }

    fn drain_ticks(&mut self) {
        loop {
            match self.ticks.try_recv() {
                Ok(event) => self.board.apply(&event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Closed) => {
                    if !self.ticker_gone {
                        log::error!("ticker went away, codes are no longer refreshed");
                        self.ticker_gone = true;
                        self.board
                            .set_status(Status::Error("Codes are no longer refreshed".into()));
                    }
                    break;
                }
            }
        }
    }

    fn copy(&mut self, code: Option<String>) {
        let Some(clipboard) = &mut self.clipboard else {
            self.board
                .set_status(Status::Error("Clipboard unavailable".into()));
            return;
        };

        match copy_verified(clipboard, code.as_deref().unwrap_or_default()) {
            Ok(()) => self.board.set_status(Status::Info("Code copied".into())),
            Err(err) => {
                log::warn!("copy failed: {err}");
                self.board
                    .set_status(Status::Error(format!("Copy failed: {err}")));
            }
        }
    }
}

/// Code digits colored by how close the window is to its end
fn code_text<'a>(code: String, urgent: bool) -> Element<'a, Message> {
    text(code)
        .size(style::font_size::HERO)
        .font(Font::MONOSPACE)
        .style(move |theme: &Theme| style::code_text(theme, urgent))
        .into()
}

/// Secret input with its generated code
fn manual_view(board: &Board) -> Element<'_, Message> {
    let code: Element<Message> = match board.manual_code() {
        Some(code) if board.manual_is_stale() => text(code.to_string())
            .size(style::font_size::HERO)
            .font(Font::MONOSPACE)
            .style(style::stale_text)
            .into(),
        Some(code) => code_text(code.to_string(), board.is_urgent()),
        None => text("------")
            .size(style::font_size::HERO)
            .font(Font::MONOSPACE)
            .style(style::muted_text)
            .into(),
    };

    container(
        column![
            text("Manual").size(style::font_size::LARGE),
            row![
                text_input("Base32 secret", board.manual_input())
                    .on_input(Message::UpdateSecret)
                    .on_submit(Message::Generate)
                    .padding(10)
                    .size(style::font_size::BODY),
                button(text("Generate"))
                    .on_press(Message::Generate)
                    .padding(8)
                    .style(style::primary_button),
            ]
            .spacing(style::spacing::SMALL)
            .align_y(Alignment::Center),
            row![
                code,
                space().width(Length::Fill),
                button(text("Copy"))
                    .on_press_maybe(board.manual_code().map(|_| Message::CopyManual))
                    .padding(8)
                    .style(style::secondary_button),
            ]
            .spacing(style::spacing::SMALL)
            .align_y(Alignment::Center),
        ]
        .spacing(style::spacing::MEDIUM),
    )
    .padding(16)
    .style(style::code_card)
    .into()
}

/// One row per configured secret, in configuration order
fn slots_view(board: &Board) -> Element<'_, Message> {
    if board.slots().is_empty() {
        return text("No secrets configured, add them to config.ron")
            .size(style::font_size::BODY)
            .style(style::muted_text)
            .into();
    }

    let list = board.slots().iter().fold(
        Column::new().spacing(style::spacing::MEDIUM),
        |col, slot| col.push(slot_view(slot, board.is_urgent())),
    );

    scrollable(list).height(Length::Fill).into()
}

fn slot_view(slot: &SlotView, urgent: bool) -> Element<'_, Message> {
    let code = match &slot.code {
        Ok(code) => code_text(code.to_string(), urgent),
        Err(err) => text(format!("Wrong secret ({err})"))
            .size(style::font_size::SMALL)
            .style(style::error_text)
            .into(),
    };

    container(
        row![
            text(&slot.label)
                .size(style::font_size::LARGE)
                .width(Length::Fill),
            code,
            button(text("Copy"))
                .on_press_maybe(slot.code.is_ok().then_some(Message::CopySlot(slot.id)))
                .padding(8)
                .style(style::primary_button),
        ]
        .spacing(style::spacing::SMALL)
        .padding(16)
        .align_y(Alignment::Center),
    )
    .style(style::code_card)
    .into()
}

fn status_view(status: Option<&Status>) -> Element<'_, Message> {
    match status {
        Some(Status::Info(message)) => text(message)
            .size(style::font_size::BODY)
            .style(style::info_text)
            .into(),
        Some(Status::Error(message)) => text(message)
            .size(style::font_size::BODY)
            .style(style::error_text)
            .into(),
        None => text("").size(style::font_size::BODY).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::core::{Registry, TickHub};

    fn page(ticks: Receiver<TickEvent>) -> CodesPage {
        let board = Board::new(
            &Registry::default(),
            None,
            Duration::from_secs(1_700_000_010),
        );

        CodesPage {
            board,
            ticks,
            clipboard: None,
            ticker_gone: false,
        }
    }

    #[test]
    fn pending_ticks_are_applied_before_a_closed_ticker_is_reported() {
        let hub = TickHub::new();
        let mut page = page(hub.subscribe());
        hub.publish(TickEvent {
            urgency: true,
            refresh_due: false,
            rest_ms: 4_000,
            time_step: 56_666_667,
        });
        drop(hub);

        page.update(Message::PollTicks);

        assert!(page.board.is_urgent());
        assert_eq!(page.board.seconds_left(), 4);
        assert!(page.ticker_gone);
        assert_eq!(
            page.board.status(),
            Some(&Status::Error("Codes are no longer refreshed".into()))
        );
    }

    #[test]
    fn live_ticker_leaves_status_alone() {
        let hub = TickHub::new();
        let mut page = page(hub.subscribe());

        page.update(Message::PollTicks);

        assert!(!page.ticker_gone);
        assert_eq!(page.board.status(), None);
    }
}
