// SPDX-License-Identifier: GPL-3.0-only

//! Everything the window shows, kept free of any widget type.

use std::time::Duration;

use super::{
    registry::{Registry, SlotId},
    ticker::{TickEvent, URGENCY_THRESHOLD_MS},
    totp::{Code, DecodeError, Secret, compute_code},
};
use crate::app::utils::{millis_until_next_step, time_step};

/// Longest secret the manual entry accepts
pub const MANUAL_SECRET_MAX_LEN: usize = 16;

/// Number of ticks a status message stays visible
const STATUS_TICKS: u8 = 2;

/// A registry slot together with its latest code
#[derive(Debug, Clone)]
pub struct SlotView {
    pub id: SlotId,
    pub label: String,
    secret: Secret,
    pub code: Result<Code, DecodeError>,
}

impl SlotView {
    fn refresh(&mut self, step: u64) {
        self.code = compute_code(&self.secret, step);
        if let Err(err) = &self.code {
            log::warn!("no code for {:?}: {err}", self.label);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

#[derive(Debug, Default)]
struct ManualSlot {
    input: String,
    /// Code and the step it was computed for
    code: Option<(Code, u64)>,
}

pub struct Board {
    slots: Vec<SlotView>,
    manual: ManualSlot,
    fallback: Option<Secret>,
    step: u64,
    rest_ms: u64,
    urgent: bool,
    status: Option<(Status, u8)>,
}

impl Board {
    /// Builds the board and computes every slot's code for `now`
    ///
    /// `fallback` is used by [`Board::generate_manual`] when the manual input
    /// is empty; pass `None` to make an empty input an error.
    pub fn new(registry: &Registry, fallback: Option<Secret>, now: Duration) -> Self {
        let step = time_step(now);
        let rest_ms = millis_until_next_step(now);

        let slots = registry
            .iter()
            .map(|slot| {
                let mut view = SlotView {
                    id: slot.id,
                    label: slot.label.clone(),
                    secret: slot.secret.clone(),
                    code: Err(DecodeError::Empty),
                };
                view.refresh(step);
                view
            })
            .collect();

        Self {
            slots,
            manual: ManualSlot::default(),
            fallback,
            step,
            rest_ms,
            urgent: rest_ms <= URGENCY_THRESHOLD_MS,
            status: None,
        }
    }

    /// Recolors on every tick, recomputes the codes only when a refresh is due
    pub fn apply(&mut self, event: &TickEvent) {
        self.urgent = event.urgency;
        self.rest_ms = event.rest_ms;
        self.step = event.time_step;

        if event.refresh_due {
            log::debug!("refreshing {} code(s) for step {}", self.slots.len(), self.step);
            for slot in &mut self.slots {
                slot.refresh(event.time_step);
            }
        }

        if let Some((_, ticks_left)) = &mut self.status {
            *ticks_left = ticks_left.saturating_sub(1);
            if *ticks_left == 0 {
                self.status = None;
            }
        }
    }

    pub fn slots(&self) -> &[SlotView] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&SlotView> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn is_urgent(&self) -> bool {
        self.urgent
    }

    /// Whole seconds left in the current window, rounded up
    pub fn seconds_left(&self) -> u64 {
        self.rest_ms.div_ceil(1_000)
    }

    pub fn manual_input(&self) -> &str {
        &self.manual.input
    }

    /// Replaces the manual input, keeping at most [`MANUAL_SECRET_MAX_LEN`]
    /// non-whitespace characters so grouped secrets fit
    pub fn set_manual_input(&mut self, value: String) {
        let mut symbols = 0;
        self.manual.input = value
            .chars()
            .take_while(|c| {
                if !c.is_whitespace() {
                    symbols += 1;
                }
                symbols <= MANUAL_SECRET_MAX_LEN
            })
            .collect();
    }

    /// Computes a code for the manual input at `step`
    ///
    /// On failure the input and any previous code are cleared, so nothing
    /// wrong stays on screen.
    pub fn generate_manual(&mut self, step: u64) -> Result<Code, DecodeError> {
        let secret = if self.manual.input.trim().is_empty() {
            match &self.fallback {
                Some(fallback) => {
                    self.manual.input = fallback.expose().to_string();
                    fallback.clone()
                }
                None => {
                    self.manual.input.clear();
                    self.manual.code = None;
                    return Err(DecodeError::Empty);
                }
            }
        } else {
            Secret::new(self.manual.input.clone())
        };

        match compute_code(&secret, step) {
            Ok(code) => {
                self.manual.code = Some((code.clone(), step));
                Ok(code)
            }
            Err(err) => {
                self.manual.input.clear();
                self.manual.code = None;
                Err(err)
            }
        }
    }

    pub fn manual_code(&self) -> Option<&Code> {
        self.manual.code.as_ref().map(|(code, _)| code)
    }

    /// The manual code belongs to a window that already ended
    pub fn manual_is_stale(&self) -> bool {
        self.manual
            .code
            .as_ref()
            .is_some_and(|(_, step)| *step < self.step)
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref().map(|(status, _)| status)
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some((status, STATUS_TICKS));
    }
}
