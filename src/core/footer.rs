//! Floating footer: shown on scroll, hidden after a quiet period.

use std::time::{Duration, Instant};

use super::timer::{PageTimer, TimerId, TimerQueue};

#[derive(Debug, Clone)]
pub struct FooterController {
    visible: bool,
    hide_after: Duration,
    countdown: Option<TimerId>,
}

impl FooterController {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            visible: true,
            hide_after,
            countdown: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show immediately and restart the countdown; the last scroll wins.
    pub fn on_scroll(&mut self, now: Instant, timers: &mut TimerQueue<PageTimer>) {
        self.visible = true;
        if let Some(id) = self.countdown.take() {
            timers.cancel(id);
        }
        self.countdown = Some(timers.schedule(now + self.hide_after, PageTimer::FooterHide));
    }

    /// Countdown elapsed.  Returns `true` if this changed the visibility.
    pub fn on_hide(&mut self, id: TimerId) -> bool {
        if self.countdown != Some(id) {
            return false;
        }
        self.countdown = None;
        std::mem::replace(&mut self.visible, false)
    }
}
