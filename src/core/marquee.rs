//! Marquee slots — the scrolling section label with a fade between texts.
//!
//! A change runs in three steps per slot: fade out now, swap the text after
//! `fade_out`, drop the fade-in state after a further `fade_in`.  Slots that
//! already show the requested text are left alone.

use std::time::{Duration, Instant};

use super::timer::{PageTimer, TimerQueue};

/// Visual state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadePhase {
    #[default]
    Steady,
    FadingOut,
    FadingIn,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarqueeSlot {
    pub text: String,
    pub phase: FadePhase,
}

#[derive(Debug, Clone)]
pub struct Marquee {
    slots: Vec<MarqueeSlot>,
    fade_out: Duration,
    fade_in: Duration,
}

impl Marquee {
    pub fn new(slot_count: usize, fade_out: Duration, fade_in: Duration) -> Self {
        Self {
            slots: vec![MarqueeSlot::default(); slot_count],
            fade_out,
            fade_in,
        }
    }

    pub fn slots(&self) -> &[MarqueeSlot] {
        &self.slots
    }

    /// Start a transition to `label` on every slot not already showing it.
    pub fn set_text(&mut self, label: &str, now: Instant, timers: &mut TimerQueue<PageTimer>) {
        for (slot, state) in self.slots.iter_mut().enumerate() {
            if state.text == label {
                continue;
            }
            state.phase = FadePhase::FadingOut;
            timers.schedule(
                now + self.fade_out,
                PageTimer::MarqueeSwap {
                    slot,
                    text: label.to_string(),
                },
            );
        }
    }

    /// Fade-out elapsed: swap in the text and begin fading in.  `due_at` is
    /// the swap's own deadline; the fade-in ends `fade_in` after it.
    pub fn swap(
        &mut self,
        slot: usize,
        text: String,
        due_at: Instant,
        timers: &mut TimerQueue<PageTimer>,
    ) {
        let Some(state) = self.slots.get_mut(slot) else {
            return;
        };
        state.text = text;
        state.phase = FadePhase::FadingIn;
        timers.schedule(due_at + self.fade_in, PageTimer::MarqueeSettle { slot });
    }

    /// Fade-in elapsed.
    pub fn settle(&mut self, slot: usize) {
        if let Some(state) = self.slots.get_mut(slot) {
            state.phase = FadePhase::Steady;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn run_due(marquee: &mut Marquee, timers: &mut TimerQueue<PageTimer>, now: Instant) {
        while let Some(due) = timers.pop_due(now) {
            match due.payload {
                PageTimer::MarqueeSwap { slot, text } => marquee.swap(slot, text, due.at, timers),
                PageTimer::MarqueeSettle { slot } => marquee.settle(slot),
                PageTimer::FooterHide => unreachable!(),
            }
        }
    }

    #[test]
    fn transition_runs_fade_out_swap_fade_in() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut marquee = Marquee::new(2, ms(500), ms(1000));

        marquee.set_text("CONTACT ME", t0, &mut timers);
        assert!(marquee.slots().iter().all(|s| s.phase == FadePhase::FadingOut));
        assert!(marquee.slots().iter().all(|s| s.text.is_empty()));

        run_due(&mut marquee, &mut timers, t0 + ms(499));
        assert!(marquee.slots().iter().all(|s| s.phase == FadePhase::FadingOut));

        run_due(&mut marquee, &mut timers, t0 + ms(500));
        assert!(marquee
            .slots()
            .iter()
            .all(|s| s.text == "CONTACT ME" && s.phase == FadePhase::FadingIn));

        run_due(&mut marquee, &mut timers, t0 + ms(1500));
        assert!(marquee.slots().iter().all(|s| s.phase == FadePhase::Steady));
        assert!(timers.is_empty());
    }

    #[test]
    fn slots_already_showing_label_are_untouched() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut marquee = Marquee::new(3, ms(500), ms(1000));
        marquee.set_text("WEB DEVELOPMENT", t0, &mut timers);
        run_due(&mut marquee, &mut timers, t0 + ms(2000));

        marquee.set_text("WEB DEVELOPMENT", t0 + ms(3000), &mut timers);
        assert!(timers.is_empty());
        assert!(marquee.slots().iter().all(|s| s.phase == FadePhase::Steady));
    }

    #[test]
    fn overlapping_transitions_end_on_latest_label() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut marquee = Marquee::new(1, ms(500), ms(1000));

        marquee.set_text("A", t0, &mut timers);
        marquee.set_text("B", t0 + ms(100), &mut timers);
        run_due(&mut marquee, &mut timers, t0 + ms(600));
        run_due(&mut marquee, &mut timers, t0 + ms(2000));

        assert_eq!(marquee.slots()[0].text, "B");
        assert_eq!(marquee.slots()[0].phase, FadePhase::Steady);
    }

    #[test]
    fn late_poll_finishes_the_whole_transition() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut marquee = Marquee::new(2, ms(500), ms(1000));

        marquee.set_text("GAME DEVELOPMENT", t0, &mut timers);
        run_due(&mut marquee, &mut timers, t0 + ms(2000));

        assert!(marquee
            .slots()
            .iter()
            .all(|s| s.text == "GAME DEVELOPMENT" && s.phase == FadePhase::Steady));
        assert!(timers.is_empty());
    }

    #[test]
    fn fade_in_ends_relative_to_swap_deadline() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut marquee = Marquee::new(1, ms(500), ms(1000));

        marquee.set_text("A", t0, &mut timers);
        // Polled 300ms late: the settle still lands at 500 + 1000.
        run_due(&mut marquee, &mut timers, t0 + ms(800));
        assert_eq!(marquee.slots()[0].phase, FadePhase::FadingIn);
        assert_eq!(timers.next_deadline(), Some(t0 + ms(1500)));
    }
}
