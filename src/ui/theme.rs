//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::marquee::FadePhase;

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page ───────────────────────────────────────────────────
    pub fn slide_border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn slide_title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn card_border_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn card_title_style(focused: bool) -> Style {
        let style = Style::default().fg(Color::Cyan);
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_style(active: bool) -> Style {
        if active {
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn marquee_style(phase: FadePhase) -> Style {
        match phase {
            FadePhase::Steady => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            FadePhase::FadingOut => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            FadePhase::FadingIn => Style::default().fg(Color::Yellow),
        }
    }

    pub fn sticky_title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
