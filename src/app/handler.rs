//! Input handling — maps key/mouse events to scroll movements.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::ui::chrome::nav_hit_test;

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // Digits jump to nav links (1-based), independent of bindings.
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            let index = c as usize - '1' as usize;
            state.follow_nav(index);
            return;
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let step = state.config.scroll_step as f64;
    let page = state.page.viewport() as f64;

    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollForward => state.scroll_by(step, now),
        Action::ScrollBackward => state.scroll_by(-step, now),
        Action::PageForward => state.scroll_by(page, now),
        Action::PageBackward => state.scroll_by(-page, now),
        Action::NextSection => {
            let next = state.controller.active_index().map_or(0, |i| i + 1);
            let last = state.controller.layout().len().saturating_sub(1);
            state.glide_to_slide(next.min(last));
        }
        Action::PrevSection => {
            let prev = state
                .controller
                .active_index()
                .map_or(0, |i| i.saturating_sub(1));
            state.glide_to_slide(prev);
        }
        Action::JumpStart => state.glide_to(0.0),
        Action::JumpEnd => state.glide_to(state.page.max_offset()),
    }
}

/// Process a mouse event.  The vertical wheel scrolls the page sideways.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    let step = state.config.scroll_step as f64;
    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => state.scroll_by(step, now),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => state.scroll_by(-step, now),
        MouseEventKind::Down(MouseButton::Left) => {
            let hit = nav_hit_test(
                state.layout.nav_area,
                &state.controller.view().nav,
                mouse.column,
                mouse.row,
            );
            if let Some(index) = hit {
                state.follow_nav(index);
            }
        }
        _ => {}
    }
}
