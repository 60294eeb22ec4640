//! User configuration — keybindings, timings, labels and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::labels::LabelTable;
use crate::core::presenter::ViewOptions;
use crate::error::ConfigError;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollForward,
    ScrollBackward,
    PageForward,
    PageBackward,
    NextSection,
    PrevSection,
    JumpStart,
    JumpEnd,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::ScrollForward,
        Action::ScrollBackward,
        Action::PageForward,
        Action::PageBackward,
        Action::NextSection,
        Action::PrevSection,
        Action::JumpStart,
        Action::JumpEnd,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollForward => "scroll_forward",
            Action::ScrollBackward => "scroll_backward",
            Action::PageForward => "page_forward",
            Action::PageBackward => "page_backward",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::JumpStart => "jump_start",
            Action::JumpEnd => "jump_end",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"→"`, `"Shift+→"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Shift+Right"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Right"`, `"q"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Columns moved per scroll key press / wheel notch.
    pub scroll_step: u16,
    /// Frame interval; detection runs at most once per frame.
    pub frame_ms: u64,
    /// Smooth-scroll damping per frame (see `SmoothScroll`).
    pub smooth_scroll_speed: f64,
    /// Quiet period before the footer hides.
    pub footer_hide_ms: u64,
    pub marquee_fade_out_ms: u64,
    pub marquee_fade_in_ms: u64,
    /// Number of marquee display slots.
    pub marquee_slots: usize,
    /// Label overrides applied on top of the site's own tables.
    pub labels: LabelTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            scroll_step: 4,
            frame_ms: 16,
            smooth_scroll_speed: 0.35,
            footer_hide_ms: 1000,
            marquee_fade_out_ms: 500,
            marquee_fade_in_ms: 1000,
            marquee_slots: 2,
            labels: LabelTable::new(),
        }
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(ScrollForward, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(ScrollBackward, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(PageForward, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(PageBackward, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(NextSection, vec![KeyBind::new(Tab, n), KeyBind::new(Right, shift)]);
        m.insert(PrevSection, vec![KeyBind::new(BackTab, shift), KeyBind::new(Left, shift)]);
        m.insert(JumpStart, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(JumpEnd, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), shift)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the footer).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the footer hint string from current bindings.
    pub fn footer_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: next section | 1-9: jump | {}: quit",
            self.short_binding(Action::ScrollBackward),
            self.short_binding(Action::ScrollForward),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::Quit),
        )
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Timings and slot count for the page surfaces.
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            marquee_slots: self.marquee_slots,
            marquee_fade_out: Duration::from_millis(self.marquee_fade_out_ms),
            marquee_fade_in: Duration::from_millis(self.marquee_fade_in_ms),
            sticky_title: true,
            footer: Some(Duration::from_millis(self.footer_hide_ms)),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from `path` (or the default location), falling back to
    /// defaults when it cannot be read.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map_or_else(config_path, Path::to_path_buf);
        match Self::try_load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    /// Read and parse `path`.  A missing file is not an error.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Self::parse_config(&contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Persist current config to `path` (or the default location).
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = path.map_or_else(config_path, Path::to_path_buf);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&path, self.serialise()).map_err(write_err)?;
        Ok(path)
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if let Some(id) = key.strip_prefix("section.") {
                config.labels.set_section(id, value);
                continue;
            }
            if let Some(id) = key.strip_prefix("subsection.") {
                config.labels.set_subsection(id, value);
                continue;
            }

            match key {
                "scroll_step" => {
                    if let Some(v) = parse_num::<u16>(key, value) {
                        config.scroll_step = v.clamp(1, 40);
                    }
                    continue;
                }
                "frame_ms" => {
                    if let Some(v) = parse_num::<u64>(key, value) {
                        config.frame_ms = v.clamp(4, 100);
                    }
                    continue;
                }
                "smooth_scroll_speed" => {
                    if let Some(v) = parse_num::<f64>(key, value) {
                        config.smooth_scroll_speed = v.clamp(0.05, 0.95);
                    }
                    continue;
                }
                "footer_hide_ms" => {
                    if let Some(v) = parse_num::<u64>(key, value) {
                        config.footer_hide_ms = v.clamp(100, 10_000);
                    }
                    continue;
                }
                "marquee_fade_out_ms" => {
                    if let Some(v) = parse_num::<u64>(key, value) {
                        config.marquee_fade_out_ms = v.min(5000);
                    }
                    continue;
                }
                "marquee_fade_in_ms" => {
                    if let Some(v) = parse_num::<u64>(key, value) {
                        config.marquee_fade_in_ms = v.min(5000);
                    }
                    continue;
                }
                "marquee_slots" => {
                    if let Some(v) = parse_num::<usize>(key, value) {
                        config.marquee_slots = v.min(8);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("ignoring unknown config key {key:?}");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# folio configuration".to_string(),
            String::new(),
            "# Scrolling and timing".to_string(),
            format!("scroll_step = {}", self.scroll_step),
            format!("frame_ms = {}", self.frame_ms),
            format!("smooth_scroll_speed = {}", self.smooth_scroll_speed),
            format!("footer_hide_ms = {}", self.footer_hide_ms),
            format!("marquee_fade_out_ms = {}", self.marquee_fade_out_ms),
            format!("marquee_fade_in_ms = {}", self.marquee_fade_in_ms),
            format!("marquee_slots = {}", self.marquee_slots),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }

        let mut sections: Vec<_> = self.labels.sections().collect();
        let mut subsections: Vec<_> = self.labels.subsections().collect();
        if !sections.is_empty() || !subsections.is_empty() {
            sections.sort_unstable();
            subsections.sort_unstable();
            lines.push(String::new());
            lines.push("# Label overrides".to_string());
            for (id, label) in sections {
                lines.push(format!("section.{id} = {label}"));
            }
            for (id, label) in subsections {
                lines.push(format!("subsection.{id} = {label}"));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        tracing::warn!("config: invalid value {value:?} for {key}, keeping default");
    }
    parsed
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}
