//! User configuration: scrollbar options, styling and keybindings.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scroll-view-bar/config.toml`
//! (default `~/.config/scroll-view-bar/config.toml`).

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::engine::EngineConfig;
use crate::core::trigger::RefreshTrigger;

// ───────────────────────────────────────── errors ────────────

/// A config line that was understood but rejected.  The default for that
/// key stays in effect.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line {line}: invalid value `{value}` for `{key}`: {reason}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
        reason: String,
    },
    #[error("line {line}: unknown key `{key}`")]
    UnknownKey { line: usize, key: String },
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    ToggleFlag,
    AppendLine,
    PopLine,
    Reload,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::ToggleFlag,
        Action::AppendLine,
        Action::PopLine,
        Action::Reload,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::ToggleFlag => "toggle_flag",
            Action::AppendLine => "append_line",
            Action::PopLine => "pop_line",
            Action::Reload => "reload",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short form for the status bar (e.g. `"Ctrl+r"`, `"↑"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
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
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            // Keep the case of single characters (`G` vs `g`).
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
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── styling ───────────

/// An sRGB colour written as `#rrggbb` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_matches('"');
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err("expected #rrggbb".into());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Where the hover-reveal button sits along the document's right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverPlacement {
    #[default]
    Top,
    Bottom,
}

impl FromStr for HoverPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err("expected `top` or `bottom`".into()),
        }
    }
}

impl fmt::Display for HoverPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Track width in terminal columns (one track pixel per column).
    pub track_width: u16,
    /// Minimum thumb length in track pixels (half rows).
    pub min_thumb: f64,
    pub trigger: RefreshTrigger,
    pub refresh_on_resize: bool,
    pub auto_hide: bool,
    pub hide_delay_ms: u64,
    pub mutation_debounce_ms: u64,
    pub resize_debounce_ms: u64,
    /// Rows scrolled per wheel notch.
    pub wheel_step: f64,
    pub track_color: Rgb,
    pub thumb_color: Rgb,
    pub track_border: bool,
    /// Widest line the thumbnail keeps, in characters.
    pub thumbnail_columns: u32,
    /// Shown in the track while a thumbnail is being captured.
    pub loading_text: String,
    /// Label of the hover-reveal button; `None` disables it.
    pub hover_button: Option<String>,
    pub hover_button_placement: HoverPlacement,
    /// Size the document pane to its content instead of the terminal.
    pub auto_height: bool,
    /// Row cap for the pane in auto-height mode.
    pub auto_height_max: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            track_width: 16,
            min_thumb: 6.0,
            trigger: RefreshTrigger::Always,
            refresh_on_resize: true,
            auto_hide: false,
            hide_delay_ms: 300,
            mutation_debounce_ms: 500,
            resize_debounce_ms: 300,
            wheel_step: 3.0,
            track_color: Rgb([0x1c, 0x1f, 0x26]),
            thumb_color: Rgb([0xc8, 0xd0, 0xe0]),
            track_border: false,
            thumbnail_columns: 120,
            loading_text: "loading".into(),
            hover_button: None,
            hover_button_placement: HoverPlacement::Top,
            auto_height: false,
            auto_height_max: 20,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(
            Action::PageDown,
            vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)],
        );
        m.insert(Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Bottom, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), shift)]);
        m.insert(ToggleFlag, vec![KeyBind::new(Char('r'), n)]);
        m.insert(AppendLine, vec![KeyBind::new(Char('a'), n)]);
        m.insert(PopLine, vec![KeyBind::new(Char('d'), n)]);
        m.insert(Reload, vec![KeyBind::new(Char('R'), shift)]);
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

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        let flag = match self.trigger {
            RefreshTrigger::OnFlag => {
                format!(" | {}: refresh", self.short_binding(Action::ToggleFlag))
            }
            _ => String::new(),
        };
        format!(
            "{}/{}: scroll | {}/{}: add/remove line{} | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::AppendLine),
            self.short_binding(Action::PopLine),
            flag,
            self.short_binding(Action::Quit),
        )
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            track_width: f64::from(self.track_width),
            min_thumb: self.min_thumb,
            trigger: self.trigger,
            refresh_on_resize: self.refresh_on_resize,
            auto_hide: self.auto_hide,
            hide_delay: Duration::from_millis(self.hide_delay_ms),
            mutation_debounce: Duration::from_millis(self.mutation_debounce_ms),
            resize_debounce: Duration::from_millis(self.resize_debounce_ms),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.  Rejected lines are
    /// returned alongside so the caller can report them.
    pub fn load() -> (Self, Vec<ConfigError>) {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(_) => (Self::default(), Vec::new()),
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> (Self, Vec<ConfigError>) {
        let mut cfg = Self::default();
        let mut errors = Vec::new();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            let invalid = |reason: String| ConfigError::InvalidValue {
                line: line_no,
                key: key.to_string(),
                value: value.to_string(),
                reason,
            };

            let result: Result<(), ConfigError> = match key {
                "track_width" => parse_num::<u16>(value)
                    .and_then(|v| {
                        if v == 0 {
                            Err("must be at least 1".into())
                        } else {
                            Ok(v)
                        }
                    })
                    .map(|v| cfg.track_width = v)
                    .map_err(invalid),
                "min_thumb" => parse_num::<f64>(value)
                    .map(|v| cfg.min_thumb = v.max(0.0))
                    .map_err(invalid),
                "trigger" => value
                    .trim_matches('"')
                    .parse::<RefreshTrigger>()
                    .map(|t| cfg.trigger = t)
                    .map_err(|e| invalid(e.to_string())),
                "refresh_on_resize" => parse_bool(value)
                    .map(|v| cfg.refresh_on_resize = v)
                    .map_err(invalid),
                "auto_hide" => parse_bool(value).map(|v| cfg.auto_hide = v).map_err(invalid),
                "hide_delay_ms" => parse_num(value)
                    .map(|v: u64| cfg.hide_delay_ms = v.min(10_000))
                    .map_err(invalid),
                "mutation_debounce_ms" => parse_num(value)
                    .map(|v: u64| cfg.mutation_debounce_ms = v.min(10_000))
                    .map_err(invalid),
                "resize_debounce_ms" => parse_num(value)
                    .map(|v: u64| cfg.resize_debounce_ms = v.min(10_000))
                    .map_err(invalid),
                "wheel_step" => parse_num::<f64>(value)
                    .map(|v| cfg.wheel_step = v.clamp(0.5, 100.0))
                    .map_err(invalid),
                "track_color" => value.parse().map(|c| cfg.track_color = c).map_err(invalid),
                "thumb_color" => value.parse().map(|c| cfg.thumb_color = c).map_err(invalid),
                "track_border" => parse_bool(value).map(|v| cfg.track_border = v).map_err(invalid),
                "thumbnail_columns" => parse_num::<u32>(value)
                    .map(|v| cfg.thumbnail_columns = v.clamp(1, 4096))
                    .map_err(invalid),
                "loading_text" => {
                    cfg.loading_text = value.trim_matches('"').to_string();
                    Ok(())
                }
                "hover_button" => {
                    let label = value.trim_matches('"');
                    cfg.hover_button = (!label.is_empty()).then(|| label.to_string());
                    Ok(())
                }
                "hover_button_placement" => value
                    .parse()
                    .map(|p| cfg.hover_button_placement = p)
                    .map_err(invalid),
                "auto_height" => parse_bool(value).map(|v| cfg.auto_height = v).map_err(invalid),
                "auto_height_max" => parse_num::<u16>(value)
                    .map(|v| cfg.auto_height_max = v.max(1))
                    .map_err(invalid),
                _ => match Action::from_config_key(key) {
                    Some(action) => {
                        let parsed: Vec<KeyBind> = value
                            .split(',')
                            .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                            .collect();
                        if parsed.is_empty() {
                            Err(invalid("no valid key".into()))
                        } else {
                            cfg.bindings.insert(action, parsed);
                            Ok(())
                        }
                    }
                    None => Err(ConfigError::UnknownKey {
                        line: line_no,
                        key: key.to_string(),
                    }),
                },
            };
            if let Err(e) = result {
                errors.push(e);
            }
        }

        (cfg, errors)
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# scroll-view-bar configuration".to_string(),
            String::new(),
            "# Scrollbar".to_string(),
            format!("track_width = {}", self.track_width),
            format!("min_thumb = {}", self.min_thumb),
            "# always | flag | delay:<ms>".to_string(),
            format!("trigger = {}", self.trigger),
            format!("refresh_on_resize = {}", self.refresh_on_resize),
            format!("auto_hide = {}", self.auto_hide),
            format!("hide_delay_ms = {}", self.hide_delay_ms),
            format!("mutation_debounce_ms = {}", self.mutation_debounce_ms),
            format!("resize_debounce_ms = {}", self.resize_debounce_ms),
            format!("wheel_step = {}", self.wheel_step),
            String::new(),
            "# Styling".to_string(),
            format!("track_color = {}", self.track_color),
            format!("thumb_color = {}", self.thumb_color),
            format!("track_border = {}", self.track_border),
            format!("thumbnail_columns = {}", self.thumbnail_columns),
            format!("loading_text = \"{}\"", self.loading_text),
            format!(
                "hover_button = \"{}\"",
                self.hover_button.as_deref().unwrap_or_default()
            ),
            format!("hover_button_placement = {}", self.hover_button_placement),
            String::new(),
            "# Document pane".to_string(),
            format!("auto_height = {}", self.auto_height),
            format!("auto_height_max = {}", self.auto_height_max),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err("expected `true` or `false`".into()),
    }
}

fn parse_num<T>(value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|e| e.to_string())
}

/// `$XDG_CONFIG_HOME/scroll-view-bar/config.toml`.
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scroll-view-bar").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_engine_options_and_styling() {
        let (cfg, errors) = AppConfig::parse_config(
            "# comment\n\
             track_width = 24\n\
             trigger = delay:1500\n\
             auto_hide = true\n\
             hide_delay_ms = 450\n\
             thumb_color = #FF8800\n\
             loading_text = \"capturing…\"\n\
             hover_button = \"≡\"\n\
             hover_button_placement = bottom\n\
             auto_height = true\n\
             auto_height_max = 12\n\
             thumbnail_columns = 80\n",
        );
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(cfg.track_width, 24);
        assert_eq!(cfg.trigger, RefreshTrigger::AfterDelay(Duration::from_millis(1500)));
        assert!(cfg.auto_hide);
        assert_eq!(cfg.thumb_color, Rgb([0xff, 0x88, 0x00]));
        assert_eq!(cfg.loading_text, "capturing…");
        assert_eq!(cfg.hover_button.as_deref(), Some("≡"));
        assert_eq!(cfg.hover_button_placement, HoverPlacement::Bottom);
        assert!(cfg.auto_height);
        assert_eq!(cfg.auto_height_max, 12);
        assert_eq!(cfg.thumbnail_columns, 80);

        let engine = cfg.engine_config();
        assert_eq!(engine.track_width, 24.0);
        assert_eq!(engine.hide_delay, Duration::from_millis(450));
        assert!(engine.auto_hide);
    }

    #[test]
    fn bad_values_keep_defaults_and_are_reported() {
        let (cfg, errors) = AppConfig::parse_config(
            "track_width = 0\ntrigger = sometimes\ntrack_color = blue\nwobble = 1\n",
        );
        assert_eq!(cfg.track_width, AppConfig::default().track_width);
        assert_eq!(cfg.trigger, RefreshTrigger::Always);
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors[3],
            ConfigError::UnknownKey {
                line: 4,
                key: "wobble".into()
            }
        );
    }

    #[test]
    fn bindings_override_defaults() {
        let (cfg, errors) = AppConfig::parse_config("quit = Ctrl+c, x\n");
        assert!(errors.is_empty());
        assert_eq!(
            cfg.match_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(cfg.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)), Some(Action::Quit));
        assert_eq!(cfg.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
        assert_eq!(cfg.match_key(key(KeyCode::Down, KeyModifiers::NONE)), Some(Action::ScrollDown));
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut cfg = AppConfig::default();
        cfg.trigger = RefreshTrigger::OnFlag;
        cfg.hover_button = Some("▶".into());
        cfg.track_border = true;
        let (back, errors) = AppConfig::parse_config(&cfg.serialise());
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(back.trigger, RefreshTrigger::OnFlag);
        assert_eq!(back.hover_button, cfg.hover_button);
        assert!(back.track_border);
        assert_eq!(back.bindings, cfg.bindings);
    }

    #[test]
    fn colours_round_trip_through_hex() {
        let c: Rgb = "#1c1f26".parse().unwrap();
        assert_eq!(c.to_string(), "#1c1f26");
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }
}
