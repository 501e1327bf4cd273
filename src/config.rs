//! User configuration: list/header settings, key bindings, persistence.
//!
//! Stored as a simple `key = value` text file at
//! `$XDG_CONFIG_HOME/profile-header/config.toml`
//! (default `~/.config/profile-header/config.toml`).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::animation::Easing;

pub const DEFAULT_ITEM_COUNT: usize = 100;
pub const DEFAULT_ANIMATION_MS: u64 = 250;
pub const DEFAULT_SCALE: u16 = 4;
pub const DEFAULT_LABEL: &str = "Mr. X";

const ANIMATION_MS_RANGE: (u64, u64) = (50, 1000);
const SCALE_RANGE: (u16, u16) = (1, 16);
const MAX_ITEMS: usize = 100_000;

// ───────────────────────────────────────── actions ───────────

/// Everything a key can be bound to on the profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    /// Same as pressing the header's menu button.
    ScrollToTop,
    ScrollToBottom,
    ToggleDebug,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::ScrollToTop,
        Action::ScrollToBottom,
        Action::ToggleDebug,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::ScrollToTop => "scroll_to_top",
            Action::ScrollToBottom => "scroll_to_bottom",
            Action::ToggleDebug => "toggle_debug",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A key code plus CTRL/ALT/SHIFT modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

fn modifier_mask() -> KeyModifiers {
    KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Platform modifiers such as SUPER are ignored.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = modifier_mask();
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }
}

/// Config-file form, e.g. `Ctrl+c`, `PageUp`, `k`.
impl fmt::Display for KeyBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(name)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Up => f.write_str("Up"),
            KeyCode::Down => f.write_str("Down"),
            KeyCode::Left => f.write_str("Left"),
            KeyCode::Right => f.write_str("Right"),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Home => f.write_str("Home"),
            KeyCode::End => f.write_str("End"),
            KeyCode::PageUp => f.write_str("PageUp"),
            KeyCode::PageDown => f.write_str("PageDown"),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl FromStr for KeyBind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        let mut parts: Vec<&str> = s.split('+').collect();
        let key = parts.pop().ok_or(())?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(()),
            };
        }

        let code = match key.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.len() > 1 && lower.starts_with('f') => {
                KeyCode::F(lower[1..].parse().map_err(|_| ())?)
            }
            // Single characters keep their case.
            _ if key.chars().count() == 1 => KeyCode::Char(key.chars().next().ok_or(())?),
            _ => return Err(()),
        };

        Ok(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Effective application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Placeholder rows below the header.
    pub item_count: usize,
    /// `false` selects the static header whose decorations never fade.
    pub animate_header: bool,
    /// Length of a full fade in or out.
    pub animation_ms: u64,
    pub easing: Easing,
    /// Layout units per pixel (one pixel is half a terminal row).
    pub scale: u16,
    pub label: String,
    pub show_debug: bool,
    /// Image shown in the avatar circle instead of the placeholder.
    pub avatar: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            item_count: DEFAULT_ITEM_COUNT,
            animate_header: true,
            animation_ms: DEFAULT_ANIMATION_MS,
            easing: Easing::default(),
            scale: DEFAULT_SCALE,
            label: DEFAULT_LABEL.to_string(),
            show_debug: true,
            avatar: None,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        HashMap::from([
            (ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]),
            (ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]),
            (
                Action::PageUp,
                vec![KeyBind::new(KeyCode::PageUp, n), KeyBind::new(Char('u'), ctrl)],
            ),
            (
                Action::PageDown,
                vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char('d'), ctrl)],
            ),
            (
                ScrollToTop,
                vec![
                    KeyBind::new(Home, n),
                    KeyBind::new(Char('g'), n),
                    KeyBind::new(Char('m'), n),
                ],
            ),
            (
                ScrollToBottom,
                vec![KeyBind::new(End, n), KeyBind::new(Char('G'), KeyModifiers::SHIFT)],
            ),
            (ToggleDebug, vec![KeyBind::new(Char('d'), n)]),
            (Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]),
        ])
    }

    /// Action bound to `event`; the binding with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    /// Short key legend for the status line.
    pub fn status_hint(&self) -> String {
        let first = |action: Action| {
            self.bindings
                .get(&action)
                .and_then(|b| b.first())
                .map(|b| b.to_string())
                .unwrap_or_else(|| "?".into())
        };
        format!(
            "{}/{}: scroll | {}: top | {}: debug | {}: quit",
            first(Action::ScrollUp),
            first(Action::ScrollDown),
            first(Action::ScrollToTop),
            first(Action::ToggleDebug),
            first(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not read config; using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Parse config text.  Unknown keys and malformed values are skipped;
    /// numbers are clamped to their valid range.
    pub fn parse(s: &str) -> Self {
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
            let value = value.trim();

            match key {
                "item_count" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.item_count = v.min(MAX_ITEMS);
                    }
                }
                "animate_header" => {
                    if let Ok(v) = value.parse::<bool>() {
                        config.animate_header = v;
                    }
                }
                "animation_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.animation_ms = v.clamp(ANIMATION_MS_RANGE.0, ANIMATION_MS_RANGE.1);
                    }
                }
                "easing" => {
                    if let Some(easing) = Easing::from_config_name(unquote(value)) {
                        config.easing = easing;
                    }
                }
                "scale" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.scale = v.clamp(SCALE_RANGE.0, SCALE_RANGE.1);
                    }
                }
                "label" => config.label = unquote(value).to_string(),
                "show_debug" => {
                    if let Ok(v) = value.parse::<bool>() {
                        config.show_debug = v;
                    }
                }
                "avatar" => {
                    let path = unquote(value);
                    config.avatar = (!path.is_empty()).then(|| PathBuf::from(path));
                }
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        tracing::debug!(key, "ignoring unknown config key");
                        continue;
                    };
                    let parsed: Vec<KeyBind> = value
                        .split(',')
                        .filter_map(|part| part.trim().trim_matches('"').parse().ok())
                        .collect();
                    if !parsed.is_empty() {
                        config.bindings.insert(action, parsed);
                    }
                }
            }
        }

        config
    }

    /// Clamp values that may have come from the command line.
    pub fn normalise(&mut self) {
        self.item_count = self.item_count.min(MAX_ITEMS);
        self.animation_ms = self
            .animation_ms
            .clamp(ANIMATION_MS_RANGE.0, ANIMATION_MS_RANGE.1);
        self.scale = self.scale.clamp(SCALE_RANGE.0, SCALE_RANGE.1);
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# profile-header configuration".to_string(),
            String::new(),
            "# Screen".to_string(),
            format!("item_count = {}", self.item_count),
            format!("animate_header = {}", self.animate_header),
            format!("animation_ms = {}", self.animation_ms),
            format!("easing = \"{}\"", self.easing.config_name()),
            format!("scale = {}", self.scale),
            format!("label = \"{}\"", self.label),
            format!("show_debug = {}", self.show_debug),
        ];
        if let Some(ref avatar) = self.avatar {
            lines.push(format!("avatar = \"{}\"", avatar.display()));
        }
        lines.extend([
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ]);

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// `$XDG_CONFIG_HOME/profile-header/config.toml`.
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("profile-header").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parse_key_binds() {
        assert_eq!(
            "Ctrl+u".parse::<KeyBind>(),
            Ok(KeyBind::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            "pgdn".parse::<KeyBind>(),
            Ok(KeyBind::new(KeyCode::PageDown, KeyModifiers::NONE))
        );
        assert_eq!(
            "F5".parse::<KeyBind>(),
            Ok(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE))
        );
        assert_eq!(
            "G".parse::<KeyBind>(),
            Ok(KeyBind::new(KeyCode::Char('G'), KeyModifiers::NONE))
        );
        assert!("Hyper+x".parse::<KeyBind>().is_err());
        assert!("nonsense".parse::<KeyBind>().is_err());
    }

    #[test]
    fn display_is_parseable() {
        let bind = KeyBind::new(KeyCode::Home, KeyModifiers::ALT);
        assert_eq!(bind.to_string(), "Alt+Home");
        assert_eq!(bind.to_string().parse::<KeyBind>(), Ok(bind));
    }

    #[test]
    fn default_keys_match_actions() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::ScrollDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Action::PageDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('d'), KeyModifiers::NONE)),
            Some(Action::ToggleDebug)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Home, KeyModifiers::NONE)),
            Some(Action::ScrollToTop)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parse_settings_and_clamp() {
        let config = AppConfig::parse(
            "# comment\n\
             item_count = 12\n\
             animate_header = false\n\
             animation_ms = 5\n\
             easing = \"linear\"\n\
             scale = 99\n\
             label = \"Ada\"\n\
             show_debug = false\n\
             avatar = \"/tmp/me.png\"\n\
             quit = x, Ctrl+q\n\
             unknown = 1\n",
        );
        assert_eq!(config.item_count, 12);
        assert!(!config.animate_header);
        assert_eq!(config.animation_ms, 50);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.scale, 16);
        assert_eq!(config.label, "Ada");
        assert!(!config.show_debug);
        assert_eq!(config.avatar, Some(PathBuf::from("/tmp/me.png")));
        assert_eq!(
            config.bindings[&Action::Quit],
            vec![
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            ]
        );
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = AppConfig::parse("item_count = lots\nscale = -1\nscroll_up = ???\n");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = std::env::temp_dir().join(format!("profile-header-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.item_count = 7;
        config.label = "Grace".into();
        config.easing = Easing::Linear;
        config.avatar = Some(PathBuf::from("/srv/avatar.png"));

        config.save_to(&path).expect("save");
        assert_eq!(AppConfig::load_from(&path), config);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn non_boolean_flags_keep_defaults() {
        let config = AppConfig::parse("animate_header = True\nshow_debug = yes\n");
        assert!(config.animate_header);
        assert!(config.show_debug);

        let config = AppConfig::parse("animate_header = false\nshow_debug = false\n");
        assert!(!config.animate_header);
        assert!(!config.show_debug);
    }

    #[test]
    fn quoted_label_survives_save_and_load() {
        let dir = std::env::temp_dir().join(format!("profile-header-quote-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.label = "\"Mr. X\"".into();

        config.save_to(&path).expect("save");
        assert_eq!(AppConfig::load_from(&path).label, "\"Mr. X\"");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("profile-header-does-not-exist/config.toml");
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }
}
