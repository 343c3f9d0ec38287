//! YAML configuration loader for themes and UI strings.
use std::sync::{LazyLock, OnceLock};

use serde::Deserialize;
use std::collections::HashMap;

// ============================================================================
// UI Strings Configuration
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UiConfig {
    pub title: String,
    pub subtitle: String,
    pub tree_title: String,
    pub loading_suffix: String,
    pub modal: ModalStrings,
    #[serde(default)]
    pub hints: Vec<KeyHint>,
}

#[derive(Debug, Deserialize)]
pub struct ModalStrings {
    pub title: String,
    pub close_label: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeyHint {
    pub key: String,
    pub label: String,
}

// ============================================================================
// Theme Configuration
// ============================================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ThemesConfig {
    pub themes: HashMap<String, Theme>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

/// RGB color as [r, g, b] array
pub type RgbColor = [u8; 3];

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeColors {
    pub accent: RgbColor,
    pub accent_dim: RgbColor,
    pub warning: RgbColor,
    pub text: RgbColor,
    pub text_secondary: RgbColor,
    pub text_muted: RgbColor,
    pub bg_base: RgbColor,
    pub bg_surface: RgbColor,
    pub bg_elevated: RgbColor,
    pub border: RgbColor,
    pub border_muted: RgbColor,
}

/// Default theme ID
pub const DEFAULT_THEME: &str = "default";

/// Available theme IDs in display order
pub const THEME_ORDER: &[&str] = &["default", "indigo", "paper"];

// ============================================================================
// Loading Functions
// ============================================================================

fn parse_yaml<T: for<'de> Deserialize<'de>>(name: &str, content: &str) -> T {
    serde_yaml::from_str(content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e))
}

// ============================================================================
// Global Configuration (embedded at compile time)
// ============================================================================

pub mod constants;

pub static UI: LazyLock<UiConfig> = LazyLock::new(|| parse_yaml("ui.yaml", include_str!("../../../../yamls/ui.yaml")));
pub static THEMES: LazyLock<ThemesConfig> =
    LazyLock::new(|| parse_yaml("themes.yaml", include_str!("../../../../yamls/themes.yaml")));

/// Get a theme by ID, falling back to default if not found
pub fn get_theme(theme_id: &str) -> &'static Theme {
    THEMES.themes.get(theme_id).or_else(|| THEMES.themes.get(DEFAULT_THEME)).expect("Default theme must exist")
}

// ============================================================================
// Active Theme (chosen once at startup)
// ============================================================================

static ACTIVE_THEME: OnceLock<&'static Theme> = OnceLock::new();

/// Select the theme for this run. Only the first call takes effect; returns
/// whether this one did.
pub fn set_active_theme(theme_id: &str) -> bool {
    ACTIVE_THEME.set(get_theme(theme_id)).is_ok()
}

/// The selected theme, or the default when none was set
pub fn active_theme() -> &'static Theme {
    ACTIVE_THEME.get_or_init(|| get_theme(DEFAULT_THEME))
}

// =============================================================================
// THEME COLORS (loaded from active theme in yamls/themes.yaml)
// =============================================================================

pub mod theme {
    use crate::config::active_theme;
    use ratatui::style::Color;

    fn rgb(c: [u8; 3]) -> Color {
        Color::Rgb(c[0], c[1], c[2])
    }

    pub fn accent() -> Color {
        rgb(active_theme().colors.accent)
    }
    pub fn accent_dim() -> Color {
        rgb(active_theme().colors.accent_dim)
    }
    pub fn warning() -> Color {
        rgb(active_theme().colors.warning)
    }
    pub fn text() -> Color {
        rgb(active_theme().colors.text)
    }
    pub fn text_secondary() -> Color {
        rgb(active_theme().colors.text_secondary)
    }
    pub fn text_muted() -> Color {
        rgb(active_theme().colors.text_muted)
    }
    pub fn bg_base() -> Color {
        rgb(active_theme().colors.bg_base)
    }
    pub fn bg_surface() -> Color {
        rgb(active_theme().colors.bg_surface)
    }
    pub fn bg_elevated() -> Color {
        rgb(active_theme().colors.bg_elevated)
    }
    pub fn border() -> Color {
        rgb(active_theme().colors.border)
    }
    pub fn border_muted() -> Color {
        rgb(active_theme().colors.border_muted)
    }
}

// =============================================================================
// UI CHARACTERS
// =============================================================================

pub mod chars {
    pub const ARROW_RIGHT: &str = "▸";
    pub const ARROW_DOWN: &str = "▾";
    pub const SEPARATOR: &str = "·";
}

// =============================================================================
// UI STRINGS (loaded from yamls/ui.yaml)
// =============================================================================

pub mod strings {
    use crate::config::{KeyHint, UI};

    pub fn title() -> &'static str {
        &UI.title
    }
    pub fn subtitle() -> &'static str {
        &UI.subtitle
    }
    pub fn tree_title() -> &'static str {
        &UI.tree_title
    }
    pub fn loading_suffix() -> &'static str {
        &UI.loading_suffix
    }
    pub fn modal_title() -> &'static str {
        &UI.modal.title
    }
    pub fn modal_close_label() -> &'static str {
        &UI.modal.close_label
    }
    pub fn hints() -> &'static [KeyHint] {
        &UI.hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_themes_parse_and_cover_theme_order() {
        for id in THEME_ORDER {
            assert!(THEMES.themes.contains_key(*id), "theme '{}' missing from themes.yaml", id);
        }
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let fallback = get_theme("does-not-exist");
        assert_eq!(fallback.name, get_theme(DEFAULT_THEME).name);
    }

    #[test]
    fn embedded_ui_strings_parse() {
        assert_eq!(strings::title(), "File Browser");
        assert!(!strings::modal_close_label().is_empty());
        assert!(strings::hints().iter().any(|h| h.key == "q"));
    }

    #[test]
    fn first_selected_theme_sticks() {
        assert!(set_active_theme("indigo"));
        assert!(!set_active_theme("paper"));
        assert_eq!(active_theme().name, get_theme("indigo").name);
    }
}
