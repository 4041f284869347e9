use crate::paint::Color;
use crate::theme::Theme;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingOptions {
    pub drop_shadows: bool,
    /// Accepted for parity with raster output; vector output ignores it.
    pub antialias: bool,
    pub render_debug_lines: bool,
}

impl Default for RenderingOptions {
    fn default() -> Self {
        Self {
            drop_shadows: true,
            antialias: true,
            render_debug_lines: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub render: RenderingOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    background: Option<Color>,
    default_fill: Option<Color>,
    shadow: Option<Color>,
    debug_grid: Option<Color>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    drop_shadows: Option<bool>,
    antialias: Option<bool>,
    debug_grid: Option<bool>,
    theme: Option<ThemeFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(v) = parsed.drop_shadows {
        config.render.drop_shadows = v;
    }
    if let Some(v) = parsed.antialias {
        config.render.antialias = v;
    }
    if let Some(v) = parsed.debug_grid {
        config.render.render_debug_lines = v;
    }

    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.background {
            config.theme.background = v;
        }
        if let Some(v) = theme.default_fill {
            config.theme.default_fill = v;
        }
        if let Some(v) = theme.shadow {
            config.theme.shadow = v;
        }
        if let Some(v) = theme.debug_grid {
            config.theme.debug_grid = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_shadows_only() {
        let config = load_config(None).unwrap();
        assert!(config.render.drop_shadows);
        assert!(!config.render.render_debug_lines);
        assert_eq!(config.theme, Theme::classic());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = parse_config(
            r##"{"dropShadows": false, "debugGrid": true, "theme": {"shadow": "#202020"}}"##,
        )
        .unwrap();
        assert!(!config.render.drop_shadows);
        assert!(config.render.render_debug_lines);
        assert!(config.render.antialias);
        assert_eq!(config.theme.shadow, Color::gray(0x20));
        assert_eq!(config.theme.default_fill, Color::WHITE);
    }

    #[test]
    fn bad_colors_are_reported() {
        assert!(parse_config(r#"{"theme": {"background": "white"}}"#).is_err());
    }

    #[test]
    fn reads_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"antialias": false}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert!(!config.render.antialias);
    }
}
