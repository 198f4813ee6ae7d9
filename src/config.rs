use crate::error::ConfigError;
use crate::grid::Bounds;
use crate::snake::INITIAL_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Game settings. Every field has a default, so a config file only needs the
/// entries it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board_width: i32,
    pub board_height: i32,
    pub unit_size: i32,
    pub tick_ms: u64,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self { board_width: 500, board_height: 500, unit_size: 25, tick_ms: 75, palette: Palette::default() }
    }
}

/// Colors as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub snake: String,
    pub snake_border: String,
    pub food: String,
    pub text: String,
    pub hud: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".into(),
            snake: "#2AB573".into(),
            snake_border: "#000000".into(),
            food: "#FF0000".into(),
            text: "#000000".into(),
            hud: "#F0F0F0".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn parse(field: &'static str, value: &str) -> Result<Rgb, ConfigError> {
        let bad = || ConfigError::Color { field, value: value.to_string() };
        let hex = value.strip_prefix('#').ok_or_else(bad)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Palette with every entry parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    pub background: Rgb,
    pub snake: Rgb,
    pub snake_border: Rgb,
    pub food: Rgb,
    pub text: Rgb,
    pub hud: Rgb,
}

impl Palette {
    pub fn resolve(&self) -> Result<Colors, ConfigError> {
        Ok(Colors {
            background: Rgb::parse("background", &self.background)?,
            snake: Rgb::parse("snake", &self.snake)?,
            snake_border: Rgb::parse("snake_border", &self.snake_border)?,
            food: Rgb::parse("food", &self.food)?,
            text: Rgb::parse("text", &self.text)?,
            hud: Rgb::parse("hud", &self.hud)?,
        })
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = self.unit_size;
        if unit <= 0 {
            return Err(ConfigError::Invalid(format!("unit_size must be positive, got {unit}")));
        }
        for (name, value) in [("board_width", self.board_width), ("board_height", self.board_height)] {
            if value <= 0 || value % unit != 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive multiple of unit_size ({unit}), got {value}"
                )));
            }
        }
        // The starting snake spans columns 0..=4 on the top row.
        let min_columns = INITIAL_LENGTH as i32 + 1;
        if self.board_width / unit < min_columns {
            return Err(ConfigError::Invalid(format!(
                "board must be at least {min_columns} cells wide, got {}",
                self.board_width / unit
            )));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be at least 1".into()));
        }
        self.palette.resolve()?;
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.board_width, self.board_height, self.unit_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
