//! Runtime settings
//!
//! Physics is fixed in `consts`; only session options live here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICK_RATE;

/// Glyph pool for falling collectibles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CharacterSet {
    #[default]
    Default,
    Numbers,
    Hex,
    Binary,
    Japanese,
    /// Also grants flight while up is held
    Math,
}

impl CharacterSet {
    pub const ALL: [CharacterSet; 6] = [
        CharacterSet::Default,
        CharacterSet::Numbers,
        CharacterSet::Hex,
        CharacterSet::Binary,
        CharacterSet::Japanese,
        CharacterSet::Math,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterSet::Default => "default",
            CharacterSet::Numbers => "numbers",
            CharacterSet::Hex => "hex",
            CharacterSet::Binary => "binary",
            CharacterSet::Japanese => "japanese",
            CharacterSet::Math => "math",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(CharacterSet::Default),
            "numbers" | "digits" => Some(CharacterSet::Numbers),
            "hex" => Some(CharacterSet::Hex),
            "binary" => Some(CharacterSet::Binary),
            "japanese" => Some(CharacterSet::Japanese),
            "math" => Some(CharacterSet::Math),
            _ => None,
        }
    }

    /// Number-row mapping used by the UI: 0 resets, 1..=5 pick a set
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(CharacterSet::Default),
            1 => Some(CharacterSet::Numbers),
            2 => Some(CharacterSet::Hex),
            3 => Some(CharacterSet::Binary),
            4 => Some(CharacterSet::Japanese),
            5 => Some(CharacterSet::Math),
            _ => None,
        }
    }

    /// Glyphs a collectible may carry in this mode
    pub fn glyphs(&self) -> &'static [char] {
        const LETTERS: [char; 52] = [
            'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q',
            'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H',
            'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y',
            'Z',
        ];
        const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
        const HEX: [char; 22] = [
            '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'A',
            'B', 'C', 'D', 'E', 'F',
        ];
        const BINARY: [char; 2] = ['0', '1'];
        const KANA: [char; 10] = ['ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ'];
        const MATH: [char; 8] = ['∞', '∑', '∏', 'π', 'Σ', 'Δ', 'ψ', 'Ω'];

        match self {
            CharacterSet::Default => &LETTERS,
            CharacterSet::Numbers => &DIGITS,
            CharacterSet::Hex => &HEX,
            CharacterSet::Binary => &BINARY,
            CharacterSet::Japanese => &KANA,
            CharacterSet::Math => &MATH,
        }
    }

    pub fn allows_flight(&self) -> bool {
        *self == CharacterSet::Math
    }
}

/// Failure to read or parse a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// RNG seed for spawns
    pub seed: u64,
    /// Starting glyph pool
    pub character_set: CharacterSet,
    /// Target ticks per second for paced runs
    pub tick_rate: u32,
    /// Ticks the headless runner simulates
    pub demo_ticks: u64,
    /// Sleep between ticks to hold `tick_rate`
    pub realtime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            character_set: CharacterSet::Default,
            tick_rate: TICK_RATE,
            demo_ticks: 60 * TICK_RATE as u64,
            realtime: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if settings.tick_rate == 0 {
            log::warn!("tick_rate of 0 is not usable, using {}", TICK_RATE);
            settings.tick_rate = TICK_RATE;
        }
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Wall-clock length of one tick for paced runs
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }
}
