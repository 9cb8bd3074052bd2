//! Optional palette overrides loaded from a TOML file.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use garden_snake_rendering::{Color, Theme};
use serde::Deserialize;

const SUPPORTED_THEME_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct ThemeFile {
    version: u32,
    #[serde(default)]
    colors: ThemeColors,
}

#[derive(Debug, Default, Deserialize)]
struct ThemeColors {
    background: Option<String>,
    grid_line: Option<String>,
    snake_head: Option<String>,
    snake_body: Option<String>,
    snake_border: Option<String>,
    food_fill: Option<String>,
    food_border: Option<String>,
    eye: Option<String>,
    pupil: Option<String>,
    hud_text: Option<String>,
}

/// Loads the theme from the provided path, falling back to the default
/// palette when the file is absent. A present but malformed file is an error.
pub fn load_theme(path: &Path) -> Result<Theme> {
    if !path.exists() {
        return Ok(Theme::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read theme file {}", path.display()))?;
    parse_theme(&contents)
}

fn parse_theme(contents: &str) -> Result<Theme> {
    let file: ThemeFile = toml::from_str(contents).context("failed to parse theme toml")?;
    if file.version != SUPPORTED_THEME_VERSION {
        bail!(
            "unsupported theme version {}; expected {}",
            file.version,
            SUPPORTED_THEME_VERSION
        );
    }

    let mut theme = Theme::default();
    apply(&mut theme.background, file.colors.background.as_deref())?;
    apply(&mut theme.grid_line, file.colors.grid_line.as_deref())?;
    apply(&mut theme.snake_head, file.colors.snake_head.as_deref())?;
    apply(&mut theme.snake_body, file.colors.snake_body.as_deref())?;
    apply(&mut theme.snake_border, file.colors.snake_border.as_deref())?;
    apply(&mut theme.food_fill, file.colors.food_fill.as_deref())?;
    apply(&mut theme.food_border, file.colors.food_border.as_deref())?;
    apply(&mut theme.eye, file.colors.eye.as_deref())?;
    apply(&mut theme.pupil, file.colors.pupil.as_deref())?;
    apply(&mut theme.hud_text, file.colors.hud_text.as_deref())?;
    Ok(theme)
}

fn apply(slot: &mut Color, hex: Option<&str>) -> Result<()> {
    if let Some(hex) = hex {
        *slot = parse_hex_color(hex)?;
    }
    Ok(())
}

fn parse_hex_color(hex: &str) -> Result<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    // Byte length alone would let multibyte text through to the slicing below.
    if digits.len() != 6 || !digits.is_ascii() {
        bail!("expected a #rrggbb color, got {hex:?}");
    }

    let channel = |range: std::ops::Range<usize>| -> Result<u8> {
        u8::from_str_radix(&digits[range], 16)
            .with_context(|| format!("invalid hex digits in color {hex:?}"))
    };

    Ok(Color::from_rgb_u8(
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
    ))
}
