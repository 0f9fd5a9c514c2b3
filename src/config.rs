use crate::{
    animation::fade::FADE_DURATION_MS,
    foundation::error::{TileError, TileResult},
    render::debug::DebugPalette,
};

/// Process-wide tile settings.
///
/// Every field has a default, so a partial (or empty) JSON document is valid input.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TileSettings {
    /// Cross-fade length in milliseconds.
    pub fade_duration_ms: u64,
    /// Display density (pixels per dp) used by the debug indicator.
    pub density: f32,
    /// Draw provenance indicators on every tile.
    pub debug_indicators: bool,
    /// Indicator colours.
    pub palette: DebugPalette,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            fade_duration_ms: FADE_DURATION_MS,
            density: 1.0,
            debug_indicators: false,
            palette: DebugPalette::default(),
        }
    }
}

impl TileSettings {
    /// Parse and validate settings from JSON text.
    pub fn from_json_str(s: &str) -> TileResult<Self> {
        let settings: Self = serde_json::from_str(s)
            .map_err(|e| TileError::config(format!("invalid settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate settings from a JSON reader.
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> TileResult<Self> {
        let settings: Self = serde_json::from_reader(reader)
            .map_err(|e| TileError::config(format!("invalid settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> TileResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TileError::Other(e.into()))
    }

    /// Reject values no tile can work with.
    pub fn validate(&self) -> TileResult<()> {
        if self.fade_duration_ms == 0 {
            return Err(TileError::config("fade_duration_ms must be > 0"));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(TileError::config("density must be finite and > 0"));
        }
        Ok(())
    }

    /// Apply `MEDIA_TILE_FADE_MS`, `MEDIA_TILE_DENSITY` and `MEDIA_TILE_DEBUG` from the process
    /// environment. Unparseable or out-of-range values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// [`Self::with_env_overrides`] against an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(ms) = lookup("MEDIA_TILE_FADE_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            self.fade_duration_ms = ms;
        }
        if let Some(density) = lookup("MEDIA_TILE_DENSITY")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|d| d.is_finite() && *d > 0.0)
        {
            self.density = density;
        }
        if let Some(debug) = lookup("MEDIA_TILE_DEBUG").and_then(|v| parse_flag(&v)) {
            self.debug_indicators = debug;
        }
        self
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
