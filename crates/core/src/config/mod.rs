use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, ShowcaseError};

/// Top-level configuration structure for the showcase strip.
///
/// Every field has a default, so partial JSON documents such as
/// `{"motion": {"base_speed": 1.0}}` are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub layout: LayoutConfig,
    pub emphasis: EmphasisConfig,
    pub motion: MotionConfig,
}

impl ShowcaseConfig {
    /// Parses a JSON document and validates the result.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Width of one card plus its trailing gap.
    pub fn unit_width(&self) -> f64 {
        self.layout.unit_width()
    }

    /// Distance from the viewport center at which emphasis reaches baseline.
    pub fn falloff_window(&self) -> f64 {
        self.unit_width() * self.emphasis.falloff_card_count
    }

    /// Rejects values that would make the strip meaningless.
    ///
    /// A zero unit width is allowed here: the widget treats it as the
    /// disabled state rather than a configuration error.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.emphasis.validate()?;
        self.motion.validate()
    }
}

/// Fixed layout constants of the strip, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub card_width: f64,
    pub gap: f64,
    /// Initial viewport width; the surface may report a new one via resize.
    pub viewport_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 192.0,
            gap: 16.0,
            viewport_width: 1280.0,
        }
    }
}

impl LayoutConfig {
    pub fn unit_width(&self) -> f64 {
        self.card_width + self.gap
    }

    fn validate(&self) -> Result<()> {
        non_negative("layout.card_width", self.card_width)?;
        non_negative("layout.gap", self.gap)?;
        non_negative("layout.viewport_width", self.viewport_width)
    }
}

/// Shape of the center-weighted emphasis curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Maximum tilt in degrees, reached at the falloff edge.
    pub max_tilt: f64,
    /// Number of unit widths over which emphasis decays to baseline.
    pub falloff_card_count: f64,
    /// Sign the tilt by side of center so cards lean away from it.
    pub lean_away: bool,
}

impl Default for EmphasisConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 1.2,
            max_tilt: 12.0,
            falloff_card_count: 2.5,
            lean_away: false,
        }
    }
}

impl EmphasisConfig {
    fn validate(&self) -> Result<()> {
        non_negative("emphasis.min_scale", self.min_scale)?;
        non_negative("emphasis.max_scale", self.max_scale)?;
        non_negative("emphasis.max_tilt", self.max_tilt)?;
        non_negative("emphasis.falloff_card_count", self.falloff_card_count)?;
        if self.min_scale > self.max_scale {
            return Err(ShowcaseError::invalid(
                "emphasis.min_scale",
                format!(
                    "{} exceeds max_scale {}",
                    self.min_scale, self.max_scale
                ),
            ));
        }
        Ok(())
    }
}

/// Parameters of the breathing auto-scroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Distance advanced per frame at `reference_fps`.
    pub base_speed: f64,
    /// Fraction of `base_speed` added or removed by the sine oscillation.
    pub variance_amplitude: f64,
    /// Angular rate of the oscillation, in radians per millisecond.
    pub time_scale: f64,
    pub reference_fps: f64,
    /// Upper bound on how many reference frames a single tick may cover.
    pub max_frame_catchup: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.5,
            variance_amplitude: 0.3,
            time_scale: 0.001,
            reference_fps: 60.0,
            max_frame_catchup: 4.0,
        }
    }
}

impl MotionConfig {
    /// Duration of one reference frame in milliseconds.
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.reference_fps
    }

    fn validate(&self) -> Result<()> {
        finite("motion.base_speed", self.base_speed)?;
        finite("motion.variance_amplitude", self.variance_amplitude)?;
        finite("motion.time_scale", self.time_scale)?;
        finite("motion.reference_fps", self.reference_fps)?;
        finite("motion.max_frame_catchup", self.max_frame_catchup)?;
        if self.reference_fps <= 0.0 {
            return Err(ShowcaseError::invalid(
                "motion.reference_fps",
                "must be positive",
            ));
        }
        if self.max_frame_catchup < 1.0 {
            return Err(ShowcaseError::invalid(
                "motion.max_frame_catchup",
                "must be at least one frame",
            ));
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ShowcaseError::invalid(field, format!("{value} is not finite")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ShowcaseError::invalid(
            field,
            format!("{value} must not be negative"),
        ));
    }
    Ok(())
}
