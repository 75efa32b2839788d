//! Center-weighted emphasis for the rendered cards.
//!
//! Each card's scale and tilt are a pure function of its circular distance to
//! the viewport center. Because the distance is taken modulo the loop width,
//! a card and its duplicate half a rendered sequence later always agree, and
//! wrapping the scroll position never changes what is on screen.

use serde::{Deserialize, Serialize};

use crate::{config::EmphasisConfig, topology::circular_distance, LoopTopology};

/// Visual emphasis applied to one rendered card for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmphasisValue {
    pub scale: f64,
    /// Tilt in degrees. Negative only when leaning away is enabled and the
    /// card sits left of center.
    pub tilt: f64,
}

/// Derives [`EmphasisValue`]s from the strip geometry and scroll position.
#[derive(Debug, Clone)]
pub struct CenterWeightPresenter {
    topology: LoopTopology,
    config: EmphasisConfig,
}

impl CenterWeightPresenter {
    pub fn new(topology: LoopTopology, config: EmphasisConfig) -> Self {
        Self { topology, config }
    }

    pub fn topology(&self) -> &LoopTopology {
        &self.topology
    }

    pub fn config(&self) -> &EmphasisConfig {
        &self.config
    }

    /// Distance from center at which cards reach baseline emphasis.
    pub fn falloff_window(&self) -> f64 {
        self.topology.unit_width() * self.config.falloff_card_count
    }

    /// Baseline emphasis, also used whenever the geometry is unusable.
    pub fn baseline(&self) -> EmphasisValue {
        EmphasisValue {
            scale: self.config.min_scale,
            tilt: 0.0,
        }
    }

    /// Signed distance from the viewport center to the card's center after
    /// folding it onto the nearest copy of the loop. Positive means right of
    /// center.
    pub fn signed_distance(&self, index: usize, position: f64, viewport_width: f64) -> f64 {
        let container_center = viewport_width / 2.0;
        let raw_offset = self.topology.item_center(index) - position;
        circular_distance(raw_offset, container_center, self.topology.loop_width())
    }

    /// Emphasis for the card at a rendered index.
    pub fn emphasis_at(&self, index: usize, position: f64, viewport_width: f64) -> EmphasisValue {
        self.emphasis_for_distance(self.signed_distance(index, position, viewport_width))
    }

    /// Maps a signed distance from center onto the linear falloff curve.
    pub fn emphasis_for_distance(&self, signed_distance: f64) -> EmphasisValue {
        let distance = signed_distance.abs();
        let window = self.falloff_window();
        if !distance.is_finite() || !window.is_finite() {
            tracing::warn!(signed_distance, window, "emphasis input not finite, using baseline");
            return self.baseline();
        }

        let normalized = if window > 0.0 {
            distance.clamp(0.0, window) / window
        } else if distance == 0.0 {
            0.0
        } else {
            1.0
        };

        let EmphasisConfig {
            min_scale,
            max_scale,
            max_tilt,
            lean_away,
            ..
        } = self.config;

        let scale = max_scale - (max_scale - min_scale) * normalized;
        let mut tilt = max_tilt * normalized;
        if lean_away && signed_distance < 0.0 {
            tilt = -tilt;
        }
        EmphasisValue { scale, tilt }
    }

    /// Emphasis for every card of the rendered sequence, in rendered order.
    pub fn evaluate(&self, position: f64, viewport_width: f64) -> Vec<EmphasisValue> {
        (0..self.topology.item_count() * 2)
            .map(|index| self.emphasis_at(index, position, viewport_width))
            .collect()
    }
}
