//! Periodic positioning model behind the endless strip.
//!
//! The rendered sequence holds every item twice, so any scroll position can
//! be folded back into `[0, loop_width)` without a visible jump.

/// Signed shortest distance from `b` to `a` on a circle of length `period`.
///
/// The result lies in `[-period / 2, period / 2)`. A non-positive or
/// non-finite period leaves the plain difference untouched.
pub fn circular_distance(a: f64, b: f64, period: f64) -> f64 {
    let diff = a - b;
    if !(period.is_finite() && period > 0.0) {
        return diff;
    }
    let wrapped = diff.rem_euclid(period);
    if wrapped >= period / 2.0 {
        wrapped - period
    } else {
        wrapped
    }
}

/// Geometry of one logical period of the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopTopology {
    item_count: usize,
    card_width: f64,
    unit_width: f64,
    loop_width: f64,
}

impl LoopTopology {
    /// Returns `None` when the strip cannot loop: no items, or a unit width
    /// that is not strictly positive.
    pub fn new(item_count: usize, card_width: f64, gap: f64) -> Option<Self> {
        let unit_width = card_width + gap;
        if item_count == 0 || !unit_width.is_finite() || unit_width <= 0.0 {
            return None;
        }
        Some(Self {
            item_count,
            card_width,
            unit_width,
            loop_width: unit_width * item_count as f64,
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn card_width(&self) -> f64 {
        self.card_width
    }

    pub fn unit_width(&self) -> f64 {
        self.unit_width
    }

    pub fn loop_width(&self) -> f64 {
        self.loop_width
    }

    /// Folds any position into `[0, loop_width)`. Non-finite input resets to 0.
    pub fn wrap(&self, position: f64) -> f64 {
        if !position.is_finite() {
            return 0.0;
        }
        let wrapped = position.rem_euclid(self.loop_width);
        // rem_euclid can round up to exactly the period for tiny negatives.
        if wrapped >= self.loop_width {
            0.0
        } else {
            wrapped
        }
    }

    /// Center of the card at a rendered index, measured from the strip start.
    pub fn item_center(&self, index: usize) -> f64 {
        self.unit_width * index as f64 + self.card_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> LoopTopology {
        LoopTopology::new(10, 192.0, 16.0).unwrap()
    }

    #[test]
    fn computes_loop_width() {
        let topology = strip();
        assert_eq!(topology.unit_width(), 208.0);
        assert_eq!(topology.loop_width(), 2080.0);
        assert_eq!(topology.item_center(0), 96.0);
        assert_eq!(topology.item_center(10), 2176.0);
    }

    #[test]
    fn wraps_past_the_period() {
        let topology = strip();
        assert_eq!(topology.wrap(2085.0), 5.0);
        assert_eq!(topology.wrap(2080.0), 0.0);
        assert_eq!(topology.wrap(-5.0), 2075.0);
        assert_eq!(topology.wrap(4165.0), 5.0);
        assert_eq!(topology.wrap(f64::NAN), 0.0);
    }

    #[test]
    fn wrap_stays_in_bounds_for_tiny_negatives() {
        let topology = strip();
        let wrapped = topology.wrap(-1e-18);
        assert!((0.0..topology.loop_width()).contains(&wrapped));
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        assert!(LoopTopology::new(0, 192.0, 16.0).is_none());
        assert!(LoopTopology::new(10, 0.0, 0.0).is_none());
        assert!(LoopTopology::new(10, 10.0, -20.0).is_none());
    }

    #[test]
    fn circular_distance_picks_the_short_way() {
        assert_eq!(circular_distance(10.0, 0.0, 100.0), 10.0);
        assert_eq!(circular_distance(90.0, 0.0, 100.0), -10.0);
        assert_eq!(circular_distance(-90.0, 0.0, 100.0), 10.0);
        assert_eq!(circular_distance(50.0, 0.0, 100.0), -50.0);
        assert_eq!(circular_distance(250.0, 20.0, 100.0), 30.0);
    }

    #[test]
    fn circular_distance_without_period_is_plain_difference() {
        assert_eq!(circular_distance(250.0, 20.0, 0.0), 230.0);
        assert_eq!(circular_distance(250.0, 20.0, f64::NAN), 230.0);
    }
}
