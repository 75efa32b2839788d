use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{CenterWeightPresenter, ItemSequencer};

/// Transform the surface should apply to one rendered card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTransform {
    pub index: usize,
    pub label: String,
    /// Left edge of the card relative to the viewport's left edge.
    pub translate_x: f64,
    pub scale: f64,
    pub tilt: f64,
}

/// Everything the surface needs to paint the strip for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripFrame {
    pub timestamp: Option<f64>,
    pub position: f64,
    pub viewport_width: f64,
    pub card_width: f64,
    pub items: Vec<ItemTransform>,
}

impl StripFrame {
    /// Frame for a disabled strip: nothing to paint.
    pub fn empty(viewport_width: f64) -> Self {
        Self {
            timestamp: None,
            position: 0.0,
            viewport_width,
            card_width: 0.0,
            items: Vec::new(),
        }
    }

    pub fn compose(
        sequencer: &ItemSequencer,
        presenter: &CenterWeightPresenter,
        position: f64,
        viewport_width: f64,
        timestamp: Option<f64>,
    ) -> Self {
        let topology = presenter.topology();
        let items = sequencer
            .rendered_sequence()
            .enumerate()
            .map(|(index, item)| {
                let emphasis = presenter.emphasis_at(index, position, viewport_width);
                ItemTransform {
                    index,
                    label: item.label.clone(),
                    translate_x: topology.unit_width() * index as f64 - position,
                    scale: emphasis.scale,
                    tilt: emphasis.tilt,
                }
            })
            .collect();

        Self {
            timestamp,
            position,
            viewport_width,
            card_width: topology.card_width(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The most emphasised card; among equal scales, the one whose on-screen
    /// copy sits closest to the viewport center.
    pub fn focused(&self) -> Option<&ItemTransform> {
        self.items.iter().min_by(|a, b| {
            b.scale
                .total_cmp(&a.scale)
                .then_with(|| self.screen_distance(a).total_cmp(&self.screen_distance(b)))
        })
    }

    fn screen_distance(&self, item: &ItemTransform) -> f64 {
        (item.translate_x + self.card_width / 2.0 - self.viewport_width / 2.0).abs()
    }
}

/// Receives composed frames. The core never draws pixels itself.
pub trait RenderSurface {
    fn present(&mut self, frame: &StripFrame);
}

/// Surface that discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn present(&mut self, _frame: &StripFrame) {}
}

/// Surface that keeps every presented frame. Clones share the same buffer, so
/// one clone can be handed to the widget while another is inspected.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    frames: Rc<RefCell<Vec<StripFrame>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.borrow().is_empty()
    }

    pub fn last(&self) -> Option<StripFrame> {
        self.frames.borrow().last().cloned()
    }

    pub fn frames(&self) -> Vec<StripFrame> {
        self.frames.borrow().clone()
    }

    pub fn clear(&self) {
        self.frames.borrow_mut().clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn present(&mut self, frame: &StripFrame) {
        self.frames.borrow_mut().push(frame.clone());
    }
}

impl fmt::Debug for RecordingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSurface")
            .field("frames", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EmphasisConfig, sequence::solar_catalog, LoopTopology};

    fn compose(position: f64) -> StripFrame {
        let sequencer = ItemSequencer::new(solar_catalog());
        let topology = LoopTopology::new(sequencer.len(), 192.0, 16.0).unwrap();
        let presenter = CenterWeightPresenter::new(topology, EmphasisConfig::default());
        StripFrame::compose(&sequencer, &presenter, position, 1000.0, Some(0.0))
    }

    #[test]
    fn composes_every_rendered_card() {
        let frame = compose(0.0);
        assert_eq!(frame.items.len(), 20);
        assert_eq!(frame.items[0].translate_x, 0.0);
        assert_eq!(frame.items[11].translate_x, 11.0 * 208.0);
        assert_eq!(frame.items[3].label, frame.items[13].label);
    }

    #[test]
    fn focused_card_is_the_visible_centered_copy() {
        // Card 3 is centered at position 220.
        let frame = compose(220.0);
        let focused = frame.focused().unwrap();
        assert_eq!(focused.index, 3);
        assert!((focused.scale - 1.2).abs() < 1e-9);
    }

    #[test]
    fn recording_surface_shares_its_buffer() {
        let recorder = RecordingSurface::new();
        let mut handed_out = recorder.clone();
        handed_out.present(&StripFrame::empty(800.0));

        assert_eq!(recorder.len(), 1);
        assert!(recorder.last().unwrap().is_empty());
        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn null_surface_accepts_frames() {
        let mut surface = NullSurface;
        surface.present(&compose(10.0));
    }

    #[test]
    fn empty_frame_has_no_focus() {
        assert!(StripFrame::empty(800.0).focused().is_none());
    }
}
