use serde::{Deserialize, Serialize};

use crate::{LoopTopology, ScrollState};

/// Input reported by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionEvent {
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    /// Absolute strip offset after a direct scroll or drag.
    ManualScroll { offset: f64 },
}

/// Bridges user intent to the scroll state.
///
/// Enter and leave events toggle the pause flag directly with no debouncing;
/// the next frame tick observes the new value.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    last_event: Option<InteractionEvent>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_event(&self) -> Option<InteractionEvent> {
        self.last_event
    }

    /// Applies `event` and reports whether the scroll state changed.
    ///
    /// Manual scroll offsets are ignored when there is no loop to wrap into.
    pub fn apply(
        &mut self,
        event: InteractionEvent,
        state: &mut ScrollState,
        topology: Option<&LoopTopology>,
    ) -> bool {
        self.last_event = Some(event);
        match event {
            InteractionEvent::PointerEnter | InteractionEvent::FocusIn => state.set_paused(true),
            InteractionEvent::PointerLeave | InteractionEvent::FocusOut => {
                state.set_paused(false)
            }
            InteractionEvent::ManualScroll { offset } => match topology {
                Some(topology) => {
                    let before = state.position();
                    state.jump_to(offset, topology);
                    before != state.position()
                }
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_and_focus_toggle_pause() {
        let mut controller = InteractionController::new();
        let mut state = ScrollState::new();

        assert!(controller.apply(InteractionEvent::PointerEnter, &mut state, None));
        assert!(state.is_paused());
        assert!(!controller.apply(InteractionEvent::FocusIn, &mut state, None));
        assert!(controller.apply(InteractionEvent::PointerLeave, &mut state, None));
        assert!(!state.is_paused());
        assert!(!controller.apply(InteractionEvent::FocusOut, &mut state, None));
        assert_eq!(controller.last_event(), Some(InteractionEvent::FocusOut));
    }

    #[test]
    fn manual_scroll_is_rewrapped() {
        let topology = LoopTopology::new(10, 192.0, 16.0).unwrap();
        let mut controller = InteractionController::new();
        let mut state = ScrollState::new();

        let event = InteractionEvent::ManualScroll { offset: 2500.0 };
        assert!(controller.apply(event, &mut state, Some(&topology)));
        assert_eq!(state.position(), 420.0);

        let event = InteractionEvent::ManualScroll { offset: -8.0 };
        controller.apply(event, &mut state, Some(&topology));
        assert_eq!(state.position(), 2072.0);
    }

    #[test]
    fn manual_scroll_without_a_loop_is_ignored() {
        let mut controller = InteractionController::new();
        let mut state = ScrollState::new();
        let event = InteractionEvent::ManualScroll { offset: 50.0 };
        assert!(!controller.apply(event, &mut state, None));
        assert_eq!(state.position(), 0.0);
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let event: InteractionEvent =
            serde_json::from_str(r#"{"kind": "manual_scroll", "offset": 12.5}"#).unwrap();
        assert_eq!(event, InteractionEvent::ManualScroll { offset: 12.5 });
    }
}
