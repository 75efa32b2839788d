//! Core library for the solar category showcase.
//!
//! The showcase is an endless strip of category cards that scrolls on its
//! own, pauses on hover or focus, and enlarges whichever card passes the
//! middle of the viewport. Each module owns one piece of that widget:
//! item sequencing, the periodic scroll topology, the emphasis curve, frame
//! scheduling and the animation driver, user interaction, and the boundary
//! to whatever surface actually paints the cards.

pub mod config;
pub mod emphasis;
pub mod error;
pub mod interaction;
pub mod render;
pub mod sequence;
pub mod showcase;
pub mod timeline;
pub mod topology;

pub use config::{EmphasisConfig, LayoutConfig, MotionConfig, ShowcaseConfig};
pub use emphasis::{CenterWeightPresenter, EmphasisValue};
pub use error::{Result, ShowcaseError};
pub use interaction::{InteractionController, InteractionEvent};
pub use render::{ItemTransform, NullSurface, RecordingSurface, RenderSurface, StripFrame};
pub use sequence::{solar_catalog, DisplayItem, ItemSequencer};
pub use showcase::Showcase;
pub use timeline::{
    AnimationDriver, FrameClock, FrameHandle, FrameLoop, FrameTiming, ScrollState, TickOutcome,
    WeakFrameLoop,
};
pub use topology::{circular_distance, LoopTopology};
