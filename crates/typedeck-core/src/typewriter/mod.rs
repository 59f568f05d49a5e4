//! Typewriter animation engine.
//!
//! - `lines` - line payload parsing and the last-login substitution
//! - `pace` - speed/delay profiles and per-block resolution
//! - `render` - pure projection from progress counters to visible text
//! - `machine` - the per-instance step state machine

pub mod lines;
pub mod machine;
pub mod pace;
pub mod render;

pub use machine::{StepOutcome, Typewriter};
pub use pace::Pace;
