//! Stroke and gesture data model
//!
//! A [`Stroke`] is one continuous touch-down-to-touch-up path as an ordered
//! list of timed points; a [`Gesture`] is one or more strokes treated as a
//! single recognizable shape. Gesture ids come from an injected
//! [`GestureIdGenerator`] rather than hidden global state.

pub mod gesture;
pub mod point;
pub mod stroke;

pub use gesture::{Gesture, GestureIdGenerator};
pub use point::TimedPoint;
pub use stroke::Stroke;
