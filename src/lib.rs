//! # Gesture Recognizer
//!
//! A stroke-gesture recognition engine. It accepts freehand stroke input
//! (sequences of timestamped 2D points), stores labeled example gestures,
//! and classifies new input against the stored examples using
//! nearest-neighbor matching over resampled feature vectors.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gesture_recognizer::{
//!     Gesture, GestureIdGenerator, GestureStore, OrientationStyle, SequenceType, Stroke,
//!     TimedPoint,
//! };
//!
//! let ids = GestureIdGenerator::new();
//! let store = GestureStore::new(OrientationStyle::Sensitive2, SequenceType::Sensitive);
//!
//! // Capture a gesture (normally fed in by the UI layer)
//! let mut gesture = Gesture::new(&ids);
//! let stroke = Stroke::new(vec![
//!     TimedPoint::new(0.0, 0.0, 0),
//!     TimedPoint::new(100.0, 0.0, 16),
//! ])
//! .expect("stroke has points");
//! gesture.add_stroke(stroke);
//!
//! store.add_gesture("line", gesture.clone()).expect("added");
//!
//! for prediction in store.recognize(&gesture).expect("recognized") {
//!     println!("{}: {}", prediction.label, prediction.score);
//! }
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`geometry`]: resampling, affine transforms, bounding boxes, distance metrics
//! - [`model`]: timed points, strokes, gestures, and id generation
//! - [`feature`]: feature-vector extraction from gestures
//! - [`classifier`]: nearest-neighbor scoring over labeled instances
//! - [`store`]: the persistent labeled gesture collection and its binary codec
//! - [`app`]: CLI and configuration management
//!
//! ## Recognition Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Capture   │───▶│   Gesture   │───▶│   Feature   │───▶│  Classifier │
//! │  (UI layer) │    │             │    │  Extraction │    │   (1-NN)    │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//!                    ┌─────────────┐                       ┌─────────────┐
//!                    │ GestureStore│◀──── save / load ────▶│ Predictions │
//!                    │  (binary)   │                       │  (ranked)   │
//!                    └─────────────┘                       └─────────────┘
//! ```

pub mod app;
pub mod classifier;
pub mod feature;
pub mod geometry;
pub mod model;
pub mod store;

// Re-export commonly used types
pub use classifier::Prediction;
pub use feature::{Instance, SequenceType};
pub use geometry::OrientationStyle;
pub use model::{Gesture, GestureIdGenerator, Stroke, TimedPoint};
pub use store::{GestureLibrary, GestureStore};

/// Result type alias for the gesture recognizer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the gesture recognizer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller-supplied data is unusable (empty label, empty point list, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A persisted byte stream is malformed or truncated
    #[error("corrupt gesture data: {0}")]
    CorruptData(String),

    /// A persisted stream carries a format version this build does not know
    #[error("unsupported store format version {0}")]
    UnsupportedVersion(u16),

    /// Sequence-sensitive extraction was handed a multi-stroke gesture
    #[error("sequence-sensitive extraction requires a single-stroke gesture, got {0} strokes")]
    UnsupportedMultiStroke(usize),

    /// Save was attempted against a read-only persistence backend
    #[error("persistence target is read-only")]
    ReadOnlyTarget,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error from the underlying byte stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error in the JSON interchange layer
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
