//! The persistent labeled gesture collection
//!
//! [`GestureStore`] owns the label → gestures mapping, the classifier
//! derived from it, and the extraction configuration. A single lock guards
//! the whole state: every public operation takes it once and releases it on
//! return, which makes the store safe to share between an input thread and
//! a recognition worker.

pub mod codec;
pub mod library;
pub mod provider;

use std::collections::BTreeMap;
use std::io::{Read, Write};

use parking_lot::Mutex;
use tracing::debug;

use crate::classifier::{InstanceClassifier, Prediction};
use crate::feature::{Instance, SequenceType};
use crate::geometry::distance::OrientationStyle;
use crate::model::Gesture;
use crate::{Error, Result};

pub use library::GestureLibrary;
pub use provider::{BytesProvider, CommitSink, FileProvider, PersistenceProvider};

struct StoreInner {
    entries: BTreeMap<String, Vec<Gesture>>,
    classifier: InstanceClassifier,
    orientation_style: OrientationStyle,
    sequence_type: SequenceType,
    dirty: bool,
}

/// Labeled gesture collection with nearest-neighbor recognition and binary
/// persistence.
///
/// Invariant: every stored gesture has exactly one classifier instance with
/// a matching id; removing a gesture removes its instance, and removing the
/// last gesture under a label removes the label entirely.
pub struct GestureStore {
    inner: Mutex<StoreInner>,
}

impl GestureStore {
    pub fn new(orientation_style: OrientationStyle, sequence_type: SequenceType) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                entries: BTreeMap::new(),
                classifier: InstanceClassifier::new(),
                orientation_style,
                sequence_type,
                dirty: false,
            }),
        }
    }

    pub fn orientation_style(&self) -> OrientationStyle {
        self.inner.lock().orientation_style
    }

    pub fn sequence_type(&self) -> SequenceType {
        self.inner.lock().sequence_type
    }

    /// Change the orientation style used for future extraction and
    /// recognition.
    ///
    /// Already-stored instances are not re-extracted: mixing configurations
    /// after instances exist is the caller's responsibility.
    pub fn set_orientation_style(&self, orientation_style: OrientationStyle) {
        self.inner.lock().orientation_style = orientation_style;
    }

    /// Change the sequence type used for future extraction and recognition.
    ///
    /// Already-stored instances are not re-extracted; their vectors will be
    /// skipped during classification if the lengths no longer match.
    pub fn set_sequence_type(&self, sequence_type: SequenceType) {
        self.inner.lock().sequence_type = sequence_type;
    }

    /// Add a labeled example gesture.
    ///
    /// The gesture's feature instance is extracted under the current
    /// configuration. An empty label is rejected with
    /// [`Error::InvalidInput`]; extraction failures (empty gesture,
    /// multi-stroke in sensitive mode) propagate and leave the store
    /// unchanged.
    pub fn add_gesture(&self, label: &str, gesture: Gesture) -> Result<()> {
        if label.is_empty() {
            return Err(Error::InvalidInput("label must not be empty".to_string()));
        }
        let mut inner = self.inner.lock();
        let instance = Instance::from_gesture(
            inner.sequence_type,
            inner.orientation_style,
            &gesture,
            Some(label.to_string()),
        )?;
        inner.classifier.add_instance(instance);
        inner.entries.entry(label.to_string()).or_default().push(gesture);
        inner.dirty = true;
        Ok(())
    }

    /// Remove one gesture (by id) from a label's list, dropping the label
    /// entirely when its list becomes empty. Returns whether a gesture was
    /// removed.
    pub fn remove_gesture(&self, label: &str, gesture_id: u64) -> bool {
        let mut inner = self.inner.lock();
        let Some(gestures) = inner.entries.get_mut(label) else {
            return false;
        };
        let before = gestures.len();
        gestures.retain(|gesture| gesture.id() != gesture_id);
        let removed = gestures.len() < before;
        if removed {
            if gestures.is_empty() {
                inner.entries.remove(label);
            }
            inner.classifier.remove_instance(gesture_id);
            inner.dirty = true;
        }
        removed
    }

    /// Drop a label and every gesture and instance under it. Returns
    /// whether the label existed.
    pub fn remove_entry(&self, label: &str) -> bool {
        let mut inner = self.inner.lock();
        if inner.entries.remove(label).is_none() {
            return false;
        }
        inner.classifier.remove_instances(label);
        inner.dirty = true;
        true
    }

    /// Recognize a gesture against the stored examples, returning ranked
    /// predictions (best first).
    pub fn recognize(&self, gesture: &Gesture) -> Result<Vec<Prediction>> {
        let inner = self.inner.lock();
        let query = Instance::from_gesture(
            inner.sequence_type,
            inner.orientation_style,
            gesture,
            None,
        )?;
        Ok(inner
            .classifier
            .classify(inner.sequence_type, inner.orientation_style, &query.vector))
    }

    /// A copy of the gesture list stored under a label, or `None` if the
    /// label is unknown.
    pub fn get_gestures(&self, label: &str) -> Option<Vec<Gesture>> {
        self.inner.lock().entries.get(label).cloned()
    }

    /// All labels currently stored, in ascending order.
    pub fn get_gesture_entries(&self) -> Vec<String> {
        self.inner.lock().entries.keys().cloned().collect()
    }

    /// Number of labels.
    pub fn entry_count(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Total number of stored gestures across all labels.
    pub fn gesture_count(&self) -> usize {
        self.inner.lock().entries.values().map(Vec::len).sum()
    }

    /// Whether the store has unsaved mutations.
    pub fn has_changed(&self) -> bool {
        self.inner.lock().dirty
    }

    /// Serialize the store to a byte sink.
    ///
    /// A clean store is a no-op success returning `Ok(false)` unless
    /// `force` is set. On success the dirty flag is cleared and `Ok(true)`
    /// is returned.
    pub fn save<W: Write + ?Sized>(&self, sink: &mut W, force: bool) -> Result<bool> {
        let mut inner = self.inner.lock();
        if !inner.dirty && !force {
            return Ok(false);
        }
        codec::write_store(sink, &inner.entries)?;
        inner.dirty = false;
        debug!(
            entries = inner.entries.len(),
            "saved gesture store"
        );
        Ok(true)
    }

    /// Replace the store's contents from a byte source.
    ///
    /// The stream is parsed into a scratch structure and instances are
    /// re-derived under the current configuration before anything is
    /// committed, so a failed load leaves the prior state untouched. A
    /// freshly loaded store is clean.
    pub fn load<R: Read + ?Sized>(&self, source: &mut R) -> Result<()> {
        let entries = codec::read_store(source)?;
        let mut inner = self.inner.lock();
        let mut classifier = InstanceClassifier::new();
        for (label, gestures) in &entries {
            for gesture in gestures {
                let instance = Instance::from_gesture(
                    inner.sequence_type,
                    inner.orientation_style,
                    gesture,
                    Some(label.clone()),
                )?;
                classifier.add_instance(instance);
            }
        }
        debug!(entries = entries.len(), "loaded gesture store");
        inner.entries = entries;
        inner.classifier = classifier;
        inner.dirty = false;
        Ok(())
    }
}
