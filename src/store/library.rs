//! Library facade binding a store to a persistence provider

use tracing::info;

use super::provider::PersistenceProvider;
use super::GestureStore;
use crate::classifier::Prediction;
use crate::feature::SequenceType;
use crate::geometry::distance::OrientationStyle;
use crate::model::Gesture;
use crate::Result;

/// A [`GestureStore`] bound to the persistence provider that supplies its
/// byte streams.
///
/// The provider decides where the bytes live (a filesystem path, an
/// embedded read-only resource) while the library exposes the plain
/// add/remove/recognize/save/load surface.
pub struct GestureLibrary<P: PersistenceProvider> {
    provider: P,
    store: GestureStore,
}

impl<P: PersistenceProvider> GestureLibrary<P> {
    pub fn new(
        provider: P,
        orientation_style: OrientationStyle,
        sequence_type: SequenceType,
    ) -> Self {
        Self {
            provider,
            store: GestureStore::new(orientation_style, sequence_type),
        }
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &GestureStore {
        &self.store
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn add_gesture(&self, label: &str, gesture: Gesture) -> Result<()> {
        self.store.add_gesture(label, gesture)
    }

    pub fn remove_gesture(&self, label: &str, gesture_id: u64) -> bool {
        self.store.remove_gesture(label, gesture_id)
    }

    pub fn remove_entry(&self, label: &str) -> bool {
        self.store.remove_entry(label)
    }

    pub fn get_gestures(&self, label: &str) -> Option<Vec<Gesture>> {
        self.store.get_gestures(label)
    }

    pub fn get_gesture_entries(&self) -> Vec<String> {
        self.store.get_gesture_entries()
    }

    pub fn recognize(&self, gesture: &Gesture) -> Result<Vec<Prediction>> {
        self.store.recognize(gesture)
    }

    /// Persist the store if it has unsaved changes. Returns whether bytes
    /// were written. A read-only provider fails with
    /// [`crate::Error::ReadOnlyTarget`] without touching the resource.
    pub fn save(&self) -> Result<bool> {
        self.save_inner(false)
    }

    /// Persist the store even when it is clean.
    pub fn save_forced(&self) -> Result<bool> {
        self.save_inner(true)
    }

    fn save_inner(&self, force: bool) -> Result<bool> {
        if !self.store.has_changed() && !force {
            return Ok(false);
        }
        let mut sink = self.provider.open_sink()?;
        self.store.save(&mut *sink, true)?;
        sink.commit()?;
        info!("gesture library saved");
        Ok(true)
    }

    /// Replace the store's contents from the provider's byte source. A
    /// failed load leaves the current contents untouched.
    pub fn load(&self) -> Result<()> {
        let mut source = self.provider.open_source()?;
        self.store.load(&mut *source)
    }
}
