//! Save/load round trips, version gating, and provider behavior.

use gesture_recognizer::store::{BytesProvider, FileProvider, GestureLibrary};
use gesture_recognizer::{
    Error, Gesture, GestureStore, OrientationStyle, SequenceType, Stroke, TimedPoint,
};

fn gesture_from_points(id: u64, points: &[(f32, f32)]) -> Gesture {
    let timed: Vec<TimedPoint> = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| TimedPoint::new(x, y, 1_000 + i as i64 * 16))
        .collect();
    let mut gesture = Gesture::with_id(id);
    gesture.add_stroke(Stroke::new(timed).unwrap());
    gesture
}

fn populated_store() -> GestureStore {
    // Two labels, three gestures
    let store = GestureStore::new(OrientationStyle::Sensitive2, SequenceType::Sensitive);
    store
        .add_gesture("line", gesture_from_points(1, &[(0.0, 0.0), (100.0, 0.0)]))
        .unwrap();
    store
        .add_gesture("line", gesture_from_points(2, &[(0.0, 5.0), (100.0, 5.0)]))
        .unwrap();
    store
        .add_gesture(
            "hook",
            gesture_from_points(3, &[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)]),
        )
        .unwrap();
    store
}

#[test]
fn save_then_load_preserves_labels_ids_and_points() {
    let source = populated_store();
    let mut buffer = Vec::new();
    assert!(source.save(&mut buffer, false).unwrap());

    let target = GestureStore::new(OrientationStyle::Sensitive2, SequenceType::Sensitive);
    target.load(&mut buffer.as_slice()).unwrap();

    assert_eq!(
        target.get_gesture_entries(),
        vec!["hook".to_string(), "line".to_string()]
    );
    for label in ["line", "hook"] {
        let original = source.get_gestures(label).unwrap();
        let loaded = target.get_gestures(label).unwrap();
        assert_eq!(original.len(), loaded.len());
        for (a, b) in original.iter().zip(loaded.iter()) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.stroke_count(), b.stroke_count());
            for (sa, sb) in a.strokes().iter().zip(b.strokes().iter()) {
                assert_eq!(sa.points(), sb.points());
            }
        }
    }
}

#[test]
fn loaded_store_recognizes_like_the_original() {
    let source = populated_store();
    let mut buffer = Vec::new();
    source.save(&mut buffer, false).unwrap();

    let target = GestureStore::new(OrientationStyle::Sensitive2, SequenceType::Sensitive);
    target.load(&mut buffer.as_slice()).unwrap();

    let query = gesture_from_points(9, &[(0.0, 0.0), (100.0, 2.0)]);
    let original = source.recognize(&query).unwrap();
    let reloaded = target.recognize(&query).unwrap();
    assert_eq!(original.len(), reloaded.len());
    assert_eq!(original[0].label, reloaded[0].label);
}

#[test]
fn unknown_version_fails_and_preserves_existing_state() {
    let store = populated_store();
    let gesture_count = store.gesture_count();

    let mut bytes = vec![0xFFu8, 0xFF];
    bytes.extend_from_slice(&0u32.to_be_bytes());

    let result = store.load(&mut bytes.as_slice());
    assert!(matches!(result, Err(Error::UnsupportedVersion(0xFFFF))));
    assert_eq!(store.gesture_count(), gesture_count);
    assert_eq!(
        store.get_gesture_entries(),
        vec!["hook".to_string(), "line".to_string()]
    );
}

#[test]
fn truncated_stream_fails_and_preserves_existing_state() {
    let source = populated_store();
    let mut buffer = Vec::new();
    source.save(&mut buffer, false).unwrap();
    buffer.truncate(buffer.len() - 7);

    let target = populated_store();
    let result = target.load(&mut buffer.as_slice());
    assert!(matches!(result, Err(Error::CorruptData(_))));
    assert_eq!(target.gesture_count(), 3);
}

#[test]
fn file_library_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gestures.bin");

    let library = GestureLibrary::new(
        FileProvider::new(&path),
        OrientationStyle::Sensitive2,
        SequenceType::Sensitive,
    );
    library
        .add_gesture("line", gesture_from_points(1, &[(0.0, 0.0), (100.0, 0.0)]))
        .unwrap();
    library
        .add_gesture("hook", gesture_from_points(2, &[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)]))
        .unwrap();
    assert!(library.save().unwrap());
    assert!(!library.store().has_changed());

    let fresh = GestureLibrary::new(
        FileProvider::new(&path),
        OrientationStyle::Sensitive2,
        SequenceType::Sensitive,
    );
    fresh.load().unwrap();
    assert_eq!(
        fresh.get_gesture_entries(),
        vec!["hook".to_string(), "line".to_string()]
    );
    let predictions = fresh
        .recognize(&gesture_from_points(9, &[(0.0, 0.0), (100.0, 1.0)]))
        .unwrap();
    assert_eq!(predictions[0].label, "line");
}

#[test]
fn file_library_save_skips_when_clean() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gestures.bin");

    let library = GestureLibrary::new(
        FileProvider::new(&path),
        OrientationStyle::Sensitive2,
        SequenceType::Sensitive,
    );
    library
        .add_gesture("line", gesture_from_points(1, &[(0.0, 0.0), (100.0, 0.0)]))
        .unwrap();
    assert!(library.save().unwrap());
    let first_mtime = std::fs::metadata(&path).unwrap().modified().unwrap();

    // Nothing changed: save must not rewrite the file
    assert!(!library.save().unwrap());
    let second_mtime = std::fs::metadata(&path).unwrap().modified().unwrap();
    assert_eq!(first_mtime, second_mtime);
}

#[test]
fn read_only_library_loads_but_never_saves() {
    let seed = {
        let store = populated_store();
        let mut buffer = Vec::new();
        store.save(&mut buffer, false).unwrap();
        buffer
    };

    let library = GestureLibrary::new(
        BytesProvider::new(seed),
        OrientationStyle::Sensitive2,
        SequenceType::Sensitive,
    );
    library.load().unwrap();
    assert_eq!(library.get_gesture_entries().len(), 2);

    library
        .add_gesture("extra", gesture_from_points(9, &[(0.0, 0.0), (10.0, 10.0)]))
        .unwrap();
    assert!(matches!(library.save(), Err(Error::ReadOnlyTarget)));

    // The in-memory state survives the rejected save
    assert_eq!(library.get_gesture_entries().len(), 3);
}

#[test]
fn load_reextracts_under_current_configuration() {
    // Saved from a sensitive store, loaded into an invariant store: the
    // gestures survive and recognition works with 256-float rasters
    let source = populated_store();
    let mut buffer = Vec::new();
    source.save(&mut buffer, false).unwrap();

    let target = GestureStore::new(OrientationStyle::Sensitive2, SequenceType::Invariant);
    target.load(&mut buffer.as_slice()).unwrap();

    let query = gesture_from_points(9, &[(0.0, 0.0), (100.0, 0.0)]);
    let predictions = target.recognize(&query).unwrap();
    assert_eq!(predictions[0].label, "line");
}
