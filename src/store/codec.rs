//! Binary wire format for persisted gesture stores
//!
//! Big-endian, versioned:
//!
//! ```text
//! u16  format_version        (currently 1)
//! u32  entry_count
//! per entry:
//!   u16  label byte length, then that many UTF-8 bytes
//!   u32  gesture_count
//!   per gesture:
//!     i64  gesture_id
//!     i32  stroke_count
//!     per stroke:
//!       i32  point_count
//!       per point: f32 x, f32 y, i64 timestamp
//! ```
//!
//! Unknown versions fail with `UnsupportedVersion`; a truncated stream,
//! invalid UTF-8 label, or impossible count fails with `CorruptData`.
//! Reading never partially mutates caller state: the whole stream parses
//! into a scratch map that the caller swaps in on success.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Read, Write};

use crate::model::{Gesture, Stroke, TimedPoint};
use crate::{Error, Result};

/// Version tag written at the head of every persisted store.
pub const FORMAT_VERSION: u16 = 1;

// Pre-allocation is capped so a corrupt count cannot balloon memory;
// vectors still grow to the real size while reading.
const MAX_PREALLOC: usize = 4096;

pub(crate) fn write_store<W: Write + ?Sized>(
    sink: &mut W,
    entries: &BTreeMap<String, Vec<Gesture>>,
) -> Result<()> {
    sink.write_all(&FORMAT_VERSION.to_be_bytes())?;
    sink.write_all(&(entries.len() as u32).to_be_bytes())?;
    for (label, gestures) in entries {
        write_label(sink, label)?;
        sink.write_all(&(gestures.len() as u32).to_be_bytes())?;
        for gesture in gestures {
            write_gesture(sink, gesture)?;
        }
    }
    sink.flush()?;
    Ok(())
}

pub(crate) fn read_store<R: Read + ?Sized>(source: &mut R) -> Result<BTreeMap<String, Vec<Gesture>>> {
    let version = u16::from_be_bytes(read_array(source)?);
    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    let entry_count = u32::from_be_bytes(read_array(source)?) as usize;
    let mut entries = BTreeMap::new();
    for _ in 0..entry_count {
        let label = read_label(source)?;
        let gesture_count = u32::from_be_bytes(read_array(source)?) as usize;
        let mut gestures = Vec::with_capacity(gesture_count.min(MAX_PREALLOC));
        for _ in 0..gesture_count {
            gestures.push(read_gesture(source)?);
        }
        if entries.insert(label.clone(), gestures).is_some() {
            return Err(Error::CorruptData(format!("duplicate label entry `{label}`")));
        }
    }
    Ok(entries)
}

fn write_label<W: Write + ?Sized>(sink: &mut W, label: &str) -> Result<()> {
    let bytes = label.as_bytes();
    if bytes.len() > u16::MAX as usize {
        return Err(Error::InvalidInput(format!(
            "label exceeds {} bytes",
            u16::MAX
        )));
    }
    sink.write_all(&(bytes.len() as u16).to_be_bytes())?;
    sink.write_all(bytes)?;
    Ok(())
}

fn read_label<R: Read + ?Sized>(source: &mut R) -> Result<String> {
    let byte_len = u16::from_be_bytes(read_array(source)?) as usize;
    let mut bytes = vec![0u8; byte_len];
    source.read_exact(&mut bytes).map_err(map_read_error)?;
    String::from_utf8(bytes)
        .map_err(|_| Error::CorruptData("label is not valid UTF-8".to_string()))
}

pub(crate) fn write_gesture<W: Write + ?Sized>(sink: &mut W, gesture: &Gesture) -> Result<()> {
    sink.write_all(&(gesture.id() as i64).to_be_bytes())?;
    sink.write_all(&(gesture.stroke_count() as i32).to_be_bytes())?;
    for stroke in gesture.strokes() {
        write_stroke(sink, stroke)?;
    }
    Ok(())
}

pub(crate) fn read_gesture<R: Read + ?Sized>(source: &mut R) -> Result<Gesture> {
    let id = i64::from_be_bytes(read_array(source)?);
    let stroke_count = i32::from_be_bytes(read_array(source)?);
    if stroke_count < 0 {
        return Err(Error::CorruptData(format!(
            "negative stroke count {stroke_count}"
        )));
    }
    let mut gesture = Gesture::with_id(id as u64);
    for _ in 0..stroke_count {
        gesture.add_stroke(read_stroke(source)?);
    }
    Ok(gesture)
}

pub(crate) fn write_stroke<W: Write + ?Sized>(sink: &mut W, stroke: &Stroke) -> Result<()> {
    sink.write_all(&(stroke.point_count() as i32).to_be_bytes())?;
    for point in stroke.points() {
        sink.write_all(&point.x.to_be_bytes())?;
        sink.write_all(&point.y.to_be_bytes())?;
        sink.write_all(&point.timestamp.to_be_bytes())?;
    }
    Ok(())
}

pub(crate) fn read_stroke<R: Read + ?Sized>(source: &mut R) -> Result<Stroke> {
    let point_count = i32::from_be_bytes(read_array(source)?);
    if point_count <= 0 {
        return Err(Error::CorruptData(format!(
            "stroke with point count {point_count}"
        )));
    }
    let mut points = Vec::with_capacity((point_count as usize).min(MAX_PREALLOC));
    for _ in 0..point_count {
        let x = f32::from_be_bytes(read_array(source)?);
        let y = f32::from_be_bytes(read_array(source)?);
        let timestamp = i64::from_be_bytes(read_array(source)?);
        points.push(TimedPoint::new(x, y, timestamp));
    }
    Stroke::new(points).map_err(|_| Error::CorruptData("stroke with no points".to_string()))
}

fn read_array<R: Read + ?Sized, const N: usize>(source: &mut R) -> Result<[u8; N]> {
    let mut buffer = [0u8; N];
    source.read_exact(&mut buffer).map_err(map_read_error)?;
    Ok(buffer)
}

fn map_read_error(error: std::io::Error) -> Error {
    if error.kind() == ErrorKind::UnexpectedEof {
        Error::CorruptData("truncated stream".to_string())
    } else {
        Error::Io(error)
    }
}
