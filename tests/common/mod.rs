#![allow(dead_code)]

use iconset::{Bitmap, ImageCache, ImageCodec, PngCodec, ResizeScaler, ScaleFilter, Scaler};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

//===========================================================================//

pub fn solid(width: u32, height: u32) -> Bitmap {
    Bitmap::filled(width, height, [40, 80, 120, 255])
}

pub fn colored(width: u32, height: u32, red: u8) -> Bitmap {
    Bitmap::filled(width, height, [red, 0, 0, 255])
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    PngCodec.encode(&solid(width, height), 72).unwrap()
}

//===========================================================================//

/// Scales with nearest-neighbor sampling and records the size of every
/// source bitmap it was handed.
#[derive(Clone, Default)]
pub struct RecordingScaler {
    pub sources: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl RecordingScaler {
    pub fn calls(&self) -> usize {
        self.sources.lock().len()
    }

    pub fn last_source(&self) -> Option<(u32, u32)> {
        self.sources.lock().last().cloned()
    }
}

impl Scaler for RecordingScaler {
    fn scale(&self, bitmap: &Bitmap, width: u32, height: u32) -> Bitmap {
        self.sources.lock().push(bitmap.size());
        ResizeScaler::new(ScaleFilter::Nearest).scale(bitmap, width, height)
    }
}

/// Counts `put` calls and remembers the keys.
#[derive(Default)]
pub struct RecordingCache {
    pub puts: AtomicUsize,
    pub keys: Mutex<Vec<String>>,
}

impl RecordingCache {
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().clone()
    }
}

impl ImageCache for RecordingCache {
    fn put(&self, key: String, _bitmap: Arc<Bitmap>) {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().push(key);
    }
}

//===========================================================================//

/// Builds an ICO file from `(offset, data)` pairs, writing the directory in
/// the order given and filling gaps with `0xee` bytes.
pub fn ico_file(entries: &[(u32, Vec<u8>)]) -> Vec<u8> {
    let mut out = vec![0, 0, 1, 0];
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (offset, data) in entries {
        out.extend_from_slice(&[0u8; 8]);
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
    }
    let mut sorted: Vec<&(u32, Vec<u8>)> = entries.iter().collect();
    sorted.sort_by_key(|(offset, _)| *offset);
    for (offset, data) in sorted {
        assert!(out.len() <= *offset as usize, "test entries overlap");
        out.resize(*offset as usize, 0xee);
        out.extend_from_slice(data);
    }
    out
}

//===========================================================================//
