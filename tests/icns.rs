mod common;

use common::{png, solid, RecordingCache};
use iconset::{cache_key, icns, IconError, PngCodec, Registry};
use std::io::Write;
use std::sync::Arc;

//===========================================================================//

fn chunk(ostype: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = ostype.to_vec();
    out.extend_from_slice(&(8 + data.len() as u32).to_be_bytes());
    out.extend_from_slice(data);
    out
}

fn icns_file(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = chunks.concat();
    let mut out = b"icns".to_vec();
    out.extend_from_slice(&(8 + body.len() as u32).to_be_bytes());
    out.extend_from_slice(&body);
    out
}

fn sorted(mut sizes: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
    sizes.sort();
    sizes
}

//===========================================================================//

#[test]
fn round_trip_keeps_canonical_sizes() {
    let registry = Registry::new();
    let sizes = [(16, 16), (32, 32), (64, 64), (128, 128), (256, 256), (48, 48), (32, 16)];
    let original = registry.create("source", sizes.iter().map(|&(w, h)| solid(w, h)));
    let mut file = Vec::<u8>::new();
    original.write_icns(&mut file).unwrap();

    let declared = u32::from_be_bytes([file[4], file[5], file[6], file[7]]);
    assert_eq!(declared as usize, file.len());

    let cache = Arc::new(RecordingCache::default());
    let reloaded_registry = Registry::builder().cache(cache.clone()).build();
    let reloaded = reloaded_registry
        .load_icns("copy", file.as_slice())
        .unwrap()
        .expect("no icons decoded");
    assert_eq!(
        sorted(reloaded.sizes()),
        vec![(16, 16), (32, 32), (64, 64), (128, 128), (256, 256)]
    );
    for icon in reloaded.icons() {
        let original_icon = original.icon_no_create(icon.width(), icon.height()).unwrap();
        assert_eq!(icon.rgba_data(), original_icon.rgba_data());
    }
    assert_eq!(cache.puts(), 5);
    assert!(cache.keys().contains(&cache_key("copy", 128, 128)));
}

#[test]
fn chunks_follow_set_order() {
    let registry = Registry::new();
    let icons = registry.create("order", vec![solid(16, 16), solid(1024, 1024), solid(128, 128)]);
    let mut file = Vec::<u8>::new();
    icons.write_icns(&mut file).unwrap();
    let first_len = chunk_len(&file, 8);
    assert_eq!(&file[8..12], b"ic10");
    let second = 8 + first_len;
    assert_eq!(&file[second..second + 4], b"ic07");
    let third = second + chunk_len(&file, second);
    assert_eq!(&file[third..third + 4], b"icp4");
    assert_eq!(third + chunk_len(&file, third), file.len());
}

fn chunk_len(file: &[u8], chunk_start: usize) -> usize {
    let raw = [
        file[chunk_start + 4],
        file[chunk_start + 5],
        file[chunk_start + 6],
        file[chunk_start + 7],
    ];
    u32::from_be_bytes(raw) as usize
}

#[test]
fn retina_and_unknown_chunks() {
    let file = icns_file(&[
        chunk(b"TOC ", &[0u8; 24]),
        chunk(b"ic11", &png(32, 32)),
        chunk(b"info", b"binary plist would go here"),
        chunk(b"ic13", &png(256, 256)),
    ]);
    let registry = Registry::new();
    let icons = registry.load("retina", file.as_slice()).unwrap().unwrap();
    assert_eq!(icons.sizes(), vec![(256, 256), (32, 32)]);
}

#[test]
fn undecodable_images_only_yields_no_set() {
    let file = icns_file(&[chunk(b"ic08", b"not png"), chunk(b"it32", b"rle")]);
    let cache = Arc::new(RecordingCache::default());
    let registry = Registry::builder().cache(cache.clone()).build();
    assert!(registry.load_icns("broken", file.as_slice()).unwrap().is_none());
    assert!(registry.get("broken").is_none());
    assert_eq!(cache.puts(), 0);
}

#[test]
fn failed_load_registers_nothing() {
    let mut file = icns_file(&[chunk(b"icp4", &png(16, 16)), chunk(b"icp5", &png(32, 32))]);
    file.truncate(file.len() - 10);
    let cache = Arc::new(RecordingCache::default());
    let registry = Registry::builder().cache(cache.clone()).build();
    let existing = registry.create("app", vec![solid(8, 8)]);
    let result = registry.load_icns("app", file.as_slice());
    assert!(matches!(result, Err(IconError::Truncated(_))));
    assert!(Arc::ptr_eq(&registry.get("app").unwrap(), &existing));
    assert_eq!(cache.puts(), 0);
}

#[test]
fn bad_magic() {
    let registry = Registry::new();
    let result = registry.load_icns("bad", &b"ICNS\0\0\0\x08"[..]);
    assert!(matches!(result, Err(IconError::Format(_))));
}

#[test]
fn read_and_write_without_registry() {
    let bitmaps = vec![solid(64, 64), solid(30, 30)];
    let mut file = Vec::<u8>::new();
    icns::write_icns(&bitmaps, &PngCodec, &mut file).unwrap();
    let decoded = icns::read_icns(file.as_slice(), &PngCodec).unwrap();
    assert_eq!(decoded, vec![solid(64, 64)]);
}

#[test]
fn load_from_path() {
    let mut temp = tempfile::Builder::new().suffix(".icns").tempfile().unwrap();
    temp.write_all(&icns_file(&[chunk(b"icp6", &png(64, 64))])).unwrap();
    temp.flush().unwrap();
    let registry = Registry::new();
    let icons = registry.load_path("disk", temp.path()).unwrap().unwrap();
    assert_eq!(icons.name(), "disk");
    assert_eq!(icons.sizes(), vec![(64, 64)]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::new();
    let result = registry.load_path("missing", dir.path().join("nope.icns"));
    assert!(matches!(result, Err(IconError::Io(_))));
}

//===========================================================================//
