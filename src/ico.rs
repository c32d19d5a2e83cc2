//! Reading Windows icon (.ico) containers whose images are embedded PNGs.

use crate::bitmap::Bitmap;
use crate::codec::ImageCodec;
use crate::error::Result;
use crate::restype::ResourceType;
use crate::stream::{read_payload, skip_exact};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

//===========================================================================//

// The size of the ICONDIR header, in bytes.
const ICONDIR_LENGTH: u64 = 6;

// The size of one ICONDIRENTRY struct, in bytes.
const ICONDIRENTRY_LENGTH: usize = 16;

// Where the data size and data offset live within an ICONDIRENTRY.
const ENTRY_SPAN_OFFSET: usize = 8;

//===========================================================================//

#[derive(Clone, Copy, Debug)]
struct DataSpan {
    index: usize,
    size: u32,
    offset: u32,
}

//===========================================================================//

/// Reads an ICO container and decodes each embedded image, in ascending
/// order of file offset.  Entries that fail to decode (such as legacy BMP
/// entries) are skipped, as are entries whose data starts before the end of
/// data already read.  An empty list means the container was well-formed
/// but held no usable images.
///
/// The stream is read strictly front to back; the declared width, height,
/// and color depth of each directory entry are ignored in favor of the
/// decoded image's actual dimensions.
pub fn read_ico<R: Read>(mut reader: R, codec: &dyn ImageCodec) -> Result<Vec<Bitmap>> {
    let reserved = reader.read_u16::<LittleEndian>()?;
    if reserved != 0 {
        invalid_format!(
            "Invalid reserved field value in ICONDIR \
             (was {}, but must be 0)",
            reserved
        );
    }
    let restype = reader.read_u16::<LittleEndian>()?;
    match ResourceType::from_number(restype) {
        Some(ResourceType::Icon) => {}
        Some(ResourceType::Cursor) => {
            invalid_format!("CUR files do not hold icon sets");
        }
        None => invalid_format!("Invalid resource type ({})", restype),
    }
    let num_entries = reader.read_u16::<LittleEndian>()? as usize;
    let mut spans = Vec::<DataSpan>::with_capacity(num_entries);
    for index in 0..num_entries {
        let mut raw_entry = [0u8; ICONDIRENTRY_LENGTH];
        reader.read_exact(&mut raw_entry)?;
        let mut fields = &raw_entry[ENTRY_SPAN_OFFSET..];
        let size = fields.read_u32::<LittleEndian>()?;
        let offset = fields.read_u32::<LittleEndian>()?;
        spans.push(DataSpan { index, size, offset });
    }
    // Entries need not be stored in file order.
    spans.sort_by_key(|span| span.offset);

    let mut position =
        ICONDIR_LENGTH + (ICONDIRENTRY_LENGTH as u64) * (num_entries as u64);
    let mut bitmaps = Vec::with_capacity(num_entries);
    for span in spans {
        let offset = span.offset as u64;
        if offset < position {
            // The stream cannot rewind, so data shared with an earlier
            // entry or lying inside the directory is left unread.
            tracing::debug!(
                "Skipping ICONDIRENTRY {}: data at offset {} starts before \
                 position {}",
                span.index,
                offset,
                position
            );
            continue;
        }
        if offset > position {
            skip_exact(&mut reader, offset - position)?;
        }
        let data = read_payload(&mut reader, span.size as u64)?;
        position = offset + span.size as u64;
        match codec.decode(&data) {
            Ok(bitmap) => bitmaps.push(bitmap),
            Err(error) if error.is_recoverable() => {
                tracing::warn!("Skipping ICONDIRENTRY {}: {}", span.index, error);
            }
            Err(error) => return Err(error),
        }
    }
    Ok(bitmaps)
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::read_ico;
    use crate::bitmap::Bitmap;
    use crate::codec::{ImageCodec, PngCodec};
    use crate::error::{IconError, Result};
    use parking_lot::Mutex;

    // Decodes a two-byte payload `[w, h]` into a solid w-by-h bitmap and
    // remembers every payload it was given.
    #[derive(Default)]
    struct SizeCodec {
        payloads: Mutex<Vec<Vec<u8>>>,
    }

    impl ImageCodec for SizeCodec {
        fn decode(&self, data: &[u8]) -> Result<Bitmap> {
            self.payloads.lock().push(data.to_vec());
            match data {
                &[width, height] if width > 0 && height > 0 => Ok(
                    Bitmap::filled(width as u32, height as u32, [0, 0, 0, 255]),
                ),
                _ => Err(IconError::Decode("not a size".to_string())),
            }
        }

        fn encode(&self, bitmap: &Bitmap, _dpi: u32) -> Result<Vec<u8>> {
            Ok(vec![bitmap.width() as u8, bitmap.height() as u8])
        }
    }

    fn entry(size: u32, offset: u32) -> Vec<u8> {
        let mut out = vec![0u8; 8];
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        out
    }

    #[test]
    fn read_empty_icon_set() {
        let input: &[u8] = b"\x00\x00\x01\x00\x00\x00";
        assert!(read_ico(input, &PngCodec).unwrap().is_empty());
    }

    #[test]
    fn cursor_set_is_format_error() {
        let input: &[u8] = b"\x00\x00\x02\x00\x00\x00";
        assert!(matches!(read_ico(input, &PngCodec), Err(IconError::Format(_))));
    }

    #[test]
    fn bad_reserved_field_is_format_error() {
        let input: &[u8] = b"\x01\x00\x01\x00\x00\x00";
        assert!(matches!(read_ico(input, &PngCodec), Err(IconError::Format(_))));
    }

    #[test]
    fn entries_are_read_in_offset_order() {
        // Header and two entries fill bytes 0..38.
        let mut input = b"\x00\x00\x01\x00\x02\x00".to_vec();
        input.extend(entry(2, 60));
        input.extend(entry(2, 40));
        input.extend_from_slice(b"XX");
        input.extend_from_slice(&[5, 5]);
        input.extend_from_slice(&[0xee; 18]);
        input.extend_from_slice(&[3, 3]);
        let codec = SizeCodec::default();
        let bitmaps = read_ico(input.as_slice(), &codec).unwrap();
        let sizes: Vec<(u32, u32)> = bitmaps.iter().map(Bitmap::size).collect();
        assert_eq!(sizes, vec![(5, 5), (3, 3)]);
        assert_eq!(*codec.payloads.lock(), vec![vec![5, 5], vec![3, 3]]);
    }

    #[test]
    fn entry_inside_directory_is_skipped() {
        let mut input = b"\x00\x00\x01\x00\x02\x00".to_vec();
        input.extend(entry(2, 10));
        input.extend(entry(2, 38));
        input.extend_from_slice(&[4, 4]);
        let codec = SizeCodec::default();
        let bitmaps = read_ico(input.as_slice(), &codec).unwrap();
        assert_eq!(bitmaps.len(), 1);
        assert_eq!(bitmaps[0].size(), (4, 4));
        assert_eq!(*codec.payloads.lock(), vec![vec![4, 4]]);
    }

    #[test]
    fn shared_data_is_decoded_once() {
        let mut input = b"\x00\x00\x01\x00\x03\x00".to_vec();
        input.extend(entry(2, 54));
        input.extend(entry(2, 54));
        input.extend(entry(2, 56));
        input.extend_from_slice(&[6, 6]);
        input.extend_from_slice(&[2, 8]);
        let codec = SizeCodec::default();
        let bitmaps = read_ico(input.as_slice(), &codec).unwrap();
        let sizes: Vec<(u32, u32)> = bitmaps.iter().map(Bitmap::size).collect();
        assert_eq!(sizes, vec![(6, 6), (2, 8)]);
        assert_eq!(codec.payloads.lock().len(), 2);
    }

    #[test]
    fn undecodable_entry_is_skipped() {
        let mut input = b"\x00\x00\x01\x00\x02\x00".to_vec();
        input.extend(entry(3, 38));
        input.extend(entry(2, 41));
        input.extend_from_slice(b"BMP");
        input.extend_from_slice(&[7, 9]);
        let bitmaps = read_ico(input.as_slice(), &SizeCodec::default()).unwrap();
        assert_eq!(bitmaps.len(), 1);
        assert_eq!(bitmaps[0].size(), (7, 9));
    }

    #[test]
    fn truncated_data() {
        let mut input = b"\x00\x00\x01\x00\x01\x00".to_vec();
        input.extend(entry(4, 22));
        input.extend_from_slice(&[1, 1]);
        assert!(matches!(
            read_ico(input.as_slice(), &SizeCodec::default()),
            Err(IconError::Truncated(_))
        ));
    }

    #[test]
    fn read_png_grayscale_icon() {
        let input: &[u8] = b"\
            \x00\x00\x01\x00\x01\x00\
            \
            \x02\x02\x00\x00\x00\x00\x00\x00\
            \x47\x00\x00\x00\x16\x00\x00\x00\
            \
            \x89\x50\x4e\x47\x0d\x0a\x1a\x0a\x00\x00\x00\x0d\x49\x48\x44\x52\
            \x00\x00\x00\x02\x00\x00\x00\x02\x08\x00\x00\x00\x00\x57\xdd\x52\
            \xf8\x00\x00\x00\x0e\x49\x44\x41\x54\x78\x9c\x63\xb4\x77\x60\xdc\
            \xef\x00\x00\x04\x08\x01\x81\x86\x2e\xc9\x8d\x00\x00\x00\x00\x49\
            \x45\x4e\x44\xae\x42\x60\x82";
        let bitmaps = read_ico(input, &PngCodec).unwrap();
        assert_eq!(bitmaps.len(), 1);
        let rgba: &[u8] = b"\
            \x3f\x3f\x3f\xff\x7f\x7f\x7f\xff\
            \xbf\xbf\xbf\xff\xff\xff\xff\xff";
        assert_eq!(bitmaps[0].rgba_data(), rgba);
    }
}

//===========================================================================//
