//! Reading and writing Apple Icon Image (.icns) containers.
//!
//! An ICNS file is an 8-byte header (the `icns` magic literal and the total
//! file length, both big-endian) followed by chunks.  Each chunk is a 4-byte
//! OSType, a big-endian length that includes the chunk's own 8-byte header,
//! and the payload.  Only chunks holding embedded PNG images are decoded;
//! everything else is skipped.

use crate::bitmap::Bitmap;
use crate::codec::{ImageCodec, DEFAULT_DPI};
use crate::error::Result;
use crate::icontype::{IconType, OSType};
use crate::stream::{read_payload, skip_exact};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::borrow::Borrow;
use std::io::{Read, Write};

//===========================================================================//

/// The first four bytes of an ICNS file.
pub const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

// The length of the file header, in bytes.
const ICON_FAMILY_HEADER_LENGTH: u32 = 8;

// The length of a chunk header, in bytes.
const ICON_ELEMENT_HEADER_LENGTH: u32 = 8;

//===========================================================================//

/// Reads an ICNS container and decodes every embedded image chunk, in file
/// order.  Chunks that fail to decode are skipped.  An empty list means the
/// container was well-formed but held no usable images.
pub fn read_icns<R: Read>(mut reader: R, codec: &dyn ImageCodec) -> Result<Vec<Bitmap>> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != *ICNS_MAGIC_LITERAL {
        invalid_format!(
            "Not an icns file (magic literal was {:?})",
            OSType(magic).to_string()
        );
    }
    let file_length = reader.read_u32::<BigEndian>()?;
    let mut file_position = ICON_FAMILY_HEADER_LENGTH as u64;
    let mut bitmaps = Vec::new();
    while file_position < file_length as u64 {
        let mut raw_ostype = [0u8; 4];
        reader.read_exact(&mut raw_ostype)?;
        let ostype = OSType(raw_ostype);
        let element_length = reader.read_u32::<BigEndian>()?;
        if element_length < ICON_ELEMENT_HEADER_LENGTH {
            invalid_format!(
                "Invalid length for '{}' chunk (was {}, but must be at \
                 least {})",
                ostype,
                element_length,
                ICON_ELEMENT_HEADER_LENGTH
            );
        }
        let data_length = (element_length - ICON_ELEMENT_HEADER_LENGTH) as u64;
        file_position += element_length as u64;
        match IconType::from_ostype(ostype) {
            Some(icon_type) => {
                let data = read_payload(&mut reader, data_length)?;
                match codec.decode(&data) {
                    Ok(bitmap) => {
                        if !bitmap.has_size(icon_type.pixel_size(), icon_type.pixel_size()) {
                            tracing::debug!(
                                "'{}' chunk holds a {}x{} image",
                                ostype,
                                bitmap.width(),
                                bitmap.height()
                            );
                        }
                        bitmaps.push(bitmap);
                    }
                    Err(error) if error.is_recoverable() => {
                        tracing::warn!("Skipping '{}' chunk: {}", ostype, error);
                    }
                    Err(error) => return Err(error),
                }
            }
            None => {
                tracing::debug!("Skipping unsupported '{}' chunk", ostype);
                skip_exact(&mut reader, data_length)?;
            }
        }
    }
    Ok(bitmaps)
}

/// Writes an ICNS container holding every bitmap that is square and has one
/// of the [encodable sizes](crate::ENCODABLE_SIZES), in the given
/// order; other bitmaps are left out.  All images are encoded before any
/// output is written, so a failed encode writes nothing.
pub fn write_icns<W, B>(bitmaps: &[B], codec: &dyn ImageCodec, mut writer: W) -> Result<()>
where
    W: Write,
    B: Borrow<Bitmap>,
{
    let mut elements = Vec::<(IconType, Vec<u8>)>::new();
    let mut file_length = ICON_FAMILY_HEADER_LENGTH as u64;
    for bitmap in bitmaps {
        let bitmap = bitmap.borrow();
        if bitmap.width() != bitmap.height() {
            continue;
        }
        let icon_type = match IconType::for_encoding(bitmap.width()) {
            Some(icon_type) => icon_type,
            None => continue,
        };
        let data = codec.encode(bitmap, DEFAULT_DPI)?;
        file_length += ICON_ELEMENT_HEADER_LENGTH as u64 + data.len() as u64;
        elements.push((icon_type, data));
    }
    if file_length > u32::MAX as u64 {
        encode_error!(
            "icns file would be too long ({} bytes, but max is {})",
            file_length,
            u32::MAX
        );
    }
    writer.write_all(ICNS_MAGIC_LITERAL)?;
    writer.write_u32::<BigEndian>(file_length as u32)?;
    for (icon_type, data) in elements.iter() {
        let OSType(ref raw_ostype) = icon_type.ostype();
        writer.write_all(raw_ostype)?;
        writer.write_u32::<BigEndian>(ICON_ELEMENT_HEADER_LENGTH + data.len() as u32)?;
        writer.write_all(data)?;
    }
    Ok(())
}

//===========================================================================//


//===========================================================================//
