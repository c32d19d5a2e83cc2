use crate::error::{IconError, Result};
use std::io::{self, Read};

//===========================================================================//

/// Reads exactly `length` bytes.  The buffer grows as data actually arrives,
/// so a bogus declared length on a short stream fails as truncated instead
/// of allocating up front.
pub(crate) fn read_payload<R: Read>(reader: &mut R, length: u64) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.by_ref().take(length).read_to_end(&mut data)?;
    if (data.len() as u64) < length {
        return Err(truncated(length, data.len() as u64));
    }
    Ok(data)
}

/// Discards exactly `length` bytes.
pub(crate) fn skip_exact<R: Read>(reader: &mut R, length: u64) -> Result<()> {
    let skipped = io::copy(&mut reader.by_ref().take(length), &mut io::sink())?;
    if skipped < length {
        return Err(truncated(length, skipped));
    }
    Ok(())
}

fn truncated(wanted: u64, got: u64) -> IconError {
    IconError::Truncated(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("expected {} more bytes, but stream ended after {}", wanted, got),
    ))
}

//===========================================================================//


//===========================================================================//
