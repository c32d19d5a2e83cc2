use crate::bitmap::Bitmap;
use crate::codec::ImageCodec;
use crate::error::Result;
use crate::icns::{read_icns, ICNS_MAGIC_LITERAL};
use crate::ico::read_ico;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

//===========================================================================//

// An ICO header starts with a zero reserved field and a resource type of 1.
const ICO_MAGIC_PREFIX: &[u8; 4] = b"\x00\x00\x01\x00";

/// The number of leading bytes [`ContainerFormat::sniff`] looks at.
pub const SNIFF_LENGTH: usize = 4;

//===========================================================================//

/// A multi-resolution icon container format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ContainerFormat {
    /// Apple Icon Image (.icns)
    Icns,
    /// Windows icon (.ico)
    Ico,
}

impl ContainerFormat {
    /// Identifies the format from the first bytes of a file.
    pub fn sniff(prefix: &[u8]) -> Option<ContainerFormat> {
        if prefix.starts_with(ICNS_MAGIC_LITERAL) {
            Some(ContainerFormat::Icns)
        } else if prefix.starts_with(ICO_MAGIC_PREFIX) {
            Some(ContainerFormat::Ico)
        } else {
            None
        }
    }

    /// Identifies the format from a file name extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<ContainerFormat> {
        let extension = path.as_ref().extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("icns") {
            Some(ContainerFormat::Icns)
        } else if extension.eq_ignore_ascii_case("ico") {
            Some(ContainerFormat::Ico)
        } else {
            None
        }
    }

    /// Returns the usual file name extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ContainerFormat::Icns => "icns",
            ContainerFormat::Ico => "ico",
        }
    }

    /// Decodes every usable image in a container of this format.
    pub fn read<R: Read>(self, reader: R, codec: &dyn ImageCodec) -> Result<Vec<Bitmap>> {
        match self {
            ContainerFormat::Icns => read_icns(reader, codec),
            ContainerFormat::Ico => read_ico(reader, codec),
        }
    }
}

//===========================================================================//


//===========================================================================//
