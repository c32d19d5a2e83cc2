#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//===========================================================================//

/// A Macintosh OSType (also known as a ResType), used in ICNS files to
/// identify the type of each chunk.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct OSType(pub [u8; 4]);

impl OSType {
    /// Returns the OSType as a big-endian integer, the way it is stored in
    /// an ICNS file.
    pub fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Builds an OSType from a big-endian integer.
    pub fn from_u32(value: u32) -> OSType {
        OSType(value.to_be_bytes())
    }
}

impl fmt::Display for OSType {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        let &OSType(raw) = self;
        for &byte in &raw {
            write!(out, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl FromStr for OSType {
    type Err = String;

    fn from_str(input: &str) -> Result<OSType, String> {
        let bytes = input.as_bytes();
        if bytes.len() != 4 {
            Err(format!("OSType string must be 4 bytes (was {})", bytes.len()))
        } else {
            let mut raw = [0u8; 4];
            raw.clone_from_slice(bytes);
            Ok(OSType(raw))
        }
    }
}

//===========================================================================//

/// ICNS chunk types whose payload is an embedded PNG (or JPEG 2000) image.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum IconType {
    /// 16x16 icon (`icp4`).
    RGBA32_16x16,
    /// 32x32 icon (`icp5`).
    RGBA32_32x32,
    /// 64x64 icon (`icp6`).
    RGBA32_64x64,
    /// 128x128 icon (`ic07`).
    RGBA32_128x128,
    /// 256x256 icon (`ic08`).
    RGBA32_256x256,
    /// 512x512 icon (`ic09`).
    RGBA32_512x512,
    /// 512x512 icon at 2x "retina" density, so 1024 by 1024 pixels (`ic10`).
    RGBA32_512x512_2x,
    /// 16x16 icon at 2x density, so 32 by 32 pixels (`ic11`).
    RGBA32_16x16_2x,
    /// 32x32 icon at 2x density, so 64 by 64 pixels (`ic12`).
    RGBA32_32x32_2x,
    /// 128x128 icon at 2x density, so 256 by 256 pixels (`ic13`).
    RGBA32_128x128_2x,
    /// 256x256 icon at 2x density, so 512 by 512 pixels (`ic14`).
    RGBA32_256x256_2x,
}

/// Every icon type the decoder recognizes.
pub const ALL_ICON_TYPES: [IconType; 11] = [
    IconType::RGBA32_16x16,
    IconType::RGBA32_32x32,
    IconType::RGBA32_64x64,
    IconType::RGBA32_128x128,
    IconType::RGBA32_256x256,
    IconType::RGBA32_512x512,
    IconType::RGBA32_512x512_2x,
    IconType::RGBA32_16x16_2x,
    IconType::RGBA32_32x32_2x,
    IconType::RGBA32_128x128_2x,
    IconType::RGBA32_256x256_2x,
];

/// The square pixel sizes the encoder writes.
pub const ENCODABLE_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

impl IconType {
    /// Get the icon type associated with the given OSType, if any.
    pub fn from_ostype(ostype: OSType) -> Option<IconType> {
        let OSType(raw_ostype) = ostype;
        match &raw_ostype {
            b"icp4" => Some(IconType::RGBA32_16x16),
            b"icp5" => Some(IconType::RGBA32_32x32),
            b"icp6" => Some(IconType::RGBA32_64x64),
            b"ic07" => Some(IconType::RGBA32_128x128),
            b"ic08" => Some(IconType::RGBA32_256x256),
            b"ic09" => Some(IconType::RGBA32_512x512),
            b"ic10" => Some(IconType::RGBA32_512x512_2x),
            b"ic11" => Some(IconType::RGBA32_16x16_2x),
            b"ic12" => Some(IconType::RGBA32_32x32_2x),
            b"ic13" => Some(IconType::RGBA32_128x128_2x),
            b"ic14" => Some(IconType::RGBA32_256x256_2x),
            _ => None,
        }
    }

    /// Get the OSType that represents this icon type.
    pub fn ostype(self) -> OSType {
        match self {
            IconType::RGBA32_16x16 => OSType(*b"icp4"),
            IconType::RGBA32_32x32 => OSType(*b"icp5"),
            IconType::RGBA32_64x64 => OSType(*b"icp6"),
            IconType::RGBA32_128x128 => OSType(*b"ic07"),
            IconType::RGBA32_256x256 => OSType(*b"ic08"),
            IconType::RGBA32_512x512 => OSType(*b"ic09"),
            IconType::RGBA32_512x512_2x => OSType(*b"ic10"),
            IconType::RGBA32_16x16_2x => OSType(*b"ic11"),
            IconType::RGBA32_32x32_2x => OSType(*b"ic12"),
            IconType::RGBA32_128x128_2x => OSType(*b"ic13"),
            IconType::RGBA32_256x256_2x => OSType(*b"ic14"),
        }
    }

    /// Returns the icon type the encoder uses for a square bitmap of the
    /// given pixel size, or `None` if that size is not written at all.
    ///
    /// # Examples
    /// ```
    /// use iconset::IconType;
    /// assert_eq!(IconType::for_encoding(64), Some(IconType::RGBA32_64x64));
    /// assert_eq!(IconType::for_encoding(1024),
    ///            Some(IconType::RGBA32_512x512_2x));
    /// assert_eq!(IconType::for_encoding(48), None);
    /// ```
    pub fn for_encoding(size: u32) -> Option<IconType> {
        match size {
            16 => Some(IconType::RGBA32_16x16),
            32 => Some(IconType::RGBA32_32x32),
            64 => Some(IconType::RGBA32_64x64),
            128 => Some(IconType::RGBA32_128x128),
            256 => Some(IconType::RGBA32_256x256),
            512 => Some(IconType::RGBA32_512x512),
            1024 => Some(IconType::RGBA32_512x512_2x),
            _ => None,
        }
    }

    /// Returns the pixel data width (and height) of this icon type.
    /// Normally this is the same as the screen size, but for 2x "retina"
    /// density icons, this will be twice that value.
    ///
    /// # Examples
    /// ```
    /// use iconset::IconType;
    /// assert_eq!(IconType::RGBA32_128x128.pixel_size(), 128);
    /// assert_eq!(IconType::RGBA32_128x128_2x.pixel_size(), 256);
    /// ```
    pub fn pixel_size(self) -> u32 {
        self.screen_size() * self.pixel_density()
    }

    /// Returns the pixel density for this icon type; 2 for 2x "retina"
    /// density icons, or 1 for other icon types.
    pub fn pixel_density(self) -> u32 {
        match self {
            IconType::RGBA32_512x512_2x
            | IconType::RGBA32_16x16_2x
            | IconType::RGBA32_32x32_2x
            | IconType::RGBA32_128x128_2x
            | IconType::RGBA32_256x256_2x => 2,
            _ => 1,
        }
    }

    /// Returns the screen width (and height) of this icon type.
    pub fn screen_size(self) -> u32 {
        match self {
            IconType::RGBA32_16x16 | IconType::RGBA32_16x16_2x => 16,
            IconType::RGBA32_32x32 | IconType::RGBA32_32x32_2x => 32,
            IconType::RGBA32_64x64 => 64,
            IconType::RGBA32_128x128 | IconType::RGBA32_128x128_2x => 128,
            IconType::RGBA32_256x256 | IconType::RGBA32_256x256_2x => 256,
            IconType::RGBA32_512x512 | IconType::RGBA32_512x512_2x => 512,
        }
    }
}

//===========================================================================//


//===========================================================================//
