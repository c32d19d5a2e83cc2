use crate::bitmap::Bitmap;
use crate::error::Result;
use image::imageops::{self, FilterType};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

/// The resolution recorded in images written into icon containers.
pub const DEFAULT_DPI: u32 = 72;

//===========================================================================//

/// Decodes and encodes the single images embedded in an icon container.
pub trait ImageCodec: Send + Sync {
    /// Decodes an embedded image.
    fn decode(&self, data: &[u8]) -> Result<Bitmap>;

    /// Encodes a bitmap, recording `dpi` as its resolution metadata.
    fn encode(&self, bitmap: &Bitmap, dpi: u32) -> Result<Vec<u8>>;
}

/// The default codec; reads and writes PNG data.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, data: &[u8]) -> Result<Bitmap> {
        Bitmap::read_png(data)
    }

    fn encode(&self, bitmap: &Bitmap, dpi: u32) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        bitmap.write_png(&mut data, dpi)?;
        Ok(data)
    }
}

//===========================================================================//

/// Produces a resized copy of a bitmap.
pub trait Scaler: Send + Sync {
    /// Returns a copy of `bitmap` resized to exactly `width` by `height`
    /// pixels.  Both dimensions are nonzero.
    fn scale(&self, bitmap: &Bitmap, width: u32, height: u32) -> Bitmap;
}

/// Resampling filter used by [`ResizeScaler`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ScaleFilter {
    /// Nearest neighbor; blocky, but exact for integer multiples.
    Nearest,
    /// Linear filter.
    Triangle,
    /// Cubic filter.
    CatmullRom,
    /// Lanczos with window 3.
    #[default]
    Lanczos3,
}

impl ScaleFilter {
    fn filter_type(self) -> FilterType {
        match self {
            ScaleFilter::Nearest => FilterType::Nearest,
            ScaleFilter::Triangle => FilterType::Triangle,
            ScaleFilter::CatmullRom => FilterType::CatmullRom,
            ScaleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// The default scaler, backed by `image::imageops::resize`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResizeScaler {
    filter: ScaleFilter,
}

impl ResizeScaler {
    /// Creates a scaler that resamples with the given filter.
    pub fn new(filter: ScaleFilter) -> ResizeScaler {
        ResizeScaler { filter }
    }

    /// Returns the resampling filter this scaler uses.
    pub fn filter(&self) -> ScaleFilter {
        self.filter
    }
}

impl Scaler for ResizeScaler {
    fn scale(&self, bitmap: &Bitmap, width: u32, height: u32) -> Bitmap {
        // Bitmap guarantees the buffer length, so from_raw always succeeds.
        let source = match image::RgbaImage::from_raw(
            bitmap.width(),
            bitmap.height(),
            bitmap.rgba_data().to_vec(),
        ) {
            Some(source) => source,
            None => unreachable!("bitmap data length matches its size"),
        };
        let scaled =
            imageops::resize(&source, width, height, self.filter.filter_type());
        Bitmap::from_rgba_data(width, height, scaled.into_raw())
    }
}

//===========================================================================//


//===========================================================================//
