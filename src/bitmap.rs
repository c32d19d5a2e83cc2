use crate::error::Result;
use std::io::{Read, Write};

//===========================================================================//

// Size limits for bitmaps:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

// There are 0.0254 meters in an inch.
const METERS_PER_INCH: f64 = 0.0254;

//===========================================================================//

/// A decoded bitmap, stored as 8-bit RGBA pixels.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl Bitmap {
    /// Creates a new bitmap with the given dimensions and RGBA data.  The
    /// `width` and `height` must be nonzero, and `rgba_data` must have `4 *
    /// width * height` bytes and be in row-major order from top to bottom.
    /// Panics if the dimensions are out of range or if `rgba_data` is the
    /// wrong length.
    pub fn from_rgba_data(width: u32, height: u32, rgba_data: Vec<u8>) -> Bitmap {
        if width < MIN_WIDTH {
            panic!(
                "Invalid width (was {}, but must be at least {})",
                width, MIN_WIDTH
            );
        }
        if height < MIN_HEIGHT {
            panic!(
                "Invalid height (was {}, but must be at least {})",
                height, MIN_HEIGHT
            );
        }
        let expected_data_len = (width as u64) * (height as u64) * 4;
        if (rgba_data.len() as u64) != expected_data_len {
            panic!(
                "Invalid data length (was {}, but must be {} for {}x{} image)",
                rgba_data.len(),
                expected_data_len,
                width,
                height
            );
        }
        Bitmap { width, height, rgba_data }
    }

    /// Creates a new bitmap of the given dimensions with every pixel set to
    /// the same RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Bitmap {
        let num_pixels = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(num_pixels * 4);
        for _ in 0..num_pixels {
            data.extend_from_slice(&rgba);
        }
        Bitmap::from_rgba_data(width, height, data)
    }

    /// Returns the width of the bitmap, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the bitmap, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the `(width, height)` of the bitmap, in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns true if the bitmap is exactly `width` by `height` pixels.
    pub fn has_size(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    /// Returns the RGBA data for this bitmap, in row-major order from top to
    /// bottom.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }

    /// Consumes the bitmap and returns its RGBA data.
    pub fn into_rgba_data(self) -> Vec<u8> {
        self.rgba_data
    }

    /// Decodes a bitmap from PNG data.  Returns a decode error if the PNG
    /// data is malformed or can't be decoded.
    pub fn read_png<R: Read>(reader: R) -> Result<Bitmap> {
        let mut decoder = png::Decoder::new(reader);
        // Paletted and 16-bit images come out as plain 8-bit channels.
        decoder.set_transformations(
            png::Transformations::EXPAND | png::Transformations::STRIP_16,
        );
        let mut png_reader = match decoder.read_info() {
            Ok(png_reader) => png_reader,
            Err(error) => decode_error!("Malformed PNG data: {}", error),
        };
        let (width, height) = {
            let info = png_reader.info();
            (info.width, info.height)
        };
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            decode_error!("Invalid PNG dimensions ({}x{})", width, height);
        }
        let mut buffer = vec![0u8; png_reader.output_buffer_size()];
        let frame = match png_reader.next_frame(&mut buffer) {
            Ok(frame) => frame,
            Err(error) => decode_error!("Malformed PNG data: {}", error),
        };
        buffer.truncate(frame.buffer_size());
        if frame.bit_depth != png::BitDepth::Eight {
            decode_error!("Unsupported PNG bit depth: {:?}", frame.bit_depth);
        }
        let rgba_data = match frame.color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => {
                let num_pixels = buffer.len() / 3;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    rgba.extend_from_slice(&buffer[(3 * i)..][..3]);
                    rgba.push(u8::MAX);
                }
                rgba
            }
            png::ColorType::GrayscaleAlpha => {
                let num_pixels = buffer.len() / 2;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    let gray = buffer[2 * i];
                    let alpha = buffer[2 * i + 1];
                    rgba.push(gray);
                    rgba.push(gray);
                    rgba.push(gray);
                    rgba.push(alpha);
                }
                rgba
            }
            png::ColorType::Grayscale => {
                let mut rgba = Vec::with_capacity(buffer.len() * 4);
                for value in buffer.into_iter() {
                    rgba.push(value);
                    rgba.push(value);
                    rgba.push(value);
                    rgba.push(u8::MAX);
                }
                rgba
            }
            png::ColorType::Indexed => {
                decode_error!("Unexpected paletted PNG output after expansion");
            }
        };
        let expected_len = (width as usize) * (height as usize) * 4;
        if rgba_data.len() != expected_len {
            decode_error!(
                "Decoded PNG has wrong data length (was {}, but should be {})",
                rgba_data.len(),
                expected_len
            );
        }
        Ok(Bitmap::from_rgba_data(width, height, rgba_data))
    }

    /// Encodes the bitmap as an RGBA PNG, recording `dpi` as the physical
    /// pixel density.
    pub fn write_png<W: Write>(&self, writer: W, dpi: u32) -> Result<()> {
        match self.write_png_enc(writer, dpi) {
            Ok(()) => Ok(()),
            Err(png::EncodingError::IoError(error)) => {
                encode_error!("PNG I/O error: {}", error);
            }
            Err(png::EncodingError::Format(error)) => {
                encode_error!("PNG format error: {}", error);
            }
            Err(png::EncodingError::LimitsExceeded) => {
                encode_error!("PNG limits exceeded");
            }
            Err(png::EncodingError::Parameter(error)) => {
                encode_error!("PNG parameter error: {}", error);
            }
        }
    }

    fn write_png_enc<W: Write>(
        &self,
        writer: W,
        dpi: u32,
    ) -> std::result::Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if dpi > 0 {
            let ppm = pixels_per_meter(dpi);
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.rgba_data)?;
        writer.finish()?;
        Ok(())
    }
}

/// Converts a dots-per-inch density into the pixels-per-meter value stored
/// in a PNG `pHYs` chunk.
pub(crate) fn pixels_per_meter(dpi: u32) -> u32 {
    ((dpi as f64) / METERS_PER_INCH).round() as u32
}

//===========================================================================//


//===========================================================================//
