//! A library for loading multi-resolution icons from Apple Icon Image
//! (.icns) and Windows icon (.ico) files, resolving requests for arbitrary
//! sizes against them, and saving them back out as ICNS.
//!
//! Icon sets live in a [`Registry`], which maps names to their current
//! [`IconSet`].  Only containers that embed PNG images are supported.
//!
//! # Example
//!
//! ```no_run
//! use iconset::Registry;
//! let registry = Registry::new();
//! let file = std::fs::File::open("app.icns").unwrap();
//! if let Some(icons) = registry.load_icns("app", file).unwrap() {
//!     // Scales the closest size if the file has no 48x48 image.
//!     let icon = icons.icon(48, 48).unwrap();
//!     assert_eq!(icon.size(), (48, 48));
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod bitmap;
mod cache;
mod codec;
mod error;
mod format;
pub mod icns;
pub mod ico;
mod iconset;
mod icontype;
mod registry;
mod restype;
mod stream;

pub use crate::bitmap::Bitmap;
pub use crate::cache::{cache_key, ImageCache, MemoryImageCache};
pub use crate::codec::{
    ImageCodec, PngCodec, ResizeScaler, ScaleFilter, Scaler, DEFAULT_DPI,
};
pub use crate::error::{IconError, Result};
pub use crate::format::ContainerFormat;
pub use crate::iconset::{best_fit, fit_score, IconSet};
pub use crate::icontype::{IconType, OSType, ALL_ICON_TYPES, ENCODABLE_SIZES};
pub use crate::registry::{Registry, RegistryBuilder};
pub use crate::restype::ResourceType;
