//! The name → [`IconSet`] registry and the loaders that feed it.

use crate::bitmap::Bitmap;
use crate::cache::{cache_key, ImageCache, MemoryImageCache};
use crate::codec::{ImageCodec, PngCodec, ResizeScaler, ScaleFilter, Scaler};
use crate::error::Result;
use crate::format::{ContainerFormat, SNIFF_LENGTH};
use crate::iconset::IconSet;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

//===========================================================================//

/// The collaborators shared by a registry and all of its icon sets.
pub(crate) struct Services {
    pub(crate) codec: Box<dyn ImageCodec>,
    pub(crate) scaler: Box<dyn Scaler>,
    pub(crate) cache: Arc<dyn ImageCache>,
}

struct RegistryState {
    sets: HashMap<String, Arc<IconSet>>,
    sequence: u64,
}

//===========================================================================//

/// Configures the collaborators of a [`Registry`].
///
/// By default images are decoded and encoded as PNG, scaled with a Lanczos
/// filter, and registered in a fresh [`MemoryImageCache`].
pub struct RegistryBuilder {
    codec: Box<dyn ImageCodec>,
    scaler: Box<dyn Scaler>,
    cache: Arc<dyn ImageCache>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            codec: Box::new(PngCodec),
            scaler: Box::new(ResizeScaler::default()),
            cache: Arc::new(MemoryImageCache::new()),
        }
    }
}

impl RegistryBuilder {
    /// Uses `codec` to decode and encode embedded images.
    #[must_use]
    pub fn codec<C: ImageCodec + 'static>(mut self, codec: C) -> Self {
        self.codec = Box::new(codec);
        self
    }

    /// Uses `scaler` to synthesize missing sizes.
    #[must_use]
    pub fn scaler<S: Scaler + 'static>(mut self, scaler: S) -> Self {
        self.scaler = Box::new(scaler);
        self
    }

    /// Uses the default scaler with the given resampling filter.
    #[must_use]
    pub fn scale_filter(self, filter: ScaleFilter) -> Self {
        self.scaler(ResizeScaler::new(filter))
    }

    /// Registers loaded and synthesized bitmaps in `cache`.
    #[must_use]
    pub fn cache<C: ImageCache + 'static>(mut self, cache: Arc<C>) -> Self {
        self.cache = cache;
        self
    }

    /// Builds an empty registry.
    pub fn build(self) -> Registry {
        Registry {
            services: Arc::new(Services {
                codec: self.codec,
                scaler: self.scaler,
                cache: self.cache,
            }),
            state: Mutex::new(RegistryState { sets: HashMap::new(), sequence: 0 }),
        }
    }
}

//===========================================================================//

/// Maps names to their current [`IconSet`] and hands out sequence numbers.
///
/// Creating or loading an icon set under a name that is already registered
/// replaces the old set.  Anyone still holding the old set keeps a working
/// object; it simply is no longer returned by [`get`](#method.get).
pub struct Registry {
    services: Arc<Services>,
    state: Mutex<RegistryState>,
}

impl Default for Registry {
    fn default() -> Self {
        RegistryBuilder::default().build()
    }
}

impl Registry {
    /// Creates an empty registry with the default collaborators.
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Returns a builder for a registry with custom collaborators.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the icon set currently registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<IconSet>> {
        self.state.lock().sets.get(name).cloned()
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().sets.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered icon sets.
    pub fn len(&self) -> usize {
        self.state.lock().sets.len()
    }

    /// Returns true if no icon sets are registered.
    pub fn is_empty(&self) -> bool {
        self.state.lock().sets.is_empty()
    }

    /// Creates an icon set from already-decoded bitmaps and registers it
    /// under `name`, replacing any previous set of that name.
    pub fn create<I, B>(&self, name: &str, bitmaps: I) -> Arc<IconSet>
    where
        I: IntoIterator<Item = B>,
        B: Into<Arc<Bitmap>>,
    {
        let bitmaps: Vec<Arc<Bitmap>> = bitmaps.into_iter().map(Into::into).collect();
        let mut state = self.state.lock();
        state.sequence += 1;
        let set = Arc::new(IconSet::new(
            name.to_string(),
            state.sequence,
            self.services.clone(),
            bitmaps,
        ));
        if state.sets.insert(name.to_string(), set.clone()).is_some() {
            tracing::debug!("Replaced icon set {:?}", name);
        }
        set
    }

    /// Loads an ICNS file into a new icon set registered under `name`.
    /// Returns `Ok(None)` if the file is valid but holds no usable images.
    pub fn load_icns<R: Read>(&self, name: &str, reader: R) -> Result<Option<Arc<IconSet>>> {
        self.load_format(name, ContainerFormat::Icns, reader)
    }

    /// Loads an ICO file into a new icon set registered under `name`.
    /// Returns `Ok(None)` if the file is valid but holds no usable images.
    pub fn load_ico<R: Read>(&self, name: &str, reader: R) -> Result<Option<Arc<IconSet>>> {
        self.load_format(name, ContainerFormat::Ico, reader)
    }

    /// Loads a container of the given format into a new icon set registered
    /// under `name`.  Each decoded bitmap is registered in the image cache.
    /// Nothing is registered if decoding fails or yields no images.
    pub fn load_format<R: Read>(
        &self,
        name: &str,
        format: ContainerFormat,
        reader: R,
    ) -> Result<Option<Arc<IconSet>>> {
        let bitmaps = format.read(reader, self.services.codec.as_ref())?;
        if bitmaps.is_empty() {
            tracing::debug!("No usable images in {:?} container {:?}", format, name);
            return Ok(None);
        }
        let bitmaps: Vec<Arc<Bitmap>> = bitmaps
            .into_iter()
            .map(|bitmap| {
                let bitmap = Arc::new(bitmap);
                self.services
                    .cache
                    .put(cache_key(name, bitmap.width(), bitmap.height()), bitmap.clone());
                bitmap
            })
            .collect();
        Ok(Some(self.create(name, bitmaps)))
    }

    /// Loads a container whose format is identified from its first bytes.
    pub fn load<R: Read>(&self, name: &str, mut reader: R) -> Result<Option<Arc<IconSet>>> {
        let mut prefix = [0u8; SNIFF_LENGTH];
        reader.read_exact(&mut prefix)?;
        let format = match ContainerFormat::sniff(&prefix) {
            Some(format) => format,
            None => invalid_format!("Unrecognized icon container (starts with {:02x?})", prefix),
        };
        self.load_format(name, format, (&prefix[..]).chain(reader))
    }

    /// Loads a container from a file.  The format comes from the file
    /// extension, or from the file's first bytes if the extension is not
    /// recognized.
    pub fn load_path<P: AsRef<Path>>(&self, name: &str, path: P) -> Result<Option<Arc<IconSet>>> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        match ContainerFormat::from_path(path) {
            Some(format) => self.load_format(name, format, reader),
            None => self.load(name, reader),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("names", &self.names()).finish()
    }
}

//===========================================================================//


//===========================================================================//
