//! Named collections of one icon at several resolutions.
//!
//! An [`IconSet`] keeps its bitmaps sorted from largest to smallest (by
//! width, then height, then insertion order).  Asking for a size it does not
//! hold with [`IconSet::icon`] scales the closest existing bitmap, registers
//! the result in the image cache, and keeps it in the set so the next request
//! for that size is an exact hit.

use crate::bitmap::Bitmap;
use crate::cache::cache_key;
use crate::error::Result;
use crate::icns::write_icns;
use crate::registry::Services;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

//===========================================================================//

struct IconEntry {
    index: u64,
    bitmap: Arc<Bitmap>,
}

struct IconList {
    entries: Vec<IconEntry>,
    next_index: u64,
}

impl IconList {
    fn new<I: IntoIterator<Item = Arc<Bitmap>>>(bitmaps: I) -> IconList {
        let mut list = IconList { entries: Vec::new(), next_index: 0 };
        for bitmap in bitmaps {
            list.push(bitmap);
        }
        list.sort();
        list
    }

    fn push(&mut self, bitmap: Arc<Bitmap>) {
        self.entries.push(IconEntry { index: self.next_index, bitmap });
        self.next_index += 1;
    }

    fn insert(&mut self, bitmap: Arc<Bitmap>) {
        self.push(bitmap);
        self.sort();
    }

    fn sort(&mut self) {
        self.entries.sort_by(compare_entries);
    }

    fn find(&self, width: u32, height: u32) -> Option<&Arc<Bitmap>> {
        self.entries
            .iter()
            .map(|entry| &entry.bitmap)
            .find(|bitmap| bitmap.has_size(width, height))
    }
}

// Largest first; equal sizes keep insertion order.
fn compare_entries(a: &IconEntry, b: &IconEntry) -> Ordering {
    b.bitmap
        .width()
        .cmp(&a.bitmap.width())
        .then_with(|| b.bitmap.height().cmp(&a.bitmap.height()))
        .then_with(|| a.index.cmp(&b.index))
}

//===========================================================================//

/// Scores how well a `candidate` size fits a `width` by `height` request.
///
/// The score is the product of the two dimension differences.  A positive
/// score means the candidate is larger (or smaller) than the request in both
/// dimensions; a non-positive one means it is larger in one dimension and
/// smaller in the other.  The product of two `u32` differences can exceed
/// `i64`, so the score is an `i128`.
pub fn fit_score(candidate: (u32, u32), width: u32, height: u32) -> i128 {
    let dx = candidate.0 as i128 - width as i128;
    let dy = candidate.1 as i128 - height as i128;
    dx * dy
}

/// Picks the bitmap to scale for a `width` by `height` request: the one
/// with the smallest positive [`fit_score`], or failing that, the one with
/// the largest non-positive score.  Earlier candidates win ties.  Returns
/// `None` only if there are no candidates.
pub fn best_fit<'a, I>(candidates: I, width: u32, height: u32) -> Option<&'a Arc<Bitmap>>
where
    I: IntoIterator<Item = &'a Arc<Bitmap>>,
{
    let mut uniform: Option<(i128, &'a Arc<Bitmap>)> = None;
    let mut mixed: Option<(i128, &'a Arc<Bitmap>)> = None;
    for bitmap in candidates {
        let score = fit_score(bitmap.size(), width, height);
        if score > 0 {
            if uniform.map_or(true, |(best, _)| score < best) {
                uniform = Some((score, bitmap));
            }
        } else if mixed.map_or(true, |(best, _)| score > best) {
            mixed = Some((score, bitmap));
        }
    }
    uniform.or(mixed).map(|(_, bitmap)| bitmap)
}

//===========================================================================//

/// A named set of bitmaps of one icon at different resolutions.
///
/// Icon sets are created through a [`Registry`](crate::Registry), which
/// hands out their sequence numbers.  The bitmap list is guarded by a
/// read/write lock, so an icon set may be shared between threads; lookups
/// that have to synthesize a new size are serialized.
pub struct IconSet {
    name: String,
    sequence: u64,
    services: Arc<Services>,
    icons: RwLock<IconList>,
}

impl IconSet {
    pub(crate) fn new<I>(
        name: String,
        sequence: u64,
        services: Arc<Services>,
        bitmaps: I,
    ) -> IconSet
    where
        I: IntoIterator<Item = Arc<Bitmap>>,
    {
        IconSet {
            name,
            sequence,
            services,
            icons: RwLock::new(IconList::new(bitmaps)),
        }
    }

    /// Returns the name this icon set is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sequence number assigned when this icon set was created.
    /// Sequence numbers are unique across all icon sets of a registry and
    /// increase with each creation, so a holder can tell whether the set
    /// registered under a name is still the one it saw before.  Bitmaps
    /// synthesized by [`icon`](#method.icon) do not change it.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the number of bitmaps currently in the set.
    pub fn len(&self) -> usize {
        self.icons.read().entries.len()
    }

    /// Returns true if the set holds no bitmaps.
    pub fn is_empty(&self) -> bool {
        self.icons.read().entries.is_empty()
    }

    /// Returns a snapshot of all bitmaps in the set, largest first.
    pub fn icons(&self) -> Vec<Arc<Bitmap>> {
        let list = self.icons.read();
        list.entries.iter().map(|entry| entry.bitmap.clone()).collect()
    }

    /// Returns the `(width, height)` of every bitmap in the set, largest
    /// first.
    pub fn sizes(&self) -> Vec<(u32, u32)> {
        let list = self.icons.read();
        list.entries.iter().map(|entry| entry.bitmap.size()).collect()
    }

    /// Returns true if the set holds a bitmap of exactly this size.
    pub fn has_icon(&self, width: u32, height: u32) -> bool {
        self.icons.read().find(width, height).is_some()
    }

    /// Returns true if the set holds a `size` by `size` bitmap.
    pub fn has_icon_size(&self, size: u32) -> bool {
        self.has_icon(size, size)
    }

    /// Returns the bitmap of exactly this size, without synthesizing one.
    pub fn icon_no_create(&self, width: u32, height: u32) -> Option<Arc<Bitmap>> {
        self.icons.read().find(width, height).cloned()
    }

    /// Returns the `size` by `size` bitmap, without synthesizing one.
    pub fn icon_no_create_size(&self, size: u32) -> Option<Arc<Bitmap>> {
        self.icon_no_create(size, size)
    }

    /// Returns a bitmap of exactly this size.  If the set has none, the best
    /// fitting bitmap (see [`best_fit`]) is scaled to the requested size; the
    /// result is registered in the image cache and added to the set.
    ///
    /// Returns `None` if the set is empty or either dimension is zero.
    pub fn icon(&self, width: u32, height: u32) -> Option<Arc<Bitmap>> {
        if let Some(bitmap) = self.icon_no_create(width, height) {
            return Some(bitmap);
        }
        if width == 0 || height == 0 {
            return None;
        }
        let mut list = self.icons.write();
        // Another caller may have filled this size since the read above.
        if let Some(bitmap) = list.find(width, height) {
            return Some(bitmap.clone());
        }
        let source = best_fit(list.entries.iter().map(|entry| &entry.bitmap), width, height)?;
        tracing::debug!(
            "Scaling {}x{} icon in {:?} to {}x{}",
            source.width(),
            source.height(),
            self.name,
            width,
            height
        );
        let scaled = Arc::new(self.services.scaler.scale(source, width, height));
        self.services
            .cache
            .put(cache_key(&self.name, width, height), scaled.clone());
        list.insert(scaled.clone());
        Some(scaled)
    }

    /// Returns a `size` by `size` bitmap; see [`icon`](#method.icon).
    pub fn icon_size(&self, size: u32) -> Option<Arc<Bitmap>> {
        self.icon(size, size)
    }

    /// Writes the set's square bitmaps of encodable sizes to an ICNS file,
    /// in the set's current order.
    pub fn write_icns<W: Write>(&self, writer: W) -> Result<()> {
        let bitmaps = self.icons();
        write_icns(&bitmaps, self.services.codec.as_ref(), writer)
    }
}

impl fmt::Debug for IconSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconSet")
            .field("name", &self.name)
            .field("sequence", &self.sequence)
            .field("sizes", &self.sizes())
            .finish()
    }
}

//===========================================================================//


//===========================================================================//
