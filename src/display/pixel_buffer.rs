// Pixel Buffer - Per-frame list of pixel writes from the emulation core
//
// The core appends (x, y, color index) entries in whatever order it
// produces them. Nothing is resolved or deduplicated here: the presenter
// applies the entries in order, so a later write to the same coordinate
// simply overwrites an earlier one.
//
// The buffer belongs to the caller. It is sized for one frame and must be
// cleared by its owner before the next frame starts accumulating.

/// A single buffered pixel write
///
/// A negative `x` or `y` marks an entry the core wants skipped (off-screen
/// or transparent). Such entries are discarded at flush time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelEntry {
    /// Horizontal position, negative to skip
    pub x: i32,
    /// Vertical position, negative to skip
    pub y: i32,
    /// NES color index (0-63)
    pub color: u8,
}

impl PixelEntry {
    /// Create a new entry
    #[inline]
    pub const fn new(x: i32, y: i32, color: u8) -> Self {
        Self { x, y, color }
    }

    /// Whether this entry is a skip marker
    #[inline]
    pub const fn is_skipped(&self) -> bool {
        self.x < 0 || self.y < 0
    }
}

/// Fixed-capacity, caller-reset buffer of pixel writes for one frame
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    entries: Vec<PixelEntry>,
    capacity: usize,
}

impl PixelBuffer {
    /// Create an empty buffer that holds up to `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Create an empty buffer sized for one `width`×`height` frame
    pub fn for_frame(width: usize, height: usize) -> Self {
        Self::with_capacity(width * height)
    }

    /// Append a pixel write
    ///
    /// # Panics
    /// Panics if the buffer already holds a full frame of entries. A core
    /// that writes more than that forgot to clear the buffer between frames.
    #[inline]
    pub fn append(&mut self, x: i32, y: i32, color: u8) {
        assert!(
            self.entries.len() < self.capacity,
            "pixel buffer overflow: capacity is {} entries",
            self.capacity
        );
        self.entries.push(PixelEntry::new(x, y, color));
    }

    /// Drop all entries, keeping the allocation for the next frame
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of buffered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are buffered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate entries in insertion order without consuming them
    pub fn iter(&self) -> std::slice::Iter<'_, PixelEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PixelBuffer {
    type Item = &'a PixelEntry;
    type IntoIter = std::slice::Iter<'a, PixelEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
