// Surface - The host's mutable pixel surface and its native encoding
//
// The presenter never assumes a byte layout. Every surface reports a
// PixelFormat (bytes per pixel plus one bit mask per channel) and colors are
// packed through it before being written, the same way a windowing library
// maps RGB onto whatever format its window surface happens to use.

use super::palette::Rgb;
use crate::error::HalError;

/// Native encoding of a surface pixel
///
/// Pixel values are stored little-endian in `bytes_per_pixel` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    /// Bytes per pixel (2, 3 or 4)
    pub bytes_per_pixel: usize,
    /// Red channel mask
    pub r_mask: u32,
    /// Green channel mask
    pub g_mask: u32,
    /// Blue channel mask
    pub b_mask: u32,
    /// Alpha channel mask (0 when the format has no alpha)
    pub a_mask: u32,
}

impl PixelFormat {
    /// Byte order R, G, B, A: the frame layout of the `pixels` crate
    pub const RGBA8: PixelFormat = PixelFormat {
        bytes_per_pixel: 4,
        r_mask: 0x0000_00FF,
        g_mask: 0x0000_FF00,
        b_mask: 0x00FF_0000,
        a_mask: 0xFF00_0000,
    };

    /// 32-bit 0x00RRGGBB with an unused top byte
    pub const XRGB8888: PixelFormat = PixelFormat {
        bytes_per_pixel: 4,
        r_mask: 0x00FF_0000,
        g_mask: 0x0000_FF00,
        b_mask: 0x0000_00FF,
        a_mask: 0,
    };

    /// 16-bit 5-6-5
    pub const RGB565: PixelFormat = PixelFormat {
        bytes_per_pixel: 2,
        r_mask: 0xF800,
        g_mask: 0x07E0,
        b_mask: 0x001F,
        a_mask: 0,
    };

    /// Pack a color into this format's pixel value
    ///
    /// Channels narrower than 8 bits keep their most significant bits.
    /// Alpha, when present, is fully opaque.
    #[inline]
    pub fn map_rgb(&self, color: Rgb) -> u32 {
        pack_channel(color.r, self.r_mask)
            | pack_channel(color.g, self.g_mask)
            | pack_channel(color.b, self.b_mask)
            | self.a_mask
    }

    /// Unpack a pixel value back into a color
    pub fn unmap(&self, value: u32) -> Rgb {
        Rgb::new(
            unpack_channel(value, self.r_mask),
            unpack_channel(value, self.g_mask),
            unpack_channel(value, self.b_mask),
        )
    }

    /// Store a packed pixel value into `dst`
    #[inline]
    pub fn write_pixel(&self, dst: &mut [u8], value: u32) {
        let bpp = self.bytes_per_pixel;
        dst[..bpp].copy_from_slice(&value.to_le_bytes()[..bpp]);
    }

    /// Load a packed pixel value from `src`
    pub fn read_pixel(&self, src: &[u8]) -> u32 {
        let mut bytes = [0u8; 4];
        bytes[..self.bytes_per_pixel].copy_from_slice(&src[..self.bytes_per_pixel]);
        u32::from_le_bytes(bytes)
    }
}

fn pack_channel(channel: u8, mask: u32) -> u32 {
    if mask == 0 {
        return 0;
    }
    let shift = mask.trailing_zeros();
    let bits = mask.count_ones();
    let value = if bits >= 8 {
        (channel as u32) << (bits - 8)
    } else {
        (channel as u32) >> (8 - bits)
    };
    (value << shift) & mask
}

fn unpack_channel(value: u32, mask: u32) -> u8 {
    if mask == 0 {
        return 0;
    }
    let shift = mask.trailing_zeros();
    let bits = mask.count_ones();
    let raw = (value & mask) >> shift;
    if bits >= 8 {
        (raw >> (bits - 8)) as u8
    } else {
        (raw << (8 - bits)) as u8
    }
}

/// A mutable 2-D pixel surface provided by the host
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> usize;

    /// Height in pixels
    fn height(&self) -> usize;

    /// Native pixel encoding
    fn format(&self) -> PixelFormat;

    /// Bytes per row
    fn pitch(&self) -> usize {
        self.width() * self.format().bytes_per_pixel
    }

    /// Raw pixel memory, `pitch() * height()` bytes
    fn pixels_mut(&mut self) -> &mut [u8];

    /// Show the composed surface on the next refresh
    ///
    /// An error here means the display target is gone and is fatal.
    fn present(&mut self) -> Result<(), HalError>;
}

/// Software surface backed by a byte vector
///
/// Used as the composition target of the window host and directly as a
/// headless target for tests and benchmarks.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
    presented: u64,
}

impl MemorySurface {
    /// Create a zeroed surface in the given format
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0; width * height * format.bytes_per_pixel],
            presented: 0,
        }
    }

    /// Create a zeroed RGBA8 surface
    pub fn rgba(width: usize, height: usize) -> Self {
        Self::new(width, height, PixelFormat::RGBA8)
    }

    /// Packed pixel value at `(x, y)`
    ///
    /// # Panics
    /// Panics if the coordinates are outside the surface
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);
        let offset = y * self.pitch() + x * self.format.bytes_per_pixel;
        self.format.read_pixel(&self.data[offset..])
    }

    /// Decoded color at `(x, y)`
    pub fn rgb_at(&self, x: usize, y: usize) -> Rgb {
        self.format.unmap(self.pixel(x, y))
    }

    /// Raw pixel memory
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of times the surface has been presented
    pub fn present_count(&self) -> u64 {
        self.presented
    }
}

impl Surface for MemorySurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn present(&mut self) -> Result<(), HalError> {
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_matches_pixels_byte_order() {
        let value = PixelFormat::RGBA8.map_rgb(Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(value.to_le_bytes(), [0x12, 0x34, 0x56, 0xFF]);
    }

    #[test]
    fn test_xrgb8888_mapping() {
        let value = PixelFormat::XRGB8888.map_rgb(Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(value, 0x0012_3456);
        assert_eq!(PixelFormat::XRGB8888.unmap(value), Rgb::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_rgb565_keeps_high_bits() {
        let value = PixelFormat::RGB565.map_rgb(Rgb::new(0xFF, 0x80, 0x08));
        assert_eq!(value, (0x1F << 11) | (0x20 << 5) | 0x01);
        assert_eq!(
            PixelFormat::RGB565.unmap(value),
            Rgb::new(0xF8, 0x80, 0x08)
        );
    }

    #[test]
    fn test_write_read_pixel_respects_width() {
        let mut bytes = [0xAAu8; 4];
        PixelFormat::RGB565.write_pixel(&mut bytes, 0x1234);
        assert_eq!(bytes, [0x34, 0x12, 0xAA, 0xAA]);
        assert_eq!(PixelFormat::RGB565.read_pixel(&bytes), 0x1234);
    }

    #[test]
    fn test_memory_surface_layout() {
        let mut surface = MemorySurface::new(4, 3, PixelFormat::XRGB8888);
        assert_eq!(surface.pitch(), 16);
        assert_eq!(surface.pixels_mut().len(), 48);
        assert_eq!(surface.pixel(3, 2), 0);
    }

    #[test]
    fn test_memory_surface_present_counts() {
        let mut surface = MemorySurface::rgba(2, 2);
        surface.present().unwrap();
        surface.present().unwrap();
        assert_eq!(surface.present_count(), 2);
    }

    #[test]
    #[should_panic]
    fn test_pixel_out_of_bounds() {
        let surface = MemorySurface::rgba(2, 2);
        surface.pixel(2, 0);
    }
}
