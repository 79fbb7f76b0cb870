// Frame Presenter - Resolves buffered pixel writes onto the host surface
//
// Per frame the emulation core typically calls set_background, then flush
// with its pixel buffer, then present. Each step is also callable on its
// own: flushing the same buffer twice writes the same pixels twice.

use super::palette::lookup;
use super::pixel_buffer::PixelBuffer;
use super::surface::Surface;
use crate::error::HalError;

/// Writes palette-resolved pixels into a surface and presents it
#[derive(Debug, Clone, Default)]
pub struct FramePresenter {
    /// Last background color index, if any was set
    background: Option<u8>,
    /// Number of frames presented so far
    frames_presented: u64,
}

impl FramePresenter {
    /// Create a presenter with no background set
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the whole surface with the color of `color`
    ///
    /// # Arguments
    /// * `surface` - Target surface
    /// * `color` - NES color index (0-63)
    pub fn set_background<S: Surface + ?Sized>(&mut self, surface: &mut S, color: u8) {
        let format = surface.format();
        let value = format.map_rgb(lookup(color));
        let bpp = format.bytes_per_pixel;
        let row_bytes = surface.width() * bpp;
        let pitch = surface.pitch();

        for row in surface.pixels_mut().chunks_mut(pitch) {
            for pixel in row[..row_bytes].chunks_exact_mut(bpp) {
                format.write_pixel(pixel, value);
            }
        }

        self.background = Some(color);
    }

    /// Write every buffered entry into the surface, in insertion order
    ///
    /// Entries with a negative coordinate are skipped. Later entries for the
    /// same coordinate overwrite earlier ones.
    ///
    /// # Panics
    /// Panics if a non-negative coordinate lies outside the surface.
    pub fn flush<S: Surface + ?Sized>(&self, surface: &mut S, buffer: &PixelBuffer) {
        let format = surface.format();
        let bpp = format.bytes_per_pixel;
        let width = surface.width();
        let height = surface.height();
        let pitch = surface.pitch();
        let pixels = surface.pixels_mut();

        for entry in buffer {
            if entry.is_skipped() {
                continue;
            }

            let (x, y) = (entry.x as usize, entry.y as usize);
            assert!(x < width, "X coordinate {} out of bounds", x);
            assert!(y < height, "Y coordinate {} out of bounds", y);

            let offset = y * pitch + x * bpp;
            format.write_pixel(&mut pixels[offset..], format.map_rgb(lookup(entry.color)));
        }
    }

    /// Show the composed surface
    ///
    /// A presentation failure is returned as-is; there is no degraded mode
    /// to fall back to.
    pub fn present<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), HalError> {
        surface.present()?;
        self.frames_presented += 1;
        Ok(())
    }

    /// Background color index set most recently
    pub fn background(&self) -> Option<u8> {
        self.background
    }

    /// Number of successful presents
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::palette::Rgb;
    use crate::display::surface::{MemorySurface, PixelFormat};

    fn surface() -> MemorySurface {
        MemorySurface::new(8, 4, PixelFormat::XRGB8888)
    }

    #[test]
    fn test_background_fills_every_pixel() {
        let mut surface = surface();
        let mut presenter = FramePresenter::new();
        presenter.set_background(&mut surface, 0x21);

        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(surface.rgb_at(x, y), lookup(0x21));
            }
        }
        assert_eq!(presenter.background(), Some(0x21));
    }

    #[test]
    fn test_flush_empty_buffer_keeps_background() {
        let mut surface = surface();
        let mut presenter = FramePresenter::new();
        presenter.set_background(&mut surface, 0x0F);
        presenter.flush(&mut surface, &PixelBuffer::for_frame(8, 4));

        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(surface.rgb_at(x, y), lookup(0x0F));
            }
        }
    }

    #[test]
    fn test_flush_skips_negative_coordinates() {
        let mut surface = surface();
        let presenter = FramePresenter::new();
        let mut buf = PixelBuffer::for_frame(8, 4);
        buf.append(-1, 0, 0x21);
        buf.append(0, -1, 0x21);
        buf.append(-3, -3, 0x21);
        presenter.flush(&mut surface, &buf);

        assert!(surface.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_flush_last_write_wins() {
        let mut surface = surface();
        let presenter = FramePresenter::new();
        let mut buf = PixelBuffer::for_frame(8, 4);
        buf.append(5, 2, 0x21);
        buf.append(5, 2, 0x16);
        presenter.flush(&mut surface, &buf);

        assert_eq!(surface.rgb_at(5, 2), lookup(0x16));
    }

    #[test]
    fn test_flush_is_repeatable() {
        let mut surface = surface();
        let presenter = FramePresenter::new();
        let mut buf = PixelBuffer::for_frame(8, 4);
        buf.append(1, 1, 0x2A);

        presenter.flush(&mut surface, &buf);
        let first = surface.as_bytes().to_vec();
        presenter.flush(&mut surface, &buf);
        assert_eq!(surface.as_bytes(), &first[..]);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_flush_uses_surface_encoding() {
        let mut surface = MemorySurface::new(2, 1, PixelFormat::RGB565);
        let presenter = FramePresenter::new();
        let mut buf = PixelBuffer::for_frame(2, 1);
        buf.append(1, 0, 0x20);
        presenter.flush(&mut surface, &buf);

        assert_eq!(surface.pixel(1, 0), 0xFFFF);
        assert_eq!(surface.pixel(0, 0), 0);
        assert_eq!(surface.rgb_at(1, 0), Rgb::new(0xF8, 0xFC, 0xF8));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_flush_asserts_on_overflow() {
        let mut surface = surface();
        let presenter = FramePresenter::new();
        let mut buf = PixelBuffer::for_frame(8, 4);
        buf.append(8, 0, 0x01);
        presenter.flush(&mut surface, &buf);
    }

    #[test]
    fn test_present_counts_frames() {
        let mut surface = surface();
        let mut presenter = FramePresenter::new();
        presenter.present(&mut surface).unwrap();
        assert_eq!(presenter.frames_presented(), 1);
        assert_eq!(surface.present_count(), 1);
    }
}
