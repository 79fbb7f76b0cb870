// Display module - Palette-indexed frame composition
//
// This module provides:
// - The fixed 64-entry NES color palette
// - The per-frame pixel buffer the emulation core fills
// - The surface abstraction and its in-memory implementation
// - The presenter that fills, flushes and shows frames
// - The desktop window host (winit + pixels)

pub mod palette;
pub mod pixel_buffer;
pub mod presenter;
pub mod surface;
pub mod window;

pub use palette::{lookup, palette_to_rgba, Rgb, NES_PALETTE, PALETTE_SIZE};
pub use pixel_buffer::{PixelBuffer, PixelEntry};
pub use presenter::FramePresenter;
pub use surface::{MemorySurface, PixelFormat, Surface};
pub use window::WinitHost;

/// NES screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// NES screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;
