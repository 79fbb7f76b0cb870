// NES HAL - Demo Entry Point
//
// Drives the HAL the way an emulation core does: one palette-indexed frame
// per timer tick, with a test pattern and a cursor moved by the D-pad.

use nes_hal::input::Button;
use nes_hal::{Hal, HalConfig, PixelBuffer, Wake, WinitHost, CONFIG_FILE};

/// Swatch size of the palette test pattern
const SWATCH: i32 = 16;

/// Cursor edge length
const CURSOR: i32 = 8;

/// Buffer entries the cursor appends every frame
const CURSOR_ENTRIES: usize = (CURSOR * CURSOR) as usize;

/// Backgrounds cycled with START
const BACKGROUNDS: [u8; 4] = [0x0F, 0x01, 0x0A, 0x16];

/// Demo state carried between frames
struct Demo {
    cursor_x: i32,
    cursor_y: i32,
    cursor_color: u8,
    background: usize,
    show_palette: bool,
    previous: [bool; Button::COUNT],
}

impl Demo {
    fn new() -> Self {
        Self {
            cursor_x: 124,
            cursor_y: 160,
            cursor_color: 0x30,
            background: 0,
            show_palette: true,
            previous: [false; Button::COUNT],
        }
    }

    fn update(&mut self, buttons: [bool; Button::COUNT], width: i32, height: i32) {
        let pressed = |button: Button| buttons[button.index()];
        let previous = self.previous;
        let just_pressed = |button: Button| pressed(button) && !previous[button.index()];

        if pressed(Button::Left) {
            self.cursor_x -= 1;
        }
        if pressed(Button::Right) {
            self.cursor_x += 1;
        }
        if pressed(Button::Up) {
            self.cursor_y -= 1;
        }
        if pressed(Button::Down) {
            self.cursor_y += 1;
        }
        self.cursor_x = self.cursor_x.clamp(0, (width - CURSOR).max(0));
        self.cursor_y = self.cursor_y.clamp(0, (height - CURSOR).max(0));

        if just_pressed(Button::A) {
            self.cursor_color = (self.cursor_color + 1) % 0x40;
        }
        if just_pressed(Button::B) {
            self.cursor_color = (self.cursor_color + 0x3F) % 0x40;
        }
        if just_pressed(Button::Start) {
            self.background = (self.background + 1) % BACKGROUNDS.len();
        }
        if just_pressed(Button::Select) {
            self.show_palette = !self.show_palette;
        }
        if just_pressed(Button::Power) {
            *self = Self::new();
        }

        self.previous = buttons;
    }

    fn background(&self) -> u8 {
        BACKGROUNDS[self.background]
    }

    fn draw(&self, buffer: &mut PixelBuffer, width: i32, height: i32) {
        if self.show_palette {
            // 16 columns x 4 rows of swatches covering the whole palette,
            // cut short on small surfaces so the cursor still fits
            let free = buffer.capacity().saturating_sub(CURSOR_ENTRIES) as i32;
            let rows = (SWATCH * 4).min(height).min(free / width);
            for y in 0..rows {
                for x in 0..(SWATCH * 16).min(width) {
                    let color = ((y / SWATCH) * 16 + x / SWATCH) as u8;
                    buffer.append(x, y, color);
                }
            }
        }

        for dy in 0..CURSOR {
            for dx in 0..CURSOR {
                let corner = (dx == 0 || dx == CURSOR - 1) && (dy == 0 || dy == CURSOR - 1);
                let (x, y) = (self.cursor_x + dx, self.cursor_y + dy);
                if corner || x >= width || y >= height {
                    // Rounded corners: reserve the slot but draw nothing
                    buffer.append(-1, -1, 0);
                } else {
                    buffer.append(x, y, self.cursor_color);
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("NES HAL (nes-hal) v0.1.0");
    println!("========================");
    println!();

    // Load or create configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = HalConfig::load_or_default(&config_path);
    println!("Configuration loaded from '{}'", config_path);
    println!();

    let host = WinitHost::new(&config.video)?;
    let mut hal = Hal::init(host, config)?;
    let width = hal.width() as i32;
    let height = hal.height() as i32;
    if width < CURSOR || height < CURSOR {
        return Err(format!(
            "the demo needs a surface of at least {}x{} pixels, got {}x{}",
            CURSOR, CURSOR, width, height
        )
        .into());
    }

    println!();
    println!("Controls:");
    println!("  D-pad  - Move cursor");
    println!("  A / B  - Change cursor color");
    println!("  START  - Cycle background");
    println!("  SELECT - Toggle palette swatches");
    println!("  POWER  - Reset demo");
    println!();
    println!("Press the close button or Ctrl+C to exit.");
    println!();

    let mut buffer = hal.new_frame_buffer();
    let mut demo = Demo::new();

    loop {
        if hal.wait_for_next_frame()? == Wake::Quit {
            break;
        }

        demo.update(hal.buttons(), width, height);

        buffer.clear();
        demo.draw(&mut buffer, width, height);

        hal.set_background(demo.background());
        hal.flush(&buffer);
        hal.present()?;
    }

    println!("Display window closed.");
    Ok(())
}
