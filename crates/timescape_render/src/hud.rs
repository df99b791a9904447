//! Debug HUD overlay
//!
//! A tiny 3x5 bitmap font rendered straight into the live surface. The
//! overlay carries the detector status, the capture phase and the key
//! legend, and can be toggled off entirely.

use timescape_core::CapturePhase;
use timescape_input::DetectorStatus;

use crate::color::Color;
use crate::surface::Surface;

/// Pixel scale each font cell is blown up by
const FONT_SCALE: u32 = 2;

/// Depth the overlay draws at, in front of all world geometry
const HUD_Z: f32 = 1.0e9;

/// Draw `text` starting at (x, y) top-left, uppercased glyphs only
pub fn draw_text(surface: &mut Surface, text: &str, x: u32, y: u32, color: Color) {
    let mut cursor_x = x;
    for ch in text.chars() {
        let glyph = glyph(ch);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..3u32 {
                if bits & (1 << (2 - col)) != 0 {
                    for sy in 0..FONT_SCALE {
                        for sx in 0..FONT_SCALE {
                            surface.blend_pixel(
                                (cursor_x + col * FONT_SCALE + sx) as f32,
                                (y + row as u32 * FONT_SCALE + sy) as f32,
                                HUD_Z,
                                color,
                            );
                        }
                    }
                }
            }
        }
        cursor_x += 4 * FONT_SCALE;
        if cursor_x + 4 * FONT_SCALE > surface.width() {
            break;
        }
    }
}

/// Draw the full overlay in the top-left corner
pub fn draw_overlay(
    surface: &mut Surface,
    status: DetectorStatus,
    phase: CapturePhase,
    counter: u64,
) {
    let dim = Color::rgba(0.9, 0.9, 0.9, 0.8);
    let status_text = match status {
        DetectorStatus::Loading => "DETECTOR: LOADING",
        DetectorStatus::Ready => "DETECTOR: READY",
    };
    draw_text(surface, status_text, 8, 8, dim);

    let phase_text = match phase {
        CapturePhase::Idle => "IDLE",
        CapturePhase::Entering => "ENTERING",
        CapturePhase::Active => "RECORDING",
        CapturePhase::Exiting => "EXITING",
    };
    draw_text(surface, phase_text, 8, 22, dim);

    if phase == CapturePhase::Active {
        // Red dot next to the phase line while the art buffer records
        let rec = Color::rgba(1.0, 0.2, 0.2, 1.0);
        draw_text(surface, "REC", 96, 22, rec);
    }

    draw_text(surface, &format!("SHOTS: {}", counter.saturating_sub(1)), 8, 36, dim);
    draw_text(
        surface,
        "D: HUD  S: CAPTURE  HOLD FIST: CAPTURE",
        8,
        50,
        Color::rgba(0.6, 0.6, 0.6, 0.7),
    );
}

/// 3x5 glyphs, one row per byte, low 3 bits used
fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_marks_pixels() {
        let mut surface = Surface::new(120, 30);
        draw_text(&mut surface, "READY", 2, 2, Color::WHITE);
        let mut lit = 0;
        for y in 0..30 {
            for x in 0..120 {
                if surface.pixel(x, y) != [0, 0, 0, 255] {
                    lit += 1;
                }
            }
        }
        assert!(lit > 20);
    }

    #[test]
    fn test_overlay_renders_for_every_phase() {
        for phase in [
            CapturePhase::Idle,
            CapturePhase::Entering,
            CapturePhase::Active,
            CapturePhase::Exiting,
        ] {
            let mut surface = Surface::new(320, 80);
            draw_overlay(&mut surface, DetectorStatus::Ready, phase, 3);
        }
    }
}
