// vim: set ai et ts=4 sw=4 sts=4:
use std::io::Cursor;
use image::{ColorType, ImageError, ImageFormat};

use super::clues::ClueSet;
use super::grid::{CellState, Grid};

const CELL_SIZE: u32 = 30;  // edge length of one drawn cell
const MARGIN: u32 = 50;     // clue gutter on every side of the cell area

const ROW_CLUE_X: u32 = 10;      // row clue labels start here in the left gutter
const COL_CLUE_Y: u32 = 10;      // column clue stacks start here in the top gutter
const COL_CLUE_STEP: u32 = 10;   // vertical spacing between stacked column clue values
const TEXT_INSET: u32 = 5;       // offset of clue text into its row/column band

struct Palette;
impl Palette {
    const BG: [u8; 3] = [255, 255, 255];
    const FILLED: [u8; 3] = [0, 0, 0];
    const EMPTY: [u8; 3] = [255, 255, 255];
    const OUTLINE: [u8; 3] = [0, 0, 0];
    const CLUE_TEXT: [u8; 3] = [0, 0, 0];
}

// 5x7 digit glyphs; each row's lower 5 bits are pixels, MSB on the left.
// Glyph cell is 6px wide (5 + 1 spacing).
const CHAR_W: u32 = 6;

#[rustfmt::skip]
const DIGITS_5X7: [[u8; 7]; 10] = [
    [0x0E,0x11,0x13,0x15,0x19,0x11,0x0E], // 0
    [0x04,0x0C,0x04,0x04,0x04,0x04,0x0E], // 1
    [0x0E,0x11,0x01,0x02,0x04,0x08,0x1F], // 2
    [0x1F,0x02,0x04,0x02,0x01,0x11,0x0E], // 3
    [0x02,0x06,0x0A,0x12,0x1F,0x02,0x02], // 4
    [0x1F,0x10,0x1E,0x01,0x01,0x11,0x0E], // 5
    [0x06,0x08,0x10,0x1E,0x11,0x11,0x0E], // 6
    [0x1F,0x01,0x02,0x04,0x08,0x08,0x08], // 7
    [0x0E,0x11,0x11,0x0E,0x11,0x11,0x0E], // 8
    [0x0E,0x11,0x11,0x0F,0x01,0x02,0x0C], // 9
];

/// A finished export image: PNG-encoded bytes plus the canvas dimensions.
/// Immutable once produced; handed off for delivery as-is.
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

struct Raster {
    width: u32,
    height: u32,
    buf: Vec<u8>, // RGB8, width * height * 3
}

impl Raster {
    fn new(width: u32, height: u32) -> Self {
        Raster {
            width,
            height,
            buf: vec![0u8; (width * height * 3) as usize],
        }
    }

    fn clear(&mut self, color: [u8; 3]) {
        for pixel in self.buf.chunks_exact_mut(3) {
            pixel.copy_from_slice(&color);
        }
    }

    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if x < self.width && y < self.height {
            let idx = ((y * self.width + x) * 3) as usize;
            self.buf[idx]     = color[0];
            self.buf[idx + 1] = color[1];
            self.buf[idx + 2] = color[2];
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 3]) {
        for dy in 0..h {
            for dx in 0..w {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    fn outline_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 3]) {
        for dx in 0..w {
            self.set_pixel(x + dx, y, color);
            self.set_pixel(x + dx, y + h - 1, color);
        }
        for dy in 0..h {
            self.set_pixel(x, y + dy, color);
            self.set_pixel(x + w - 1, y + dy, color);
        }
    }

    fn draw_char(&mut self, x: u32, y: u32, ch: char, color: [u8; 3]) {
        let digit = match ch.to_digit(10) {
            Some(d) => d as usize,
            None    => return, // clue text is digits and spaces only
        };
        let glyph = &DIGITS_5X7[digit];
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..5u32 {
                if bits & (0x10 >> col) != 0 {
                    self.set_pixel(x + col, y + row as u32, color);
                }
            }
        }
    }

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: [u8; 3]) {
        for (i, ch) in text.chars().enumerate() {
            self.draw_char(x + i as u32 * CHAR_W, y, ch, color);
        }
    }

    fn encode_png(&self) -> Result<RenderedImage, ImageError> {
        let mut bytes = Vec::new();
        image::write_buffer_with_format(&mut Cursor::new(&mut bytes),
                                        &self.buf,
                                        self.width,
                                        self.height,
                                        ColorType::Rgb8,
                                        ImageFormat::Png)?;
        Ok(RenderedImage {
            width: self.width,
            height: self.height,
            bytes,
        })
    }
}

/// Rasterizes the grid with its clue annotations into an in-memory PNG.
/// The clue set is taken as given rather than re-derived, so a caller can
/// annotate a partially revealed grid with the full solution's clues.
pub fn render(grid: &Grid, clues: &ClueSet) -> Result<RenderedImage, ImageError> {
    let canvas_w = grid.width() as u32 * CELL_SIZE + 2 * MARGIN;
    let canvas_h = grid.height() as u32 * CELL_SIZE + 2 * MARGIN;
    let mut raster = Raster::new(canvas_w, canvas_h);
    raster.clear(Palette::BG);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let x0 = MARGIN + x as u32 * CELL_SIZE;
            let y0 = MARGIN + y as u32 * CELL_SIZE;
            let fill = match grid.get_square(x, y).get_state() {
                CellState::Filled => Palette::FILLED,
                CellState::Empty  => Palette::EMPTY,
            };
            raster.fill_rect(x0, y0, CELL_SIZE, CELL_SIZE, fill);
            raster.outline_rect(x0, y0, CELL_SIZE, CELL_SIZE, Palette::OUTLINE);
        }
    }

    for (y, runs) in clues.rows.iter().enumerate() {
        let label = runs.iter()
                        .map(|n| n.to_string())
                        .collect::<Vec<_>>()
                        .join(" ");
        raster.draw_text(ROW_CLUE_X,
                         MARGIN + y as u32 * CELL_SIZE + TEXT_INSET,
                         &label,
                         Palette::CLUE_TEXT);
    }
    for (x, runs) in clues.cols.iter().enumerate() {
        for (k, n) in runs.iter().enumerate() {
            raster.draw_text(MARGIN + x as u32 * CELL_SIZE + TEXT_INSET,
                             COL_CLUE_Y + k as u32 * COL_CLUE_STEP,
                             &n.to_string(),
                             Palette::CLUE_TEXT);
        }
    }

    raster.encode_png()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::clues;
    use image::GenericImageView;

    fn decoded(grid: &Grid) -> image::DynamicImage {
        let img = render(grid, &clues::derive(grid)).unwrap();
        image::load_from_memory(&img.bytes).unwrap()
    }

    #[test]
    fn canvas_leaves_a_clue_gutter_on_every_side() {
        let mut grid = Grid::new(3, 2);
        grid.fill(0, 0);
        let img = render(&grid, &clues::derive(&grid)).unwrap();
        assert_eq!((img.width, img.height), (3 * 30 + 100, 2 * 30 + 100));
        let decoded = image::load_from_memory(&img.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (190, 160));
    }

    #[test]
    fn cells_are_filled_black_or_left_white() {
        let mut grid = Grid::new(2, 2);
        grid.fill(0, 0);
        let decoded = decoded(&grid);
        // cell centers: (0,0) is filled, (1,0) is not
        assert_eq!(decoded.get_pixel(65, 65), image::Rgba([0, 0, 0, 255]));
        assert_eq!(decoded.get_pixel(95, 65), image::Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn every_cell_gets_an_outline() {
        let grid = Grid::new(2, 2);
        let decoded = decoded(&grid);
        // top-left corner of the first (empty) cell sits on its 1px border
        assert_eq!(decoded.get_pixel(50, 50), image::Rgba([0, 0, 0, 255]));
        assert_eq!(decoded.get_pixel(50 + 29, 50 + 15), image::Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn clue_text_lands_in_the_margins() {
        let mut grid = Grid::new(1, 1);
        grid.fill(0, 0);
        let decoded = decoded(&grid);

        let black_in = |x0: u32, y0: u32, x1: u32, y1: u32| {
            (x0..x1).flat_map(|x| (y0..y1).map(move |y| (x, y)))
                    .any(|(x, y)| decoded.get_pixel(x, y) == image::Rgba([0, 0, 0, 255]))
        };
        // row clue "1" in the left gutter, column clue "1" in the top gutter
        assert!(black_in(0, 50, 49, 80));
        assert!(black_in(50, 0, 80, 49));
    }
}
