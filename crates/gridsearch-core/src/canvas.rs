//! Drawable screen buffer: [`Color`], [`Glyph`], [`Canvas`], and frame
//! diffing via [`compute_frame`].

use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// The default / unset colour. Drivers map it to the terminal default.
    pub const DEFAULT: Self = Self(0);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

// ---------------------------------------------------------------------------
// Glyph
// ---------------------------------------------------------------------------

/// A coloured character occupying one screen cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    #[inline]
    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self::new(' ', Color::DEFAULT, Color::DEFAULT)
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A fixed-size, row-major buffer of [`Glyph`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    bounds: Range,
}

impl Canvas {
    /// Create a blank canvas of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            glyphs: vec![Glyph::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Glyph at `p`, or a blank glyph outside the canvas.
    pub fn at(&self, p: Point) -> Glyph {
        self.index(p)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op outside the canvas.
    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    /// Fill every cell with `glyph`.
    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` left to right starting at `p`, clipped to the canvas.
    /// Returns the number of cells written.
    pub fn text(&mut self, p: Point, text: &str, fg: Color, bg: Color) -> usize {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(i as i32, 0);
            if !self.bounds.contains(q) {
                break;
            }
            self.set(q, Glyph::new(ch, fg, bg));
            written += 1;
        }
        written
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub glyph: Glyph,
    pub pos: Point,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two canvases.
///
/// Returns a [`Frame`] containing only the cells of `curr` that differ from
/// `prev`.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let bounds = curr.bounds();
    let cells = bounds
        .iter()
        .filter_map(|p| {
            let glyph = curr.at(p);
            (prev.at(p) != glyph).then_some(FrameCell { glyph, pos: p })
        })
        .collect();
    Frame {
        cells,
        width: bounds.width(),
        height: bounds.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::from_rgb(10, 20, 30);
        assert_eq!((c.r(), c.g(), c.b()), (10, 20, 30));
    }

    #[test]
    fn set_and_at_ignore_out_of_bounds() {
        let mut cv = Canvas::new(3, 2);
        let g = Glyph::new('x', Color::from_rgb(1, 2, 3), Color::DEFAULT);
        cv.set(Point::new(2, 1), g);
        cv.set(Point::new(5, 5), g);
        assert_eq!(cv.at(Point::new(2, 1)), g);
        assert_eq!(cv.at(Point::new(5, 5)), Glyph::default());
    }

    #[test]
    fn text_is_clipped() {
        let mut cv = Canvas::new(4, 1);
        let n = cv.text(Point::new(1, 0), "hello", Color::DEFAULT, Color::DEFAULT);
        assert_eq!(n, 3);
        assert_eq!(cv.at(Point::new(3, 0)).ch, 'l');
    }

    #[test]
    fn frame_contains_only_changes() {
        let prev = Canvas::new(3, 3);
        let mut curr = prev.clone();
        assert!(compute_frame(&prev, &curr).cells.is_empty());

        let g = Glyph::new('#', Color::DEFAULT, Color::DEFAULT);
        curr.set(Point::new(1, 1), g);
        let frame = compute_frame(&prev, &curr);
        assert_eq!(frame.cells, vec![FrameCell { glyph: g, pos: Point::new(1, 1) }]);
        assert_eq!((frame.width, frame.height), (3, 3));
    }
}
