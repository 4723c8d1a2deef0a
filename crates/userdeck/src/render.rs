#![forbid(unsafe_code)]

//! Minimal render layer: rect geometry, styled cells, and a frame buffer
//! presented to the terminal as one full redraw per frame.
//!
//! Text drawing is grapheme- and width-aware: each cell holds one grapheme
//! cluster, and a double-width cluster occupies its cell plus a
//! zero-width continuation cell that the presenter skips.

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// An axis-aligned region of the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column past the right edge.
    #[must_use]
    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// First row past the bottom edge.
    #[must_use]
    pub const fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub const fn contains(self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `margin` cells on every side.
    #[must_use]
    pub const fn inner(self, margin: u16) -> Self {
        let shrink = margin.saturating_mul(2);
        Self {
            x: self.x.saturating_add(margin),
            y: self.y.saturating_add(margin),
            width: self.width.saturating_sub(shrink),
            height: self.height.saturating_sub(shrink),
        }
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Foreground/background colors plus the attributes this app uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
}

impl Style {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Cells and buffer
// ---------------------------------------------------------------------------

/// One terminal cell: a grapheme cluster and its style.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    symbol: String,
    width: u8,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: " ".to_string(),
            width: 1,
            style: Style::default(),
        }
    }
}

impl Cell {
    #[must_use]
    pub fn new(symbol: impl Into<String>, width: u8, style: Style) -> Self {
        Self {
            symbol: symbol.into(),
            width,
            style,
        }
    }

    #[must_use]
    pub fn blank(style: Style) -> Self {
        Self::new(" ", 1, style)
    }

    /// Placeholder behind a double-width grapheme; never printed.
    #[must_use]
    fn continuation(style: Style) -> Self {
        Self::new("", 0, style)
    }

    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.width == 0
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// A width × height grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to the default blank.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Blank out `area` with `style` (background clear).
    pub fn fill(&mut self, area: Rect, style: Style) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                self.set(x, y, Cell::blank(style));
            }
        }
    }

    /// Draw `text` at `(x, y)`, clipping at `max_x` (exclusive).
    ///
    /// Returns the column after the last drawn grapheme. Clipping never
    /// splits a double-width cluster: a cluster that does not fit stops the
    /// draw instead of spilling.
    pub fn set_text(&mut self, mut x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        for grapheme in text.graphemes(true) {
            if x >= max_x {
                break;
            }
            let w = UnicodeWidthStr::width(grapheme);
            if w == 0 {
                continue;
            }
            if x + w as u16 > max_x {
                break;
            }
            self.set(x, y, Cell::new(grapheme, w as u8, style));
            if w == 2 {
                self.set(x + 1, y, Cell::continuation(style));
            }
            x = x.saturating_add(w as u16);
        }
        x
    }

    /// Text content of one row, for assertions in tests.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y)
                && !cell.is_continuation()
            {
                out.push_str(cell.symbol());
            }
        }
        out.trim_end().to_string()
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// A renderable component. Widgets draw themselves into a buffer region.
pub trait Widget {
    fn render(&self, area: Rect, buf: &mut Buffer);
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

fn apply_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), style::ResetColor)?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(bg))?;
    }
    Ok(())
}

/// Write the whole buffer to the terminal as one queued batch.
pub fn present(buffer: &Buffer, out: &mut impl Write) -> io::Result<()> {
    let mut current: Option<Style> = None;
    for y in 0..buffer.height() {
        queue!(out, cursor::MoveTo(0, y))?;
        for x in 0..buffer.width() {
            let Some(cell) = buffer.get(x, y) else {
                continue;
            };
            if cell.is_continuation() {
                continue;
            }
            if current != Some(cell.style) {
                apply_style(out, cell.style)?;
                current = Some(cell.style);
            }
            queue!(out, style::Print(cell.symbol()))?;
        }
    }
    queue!(out, SetAttribute(Attribute::Reset), style::ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── geometry ────────────────────────────────────────────────────

    #[test]
    fn rect_edges() {
        let r = Rect::new(2, 3, 4, 5);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 8);
        assert!(!r.is_empty());
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(1, 1, 2, 2);
        assert!(r.contains(1, 1));
        assert!(r.contains(2, 2));
        assert!(!r.contains(3, 1));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn rect_inner_shrinks_all_sides() {
        let r = Rect::new(0, 0, 10, 6).inner(1);
        assert_eq!(r, Rect::new(1, 1, 8, 4));
    }

    #[test]
    fn rect_inner_collapses_to_empty() {
        assert!(Rect::new(0, 0, 2, 2).inner(1).is_empty());
    }

    // ── buffer text ─────────────────────────────────────────────────

    #[test]
    fn set_text_basic() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_text(0, 0, "ABC", Style::default(), 10);
        assert_eq!(end, 3);
        assert_eq!(buf.row_text(0), "ABC");
    }

    #[test]
    fn set_text_clips_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_text(0, 0, "ABCDEF", Style::default(), 3);
        assert_eq!(end, 3);
        assert_eq!(buf.row_text(0), "ABC");
    }

    #[test]
    fn set_text_starts_at_offset() {
        let mut buf = Buffer::new(10, 1);
        buf.set_text(5, 0, "XY", Style::default(), 10);
        assert_eq!(buf.row_text(0), "     XY");
    }

    #[test]
    fn set_text_wide_grapheme_takes_two_cells() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_text(0, 0, "日x", Style::default(), 10);
        assert_eq!(end, 3);
        assert!(buf.get(1, 0).unwrap().is_continuation());
        assert_eq!(buf.get(2, 0).unwrap().symbol(), "x");
    }

    #[test]
    fn set_text_does_not_split_wide_grapheme() {
        let mut buf = Buffer::new(10, 1);
        // Width budget of 1 cannot hold a double-width cluster.
        let end = buf.set_text(0, 0, "日", Style::default(), 1);
        assert_eq!(end, 0);
        assert_eq!(buf.row_text(0), "");
    }

    #[test]
    fn set_text_out_of_bounds_row_is_ignored() {
        let mut buf = Buffer::new(4, 1);
        buf.set_text(0, 5, "ABC", Style::default(), 4);
        assert_eq!(buf.row_text(0), "");
    }

    #[test]
    fn reset_restores_blanks() {
        let mut buf = Buffer::new(4, 1);
        buf.set_text(0, 0, "ABCD", Style::default(), 4);
        buf.reset();
        assert_eq!(buf.row_text(0), "");
    }

    #[test]
    fn fill_applies_style() {
        let mut buf = Buffer::new(3, 2);
        let style = Style::new().bg(Color::Blue);
        buf.fill(Rect::new(0, 0, 3, 2), style);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buf.get(x, y).unwrap().style, style, "cell ({x},{y})");
            }
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_text_never_exceeds_max_x(
                text in "\\PC{0,40}",
                x in 0u16..30,
                max_x in 0u16..30,
            ) {
                let mut buf = Buffer::new(20, 2);
                let end = buf.set_text(x, 0, &text, Style::default(), max_x);
                // Either nothing fit (cursor unchanged) or drawing stopped
                // at the clip column.
                prop_assert!(end <= x.max(max_x.min(buf.width())));
            }
        }
    }

    // ── presenter ───────────────────────────────────────────────────

    #[test]
    fn present_emits_every_printable_cell() {
        let mut buf = Buffer::new(4, 1);
        buf.set_text(0, 0, "hi", Style::default(), 4);
        let mut out = Vec::new();
        present(&buf, &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains('h'));
        assert!(rendered.contains('i'));
    }
}
