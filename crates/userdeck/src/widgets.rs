#![forbid(unsafe_code)]

//! Widgets: bordered panel, selector list, and the shared list cursor.

use std::borrow::Cow;
use std::cell::Cell as StdCell;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::render::{Buffer, Rect, Style, Widget};

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// Which box-drawing corners a panel uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderKind {
    #[default]
    Square,
    Rounded,
}

impl BorderKind {
    const fn corners(self) -> [char; 4] {
        match self {
            Self::Square => ['┌', '┐', '└', '┘'],
            Self::Rounded => ['╭', '╮', '╰', '╯'],
        }
    }
}

/// A bordered container with an optional ellipsized title.
#[derive(Debug, Clone, Default)]
pub struct Panel<'a> {
    title: Option<&'a str>,
    border_style: Style,
    title_style: Style,
    kind: BorderKind,
}

impl<'a> Panel<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.kind = BorderKind::Rounded;
        self
    }

    /// The content area inside the borders.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    }

    fn ellipsize(s: &str, max_width: usize) -> Cow<'_, str> {
        let total = UnicodeWidthStr::width(s);
        if total <= max_width {
            return Cow::Borrowed(s);
        }
        if max_width == 0 {
            return Cow::Borrowed("");
        }
        if max_width == 1 {
            return Cow::Borrowed("…");
        }

        let mut out = String::new();
        let mut used = 0usize;
        let target = max_width - 1;

        for g in s.graphemes(true) {
            let w = UnicodeWidthStr::width(g);
            if w == 0 {
                continue;
            }
            if used + w > target {
                break;
            }
            out.push_str(g);
            used += w;
        }

        out.push('…');
        Cow::Owned(out)
    }
}

impl Widget for Panel<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 2 {
            return;
        }

        let [tl, tr, bl, br] = self.kind.corners();
        let set = |buf: &mut Buffer, x: u16, y: u16, c: char| {
            buf.set(
                x,
                y,
                crate::render::Cell::new(c.to_string(), 1, self.border_style),
            );
        };

        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        for x in area.x + 1..right {
            set(buf, x, area.y, '─');
            set(buf, x, bottom, '─');
        }
        for y in area.y + 1..bottom {
            set(buf, area.x, y, '│');
            set(buf, right, y, '│');
        }
        set(buf, area.x, area.y, tl);
        set(buf, right, area.y, tr);
        set(buf, area.x, bottom, bl);
        set(buf, right, bottom, br);

        if let Some(title) = self.title {
            let available = area.width.saturating_sub(2) as usize;
            let title = Self::ellipsize(title, available);
            buf.set_text(area.x + 1, area.y, title.as_ref(), self.title_style, right);
        }
    }
}

// ---------------------------------------------------------------------------
// Selector list
// ---------------------------------------------------------------------------

/// Cursor + scroll state for a [`SelectorList`].
///
/// The scroll offset is interior-mutable so the view (which renders from
/// `&App`) can keep the cursor visible without a mutable pass.
#[derive(Debug, Default)]
pub struct ListState {
    selected: usize,
    offset: StdCell<usize>,
}

impl ListState {
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
    }

    /// Move the cursor up one row.
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the cursor down one row, clamped to `len`.
    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    /// Scroll offset that keeps the selection inside `visible` rows.
    fn scrolled_offset(&self, len: usize, visible: usize) -> usize {
        if visible == 0 || len == 0 {
            return 0;
        }
        let mut offset = self.offset.get().min(len.saturating_sub(1));
        let selected = self.selected.min(len - 1);
        if selected < offset {
            offset = selected;
        } else if selected >= offset + visible {
            offset = selected + 1 - visible;
        }
        self.offset.set(offset);
        offset
    }
}

/// A vertical list with a highlighted cursor row.
#[derive(Debug)]
pub struct SelectorList<'a> {
    items: &'a [String],
    state: &'a ListState,
    style: Style,
    highlight_style: Style,
    focused: bool,
}

impl<'a> SelectorList<'a> {
    #[must_use]
    pub fn new(items: &'a [String], state: &'a ListState) -> Self {
        Self {
            items,
            state,
            style: Style::default(),
            highlight_style: Style::default(),
            focused: false,
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SelectorList<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let visible = area.height as usize;
        let offset = self.state.scrolled_offset(self.items.len(), visible);

        for (row, item) in self.items.iter().skip(offset).take(visible).enumerate() {
            let index = offset + row;
            let y = area.y + row as u16;
            let selected = index == self.state.selected();
            let (marker, style) = if selected {
                (if self.focused { "❯ " } else { "› " }, self.highlight_style)
            } else {
                ("  ", self.style)
            };
            let x = buf.set_text(area.x, y, marker, style, area.right());
            buf.set_text(x, y, item, style, area.right());
        }
    }
}
