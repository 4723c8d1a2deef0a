#![forbid(unsafe_code)]

//! The dashboard view: header, filter sidebar, card grid, footer.
//!
//! Pure function of the [`App`] state. The card grid records its layout
//! (column count, card regions) back into the app through interior-mutable
//! slots so the next update can route movement and mouse hits.

use crossterm::style::Color;

use udeck_core::{FIELD_CATALOG, Record, RecordId, field, mask};

use crate::app::{App, Focus};
use crate::render::{Buffer, Rect, Style, Widget};
use crate::widgets::{Panel, SelectorList};

const SIDEBAR_WIDTH: u16 = 24;
const CARD_MIN_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 8;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// One masked/revealed row on a card.
struct CardRow {
    label: &'static str,
    path: &'static str,
    /// Render "n/a" instead of blank when revealed and absent.
    na_fallback: bool,
    /// Render as an `http://` hyperlink when revealed.
    hyperlink: bool,
}

const CARD_ROWS: &[CardRow] = &[
    CardRow { label: "User", path: "username", na_fallback: false, hyperlink: false },
    CardRow { label: "Email", path: "email", na_fallback: false, hyperlink: false },
    CardRow { label: "Phone", path: "phone", na_fallback: false, hyperlink: false },
    CardRow { label: "Site", path: "website", na_fallback: false, hyperlink: true },
    CardRow { label: "Company", path: "company.name", na_fallback: true, hyperlink: false },
    CardRow { label: "City", path: "address.city", na_fallback: true, hyperlink: false },
];

// ── palette ─────────────────────────────────────────────────────────

fn accent() -> Style {
    Style::new().fg(Color::Cyan)
}

fn chrome() -> Style {
    Style::new().dim()
}

fn title() -> Style {
    Style::new().bold()
}

fn masked_style() -> Style {
    Style::new().dim()
}

fn link_style() -> Style {
    Style::new().fg(Color::Blue).underline()
}

// ── layout ──────────────────────────────────────────────────────────

/// Render the whole dashboard into `buf`.
pub fn draw(app: &App, buf: &mut Buffer) {
    let area = Rect::new(0, 0, buf.width(), buf.height());
    if area.is_empty() {
        return;
    }

    draw_header(app, buf, Rect::new(0, 0, area.width, 1));

    if area.height < 3 {
        return;
    }
    draw_footer(buf, Rect::new(0, area.height - 1, area.width, 1));

    let body = Rect::new(0, 1, area.width, area.height - 2);
    let sidebar_width = SIDEBAR_WIDTH.min(body.width);
    let sidebar = Rect::new(body.x, body.y, sidebar_width, body.height);
    let cards = Rect::new(
        body.x + sidebar_width,
        body.y,
        body.width - sidebar_width,
        body.height,
    );

    draw_sidebar(app, buf, sidebar);
    draw_cards(app, buf, cards);
}

fn draw_header(app: &App, buf: &mut Buffer, area: Rect) {
    buf.set_text(area.x + 1, area.y, "User Deck", title(), area.right());

    let status = if app.loading() {
        String::new()
    } else {
        let total = app.dashboard().records().len();
        let selection = app.dashboard().selection();
        if selection.is_active() {
            let label = field::descriptor_for(selection.field())
                .map_or(selection.field(), |descriptor| descriptor.label);
            format!(
                "{} = {} · {}/{}",
                label,
                selection.value(),
                app.dashboard().filtered().len(),
                total
            )
        } else {
            format!("{total} users")
        }
    };
    let x = area
        .right()
        .saturating_sub(status.chars().count() as u16 + 1);
    buf.set_text(x, area.y, &status, chrome(), area.right());
}

fn draw_footer(buf: &mut Buffer, area: Rect) {
    let hints = "tab focus · ↑↓←→ move · enter select · double reveal · r show all · q quit";
    buf.set_text(area.x + 1, area.y, hints, chrome(), area.right());
}

fn draw_sidebar(app: &App, buf: &mut Buffer, area: Rect) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    // "(all fields)" + one row per catalog entry, inside borders.
    let fields_height = (FIELD_CATALOG.len() as u16 + 3).min(area.height);
    let fields_area = Rect::new(area.x, area.y, area.width, fields_height);
    let focused = app.focus() == Focus::Fields;

    let panel = Panel::new()
        .title(" Filter by ")
        .border_style(if focused { accent() } else { chrome() })
        .title_style(if focused { accent().bold() } else { chrome() });
    panel.render(fields_area, buf);

    let mut field_items = vec!["(all fields)".to_string()];
    field_items.extend(FIELD_CATALOG.iter().map(|d| d.label.to_string()));
    SelectorList::new(&field_items, app.field_state())
        .highlight_style(if focused { accent().bold() } else { title() })
        .focused(focused)
        .render(panel.inner(fields_area), buf);

    if !app.values_visible() {
        return;
    }

    let values_area = Rect::new(
        area.x,
        area.y + fields_height,
        area.width,
        area.height.saturating_sub(fields_height),
    );
    if values_area.height < 3 {
        return;
    }
    let focused = app.focus() == Focus::Values;
    let panel = Panel::new()
        .title(" Value ")
        .border_style(if focused { accent() } else { chrome() })
        .title_style(if focused { accent().bold() } else { chrome() });
    panel.render(values_area, buf);

    let mut value_items = vec!["(any value)".to_string()];
    value_items.extend(app.dashboard().options());
    SelectorList::new(&value_items, app.value_state())
        .highlight_style(if focused { accent().bold() } else { title() })
        .focused(focused)
        .render(panel.inner(values_area), buf);
}

// ── cards ───────────────────────────────────────────────────────────

fn draw_cards(app: &App, buf: &mut Buffer, area: Rect) {
    let mut hits: Vec<(Rect, RecordId)> = Vec::new();

    if app.loading() {
        let frame = SPINNER_FRAMES[app.tick_count() as usize % SPINNER_FRAMES.len()];
        let message = format!("{frame} Loading users…");
        draw_centered(buf, area, &message, chrome());
        app.record_card_hits(hits);
        return;
    }

    let filtered = app.dashboard().filtered();
    if filtered.is_empty() {
        draw_centered(buf, area, "No users matched", title());
        let below = Rect::new(
            area.x,
            area.y.saturating_add(area.height / 2).saturating_add(1),
            area.width,
            1,
        );
        draw_centered(buf, below, "press r to show all", chrome());
        app.record_card_hits(hits);
        return;
    }

    let columns = (area.width / CARD_MIN_WIDTH).max(1) as usize;
    app.record_grid_columns(columns);
    let card_width = area.width / columns as u16;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;

    let cursor_row = app.card_cursor() / columns;
    let row_offset = cursor_row.saturating_sub(visible_rows - 1);

    for (index, record) in filtered.iter().enumerate() {
        let row = index / columns;
        let column = index % columns;
        if row < row_offset || row >= row_offset + visible_rows {
            continue;
        }
        let rect = Rect::new(
            area.x + column as u16 * card_width,
            area.y + ((row - row_offset) as u16) * CARD_HEIGHT,
            card_width.saturating_sub(1),
            CARD_HEIGHT,
        );
        draw_card(app, buf, rect, record, index == app.card_cursor());
        hits.push((rect, record.id()));
    }

    app.record_card_hits(hits);
}

fn draw_card(app: &App, buf: &mut Buffer, area: Rect, record: &Record, focused: bool) {
    let cards_focused = app.focus() == Focus::Cards;
    let border = if focused && cards_focused {
        accent()
    } else {
        chrome()
    };
    let name = record.name();
    let card_title = format!(" {name} ");
    let panel = Panel::new()
        .rounded()
        .title(&card_title)
        .border_style(border)
        .title_style(title().fg(Color::Cyan));
    panel.render(area, buf);

    let inner = panel.inner(area);
    let revealed = app.dashboard().is_revealed(record.id());

    for (row_index, row) in CARD_ROWS.iter().enumerate() {
        let y = inner.y + row_index as u16;
        if y >= inner.bottom() {
            break;
        }
        let x = buf.set_text(inner.x + 1, y, row.label, chrome(), inner.right());
        let value_x = (inner.x + 1 + 9).max(x + 1);
        let (text, style) = row_display(record, row, revealed);
        buf.set_text(value_x, y, &text, style, inner.right());
    }
}

/// The masked or revealed form of one card row.
fn row_display(record: &Record, row: &CardRow, revealed: bool) -> (String, Style) {
    let raw = record.field(row.path);
    if !revealed {
        return (mask(&raw), masked_style());
    }
    if raw.is_empty() {
        return if row.na_fallback {
            ("n/a".to_string(), chrome())
        } else {
            (String::new(), Style::default())
        };
    }
    if row.hyperlink {
        (format!("http://{raw}"), link_style())
    } else {
        (raw, Style::default())
    }
}

fn draw_centered(buf: &mut Buffer, area: Rect, text: &str, style: Style) {
    if area.is_empty() {
        return;
    }
    let width = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height / 2;
    buf.set_text(x, y, text, style, area.right());
}
