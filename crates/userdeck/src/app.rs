#![forbid(unsafe_code)]

//! Application model and event loop.
//!
//! Elm-shaped: all state lives in [`App`], messages drive transitions
//! through [`App::update`], and the view is a pure function of state. The
//! startup fetch is the only background work; it resolves into a single
//! [`Msg::RecordsLoaded`] delivered over a channel.

use std::cell::{Cell, RefCell};
use std::io::{self, BufWriter, Write};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::{debug, error};
use web_time::Instant;

use udeck_core::{Dashboard, FIELD_CATALOG, Record, RecordId};
use udeck_fetch::FetchError;

use crate::render::{Buffer, Rect, present};
use crate::terminal::TerminalSession;
use crate::view;
use crate::widgets::ListState;

/// Two activations of the same card within this window count as a
/// double-activation and toggle reveal.
pub const DOUBLE_ACTIVATION_WINDOW: Duration = Duration::from_millis(500);

/// Everything that can happen to the application.
#[derive(Debug)]
pub enum Msg {
    /// A terminal input event (key, mouse, resize).
    Term(Event),
    /// The one-shot startup fetch resolved.
    RecordsLoaded(Result<Vec<Record>, FetchError>),
    /// Idle heartbeat; drives the loading spinner.
    Tick,
}

/// What `update` asks the runtime to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    None,
    Quit,
}

/// Which pane receives movement and activation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Fields,
    Values,
    Cards,
}

impl Focus {
    /// Cycle forward, skipping the value pane while it is hidden.
    fn next(self, values_visible: bool) -> Self {
        match self {
            Self::Fields if values_visible => Self::Values,
            Self::Fields | Self::Values => Self::Cards,
            Self::Cards => Self::Fields,
        }
    }

    fn prev(self, values_visible: bool) -> Self {
        match self {
            Self::Fields => Self::Cards,
            Self::Values => Self::Fields,
            Self::Cards if values_visible => Self::Values,
            Self::Cards => Self::Fields,
        }
    }
}

/// Top-level application state.
pub struct App {
    dashboard: Dashboard,
    loading: bool,
    focus: Focus,
    field_state: ListState,
    value_state: ListState,
    card_cursor: usize,
    /// Grid column count recorded by the view for Up/Down movement.
    grid_columns: Cell<usize>,
    /// Card screen regions from the last view pass, for mouse hits.
    card_hits: RefCell<Vec<(Rect, RecordId)>>,
    last_activation: Option<(RecordId, Instant)>,
    tick_count: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dashboard: Dashboard::new(),
            loading: true,
            focus: Focus::default(),
            field_state: ListState::default(),
            value_state: ListState::default(),
            card_cursor: 0,
            grid_columns: Cell::new(1),
            card_hits: RefCell::new(Vec::new()),
            last_activation: None,
            tick_count: 0,
        }
    }

    // ── view accessors ──────────────────────────────────────────────

    #[must_use]
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn field_state(&self) -> &ListState {
        &self.field_state
    }

    #[must_use]
    pub fn value_state(&self) -> &ListState {
        &self.value_state
    }

    #[must_use]
    pub fn card_cursor(&self) -> usize {
        self.card_cursor
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether the value selector pane currently exists.
    #[must_use]
    pub fn values_visible(&self) -> bool {
        !self.dashboard.options().is_empty()
    }

    #[cfg(test)]
    pub(crate) fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub(crate) fn record_grid_columns(&self, columns: usize) {
        self.grid_columns.set(columns.max(1));
    }

    pub(crate) fn record_card_hits(&self, hits: Vec<(Rect, RecordId)>) {
        *self.card_hits.borrow_mut() = hits;
    }

    // ── update ──────────────────────────────────────────────────────

    pub fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::Tick => {
                self.tick_count = self.tick_count.wrapping_add(1);
                Cmd::None
            }
            Msg::RecordsLoaded(Ok(records)) => {
                self.loading = false;
                self.dashboard.load_records(records);
                self.clamp_card_cursor();
                Cmd::None
            }
            Msg::RecordsLoaded(Err(err)) => {
                // Fetch failure degrades to an empty set; no retry.
                self.loading = false;
                error!(error = %err, "startup fetch failed");
                Cmd::None
            }
            Msg::Term(event) => self.on_event(event),
        }
    }

    fn on_event(&mut self, event: Event) -> Cmd {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            // The view reads the live size every frame.
            _ => Cmd::None,
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Cmd {
        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Cmd::Quit,
            KeyCode::Char('c' | 'C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Cmd::Quit;
            }
            KeyCode::Char('r' | 'R') => self.show_all(),
            KeyCode::Tab => {
                self.focus = self.focus.next(self.values_visible());
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev(self.values_visible());
            }
            KeyCode::Up => self.on_move(0, -1),
            KeyCode::Down => self.on_move(0, 1),
            KeyCode::Left => self.on_move(-1, 0),
            KeyCode::Right => self.on_move(1, 0),
            KeyCode::Enter | KeyCode::Char(' ') => self.on_activate(),
            _ => {}
        }
        Cmd::None
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> Cmd {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Cmd::None;
        }
        let hit = self
            .card_hits
            .borrow()
            .iter()
            .enumerate()
            .find(|(_, (rect, _))| rect.contains(mouse.column, mouse.row))
            .map(|(index, (_, id))| (index, *id));
        if let Some((index, id)) = hit {
            self.focus = Focus::Cards;
            self.card_cursor = index;
            self.activate_card(id);
        }
        Cmd::None
    }

    /// "Show all": clear the filter and reset both selector cursors.
    fn show_all(&mut self) {
        self.dashboard.clear_filter();
        self.field_state.select(0);
        self.value_state.select(0);
        self.clamp_card_cursor();
        if self.focus == Focus::Values {
            self.focus = Focus::Fields;
        }
    }

    fn on_move(&mut self, dx: i32, dy: i32) {
        match self.focus {
            Focus::Fields => {
                // One extra leading row for "(all fields)".
                let len = FIELD_CATALOG.len() + 1;
                if dy < 0 {
                    self.field_state.move_up();
                } else if dy > 0 {
                    self.field_state.move_down(len);
                }
            }
            Focus::Values => {
                let len = self.dashboard.options().len() + 1;
                if dy < 0 {
                    self.value_state.move_up();
                } else if dy > 0 {
                    self.value_state.move_down(len);
                }
            }
            Focus::Cards => self.move_card_cursor(dx, dy),
        }
    }

    fn move_card_cursor(&mut self, dx: i32, dy: i32) {
        let len = self.dashboard.filtered().len();
        if len == 0 {
            self.card_cursor = 0;
            return;
        }
        let columns = self.grid_columns.get().max(1) as i32;
        let step = dx + dy * columns;
        let next = self.card_cursor as i32 + step;
        self.card_cursor = next.clamp(0, len as i32 - 1) as usize;
    }

    fn on_activate(&mut self) {
        match self.focus {
            Focus::Fields => self.apply_field_choice(),
            Focus::Values => self.apply_value_choice(),
            Focus::Cards => {
                let id = self
                    .dashboard
                    .filtered()
                    .get(self.card_cursor)
                    .map(|record| record.id());
                if let Some(id) = id {
                    self.activate_card(id);
                }
            }
        }
    }

    fn apply_field_choice(&mut self) {
        let index = self.field_state.selected();
        let path = if index == 0 {
            ""
        } else {
            match FIELD_CATALOG.get(index - 1) {
                Some(descriptor) => descriptor.path,
                None => return,
            }
        };
        self.dashboard.set_field(path);
        self.value_state.select(0);
        self.clamp_card_cursor();
        debug!(field = path, "filter field chosen");
        if self.values_visible() {
            self.focus = Focus::Values;
        }
    }

    fn apply_value_choice(&mut self) {
        let index = self.value_state.selected();
        if index == 0 {
            self.dashboard.set_value("");
        } else {
            let options = self.dashboard.options();
            let Some(value) = options.get(index - 1) else {
                return;
            };
            let value = value.clone();
            self.dashboard.set_value(&value);
            self.focus = Focus::Cards;
        }
        self.clamp_card_cursor();
    }

    /// One activation of a card. The second within
    /// [`DOUBLE_ACTIVATION_WINDOW`] toggles reveal for that record only.
    fn activate_card(&mut self, id: RecordId) {
        let now = Instant::now();
        let is_double = matches!(
            self.last_activation,
            Some((last, at)) if last == id && now.duration_since(at) <= DOUBLE_ACTIVATION_WINDOW
        );
        if is_double {
            self.dashboard.toggle_reveal(id);
            self.last_activation = None;
        } else {
            self.last_activation = Some((id, now));
        }
    }

    fn clamp_card_cursor(&mut self) {
        let len = self.dashboard.filtered().len();
        self.card_cursor = self.card_cursor.min(len.saturating_sub(1));
    }
}

/// Drive the application until it quits.
///
/// One iteration per message: render, then wait for the next terminal
/// event, fetch resolution, or idle tick.
pub fn run(
    app: &mut App,
    session: &TerminalSession,
    fetch: &Receiver<Result<Vec<Record>, FetchError>>,
    tick: Duration,
) -> io::Result<()> {
    let mut out = BufWriter::new(io::stdout());
    let mut buffer = Buffer::new(0, 0);

    loop {
        let (width, height) = session.size()?;
        if buffer.width() != width || buffer.height() != height {
            buffer = Buffer::new(width, height);
        } else {
            buffer.reset();
        }

        view::draw(app, &mut buffer);
        present(&buffer, &mut out)?;
        out.flush()?;

        let msg = if session.poll_event(tick)? {
            Msg::Term(session.read_event()?)
        } else if let Ok(result) = fetch.try_recv() {
            Msg::RecordsLoaded(result)
        } else {
            Msg::Tick
        };

        if app.update(msg) == Cmd::Quit {
            return Ok(());
        }
    }
}
