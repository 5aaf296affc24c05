//! Screen session and terminal management (impure shell)

mod chrome;
pub mod constants;
mod help;
pub mod layout;
mod styles;

pub use chrome::{render_screen, ScreenView};
pub use help::{key_hint, max_help_scroll, render_help_overlay};
pub use layout::{Geometry, LayoutConfig};
pub use styles::{ColorConfig, ScreenStyles};

use crate::config::{ConfigError, KeyBindings, ResolvedConfig};
use crate::model::{ContentError, KeyAction, PaneId};
use crate::source::ContentSource;
use crate::state::detail_view::NO_DATA_TEXT;
use crate::state::mouse_handler;
use crate::state::{
    DetailView, FocusCursor, MouseCommand, NavAction, NavigationController, Outcome, PaneRender,
};
use crate::view_state::strip_markup;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Size},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while running a screen
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The content source failed while populating the screen
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Configuration could not be turned into session options
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Everything a session needs besides its terminal and content.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Geometry parameters.
    pub layout: LayoutConfig,
    /// Key to action table.
    pub key_bindings: KeyBindings,
    /// Whether colours are drawn.
    pub colors: ColorConfig,
    /// Active screen reader mode. When set, the terminal cursor is parked at
    /// the detail view so the reader follows the selection.
    pub screen_reader_mode: Option<String>,
    /// Prefix the detail text with the entry summary.
    pub prefix_summary: bool,
}

impl SessionOptions {
    /// Build options from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyBinding`] when a key override is invalid.
    pub fn from_config(config: &ResolvedConfig, colors: ColorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            layout: config.layout.clone(),
            key_bindings: config.key_bindings()?,
            colors,
            screen_reader_mode: config.screen_reader_mode.clone(),
            prefix_summary: config.prefixes_summary(),
        })
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            key_bindings: KeyBindings::default(),
            colors: ColorConfig::default(),
            screen_reader_mode: None,
            prefix_summary: false,
        }
    }
}

/// Main screen session
///
/// Generic over backend to support testing with TestBackend
pub struct ScreenSession<B, S>
where
    B: Backend,
    S: ContentSource,
{
    terminal: Terminal<B>,
    source: S,
    nav: NavigationController,
    detail: DetailView,
    layout: LayoutConfig,
    geometry: Geometry,
    key_bindings: KeyBindings,
    /// Title-bar key reminder, built once from `key_bindings`.
    key_hint: String,
    styles: ScreenStyles,
    screen_reader_mode: Option<String>,
    prefix_summary: bool,
    /// Scroll offset of the help overlay while it is open.
    help_scroll: Option<u16>,
    /// Last resize signalled since the previous frame.
    pending_resize: Option<Size>,
}

impl<S: ContentSource> ScreenSession<CrosstermBackend<Stdout>, S> {
    /// Create a session on the real terminal
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    /// The caller must call [`restore_terminal`] afterwards, also on error.
    pub fn new(source: S, options: SessionOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, source, options)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Blocks on input between frames; events
    /// already queued are handled before the next frame, so a burst of
    /// resizes costs a single relayout.
    pub fn run(&mut self) -> Result<(), TuiError> {
        loop {
            self.draw()?;

            let mut quit = self.handle_event(event::read()?);
            while !quit && event::poll(Duration::ZERO)? {
                quit = self.handle_event(event::read()?);
            }
            if quit {
                info!("Screen session ended");
                return Ok(());
            }
        }
    }
}

impl<B, S> ScreenSession<B, S>
where
    B: Backend,
    S: ContentSource,
{
    /// Create a session on an already constructed terminal (e.g. TestBackend).
    ///
    /// # Errors
    ///
    /// Fails when the terminal size cannot be read or the source cannot
    /// generate a pane.
    pub fn new_for_test(
        terminal: Terminal<B>,
        source: S,
        options: SessionOptions,
    ) -> Result<Self, TuiError> {
        Self::with_terminal(terminal, source, options)
    }

    fn with_terminal(
        terminal: Terminal<B>,
        source: S,
        options: SessionOptions,
    ) -> Result<Self, TuiError> {
        let pane_count = source.pane_count();
        let size = terminal.size()?;
        let geometry = options.layout.compute(size, pane_count);
        let hint = key_hint(&options.key_bindings);

        let mut session = Self {
            terminal,
            source,
            nav: NavigationController::new(pane_count),
            detail: DetailView::new(),
            layout: options.layout,
            geometry: Geometry::default(),
            key_bindings: options.key_bindings,
            key_hint: hint,
            styles: ScreenStyles::new(options.colors),
            screen_reader_mode: options.screen_reader_mode,
            prefix_summary: options.prefix_summary,
            help_scroll: None,
            pending_resize: None,
        };
        session.apply_geometry(geometry);

        for i in 0..pane_count {
            let pane = PaneId::new(i);
            let entries = session.source.generate(pane)?;
            session.nav.regenerate(pane, entries)?;
        }
        if session.nav.take_stale() {
            session.sync_detail();
        }

        info!(
            panes = pane_count,
            width = size.width,
            height = size.height,
            screen_reader = ?session.screen_reader_mode,
            "Screen session started"
        );
        Ok(session)
    }

    /// Handle one input event. Returns true if the session should end.
    pub fn handle_event(&mut self, event: Event) -> bool {
        let quit = match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.handle_key(key)
            }
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::Resize(width, height) => {
                self.pending_resize = Some(Size::new(width, height));
                false
            }
            _ => false,
        };

        if self.nav.take_stale() {
            self.sync_detail();
        }
        quit
    }

    /// Render one frame, applying any pending resize first.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.apply_pending_resize();

        let title = self.source.title();
        let pane_titles: Vec<String> = (0..self.nav.pane_count())
            .map(|i| self.source.pane_title(PaneId::new(i)).to_string())
            .collect();
        let focused = self.nav.cursor().pane;
        let panes: Vec<PaneRender> = self
            .nav
            .panes()
            .iter()
            .map(|pane| pane.render(pane.id() == focused))
            .collect();
        let detail = self.detail.render();
        let view = ScreenView {
            title,
            key_hint: &self.key_hint,
            pane_titles: &pane_titles,
            geometry: &self.geometry,
            panes: &panes,
            detail: &detail,
            styles: &self.styles,
        };
        let help_scroll = self.help_scroll;
        let bindings = &self.key_bindings;
        let reader_cursor = self
            .screen_reader_mode
            .as_ref()
            .map(|_| Position::new(self.geometry.detail.x, self.geometry.detail.y));

        self.terminal.draw(|frame| {
            render_screen(frame, &view);
            if let Some(scroll) = help_scroll {
                render_help_overlay(frame, bindings, view.styles, scroll);
            }
            if let Some(position) = reader_cursor.filter(|p| frame.area().contains(*p)) {
                frame.set_cursor_position(position);
            }
        })?;
        Ok(())
    }

    /// Panes and focus.
    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    /// The detail strip.
    pub fn detail_view(&self) -> &DetailView {
        &self.detail
    }

    /// Geometry of the last applied layout.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The content source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The terminal, e.g. to inspect a TestBackend buffer.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Mutable terminal access, e.g. to resize a TestBackend.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Whether the key binding overlay is showing.
    pub fn help_open(&self) -> bool {
        self.help_scroll.is_some()
    }

    /// Plain text of the detail view for a screen reader, `None` when no
    /// screen reader mode is active.
    pub fn accessibility_text(&self) -> Option<String> {
        self.screen_reader_mode.as_ref()?;
        Some(strip_markup(self.detail.text()))
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let action = self.key_bindings.get(key);

        if let Some(scroll) = self.help_scroll {
            self.help_scroll = match action {
                Some(KeyAction::Help | KeyAction::Quit) => None,
                Some(KeyAction::Up | KeyAction::ScrollDetailUp) => Some(scroll.saturating_sub(1)),
                Some(KeyAction::Down | KeyAction::ScrollDetailDown) => {
                    Some(scroll.saturating_add(1).min(max_help_scroll()))
                }
                _ => Some(scroll),
            };
            return false;
        }

        let Some(action) = action else {
            debug!(?key, "Unbound key");
            return false;
        };
        if self.detail.handle_navigation(action) {
            return false;
        }
        if action == KeyAction::Help {
            self.help_scroll = Some(0);
            return false;
        }
        match NavAction::from_key_action(action) {
            Some(nav_action) => self.dispatch(nav_action),
            None => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.help_open() {
            return;
        }
        // Hit-testing must see the geometry the user is looking at.
        self.apply_pending_resize();
        match mouse_handler::handle_mouse(&mouse, &self.nav, self.geometry.detail) {
            MouseCommand::Navigate(action) => {
                self.dispatch(action);
            }
            MouseCommand::ScrollDetail(direction) => self.detail.scroll(direction, 1),
            MouseCommand::Ignore => {}
        }
    }

    /// Feed a navigation action to the controller and act on its outcome.
    fn dispatch(&mut self, action: NavAction) -> bool {
        match self.nav.handle(action) {
            Outcome::Quit => true,
            Outcome::Activate(cursor) => {
                self.activate(cursor);
                false
            }
            Outcome::Moved | Outcome::Unchanged => false,
        }
    }

    fn activate(&mut self, cursor: FocusCursor) {
        if let Err(err) = self.source.activate(cursor) {
            warn!(%err, pane = %cursor.pane, index = ?cursor.index, "Activation failed, keeping current entries");
            return;
        }
        for i in 0..self.nav.pane_count() {
            let pane = PaneId::new(i);
            let result = self
                .source
                .generate(pane)
                .and_then(|entries| self.nav.regenerate(pane, entries));
            if let Err(err) = result {
                warn!(%err, %pane, "Could not regenerate pane, keeping previous entries");
            }
        }
    }

    /// Bind the detail view to the entry under the cursor.
    fn sync_detail(&mut self) {
        let cursor = self.nav.cursor();
        let text = match self.nav.cursor_entry() {
            Some(entry) if self.prefix_summary => {
                format!("{}\n{}", entry.summary(), entry.detail())
            }
            Some(entry) => entry.detail().to_string(),
            None => NO_DATA_TEXT.to_string(),
        };
        if self.detail.bind(cursor.pane, cursor.index, &text) {
            debug!(pane = %cursor.pane, index = ?cursor.index, "Detail view rebound");
        }
    }

    fn apply_pending_resize(&mut self) {
        let Some(size) = self.pending_resize.take() else {
            return;
        };
        debug!(width = size.width, height = size.height, "Applying resize");
        let geometry = self.layout.compute(size, self.nav.pane_count());
        self.apply_geometry(geometry);
    }

    /// Hand every rectangle of `geometry` to the pane that owns it.
    fn apply_geometry(&mut self, geometry: Geometry) {
        for (pane, rect) in self.nav.panes_mut().zip(&geometry.panes) {
            pane.set_geometry(*rect);
            pane.fold_entries();
        }
        self.detail.set_geometry(geometry.detail);
        self.geometry = geometry;
    }
}

/// Run a screen over `source` until the user quits
///
/// This is the main entry point. It handles terminal setup, runs the event
/// loop, and restores the terminal on every exit path.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source<S: ContentSource>(
    source: S,
    options: SessionOptions,
) -> Result<(), TuiError> {
    let mut session = match ScreenSession::new(source, options) {
        Ok(session) => session,
        Err(err) => {
            if let Err(restore_err) = restore_terminal() {
                warn!(%restore_err, "Could not restore terminal");
            }
            return Err(err);
        }
    };

    let result = session.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
