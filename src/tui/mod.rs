// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive terminal stepper.
//!
//! The chain panel shows the visible part of the reduction graph, the source panel shows the
//! program with the selected term highlighted. Navigation runs synchronously on the UI thread;
//! `/check` requests run on a background tokio runtime and report back over a channel.

use std::{
    error::Error,
    io,
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{debug, warn};

use crate::check::{CheckClient, CheckError, CheckRequest, CheckResponse, CheckTicket};
use crate::model::{TermId, Terminal as Outcome};
use crate::ops::ActionKind;
use crate::render::{
    line_messages, render_chain_annotated, single_line, source_segments, ChainRenderOptions,
    SourceMark,
};
use crate::ui::{CheckApplied, NoticeLevel, UiState};

mod theme;

use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const TOAST_TTL: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Navigation keys, in footer order.
const ACTION_KEYS: [(ActionKind, char, &str); 6] = [
    (ActionKind::StepForward, 'f', "STEP"),
    (ActionKind::StepBackward, 'b', "BACK"),
    (ActionKind::JumpForward, 'n', "JUMP"),
    (ActionKind::JumpBackward, 'p', "JUMP BACK"),
    (ActionKind::StepInto, 'i', "INTO"),
    (ActionKind::StepOver, 'o', "OVER"),
];

fn action_for_key(ch: char) -> Option<ActionKind> {
    ACTION_KEYS.iter().find(|(_, key, _)| *key == ch).map(|(kind, _, _)| *kind)
}

/// Runs the interactive terminal UI until the user quits.
///
/// With a `client` the program in `state` is checked on startup (unless a session is already
/// loaded) and `c` re-runs the check. Without one the UI only navigates the loaded graph.
pub fn run(state: UiState, client: Option<CheckClient>) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let worker = client.map(CheckWorker::spawn).transpose()?;
    let mut app = App::new(state, theme, worker.is_some());
    if worker.is_some() && app.state.session().is_none() {
        app.queue_check();
    }

    let mut terminal = TerminalSession::new()?;
    while !app.should_quit {
        if let Some(worker) = &worker {
            if let Some((ticket, request)) = app.take_pending_check() {
                if let Err(err) = worker.submit(ticket, request) {
                    app.apply_check_result(ticket, Err(err));
                }
            }
            for (ticket, result) in worker.drain() {
                app.apply_check_result(ticket, result);
            }
        }

        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

type CheckResult = (CheckTicket, Result<CheckResponse, CheckError>);

/// Background thread driving a current-thread runtime; one task per submitted check.
struct CheckWorker {
    jobs: tokio::sync::mpsc::UnboundedSender<(CheckTicket, CheckRequest)>,
    results: mpsc::Receiver<CheckResult>,
}

impl CheckWorker {
    fn spawn(client: CheckClient) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let (jobs, mut job_rx) = tokio::sync::mpsc::unbounded_channel();
        let (result_tx, results) = mpsc::channel::<CheckResult>();

        thread::Builder::new().name("nanostep-check".to_owned()).spawn(move || {
            runtime.block_on(async move {
                while let Some((ticket, request)) = job_rx.recv().await {
                    let client = client.clone();
                    let result_tx = result_tx.clone();
                    tokio::spawn(async move {
                        let result = client.check(&request).await;
                        if result_tx.send((ticket, result)).is_err() {
                            debug!(generation = ticket.generation(), "ui gone; dropping result");
                        }
                    });
                }
            });
        })?;

        Ok(Self { jobs, results })
    }

    fn submit(&self, ticket: CheckTicket, request: CheckRequest) -> Result<(), CheckError> {
        self.jobs
            .send((ticket, request))
            .map_err(|_| CheckError::Transport("check worker stopped".to_owned()))
    }

    fn drain(&self) -> Vec<CheckResult> {
        self.results.try_iter().collect()
    }
}

fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let (header_area, main_area, footer_area) = (rows[0], rows[1], rows[2]);

    frame.render_widget(Paragraph::new(header_line(app)), header_area);

    let direction = if stack_panes_vertically(main_area) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let panes = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_area);
    let (chain_area, source_area) = (panes[0], panes[1]);

    let inner_width = usize::from(chain_area.width.saturating_sub(2));
    let inner_height = usize::from(chain_area.height.saturating_sub(2));
    let (chain, selected_row) = chain_text(app, inner_width);
    let scroll = selected_row.map_or(0, |row| row.saturating_sub(inner_height.saturating_sub(1)));
    let chain = Paragraph::new(chain)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(chain_title(app))
                .border_style(app.theme.panel_border_style(true)),
        )
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(chain, chain_area);

    let source = Paragraph::new(source_text(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Source: {} ", app.state.function()))
            .border_style(app.theme.panel_border_style(false)),
    );
    frame.render_widget(source, source_area);

    let compact = footer_uses_compact_mode(area);
    frame.render_widget(Paragraph::new(footer_help_line(app, compact)), footer_area);

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

/// Chain panel contents and the row of the selected term.
fn chain_text(app: &App, max_width: usize) -> (Text<'static>, Option<usize>) {
    let Some(session) = app.state.session() else {
        let message = if app.state.check_in_flight() {
            "Checking…"
        } else if app.can_check {
            "No graph loaded. Press c to check the program."
        } else {
            "No graph loaded."
        };
        return (Text::from(Line::styled(message, app.theme.dim_style())), None);
    };

    let options = ChainRenderOptions { max_width, show_ids: false };
    let render = render_chain_annotated(session, options);
    let selected_row = session.selected().and_then(|id| render.node_rows.get(id).copied());
    let cursor_row = app.cursor.as_ref().and_then(|id| render.node_rows.get(id).copied());

    let lines = render
        .text
        .lines()
        .enumerate()
        .map(|(row, line)| {
            let style = if Some(row) == selected_row {
                app.theme.selection_style()
            } else if Some(row) == cursor_row {
                app.theme.base_style().add_modifier(Modifier::BOLD)
            } else if !render.node_rows.values().any(|node_row| *node_row == row) {
                app.theme.dim_style()
            } else {
                app.theme.base_style()
            };
            Line::styled(line.to_owned(), style)
        })
        .collect::<Vec<_>>();

    (Text::from(lines), selected_row.or(cursor_row))
}

/// Program text with line numbers, the selection highlight and annotation messages.
fn source_text(app: &App) -> Text<'static> {
    let highlight = app.state.session().and_then(|session| session.highlight());
    let annotations = app.state.annotations();
    let theme = &app.theme;

    let lines = app
        .state
        .program()
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let line_no = u32::try_from(idx).unwrap_or(u32::MAX);
            let mut spans = vec![Span::styled(format!("{:>3} ", idx + 1), theme.dim_style())];
            spans.extend(source_segments(line_no, line, highlight, annotations).into_iter().map(
                |segment| {
                    let style = match segment.mark {
                        SourceMark::Plain => theme.base_style(),
                        SourceMark::Highlight => theme.highlight_style(),
                        SourceMark::Annotated => theme.annotation_style(),
                    };
                    Span::styled(segment.text, style)
                },
            ));
            for message in line_messages(line_no, annotations) {
                spans.push(Span::styled(
                    format!("  ◀ {message}"),
                    theme.notice_style(NoticeLevel::Error),
                ));
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    Text::from(lines)
}

struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    state: UiState,
    theme: TuiTheme,
    can_check: bool,
    pending_check: Option<(CheckTicket, CheckRequest)>,
    /// Last term the user moved to; survives the deselection that follows every action.
    cursor: Option<TermId>,
    show_help: bool,
    help_scroll: u16,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(state: UiState, theme: TuiTheme, can_check: bool) -> Self {
        Self {
            state,
            theme,
            can_check,
            pending_check: None,
            cursor: None,
            show_help: false,
            help_scroll: 0,
            toast: None,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the key asks to quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => self.help_scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.help_scroll_by(-1),
                KeyCode::Home => self.help_scroll = 0,
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Down | KeyCode::Char('j') => self.select_offset(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_offset(-1),
            KeyCode::Home | KeyCode::Char('g') => self.select_edge(false),
            KeyCode::End | KeyCode::Char('G') => self.select_edge(true),
            KeyCode::Enter => self.reselect_cursor(),
            KeyCode::Esc => self.deselect(),
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('R') => self.reset(),
            KeyCode::Char('c') => self.queue_check(),
            KeyCode::Char(ch) => {
                if let Some(kind) = action_for_key(ch) {
                    self.perform(kind);
                }
            }
            _ => {}
        }

        false
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.help_scroll = 0;
    }

    fn help_scroll_by(&mut self, delta: i32) {
        let next = i32::from(self.help_scroll).saturating_add(delta).max(0);
        self.help_scroll = u16::try_from(next).unwrap_or(u16::MAX);
    }

    /// Visible terms in display order.
    fn display_order(&self) -> Vec<TermId> {
        self.state
            .session()
            .map(|session| render_chain_annotated(session, ChainRenderOptions::default()).order)
            .unwrap_or_default()
    }

    fn select_offset(&mut self, delta: isize) {
        let order = self.display_order();
        if order.is_empty() {
            return;
        }
        let current = self
            .state
            .session()
            .and_then(|session| session.selected().cloned())
            .or_else(|| self.cursor.clone())
            .and_then(|id| order.iter().position(|candidate| *candidate == id));
        let last = order.len() - 1;
        let next = match current {
            Some(pos) => pos.saturating_add_signed(delta).min(last),
            None if delta < 0 => last,
            None => 0,
        };
        self.select_term(order[next].clone());
    }

    fn select_edge(&mut self, last: bool) {
        let order = self.display_order();
        let target = if last { order.last() } else { order.first() };
        if let Some(target) = target.cloned() {
            self.select_term(target);
        }
    }

    fn reselect_cursor(&mut self) {
        match self.cursor.clone() {
            Some(cursor) => self.select_term(cursor),
            None => self.select_edge(false),
        }
    }

    fn select_term(&mut self, id: TermId) {
        let Some(session) = self.state.session_mut() else {
            return;
        };
        match session.select(&id) {
            Ok(_) => self.cursor = Some(id),
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    /// Clears the selection and dismisses the banner notice.
    fn deselect(&mut self) {
        self.state.clear_notice();
        if let Some(session) = self.state.session_mut() {
            session.deselect();
        }
    }

    fn perform(&mut self, kind: ActionKind) {
        let Some(session) = self.state.session_mut() else {
            self.set_toast("No graph loaded");
            return;
        };
        match session.perform(kind) {
            Ok(diff) => {
                let count = diff.nodes_added.len();
                let noun = if count == 1 { "term" } else { "terms" };
                self.set_toast(format!("{}: revealed {count} {noun}", kind.title()));
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn undo(&mut self) {
        let Some(session) = self.state.session_mut() else {
            return;
        };
        let undone = session.undo().is_some();
        let cursor_hidden =
            self.cursor.as_ref().is_some_and(|cursor| !session.visible().contains(cursor));
        if cursor_hidden {
            self.cursor = None;
        }
        self.set_toast(if undone { "Undid last action" } else { "Nothing to undo" });
    }

    fn reset(&mut self) {
        let Some(session) = self.state.session_mut() else {
            return;
        };
        session.reset();
        self.cursor = None;
        self.set_toast("Back to the initial view");
    }

    fn queue_check(&mut self) {
        if !self.can_check {
            self.set_toast("Offline graph; checking is disabled");
            return;
        }
        self.pending_check = Some(self.state.begin_check());
    }

    fn take_pending_check(&mut self) -> Option<(CheckTicket, CheckRequest)> {
        self.pending_check.take()
    }

    fn apply_check_result(
        &mut self,
        ticket: CheckTicket,
        result: Result<CheckResponse, CheckError>,
    ) -> CheckApplied {
        let applied = self.state.finish_check(ticket, result);
        match applied {
            CheckApplied::Session => {
                self.cursor = None;
                self.toast = None;
            }
            CheckApplied::Failed => warn!("check failed; keeping the current view"),
            CheckApplied::Stale | CheckApplied::TimedOut | CheckApplied::ParseError => {}
        }
        applied
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        let expires_at = Instant::now() + TOAST_TTL;
        self.toast = Some(Toast { message: message.into(), expires_at });
    }

    fn active_toast(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|toast| Instant::now() < toast.expires_at)
            .map(|toast| toast.message.as_str())
    }
}

include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

#[cfg(test)]
pub(crate) mod testing {
    use crossterm::event::KeyCode;
    use ratatui::text::Line;

    use super::{chain_text, footer_help_line, header_line, theme::TuiTheme, App};
    use crate::check::{CheckError, CheckRequest, CheckResponse, CheckTicket};
    use crate::ui::{CheckApplied, UiState};

    fn line_to_string(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    /// Drives the app without a terminal or a check worker.
    pub(crate) struct HeadlessTui {
        app: App,
    }

    impl HeadlessTui {
        pub(crate) fn new(state: UiState, can_check: bool) -> Self {
            Self { app: App::new(state, TuiTheme::default(), can_check) }
        }

        pub(crate) fn press(&mut self, code: KeyCode) -> bool {
            self.app.handle_key_code(code)
        }

        pub(crate) fn press_all(&mut self, keys: &str) {
            for ch in keys.chars() {
                self.press(KeyCode::Char(ch));
            }
        }

        pub(crate) fn state(&self) -> &UiState {
            &self.app.state
        }

        pub(crate) fn take_pending_check(&mut self) -> Option<(CheckTicket, CheckRequest)> {
            self.app.take_pending_check()
        }

        pub(crate) fn deliver(
            &mut self,
            ticket: CheckTicket,
            result: Result<CheckResponse, CheckError>,
        ) -> CheckApplied {
            self.app.apply_check_result(ticket, result)
        }

        pub(crate) fn chain_lines(&self) -> Vec<String> {
            chain_text(&self.app, 0).0.lines.iter().map(line_to_string).collect()
        }

        pub(crate) fn header(&self) -> String {
            line_to_string(&header_line(&self.app))
        }

        pub(crate) fn footer(&self) -> String {
            line_to_string(&footer_help_line(&self.app, false))
        }

        pub(crate) fn toast(&self) -> Option<&str> {
            self.app.active_toast()
        }

        pub(crate) fn help_visible(&self) -> bool {
            self.app.show_help
        }
    }
}
