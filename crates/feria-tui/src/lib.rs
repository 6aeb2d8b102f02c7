// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use feria_app::{
    AppCommand, AppMode, AppState, CollectionKind, ColumnRender, FilterControl,
    NO_SELECTION_PLACEHOLDER, PrintJob, Record, RecordId, RowAction, SessionContext, TableCommand,
    TableStatus, TableView, apply_table_command, project, render_participant, row_actions,
};
use feria_store::{
    FetchOutcome, FetchTicket, MutationOutcome, MutationRequest, QueryCache, QueryStatus,
    delete_allowed, resolve,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::collections::BTreeMap;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;

const SORT_ASC_MARK: &str = "↑";
const SORT_DESC_MARK: &str = "↓";
const FILTER_MARK: &str = "▼";
const SELECTED_MARK: &str = "✓";
const CONFIRM_PROMPT: &str = "Are you sure you want to delete this item?";

/// Host seam: data access, navigation, and printing. The default spawn
/// hooks run inline and report through the channel; network-backed hosts
/// override them with worker threads so the event loop stays responsive
/// while a request is outstanding.
pub trait AppRuntime {
    fn session(&self) -> &SessionContext;
    fn restricted_user_types(&self) -> &[i64];
    fn load_collection(&mut self, kind: CollectionKind) -> Result<Vec<Record>>;
    fn load_record(&mut self, kind: CollectionKind, id: &RecordId) -> Result<Record>;
    fn delete_record(&mut self, kind: CollectionKind, id: &RecordId) -> Result<()>;
    fn navigate(&mut self, route: &str) -> Result<()>;
    fn print(&mut self, job: &PrintJob) -> Result<()>;

    fn default_page_size(&self) -> usize {
        feria_app::DEFAULT_PAGE_SIZE
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket, events: &Sender<InternalEvent>) {
        let result = self
            .load_collection(ticket.key())
            .map_err(|error| format!("{error:#}"));
        let _ = events.send(InternalEvent::FetchCompleted { ticket, result });
    }

    fn spawn_record_fetch(
        &mut self,
        kind: CollectionKind,
        id: RecordId,
        events: &Sender<InternalEvent>,
    ) {
        let result = self
            .load_record(kind, &id)
            .map_err(|error| format!("{error:#}"));
        let _ = events.send(InternalEvent::RecordCompleted { kind, id, result });
    }

    fn spawn_delete(
        &mut self,
        kind: CollectionKind,
        request: MutationRequest,
        events: &Sender<InternalEvent>,
    ) {
        let result = self
            .delete_record(kind, &request.target)
            .map_err(|error| format!("{error:#}"));
        let _ = events.send(InternalEvent::DeleteCompleted {
            kind,
            request,
            result,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    FetchCompleted {
        ticket: FetchTicket,
        result: Result<Vec<Record>, String>,
    },
    RecordCompleted {
        kind: CollectionKind,
        id: RecordId,
        result: Result<Record, String>,
    },
    DeleteCompleted {
        kind: CollectionKind,
        request: MutationRequest,
        result: Result<(), String>,
    },
}

#[derive(Debug, Default)]
struct FilterUiState {
    control: Option<FilterControl>,
    input: String,
}

#[derive(Debug, Default)]
struct ColumnsUiState {
    cursor: usize,
}

#[derive(Debug, Default)]
struct ConfirmUiState {
    pending: Option<PendingDelete>,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingDelete {
    kind: CollectionKind,
    request: MutationRequest,
}

#[derive(Debug, Default)]
struct DetailUiState {
    kind: Option<CollectionKind>,
    id: Option<RecordId>,
    record: Option<Record>,
    loading: bool,
    error: Option<String>,
}

impl DetailUiState {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
struct ViewData {
    cache: QueryCache,
    table_states: BTreeMap<CollectionKind, feria_app::TableState>,
    cursor_row: usize,
    cursor_col: usize,
    filter: FilterUiState,
    columns_overlay: ColumnsUiState,
    confirm: ConfirmUiState,
    detail: DetailUiState,
    status_token: u64,
    delete_allowed: bool,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    for kind in CollectionKind::ALL {
        view_data.table_states.insert(
            kind,
            feria_app::TableState {
                page_size: runtime.default_page_size(),
                ..feria_app::TableState::default()
            },
        );
    }
    let (internal_tx, internal_rx) = mpsc::channel();

    start_collection_fetch(state.active_collection, runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, runtime, &mut view_data, &internal_tx, &internal_rx);
        view_data.delete_allowed =
            delete_allowed(runtime.session(), runtime.restricted_user_types());

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn start_collection_fetch<R: AppRuntime>(
    kind: CollectionKind,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if let Some(ticket) = view_data.cache.begin_fetch(kind) {
        runtime.spawn_fetch(ticket, internal_tx);
    }
}

fn process_internal_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::FetchCompleted { ticket, result } => {
                match view_data
                    .cache
                    .complete_fetch(ticket, result, OffsetDateTime::now_utc())
                {
                    FetchOutcome::RefetchNeeded(next) => runtime.spawn_fetch(next, tx),
                    FetchOutcome::Applied | FetchOutcome::Discarded => {}
                }
                clamp_cursor(state, view_data);
            }
            InternalEvent::RecordCompleted { kind, id, result } => {
                if view_data.detail.kind == Some(kind) && view_data.detail.id.as_ref() == Some(&id)
                {
                    view_data.detail.loading = false;
                    match result {
                        Ok(record) => {
                            view_data.detail.record = Some(record);
                            view_data.detail.error = None;
                        }
                        Err(error) => view_data.detail.error = Some(error),
                    }
                }
            }
            InternalEvent::DeleteCompleted {
                kind,
                request,
                result,
            } => {
                let outcome = resolve(&mut view_data.cache, kind, request, |_| true, |_| result);
                match outcome {
                    MutationOutcome::Applied { refetch } => {
                        if let Some(ticket) = refetch {
                            runtime.spawn_fetch(ticket, tx);
                        }
                        emit_status(state, view_data, tx, "record deleted; refreshing");
                    }
                    MutationOutcome::Failed(message) => {
                        emit_status(state, view_data, tx, format!("delete failed: {message}"));
                    }
                    MutationOutcome::Cancelled => {}
                }
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match state.mode {
        AppMode::Filter => {
            handle_filter_key(state, view_data, internal_tx, key);
            false
        }
        AppMode::Columns => {
            handle_columns_key(state, view_data, internal_tx, key);
            false
        }
        AppMode::Confirm => {
            handle_confirm_key(state, runtime, view_data, internal_tx, key);
            false
        }
        AppMode::Detail => {
            handle_detail_key(state, runtime, view_data, internal_tx, key);
            false
        }
        AppMode::Nav => handle_nav_key(state, runtime, view_data, internal_tx, key),
    }
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let kind = state.active_collection;
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => switch_collection(state, runtime, view_data, internal_tx, 1),
        KeyCode::BackTab => switch_collection(state, runtime, view_data, internal_tx, -1),
        KeyCode::Char('j') | KeyCode::Down => move_cursor_row(state, view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor_row(state, view_data, -1),
        KeyCode::Char('h') | KeyCode::Left => move_cursor_col(state, view_data, -1),
        KeyCode::Char('l') | KeyCode::Right => move_cursor_col(state, view_data, 1),
        KeyCode::Char('n') => {
            let status = apply_command(view_data, kind, TableCommand::NextPage);
            view_data.cursor_row = 0;
            emit_status(state, view_data, internal_tx, status.message());
        }
        KeyCode::Char('p') => {
            let status = apply_command(view_data, kind, TableCommand::PrevPage);
            view_data.cursor_row = 0;
            emit_status(state, view_data, internal_tx, status.message());
        }
        KeyCode::Char('s') => {
            if let Some(column_key) = column_key_at_cursor(state, view_data) {
                let status = apply_command(view_data, kind, TableCommand::CycleSort(column_key));
                emit_status(state, view_data, internal_tx, status.message());
            }
        }
        KeyCode::Char(' ') => {
            if let Some(id) = row_id_at_cursor(state, view_data) {
                let status = apply_command(view_data, kind, TableCommand::ToggleRowSelected(id));
                emit_status(state, view_data, internal_tx, status.message());
            }
        }
        KeyCode::Char('X') => {
            let status = apply_command(view_data, kind, TableCommand::ClearSelection);
            emit_status(state, view_data, internal_tx, status.message());
        }
        KeyCode::Char('/') => {
            let control = kind.screen().filter;
            view_data.filter.control = Some(control);
            view_data.filter.input = current_filter_value(view_data, kind, control);
            state.dispatch(AppCommand::OpenFilter);
        }
        KeyCode::Char('c') => {
            view_data.columns_overlay.cursor = 0;
            state.dispatch(AppCommand::OpenColumns);
        }
        KeyCode::Char('e') => open_row_route(state, runtime, view_data, internal_tx, RowAction::Edit),
        KeyCode::Char('v') => open_row_route(state, runtime, view_data, internal_tx, RowAction::View),
        KeyCode::Char('a') => {
            if let Some(route) = kind.screen().create_route {
                navigate_to(state, runtime, view_data, internal_tx, route);
            }
        }
        KeyCode::Char('d') => request_delete(state, view_data),
        KeyCode::Enter => open_detail(state, runtime, view_data, internal_tx),
        KeyCode::Char('r') => refresh_collection(state, runtime, view_data, internal_tx),
        _ => {}
    }
    false
}

fn handle_filter_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            view_data.filter.control = None;
            view_data.filter.input.clear();
            state.dispatch(AppCommand::CloseOverlay);
        }
        KeyCode::Enter => {
            let kind = state.active_collection;
            let input = std::mem::take(&mut view_data.filter.input);
            let command = match view_data.filter.control.take() {
                Some(FilterControl::Global) => TableCommand::SetGlobalFilter(input),
                Some(FilterControl::Column(column_key)) => {
                    TableCommand::SetColumnFilter(column_key.to_owned(), input)
                }
                None => TableCommand::ClearGlobalFilter,
            };
            let status = apply_command(view_data, kind, command);
            view_data.cursor_row = 0;
            state.dispatch(AppCommand::CloseOverlay);
            emit_status(state, view_data, internal_tx, status.message());
        }
        KeyCode::Backspace => {
            view_data.filter.input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.filter.input.clear();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.filter.input.push(ch);
        }
        _ => {}
    }
}

fn handle_columns_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let kind = state.active_collection;
    let columns = kind.columns();
    match key.code {
        KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q') => {
            state.dispatch(AppCommand::CloseOverlay);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let last = columns.len().saturating_sub(1);
            view_data.columns_overlay.cursor = (view_data.columns_overlay.cursor + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.columns_overlay.cursor = view_data.columns_overlay.cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(column) = columns.get(view_data.columns_overlay.cursor) {
                let status =
                    apply_command(view_data, kind, TableCommand::ToggleColumn(column.key.to_owned()));
                clamp_cursor(state, view_data);
                emit_status(state, view_data, internal_tx, status.message());
            }
        }
        KeyCode::Char('a') => {
            let status = apply_command(view_data, kind, TableCommand::ShowAllColumns);
            emit_status(state, view_data, internal_tx, status.message());
        }
        _ => {}
    }
}

fn handle_confirm_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(pending) = view_data.confirm.pending.take() {
                runtime.spawn_delete(pending.kind, pending.request.confirmed(), internal_tx);
                state.dispatch(AppCommand::CloseOverlay);
                emit_status(state, view_data, internal_tx, "deleting record");
            } else {
                state.dispatch(AppCommand::CloseOverlay);
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            // Declined confirmations stay silent.
            view_data.confirm.pending = None;
            state.dispatch(AppCommand::CloseOverlay);
        }
        _ => {}
    }
}

fn handle_detail_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            view_data.detail.clear();
            state.dispatch(AppCommand::CloseOverlay);
        }
        KeyCode::Char('p') => {
            if let Some(record) = view_data.detail.record.clone() {
                let job = render_participant(&record).to_job();
                let message = match runtime.print(&job) {
                    Ok(()) => format!("printed {}", job.title),
                    Err(error) => format!("print failed: {error:#}"),
                };
                emit_status(state, view_data, internal_tx, message);
            }
        }
        _ => {}
    }
}

fn switch_collection<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    delta: isize,
) {
    let command = if delta >= 0 {
        AppCommand::NextCollection
    } else {
        AppCommand::PrevCollection
    };
    state.dispatch(command);
    view_data.cursor_row = 0;
    view_data.cursor_col = 0;
    view_data.detail.clear();
    if view_data.cache.status(state.active_collection) == QueryStatus::Idle {
        start_collection_fetch(state.active_collection, runtime, view_data, internal_tx);
    }
}

fn move_cursor_row(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let rows = current_view(state, view_data).rows.len();
    if rows == 0 {
        view_data.cursor_row = 0;
        return;
    }
    let next = view_data.cursor_row as isize + delta;
    view_data.cursor_row = next.clamp(0, rows as isize - 1) as usize;
}

fn move_cursor_col(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let columns = current_view(state, view_data).visible_columns.len();
    if columns == 0 {
        view_data.cursor_col = 0;
        return;
    }
    let next = view_data.cursor_col as isize + delta;
    view_data.cursor_col = next.clamp(0, columns as isize - 1) as usize;
}

fn clamp_cursor(state: &AppState, view_data: &mut ViewData) {
    let view = current_view(state, view_data);
    view_data.cursor_row = view_data
        .cursor_row
        .min(view.rows.len().saturating_sub(1));
    view_data.cursor_col = view_data
        .cursor_col
        .min(view.visible_columns.len().saturating_sub(1));
}

fn open_row_route<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    action: RowAction,
) {
    let kind = state.active_collection;
    if !row_actions(kind, view_data.delete_allowed).contains(&action) {
        return;
    }
    let Some(id) = row_id_at_cursor(state, view_data) else {
        return;
    };
    if let Some(route) = action.route(kind, &id) {
        navigate_to(state, runtime, view_data, internal_tx, &route);
    }
}

fn navigate_to<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    route: &str,
) {
    let message = match runtime.navigate(route) {
        Ok(()) => format!("open {route}"),
        Err(error) => format!("navigation failed: {error:#}"),
    };
    emit_status(state, view_data, internal_tx, message);
}

fn request_delete(state: &mut AppState, view_data: &mut ViewData) {
    let kind = state.active_collection;
    if !view_data.delete_allowed {
        return;
    }
    let Some(id) = row_id_at_cursor(state, view_data) else {
        return;
    };
    if kind.delete_path(&id).is_none() {
        return;
    }
    view_data.confirm.pending = Some(PendingDelete {
        kind,
        request: MutationRequest::delete(id),
    });
    state.dispatch(AppCommand::OpenConfirm);
}

fn open_detail<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let kind = state.active_collection;
    let screen = kind.screen();
    if !screen.side_panel && !screen.print_view {
        return;
    }
    let Some(id) = row_id_at_cursor(state, view_data) else {
        return;
    };

    view_data.detail.clear();
    view_data.detail.kind = Some(kind);
    view_data.detail.id = Some(id.clone());
    view_data.detail.loading = true;
    if screen.print_view {
        state.dispatch(AppCommand::OpenDetail);
    }

    runtime.spawn_record_fetch(kind, id, internal_tx);
}

fn refresh_collection<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let kind = state.active_collection;
    match view_data.cache.status(kind) {
        // Retry after failure re-runs the load directly.
        QueryStatus::Error | QueryStatus::Idle => {
            start_collection_fetch(kind, runtime, view_data, internal_tx);
        }
        QueryStatus::Success => {
            if let feria_store::InvalidateAction::StartFetch(ticket) =
                view_data.cache.invalidate(kind)
            {
                runtime.spawn_fetch(ticket, internal_tx);
            }
        }
        // One in-flight load per key; the refetch queues behind it.
        QueryStatus::Loading => {
            view_data.cache.invalidate(kind);
        }
    }
}

fn apply_command(
    view_data: &mut ViewData,
    kind: CollectionKind,
    command: TableCommand,
) -> TableStatus {
    let columns = kind.columns();
    let ViewData {
        cache,
        table_states,
        ..
    } = view_data;
    let records = cache.records(kind);
    let table_state = table_states.entry(kind).or_default();
    apply_table_command(table_state, &columns, records, command)
}

fn current_view(state: &AppState, view_data: &ViewData) -> TableView {
    let kind = state.active_collection;
    let columns = kind.columns();
    let records = view_data.cache.records(kind);
    let table_state = view_data
        .table_states
        .get(&kind)
        .cloned()
        .unwrap_or_default();
    project(records, &columns, &table_state)
}

fn current_filter_value(
    view_data: &ViewData,
    kind: CollectionKind,
    control: FilterControl,
) -> String {
    let Some(table_state) = view_data.table_states.get(&kind) else {
        return String::new();
    };
    match control {
        FilterControl::Global => table_state.global_filter.clone().unwrap_or_default(),
        FilterControl::Column(column_key) => table_state
            .filters
            .get(column_key)
            .cloned()
            .unwrap_or_default(),
    }
}

fn row_id_at_cursor(state: &AppState, view_data: &ViewData) -> Option<RecordId> {
    current_view(state, view_data)
        .rows
        .get(view_data.cursor_row)
        .map(|row| row.id.clone())
}

fn column_key_at_cursor(state: &AppState, view_data: &ViewData) -> Option<String> {
    current_view(state, view_data)
        .visible_columns
        .get(view_data.cursor_col)
        .map(|column| column.key.to_owned())
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let selected = CollectionKind::ALL
        .iter()
        .position(|kind| *kind == state.active_collection)
        .unwrap_or(0);
    let tab_titles = CollectionKind::ALL
        .iter()
        .map(|kind| tab_title(*kind, state, view_data))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title("feria").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    render_body(frame, layout[1], state, view_data);

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    match state.mode {
        AppMode::Filter => {
            let area = centered_rect(56, 20, frame.area());
            frame.render_widget(Clear, area);
            let input = Paragraph::new(filter_overlay_text(state, view_data)).block(
                Block::default()
                    .title(filter_overlay_title(state.active_collection))
                    .borders(Borders::ALL),
            );
            frame.render_widget(input, area);
        }
        AppMode::Columns => {
            let area = centered_rect(48, 56, frame.area());
            frame.render_widget(Clear, area);
            let picker = Paragraph::new(columns_overlay_text(state, view_data))
                .block(Block::default().title("Columns").borders(Borders::ALL));
            frame.render_widget(picker, area);
        }
        AppMode::Confirm => {
            let area = centered_rect(52, 22, frame.area());
            frame.render_widget(Clear, area);
            let confirm = Paragraph::new(confirm_overlay_text())
                .block(Block::default().title("confirm").borders(Borders::ALL))
                .style(Style::default().fg(Color::Red));
            frame.render_widget(confirm, area);
        }
        AppMode::Detail => {
            let area = centered_rect(84, 84, frame.area());
            frame.render_widget(Clear, area);
            let preview = Paragraph::new(print_preview_text(view_data)).block(
                Block::default()
                    .title("participant details")
                    .borders(Borders::ALL),
            );
            frame.render_widget(preview, area);
        }
        AppMode::Nav => {}
    }
}

fn render_body(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    let kind = state.active_collection;
    let status = view_data.cache.status(kind);
    let has_data = !view_data.cache.records(kind).is_empty();

    if status == QueryStatus::Loading && !has_data {
        let loading = Paragraph::new(loading_text(kind))
            .block(Block::default().borders(Borders::ALL).title(kind.title()));
        frame.render_widget(loading, area);
        return;
    }

    if status == QueryStatus::Error && !has_data {
        let error = Paragraph::new(error_panel_text(kind, view_data.cache.error(kind)))
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title(kind.title()));
        frame.render_widget(error, area);
        return;
    }

    if kind.screen().side_panel && view_data.detail.id.is_some() {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);
        render_table(frame, split[0], state, view_data);
        let panel = Paragraph::new(side_panel_text(view_data))
            .block(Block::default().borders(Borders::ALL).title("detail"));
        frame.render_widget(panel, split[1]);
    } else {
        render_table(frame, area, state, view_data);
    }
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    let kind = state.active_collection;
    let view = current_view(state, view_data);

    if view.is_empty() {
        let empty = Paragraph::new("No results.").block(
            Block::default()
                .borders(Borders::ALL)
                .title(table_block_title(kind, &view, view_data)),
        );
        frame.render_widget(empty, area);
        return;
    }

    let widths = vec![Constraint::Min(8); view.visible_columns.len().max(1)];
    let table_state = view_data.table_states.get(&kind);

    let header_cells = view.visible_columns.iter().map(|column| {
        let mut label = column.label.to_owned();
        if let Some(table_state) = table_state {
            if let Some(sort) = &table_state.sort
                && sort.key == column.key
            {
                label.push(' ');
                label.push_str(match sort.direction {
                    feria_app::SortDirection::Asc => SORT_ASC_MARK,
                    feria_app::SortDirection::Desc => SORT_DESC_MARK,
                });
            }
            if table_state
                .filters
                .get(column.key)
                .is_some_and(|needle| !needle.is_empty())
            {
                label.push(' ');
                label.push_str(FILTER_MARK);
            }
        }
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells);

    let actions_label = row_actions(kind, view_data.delete_allowed)
        .iter()
        .map(|action| action.label())
        .collect::<Vec<_>>()
        .join(" ");

    let rows = view.rows.iter().enumerate().map(|(row_index, row)| {
        let at_cursor = row_index == view_data.cursor_row;
        let cells = view
            .visible_columns
            .iter()
            .enumerate()
            .map(|(column_index, column)| {
                let text = if matches!(column.render, ColumnRender::Actions) {
                    actions_label.clone()
                } else {
                    let mut text = row.cells.get(column_index).cloned().unwrap_or_default();
                    if column_index == 0 && row.selected {
                        text = format!("{SELECTED_MARK} {text}");
                    }
                    text
                };

                let mut style = Style::default();
                if row.selected {
                    style = style.fg(Color::Green);
                }
                if at_cursor {
                    style = style.bg(Color::DarkGray);
                }
                if at_cursor && column_index == view_data.cursor_col {
                    style = Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD);
                }
                Cell::from(text).style(style)
            })
            .collect::<Vec<_>>();
        Row::new(cells)
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_block_title(kind, &view, view_data))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn tab_title(kind: CollectionKind, state: &AppState, view_data: &ViewData) -> String {
    if state.active_collection != kind {
        return format!(" {} ", kind.label());
    }
    let filtered = view_data.table_states.get(&kind).is_some_and(|table_state| {
        table_state.global_filter.as_deref().is_some_and(|f| !f.is_empty())
            || table_state.filters.values().any(|needle| !needle.is_empty())
    });
    if filtered {
        format!(" {} {FILTER_MARK} ", kind.label())
    } else {
        format!(" {} ", kind.label())
    }
}

fn table_block_title(kind: CollectionKind, view: &TableView, view_data: &ViewData) -> String {
    let mut parts = vec![format!(
        "{} r:{} | page {}/{}",
        kind.title(),
        view.total_filtered_count,
        view.page + 1,
        view.page_count.max(1),
    )];
    if view_data.cache.status(kind) == QueryStatus::Loading {
        parts.push("refreshing".to_owned());
    }
    let hidden = kind.columns().len() - view.visible_columns.len();
    if hidden > 0 {
        parts.push(format!("hidden {hidden}"));
    }
    parts.join(" | ")
}

fn loading_text(kind: CollectionKind) -> String {
    format!("⠿ {}...\n\ncontrols are disabled while loading", kind.loading_label())
}

fn error_panel_text(kind: CollectionKind, error: Option<&str>) -> String {
    format!(
        "{}\n\n{}\n\npress r to Try Again",
        kind.error_title(),
        error.unwrap_or("unknown error"),
    )
}

fn filter_overlay_title(kind: CollectionKind) -> String {
    match kind.screen().filter {
        FilterControl::Global => "Search".to_owned(),
        FilterControl::Column(column_key) => {
            let columns = kind.columns();
            let label = columns
                .iter()
                .find(|column| column.key == column_key)
                .map(|column| column.label)
                .unwrap_or(column_key);
            format!("Filter {label}")
        }
    }
}

fn filter_overlay_text(state: &AppState, view_data: &ViewData) -> String {
    format!(
        "{}\n\n> {}_\n\nenter apply · ctrl-u clear · esc cancel",
        state.active_collection.screen().filter_placeholder,
        view_data.filter.input,
    )
}

fn columns_overlay_text(state: &AppState, view_data: &ViewData) -> String {
    let kind = state.active_collection;
    let table_state = view_data.table_states.get(&kind);
    let mut lines = Vec::new();
    for (index, column) in kind.columns().iter().enumerate() {
        let hidden = table_state.is_some_and(|table_state| {
            table_state.hidden_columns.contains(column.key)
        });
        let marker = if !column.hideable {
            "--"
        } else if hidden {
            "[ ]"
        } else {
            "[x]"
        };
        let cursor = if index == view_data.columns_overlay.cursor {
            ">"
        } else {
            " "
        };
        lines.push(format!("{cursor} {marker} {}", column.label));
    }
    lines.push(String::new());
    lines.push("space toggle · a show all · esc close".to_owned());
    lines.join("\n")
}

fn confirm_overlay_text() -> String {
    format!("{CONFIRM_PROMPT}\n\n[y] delete · [n] keep")
}

fn side_panel_text(view_data: &ViewData) -> String {
    if view_data.detail.loading {
        return "Loading...".to_owned();
    }
    if let Some(error) = &view_data.detail.error {
        return format!("detail load failed:\n{error}");
    }
    let Some(record) = &view_data.detail.record else {
        return "select a row with enter".to_owned();
    };

    let mut lines = vec![record.field_text("news_heading")];
    let subtitle = record.field_text("news_sub_title");
    if !subtitle.is_empty() {
        lines.push(subtitle);
    }
    let date = record.field_text("news_date");
    if !date.is_empty() {
        lines.push(date);
    }
    lines.push(String::new());
    let details = record.field_text("news_details");
    lines.push(if details.is_empty() {
        "N/A".to_owned()
    } else {
        details
    });
    lines.join("\n")
}

fn print_preview_text(view_data: &ViewData) -> String {
    if view_data.detail.id.is_none() {
        return NO_SELECTION_PLACEHOLDER.to_owned();
    }
    if view_data.detail.loading {
        return "⠿ Loading Participants Details...".to_owned();
    }
    if let Some(error) = &view_data.detail.error {
        return format!("Error Fetching Participants details\n\n{error}\n\npress esc to close");
    }
    let Some(record) = &view_data.detail.record else {
        return NO_SELECTION_PLACEHOLDER.to_owned();
    };

    let document = render_participant(record);
    format!(
        "{}\n\np print ({} {}mm margin) · esc close",
        document.to_plain_text(),
        feria_app::PRINT_PAGE_SETUP.paper,
        feria_app::PRINT_PAGE_SETUP.margin_mm,
    )
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let view = current_view(state, view_data);
    let kind = state.active_collection;

    let left = state
        .status_line
        .clone()
        .unwrap_or_else(|| mode_hint(state.mode).to_owned());

    let mut parts = vec![left];
    parts.push(format!(
        "{} of {} row(s) selected",
        view.selected_count, view.total_filtered_count,
    ));
    match view_data.cache.status(kind) {
        QueryStatus::Loading => parts.push("loading".to_owned()),
        QueryStatus::Error => {
            if let Some(error) = view_data.cache.error(kind) {
                parts.push(format!("error: {error}"));
            }
        }
        QueryStatus::Idle | QueryStatus::Success => {}
    }
    parts.join(" | ")
}

fn mode_hint(mode: AppMode) -> &'static str {
    match mode {
        AppMode::Nav => "tab switch · / filter · s sort · space select · enter detail · r refresh",
        AppMode::Filter => "type to filter · enter apply · esc cancel",
        AppMode::Columns => "space toggle · a show all · esc close",
        AppMode::Confirm => "y delete · n keep",
        AppMode::Detail => "p print · esc close",
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
