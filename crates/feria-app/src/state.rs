// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::CollectionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Filter,
    Columns,
    Confirm,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_collection: CollectionKind,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_collection: CollectionKind::JobRequirements,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextCollection,
    PrevCollection,
    OpenFilter,
    OpenColumns,
    OpenConfirm,
    OpenDetail,
    CloseOverlay,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    CollectionChanged(CollectionKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextCollection => self.rotate_collection(1),
            AppCommand::PrevCollection => self.rotate_collection(-1),
            AppCommand::OpenFilter => self.set_mode(AppMode::Filter),
            AppCommand::OpenColumns => self.set_mode(AppMode::Columns),
            AppCommand::OpenConfirm => self.set_mode(AppMode::Confirm),
            AppCommand::OpenDetail => self.set_mode(AppMode::Detail),
            AppCommand::CloseOverlay => self.set_mode(AppMode::Nav),
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_collection(&mut self, delta: isize) -> Vec<AppEvent> {
        let collections = CollectionKind::ALL;
        let current = collections
            .iter()
            .position(|kind| *kind == self.active_collection)
            .unwrap_or(0) as isize;
        let len = collections.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_collection = collections[next];
        vec![AppEvent::CollectionChanged(self.active_collection)]
    }

    fn set_mode(&mut self, mode: AppMode) -> Vec<AppEvent> {
        self.mode = mode;
        vec![AppEvent::ModeChanged(self.mode)]
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppMode, AppState};
    use crate::model::CollectionKind;

    #[test]
    fn collection_rotation_wraps() {
        let mut state = AppState {
            active_collection: CollectionKind::Participants,
            ..AppState::default()
        };

        let events = state.dispatch(AppCommand::NextCollection);
        assert_eq!(state.active_collection, CollectionKind::JobRequirements);
        assert_eq!(
            events,
            vec![AppEvent::CollectionChanged(CollectionKind::JobRequirements)]
        );

        state.dispatch(AppCommand::PrevCollection);
        assert_eq!(state.active_collection, CollectionKind::Participants);
    }

    #[test]
    fn overlay_modes_open_and_close() {
        let mut state = AppState::default();

        state.dispatch(AppCommand::OpenFilter);
        assert_eq!(state.mode, AppMode::Filter);

        state.dispatch(AppCommand::OpenConfirm);
        assert_eq!(state.mode, AppMode::Confirm);

        let events = state.dispatch(AppCommand::CloseOverlay);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(events, vec![AppEvent::ModeChanged(AppMode::Nav)]);
    }

    #[test]
    fn status_line_set_and_clear_round_trip() {
        let mut state = AppState::default();

        let set = state.dispatch(AppCommand::SetStatus("deleted".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("deleted"));
        assert_eq!(set, vec![AppEvent::StatusUpdated("deleted".to_owned())]);

        let cleared = state.dispatch(AppCommand::ClearStatus);
        assert!(state.status_line.is_none());
        assert_eq!(cleared, vec![AppEvent::StatusCleared]);
    }
}
