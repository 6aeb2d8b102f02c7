// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use feria_app::{CollectionKind, Record};
use std::collections::HashMap;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Cached fetch state for one collection key. Success implies data present
/// and error absent; Error keeps the last successful data for continuity of
/// display (stale-while-error).
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub status: QueryStatus,
    pub data: Option<Vec<Record>>,
    pub error: Option<String>,
    pub last_fetched_at: Option<OffsetDateTime>,
}

impl QueryState {
    fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            last_fetched_at: None,
        }
    }
}

/// Generation-stamped permission to run one load for one key. Results are
/// only accepted from the ticket the cache handed out, which is how stale
/// responses are kept from overwriting newer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    key: CollectionKind,
    generation: u64,
}

impl FetchTicket {
    pub const fn key(self) -> CollectionKind {
        self.key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result landed in the cache.
    Applied,
    /// A stale or duplicate completion; the payload was dropped.
    Discarded,
    /// The payload was dropped because an invalidation arrived mid-flight;
    /// the caller must start exactly this follow-up fetch.
    RefetchNeeded(FetchTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidateAction {
    /// No fetch was in flight; start this one now.
    StartFetch(FetchTicket),
    /// A fetch is in flight; the refetch is queued behind it.
    Deferred,
}

/// Single writer for all per-collection query state. Fetch execution lives
/// outside; this machine only decides when a load may start and whether its
/// result still matters when it completes.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<CollectionKind, Entry>,
}

#[derive(Debug)]
struct Entry {
    state: QueryState,
    generation: u64,
    in_flight: Option<u64>,
}

impl Entry {
    fn idle() -> Self {
        Self {
            state: QueryState::idle(),
            generation: 0,
            in_flight: None,
        }
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load unless one is already running for `key`; concurrent
    /// callers get `None` and subscribe to the in-flight result.
    pub fn begin_fetch(&mut self, key: CollectionKind) -> Option<FetchTicket> {
        let entry = self.entries.entry(key).or_insert_with(Entry::idle);
        if entry.in_flight.is_some() {
            return None;
        }
        entry.in_flight = Some(entry.generation);
        entry.state.status = QueryStatus::Loading;
        Some(FetchTicket {
            key,
            generation: entry.generation,
        })
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Record>, String>,
        now: OffsetDateTime,
    ) -> FetchOutcome {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return FetchOutcome::Discarded;
        };
        if entry.in_flight != Some(ticket.generation) {
            return FetchOutcome::Discarded;
        }
        if ticket.generation != entry.generation {
            // Invalidated while in flight: last invalidation wins, and the
            // queued refetch starts immediately so loads stay serialized.
            entry.in_flight = Some(entry.generation);
            return FetchOutcome::RefetchNeeded(FetchTicket {
                key: ticket.key,
                generation: entry.generation,
            });
        }

        entry.in_flight = None;
        match result {
            Ok(records) => {
                entry.state.status = QueryStatus::Success;
                entry.state.data = Some(records);
                entry.state.error = None;
                entry.state.last_fetched_at = Some(now);
            }
            Err(message) => {
                entry.state.status = QueryStatus::Error;
                entry.state.error = Some(message);
            }
        }
        FetchOutcome::Applied
    }

    /// Marks `key` stale and arranges exactly one refetch: immediately when
    /// the key is quiet, after the current load otherwise.
    pub fn invalidate(&mut self, key: CollectionKind) -> InvalidateAction {
        let entry = self.entries.entry(key).or_insert_with(Entry::idle);
        entry.generation += 1;
        if entry.in_flight.is_some() {
            return InvalidateAction::Deferred;
        }
        entry.in_flight = Some(entry.generation);
        entry.state.status = QueryStatus::Loading;
        InvalidateAction::StartFetch(FetchTicket {
            key,
            generation: entry.generation,
        })
    }

    pub fn state(&self, key: CollectionKind) -> Option<&QueryState> {
        self.entries.get(&key).map(|entry| &entry.state)
    }

    pub fn status(&self, key: CollectionKind) -> QueryStatus {
        self.state(key)
            .map(|state| state.status)
            .unwrap_or(QueryStatus::Idle)
    }

    pub fn records(&self, key: CollectionKind) -> &[Record] {
        self.state(key)
            .and_then(|state| state.data.as_deref())
            .unwrap_or_default()
    }

    pub fn error(&self, key: CollectionKind) -> Option<&str> {
        self.state(key).and_then(|state| state.error.as_deref())
    }

    pub fn last_fetched_at(&self, key: CollectionKind) -> Option<OffsetDateTime> {
        self.state(key).and_then(|state| state.last_fetched_at)
    }
}
