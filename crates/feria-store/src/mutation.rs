// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::cache::{FetchTicket, InvalidateAction, QueryCache};
use feria_app::{CollectionKind, RecordId, SessionContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Delete,
}

/// One user-triggered remote mutation; lives only for the duration of the
/// action that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub target: RecordId,
    pub operation: Operation,
    pub confirmed: bool,
}

impl MutationRequest {
    pub fn delete(target: RecordId) -> Self {
        Self {
            target,
            operation: Operation::Delete,
            confirmed: false,
        }
    }

    pub fn confirmed(mut self) -> Self {
        self.confirmed = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Confirmation was declined; nothing happened.
    Cancelled,
    /// The remote operation succeeded and the cache entry was invalidated.
    /// The row disappears once the refetch lands; removal is never optimistic.
    Applied { refetch: Option<FetchTicket> },
    /// The remote operation failed; the cache is untouched and a retry takes
    /// a new explicit user action.
    Failed(String),
}

/// Whether the delete control is offered at all for this session. A UX
/// convenience only; the backend remains the authority.
pub fn delete_allowed(session: &SessionContext, restricted_user_types: &[i64]) -> bool {
    !restricted_user_types.contains(&session.user_type)
}

/// Runs one mutation against the remote hook: confirmation gate first, then
/// the operation, then cache invalidation on success.
pub fn resolve<C, D>(
    cache: &mut QueryCache,
    key: CollectionKind,
    request: MutationRequest,
    confirm: C,
    delete: D,
) -> MutationOutcome
where
    C: FnOnce(&MutationRequest) -> bool,
    D: FnOnce(&RecordId) -> Result<(), String>,
{
    if !request.confirmed && !confirm(&request) {
        return MutationOutcome::Cancelled;
    }

    match request.operation {
        Operation::Delete => match delete(&request.target) {
            Ok(()) => {
                let refetch = match cache.invalidate(key) {
                    InvalidateAction::StartFetch(ticket) => Some(ticket),
                    InvalidateAction::Deferred => None,
                };
                MutationOutcome::Applied { refetch }
            }
            Err(message) => MutationOutcome::Failed(message),
        },
    }
}
