// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use feria_app::{CollectionKind, PrintJob, Record, RecordId, SessionContext};
use feria_store::{FetchTicket, MutationRequest};
use feria_tui::{AppRuntime, InternalEvent};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

pub fn default_spool_dir() -> Result<PathBuf> {
    let data_root = dirs::data_dir()
        .ok_or_else(|| anyhow!("cannot resolve data directory for the print spool"))?;
    Ok(data_root.join(crate::config::APP_NAME).join("print"))
}

/// Production runtime: every load and mutation goes to the panel backend.
/// Network calls run on worker threads reporting through the internal
/// channel, so the table stays interactive while requests are outstanding.
pub struct HttpRuntime {
    client: feria_api::Client,
    session: SessionContext,
    restricted_user_types: Vec<i64>,
    page_size: usize,
    spool_dir: PathBuf,
    last_route: Option<String>,
}

impl HttpRuntime {
    pub fn new(
        client: feria_api::Client,
        session: SessionContext,
        restricted_user_types: Vec<i64>,
        page_size: usize,
        spool_dir: PathBuf,
    ) -> Self {
        Self {
            client,
            session,
            restricted_user_types,
            page_size,
            spool_dir,
            last_route: None,
        }
    }

    pub fn last_route(&self) -> Option<&str> {
        self.last_route.as_deref()
    }
}

impl AppRuntime for HttpRuntime {
    fn session(&self) -> &SessionContext {
        &self.session
    }

    fn restricted_user_types(&self) -> &[i64] {
        &self.restricted_user_types
    }

    fn default_page_size(&self) -> usize {
        self.page_size
    }

    fn load_collection(&mut self, kind: CollectionKind) -> Result<Vec<Record>> {
        self.client.fetch_collection(kind)
    }

    fn load_record(&mut self, kind: CollectionKind, id: &RecordId) -> Result<Record> {
        self.client.fetch_record(kind, id)
    }

    fn delete_record(&mut self, kind: CollectionKind, id: &RecordId) -> Result<()> {
        self.client.delete_record(kind, id)
    }

    /// Route resolution belongs to the panel shell; this host only records
    /// the requested target.
    fn navigate(&mut self, route: &str) -> Result<()> {
        self.last_route = Some(route.to_owned());
        Ok(())
    }

    fn print(&mut self, job: &PrintJob) -> Result<()> {
        fs::create_dir_all(&self.spool_dir)
            .with_context(|| format!("create print spool {}", self.spool_dir.display()))?;
        let path = self
            .spool_dir
            .join(format!("{}.txt", sanitize_file_name(&job.title)));
        let contents = format!(
            "% page: {} margin {}mm\n\n{}",
            job.page.paper, job.page.margin_mm, job.body,
        );
        fs::write(&path, contents)
            .with_context(|| format!("write print job {}", path.display()))
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket, events: &Sender<InternalEvent>) {
        let client = self.client.clone();
        let events = events.clone();
        thread::spawn(move || {
            let result = client
                .fetch_collection(ticket.key())
                .map_err(|error| format!("{error:#}"));
            let _ = events.send(InternalEvent::FetchCompleted { ticket, result });
        });
    }

    fn spawn_record_fetch(
        &mut self,
        kind: CollectionKind,
        id: RecordId,
        events: &Sender<InternalEvent>,
    ) {
        let client = self.client.clone();
        let events = events.clone();
        thread::spawn(move || {
            let result = client
                .fetch_record(kind, &id)
                .map_err(|error| format!("{error:#}"));
            let _ = events.send(InternalEvent::RecordCompleted { kind, id, result });
        });
    }

    fn spawn_delete(
        &mut self,
        kind: CollectionKind,
        request: MutationRequest,
        events: &Sender<InternalEvent>,
    ) {
        let client = self.client.clone();
        let events = events.clone();
        thread::spawn(move || {
            let result = client
                .delete_record(kind, &request.target)
                .map_err(|error| format!("{error:#}"));
            let _ = events.send(InternalEvent::DeleteCompleted {
                kind,
                request,
                result,
            });
        });
    }
}

/// Offline runtime for `--demo`: an in-process backend seeded from the
/// testkit. Deletes really remove rows, so the invalidate-then-refetch flow
/// behaves exactly as it does against the live API.
pub struct DemoRuntime {
    session: SessionContext,
    restricted_user_types: Vec<i64>,
    collections: BTreeMap<CollectionKind, Vec<Record>>,
    printed: Vec<PrintJob>,
    last_route: Option<String>,
}

impl DemoRuntime {
    pub fn seeded(seed: u64) -> Self {
        Self {
            session: SessionContext {
                token: "demo-token".to_owned(),
                user_type: 0,
            },
            restricted_user_types: feria_app::DEFAULT_RESTRICTED_USER_TYPES.to_vec(),
            collections: feria_testkit::demo_collections(seed, 24),
            printed: Vec::new(),
            last_route: None,
        }
    }

    pub fn printed(&self) -> &[PrintJob] {
        &self.printed
    }
}

impl AppRuntime for DemoRuntime {
    fn session(&self) -> &SessionContext {
        &self.session
    }

    fn restricted_user_types(&self) -> &[i64] {
        &self.restricted_user_types
    }

    fn load_collection(&mut self, kind: CollectionKind) -> Result<Vec<Record>> {
        Ok(self.collections.get(&kind).cloned().unwrap_or_default())
    }

    fn load_record(&mut self, kind: CollectionKind, id: &RecordId) -> Result<Record> {
        self.collections
            .get(&kind)
            .and_then(|rows| rows.iter().find(|row| row.id() == id))
            .cloned()
            .ok_or_else(|| anyhow!("{} record {id} not found", kind.label()))
    }

    fn delete_record(&mut self, kind: CollectionKind, id: &RecordId) -> Result<()> {
        if kind.delete_path(id).is_none() {
            anyhow::bail!("{} records cannot be deleted from the panel", kind.label());
        }
        let rows = self
            .collections
            .get_mut(&kind)
            .ok_or_else(|| anyhow!("unknown collection {}", kind.label()))?;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            anyhow::bail!("{} record {id} not found", kind.label());
        }
        Ok(())
    }

    fn navigate(&mut self, route: &str) -> Result<()> {
        self.last_route = Some(route.to_owned());
        Ok(())
    }

    fn print(&mut self, job: &PrintJob) -> Result<()> {
        self.printed.push(job.clone());
        Ok(())
    }
}

fn sanitize_file_name(raw: &str) -> String {
    raw.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect()
}
