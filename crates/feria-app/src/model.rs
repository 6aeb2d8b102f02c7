// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::RecordId;
use crate::table::{ColumnDef, ColumnRender};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User types whose accounts never see the delete control. Matches the
/// backend's staff/operator/viewer split; override via `[ui]` config.
pub const DEFAULT_RESTRICTED_USER_TYPES: &[i64] = &[1, 2, 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollectionKind {
    JobRequirements,
    News,
    Participants,
}

impl CollectionKind {
    pub const ALL: [Self; 3] = [Self::JobRequirements, Self::News, Self::Participants];

    pub const fn label(self) -> &'static str {
        match self {
            Self::JobRequirements => "job require",
            Self::News => "news",
            Self::Participants => "participants",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::JobRequirements => "Job Require List",
            Self::News => "Latest News List",
            Self::Participants => "Participant List",
        }
    }

    pub const fn loading_label(self) -> &'static str {
        match self {
            Self::JobRequirements => "Loading Job Require",
            Self::News => "Loading News List",
            Self::Participants => "Loading Participants",
        }
    }

    pub const fn error_title(self) -> &'static str {
        match self {
            Self::JobRequirements => "Error Fetching Job Require",
            Self::News => "Error Fetching News",
            Self::Participants => "Error Fetching Participants",
        }
    }

    pub const fn fetch_path(self) -> &'static str {
        match self {
            Self::JobRequirements => "/api/panel-fetch-jobrequire",
            Self::News => "/api/panel-fetch-news-list",
            Self::Participants => "/api/panel-fetch-participant",
        }
    }

    /// Key under which the backend wraps the collection array (and the
    /// single record for by-id fetches).
    pub const fn envelope_key(self) -> &'static str {
        match self {
            Self::JobRequirements => "jobrequire",
            Self::News => "news",
            Self::Participants => "participant",
        }
    }

    pub fn fetch_by_id_path(self, id: &RecordId) -> String {
        let segment = match self {
            Self::JobRequirements => "jobrequire",
            Self::News => "news",
            Self::Participants => "participant",
        };
        format!("/api/panel-fetch-{segment}-by-id/{id}")
    }

    /// Only news records may be deleted from the panel; the other
    /// collections are managed elsewhere.
    pub fn delete_path(self, id: &RecordId) -> Option<String> {
        match self {
            Self::News => Some(format!("/api/panel-delete-news/{id}")),
            Self::JobRequirements | Self::Participants => None,
        }
    }

    pub const fn screen(self) -> ScreenConfig {
        match self {
            Self::JobRequirements => ScreenConfig {
                filter: FilterControl::Column("full_name"),
                filter_placeholder: "Filter Full names...",
                create_route: None,
                side_panel: false,
                print_view: false,
            },
            Self::News => ScreenConfig {
                filter: FilterControl::Global,
                filter_placeholder: "Search...",
                create_route: Some("/create-news"),
                side_panel: true,
                print_view: false,
            },
            Self::Participants => ScreenConfig {
                filter: FilterControl::Column("name_of_firm"),
                filter_placeholder: "Filter firms...",
                create_route: None,
                side_panel: false,
                print_view: true,
            },
        }
    }

    pub fn columns(self) -> Vec<ColumnDef> {
        match self {
            Self::JobRequirements => vec![
                ColumnDef::field("id", "ID"),
                ColumnDef::field("full_name", "Full Name").sortable(),
                ColumnDef::field("father_name", "Father Name"),
                ColumnDef::field("residing_years", "Residence"),
                ColumnDef::field("re_locate", "Relocate"),
                ColumnDef::field("person_email", "Email"),
                ColumnDef::field("person_mobile", "Mobile"),
                ColumnDef::status("staff_status", "Staff Status"),
                ColumnDef::actions(),
            ],
            Self::News => vec![
                ColumnDef::field("id", "ID"),
                ColumnDef::field("news_heading", "News Heading").sortable(),
                ColumnDef::field("news_sub_title", "Subtitle"),
                ColumnDef::actions(),
            ],
            Self::Participants => vec![
                ColumnDef::field("id", "ID"),
                ColumnDef::field("name_of_firm", "Firm").sortable(),
                ColumnDef::field("brand_name", "Brand"),
                ColumnDef::field("distributor_agent_name", "Distributor"),
                ColumnDef::field("profile_status", "Status"),
                ColumnDef::field("profile_new_stall_no", "Stall"),
                ColumnDef::actions(),
            ],
        }
    }
}

/// Per-screen wiring of the shared table engine. The two news-list variants
/// in the panel differ only in these knobs, never in engine behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    pub filter: FilterControl,
    pub filter_placeholder: &'static str,
    pub create_route: Option<&'static str>,
    pub side_panel: bool,
    pub print_view: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterControl {
    Column(&'static str),
    Global,
}

/// One backend entity instance: an opaque JSON object guaranteed to carry a
/// usable `id`. Construction goes through [`Record::from_value`] so the
/// guarantee holds everywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            return None;
        };
        let id = RecordId::from_value(fields.get("id")?)?;
        Some(Self { id, fields })
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Display text for one field: empty for null/missing, `Yes`/`No` for
    /// booleans, the digits for numbers, the string itself otherwise.
    pub fn field_text(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(true)) => "Yes".to_owned(),
            Some(Value::Bool(false)) => "No".to_owned(),
            Some(other) => other.to_string(),
        }
    }

    /// The backend encodes category flags as the literal string `Yes`.
    pub fn flag_is_yes(&self, key: &str) -> bool {
        self.field_text(key) == "Yes"
    }
}

pub fn staff_status_label(code: &str) -> &'static str {
    match code {
        "0" => "Pending",
        "1" => "Active",
        "2" => "Expired",
        _ => "Unknown",
    }
}

/// Session facts the engine needs, passed in explicitly rather than read
/// from ambient storage inside UI logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub token: String,
    pub user_type: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    View,
    Delete,
    Print,
}

impl RowAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::View => "view",
            Self::Delete => "delete",
            Self::Print => "print",
        }
    }

    pub fn route(self, kind: CollectionKind, id: &RecordId) -> Option<String> {
        match (self, kind) {
            (Self::Edit, CollectionKind::JobRequirements) => {
                Some(format!("/job-require-edit/{id}"))
            }
            (Self::Edit, CollectionKind::News) => Some(format!("/edit-news/{id}")),
            (Self::View, CollectionKind::JobRequirements) => {
                Some(format!("/job-require-view/{id}"))
            }
            (Self::View, CollectionKind::Participants) => Some(format!("/participant-view/{id}")),
            _ => None,
        }
    }
}

/// Controls offered on a row. `delete_allowed` is the role gate decision,
/// evaluated once per render by the caller.
pub fn row_actions(kind: CollectionKind, delete_allowed: bool) -> Vec<RowAction> {
    match kind {
        CollectionKind::JobRequirements => vec![RowAction::Edit, RowAction::View],
        CollectionKind::News => {
            let mut actions = vec![RowAction::Edit];
            if delete_allowed {
                actions.push(RowAction::Delete);
            }
            actions
        }
        CollectionKind::Participants => vec![RowAction::View, RowAction::Print],
    }
}
