// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::RecordId;
use crate::model::{Record, staff_status_label};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_PAGE_SIZE: usize = 7;
pub const ACTIONS_KEY: &str = "actions";

/// Schema entry for one table column: how the field is labeled, whether the
/// header offers sorting/hiding, and how a record projects into display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub hideable: bool,
    pub render: ColumnRender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRender {
    Field,
    StaffStatus,
    Actions,
}

impl ColumnDef {
    pub const fn field(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
            hideable: true,
            render: ColumnRender::Field,
        }
    }

    pub const fn status(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
            hideable: true,
            render: ColumnRender::StaffStatus,
        }
    }

    /// The synthetic controls column: never sorted, never hidden, and its
    /// cells are rendered by the presentation layer rather than from a field.
    pub const fn actions() -> Self {
        Self {
            key: ACTIONS_KEY,
            label: "Action",
            sortable: false,
            hideable: false,
            render: ColumnRender::Actions,
        }
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn is_synthetic(&self) -> bool {
        matches!(self.render, ColumnRender::Actions)
    }

    pub fn display_value(&self, record: &Record) -> String {
        match self.render {
            ColumnRender::Field => record.field_text(self.key),
            ColumnRender::StaffStatus => {
                staff_status_label(&record.field_text(self.key)).to_owned()
            }
            ColumnRender::Actions => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

/// Local interaction state for one mounted table. Owned by exactly one
/// screen instance; never shared across tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub sort: Option<SortSpec>,
    pub filters: BTreeMap<String, String>,
    pub global_filter: Option<String>,
    pub hidden_columns: BTreeSet<String>,
    pub selection: BTreeSet<RecordId>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: None,
            filters: BTreeMap::new(),
            global_filter: None,
            hidden_columns: BTreeSet::new(),
            selection: BTreeSet::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    CycleSort(String),
    ClearSort,
    SetColumnFilter(String, String),
    ClearColumnFilter(String),
    SetGlobalFilter(String),
    ClearGlobalFilter,
    ToggleColumn(String),
    ShowAllColumns,
    ToggleRowSelected(RecordId),
    ClearSelection,
    NextPage,
    PrevPage,
    SetPageSize(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    SortAsc(String),
    SortDesc(String),
    SortCleared,
    SortUnavailable,
    FilterSet(String),
    FilterCleared(String),
    GlobalFilterSet,
    GlobalFilterCleared,
    ColumnHidden(String),
    ColumnShown(String),
    ColumnNotHideable,
    ColumnsShown,
    RowSelected,
    RowDeselected,
    SelectionCleared,
    PageChanged(usize),
    PageUnchanged,
    PageSizeSet(usize),
    PageSizeUnavailable,
}

impl TableStatus {
    pub fn message(&self) -> String {
        match self {
            Self::SortAsc(label) => format!("sort {label} asc"),
            Self::SortDesc(label) => format!("sort {label} desc"),
            Self::SortCleared => "sort cleared".to_owned(),
            Self::SortUnavailable => "sort unavailable".to_owned(),
            Self::FilterSet(label) => format!("filter {label} on"),
            Self::FilterCleared(label) => format!("filter {label} off"),
            Self::GlobalFilterSet => "search on".to_owned(),
            Self::GlobalFilterCleared => "search off".to_owned(),
            Self::ColumnHidden(label) => format!("column hidden: {label}"),
            Self::ColumnShown(label) => format!("column shown: {label}"),
            Self::ColumnNotHideable => "column cannot be hidden".to_owned(),
            Self::ColumnsShown => "all columns shown".to_owned(),
            Self::RowSelected => "row selected".to_owned(),
            Self::RowDeselected => "row deselected".to_owned(),
            Self::SelectionCleared => "selection cleared".to_owned(),
            Self::PageChanged(page) => format!("page {}", page + 1),
            Self::PageUnchanged => "no more pages".to_owned(),
            Self::PageSizeSet(size) => format!("page size {size}"),
            Self::PageSizeUnavailable => "page size must be positive".to_owned(),
        }
    }
}

/// The derived view: the page of rows to paint plus the counters the chrome
/// shows ("N of M row(s) selected", Previous/Next enablement).
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub visible_columns: Vec<ColumnDef>,
    pub rows: Vec<RowView>,
    pub total_filtered_count: usize,
    pub selected_count: usize,
    pub page: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: RecordId,
    pub cells: Vec<String>,
    pub selected: bool,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.total_filtered_count == 0
    }

    pub fn can_previous_page(&self) -> bool {
        self.page > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page + 1 < self.page_count
    }
}

/// Derives the visible subset in the contracted order: global filter, then
/// per-column filters, then a stable sort, then a clamped page slice.
/// Hidden columns drop out of rendering only; selection is intersected with
/// the filtered set for the reported count.
pub fn project(records: &[Record], columns: &[ColumnDef], state: &TableState) -> TableView {
    let mut filtered: Vec<&Record> = records.iter().collect();

    if let Some(needle) = active_needle(state.global_filter.as_deref()) {
        filtered.retain(|record| {
            columns
                .iter()
                .filter(|column| !column.is_synthetic())
                .any(|column| contains_ci(&column.display_value(record), needle))
        });
    }

    for (key, needle) in &state.filters {
        let Some(needle) = active_needle(Some(needle)) else {
            continue;
        };
        // Unknown or synthetic keys always match.
        let Some(column) = data_column(columns, key) else {
            continue;
        };
        filtered.retain(|record| contains_ci(&column.display_value(record), needle));
    }

    if let Some(sort) = &state.sort
        && let Some(column) = data_column(columns, &sort.key)
    {
        filtered.sort_by(|left, right| compare_records(left, right, column.key, sort.direction));
    }

    let selected_count = filtered
        .iter()
        .filter(|record| state.selection.contains(record.id()))
        .count();

    let total_filtered_count = filtered.len();
    let page_size = state.page_size.max(1);
    let page_count = total_filtered_count.div_ceil(page_size);
    let page = state.page.min(page_count.saturating_sub(1));

    let visible_columns: Vec<ColumnDef> = columns
        .iter()
        .filter(|column| !column.hideable || !state.hidden_columns.contains(column.key))
        .cloned()
        .collect();

    let rows = filtered
        .iter()
        .skip(page * page_size)
        .take(page_size)
        .map(|record| RowView {
            id: record.id().clone(),
            cells: visible_columns
                .iter()
                .map(|column| column.display_value(record))
                .collect(),
            selected: state.selection.contains(record.id()),
        })
        .collect();

    TableView {
        visible_columns,
        rows,
        total_filtered_count,
        selected_count,
        page,
        page_count,
    }
}

pub fn apply_table_command(
    state: &mut TableState,
    columns: &[ColumnDef],
    records: &[Record],
    command: TableCommand,
) -> TableStatus {
    match command {
        TableCommand::CycleSort(key) => {
            let Some(column) = data_column(columns, &key).filter(|column| column.sortable) else {
                return TableStatus::SortUnavailable;
            };
            let label = column.label.to_owned();
            let next = match &state.sort {
                Some(sort) if sort.key == key && sort.direction == SortDirection::Asc => {
                    Some(SortDirection::Desc)
                }
                Some(sort) if sort.key == key => None,
                _ => Some(SortDirection::Asc),
            };
            state.page = 0;
            match next {
                Some(direction) => {
                    state.sort = Some(SortSpec {
                        key,
                        direction,
                    });
                    match direction {
                        SortDirection::Asc => TableStatus::SortAsc(label),
                        SortDirection::Desc => TableStatus::SortDesc(label),
                    }
                }
                None => {
                    state.sort = None;
                    TableStatus::SortCleared
                }
            }
        }
        TableCommand::ClearSort => {
            state.sort = None;
            state.page = 0;
            TableStatus::SortCleared
        }
        TableCommand::SetColumnFilter(key, value) => {
            state.page = 0;
            if value.is_empty() {
                state.filters.remove(&key);
                TableStatus::FilterCleared(key)
            } else {
                state.filters.insert(key.clone(), value);
                TableStatus::FilterSet(key)
            }
        }
        TableCommand::ClearColumnFilter(key) => {
            state.page = 0;
            state.filters.remove(&key);
            TableStatus::FilterCleared(key)
        }
        TableCommand::SetGlobalFilter(value) => {
            state.page = 0;
            if value.is_empty() {
                state.global_filter = None;
                TableStatus::GlobalFilterCleared
            } else {
                state.global_filter = Some(value);
                TableStatus::GlobalFilterSet
            }
        }
        TableCommand::ClearGlobalFilter => {
            state.page = 0;
            state.global_filter = None;
            TableStatus::GlobalFilterCleared
        }
        TableCommand::ToggleColumn(key) => {
            let Some(column) = columns.iter().find(|column| column.key == key) else {
                return TableStatus::ColumnNotHideable;
            };
            if !column.hideable {
                return TableStatus::ColumnNotHideable;
            }
            let label = column.label.to_owned();
            if state.hidden_columns.remove(&key) {
                TableStatus::ColumnShown(label)
            } else {
                state.hidden_columns.insert(key);
                TableStatus::ColumnHidden(label)
            }
        }
        TableCommand::ShowAllColumns => {
            state.hidden_columns.clear();
            TableStatus::ColumnsShown
        }
        TableCommand::ToggleRowSelected(id) => {
            if state.selection.remove(&id) {
                TableStatus::RowDeselected
            } else {
                state.selection.insert(id);
                TableStatus::RowSelected
            }
        }
        TableCommand::ClearSelection => {
            state.selection.clear();
            TableStatus::SelectionCleared
        }
        TableCommand::NextPage => {
            let view = project(records, columns, state);
            if view.can_next_page() {
                state.page = view.page + 1;
                TableStatus::PageChanged(state.page)
            } else {
                state.page = view.page;
                TableStatus::PageUnchanged
            }
        }
        TableCommand::PrevPage => {
            let view = project(records, columns, state);
            if view.can_previous_page() {
                state.page = view.page - 1;
                TableStatus::PageChanged(state.page)
            } else {
                state.page = view.page;
                TableStatus::PageUnchanged
            }
        }
        TableCommand::SetPageSize(size) => {
            if size == 0 {
                return TableStatus::PageSizeUnavailable;
            }
            state.page_size = size;
            state.page = 0;
            TableStatus::PageSizeSet(size)
        }
    }
}

fn active_needle(raw: Option<&str>) -> Option<&str> {
    raw.filter(|needle| !needle.is_empty())
}

fn data_column<'a>(columns: &'a [ColumnDef], key: &str) -> Option<&'a ColumnDef> {
    columns
        .iter()
        .find(|column| column.key == key && !column.is_synthetic())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Absent values order last in both directions; present values compare
/// numerically when both sides are JSON numbers and as case-insensitive text
/// otherwise. Ties report Equal so the stable sort keeps fetch order.
fn compare_records(
    left: &Record,
    right: &Record,
    key: &str,
    direction: SortDirection,
) -> Ordering {
    let left_value = left.field(key);
    let right_value = right.field(key);
    let left_absent = is_absent(left_value);
    let right_absent = is_absent(right_value);
    if left_absent && right_absent {
        return Ordering::Equal;
    }
    if left_absent {
        return Ordering::Greater;
    }
    if right_absent {
        return Ordering::Less;
    }

    let order = match (left_value, right_value) {
        (Some(Value::Number(left_number)), Some(Value::Number(right_number))) => {
            match (left_number.as_f64(), right_number.as_f64()) {
                (Some(left_float), Some(right_float)) => left_float.total_cmp(&right_float),
                _ => Ordering::Equal,
            }
        }
        _ => left
            .field_text(key)
            .to_lowercase()
            .cmp(&right.field_text(key).to_lowercase()),
    };

    match direction {
        SortDirection::Asc => order,
        SortDirection::Desc => order.reverse(),
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::{
        ACTIONS_KEY, ColumnDef, DEFAULT_PAGE_SIZE, SortDirection, SortSpec, TableCommand,
        TableState, TableStatus, apply_table_command, project,
    };
    use crate::ids::RecordId;
    use crate::model::Record;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).expect("valid record")
    }

    fn people_columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::field("id", "ID"),
            ColumnDef::field("name", "Name").sortable(),
            ColumnDef::field("city", "City"),
            ColumnDef::status("staff_status", "Staff Status"),
            ColumnDef::actions(),
        ]
    }

    fn people() -> Vec<Record> {
        vec![
            record(json!({"id": 1, "name": "Alice", "city": "Pune", "staff_status": "0"})),
            record(json!({"id": 2, "name": "Bob", "city": "Surat", "staff_status": "1"})),
            record(json!({"id": 3, "name": "carol", "city": "Pune", "staff_status": "2"})),
            record(json!({"id": 4, "name": "Bruno", "city": null, "staff_status": "1"})),
        ]
    }

    fn numbered(count: usize) -> Vec<Record> {
        (1..=count)
            .map(|index| record(json!({"id": index, "name": format!("row {index}")})))
            .collect()
    }

    fn names(view: &super::TableView) -> Vec<String> {
        view.rows
            .iter()
            .map(|row| row.cells[1].clone())
            .collect()
    }

    #[test]
    fn default_state_shows_fetch_order_page_one() {
        let state = TableState::default();
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);

        let view = project(&people(), &people_columns(), &state);
        assert_eq!(view.total_filtered_count, 4);
        assert_eq!(view.page_count, 1);
        assert_eq!(names(&view), vec!["Alice", "Bob", "carol", "Bruno"]);
    }

    #[test]
    fn sort_orders_case_insensitively_and_reverses() {
        let mut state = TableState {
            sort: Some(SortSpec {
                key: "name".to_owned(),
                direction: SortDirection::Asc,
            }),
            ..TableState::default()
        };

        let ascending = project(&people(), &people_columns(), &state);
        assert_eq!(names(&ascending), vec!["Alice", "Bob", "Bruno", "carol"]);

        state.sort = Some(SortSpec {
            key: "name".to_owned(),
            direction: SortDirection::Desc,
        });
        let descending = project(&people(), &people_columns(), &state);
        assert_eq!(names(&descending), vec!["carol", "Bruno", "Bob", "Alice"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records = vec![
            record(json!({"id": 1, "name": "Dup", "city": "first"})),
            record(json!({"id": 2, "name": "Aaa", "city": "solo"})),
            record(json!({"id": 3, "name": "Dup", "city": "second"})),
        ];
        let state = TableState {
            sort: Some(SortSpec {
                key: "name".to_owned(),
                direction: SortDirection::Asc,
            }),
            ..TableState::default()
        };

        let view = project(&records, &people_columns(), &state);
        let cities: Vec<&str> = view.rows.iter().map(|row| row.cells[2].as_str()).collect();
        assert_eq!(cities, vec!["solo", "first", "second"]);
    }

    #[test]
    fn absent_values_sort_last_in_both_directions() {
        let mut state = TableState {
            sort: Some(SortSpec {
                key: "city".to_owned(),
                direction: SortDirection::Asc,
            }),
            ..TableState::default()
        };

        let ascending = project(&people(), &people_columns(), &state);
        assert_eq!(ascending.rows.last().expect("rows").cells[1], "Bruno");

        state.sort = Some(SortSpec {
            key: "city".to_owned(),
            direction: SortDirection::Desc,
        });
        let descending = project(&people(), &people_columns(), &state);
        assert_eq!(descending.rows.last().expect("rows").cells[1], "Bruno");
    }

    #[test]
    fn numeric_fields_sort_numerically_not_lexically() {
        let records = vec![
            record(json!({"id": 1, "name": "ten", "years": 10})),
            record(json!({"id": 2, "name": "two", "years": 2})),
            record(json!({"id": 3, "name": "one", "years": 1})),
        ];
        let columns = vec![
            ColumnDef::field("id", "ID"),
            ColumnDef::field("name", "Name"),
            ColumnDef::field("years", "Years").sortable(),
        ];
        let state = TableState {
            sort: Some(SortSpec {
                key: "years".to_owned(),
                direction: SortDirection::Asc,
            }),
            ..TableState::default()
        };

        let view = project(&records, &columns, &state);
        assert_eq!(names(&view), vec!["one", "two", "ten"]);
    }

    #[test]
    fn column_filter_matches_case_insensitive_substrings() {
        let state = TableState {
            filters: [("name".to_owned(), "b".to_owned())].into(),
            ..TableState::default()
        };

        let view = project(&people(), &people_columns(), &state);
        assert_eq!(names(&view), vec!["Bob", "Bruno"]);
        assert_eq!(view.total_filtered_count, 2);
    }

    #[test]
    fn filter_scenario_from_two_person_collection() {
        let records = vec![
            record(json!({"id": 1, "name": "Alice"})),
            record(json!({"id": 2, "name": "Bob"})),
        ];
        let state = TableState {
            filters: [("name".to_owned(), "b".to_owned())].into(),
            ..TableState::default()
        };

        let view = project(&records, &people_columns(), &state);
        assert_eq!(view.total_filtered_count, 1);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, RecordId::Int(2));
        assert_eq!(view.rows[0].cells[1], "Bob");
    }

    #[test]
    fn global_filter_searches_every_data_column() {
        let state = TableState {
            global_filter: Some("pune".to_owned()),
            ..TableState::default()
        };

        let view = project(&people(), &people_columns(), &state);
        assert_eq!(names(&view), vec!["Alice", "carol"]);
    }

    #[test]
    fn global_filter_matches_rendered_status_labels() {
        let state = TableState {
            global_filter: Some("active".to_owned()),
            ..TableState::default()
        };

        // staff_status is stored as "1"; the filter matches the display text.
        let view = project(&people(), &people_columns(), &state);
        assert_eq!(names(&view), vec!["Bob", "Bruno"]);
    }

    #[test]
    fn global_and_column_filters_intersect() {
        let state = TableState {
            global_filter: Some("pune".to_owned()),
            filters: [("name".to_owned(), "car".to_owned())].into(),
            ..TableState::default()
        };

        let view = project(&people(), &people_columns(), &state);
        assert_eq!(names(&view), vec!["carol"]);
    }

    #[test]
    fn unknown_filter_and_sort_keys_are_ignored() {
        let state = TableState {
            filters: [("no_such_column".to_owned(), "zzz".to_owned())].into(),
            sort: Some(SortSpec {
                key: "ghost".to_owned(),
                direction: SortDirection::Asc,
            }),
            ..TableState::default()
        };

        let view = project(&people(), &people_columns(), &state);
        assert_eq!(names(&view), vec!["Alice", "Bob", "carol", "Bruno"]);
    }

    #[test]
    fn pagination_splits_ten_records_into_two_pages() {
        let records = numbered(10);
        let mut state = TableState::default();

        let first = project(&records, &people_columns(), &state);
        assert_eq!(first.page_count, 2);
        assert_eq!(first.rows.len(), 7);
        assert_eq!(first.rows[0].id, RecordId::Int(1));
        assert_eq!(first.rows[6].id, RecordId::Int(7));

        state.page = 1;
        let second = project(&records, &people_columns(), &state);
        assert_eq!(second.rows.len(), 3);
        assert_eq!(second.rows[0].id, RecordId::Int(8));
        assert_eq!(second.rows[2].id, RecordId::Int(10));
    }

    #[test]
    fn page_is_clamped_when_filters_shrink_the_set() {
        let records = numbered(10);
        let state = TableState {
            page: 9,
            ..TableState::default()
        };

        let view = project(&records, &people_columns(), &state);
        assert_eq!(view.page, 1);
        assert_eq!(view.rows[0].id, RecordId::Int(8));
    }

    #[test]
    fn paging_beyond_bounds_is_a_no_op() {
        let records = numbered(10);
        let columns = people_columns();
        let mut state = TableState::default();

        assert_eq!(
            apply_table_command(&mut state, &columns, &records, TableCommand::PrevPage),
            TableStatus::PageUnchanged
        );
        assert_eq!(state.page, 0);

        assert_eq!(
            apply_table_command(&mut state, &columns, &records, TableCommand::NextPage),
            TableStatus::PageChanged(1)
        );
        assert_eq!(
            apply_table_command(&mut state, &columns, &records, TableCommand::NextPage),
            TableStatus::PageUnchanged
        );
        assert_eq!(state.page, 1);
    }

    #[test]
    fn empty_collection_projects_zero_pages() {
        let state = TableState::default();
        let view = project(&[], &people_columns(), &state);
        assert_eq!(view.page_count, 0);
        assert_eq!(view.page, 0);
        assert!(view.rows.is_empty());
        assert!(view.is_empty());
        assert!(!view.can_next_page());
        assert!(!view.can_previous_page());
    }

    #[test]
    fn selection_count_intersects_the_filtered_set() {
        let mut state = TableState::default();
        state.selection.insert(RecordId::Int(1));
        state.selection.insert(RecordId::Int(2));

        let unfiltered = project(&people(), &people_columns(), &state);
        assert_eq!(unfiltered.selected_count, 2);

        state.filters.insert("name".to_owned(), "b".to_owned());
        let filtered = project(&people(), &people_columns(), &state);
        // Alice stays selected but filtered out; only Bob counts.
        assert_eq!(filtered.selected_count, 1);
        assert_eq!(state.selection.len(), 2);
    }

    #[test]
    fn selection_survives_page_changes() {
        let records = numbered(10);
        let columns = people_columns();
        let mut state = TableState::default();

        apply_table_command(
            &mut state,
            &columns,
            &records,
            TableCommand::ToggleRowSelected(RecordId::Int(3)),
        );
        apply_table_command(&mut state, &columns, &records, TableCommand::NextPage);

        let view = project(&records, &columns, &state);
        assert_eq!(view.selected_count, 1);
        assert!(view.rows.iter().all(|row| !row.selected));
    }

    #[test]
    fn hidden_columns_drop_from_rendering_but_still_filter_and_sort() {
        let mut state = TableState {
            sort: Some(SortSpec {
                key: "city".to_owned(),
                direction: SortDirection::Asc,
            }),
            filters: [("city".to_owned(), "pune".to_owned())].into(),
            ..TableState::default()
        };
        state.hidden_columns.insert("city".to_owned());

        let view = project(&people(), &people_columns(), &state);
        assert!(
            view.visible_columns
                .iter()
                .all(|column| column.key != "city")
        );
        assert_eq!(view.total_filtered_count, 2);
        assert_eq!(names(&view), vec!["Alice", "carol"]);
    }

    #[test]
    fn actions_column_refuses_hiding_and_sorting() {
        let columns = people_columns();
        let records = people();
        let mut state = TableState::default();

        assert_eq!(
            apply_table_command(
                &mut state,
                &columns,
                &records,
                TableCommand::ToggleColumn(ACTIONS_KEY.to_owned()),
            ),
            TableStatus::ColumnNotHideable
        );
        assert_eq!(
            apply_table_command(
                &mut state,
                &columns,
                &records,
                TableCommand::CycleSort(ACTIONS_KEY.to_owned()),
            ),
            TableStatus::SortUnavailable
        );
        assert!(state.hidden_columns.is_empty());
    }

    #[test]
    fn cycle_sort_walks_asc_desc_cleared() {
        let columns = people_columns();
        let records = people();
        let mut state = TableState::default();

        assert_eq!(
            apply_table_command(
                &mut state,
                &columns,
                &records,
                TableCommand::CycleSort("name".to_owned()),
            ),
            TableStatus::SortAsc("Name".to_owned())
        );
        assert_eq!(
            apply_table_command(
                &mut state,
                &columns,
                &records,
                TableCommand::CycleSort("name".to_owned()),
            ),
            TableStatus::SortDesc("Name".to_owned())
        );
        assert_eq!(
            apply_table_command(
                &mut state,
                &columns,
                &records,
                TableCommand::CycleSort("name".to_owned()),
            ),
            TableStatus::SortCleared
        );
        assert!(state.sort.is_none());

        // Non-sortable columns never enter the cycle.
        assert_eq!(
            apply_table_command(
                &mut state,
                &columns,
                &records,
                TableCommand::CycleSort("city".to_owned()),
            ),
            TableStatus::SortUnavailable
        );
    }

    #[test]
    fn filter_changes_reset_to_the_first_page() {
        let records = numbered(10);
        let columns = people_columns();
        let mut state = TableState::default();

        apply_table_command(&mut state, &columns, &records, TableCommand::NextPage);
        assert_eq!(state.page, 1);

        apply_table_command(
            &mut state,
            &columns,
            &records,
            TableCommand::SetGlobalFilter("row".to_owned()),
        );
        assert_eq!(state.page, 0);
    }

    #[test]
    fn toggle_column_round_trips_visibility() {
        let columns = people_columns();
        let records = people();
        let mut state = TableState::default();

        assert_eq!(
            apply_table_command(
                &mut state,
                &columns,
                &records,
                TableCommand::ToggleColumn("city".to_owned()),
            ),
            TableStatus::ColumnHidden("City".to_owned())
        );
        assert!(state.hidden_columns.contains("city"));

        assert_eq!(
            apply_table_command(
                &mut state,
                &columns,
                &records,
                TableCommand::ToggleColumn("city".to_owned()),
            ),
            TableStatus::ColumnShown("City".to_owned())
        );
        assert!(state.hidden_columns.is_empty());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let columns = people_columns();
        let records = people();
        let mut state = TableState::default();

        assert_eq!(
            apply_table_command(&mut state, &columns, &records, TableCommand::SetPageSize(0)),
            TableStatus::PageSizeUnavailable
        );
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);

        assert_eq!(
            apply_table_command(&mut state, &columns, &records, TableCommand::SetPageSize(3)),
            TableStatus::PageSizeSet(3)
        );
        let view = project(&records, &columns, &state);
        assert_eq!(view.page_count, 2);
    }
}
