// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::Record;

pub const NO_SELECTION_PLACEHOLDER: &str = "No Participant Selected";
const MISSING_VALUE: &str = "N/A";

/// Fixed page style handed to the print facility along with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub paper: &'static str,
    pub margin_mm: u8,
}

pub const PRINT_PAGE_SETUP: PageSetup = PageSetup {
    paper: "A4",
    margin_mm: 4,
};

/// What the external print facility receives: a finished document plus the
/// page style. Spooling and device concerns stay outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub title: String,
    pub page: PageSetup,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub firm: String,
    pub address: String,
    pub brand: String,
    pub sections: Vec<DocumentSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSection {
    pub heading: &'static str,
    pub entries: Vec<SectionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionEntry {
    Detail {
        label: &'static str,
        value: String,
    },
    Checkbox {
        label: &'static str,
        checked: bool,
    },
    Line(String),
}

/// Projects one participant record into the fixed print layout: identity
/// header, labeled detail rows, and the Yes-flag checkboxes. Missing fields
/// always render the literal placeholder, never blank.
pub fn render_participant(record: &Record) -> PrintDocument {
    let firm = record.field_text("name_of_firm");
    let title = if firm.is_empty() {
        "Participant-Details".to_owned()
    } else {
        format!("Participant-{firm}")
    };

    let mut representatives = vec![rep_line(1, record, "rep1_name", "rep1_mobile")];
    if let Some(line) = optional_rep_line(2, record, "rep2_name", "rep2_mobile") {
        representatives.push(line);
    }

    PrintDocument {
        title,
        firm: or_missing(firm),
        address: or_missing(record.field_text("distributor_agent_address")),
        brand: or_missing(record.field_text("brand_name")),
        sections: vec![
            DocumentSection {
                heading: "Firm Information",
                entries: vec![
                    detail("Manufacturer Name", record, "manufacturer_name"),
                    detail("GST Number", record, "gst_no"),
                    detail("Distributor", record, "distributor_agent_name"),
                ],
            },
            DocumentSection {
                heading: "Product Categories",
                entries: vec![
                    checkbox("Men", record, "category_men"),
                    checkbox("Women", record, "category_women"),
                    checkbox("Kids", record, "category_kids"),
                    checkbox("Accessories", record, "category_accessories"),
                    detail("Product Description", record, "product_description"),
                ],
            },
            DocumentSection {
                heading: "Contact Information",
                entries: vec![detail("Email", record, "profile_email")],
            },
            DocumentSection {
                heading: "Representatives",
                entries: representatives,
            },
            DocumentSection {
                heading: "Fair Advertisement Details",
                entries: vec![
                    checkbox("Fair Guide", record, "fair_guide"),
                    checkbox("Branding at Venue", record, "branding_at_venue"),
                    checkbox("Fashion Show", record, "fashion_show"),
                    checkbox("Sponsorship", record, "be_an_sponsor"),
                ],
            },
            DocumentSection {
                heading: "Stall and Payment Details",
                entries: vec![
                    detail("Amount", record, "profile_amount"),
                    detail("Remarks", record, "profile_remark"),
                    detail("Status", record, "profile_status"),
                    SectionEntry::Detail {
                        label: "Stall",
                        value: stall_value(record),
                    },
                ],
            },
        ],
    }
}

impl PrintDocument {
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.firm);
        out.push('\n');
        out.push_str(&self.address);
        out.push('\n');
        out.push_str(&self.brand);
        out.push('\n');
        out.push_str(&"=".repeat(40));
        out.push('\n');

        for section in &self.sections {
            out.push('\n');
            out.push_str(section.heading);
            out.push('\n');
            out.push_str(&"-".repeat(section.heading.len()));
            out.push('\n');
            for entry in &section.entries {
                match entry {
                    SectionEntry::Detail { label, value } => {
                        out.push_str(&format!("{label}: {value}\n"));
                    }
                    SectionEntry::Checkbox { label, checked } => {
                        let mark = if *checked { "x" } else { " " };
                        out.push_str(&format!("[{mark}] {label}\n"));
                    }
                    SectionEntry::Line(line) => {
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }

    pub fn to_job(&self) -> PrintJob {
        PrintJob {
            title: self.title.clone(),
            page: PRINT_PAGE_SETUP,
            body: self.to_plain_text(),
        }
    }
}

fn detail(label: &'static str, record: &Record, key: &str) -> SectionEntry {
    SectionEntry::Detail {
        label,
        value: or_missing(record.field_text(key)),
    }
}

fn checkbox(label: &'static str, record: &Record, key: &str) -> SectionEntry {
    SectionEntry::Checkbox {
        label,
        checked: record.flag_is_yes(key),
    }
}

fn or_missing(value: String) -> String {
    if value.trim().is_empty() {
        MISSING_VALUE.to_owned()
    } else {
        value
    }
}

fn rep_line(slot: u8, record: &Record, name_key: &str, mobile_key: &str) -> SectionEntry {
    let name = or_missing(record.field_text(name_key));
    let mobile = record.field_text(mobile_key);
    if mobile.trim().is_empty() {
        SectionEntry::Line(format!("Rep {slot}: {name}"))
    } else {
        SectionEntry::Line(format!("Rep {slot}: {name} - {mobile}"))
    }
}

fn optional_rep_line(
    slot: u8,
    record: &Record,
    name_key: &str,
    mobile_key: &str,
) -> Option<SectionEntry> {
    if record.field_text(name_key).trim().is_empty()
        && record.field_text(mobile_key).trim().is_empty()
    {
        return None;
    }
    Some(rep_line(slot, record, name_key, mobile_key))
}

fn stall_value(record: &Record) -> String {
    let number = record.field_text("profile_new_stall_no");
    let size = record.field_text("profile_stall_size");
    match (number.trim().is_empty(), size.trim().is_empty()) {
        (true, true) => MISSING_VALUE.to_owned(),
        (false, true) => number,
        (true, false) => format!("({size})"),
        (false, false) => format!("{number} ({size})"),
    }
}
