// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use feria_app::{CollectionKind, Record};
use serde_json::json;
use std::collections::BTreeMap;
use time::{Date, Month};

const FIRST_NAMES: [&str; 16] = [
    "Asha", "Kiran", "Ravi", "Meera", "Arjun", "Divya", "Nikhil", "Pooja", "Sanjay", "Neha",
    "Vikram", "Anita", "Rahul", "Sunita", "Manish", "Lata",
];
const LAST_NAMES: [&str; 14] = [
    "Shah", "Mehta", "Patel", "Verma", "Iyer", "Reddy", "Kapoor", "Das", "Joshi", "Nair", "Singh",
    "Rao", "Bose", "Gupta",
];
const CITIES: [&str; 10] = [
    "Surat",
    "Mumbai",
    "Delhi",
    "Jaipur",
    "Ludhiana",
    "Tirupur",
    "Kolkata",
    "Ahmedabad",
    "Indore",
    "Coimbatore",
];
const FIRM_PREFIXES: [&str; 10] = [
    "Shree", "Royal", "Sunrise", "Heritage", "Lotus", "Prime", "Classic", "Golden", "Everest",
    "Pearl",
];
const FIRM_TRADES: [&str; 6] = [
    "Textiles",
    "Fashions",
    "Apparels",
    "Garments",
    "Exports",
    "Knitwear",
];
const BRAND_SUFFIXES: [&str; 5] = ["line", "wear", "looms", "styles", "weave"];
const EMAIL_DOMAINS: [&str; 4] = [
    "example-mail.com",
    "firmdesk.net",
    "tradepost.org",
    "mailroom.io",
];
const NEWS_SUBJECTS: [&str; 8] = [
    "Stall allotment",
    "Fashion show",
    "Registration",
    "Fair guide",
    "Venue branding",
    "Sponsorship",
    "Exhibitor meet",
    "Entry passes",
];
const NEWS_VERBS: [&str; 6] = [
    "opens",
    "extended",
    "announced",
    "closes soon",
    "updated",
    "confirmed",
];
const STALL_SIZES: [&str; 4] = ["2x2", "3x3", "3x6", "6x6"];
const PROFILE_STATUSES: [&str; 3] = ["Pending", "Confirmed", "Cancelled"];
const STAFF_STATUS_CODES: [&str; 3] = ["0", "1", "2"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 33;
        x = x.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
        x ^= x >> 29;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for panel records. Same seed, same records -- tests and
/// the `--demo` backend rely on that.
#[derive(Debug, Clone)]
pub struct PanelFaker {
    rng: DeterministicRng,
}

impl PanelFaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DeterministicRng::new(if seed == 0 { 1 } else { seed }),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    fn pick<'a>(&mut self, pool: &'a [&'a str]) -> &'a str {
        pool[self.rng.int_n(pool.len())]
    }

    fn yes_no(&mut self) -> &'static str {
        if self.rng.bool() { "Yes" } else { "No" }
    }

    pub fn full_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    pub fn mobile(&mut self) -> String {
        format!("9{:09}", self.rng.int_n(1_000_000_000))
    }

    pub fn email(&mut self, owner: &str) -> String {
        format!(
            "{}@{}",
            owner.to_ascii_lowercase().replace(' ', "."),
            self.pick(&EMAIL_DOMAINS)
        )
    }

    pub fn firm_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRM_PREFIXES), self.pick(&FIRM_TRADES))
    }

    fn date_in_2026(&mut self) -> String {
        let month = Month::try_from(1 + self.rng.int_n(12) as u8).unwrap_or(Month::January);
        let day = 1 + self.rng.int_n(28) as u8;
        Date::from_calendar_date(2026, month, day)
            .map(|date| date.to_string())
            .unwrap_or_else(|_| "2026-01-01".to_owned())
    }

    pub fn job_application(&mut self, id: i64) -> Record {
        let full_name = self.full_name();
        let email = self.email(&full_name);
        let record = json!({
            "id": id,
            "full_name": full_name,
            "father_name": self.full_name(),
            "residing_years": (1 + self.rng.int_n(30)).to_string(),
            "re_locate": self.yes_no(),
            "person_email": email,
            "person_mobile": self.mobile(),
            "staff_status": self.pick(&STAFF_STATUS_CODES),
        });
        Record::from_value(record).expect("generated job application is a valid record")
    }

    pub fn news_item(&mut self, id: i64) -> Record {
        let subject = self.pick(&NEWS_SUBJECTS);
        let verb = self.pick(&NEWS_VERBS);
        let record = json!({
            "id": id,
            "news_heading": format!("{subject} {verb}"),
            "news_sub_title": format!("{} desk update", self.pick(&CITIES)),
            "news_details": format!(
                "{subject} {verb}. Contact the fair office for details.",
            ),
            "news_date": self.date_in_2026(),
        });
        Record::from_value(record).expect("generated news item is a valid record")
    }

    pub fn participant(&mut self, id: i64) -> Record {
        let firm = self.firm_name();
        let brand = format!("{}{}", self.pick(&FIRM_PREFIXES), self.pick(&BRAND_SUFFIXES));
        let agent = self.full_name();
        let rep1 = self.full_name();
        let rep1_mobile = self.mobile();
        let has_rep2 = self.rng.bool();
        let rep2 = if has_rep2 { self.full_name() } else { String::new() };
        let rep2_mobile = if has_rep2 { self.mobile() } else { String::new() };
        let email = self.email(&firm);
        let city = self.pick(&CITIES);

        let record = json!({
            "id": id,
            "name_of_firm": firm,
            "brand_name": brand,
            "manufacturer_name": self.firm_name(),
            "gst_no": format!("24AAAC{:04}Q1Z{}", self.rng.int_n(10_000), self.rng.int_n(10)),
            "distributor_agent_name": agent,
            "distributor_agent_address": format!(
                "{} Market Road, {city}",
                1 + self.rng.int_n(200),
            ),
            "category_men": self.yes_no(),
            "category_women": self.yes_no(),
            "category_kids": self.yes_no(),
            "category_accessories": self.yes_no(),
            "product_description": format!("{} collection", self.pick(&FIRM_TRADES)),
            "profile_email": email,
            "rep1_name": rep1,
            "rep1_mobile": rep1_mobile,
            "rep2_name": rep2,
            "rep2_mobile": rep2_mobile,
            "fair_guide": self.yes_no(),
            "branding_at_venue": self.yes_no(),
            "fashion_show": self.yes_no(),
            "be_an_sponsor": self.yes_no(),
            "profile_amount": ((1 + self.rng.int_n(90)) * 1_000).to_string(),
            "profile_remark": String::new(),
            "profile_status": self.pick(&PROFILE_STATUSES),
            "profile_new_stall_no": format!(
                "{}-{}",
                ["A", "B", "C", "D"][self.rng.int_n(4)],
                1 + self.rng.int_n(60),
            ),
            "profile_stall_size": self.pick(&STALL_SIZES),
        });
        Record::from_value(record).expect("generated participant is a valid record")
    }

    pub fn collection(&mut self, kind: CollectionKind, count: usize) -> Vec<Record> {
        (1..=count as i64)
            .map(|id| match kind {
                CollectionKind::JobRequirements => self.job_application(id),
                CollectionKind::News => self.news_item(id),
                CollectionKind::Participants => self.participant(id),
            })
            .collect()
    }
}

/// Full demo data set: every collection populated from one seed.
pub fn demo_collections(seed: u64, count: usize) -> BTreeMap<CollectionKind, Vec<Record>> {
    let mut faker = PanelFaker::new(seed);
    CollectionKind::ALL
        .iter()
        .map(|kind| (*kind, faker.collection(*kind, count)))
        .collect()
}

pub fn fixture_datetime() -> time::OffsetDateTime {
    time::macros::datetime!(2026-02-19 12:34:56 UTC)
}
