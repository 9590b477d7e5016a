use chrono::{Datelike, Local, NaiveDate};

/// Birth date as it was found in the roster, before any parsing
#[derive(Clone, Debug, PartialEq)]
pub enum BirthDate {
    /// Native date cell from a spreadsheet
    Date(NaiveDate),
    /// Numeric spreadsheet serial date
    Serial(f64),
    /// Free-form text, parsed by the matcher
    Text(String),
    /// Blank cell
    Missing,
}

/// One roster entry with its fields normalized from the source headers
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// 1-based row number in the source sheet
    pub row: usize,
    pub name: String,
    pub email: String,
    pub birth_date: BirthDate,
}

/// Today's month and day, year-agnostic
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchDay {
    pub month: u32,
    pub day: u32,
}

impl MatchDay {
    /// The current day on the system's local calendar
    pub fn today() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Whether `date` falls on this month and day in any year
    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

/// Outcome of one send attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Failed(String),
}

/// Send attempt for one matched record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub name: String,
    pub email: String,
    pub status: DeliveryStatus,
}

/// Per-record outcomes of one notification pass, in dispatch order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotifyReport {
    deliveries: Vec<Delivery>,
}

impl NotifyReport {
    pub fn record(&mut self, delivery: Delivery) {
        self.deliveries.push(delivery);
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn sent_count(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|d| d.status == DeliveryStatus::Sent)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.deliveries.len() - self.sent_count()
    }

    /// Deliveries that did not go through
    pub fn failures(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries
            .iter()
            .filter(|d| d.status != DeliveryStatus::Sent)
    }
}
