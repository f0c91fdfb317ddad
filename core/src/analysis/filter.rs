//! Selections the dashboard applies to the in-memory tables.
//!
//! Every filter is total: an impossible combination simply matches nothing.

use crate::analysis::power::PowerBand;
use crate::model::{SignalSample, Status, Transmitter};
use crate::prelude::{FleetError, FleetResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(Status::Active),
        StatusFilter::Only(Status::Maintenance),
        StatusFilter::Only(Status::Inactive),
    ];

    pub fn matches(self, transmitter: &Transmitter) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => transmitter.status == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => f.write_str(status.label()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = FleetError;

    fn from_str(value: &str) -> FleetResult<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        value.parse().map(StatusFilter::Only)
    }
}

/// Sidebar multi-select; starts with every status selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSelection {
    selected: BTreeSet<Status>,
}

impl StatusSelection {
    pub fn all() -> Self {
        Self {
            selected: Status::ALL.into_iter().collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }

    pub fn contains(&self, status: Status) -> bool {
        self.selected.contains(&status)
    }

    /// Flips one status; returns whether it is now selected.
    pub fn toggle(&mut self, status: Status) -> bool {
        if !self.selected.remove(&status) {
            self.selected.insert(status);
            return true;
        }
        false
    }

    pub fn matches(&self, transmitter: &Transmitter) -> bool {
        self.contains(transmitter.status)
    }
}

impl Default for StatusSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Status> for StatusSelection {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PowerFilter {
    #[default]
    All,
    Band(PowerBand),
}

impl PowerFilter {
    pub const ALL: [PowerFilter; 4] = [
        PowerFilter::All,
        PowerFilter::Band(PowerBand::Above1000),
        PowerFilter::Band(PowerBand::From500To1000),
        PowerFilter::Band(PowerBand::Below500),
    ];

    pub fn matches(self, transmitter: &Transmitter) -> bool {
        match self {
            PowerFilter::All => true,
            PowerFilter::Band(band) => PowerBand::of(transmitter.power_watts) == band,
        }
    }
}

impl fmt::Display for PowerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerFilter::All => f.write_str("All"),
            PowerFilter::Band(band) => f.write_str(band.label()),
        }
    }
}

impl FromStr for PowerFilter {
    type Err = FleetError;

    fn from_str(value: &str) -> FleetResult<Self> {
        let value = value.trim();
        PowerFilter::ALL
            .into_iter()
            .find(|filter| filter.to_string().eq_ignore_ascii_case(value))
            .ok_or_else(|| FleetError::InvalidInput(format!("unknown power filter `{value}`")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Frequency,
    /// Strongest first.
    Power,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Id,
        SortKey::Name,
        SortKey::Frequency,
        SortKey::Power,
        SortKey::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::Name => "Name",
            SortKey::Frequency => "Frequency",
            SortKey::Power => "Power",
            SortKey::Status => "Status",
        }
    }

    fn compare(self, a: &Transmitter, b: &Transmitter) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Frequency => a.frequency_mhz.total_cmp(&b.frequency_mhz),
            SortKey::Power => b.power_watts.cmp(&a.power_watts),
            SortKey::Status => a.status.label().cmp(b.status.label()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = FleetError;

    fn from_str(value: &str) -> FleetResult<Self> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| FleetError::InvalidInput(format!("unknown sort key `{value}`")))
    }
}

/// Combined selection behind the transmitter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransmitterQuery {
    pub status: StatusFilter,
    pub power: PowerFilter,
    pub sort: SortKey,
    pub selection: StatusSelection,
}

impl TransmitterQuery {
    pub fn matches(&self, transmitter: &Transmitter) -> bool {
        self.selection.matches(transmitter)
            && self.status.matches(transmitter)
            && self.power.matches(transmitter)
    }

    /// Filters, then sorts stably by the chosen key.
    pub fn apply<'a>(&self, transmitters: &'a [Transmitter]) -> Vec<&'a Transmitter> {
        let mut selected: Vec<&Transmitter> = transmitters
            .iter()
            .filter(|transmitter| self.matches(transmitter))
            .collect();
        selected.sort_by(|a, b| self.sort.compare(a, b));
        selected
    }
}

/// Inclusive calendar window. An end before the start matches nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::new(NaiveDate::MIN, NaiveDate::MAX)
    }

    /// Missing bounds are left open.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self::new(
            start.unwrap_or(NaiveDate::MIN),
            end.unwrap_or(NaiveDate::MAX),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

pub fn filter_history<'a>(history: &'a [SignalSample], range: &DateRange) -> Vec<&'a SignalSample> {
    if range.is_empty() {
        return Vec::new();
    }
    history
        .iter()
        .filter(|sample| range.contains(sample.date))
        .collect()
}
