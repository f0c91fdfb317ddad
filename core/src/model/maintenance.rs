use crate::model::Status;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency of the next maintenance visit. Ordering is most urgent first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Maps the number of days until the visit onto a priority band.
    pub fn from_days_until(days: i64) -> Self {
        if days < 7 {
            Priority::High
        } else if days < 30 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Row of the planned maintenance table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceEntry {
    pub transmitter_id: String,
    pub name: String,
    pub status: Status,
    pub last_maintenance_date: NaiveDate,
    pub next_maintenance_date: NaiveDate,
    pub priority: Priority,
    pub technician: String,
    pub task: String,
}

impl MaintenanceEntry {
    /// Badge shown next to the row: work in progress, urgent or planned.
    pub fn badge(&self) -> &'static str {
        if self.status == Status::Maintenance {
            "In progress"
        } else if self.priority == Priority::High {
            "Urgent"
        } else {
            "Planned"
        }
    }
}
