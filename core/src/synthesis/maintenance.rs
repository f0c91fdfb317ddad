use crate::model::{MaintenanceEntry, Priority, Status, Transmitter};
use crate::synthesis::random::{pick, RandomSource};
use crate::synthesis::sites::MAINTENANCE_TASKS;
use chrono::{Duration, NaiveDate};

pub const PLANNING_HORIZON_DAYS: (i64, i64) = (1, 90);

/// Next visit per transmitter, ordered by priority then due date.
pub fn generate_maintenance_schedule<R: RandomSource + ?Sized>(
    transmitters: &[Transmitter],
    today: NaiveDate,
    rng: &mut R,
) -> Vec<MaintenanceEntry> {
    let mut schedule: Vec<MaintenanceEntry> = transmitters
        .iter()
        .map(|transmitter| {
            let (next_maintenance_date, priority) = if transmitter.status == Status::Maintenance {
                (today, Priority::High)
            } else {
                let days_until = rng.int_inclusive(PLANNING_HORIZON_DAYS.0, PLANNING_HORIZON_DAYS.1);
                (
                    today + Duration::days(days_until),
                    Priority::from_days_until(days_until),
                )
            };
            let task = pick(rng, &MAINTENANCE_TASKS)
                .copied()
                .unwrap_or(MAINTENANCE_TASKS[0]);

            MaintenanceEntry {
                transmitter_id: transmitter.id.clone(),
                name: transmitter.name.clone(),
                status: transmitter.status,
                last_maintenance_date: transmitter.last_maintenance_date,
                next_maintenance_date,
                priority,
                technician: transmitter.technician.clone(),
                task: task.to_string(),
            }
        })
        .collect();

    schedule.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(a.next_maintenance_date.cmp(&b.next_maintenance_date))
    });
    schedule
}
