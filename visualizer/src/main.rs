mod api;
mod charts;

use api::{fetch_payload, post_config, post_refresh, DashboardPayload, ScenarioConfig};
use charts::{series_color, status_color, Bar, BarChart, FleetMap, HeatmapView, LineChart, LineSeries};
use chrono::{Duration as DateDuration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use fleetcore::analysis::{PowerBand, PowerFilter, SortKey, StatusFilter, TransmitterQuery};
use fleetcore::prelude::{MaintenanceEntry, Status, Transmitter};
use fleetcore::session::{details_key, form_field_key, form_prefix, plan_key, SessionState};
use fleetcore::synthesis::sites::{technicians, NETWORK_NAME, PLANNING_TASKS};
use iced::{
    time,
    widget::{
        button, canvas::Canvas, column, pick_list, row, scrollable, text, text_input, Column,
        Container, Row,
    },
    Alignment, Element, Length, Subscription, Task, Theme,
};
use std::time::Duration;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const DURATION_HOURS: (u32, u32) = (1, 24);
const DEFAULT_WINDOW_DAYS: i64 = 6;
const HISTORY_LIMIT: usize = 20;

fn main() -> iced::Result {
    iced::application(Dashboard::boot, Dashboard::update, Dashboard::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Dashboard) -> String {
    format!("{NETWORK_NAME} - Transmitter Fleet")
}

fn application_subscription(state: &Dashboard) -> Subscription<Message> {
    if state.auto_refresh {
        time::every(Duration::from_secs(1)).map(|_| Message::Tick)
    } else {
        Subscription::none()
    }
}

fn application_theme(_: &Dashboard) -> Theme {
    Theme::Dark
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Map,
    Transmitters,
    Signals,
    Maintenance,
    About,
}

impl Tab {
    const ALL: [Tab; 5] = [
        Tab::Map,
        Tab::Transmitters,
        Tab::Signals,
        Tab::Maintenance,
        Tab::About,
    ];

    fn label(self) -> &'static str {
        match self {
            Tab::Map => "Map",
            Tab::Transmitters => "Transmitters",
            Tab::Signals => "Signals",
            Tab::Maintenance => "Maintenance",
            Tab::About => "About",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum DateField {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Date,
    Time,
    Technician,
    Duration,
    Notes,
}

impl FormField {
    fn key(self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::Time => "time",
            FormField::Technician => "technician",
            FormField::Duration => "duration",
            FormField::Notes => "notes",
        }
    }
}

#[derive(Debug)]
struct Dashboard {
    payload: Option<DashboardPayload>,
    last_generated: Option<NaiveDateTime>,
    session: SessionState,
    query: TransmitterQuery,
    tab: Tab,
    start_input: String,
    end_input: String,
    seed_input: String,
    show_coverage: bool,
    auto_refresh: bool,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<DashboardPayload, String>),
    TabSelected(Tab),
    StatusFilterChanged(StatusFilter),
    PowerFilterChanged(PowerFilter),
    SortChanged(SortKey),
    SelectionToggled(Status),
    DateChanged(DateField, String),
    CoverageToggled,
    AutoRefreshToggled,
    Refresh,
    Refreshed(Result<String, String>),
    SeedChanged(String),
    SubmitSeed,
    SeedSubmitted(Result<String, String>),
    DetailsToggled(String),
    PlanToggled(String),
    FormFieldChanged(String, FormField, String),
    TaskToggled(String, usize),
    ConfirmPlan(String),
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
    }
}

fn task_key(transmitter_id: &str, index: usize) -> String {
    form_field_key(transmitter_id, &format!("task_{index}"))
}

impl Dashboard {
    fn new(today: NaiveDate) -> Self {
        let start = today - DateDuration::days(DEFAULT_WINDOW_DAYS);
        Dashboard {
            payload: None,
            last_generated: None,
            session: SessionState::new(),
            query: TransmitterQuery::default(),
            tab: Tab::Map,
            start_input: start.format(DATE_FORMAT).to_string(),
            end_input: today.format(DATE_FORMAT).to_string(),
            seed_input: String::new(),
            show_coverage: true,
            auto_refresh: true,
            status: "Waiting for fleet data...".into(),
            history: Vec::new(),
        }
    }

    fn boot() -> (Self, Task<Message>) {
        let state = Dashboard::new(Local::now().date_naive());
        let task = state.fetch();
        (state, task)
    }

    fn fetch(&self) -> Task<Message> {
        Task::perform(
            fetch_payload(parse_date(&self.start_input), parse_date(&self.end_input)),
            Message::PayloadFetched,
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick if state.auto_refresh => state.fetch(),
            Message::Tick => Task::none(),
            Message::PayloadFetched(Ok(payload)) => {
                state.status = format!(
                    "Fleet received: {} transmitters / {} maintenance rows",
                    payload.transmitters.len(),
                    payload.maintenance.len()
                );
                if payload.generated_at != state.last_generated {
                    state.last_generated = payload.generated_at;
                    if let Some(generated_at) = payload.generated_at {
                        state.push_history(format!(
                            "Dataset generated at {}",
                            generated_at.format("%H:%M:%S")
                        ));
                    }
                }
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
            Message::TabSelected(tab) => {
                state.tab = tab;
                Task::none()
            }
            Message::StatusFilterChanged(filter) => {
                state.query.status = filter;
                Task::none()
            }
            Message::PowerFilterChanged(filter) => {
                state.query.power = filter;
                Task::none()
            }
            Message::SortChanged(sort) => {
                state.query.sort = sort;
                Task::none()
            }
            Message::SelectionToggled(status) => {
                let shown = state.query.selection.toggle(status);
                state.push_history(format!(
                    "{status} transmitters {}",
                    if shown { "shown" } else { "hidden" }
                ));
                Task::none()
            }
            Message::DateChanged(field, value) => {
                match field {
                    DateField::Start => state.start_input = value,
                    DateField::End => state.end_input = value,
                }
                state.fetch()
            }
            Message::CoverageToggled => {
                state.show_coverage = !state.show_coverage;
                Task::none()
            }
            Message::AutoRefreshToggled => {
                state.auto_refresh = !state.auto_refresh;
                state.push_history(format!(
                    "Auto refresh {}",
                    if state.auto_refresh { "on" } else { "off" }
                ));
                Task::none()
            }
            Message::Refresh => Task::perform(post_refresh(), Message::Refreshed),
            Message::Refreshed(Ok(message)) | Message::SeedSubmitted(Ok(message)) => {
                state.push_history(message.clone());
                state.status = message;
                state.fetch()
            }
            Message::Refreshed(Err(err)) => {
                state.status = format!("Refresh error: {err}");
                Task::none()
            }
            Message::SeedChanged(value) => {
                state.seed_input = value;
                Task::none()
            }
            Message::SubmitSeed => {
                let config = ScenarioConfig {
                    seed: state.seed_input.trim().parse().ok(),
                    description: Some("Dashboard reseed".into()),
                    scenario: None,
                };
                Task::perform(post_config(config), Message::SeedSubmitted)
            }
            Message::SeedSubmitted(Err(err)) => {
                state.status = format!("Config error: {err}");
                Task::none()
            }
            Message::DetailsToggled(id) => {
                state.session.toggle(&details_key(&id));
                Task::none()
            }
            Message::PlanToggled(id) => {
                if state.session.toggle(&plan_key(&id)) {
                    state.prefill_plan(&id);
                }
                Task::none()
            }
            Message::FormFieldChanged(id, field, value) => {
                state.session.set_text(form_field_key(&id, field.key()), value);
                Task::none()
            }
            Message::TaskToggled(id, index) => {
                state.session.toggle(&task_key(&id, index));
                Task::none()
            }
            Message::ConfirmPlan(id) => {
                match state.plan_summary(&id) {
                    Ok(message) => {
                        state.session.remove_prefixed(&form_prefix(&id));
                        state.session.remove(&plan_key(&id));
                        state.push_history(message.clone());
                        state.status = message;
                    }
                    Err(err) => state.status = err,
                }
                Task::none()
            }
        }
    }

    /// Seeds an opened planning form from the schedule row.
    fn prefill_plan(&mut self, id: &str) {
        let Some(entry) = self
            .payload
            .as_ref()
            .and_then(|payload| payload.maintenance.iter().find(|entry| entry.transmitter_id == id))
        else {
            return;
        };
        let defaults = [
            (FormField::Date, entry.next_maintenance_date.format(DATE_FORMAT).to_string()),
            (FormField::Time, Local::now().format(TIME_FORMAT).to_string()),
            (FormField::Technician, entry.technician.clone()),
            (FormField::Duration, "2".to_string()),
        ];
        for (field, value) in defaults {
            let key = form_field_key(id, field.key());
            if self.session.text(&key).is_none() {
                self.session.set_text(key, value);
            }
        }
    }

    /// Validates a planning form and describes the booked visit.
    fn plan_summary(&self, id: &str) -> Result<String, String> {
        let field = |field: FormField| {
            self.session
                .text(&form_field_key(id, field.key()))
                .map(str::trim)
                .unwrap_or("")
        };
        let date = parse_date(field(FormField::Date))
            .ok_or_else(|| format!("Invalid date for {id}, expected YYYY-MM-DD"))?;
        let time = NaiveTime::parse_from_str(field(FormField::Time), TIME_FORMAT)
            .map_err(|_| format!("Invalid time for {id}, expected HH:MM"))?;
        let (min_hours, max_hours) = DURATION_HOURS;
        let hours = field(FormField::Duration)
            .parse::<u32>()
            .ok()
            .filter(|hours| (min_hours..=max_hours).contains(hours))
            .ok_or_else(|| format!("Duration for {id} must be {min_hours}-{max_hours} hours"))?;
        let technician = match field(FormField::Technician) {
            "" => return Err(format!("Choose a technician for {id}")),
            technician => technician,
        };

        let tasks: Vec<&str> = PLANNING_TASKS
            .iter()
            .enumerate()
            .filter(|(index, _)| self.session.flag(&task_key(id, *index)))
            .map(|(_, task)| *task)
            .collect();
        let mut message = format!(
            "Maintenance planned for {id} on {date} at {} with {technician} ({hours} h)",
            time.format(TIME_FORMAT)
        );
        if !tasks.is_empty() {
            message.push_str(&format!(": {}", tasks.join(", ")));
        }
        Ok(message)
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let selection = Status::ALL.iter().fold(Column::new().spacing(4), |col, status| {
            let marker = if state.query.selection.contains(*status) {
                "[x]"
            } else {
                "[ ]"
            };
            col.push(
                button(text(format!("{marker} {status}")).size(14))
                    .on_press(Message::SelectionToggled(*status))
                    .padding(4),
            )
        });

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let (monitored, system) = state
            .payload
            .as_ref()
            .map(|payload| (payload.transmitters.len(), payload.system))
            .unwrap_or_default();

        let sidebar = column![
            text("Analysis controls").size(26),
            text("Transmitter status").size(16),
            selection,
            text("Signal history window").size(16),
            text_input("Start (YYYY-MM-DD)", &state.start_input)
                .on_input(|value| Message::DateChanged(DateField::Start, value))
                .padding(6),
            text_input("End (YYYY-MM-DD)", &state.end_input)
                .on_input(|value| Message::DateChanged(DateField::End, value))
                .padding(6),
            button(text(if state.show_coverage {
                "Hide coverage zones"
            } else {
                "Show coverage zones"
            }))
            .on_press(Message::CoverageToggled)
            .padding(8),
            button(text(if state.auto_refresh {
                "[x] Auto refresh"
            } else {
                "[ ] Auto refresh"
            }))
            .on_press(Message::AutoRefreshToggled)
            .padding(8),
            button("Refresh data").on_press(Message::Refresh).padding(10),
            text_input("Seed", &state.seed_input)
                .on_input(Message::SeedChanged)
                .padding(6),
            button("Regenerate with seed")
                .on_press(Message::SubmitSeed)
                .padding(8),
            text(&state.status).size(14),
            text("System information").size(16),
            text(format!("Transmitters monitored: {monitored}")).size(12),
            text(format!("Active alerts: {}", system.active_alerts)).size(12),
            text(format!("Updates today: {}", system.updates_today)).size(12),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(120.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(300.0));

        let tabs = Tab::ALL.iter().fold(Row::new().spacing(8), |tabs, tab| {
            let label = if *tab == state.tab {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            };
            tabs.push(
                button(text(label))
                    .on_press(Message::TabSelected(*tab))
                    .padding(8),
            )
        });

        let body: Element<'_, Message> = match &state.payload {
            None => text("Waiting for fleet data...").size(18).into(),
            Some(payload) => match state.tab {
                Tab::Map => state.map_tab(payload),
                Tab::Transmitters => state.transmitters_tab(payload),
                Tab::Signals => state.signals_tab(payload),
                Tab::Maintenance => state.maintenance_tab(payload),
                Tab::About => about_tab(),
            },
        };

        let main = column![
            text(format!("{NETWORK_NAME} - Transmitter Monitoring")).size(28),
            state.key_metrics(),
            tabs,
            scrollable(body).height(Length::Fill),
        ]
        .spacing(12)
        .padding(16)
        .width(Length::Fill);

        let layout = row![sidebar, main]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn key_metrics(&self) -> Element<'_, Message> {
        let Some(payload) = &self.payload else {
            return text("Key metrics: n/a").size(16).into();
        };
        let metrics = &payload.metrics;
        let updated = payload
            .rendered_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".into());
        row![
            text(format!(
                "Active: {}/{}",
                metrics.count(Status::Active),
                metrics.total
            ))
            .size(18),
            text(format!("Maintenance: {}", metrics.count(Status::Maintenance))).size(18),
            text(format!("Total power: {:.1} kW", metrics.total_power_kw())).size(18),
            text(format!("Avg coverage: {:.1} km", metrics.average_coverage_km)).size(18),
            text(format!("Last update: {updated}")).size(12),
        ]
        .spacing(24)
        .align_y(Alignment::Center)
        .into()
    }

    fn map_tab<'a>(&'a self, payload: &'a DashboardPayload) -> Element<'a, Message> {
        let visible = self.query.apply(&payload.transmitters);
        let legend = visible.iter().fold(Column::new().spacing(4), |col, transmitter| {
            col.push(
                text(format!(
                    "{} {} | {:.1} MHz | {} W | {}",
                    transmitter.id,
                    transmitter.name,
                    transmitter.frequency_mhz,
                    transmitter.power_watts,
                    transmitter.status
                ))
                .size(12)
                .color(status_color(transmitter.status)),
            )
        });
        let map = Canvas::new(FleetMap::new(&visible, self.show_coverage))
            .width(Length::Fill)
            .height(Length::Fixed(420.0));

        column![
            text("Transmitter map").size(20),
            map,
            text(format!("{} transmitters shown", visible.len())).size(14),
            legend,
        ]
        .spacing(10)
        .into()
    }

    fn transmitters_tab<'a>(&'a self, payload: &'a DashboardPayload) -> Element<'a, Message> {
        let controls = row![
            text("Status").size(14),
            pick_list(
                StatusFilter::ALL,
                Some(self.query.status),
                Message::StatusFilterChanged
            ),
            text("Power").size(14),
            pick_list(
                PowerFilter::ALL,
                Some(self.query.power),
                Message::PowerFilterChanged
            ),
            text("Sort by").size(14),
            pick_list(SortKey::ALL, Some(self.query.sort), Message::SortChanged),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let list = self
            .query
            .apply(&payload.transmitters)
            .into_iter()
            .fold(Column::new().spacing(8), |col, transmitter| {
                col.push(self.transmitter_row(payload, transmitter))
            });

        column![text("Transmitter list").size(20), controls, list]
            .spacing(10)
            .into()
    }

    fn transmitter_row<'a>(
        &'a self,
        payload: &'a DashboardPayload,
        transmitter: &'a Transmitter,
    ) -> Element<'a, Message> {
        let summary = row![
            text(&transmitter.id).size(14).width(Length::Fixed(70.0)),
            text(&transmitter.name).size(14).width(Length::Fixed(240.0)),
            text(format!("{:.1} MHz", transmitter.frequency_mhz))
                .size(14)
                .width(Length::Fixed(90.0)),
            text(format!("{} W", transmitter.power_watts))
                .size(14)
                .width(Length::Fixed(70.0)),
            text(transmitter.status.label())
                .size(14)
                .color(status_color(transmitter.status))
                .width(Length::Fixed(100.0)),
            button(text("Details").size(12))
                .on_press(Message::DetailsToggled(transmitter.id.clone()))
                .padding(4),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        if !self.session.flag(&details_key(&transmitter.id)) {
            return summary.into();
        }

        let hourly = payload
            .hourly_for(&transmitter.id)
            .map(|series| {
                series
                    .points
                    .iter()
                    .map(|point| point.quality_pct as f32)
                    .collect()
            })
            .unwrap_or_default();
        let chart = Canvas::new(LineChart::new(
            vec![LineSeries {
                values: hourly,
                color: status_color(transmitter.status),
            }],
            100.0,
        ))
        .width(Length::Fill)
        .height(Length::Fixed(160.0));

        let technical: Element<'a, Message> = match payload.details_for(&transmitter.id) {
            Some(details) => details
                .service_history
                .iter()
                .fold(
                    Column::new().spacing(2).push(
                        text(format!(
                            "Antenna {} | azimuth {} deg | model {}",
                            details.antenna_type, details.azimuth_deg, details.model
                        ))
                        .size(12),
                    ),
                    |col, record| {
                        col.push(text(format!("{}: {} maintenance", record.date, record.kind)).size(12))
                    },
                )
                .into(),
            None => text("Technical details unavailable").size(12).into(),
        };

        let details = column![
            text(format!(
                "{} | {:.4}, {:.4} | altitude {} m",
                transmitter.city, transmitter.latitude, transmitter.longitude, transmitter.altitude_m
            ))
            .size(12),
            text(format!(
                "Installed {} | coverage {:.1} km | {} | last maintenance {}",
                transmitter.install_date,
                transmitter.coverage_radius_km,
                transmitter.technician,
                transmitter.last_maintenance_date
            ))
            .size(12),
            technical,
            text("Mean quality by hour (0-23)").size(12),
            chart,
        ]
        .spacing(4)
        .padding(8);

        column![summary, details].spacing(4).into()
    }

    fn signals_tab<'a>(&'a self, payload: &'a DashboardPayload) -> Element<'a, Message> {
        let visible = self.query.apply(&payload.transmitters);

        let readings: Vec<_> = payload
            .current_quality
            .iter()
            .filter(|reading| self.query.selection.contains(reading.status))
            .collect();
        let current = Canvas::new(BarChart::new(
            readings
                .iter()
                .map(|reading| Bar {
                    value: reading.quality_pct as f32,
                    color: status_color(reading.status),
                })
                .collect(),
            Some(100.0),
        ))
        .width(Length::Fill)
        .height(Length::Fixed(180.0));
        let current_labels = readings.iter().fold(Row::new().spacing(12), |labels, reading| {
            labels.push(text(format!("{} {:.0}%", reading.transmitter_id, reading.quality_pct)).size(11))
        });

        let daily = Canvas::new(LineChart::new(
            payload
                .featured_daily
                .iter()
                .enumerate()
                .map(|(i, series)| LineSeries {
                    values: series.points.iter().map(|point| point.quality_pct as f32).collect(),
                    color: series_color(i),
                })
                .collect(),
            100.0,
        ))
        .width(Length::Fill)
        .height(Length::Fixed(200.0));
        let daily_legend = payload.featured_daily.iter().enumerate().fold(
            Row::new().spacing(12),
            |legend, (i, series)| {
                legend.push(text(&series.transmitter_id).size(12).color(series_color(i)))
            },
        );

        let power = Canvas::new(BarChart::new(
            bars_for(&visible, |transmitter| transmitter.power_watts as f32),
            None,
        ))
        .width(Length::Fill)
        .height(Length::Fixed(160.0));

        let buckets = Canvas::new(BarChart::new(
            PowerBand::ALL
                .iter()
                .enumerate()
                .map(|(i, band)| Bar {
                    value: payload.power_buckets.count(*band) as f32,
                    color: series_color(i),
                })
                .collect(),
            None,
        ))
        .width(Length::Fixed(300.0))
        .height(Length::Fixed(140.0));
        let bucket_labels = PowerBand::ALL.iter().fold(Row::new().spacing(12), |labels, band| {
            labels.push(
                text(format!("{}: {}", band.label(), payload.power_buckets.count(*band))).size(12),
            )
        });

        let coverage = Canvas::new(BarChart::new(
            bars_for(&visible, |transmitter| transmitter.coverage_radius_km as f32),
            None,
        ))
        .width(Length::Fill)
        .height(Length::Fixed(160.0));

        let heatmap: Element<'a, Message> = match &payload.heatmap {
            Some(heatmap) if !heatmap.is_empty() => column![
                Canvas::new(HeatmapView::new(heatmap.clone()))
                    .width(Length::Fixed(360.0))
                    .height(Length::Fixed(360.0)),
                text(format!("Peak signal {:.1}", heatmap.max_signal())).size(12),
            ]
            .spacing(4)
            .into(),
            _ => text("No heatmap available").size(12).into(),
        };

        column![
            text("Current signal quality (%)").size(20),
            current,
            current_labels,
            text("7-day quality, featured transmitters").size(20),
            daily,
            daily_legend,
            text("Power by transmitter (W)").size(20),
            power,
            text("Power distribution").size(20),
            buckets,
            bucket_labels,
            text("Coverage radius (km)").size(20),
            coverage,
            text("Coverage heatmap").size(20),
            heatmap,
        ]
        .spacing(10)
        .into()
    }

    fn maintenance_tab<'a>(&'a self, payload: &'a DashboardPayload) -> Element<'a, Message> {
        let rows = payload
            .maintenance
            .iter()
            .fold(Column::new().spacing(8), |col, entry| {
                col.push(self.maintenance_row(entry))
            });

        column![text("Maintenance schedule").size(20), rows]
            .spacing(10)
            .into()
    }

    fn maintenance_row<'a>(&'a self, entry: &'a MaintenanceEntry) -> Element<'a, Message> {
        let id = &entry.transmitter_id;
        let summary = row![
            text(id).size(14).width(Length::Fixed(70.0)),
            text(&entry.name).size(14).width(Length::Fixed(220.0)),
            text(entry.status.label())
                .size(14)
                .color(status_color(entry.status))
                .width(Length::Fixed(100.0)),
            text(format!("last {}", entry.last_maintenance_date)).size(12),
            text(format!("next {}", entry.next_maintenance_date)).size(12),
            text(format!("{} ({})", entry.priority, entry.badge()))
                .size(12)
                .width(Length::Fixed(130.0)),
            text(&entry.technician).size(12),
            text(&entry.task).size(12),
            button(text("Plan").size(12))
                .on_press(Message::PlanToggled(id.clone()))
                .padding(4),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        if !self.session.flag(&plan_key(id)) {
            return summary.into();
        }

        let technician_key = form_field_key(id, FormField::Technician.key());
        let technician_id = id.clone();
        let form = column![
            text(format!("Plan maintenance for {}", entry.name)).size(14),
            self.form_input(id, FormField::Date, "Date (YYYY-MM-DD)"),
            self.form_input(id, FormField::Time, "Time (HH:MM)"),
            pick_list(
                technicians(),
                self.session.text(&technician_key).map(str::to_string),
                move |value| Message::FormFieldChanged(
                    technician_id.clone(),
                    FormField::Technician,
                    value
                ),
            ),
            self.form_input(id, FormField::Duration, "Duration (hours)"),
            text("Tasks").size(12),
            self.task_toggles(id),
            self.form_input(id, FormField::Notes, "Notes"),
            button("Confirm")
                .on_press(Message::ConfirmPlan(id.clone()))
                .padding(8),
        ]
        .spacing(6)
        .padding(8)
        .width(Length::Fixed(420.0));

        column![summary, form].spacing(4).into()
    }

    fn form_input<'a>(
        &'a self,
        id: &str,
        field: FormField,
        placeholder: &'a str,
    ) -> Element<'a, Message> {
        let value = self
            .session
            .text(&form_field_key(id, field.key()))
            .unwrap_or("");
        let id = id.to_string();
        text_input(placeholder, value)
            .on_input(move |value| Message::FormFieldChanged(id.clone(), field, value))
            .padding(6)
            .into()
    }

    fn task_toggles(&self, id: &str) -> Element<'_, Message> {
        PLANNING_TASKS
            .iter()
            .enumerate()
            .fold(Column::new().spacing(2), |col, (index, task)| {
                let marker = if self.session.flag(&task_key(id, index)) {
                    "[x]"
                } else {
                    "[ ]"
                };
                col.push(
                    button(text(format!("{marker} {task}")).size(12))
                        .on_press(Message::TaskToggled(id.to_string(), index))
                        .padding(2),
                )
            })
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
    }
}

fn bars_for(transmitters: &[&Transmitter], value: impl Fn(&Transmitter) -> f32) -> Vec<Bar> {
    transmitters
        .iter()
        .map(|&transmitter| Bar {
            value: value(transmitter),
            color: status_color(transmitter.status),
        })
        .collect()
}

fn about_tab<'a>() -> Element<'a, Message> {
    column![
        text(format!("About the {NETWORK_NAME} dashboard")).size(20),
        text("Monitors twelve transmitters spread over Reunion island.").size(14),
        text("Map: transmitter positions coloured by status, with optional coverage zones.")
            .size(12),
        text("Transmitters: filter by status and power band, sort, and expand hourly quality.")
            .size(12),
        text("Signals: current quality, 7-day trends, power, coverage and the coverage heatmap.")
            .size(12),
        text("Maintenance: schedule ordered by urgency with per-transmitter planning forms.")
            .size(12),
        text("All data is synthetic and regenerated on refresh.").size(12),
    ]
    .spacing(8)
    .into()
}
