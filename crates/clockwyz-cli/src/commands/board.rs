use chrono::{Local, NaiveDate};
use clap::Subcommand;
use clockwyz_core::dashboard::{stat_cards, Period, PeriodStats, TodayView};
use clockwyz_core::grid::{day_label, layout_event, week_dates, WEEK_DAYS};
use clockwyz_core::interaction::Point;
use clockwyz_core::{Board, Config, EventType, PointerOutcome, ScheduleAction, ScheduleStore};
use serde::Deserialize;

use crate::sample::sample_store;

#[derive(Subcommand)]
pub enum BoardAction {
    /// Show the sample week, one column per day
    Show {
        /// Any date in the week to show (defaults to today)
        #[arg(long)]
        week: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List overlapping events in the sample week
    Conflicts {
        #[arg(long)]
        week: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Today's main and secondary tasks
    Today {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Headline stats over a period ending now
    Stats {
        /// week, month or semester
        #[arg(long, default_value = "week")]
        period: Period,
        #[arg(long)]
        week: Option<NaiveDate>,
    },
    /// Replay a JSON script of pointer steps against the sample week
    Replay {
        /// Path to the script (a JSON array of steps)
        script: std::path::PathBuf,
        #[arg(long)]
        week: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
}

/// One scripted interaction.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    PointerDown { event_id: String, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    CellClick { x: f64, y: f64 },
    SetTitle { title: String },
    SetType { event_type: EventType },
    IncreaseDuration,
    DecreaseDuration,
    Submit,
    Cancel,
    Dispatch { action: ScheduleAction },
}

pub fn run(action: BoardAction) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    match action {
        BoardAction::Show { week, json } => {
            let store = sample_store(week.unwrap_or(today));
            if json {
                println!("{}", serde_json::to_string_pretty(store.events())?);
            } else {
                print_week(&store, &Config::load_or_default());
            }
        }
        BoardAction::Conflicts { week, json } => {
            let mut store = sample_store(week.unwrap_or(today));
            let conflicts = store.detect_conflicts().to_vec();
            if json {
                println!("{}", serde_json::to_string_pretty(&conflicts)?);
            } else if conflicts.is_empty() {
                println!("no conflicts");
            } else {
                for c in &conflicts {
                    println!(
                        "{} <-> {}  {} min  {:?}",
                        c.first_id, c.second_id, c.overlap_minutes, c.severity
                    );
                }
            }
        }
        BoardAction::Today { date } => {
            let date = date.unwrap_or(today);
            let store = sample_store(date);
            let view = TodayView::new(&store, date);
            let progress = view.progress();
            println!(
                "{}: {}/{} done, {:.1}h of {:.1}h focus",
                date, progress.completed, progress.total, progress.focus_hours, progress.planned_focus_hours
            );
            for event in view.main_tasks() {
                println!("  * {}  {}", event.start_clock(), event.title);
            }
            for event in view.secondary_tasks() {
                println!("  - {}  {}", event.start_clock(), event.title);
            }
        }
        BoardAction::Stats { period, week } => {
            let store = sample_store(week.unwrap_or(today));
            let now = Local::now().naive_local();
            let stats = PeriodStats::collect(store.events(), period, now);
            println!("{}", period.label());
            for card in stat_cards(&stats) {
                println!("  {:<20} {:>8}  {}  {}", card.title, card.value, card.trend.label, card.subtitle);
            }
        }
        BoardAction::Replay { script, week, json } => {
            let content = std::fs::read_to_string(&script)?;
            let steps: Vec<Step> = serde_json::from_str(&content)?;
            let config = Config::load_or_default();
            let mut board = Board::new(sample_store(week.unwrap_or(today)), config.board_settings());

            let mut log = Vec::with_capacity(steps.len());
            for step in steps {
                log.push(apply(&mut board, step)?);
            }

            if json {
                let out = serde_json::json!({
                    "outcomes": log,
                    "events": board.store().events(),
                    "selected": board.store().selected_event_id(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for line in &log {
                    println!("{line}");
                }
                print_week(board.store(), &config);
            }
        }
    }
    Ok(())
}

fn apply(board: &mut Board, step: Step) -> Result<String, Box<dyn std::error::Error>> {
    let line = match step {
        Step::PointerDown { event_id, x, y } => {
            let started = board.pointer_down(&event_id, Point::new(x, y));
            format!("down {event_id}: {}", if started { "pending" } else { "ignored" })
        }
        Step::PointerMove { x, y } => {
            let dragging = board.pointer_move(Point::new(x, y));
            match board.machine().drag().and_then(|d| d.target) {
                Some(slot) if dragging => format!("move: over {slot}"),
                _ if dragging => "move: off grid".to_string(),
                _ => "move: idle".to_string(),
            }
        }
        Step::PointerUp { x, y } => match board.pointer_up(Point::new(x, y)) {
            PointerOutcome::Ignored => "up: ignored".to_string(),
            PointerOutcome::Selected { event_id } => format!("up: selected {event_id}"),
            PointerOutcome::Moved { event_id, slot } => format!("up: moved {event_id} to {slot}"),
            PointerOutcome::Unchanged { event_id } => format!("up: {event_id} unchanged"),
        },
        Step::CellClick { x, y } => match board.cell_click(Point::new(x, y)) {
            Some(form) => format!("click: quick create {}", form.time_range_label()),
            None => "click: ignored".to_string(),
        },
        Step::SetTitle { title } => {
            if let Some(form) = board.quick_create_mut() {
                form.set_title(title);
            }
            "title set".to_string()
        }
        Step::SetType { event_type } => {
            if let Some(form) = board.quick_create_mut() {
                form.set_type(event_type);
            }
            format!("type {event_type}")
        }
        Step::IncreaseDuration => resize(board, true),
        Step::DecreaseDuration => resize(board, false),
        Step::Submit => match board.submit_quick_create()? {
            Some(id) => format!("created {id}"),
            None => "submit: no popup".to_string(),
        },
        Step::Cancel => {
            board.cancel_quick_create();
            "cancelled".to_string()
        }
        Step::Dispatch { action } => {
            board.store_mut().dispatch(action)?;
            "dispatched".to_string()
        }
    };
    Ok(line)
}

fn resize(board: &mut Board, longer: bool) -> String {
    match board.quick_create_mut() {
        Some(form) => {
            if longer {
                form.increase_duration();
            } else {
                form.decrease_duration();
            }
            format!("duration {} min", form.duration_minutes)
        }
        None => "duration: no popup".to_string(),
    }
}

fn print_week(store: &ScheduleStore, config: &Config) {
    let grid = config.time_grid();
    let today = Local::now().date_naive();
    for (day, date) in WEEK_DAYS.iter().zip(week_dates(store.current_week(), today)) {
        let events = store.events_for_day(*day);
        println!("{} {}", day_label(*day), date.full_date);
        for event in events {
            let layout = layout_event(event, &grid);
            println!(
                "  {}-{}  {}{}  top={} height={}",
                event.start_clock(),
                event.end_clock(),
                event.title,
                if event.is_locked { " (locked)" } else { "" },
                layout.top,
                layout.height
            );
        }
    }
}
