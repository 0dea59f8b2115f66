use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use clockwyz_core::data_dir;
use clockwyz_core::habits::{template, HabitTracker, TEMPLATES};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum HabitAction {
    /// List the built-in habit templates
    Templates,
    /// Add a habit from a template
    Add {
        /// Template title (e.g. "Drink Water")
        template: String,
        /// Custom title
        #[arg(long)]
        title: Option<String>,
    },
    /// List tracked habits
    List {
        #[arg(long)]
        json: bool,
    },
    /// Flip a habit's completion for a day
    Toggle {
        /// Habit id or title
        habit: String,
        /// Day to toggle (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Completion summary for a day
    Stats {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn habits_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join("habits.json"))
}

fn load() -> Result<HabitTracker, Box<dyn std::error::Error>> {
    Ok(HabitTracker::load_from(&habits_path()?)?)
}

fn save(tracker: &HabitTracker) -> Result<(), Box<dyn std::error::Error>> {
    Ok(tracker.save_to(&habits_path()?)?)
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    match action {
        HabitAction::Templates => {
            for t in TEMPLATES.iter() {
                println!("{} {:<24} {:?}  {}", t.icon, t.title, t.category, t.description);
            }
        }
        HabitAction::Add { template: name, title } => {
            let tpl = template(&name).ok_or_else(|| format!("unknown template: {name}"))?;
            let mut tracker = load()?;
            let id = tracker.add_from_template(tpl, title.as_deref(), Utc::now())?;
            save(&tracker)?;
            println!("{id}");
        }
        HabitAction::List { json } => {
            let tracker = load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.habits())?);
            } else {
                for h in tracker.habits() {
                    let mark = if h.is_completed_on(today) { "x" } else { " " };
                    println!("[{mark}] {}  {}  streak {}", h.id, h.title, h.streak);
                }
            }
        }
        HabitAction::Toggle { habit, date } => {
            let mut tracker = load()?;
            let id = tracker
                .habits()
                .iter()
                .find(|h| h.id == habit || h.title.eq_ignore_ascii_case(&habit))
                .map(|h| h.id.clone())
                .ok_or_else(|| format!("unknown habit: {habit}"))?;
            let done = tracker
                .toggle_completion(&id, date.unwrap_or(today))
                .ok_or_else(|| format!("unknown habit: {habit}"))?;
            save(&tracker)?;
            let streak = tracker.habit(&id).map(|h| h.streak).unwrap_or(0);
            println!("{} (streak {streak})", if done { "done" } else { "not done" });
        }
        HabitAction::Stats { date } => {
            let stats = load()?.stats(date.unwrap_or(today));
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
