use clap::Subcommand;
use clockwyz_core::grid::parse_time;
use clockwyz_core::Config;

#[derive(Subcommand)]
pub enum GridAction {
    /// Pixel offset of a time of day (e.g. "9:30", "2:15 PM")
    ToPixels {
        time: String,
    },
    /// Snapped time of day at a pixel offset
    ToTime {
        pixels: f64,
    },
    /// List every slot with its offset
    Slots {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: GridAction) -> Result<(), Box<dyn std::error::Error>> {
    let grid = Config::load_or_default().time_grid();
    match action {
        GridAction::ToPixels { time } => {
            let time = parse_time(&time)?;
            println!("{}", grid.time_to_pixels(time.hour, time.minute));
        }
        GridAction::ToTime { pixels } => {
            let time = grid.pixels_to_time(pixels);
            println!("{time} ({})", time.to_12h());
        }
        GridAction::Slots { json } => {
            let slots: Vec<(String, f64)> = grid
                .slots()
                .into_iter()
                .map(|t| (t.to_string(), grid.time_to_pixels(t.hour, t.minute)))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                for (time, offset) in slots {
                    println!("{time}  {offset:>6}");
                }
            }
        }
    }
    Ok(())
}
