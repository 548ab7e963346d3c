#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod config;
mod loader;
mod render;

use anyhow::Result;
use structopt::StructOpt;

use model::{AppState, DayCategory, Event, Replay, TimeOffset, MINUTES_PER_DAY};

use self::config::Settings;
use self::loader::LoadState;
use self::render::LogRenderer;

#[derive(StructOpt)]
#[structopt(name = "viewer", about = "Replays procession routes over a day")]
struct Args {
    /// A JSON file with settings. Flags below override it.
    #[structopt(long)]
    config: Option<String>,
    /// A URL or path to the GeoJSON routes
    #[structopt(long)]
    data: Option<String>,
    /// Where the time slider starts, as HH:MM
    #[structopt(long)]
    time: Option<TimeOffset>,
    /// Switch on a day, like "Palm Sunday" or "Friday". Can be repeated.
    #[structopt(long = "toggle")]
    toggles: Vec<DayCategory>,
    /// Drag the slider through the whole day, this many minutes at a time
    #[structopt(long)]
    sweep: Option<u32>,
    /// Look up positions from a table built up-front, and skip tiny marker movements
    #[structopt(long)]
    precompute: bool,
    /// Skip marker movements smaller than this, in degrees. Always on with --precompute.
    #[structopt(long)]
    threshold: Option<f64>,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(ref data) = self.data {
            settings.data = data.clone();
        }
        if let Some(time) = self.time {
            settings.initial_time = time;
        }
        if let Some(threshold) = self.threshold {
            settings.push_threshold = threshold;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();
    let settings = args.settings()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    println!("{}", LoadState::Loading.describe());
    let model = match runtime.block_on(loader::load(&settings.data)) {
        LoadState::Loaded(model) => model,
        state => {
            println!("{}", state.describe());
            bail!("Couldn't load {}", settings.data);
        }
    };

    let mut replay = if args.precompute {
        Replay::optimized(model, settings.time_interval, settings.push_threshold)
    } else {
        Replay::new(model).with_push_threshold(args.threshold)
    };
    info!("Drawing a {}", settings.map.describe());
    let mut renderer = LogRenderer::new(settings.map.clone());
    let mut state = AppState::new(settings.initial_time);
    replay.refresh(&state, &mut renderer);

    for day in &args.toggles {
        replay.handle_event(&mut state, Event::DayToggled(*day), &mut renderer);
    }
    info!("Showing {}", state.days.describe());

    if let Some(step) = args.sweep {
        if step == 0 {
            bail!("--sweep needs a positive number of minutes");
        }
        for minutes in (0..MINUTES_PER_DAY as u32).step_by(step as usize) {
            let time = TimeOffset::new(minutes)?;
            replay.handle_event(&mut state, Event::TimeChanged(time), &mut renderer);
            for line in renderer.describe(replay.model()) {
                println!("{line}");
            }
        }
    } else {
        for line in renderer.describe(replay.model()) {
            println!("{line}");
        }
    }

    info!(
        "{} updates pushed to the map, ending at {}",
        renderer.updates(),
        renderer.label()
    );
    Ok(())
}
