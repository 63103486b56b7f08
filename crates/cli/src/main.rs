use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use features::{DayOfWeek, MenuItem, RawRecord, TimeSlot, Weather};
use model_registry::ModelTask;
use orchestrator::RecommendationOrchestrator;
use planner::{
    ItemProfile, OperatingContext, build_record, load_orchestrator, overview, recommend_single,
};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

mod output;

/// Canteen - demand, wait time and prep level planner
#[derive(Parser)]
#[command(name = "canteen")]
#[command(about = "Canteen planner: predicts demand, wait time and prep level per menu item", long_about = None)]
struct Cli {
    /// Directory containing the models/ folder
    #[arg(short, long, global = true, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict demand, wait time and prep level for one item
    Recommend {
        /// Menu item, e.g. Idli
        #[arg(long)]
        item: String,

        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predictions for every menu item with slot adjustments applied
    Overview {
        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predict from a raw JSON record file
    Predict {
        /// Path to a flat JSON object with every input field
        #[arg(long)]
        input: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List loaded models and their input columns
    Models,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

/// Operating context flags; unset flags take the dashboard defaults
#[derive(Args, Debug)]
struct ContextArgs {
    /// Day of week (Mon, Tue, Wed, Thu, Fri, Sat, Sun)
    #[arg(long)]
    day: Option<DayOfWeek>,

    /// Time slot (Breakfast, Lunch, Snacks, Dinner)
    #[arg(long)]
    slot: Option<TimeSlot>,

    #[arg(long)]
    exam_week: bool,

    #[arg(long)]
    special_event: bool,

    /// Weather (Normal, Rainy)
    #[arg(long)]
    weather: Option<Weather>,

    #[arg(long)]
    queue_length: Option<u32>,

    #[arg(long)]
    active_counters: Option<u32>,

    #[arg(long)]
    staff_count: Option<u32>,

    /// Average prep time across the kitchen, minutes
    #[arg(long)]
    avg_prep_time: Option<f64>,
}

impl ContextArgs {
    fn into_context(self) -> OperatingContext {
        let defaults = OperatingContext::default();
        OperatingContext {
            day_of_week: self.day.unwrap_or(defaults.day_of_week),
            time_slot: self.slot.unwrap_or(defaults.time_slot),
            is_exam_week: self.exam_week,
            special_event_flag: self.special_event,
            weather: self.weather.unwrap_or(defaults.weather),
            queue_length: self.queue_length.unwrap_or(defaults.queue_length),
            active_counters: self.active_counters.unwrap_or(defaults.active_counters),
            staff_count: self.staff_count.unwrap_or(defaults.staff_count),
            avg_prep_time: self.avg_prep_time.unwrap_or(defaults.avg_prep_time),
        }
    }
}

/// Item profile flags; unset flags take the dashboard defaults
#[derive(Args, Debug)]
struct ProfileArgs {
    #[arg(long)]
    historical_orders: Option<u32>,

    #[arg(long)]
    popularity: Option<f64>,

    #[arg(long)]
    profit_margin: Option<f64>,

    #[arg(long)]
    availability: Option<f64>,

    /// Item prep time, minutes
    #[arg(long)]
    prep_time: Option<f64>,

    #[arg(long)]
    wastage: Option<f64>,
}

impl ProfileArgs {
    fn into_profile(self) -> ItemProfile {
        let defaults = ItemProfile::default();
        ItemProfile {
            historical_orders: self.historical_orders.unwrap_or(defaults.historical_orders),
            item_popularity: self.popularity.unwrap_or(defaults.item_popularity),
            profit_margin: self.profit_margin.unwrap_or(defaults.profit_margin),
            ingredient_availability: self.availability.unwrap_or(defaults.ingredient_availability),
            prep_time: self.prep_time.unwrap_or(defaults.prep_time),
            wastage_history: self.wastage.unwrap_or(defaults.wastage_history),
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Nothing is served unless all three models load
    let start = Instant::now();
    let orchestrator = load_orchestrator(&cli.project_root).with_context(|| {
        format!("Failed to load models from {}", cli.project_root.display())
    })?;
    eprintln!("{} Loaded models in {:.2?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Recommend {
            item,
            context,
            profile,
            json,
        } => handle_recommend(&orchestrator, item, context, profile, json)?,
        Commands::Overview {
            context,
            profile,
            json,
        } => handle_overview(&orchestrator, context, profile, json)?,
        Commands::Predict { input, json } => handle_predict(&orchestrator, &input, json)?,
        Commands::Models => handle_models(&orchestrator),
        Commands::Benchmark { requests } => handle_benchmark(&orchestrator, requests)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    item: String,
    context: ContextArgs,
    profile: ProfileArgs,
    json: bool,
) -> Result<()> {
    let context = context.into_context();
    let item = MenuItem::new(item);

    let result = recommend_single(orchestrator, &context, &item, &profile.into_profile())
        .context("Recommendation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::print_result(&context, &result);
    }
    Ok(())
}

/// Handle the 'overview' command
fn handle_overview(
    orchestrator: &RecommendationOrchestrator,
    context: ContextArgs,
    profile: ProfileArgs,
    json: bool,
) -> Result<()> {
    let context = context.into_context();

    let results =
        overview(orchestrator, &context, &profile.into_profile()).context("Overview failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        output::print_overview(&context, &results);
    }
    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(
    orchestrator: &RecommendationOrchestrator,
    input: &Path,
    json: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let raw: RawRecord = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON object", input.display()))?;

    let result = orchestrator.recommend_raw(&raw).context("Recommendation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format!("Prediction for {}", result.item).bold().blue());
        output::print_metrics(&result);
    }
    Ok(())
}

/// Handle the 'models' command
fn handle_models(orchestrator: &RecommendationOrchestrator) {
    println!("{}", "Loaded models:".bold().blue());
    for task in ModelTask::ALL {
        let predictor = orchestrator.registry().get(task);
        let columns = match predictor.input_columns() {
            Some(columns) => columns.join(", "),
            None => "(not declared)".to_string(),
        };
        println!("{} {} [{}]", "•".green(), task.to_string().bold(), predictor.name());
        println!("    inputs: {}", columns);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(orchestrator: &RecommendationOrchestrator, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    info!("Running {} benchmark requests", requests);
    let mut rng = rand::rng();
    let records: Vec<_> = (0..requests).map(|_| random_record(&mut rng)).collect();

    let wall = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for record in &records {
        let start = Instant::now();
        orchestrator.recommend(record).context("Benchmark request failed")?;
        timings.push(start.elapsed());
    }
    let total_time = wall.elapsed();

    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f64 * 0.95) as usize];
    let p99 = timings[(timings.len() as f64 * 0.99) as usize];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", requests);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// A record with every value inside the dashboard's input ranges
fn random_record(rng: &mut impl Rng) -> features::InputRecord {
    use planner::bounds::{
        ACTIVE_COUNTERS, HISTORICAL_ORDERS, PREP_MINUTES, QUEUE_LENGTH, STAFF_COUNT,
    };

    let context = OperatingContext {
        day_of_week: DayOfWeek::ALL[rng.random_range(0..DayOfWeek::ALL.len())],
        time_slot: TimeSlot::ALL[rng.random_range(0..TimeSlot::ALL.len())],
        is_exam_week: rng.random_bool(0.2),
        special_event_flag: rng.random_bool(0.1),
        weather: Weather::ALL[rng.random_range(0..Weather::ALL.len())],
        queue_length: rng.random_range(QUEUE_LENGTH.0..=QUEUE_LENGTH.1),
        active_counters: rng.random_range(ACTIVE_COUNTERS.0..=ACTIVE_COUNTERS.1),
        staff_count: rng.random_range(STAFF_COUNT.0..=STAFF_COUNT.1),
        avg_prep_time: rng.random_range(PREP_MINUTES.0..=PREP_MINUTES.1),
    };
    let profile = ItemProfile {
        historical_orders: rng.random_range(HISTORICAL_ORDERS.0..=HISTORICAL_ORDERS.1),
        item_popularity: rng.random_range(0.0..=1.0),
        profit_margin: rng.random_range(0.0..=1.0),
        ingredient_availability: rng.random_range(0.0..=1.0),
        prep_time: rng.random_range(PREP_MINUTES.0..=PREP_MINUTES.1),
        wastage_history: rng.random_range(0.0..=1.0),
    };
    let item = planner::MENU[rng.random_range(0..planner::MENU.len())];

    build_record(&context, &MenuItem::from(item), &profile)
}
