use std::{
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use anyhow::bail;
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use drover_planner::{
    export::csv_export::export_csv,
    problem::{city::City, fleet::Fleet, units},
    solver::{
        cheapest_arc::CheapestArcEngine,
        planner::RoutePlanner,
        report::{RoutingReport, SummaryRecord},
        request::PlanningRequestBuilder,
        search_params::SearchParameters,
    },
};
use indicatif::{ProgressBar, ProgressStyle};
use jiff::SignedDuration;
use tracing::info;

use crate::{config::Config, parsers};

#[derive(Args)]
pub struct PlanArgs {
    /// Paris, NewYork or Shanghai
    #[arg(short, long)]
    city: City,

    /// Carrier types of the fleet, e.g. "1:10, 4:2, 7"
    #[arg(short, long)]
    fleet: Fleet,

    /// Lets every carrier drive a second route
    #[arg(long)]
    two_shifts: bool,

    /// Toll in EUR per kilometre driven inside the zone
    #[arg(long, default_value_t = 0.0)]
    toll: f64,

    #[arg(long, default_value = "Automatic")]
    fss: String,

    #[arg(long, default_value = "Automatic")]
    lss: String,

    /// Search time limit (e.g., "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "30s")]
    timeout: SignedDuration,

    /// Folder holding the <city>.nodes and <city>.routes files
    #[arg(short, long)]
    instances: Option<PathBuf>,

    /// Writes the summary as CSV into the given folder
    #[arg(long, num_args = 0..=1)]
    csv: Option<Option<PathBuf>>,

    /// Prints the summary as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs, config: &Config) -> Result<(), anyhow::Error> {
    let fleet = if args.two_shifts {
        args.fleet.with_two_shifts()
    } else {
        args.fleet
    };

    let mut builder = PlanningRequestBuilder::default();
    builder
        .set_city(args.city)
        .set_fleet(fleet)
        .set_toll_per_km(args.toll)?
        .set_search_parameters(SearchParameters::from_names(
            &args.fss,
            &args.lss,
            args.timeout,
        )?)
        .set_instances_dir(
            args.instances
                .unwrap_or_else(|| config.instances_dir.clone()),
        );
    let request = builder.build()?;

    let planner = RoutePlanner::new(CheapestArcEngine);
    let report = with_progress(args.timeout, || planner.plan(&request))?;

    println!("{}\n", report.parameters);

    let Some(summary) = &report.summary else {
        bail!("{}", failure_message(&report));
    };

    println!("{}", report.routes);
    println!("{}", summary_table(summary));

    if let Some(dir) = args.csv {
        let path = export_csv(&dir.unwrap_or_else(|| config.output_dir.clone()), summary)?;
        info!("Exported {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    }

    Ok(())
}

fn failure_message(report: &RoutingReport) -> String {
    [&report.routes, &report.distance, &report.cost]
        .into_iter()
        .filter(|message| !message.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_table(summary: &SummaryRecord) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["", "Total"]);

    table.add_row(vec![
        String::from("Cost"),
        format!("{}€", units::format_human(summary.total_cost)),
    ]);
    table.add_row(vec![
        String::from("Distance"),
        format!("{}km", units::format_human(summary.total_distance)),
    ]);
    table.add_row(vec![
        String::from("Load"),
        format!(
            "{}kg and {}m3",
            units::format_human(summary.total_weight),
            units::format_human(summary.total_volume)
        ),
    ]);
    table.add_row(vec![String::from("Time"), summary.total_time.clone()]);
    table.add_row(vec![
        String::from("Chosen fleet"),
        format!(
            "{} ({} vehicles)",
            summary.chosen_fleet,
            summary.chosen_fleet.total()
        ),
    ]);
    table.add_row(vec![
        String::from("Search time"),
        format!("{:.2}s / {}s", summary.actual_time, summary.max_time),
    ]);

    table
}

/// Shows a progress bar over the time limit while `solve` runs.
fn with_progress<T>(
    timeout: SignedDuration,
    solve: impl FnOnce() -> T,
) -> Result<T, anyhow::Error> {
    let seconds = timeout.as_secs().max(1) as u64;
    let bar = ProgressBar::new(seconds);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] ({elapsed}/{len}s)")?);
    bar.enable_steady_tick(Duration::from_secs(1));

    let done = AtomicBool::new(false);
    let result = thread::scope(|scope| {
        scope.spawn(|| {
            let mut position = 0;
            while !done.load(Ordering::Acquire) && position < seconds {
                bar.set_position(position);
                thread::sleep(Duration::from_millis(250));
                position = bar.elapsed().as_secs();
            }
        });

        let result = solve();
        done.store(true, Ordering::Release);
        result
    });

    bar.finish_and_clear();

    Ok(result)
}
