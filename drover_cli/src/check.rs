use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use drover_planner::{
    problem::{city::City, data_model::DataModel, fleet::Fleet, units},
    solver::{feasibility::check_feasibility, request::PlanningRequestBuilder},
};

use crate::config::Config;

#[derive(Args)]
pub struct CheckArgs {
    #[arg(short, long)]
    city: City,

    #[arg(short, long)]
    fleet: Fleet,

    #[arg(long)]
    two_shifts: bool,

    #[arg(short, long)]
    instances: Option<PathBuf>,
}

pub fn run(args: CheckArgs, config: &Config) -> Result<(), anyhow::Error> {
    let fleet = if args.two_shifts {
        args.fleet.with_two_shifts()
    } else {
        args.fleet
    };

    let mut builder = PlanningRequestBuilder::default();
    builder.set_city(args.city).set_fleet(fleet).set_instances_dir(
        args.instances
            .unwrap_or_else(|| config.instances_dir.clone()),
    );
    let data = DataModel::from_request(&builder.build()?)?;

    let sum = |values: &[i64]| units::unscale(values.iter().sum());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["", "Fleet capacity", "Demand"]);
    table.add_row(vec![
        String::from("Weight [kg]"),
        sum(data.vehicle_payloads()).to_string(),
        sum(data.weight_demands()).to_string(),
    ]);
    table.add_row(vec![
        String::from("Volume [m3]"),
        sum(data.vehicle_volumes()).to_string(),
        sum(data.volume_demands()).to_string(),
    ]);
    println!("{table}");

    let feasibility = check_feasibility(
        data.vehicle_payloads(),
        data.vehicle_volumes(),
        data.weight_demands(),
        data.volume_demands(),
    );
    if !feasibility.is_feasible() {
        bail!("{}", feasibility.explanation());
    }

    println!("{}", feasibility.explanation());

    Ok(())
}
