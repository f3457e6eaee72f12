use comfy_table::{Table, presets::UTF8_FULL};
use drover_planner::solver::search_params::{FirstSolutionStrategy, LocalSearchMetaheuristic};

pub fn run() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Kind", "Name", "Engine name"]);

    for strategy in FirstSolutionStrategy::all() {
        table.add_row(vec![
            "FSS",
            strategy.display_name(),
            strategy.engine_name(),
        ]);
    }
    for metaheuristic in LocalSearchMetaheuristic::all() {
        table.add_row(vec![
            "LSS",
            metaheuristic.display_name(),
            metaheuristic.engine_name(),
        ]);
    }

    println!("{table}");
}
