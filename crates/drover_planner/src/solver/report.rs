use std::fmt;

use jiff::SignedDuration;
use serde::Serialize;

use crate::{
    error::PlannerError,
    problem::units,
    solver::{
        decoder::DecodedSolution, feasibility::Infeasibility, request::PlanningRequest,
    },
    utils::{occurrences::Occurrences, time::int_to_time},
};

const NO_SOLUTION: &str = "No solution could be found!";
const CHECK_PARAMETERS: &str = "Please check your chosen parameters for feasibility.";
const NO_SOLUTION_POSSIBLE: &str = "No solution possible!";
const INVALID_INPUT: &str = "Invalid input!";
const DATA_NOT_FOUND: &str = "Instance data not found!";
const CHECK_INSTANCES: &str = "Please check the instance directory.";
const BUSY: &str = "Another planning request is already running!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    InvalidInput,
    DataNotFound,
    ProvenInfeasible,
    NoSolution,
    SolverException,
    Busy,
}

impl From<&PlannerError> for FailureKind {
    fn from(error: &PlannerError) -> Self {
        match error {
            PlannerError::ProvenInfeasible(_) => FailureKind::ProvenInfeasible,
            PlannerError::SolverNoSolution => FailureKind::NoSolution,
            PlannerError::SolverException(_) => FailureKind::SolverException,
            PlannerError::Busy => FailureKind::Busy,
            PlannerError::DataNotFound { .. } => FailureKind::DataNotFound,
            PlannerError::InvalidArgument(_)
            | PlannerError::Parse { .. }
            | PlannerError::UnknownStrategy { .. }
            | PlannerError::Io(_)
            | PlannerError::Csv(_) => FailureKind::InvalidInput,
        }
    }
}

/// Machine-readable outcome of a successful run, in human units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub city: &'static str,
    /// EUR per kilometre.
    pub toll: f64,
    pub first_solution_strategy: &'static str,
    pub local_search_metaheuristic: &'static str,
    /// Search time limit, in seconds.
    pub max_time: i64,
    /// Time the engine actually searched, in seconds.
    pub actual_time: f64,
    /// EUR
    pub total_cost: f64,
    /// kg
    pub total_weight: f64,
    /// m3
    pub total_volume: f64,
    /// km
    pub total_distance: f64,
    pub total_time: String,
    pub fleet: Occurrences<u8>,
    pub chosen_fleet: Occurrences<u8>,
    /// Node sequences of the used routes, e.g. `0-3-1-0`.
    pub routes: Vec<String>,
}

/// The display strings of a planning run. A failed run carries one of the
/// fixed message sets instead of totals, and no summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingReport {
    pub routes: String,
    pub load: String,
    pub distance: String,
    pub time: String,
    pub cost: String,
    pub fleet: String,
    pub parameters: String,
    pub summary: Option<SummaryRecord>,
    pub failure: Option<FailureKind>,
}

impl RoutingReport {
    pub fn success(
        request: &PlanningRequest,
        solution: &DecodedSolution,
        actual_time: SignedDuration,
    ) -> Self {
        let totals = solution.totals;
        let search = request.search();
        let fleet = request.fleet().composition();

        let summary = SummaryRecord {
            city: request.city().name(),
            toll: request.toll_per_km(),
            first_solution_strategy: search.first_solution_strategy.engine_name(),
            local_search_metaheuristic: search.local_search_metaheuristic.engine_name(),
            max_time: search.time_limit.as_secs(),
            actual_time: actual_time.as_secs_f64(),
            total_cost: units::unscale(totals.cost),
            total_weight: units::unscale(totals.weight),
            total_volume: units::unscale(totals.volume),
            total_distance: units::unscale(totals.distance),
            total_time: int_to_time(totals.time),
            fleet: fleet.clone(),
            chosen_fleet: solution.chosen_fleet.clone(),
            routes: solution
                .routes
                .iter()
                .map(|route| route.node_sequence())
                .collect(),
        };

        RoutingReport {
            routes: solution.describe_routes(),
            load: format!(
                "Total load of all routes: {}kg and {}m3",
                units::format_unscaled(totals.weight),
                units::format_unscaled(totals.volume)
            ),
            distance: format!(
                "Total distance of all routes: {}km",
                units::format_unscaled(totals.distance)
            ),
            time: format!("Total time of all routes: {}", summary.total_time),
            cost: format!(
                "Total cost of all routes: {}€",
                units::format_unscaled(totals.cost)
            ),
            fleet: format!(
                "Chosen fleet: {} ({} vehicles)",
                solution.chosen_fleet,
                solution.chosen_fleet.total()
            ),
            parameters: format!(
                "Solution for {} with {:.2}€/km tolls and fleet {}\n\
                 Search parameters: FSS={}, LSS={}, t={}s",
                request.city(),
                request.toll_per_km(),
                fleet,
                search.first_solution_strategy.display_name(),
                search.local_search_metaheuristic.display_name(),
                summary.max_time,
            ),
            summary: Some(summary),
            failure: None,
        }
    }

    pub fn failure(error: &PlannerError) -> Self {
        let kind = FailureKind::from(error);

        let (routes, distance, cost, parameters) = match error {
            PlannerError::SolverNoSolution => (
                NO_SOLUTION.to_string(),
                CHECK_PARAMETERS.to_string(),
                NO_SOLUTION.to_string(),
                String::from("No solution could be found"),
            ),
            PlannerError::SolverException(message) => (
                String::new(),
                String::new(),
                error.to_string(),
                message.clone(),
            ),
            PlannerError::ProvenInfeasible(infeasibility) => {
                let advice = match infeasibility {
                    Infeasibility::InsufficientWeight { .. } => {
                        "Please add carriers with more payload capacity."
                    }
                    Infeasibility::InsufficientVolume { .. } => {
                        "Please add carriers with more volume capacity."
                    }
                };
                (
                    NO_SOLUTION_POSSIBLE.to_string(),
                    advice.to_string(),
                    NO_SOLUTION_POSSIBLE.to_string(),
                    infeasibility.to_string(),
                )
            }
            PlannerError::DataNotFound { .. } => (
                DATA_NOT_FOUND.to_string(),
                CHECK_INSTANCES.to_string(),
                DATA_NOT_FOUND.to_string(),
                error.to_string(),
            ),
            PlannerError::Busy => (
                BUSY.to_string(),
                String::new(),
                BUSY.to_string(),
                error.to_string(),
            ),
            _ => (
                INVALID_INPUT.to_string(),
                CHECK_PARAMETERS.to_string(),
                INVALID_INPUT.to_string(),
                error.to_string(),
            ),
        };

        RoutingReport {
            routes,
            load: String::new(),
            distance,
            time: String::new(),
            cost,
            fleet: String::new(),
            parameters,
            summary: None,
            failure: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.summary.is_some()
    }
}

impl fmt::Display for RoutingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", self.parameters)?;
        writeln!(f, "{}", self.routes)?;
        for line in [&self.distance, &self.cost, &self.load, &self.time, &self.fleet] {
            if !line.is_empty() {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}
