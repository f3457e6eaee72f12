use std::{fmt, str::FromStr};

use jiff::SignedDuration;
use serde::Serialize;

use crate::error::PlannerError;

/// Construction heuristic used by the routing engine to build its first solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FirstSolutionStrategy {
    Automatic,
    PathCheapestArc,
    PathMostConstrainedArc,
    EvaluatorStrategy,
    Savings,
    Sweep,
    Christofides,
    AllUnperformed,
    BestInsertion,
    ParallelCheapestInsertion,
    LocalCheapestInsertion,
    GlobalCheapestArc,
    LocalCheapestArc,
    FirstUnboundMinValue,
}

/// Improvement strategy applied by the routing engine after the first solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LocalSearchMetaheuristic {
    Automatic,
    GreedyDescent,
    GuidedLocalSearch,
    SimulatedAnnealing,
    TabuSearch,
    GenericTabuSearch,
}

/// `(strategy, display name, engine name)`, in declaration order so that a
/// strategy indexes its own row.
static FIRST_SOLUTION_STRATEGIES: [(FirstSolutionStrategy, &str, &str); 14] = [
    (FirstSolutionStrategy::Automatic, "Automatic", "AUTOMATIC"),
    (FirstSolutionStrategy::PathCheapestArc, "Path Cheapest Arc", "PATH_CHEAPEST_ARC"),
    (
        FirstSolutionStrategy::PathMostConstrainedArc,
        "Path Most Constrained Arc",
        "PATH_MOST_CONSTRAINED_ARC",
    ),
    (FirstSolutionStrategy::EvaluatorStrategy, "Evaluator Strategy", "EVALUATOR_STRATEGY"),
    (FirstSolutionStrategy::Savings, "Savings", "SAVINGS"),
    (FirstSolutionStrategy::Sweep, "Sweep", "SWEEP"),
    (FirstSolutionStrategy::Christofides, "Christofides", "CHRISTOFIDES"),
    (FirstSolutionStrategy::AllUnperformed, "All Unperformed", "ALL_UNPERFORMED"),
    (FirstSolutionStrategy::BestInsertion, "Best Insertion", "BEST_INSERTION"),
    (
        FirstSolutionStrategy::ParallelCheapestInsertion,
        "Parallel Cheapest Insertion",
        "PARALLEL_CHEAPEST_INSERTION",
    ),
    (
        FirstSolutionStrategy::LocalCheapestInsertion,
        "Local Cheapest Insertion",
        "LOCAL_CHEAPEST_INSERTION",
    ),
    (FirstSolutionStrategy::GlobalCheapestArc, "Global Cheapest Arc", "GLOBAL_CHEAPEST_ARC"),
    (FirstSolutionStrategy::LocalCheapestArc, "Local Cheapest Arc", "LOCAL_CHEAPEST_ARC"),
    (
        FirstSolutionStrategy::FirstUnboundMinValue,
        "First Unbound Min Value",
        "FIRST_UNBOUND_MIN_VALUE",
    ),
];

static LOCAL_SEARCH_METAHEURISTICS: [(LocalSearchMetaheuristic, &str, &str); 6] = [
    (LocalSearchMetaheuristic::Automatic, "Automatic", "AUTOMATIC"),
    (LocalSearchMetaheuristic::GreedyDescent, "Greedy Descent", "GREEDY_DESCENT"),
    (
        LocalSearchMetaheuristic::GuidedLocalSearch,
        "Guided Local Search",
        "GUIDED_LOCAL_SEARCH",
    ),
    (
        LocalSearchMetaheuristic::SimulatedAnnealing,
        "Simulated Annealing",
        "SIMULATED_ANNEALING",
    ),
    (LocalSearchMetaheuristic::TabuSearch, "Tabu Search", "TABU_SEARCH"),
    (
        LocalSearchMetaheuristic::GenericTabuSearch,
        "Generic Tabu Search",
        "GENERIC_TABU_SEARCH",
    ),
];

/// Drops separators and case so that `Path Cheapest Arc`, `path-cheapest-arc`
/// and `PATH_CHEAPEST_ARC` compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect()
}

fn lookup<T: Copy>(
    table: &[(T, &'static str, &'static str)],
    kind: &'static str,
    name: &str,
) -> Result<T, PlannerError> {
    let normalized = normalize(name);

    table
        .iter()
        .find(|(_, _, engine_name)| normalize(engine_name) == normalized)
        .map(|(strategy, _, _)| *strategy)
        .ok_or_else(|| PlannerError::UnknownStrategy {
            kind,
            name: name.to_string(),
        })
}

impl FirstSolutionStrategy {
    pub fn all() -> impl Iterator<Item = FirstSolutionStrategy> {
        FIRST_SOLUTION_STRATEGIES.iter().map(|(strategy, _, _)| *strategy)
    }

    pub fn display_name(&self) -> &'static str {
        FIRST_SOLUTION_STRATEGIES[*self as usize].1
    }

    pub fn engine_name(&self) -> &'static str {
        FIRST_SOLUTION_STRATEGIES[*self as usize].2
    }
}

impl LocalSearchMetaheuristic {
    pub fn all() -> impl Iterator<Item = LocalSearchMetaheuristic> {
        LOCAL_SEARCH_METAHEURISTICS.iter().map(|(strategy, _, _)| *strategy)
    }

    pub fn display_name(&self) -> &'static str {
        LOCAL_SEARCH_METAHEURISTICS[*self as usize].1
    }

    pub fn engine_name(&self) -> &'static str {
        LOCAL_SEARCH_METAHEURISTICS[*self as usize].2
    }
}

impl FromStr for FirstSolutionStrategy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&FIRST_SOLUTION_STRATEGIES, "first solution", s)
    }
}

impl FromStr for LocalSearchMetaheuristic {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&LOCAL_SEARCH_METAHEURISTICS, "local search", s)
    }
}

impl fmt::Display for FirstSolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl fmt::Display for LocalSearchMetaheuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Parameters passed through to the routing engine.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchParameters {
    pub first_solution_strategy: FirstSolutionStrategy,
    pub local_search_metaheuristic: LocalSearchMetaheuristic,
    pub time_limit: SignedDuration,
}

impl SearchParameters {
    /// Builds parameters from strategy names, rejecting names that are not in
    /// the lookup tables.
    pub fn from_names(
        first_solution_strategy: &str,
        local_search_metaheuristic: &str,
        time_limit: SignedDuration,
    ) -> Result<Self, PlannerError> {
        if time_limit <= SignedDuration::ZERO {
            return Err(PlannerError::InvalidArgument(format!(
                "The time limit must be positive, got {time_limit}"
            )));
        }

        Ok(SearchParameters {
            first_solution_strategy: first_solution_strategy.parse()?,
            local_search_metaheuristic: local_search_metaheuristic.parse()?,
            time_limit,
        })
    }
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            first_solution_strategy: FirstSolutionStrategy::Automatic,
            local_search_metaheuristic: LocalSearchMetaheuristic::Automatic,
            time_limit: SignedDuration::from_secs(30),
        }
    }
}
