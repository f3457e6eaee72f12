use jiff::Timestamp;
use tracing::{debug, info, warn};

use crate::{
    problem::{fleet::SlotIdx, node::NodeIdx},
    solver::{
        engine::{Assignment, RoutingEngine},
        routing_model::{DimensionKind, RoutingModel},
        search_params::{FirstSolutionStrategy, LocalSearchMetaheuristic, SearchParameters},
    },
};

/// Built-in engine used when no external solver is bound. It only builds a
/// first solution: slot after slot, it extends the route with the cheapest
/// arc to an unvisited customer that keeps every dimension, return to the
/// depot included, within bounds. There is no improvement phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheapestArcEngine;

impl CheapestArcEngine {
    fn fits(
        model: &RoutingModel<'_>,
        slot: SlotIdx,
        cumuls: &[i64; 5],
        from: NodeIdx,
        to: NodeIdx,
    ) -> bool {
        let depot = model.depot();

        DimensionKind::ALL.iter().all(|&kind| {
            let cumul = cumuls[kind as usize]
                + model.transit(kind, slot, from, to)
                + model.transit(kind, slot, to, depot);
            cumul <= model.dimension(kind).capacity(slot)
        })
    }
}

impl RoutingEngine for CheapestArcEngine {
    fn name(&self) -> &str {
        "cheapest-arc"
    }

    fn solve(
        &self,
        model: &RoutingModel<'_>,
        params: &SearchParameters,
    ) -> Result<Option<Assignment>, anyhow::Error> {
        if !matches!(
            params.first_solution_strategy,
            FirstSolutionStrategy::Automatic | FirstSolutionStrategy::PathCheapestArc
        ) {
            warn!(
                "{} is not supported, using Path Cheapest Arc",
                params.first_solution_strategy
            );
        }
        if !matches!(
            params.local_search_metaheuristic,
            LocalSearchMetaheuristic::Automatic | LocalSearchMetaheuristic::GreedyDescent
        ) {
            warn!(
                "{} is not supported, the first solution is returned as is",
                params.local_search_metaheuristic
            );
        }

        let deadline = Timestamp::now().checked_add(params.time_limit)?;
        let data = model.data();
        let depot = model.depot();

        let mut visited = vec![false; data.num_nodes()];
        visited[depot.get()] = true;
        let mut remaining = data.num_nodes() - 1;

        let mut routes = vec![Vec::new(); data.num_slots()];
        for slot in data.slots() {
            if remaining == 0 {
                break;
            }

            let mut cumuls = [0i64; 5];
            let mut current = depot;
            loop {
                if Timestamp::now() > deadline {
                    info!("Time limit reached with {remaining} customers left");
                    return Ok(None);
                }

                let next = data
                    .customers()
                    .filter(|node| !visited[node.get()])
                    .filter(|&node| Self::fits(model, slot, &cumuls, current, node))
                    .min_by_key(|&node| {
                        (
                            model.arc_cost(slot, current, node),
                            model.distance(current, node),
                            node,
                        )
                    });

                let Some(next) = next else {
                    break;
                };

                for kind in DimensionKind::ALL {
                    cumuls[kind as usize] += model.transit(kind, slot, current, next);
                }

                visited[next.get()] = true;
                remaining -= 1;
                routes[slot.get()].push(next);
                current = next;
            }

            debug!(
                "Slot {slot} closed with {} customers",
                routes[slot.get()].len()
            );
        }

        if remaining > 0 {
            info!("{remaining} customers could not be assigned to any slot");
            return Ok(None);
        }

        Ok(Some(Assignment::new(routes)))
    }
}
