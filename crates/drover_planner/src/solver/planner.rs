use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::atomic::{AtomicBool, Ordering},
};

use jiff::Timestamp;
use tracing::{info, warn};

use crate::{
    error::PlannerError,
    problem::data_model::DataModel,
    solver::{
        decoder::decode,
        engine::{RoutingEngine, Violation},
        feasibility::check_feasibility,
        report::RoutingReport,
        request::PlanningRequest,
        routing_model::RoutingModel,
    },
    timer_debug,
};

/// Runs planning requests against a routing engine, one at a time.
pub struct RoutePlanner<E: RoutingEngine> {
    engine: E,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, PlannerError> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| PlannerError::Busy)?;

        Ok(InFlightGuard { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<E: RoutingEngine> RoutePlanner<E> {
    pub fn new(engine: E) -> Self {
        RoutePlanner {
            engine,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Loads the request's instance and plans it. Failures are turned into
    /// their report message set.
    pub fn plan(&self, request: &PlanningRequest) -> RoutingReport {
        self.try_plan(request).unwrap_or_else(|error| failure_report(&error))
    }

    pub fn plan_with_model(&self, request: &PlanningRequest, data: &DataModel) -> RoutingReport {
        let result = InFlightGuard::acquire(&self.in_flight)
            .and_then(|_guard| self.solve(request, data));

        result.unwrap_or_else(|error| failure_report(&error))
    }

    pub fn try_plan(&self, request: &PlanningRequest) -> Result<RoutingReport, PlannerError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        info!(
            "Planning {} with fleet {} and {}€/km tolls",
            request.city(),
            request.fleet().composition(),
            request.toll_per_km()
        );

        let data = timer_debug!("Building data model", DataModel::from_request(request))?;
        self.solve(request, &data)
    }

    fn solve(
        &self,
        request: &PlanningRequest,
        data: &DataModel,
    ) -> Result<RoutingReport, PlannerError> {
        let feasibility = check_feasibility(
            data.vehicle_payloads(),
            data.vehicle_volumes(),
            data.weight_demands(),
            data.volume_demands(),
        );
        if let Some(infeasibility) = feasibility.infeasibility() {
            return Err(PlannerError::ProvenInfeasible(infeasibility));
        }

        let model = RoutingModel::new(data);
        let search = request.search();

        info!(
            engine = self.engine.name(),
            "Solving with FSS={}, LSS={}, t={}s",
            search.first_solution_strategy,
            search.local_search_metaheuristic,
            search.time_limit.as_secs()
        );

        let start = Timestamp::now();
        let result = timer_debug!(
            "Solving",
            panic::catch_unwind(AssertUnwindSafe(|| self.engine.solve(&model, search)))
        );
        let actual_time = Timestamp::now().duration_since(start);

        let assignment = match result {
            Ok(Ok(Some(assignment))) => assignment,
            Ok(Ok(None)) => return Err(PlannerError::SolverNoSolution),
            Ok(Err(error)) => return Err(PlannerError::SolverException(error.to_string())),
            Err(payload) => return Err(PlannerError::SolverException(panic_message(payload))),
        };

        let violations = assignment.violations(&model);
        if let Some(violation) = violations.iter().find(|violation| {
            matches!(
                violation,
                Violation::WrongSlotCount { .. } | Violation::UnknownNode { .. }
            )
        }) {
            return Err(PlannerError::SolverException(format!(
                "Malformed assignment: {violation}"
            )));
        }
        for violation in &violations {
            warn!("Engine returned an invalid assignment: {violation}");
        }

        let solution = decode(&model, &assignment);

        Ok(RoutingReport::success(request, &solution, actual_time))
    }
}

fn failure_report(error: &PlannerError) -> RoutingReport {
    warn!("Planning failed: {error}");
    RoutingReport::failure(error)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("The routing engine panicked")
    }
}
