use std::{
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

use anyhow::anyhow;

use crate::{
    problem::{
        city::City,
        data_model::{DataModel, DataModelBuilder},
        fleet::Fleet,
        instance::CityInstance,
        node::Node,
        travel_matrices::TravelMatrices,
        units::{Grams, Liters, Meters, MilliEuros, Seconds},
    },
    solver::{
        cheapest_arc::CheapestArcEngine,
        engine::{Assignment, RoutingEngine},
        request::{PlanningRequest, PlanningRequestBuilder},
        routing_model::RoutingModel,
        search_params::SearchParameters,
    },
};

pub fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

pub fn create_instance(
    nodes: Vec<(Grams, Liters, Seconds)>,
    total: Vec<Meters>,
    inside: Vec<Meters>,
    outside: Vec<Meters>,
    times: Vec<Seconds>,
) -> CityInstance {
    let num_nodes = nodes.len();
    let nodes = nodes
        .into_iter()
        .map(|(weight, volume, service)| Node::new(weight, volume, service))
        .collect();
    let matrices = TravelMatrices::new(num_nodes, total, inside, outside, times).unwrap();

    CityInstance::new(nodes, matrices).unwrap()
}

/// Node `i` sits `i` km from the depot on a straight line entirely inside the
/// tolled zone, driven at one minute per kilometre.
pub fn create_line_instance(nodes: &[(Grams, Liters, Seconds)]) -> CityInstance {
    let n = nodes.len();
    let distances = (0..n * n)
        .map(|index| ((index / n).abs_diff(index % n) * 1000) as Meters)
        .collect::<Vec<_>>();
    let times = distances.iter().map(|distance| distance * 60 / 1000).collect();

    create_instance(
        nodes.to_vec(),
        distances.clone(),
        distances,
        vec![0; n * n],
        times,
    )
}

pub fn create_data_model_with_toll(
    instance: CityInstance,
    ids: &[u8],
    toll: MilliEuros,
) -> DataModel {
    let mut builder = DataModelBuilder::default();
    builder
        .set_instance(instance)
        .set_fleet(Fleet::from_ids(ids).unwrap())
        .set_city(City::Paris)
        .set_toll(toll);

    builder.build().unwrap()
}

pub fn create_data_model(instance: CityInstance, ids: &[u8]) -> DataModel {
    create_data_model_with_toll(instance, ids, 0)
}

pub fn create_fixture_model(name: &str, ids: &[u8]) -> DataModel {
    DataModel::from_request(&create_request(fixture_dir(name), ids)).unwrap()
}

pub fn create_request(dir: PathBuf, ids: &[u8]) -> PlanningRequest {
    let mut builder = PlanningRequestBuilder::default();
    builder
        .set_city(City::Paris)
        .set_fleet(Fleet::from_ids(ids).unwrap())
        .set_instances_dir(dir);

    builder.build().unwrap()
}

/// Delegates to the reference engine and counts how often it is called.
#[derive(Default)]
pub struct CountingEngine {
    calls: AtomicUsize,
}

impl CountingEngine {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingEngine for CountingEngine {
    fn name(&self) -> &str {
        "counting"
    }

    fn solve(
        &self,
        model: &RoutingModel<'_>,
        params: &SearchParameters,
    ) -> Result<Option<Assignment>, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CheapestArcEngine.solve(model, params)
    }
}

pub struct FixedEngine(pub Option<Assignment>);

impl RoutingEngine for FixedEngine {
    fn name(&self) -> &str {
        "fixed"
    }

    fn solve(
        &self,
        _model: &RoutingModel<'_>,
        _params: &SearchParameters,
    ) -> Result<Option<Assignment>, anyhow::Error> {
        Ok(self.0.clone())
    }
}

pub struct FailingEngine;

impl RoutingEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn solve(
        &self,
        _model: &RoutingModel<'_>,
        _params: &SearchParameters,
    ) -> Result<Option<Assignment>, anyhow::Error> {
        Err(anyhow!("engine failure"))
    }
}

pub struct PanickingEngine;

impl RoutingEngine for PanickingEngine {
    fn name(&self) -> &str {
        "panicking"
    }

    fn solve(
        &self,
        _model: &RoutingModel<'_>,
        _params: &SearchParameters,
    ) -> Result<Option<Assignment>, anyhow::Error> {
        panic!("engine panic")
    }
}
