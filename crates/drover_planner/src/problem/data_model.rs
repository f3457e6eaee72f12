use tracing::{debug, warn};

use crate::{
    error::PlannerError,
    parsers::instance_parser::InstanceParser,
    problem::{
        carrier::{CostRates, check_toll},
        city::City,
        fleet::{Fleet, SlotIdx},
        instance::CityInstance,
        node::{DEPOT, Node, NodeIdx},
        travel_matrices::{DistanceKind, TravelMatrices},
        units::{Grams, Liters, Meters, MilliEuros, Seconds},
    },
    solver::request::PlanningRequest,
};

/// Numeric input of one routing run: matrices, per-node demands and the
/// per-slot capacities and rates derived from the fleet.
#[derive(Debug, Clone)]
pub struct DataModel {
    city: City,
    toll: MilliEuros,
    fleet: Fleet,
    matrices: TravelMatrices,

    weight_demands: Vec<Grams>,
    volume_demands: Vec<Liters>,
    service_durations: Vec<Seconds>,

    vehicle_payloads: Vec<Grams>,
    vehicle_volumes: Vec<Liters>,
    vehicle_ranges: Vec<Meters>,
    cost_rates: Vec<CostRates>,
}

impl DataModel {
    /// Loads the request's city from its instance directory and builds the model.
    pub fn from_request(request: &PlanningRequest) -> Result<Self, PlannerError> {
        let instance = InstanceParser::from_directory(request.instances_dir(), request.city())?;

        let mut builder = DataModelBuilder::default();
        builder
            .set_instance(instance)
            .set_fleet(request.fleet().clone())
            .set_city(request.city())
            .set_toll(request.toll());

        builder.build()
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn toll(&self) -> MilliEuros {
        self.toll
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn depot(&self) -> NodeIdx {
        DEPOT
    }

    pub fn num_nodes(&self) -> usize {
        self.weight_demands.len()
    }

    pub fn num_slots(&self) -> usize {
        self.fleet.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> + Clone {
        NodeIdx::range(self.num_nodes())
    }

    /// Every node except the depot.
    pub fn customers(&self) -> impl Iterator<Item = NodeIdx> + Clone {
        self.nodes().skip(1)
    }

    pub fn slots(&self) -> impl Iterator<Item = SlotIdx> + Clone {
        SlotIdx::range(self.num_slots())
    }

    pub fn matrices(&self) -> &TravelMatrices {
        &self.matrices
    }

    #[inline]
    pub fn distance(&self, kind: DistanceKind, from: NodeIdx, to: NodeIdx) -> Meters {
        self.matrices.distance(kind, from, to)
    }

    #[inline]
    pub fn travel_time(&self, from: NodeIdx, to: NodeIdx) -> Seconds {
        self.matrices.time(from, to)
    }

    pub fn weight_demands(&self) -> &[Grams] {
        &self.weight_demands
    }

    pub fn volume_demands(&self) -> &[Liters] {
        &self.volume_demands
    }

    pub fn service_durations(&self) -> &[Seconds] {
        &self.service_durations
    }

    pub fn vehicle_payloads(&self) -> &[Grams] {
        &self.vehicle_payloads
    }

    pub fn vehicle_volumes(&self) -> &[Liters] {
        &self.vehicle_volumes
    }

    pub fn vehicle_ranges(&self) -> &[Meters] {
        &self.vehicle_ranges
    }

    #[inline]
    pub fn cost_rates(&self, slot: SlotIdx) -> CostRates {
        self.cost_rates[slot.get()]
    }
}

#[derive(Default)]
pub struct DataModelBuilder {
    instance: Option<CityInstance>,
    fleet: Option<Fleet>,
    city: Option<City>,
    toll: MilliEuros,
}

impl DataModelBuilder {
    pub fn set_instance(&mut self, instance: CityInstance) -> &mut DataModelBuilder {
        self.instance = Some(instance);
        self
    }

    pub fn set_fleet(&mut self, fleet: Fleet) -> &mut DataModelBuilder {
        self.fleet = Some(fleet);
        self
    }

    pub fn set_city(&mut self, city: City) -> &mut DataModelBuilder {
        self.city = Some(city);
        self
    }

    /// Surcharge added to the inside-zone rate of the tolled carrier types,
    /// in tenths of a cent per kilometre.
    pub fn set_toll(&mut self, toll: MilliEuros) -> &mut DataModelBuilder {
        self.toll = toll;
        self
    }

    pub fn build(self) -> Result<DataModel, PlannerError> {
        let missing = |what: &str| PlannerError::InvalidArgument(format!("Missing {what}"));

        let instance = self.instance.ok_or_else(|| missing("instance"))?;
        let fleet = self.fleet.ok_or_else(|| missing("fleet"))?;
        let city = self.city.ok_or_else(|| missing("city"))?;

        check_toll(self.toll)?;

        let (nodes, matrices) = instance.into_parts();

        let depot = &nodes[DEPOT];
        if depot.weight() != 0 || depot.volume() != 0 || depot.service_duration() != 0 {
            warn!("The depot of {city} has a demand or a service duration, it will be counted");
        }

        let weight_demands = nodes.iter().map(Node::weight).collect();
        let volume_demands = nodes.iter().map(Node::volume).collect();
        let service_durations = nodes.iter().map(Node::service_duration).collect();

        let vehicle_payloads = fleet.slots().iter().map(|c| c.payload()).collect();
        let vehicle_volumes = fleet.slots().iter().map(|c| c.volume()).collect();
        let vehicle_ranges = fleet.slots().iter().map(|c| c.range()).collect();
        let cost_rates = fleet
            .slots()
            .iter()
            .map(|&carrier| CostRates::new(carrier, city, self.toll))
            .collect();

        debug!(
            nodes = nodes.len(),
            slots = fleet.len(),
            symmetric = matrices.is_symmetric(),
            "Built data model for {city}"
        );

        Ok(DataModel {
            city,
            toll: self.toll,
            fleet,
            matrices,
            weight_demands,
            volume_demands,
            service_durations,
            vehicle_payloads,
            vehicle_volumes,
            vehicle_ranges,
            cost_rates,
        })
    }
}
