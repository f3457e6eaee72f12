use std::fmt;

use crate::problem::{
    carrier::CostRates,
    data_model::DataModel,
    fleet::SlotIdx,
    node::NodeIdx,
    travel_matrices::DistanceKind,
    units::{self, Grams, Liters, Meters, MilliEuros, Seconds},
};

/// Daily working time cap of every route.
pub const MAX_ROUTE_TIME: Seconds = 28_800;

/// Upper bound of the cost dimension, large enough never to bind in practice.
pub const MAX_ROUTE_COST: MilliEuros = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionKind {
    Range,
    Cost,
    Payload,
    Volume,
    Time,
}

impl DimensionKind {
    pub const ALL: [DimensionKind; 5] = [
        DimensionKind::Range,
        DimensionKind::Cost,
        DimensionKind::Payload,
        DimensionKind::Volume,
        DimensionKind::Time,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DimensionKind::Range => "Range",
            DimensionKind::Cost => "Cost",
            DimensionKind::Payload => "Payload",
            DimensionKind::Volume => "Volume",
            DimensionKind::Time => "Time",
        }
    }

    /// Payload and volume are unary transits evaluated on the node being left.
    pub fn is_unary(&self) -> bool {
        matches!(self, DimensionKind::Payload | DimensionKind::Volume)
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A quantity accumulated along each route, bounded per slot.
#[derive(Debug, Clone)]
pub struct Dimension {
    kind: DimensionKind,
    slack: i64,
    fix_start_cumul_to_zero: bool,
    capacities: Vec<i64>,
}

impl Dimension {
    fn new(kind: DimensionKind, capacities: Vec<i64>) -> Self {
        Dimension {
            kind,
            slack: 0,
            fix_start_cumul_to_zero: true,
            capacities,
        }
    }

    pub fn kind(&self) -> DimensionKind {
        self.kind
    }

    pub fn slack(&self) -> i64 {
        self.slack
    }

    pub fn fix_start_cumul_to_zero(&self) -> bool {
        self.fix_start_cumul_to_zero
    }

    #[inline]
    pub fn capacity(&self, slot: SlotIdx) -> i64 {
        self.capacities[slot.get()]
    }
}

/// Cost of driving an arc: each zone's kilometres times that zone's rate,
/// rounded half to even on the arc. Route costs are sums of rounded arcs.
#[inline]
pub fn arc_cost(inside: Meters, outside: Meters, rates: CostRates) -> MilliEuros {
    let cost =
        units::unscale(inside) * rates.inside as f64 + units::unscale(outside) * rates.outside as f64;

    cost.round_ties_even() as MilliEuros
}

/// The evaluators and dimensions registered with a routing engine. Every
/// evaluator is a pure function of the read-only data model.
pub struct RoutingModel<'a> {
    data: &'a DataModel,
    dimensions: Vec<Dimension>,
}

impl<'a> RoutingModel<'a> {
    pub fn new(data: &'a DataModel) -> Self {
        let slots = data.num_slots();

        let dimensions = DimensionKind::ALL
            .into_iter()
            .map(|kind| {
                let capacities = match kind {
                    DimensionKind::Range => data.vehicle_ranges().to_vec(),
                    DimensionKind::Cost => vec![MAX_ROUTE_COST; slots],
                    DimensionKind::Payload => data.vehicle_payloads().to_vec(),
                    DimensionKind::Volume => data.vehicle_volumes().to_vec(),
                    DimensionKind::Time => vec![MAX_ROUTE_TIME; slots],
                };
                Dimension::new(kind, capacities)
            })
            .collect();

        RoutingModel { data, dimensions }
    }

    pub fn data(&self) -> &'a DataModel {
        self.data
    }

    pub fn depot(&self) -> NodeIdx {
        self.data.depot()
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, kind: DimensionKind) -> &Dimension {
        &self.dimensions[kind as usize]
    }

    /// Total distance of an arc, the transit of the range dimension.
    #[inline]
    pub fn distance(&self, from: NodeIdx, to: NodeIdx) -> Meters {
        self.data.distance(DistanceKind::Total, from, to)
    }

    /// Arc cost for the carrier type assigned to `slot`.
    #[inline]
    pub fn arc_cost(&self, slot: SlotIdx, from: NodeIdx, to: NodeIdx) -> MilliEuros {
        arc_cost(
            self.data.distance(DistanceKind::Inside, from, to),
            self.data.distance(DistanceKind::Outside, from, to),
            self.data.cost_rates(slot),
        )
    }

    #[inline]
    pub fn weight_demand(&self, node: NodeIdx) -> Grams {
        self.data.weight_demands()[node.get()]
    }

    #[inline]
    pub fn volume_demand(&self, node: NodeIdx) -> Liters {
        self.data.volume_demands()[node.get()]
    }

    /// Driving time of the arc plus the service time at its destination.
    #[inline]
    pub fn transit_time(&self, from: NodeIdx, to: NodeIdx) -> Seconds {
        self.data.travel_time(from, to) + self.data.service_durations()[to.get()]
    }

    pub fn transit(&self, kind: DimensionKind, slot: SlotIdx, from: NodeIdx, to: NodeIdx) -> i64 {
        match kind {
            DimensionKind::Range => self.distance(from, to),
            DimensionKind::Cost => self.arc_cost(slot, from, to),
            DimensionKind::Payload => self.weight_demand(from),
            DimensionKind::Volume => self.volume_demand(from),
            DimensionKind::Time => self.transit_time(from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    use super::*;

    fn node(index: usize) -> NodeIdx {
        NodeIdx::new(index)
    }

    #[test]
    fn test_dimensions_contract() {
        let data = test_utils::create_data_model(test_utils::create_line_instance(&[(0, 0, 0)]), &[1, 7]);
        let model = RoutingModel::new(&data);

        assert_eq!(model.dimensions().len(), 5);
        for dimension in model.dimensions() {
            assert_eq!(dimension.slack(), 0);
            assert!(dimension.fix_start_cumul_to_zero());
        }

        let (heavy, bike) = (SlotIdx::new(0), SlotIdx::new(1));
        assert_eq!(model.dimension(DimensionKind::Range).capacity(heavy), 1028571);
        assert_eq!(model.dimension(DimensionKind::Range).capacity(bike), 100000);
        assert_eq!(model.dimension(DimensionKind::Payload).capacity(bike), 100000);
        assert_eq!(model.dimension(DimensionKind::Volume).capacity(heavy), 34800);
        assert_eq!(model.dimension(DimensionKind::Cost).capacity(bike), MAX_ROUTE_COST);
        assert_eq!(model.dimension(DimensionKind::Time).capacity(heavy), MAX_ROUTE_TIME);
        assert_eq!(model.dimension(DimensionKind::Time).kind(), DimensionKind::Time);
    }

    #[test]
    fn test_arc_cost_rounds_half_to_even() {
        let rates = CostRates {
            inside: 2393,
            outside: 2393,
        };

        assert_eq!(arc_cost(2500, 0, rates), 5982);
        assert_eq!(arc_cost(0, 6500, rates), 15554);
        assert_eq!(arc_cost(1000, 1000, rates), 4786);
    }

    #[test]
    fn test_arc_cost_blends_zone_rates() {
        let rates = CostRates {
            inside: 3000,
            outside: 1000,
        };

        // 1.5km * 3000 + 2.25km * 1000
        assert_eq!(arc_cost(1500, 2250, rates), 6750);
    }

    #[test]
    fn test_route_cost_sums_rounded_arcs() {
        // Every arc is 1m inside the zone, driven by a type 7 carrier at 3560/km
        let instance = test_utils::create_instance(
            vec![(0, 0, 0), (0, 0, 0), (0, 0, 0)],
            vec![0, 1, 1, 1, 0, 1, 1, 1, 0],
            vec![0, 1, 1, 1, 0, 1, 1, 1, 0],
            vec![0; 9],
            vec![0; 9],
        );
        let data = test_utils::create_data_model(instance, &[7]);
        let model = RoutingModel::new(&data);
        let slot = SlotIdx::new(0);

        let route = [node(0), node(1), node(2), node(0)];
        let per_arc: MilliEuros = route
            .windows(2)
            .map(|arc| model.arc_cost(slot, arc[0], arc[1]))
            .sum();
        let aggregate = arc_cost(3, 0, data.cost_rates(slot));

        assert_eq!(model.arc_cost(slot, node(0), node(1)), 4);
        assert_eq!(per_arc, 12);
        assert_eq!(aggregate, 11);
    }

    #[test]
    fn test_toll_raises_inside_cost_of_tolled_types() {
        let instance = test_utils::create_instance(
            vec![(0, 0, 0), (0, 0, 0)],
            vec![0, 1000, 1000, 0],
            vec![0, 1000, 1000, 0],
            vec![0; 4],
            vec![0; 4],
        );
        let data = test_utils::create_data_model_with_toll(instance, &[1, 4], 500);
        let model = RoutingModel::new(&data);

        assert_eq!(model.arc_cost(SlotIdx::new(0), node(0), node(1)), 2393 + 500);
        assert_eq!(model.arc_cost(SlotIdx::new(1), node(0), node(1)), 2472);
    }

    #[test]
    fn test_transits() {
        let instance = test_utils::create_line_instance(&[(0, 0, 0), (5000, 20, 120), (1000, 5, 60)]);
        let data = test_utils::create_data_model(instance, &[1]);
        let model = RoutingModel::new(&data);
        let slot = SlotIdx::new(0);

        assert_eq!(model.transit(DimensionKind::Range, slot, node(0), node(2)), 2000);
        assert_eq!(model.transit(DimensionKind::Payload, slot, node(1), node(2)), 5000);
        assert_eq!(model.transit(DimensionKind::Volume, slot, node(2), node(0)), 5);
        // 2km at 60s per km plus the service time at node 1
        assert_eq!(model.transit(DimensionKind::Time, slot, node(2), node(1)), 60 + 120);
        assert_eq!(
            model.transit(DimensionKind::Cost, slot, node(0), node(1)),
            model.arc_cost(slot, node(0), node(1))
        );
        assert!(DimensionKind::Payload.is_unary());
        assert!(!DimensionKind::Time.is_unary());
    }
}
