use tracing::info;

use crate::{
    problem::{
        carrier::{CarrierType, CostRates},
        fleet::SlotIdx,
        node::NodeIdx,
        travel_matrices::DistanceKind,
        units::{self, Grams, Liters, Meters, MilliEuros, Seconds},
    },
    solver::{engine::Assignment, routing_model::RoutingModel},
    utils::{
        occurrences::{Occurrences, count_occurrences},
        time::int_to_time,
    },
};

/// A node of a decoded route with the load carried once it has been served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteStop {
    pub node: NodeIdx,
    pub weight: Grams,
    pub volume: Liters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    /// 1-based position among the used routes.
    pub vehicle_number: usize,
    pub slot: SlotIdx,
    pub carrier: CarrierType,
    pub rates: CostRates,
    pub stops: Vec<RouteStop>,
    pub cost: MilliEuros,
    pub distance: Meters,
    pub distance_inside: Meters,
    pub distance_outside: Meters,
    pub weight: Grams,
    pub volume: Liters,
    pub time: Seconds,
}

impl RouteSummary {
    pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.stops.iter().map(|stop| stop.node)
    }

    /// Node sequence as `0-3-1-0`.
    pub fn node_sequence(&self) -> String {
        self.nodes()
            .map(|node| node.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn describe(&self) -> String {
        let stops = self
            .stops
            .iter()
            .map(|stop| {
                format!(
                    "[{}] ({}kg; {}m3)",
                    stop.node,
                    units::format_unscaled(stop.weight),
                    units::format_unscaled(stop.volume)
                )
            })
            .collect::<Vec<_>>()
            .join(" -> ");

        format!(
            "Route for vehicle {} (Type {}):\n\
             {stops}\n\
             Distance: {}/{}km ({}km inside; {}km outside)\n\
             Cost: {}€ ({}€/km inside and {}€/km outside)\n\
             Load: {}/{}kg and {}/{}m3\n\
             Time: {}\n",
            self.vehicle_number,
            self.carrier,
            units::format_unscaled(self.distance),
            units::format_unscaled(self.carrier.range()),
            units::format_unscaled(self.distance_inside),
            units::format_unscaled(self.distance_outside),
            units::format_unscaled(self.cost),
            units::format_unscaled(self.rates.inside),
            units::format_unscaled(self.rates.outside),
            units::format_unscaled(self.weight),
            units::format_unscaled(self.carrier.payload()),
            units::format_unscaled(self.volume),
            units::format_unscaled(self.carrier.volume()),
            int_to_time(self.time),
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub cost: MilliEuros,
    pub distance: Meters,
    pub time: Seconds,
    pub weight: Grams,
    pub volume: Liters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSolution {
    pub routes: Vec<RouteSummary>,
    pub totals: Totals,
    /// Carrier type ids of the used routes.
    pub chosen_fleet: Occurrences<u8>,
}

impl DecodedSolution {
    pub fn describe_routes(&self) -> String {
        self.routes
            .iter()
            .map(|route| format!("{}\n", route.describe()))
            .collect()
    }
}

/// Walks every slot of the assignment from the depot back to the depot and
/// aggregates its cost, distances, loads and time. Routes without cost are
/// unused slots and are left out.
pub fn decode(model: &RoutingModel<'_>, assignment: &Assignment) -> DecodedSolution {
    let data = model.data();
    let depot = model.depot();

    let mut routes: Vec<RouteSummary> = Vec::new();
    let mut totals = Totals::default();

    for slot in data.slots() {
        let path = assignment.path(slot, depot).collect::<Vec<_>>();

        let mut stops = Vec::with_capacity(path.len());
        let (mut weight, mut volume) = (0, 0);
        let (mut cost, mut time) = (0, 0);
        let (mut distance, mut inside, mut outside) = (0, 0, 0);

        for arc in path.windows(2) {
            let (from, to) = (arc[0], arc[1]);

            weight += model.weight_demand(from);
            volume += model.volume_demand(from);
            stops.push(RouteStop {
                node: from,
                weight,
                volume,
            });

            cost += model.arc_cost(slot, from, to);
            distance += data.distance(DistanceKind::Total, from, to);
            inside += data.distance(DistanceKind::Inside, from, to);
            outside += data.distance(DistanceKind::Outside, from, to);
            time += model.transit_time(from, to);
        }
        stops.push(RouteStop {
            node: depot,
            weight,
            volume,
        });

        if cost <= 0 {
            continue;
        }

        totals.cost += cost;
        totals.distance += distance;
        totals.time += time;
        totals.weight += weight;
        totals.volume += volume;

        let carrier = data.fleet().carrier(slot);
        routes.push(RouteSummary {
            vehicle_number: routes.len() + 1,
            slot,
            carrier,
            rates: data.cost_rates(slot),
            stops,
            cost,
            distance,
            distance_inside: inside,
            distance_outside: outside,
            weight,
            volume,
            time,
        });
    }

    let chosen = routes.iter().map(|route| route.carrier.id()).collect::<Vec<_>>();

    info!(
        routes = routes.len(),
        cost = units::unscale(totals.cost),
        distance = units::unscale(totals.distance),
        "Decoded solution"
    );

    DecodedSolution {
        routes,
        totals,
        chosen_fleet: count_occurrences(&chosen),
    }
}
