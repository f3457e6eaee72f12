use std::fmt;

use crate::{
    problem::{fleet::SlotIdx, node::NodeIdx},
    solver::{
        routing_model::{DimensionKind, RoutingModel},
        search_params::SearchParameters,
    },
};

/// The external vehicle-routing engine. It receives the registered evaluators
/// and dimensions through the model, searches within the time limit, and
/// returns `None` when it finds no solution. Any error is an engine failure.
pub trait RoutingEngine {
    fn name(&self) -> &str;

    fn solve(
        &self,
        model: &RoutingModel<'_>,
        params: &SearchParameters,
    ) -> Result<Option<Assignment>, anyhow::Error>;
}

/// Engine result: for every slot, the customers it visits in order. Routes
/// start and end at the depot, which is not listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    routes: Vec<Vec<NodeIdx>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    WrongSlotCount { expected: usize, actual: usize },
    UnknownNode { slot: SlotIdx, node: NodeIdx },
    DepotInRoute { slot: SlotIdx },
    Unvisited { node: NodeIdx },
    VisitedMoreThanOnce { node: NodeIdx },
    CapacityExceeded {
        slot: SlotIdx,
        dimension: DimensionKind,
        cumul: i64,
        capacity: i64,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::WrongSlotCount { expected, actual } => {
                write!(f, "expected {expected} routes, got {actual}")
            }
            Violation::UnknownNode { slot, node } => {
                write!(f, "slot {slot} visits unknown node {node}")
            }
            Violation::DepotInRoute { slot } => write!(f, "slot {slot} visits the depot mid-route"),
            Violation::Unvisited { node } => write!(f, "node {node} is not visited"),
            Violation::VisitedMoreThanOnce { node } => {
                write!(f, "node {node} is visited more than once")
            }
            Violation::CapacityExceeded {
                slot,
                dimension,
                cumul,
                capacity,
            } => write!(
                f,
                "slot {slot} reaches {cumul} on {dimension}, above its capacity {capacity}"
            ),
        }
    }
}

impl Assignment {
    pub fn new(routes: Vec<Vec<NodeIdx>>) -> Self {
        Assignment { routes }
    }

    /// Every slot stays at the depot.
    pub fn empty(num_slots: usize) -> Self {
        Assignment {
            routes: vec![Vec::new(); num_slots],
        }
    }

    pub fn num_slots(&self) -> usize {
        self.routes.len()
    }

    pub fn route(&self, slot: SlotIdx) -> &[NodeIdx] {
        &self.routes[slot.get()]
    }

    /// The full path of a slot, depot to depot.
    pub fn path(&self, slot: SlotIdx, depot: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        std::iter::once(depot)
            .chain(self.route(slot).iter().copied())
            .chain(std::iter::once(depot))
    }

    /// Checks the assignment against the model: every customer visited exactly
    /// once and every dimension within its bound at every stop.
    pub fn violations(&self, model: &RoutingModel<'_>) -> Vec<Violation> {
        let data = model.data();
        let depot = model.depot();
        let mut violations = Vec::new();

        if self.num_slots() != data.num_slots() {
            violations.push(Violation::WrongSlotCount {
                expected: data.num_slots(),
                actual: self.num_slots(),
            });
            return violations;
        }

        let mut visits = vec![0usize; data.num_nodes()];
        for slot in data.slots() {
            let mut valid = true;
            for &node in self.route(slot) {
                if node.get() >= data.num_nodes() {
                    violations.push(Violation::UnknownNode { slot, node });
                    valid = false;
                } else if node == depot {
                    violations.push(Violation::DepotInRoute { slot });
                } else {
                    visits[node.get()] += 1;
                }
            }

            if valid {
                violations.extend(self.capacity_violations(model, slot));
            }
        }

        for node in data.customers() {
            match visits[node.get()] {
                0 => violations.push(Violation::Unvisited { node }),
                1 => {}
                _ => violations.push(Violation::VisitedMoreThanOnce { node }),
            }
        }

        violations
    }

    fn capacity_violations(&self, model: &RoutingModel<'_>, slot: SlotIdx) -> Vec<Violation> {
        let path = self.path(slot, model.depot()).collect::<Vec<_>>();

        model
            .dimensions()
            .iter()
            .filter_map(|dimension| {
                let capacity = dimension.capacity(slot);
                let mut cumul = 0;
                for arc in path.windows(2) {
                    cumul += model.transit(dimension.kind(), slot, arc[0], arc[1]);
                    if cumul > capacity {
                        return Some(Violation::CapacityExceeded {
                            slot,
                            dimension: dimension.kind(),
                            cumul,
                            capacity,
                        });
                    }
                }
                None
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    use super::*;

    fn nodes(indices: &[usize]) -> Vec<NodeIdx> {
        indices.iter().map(|&i| NodeIdx::new(i)).collect()
    }

    #[test]
    fn test_path() {
        let assignment = Assignment::new(vec![nodes(&[2, 1]), vec![]]);
        let depot = NodeIdx::new(0);

        assert_eq!(
            assignment.path(SlotIdx::new(0), depot).collect::<Vec<_>>(),
            nodes(&[0, 2, 1, 0])
        );
        assert_eq!(
            assignment.path(SlotIdx::new(1), depot).collect::<Vec<_>>(),
            nodes(&[0, 0])
        );
    }

    #[test]
    fn test_valid_assignment() {
        let instance = test_utils::create_line_instance(&[(0, 0, 0), (1000, 1, 60), (2000, 2, 60)]);
        let data = test_utils::create_data_model(instance, &[1, 2]);
        let model = RoutingModel::new(&data);

        let assignment = Assignment::new(vec![nodes(&[1]), nodes(&[2])]);
        assert!(assignment.violations(&model).is_empty());
    }

    #[test]
    fn test_visit_violations() {
        let instance = test_utils::create_line_instance(&[(0, 0, 0), (1000, 1, 60), (2000, 2, 60)]);
        let data = test_utils::create_data_model(instance, &[1, 2]);
        let model = RoutingModel::new(&data);

        let assignment = Assignment::new(vec![nodes(&[1, 0]), nodes(&[1, 7])]);
        let violations = assignment.violations(&model);

        assert!(violations.contains(&Violation::DepotInRoute {
            slot: SlotIdx::new(0)
        }));
        assert!(violations.contains(&Violation::UnknownNode {
            slot: SlotIdx::new(1),
            node: NodeIdx::new(7)
        }));
        assert!(violations.contains(&Violation::VisitedMoreThanOnce {
            node: NodeIdx::new(1)
        }));
        assert!(violations.contains(&Violation::Unvisited {
            node: NodeIdx::new(2)
        }));
    }

    #[test]
    fn test_capacity_violation() {
        // A type 7 carrier takes 100kg, both customers together weigh 120kg
        let instance = test_utils::create_line_instance(&[(0, 0, 0), (60000, 1, 0), (60000, 1, 0)]);
        let data = test_utils::create_data_model(instance, &[7]);
        let model = RoutingModel::new(&data);

        let violations = Assignment::new(vec![nodes(&[1, 2])]).violations(&model);

        assert_eq!(
            violations,
            vec![Violation::CapacityExceeded {
                slot: SlotIdx::new(0),
                dimension: DimensionKind::Payload,
                cumul: 120000,
                capacity: 100000,
            }]
        );
    }

    #[test]
    fn test_wrong_slot_count() {
        let data = test_utils::create_data_model(test_utils::create_line_instance(&[(0, 0, 0)]), &[1]);
        let model = RoutingModel::new(&data);

        assert_eq!(
            Assignment::empty(2).violations(&model),
            vec![Violation::WrongSlotCount {
                expected: 1,
                actual: 2
            }]
        );
    }
}
