use crate::{
    error::PlannerError,
    problem::{node::Node, travel_matrices::TravelMatrices},
};

/// Raw node and arc data of one city, as read from its instance files.
#[derive(Debug, Clone)]
pub struct CityInstance {
    nodes: Vec<Node>,
    matrices: TravelMatrices,
}

impl CityInstance {
    pub fn new(nodes: Vec<Node>, matrices: TravelMatrices) -> Result<Self, PlannerError> {
        if nodes.is_empty() {
            return Err(PlannerError::InvalidArgument(String::from(
                "An instance needs at least the depot node",
            )));
        }

        if nodes.len() != matrices.num_nodes() {
            return Err(PlannerError::InvalidArgument(format!(
                "The instance has {} nodes but its matrices cover {} nodes",
                nodes.len(),
                matrices.num_nodes()
            )));
        }

        Ok(CityInstance { nodes, matrices })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn matrices(&self) -> &TravelMatrices {
        &self.matrices
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn into_parts(self) -> (Vec<Node>, TravelMatrices) {
        (self.nodes, self.matrices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_node_matrices() -> TravelMatrices {
        TravelMatrices::new(1, vec![0], vec![0], vec![0], vec![0]).unwrap()
    }

    #[test]
    fn test_nodes_must_match_matrices() {
        let nodes = vec![Node::depot(), Node::new(1000, 1, 60)];

        assert!(matches!(
            CityInstance::new(nodes, single_node_matrices()),
            Err(PlannerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_instance_is_rejected() {
        assert!(CityInstance::new(vec![], single_node_matrices()).is_err());
    }

    #[test]
    fn test_depot_only_instance() {
        let instance = CityInstance::new(vec![Node::depot()], single_node_matrices()).unwrap();

        assert_eq!(instance.num_nodes(), 1);
        assert_eq!(instance.nodes()[0], Node::depot());
    }
}
