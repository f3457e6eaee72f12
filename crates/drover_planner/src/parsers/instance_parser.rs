use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::PlannerError,
    parsers::table::Table,
    problem::{
        city::City,
        instance::CityInstance,
        node::Node,
        travel_matrices::{DistanceKind, TravelMatrices},
        units::{self, Meters, Seconds},
    },
    utils::time::time_to_int,
};

const WEIGHT_COLUMN: &str = "Demand[kg]";
const VOLUME_COLUMN: &str = "Demand[m^3*10^-3]";
const SERVICE_COLUMN: &str = "Duration";
const LAT_COLUMN: &str = "Lat";
const LON_COLUMN: &str = "Lon";
const ROUTE_DURATION_COLUMN: &str = "Duration[s]";

/// Reads the `<city>.nodes` and `<city>.routes` instance files.
pub struct InstanceParser;

impl InstanceParser {
    pub fn instance_paths(dir: &Path, city: City) -> (PathBuf, PathBuf) {
        (
            dir.join(format!("{}.nodes", city.name())),
            dir.join(format!("{}.routes", city.name())),
        )
    }

    pub fn from_directory(dir: &Path, city: City) -> Result<CityInstance, PlannerError> {
        let (nodes_path, routes_path) = Self::instance_paths(dir, city);
        Self::from_files(&nodes_path, &routes_path)
    }

    pub fn from_files(nodes_path: &Path, routes_path: &Path) -> Result<CityInstance, PlannerError> {
        let nodes = Self::parse_nodes(&read_file(nodes_path)?, nodes_path)?;
        let matrices = Self::parse_routes(&read_file(routes_path)?, nodes.len(), routes_path)?;

        debug!(
            "Loaded {} nodes from {}",
            nodes.len(),
            nodes_path.display()
        );

        CityInstance::new(nodes, matrices)
    }

    pub fn parse_nodes(content: &str, source: &Path) -> Result<Vec<Node>, PlannerError> {
        let table = Table::parse(content, source)?;

        let weight = table.column(WEIGHT_COLUMN, source)?;
        let volume = table.column(VOLUME_COLUMN, source)?;
        let service = table.column(SERVICE_COLUMN, source)?;
        let coordinates = table
            .optional_column(LAT_COLUMN)
            .zip(table.optional_column(LON_COLUMN));

        let mut nodes = Vec::with_capacity(table.rows().len());
        for row in table.rows() {
            let service_duration = parse_time(row.text(service), source, row.line())?;

            let mut node = Node::new(
                units::scale(row.number(weight, source)?),
                row.number(volume, source)?.round() as i64,
                service_duration,
            );

            if let Some((lat, lon)) = coordinates {
                node = node.with_coordinates(row.number(lat, source)?, row.number(lon, source)?);
            }

            nodes.push(node);
        }

        if nodes.is_empty() {
            return Err(PlannerError::parse(source, 1, "The instance has no nodes"));
        }

        Ok(nodes)
    }

    /// Parses one row per ordered node pair, row-major, into N x N matrices.
    pub fn parse_routes(
        content: &str,
        num_nodes: usize,
        source: &Path,
    ) -> Result<TravelMatrices, PlannerError> {
        let table = Table::parse(content, source)?;

        let expected = num_nodes * num_nodes;
        if table.rows().len() != expected {
            return Err(PlannerError::parse(
                source,
                1,
                format!(
                    "Expected {expected} routes for {num_nodes} nodes, found {}",
                    table.rows().len()
                ),
            ));
        }

        let mut distances: [Vec<Meters>; 3] = Default::default();
        for (kind, distances) in DistanceKind::ALL.iter().zip(distances.iter_mut()) {
            let column = table.column(kind.column(), source)?;
            *distances = table
                .rows()
                .iter()
                .map(|row| row.number(column, source).map(units::km_to_meters))
                .collect::<Result<_, _>>()?;
        }

        let duration = table.column(ROUTE_DURATION_COLUMN, source)?;
        let times = table
            .rows()
            .iter()
            .map(|row| parse_time(row.text(duration), source, row.line()))
            .collect::<Result<Vec<Seconds>, _>>()?;

        let [total, inside, outside] = distances;
        TravelMatrices::new(num_nodes, total, inside, outside, times)
    }
}

fn read_file(path: &Path) -> Result<String, PlannerError> {
    std::fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => PlannerError::DataNotFound {
            path: path.to_path_buf(),
        },
        _ => PlannerError::Io(error),
    })
}

fn parse_time(value: &str, source: &Path, line: usize) -> Result<Seconds, PlannerError> {
    time_to_int(value).map_err(|error| PlannerError::parse(source, line, error.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::{problem::node::NodeIdx, test_utils};

    use super::*;

    const NODES: &str = "\
ID Demand[kg] Demand[m^3*10^-3] Duration Lat Lon
0 0 0 00:00:00 48.85 2.35
1 12.5 40 00:10:00 48.86 2.34
2 0.75 2.6 00:01:30 48.87 2.33
";

    const ROUTES: &str = "\
From To DistanceTotal[km] DistanceInside[km] DistanceOutside[km] Duration[s]
0 0 0 0 0 00:00:00
0 1 2.5 1.5 1.0 00:05:00
1 0 2.5 1.5 1.0 00:05:30
1 1 0 0 0 00:00:00
";

    #[test]
    fn test_parse_nodes() {
        let nodes = InstanceParser::parse_nodes(NODES, Path::new("Test.nodes")).unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], Node::depot().with_coordinates(48.85, 2.35));
        assert_eq!(nodes[1].weight(), 12500);
        assert_eq!(nodes[1].volume(), 40);
        assert_eq!(nodes[1].service_duration(), 600);
        assert_eq!(nodes[2].weight(), 750);
        assert_eq!(nodes[2].volume(), 3);
        assert_eq!(nodes[2].service_duration(), 90);
        assert_eq!(nodes[2].coordinates(), Some((48.87, 2.33)));
    }

    #[test]
    fn test_parse_nodes_without_coordinates() {
        let content = "Demand[kg] Demand[m^3*10^-3] Duration\n0 0 00:00:00\n";
        let nodes = InstanceParser::parse_nodes(content, Path::new("Test.nodes")).unwrap();

        assert_eq!(nodes, vec![Node::depot()]);
    }

    #[test]
    fn test_parse_nodes_missing_column() {
        let content = "Demand[kg] Duration\n0 00:00:00\n";
        let error = InstanceParser::parse_nodes(content, Path::new("Test.nodes")).unwrap_err();

        assert!(matches!(error, PlannerError::Parse { .. }));
    }

    #[test]
    fn test_parse_nodes_invalid_duration() {
        let content = "Demand[kg] Demand[m^3*10^-3] Duration\n0 0 00:00:00\n1 1 10min\n";
        let error = InstanceParser::parse_nodes(content, Path::new("Test.nodes")).unwrap_err();

        assert!(matches!(error, PlannerError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_parse_routes() {
        let matrices = InstanceParser::parse_routes(ROUTES, 2, Path::new("Test.routes")).unwrap();
        let (depot, node) = (NodeIdx::new(0), NodeIdx::new(1));

        assert_eq!(matrices.distance(DistanceKind::Total, depot, node), 2500);
        assert_eq!(matrices.distance(DistanceKind::Inside, depot, node), 1500);
        assert_eq!(matrices.distance(DistanceKind::Outside, node, depot), 1000);
        assert_eq!(matrices.time(depot, node), 300);
        assert_eq!(matrices.time(node, depot), 330);
    }

    #[test]
    fn test_parse_routes_wrong_row_count() {
        let error = InstanceParser::parse_routes(ROUTES, 3, Path::new("Test.routes")).unwrap_err();

        assert!(matches!(error, PlannerError::Parse { .. }));
    }

    #[test]
    fn test_from_directory() {
        let instance =
            InstanceParser::from_directory(&test_utils::fixture_dir("paris"), City::Paris).unwrap();

        assert_eq!(instance.num_nodes(), 4);
        assert!(instance.matrices().is_symmetric());
    }

    #[test]
    fn test_from_directory_missing_files() {
        let error = InstanceParser::from_directory(&test_utils::fixture_dir("paris"), City::Shanghai)
            .unwrap_err();

        match error {
            PlannerError::DataNotFound { path } => assert!(path.ends_with("Shanghai.nodes")),
            other => panic!("Unexpected error {other:?}"),
        }
    }
}
