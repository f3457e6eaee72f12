use std::{fmt, str::FromStr};

use crate::{
    error::PlannerError,
    problem::{
        node::NodeIdx,
        units::{Meters, Seconds},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceKind {
    Total,
    Inside,
    Outside,
}

impl DistanceKind {
    pub const ALL: [DistanceKind; 3] = [
        DistanceKind::Total,
        DistanceKind::Inside,
        DistanceKind::Outside,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DistanceKind::Total => "Total",
            DistanceKind::Inside => "Inside",
            DistanceKind::Outside => "Outside",
        }
    }

    /// Column of the `.routes` file holding this distance, in kilometres.
    pub fn column(&self) -> &'static str {
        match self {
            DistanceKind::Total => "DistanceTotal[km]",
            DistanceKind::Inside => "DistanceInside[km]",
            DistanceKind::Outside => "DistanceOutside[km]",
        }
    }
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                PlannerError::InvalidArgument(format!(
                    "{s} is not a valid distance type. Acceptable values are: Total, Inside, Outside"
                ))
            })
    }
}

fn is_flat_matrix_symmetric(matrix: &[Meters], num_nodes: usize) -> bool {
    (0..num_nodes).all(|i| {
        (i + 1..num_nodes).all(|j| matrix[i * num_nodes + j] == matrix[j * num_nodes + i])
    })
}

/// Distance and travel time matrices of an instance.
/// Each matrix is stored flat, row-major: the arc `from -> to` lives at
/// `from * num_nodes + to`.
#[derive(Debug, Clone)]
pub struct TravelMatrices {
    total: Vec<Meters>,
    inside: Vec<Meters>,
    outside: Vec<Meters>,
    times: Vec<Seconds>,
    num_nodes: usize,
    is_symmetric: bool,
}

impl TravelMatrices {
    pub fn new(
        num_nodes: usize,
        total: Vec<Meters>,
        inside: Vec<Meters>,
        outside: Vec<Meters>,
        times: Vec<Seconds>,
    ) -> Result<Self, PlannerError> {
        let expected = num_nodes * num_nodes;
        for (name, len) in [
            ("total distance", total.len()),
            ("inside distance", inside.len()),
            ("outside distance", outside.len()),
            ("time", times.len()),
        ] {
            if len != expected {
                return Err(PlannerError::InvalidArgument(format!(
                    "The {name} matrix has {len} entries, expected {expected} for {num_nodes} nodes"
                )));
            }
        }

        let is_symmetric = is_flat_matrix_symmetric(&total, num_nodes);

        Ok(TravelMatrices {
            total,
            inside,
            outside,
            times,
            num_nodes,
            is_symmetric,
        })
    }

    #[inline(always)]
    fn index(&self, from: NodeIdx, to: NodeIdx) -> usize {
        from.get() * self.num_nodes + to.get()
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    #[inline]
    pub fn distance(&self, kind: DistanceKind, from: NodeIdx, to: NodeIdx) -> Meters {
        self.matrix(kind)[self.index(from, to)]
    }

    #[inline]
    pub fn time(&self, from: NodeIdx, to: NodeIdx) -> Seconds {
        self.times[self.index(from, to)]
    }

    pub fn matrix(&self, kind: DistanceKind) -> &[Meters] {
        match kind {
            DistanceKind::Total => &self.total,
            DistanceKind::Inside => &self.inside,
            DistanceKind::Outside => &self.outside,
        }
    }

    /// Looks a distance matrix up by its name (`Total`, `Inside`, `Outside`)
    /// and returns it as rows.
    pub fn distance_matrix(&self, kind: &str) -> Result<Vec<Vec<Meters>>, PlannerError> {
        let kind = kind.parse::<DistanceKind>()?;

        Ok(self
            .matrix(kind)
            .chunks(self.num_nodes.max(1))
            .map(<[Meters]>::to_vec)
            .collect())
    }

    pub fn time_matrix(&self) -> Vec<Vec<Seconds>> {
        self.times
            .chunks(self.num_nodes.max(1))
            .map(<[Seconds]>::to_vec)
            .collect()
    }
}
