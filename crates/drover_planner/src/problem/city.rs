use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::PlannerError;

/// Cities with instance data and a per-kilometre cost row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    Paris,
    NewYork,
    Shanghai,
}

impl City {
    pub const ALL: [City; 3] = [City::Paris, City::NewYork, City::Shanghai];

    /// Stem of the `.nodes` / `.routes` instance files.
    pub fn name(&self) -> &'static str {
        match self {
            City::Paris => "Paris",
            City::NewYork => "NewYork",
            City::Shanghai => "Shanghai",
        }
    }

    /// Row of the carrier cost table.
    pub fn index(&self) -> usize {
        match self {
            City::Paris => 0,
            City::NewYork => 1,
            City::Shanghai => 2,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        City::ALL
            .into_iter()
            .find(|city| city.name().to_lowercase() == normalized)
            .ok_or_else(|| {
                PlannerError::InvalidArgument(format!(
                    "{s} is not a known city. Acceptable values are: Paris, NewYork, Shanghai"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city() {
        assert_eq!("Paris".parse::<City>().unwrap(), City::Paris);
        assert_eq!("New York".parse::<City>().unwrap(), City::NewYork);
        assert_eq!("newyork".parse::<City>().unwrap(), City::NewYork);
        assert_eq!("SHANGHAI".parse::<City>().unwrap(), City::Shanghai);
    }

    #[test]
    fn test_parse_unknown_city() {
        let error = "Berlin".parse::<City>().unwrap_err();
        assert!(matches!(error, PlannerError::InvalidArgument(_)));
    }

    #[test]
    fn test_indices_follow_cost_table_rows() {
        let indices = City::ALL.iter().map(City::index).collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
