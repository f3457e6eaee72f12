use std::fmt;

use serde::Serialize;

use crate::problem::units::{self, Grams, Liters};

/// Why a fleet can never carry the demand, whatever the routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Infeasibility {
    InsufficientWeight { capacity: Grams, demand: Grams },
    InsufficientVolume { capacity: Liters, demand: Liters },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::InsufficientWeight { capacity, demand } => write!(
                f,
                "Insufficient weight capacity: the fleet carries {}kg but {}kg are demanded",
                units::format_unscaled(*capacity),
                units::format_unscaled(*demand)
            ),
            Infeasibility::InsufficientVolume { capacity, demand } => write!(
                f,
                "Insufficient volume capacity: the fleet carries {}m3 but {}m3 are demanded",
                units::format_unscaled(*capacity),
                units::format_unscaled(*demand)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feasibility {
    infeasibility: Option<Infeasibility>,
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        self.infeasibility.is_none()
    }

    pub fn infeasibility(&self) -> Option<Infeasibility> {
        self.infeasibility
    }

    pub fn explanation(&self) -> String {
        match &self.infeasibility {
            Some(infeasibility) => infeasibility.to_string(),
            None => String::from("The fleet capacity covers the total demand"),
        }
    }
}

/// Compares the summed fleet capacities against the summed demands. Passing
/// is necessary but not sufficient: range, time and packing are left to the
/// routing engine. Weight is checked before volume.
pub fn check_feasibility(
    payloads: &[Grams],
    volumes: &[Liters],
    weight_demands: &[Grams],
    volume_demands: &[Liters],
) -> Feasibility {
    let capacity: Grams = payloads.iter().sum();
    let demand: Grams = weight_demands.iter().sum();
    if capacity < demand {
        return Feasibility {
            infeasibility: Some(Infeasibility::InsufficientWeight { capacity, demand }),
        };
    }

    let capacity: Liters = volumes.iter().sum();
    let demand: Liters = volume_demands.iter().sum();
    if capacity < demand {
        return Feasibility {
            infeasibility: Some(Infeasibility::InsufficientVolume { capacity, demand }),
        };
    }

    Feasibility {
        infeasibility: None,
    }
}
