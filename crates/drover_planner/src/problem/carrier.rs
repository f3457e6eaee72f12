use std::fmt;

use serde::Serialize;

use crate::{
    error::PlannerError,
    problem::{
        city::City,
        units::{Grams, Liters, Meters, MilliEuros},
    },
};

pub const CARRIER_TYPES: usize = 7;

/// Only the first three carrier types are allowed inside the tolled zone and
/// pay the surcharge on their inside rate.
pub const TOLLED_CARRIER_TYPES: usize = 3;

/// Largest accepted toll, one million EUR per kilometre. Keeps every arc cost
/// and route total well inside `i64`.
pub const MAX_TOLL: MilliEuros = 1_000_000_000;

const PAYLOADS: [Grams; CARRIER_TYPES] = [2800000, 883000, 670000, 2800000, 905000, 720000, 100000];
const VOLUMES: [Liters; CARRIER_TYPES] = [34800, 5800, 3200, 21560, 7670, 4270, 200];
const RANGES: [Meters; CARRIER_TYPES] = [1028571, 875000, 847458, 79710, 205023, 118977, 100000];

/// Per-kilometre rate of each carrier type, one row per city in `City::index` order.
const COSTS_PER_KM: [[MilliEuros; CARRIER_TYPES]; 3] = [
    [2393, 2152, 2079, 2472, 2158, 2102, 3560],
    [3181, 3017, 2961, 3377, 3082, 3027, 3700],
    [1070, 892, 833, 1233, 944, 889, 1810],
];

/// A carrier type, numbered 1 to 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CarrierType(u8);

impl CarrierType {
    pub fn new(id: u8) -> Result<Self, PlannerError> {
        if id == 0 || usize::from(id) > CARRIER_TYPES {
            return Err(PlannerError::InvalidArgument(format!(
                "Carrier type {id} does not exist, expected a value between 1 and {CARRIER_TYPES}"
            )));
        }

        Ok(CarrierType(id))
    }

    pub fn all() -> impl Iterator<Item = CarrierType> {
        (1..=CARRIER_TYPES as u8).map(CarrierType)
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    /// Position in the carrier tables.
    #[inline]
    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn payload(&self) -> Grams {
        PAYLOADS[self.index()]
    }

    pub fn volume(&self) -> Liters {
        VOLUMES[self.index()]
    }

    pub fn range(&self) -> Meters {
        RANGES[self.index()]
    }

    pub fn is_tolled(&self) -> bool {
        self.index() < TOLLED_CARRIER_TYPES
    }
}

impl fmt::Display for CarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inside-zone and outside-zone rates of a carrier type, in tenths of a cent per kilometre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostRates {
    pub inside: MilliEuros,
    pub outside: MilliEuros,
}

impl CostRates {
    pub fn new(carrier: CarrierType, city: City, toll: MilliEuros) -> Self {
        let outside = COSTS_PER_KM[city.index()][carrier.index()];
        let inside = if carrier.is_tolled() {
            outside.saturating_add(toll)
        } else {
            outside
        };

        CostRates { inside, outside }
    }
}

/// Rejects tolls that are negative or above [`MAX_TOLL`].
pub fn check_toll(toll: MilliEuros) -> Result<(), PlannerError> {
    if toll < 0 {
        return Err(PlannerError::InvalidArgument(format!(
            "The toll must not be negative, got {toll}"
        )));
    }
    if toll > MAX_TOLL {
        return Err(PlannerError::InvalidArgument(format!(
            "The toll must not exceed {MAX_TOLL}, got {toll}"
        )));
    }

    Ok(())
}
