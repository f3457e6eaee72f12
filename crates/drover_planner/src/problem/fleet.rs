use std::str::FromStr;

use crate::{
    define_index_newtype,
    error::PlannerError,
    problem::carrier::CarrierType,
    utils::occurrences::Occurrences,
};

define_index_newtype!(SlotIdx, CarrierType);

/// Ordered vehicle slots handed to the routing engine. A slot is one usable
/// vehicle shift, so a vehicle driving a morning and an evening shift takes
/// two slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    slots: Vec<CarrierType>,
}

impl Fleet {
    pub fn new(slots: Vec<CarrierType>) -> Result<Self, PlannerError> {
        if slots.is_empty() {
            return Err(PlannerError::InvalidArgument(String::from(
                "The fleet needs at least one vehicle",
            )));
        }

        Ok(Fleet { slots })
    }

    pub fn from_ids(ids: &[u8]) -> Result<Self, PlannerError> {
        let slots = ids
            .iter()
            .map(|&id| CarrierType::new(id))
            .collect::<Result<Vec<_>, _>>()?;

        Fleet::new(slots)
    }

    /// Builds a fleet from `(carrier type, vehicle count)` pairs, in order.
    pub fn from_counts(counts: &[(u8, usize)]) -> Result<Self, PlannerError> {
        let mut slots = Vec::with_capacity(counts.iter().map(|(_, count)| count).sum());
        for &(id, count) in counts {
            let carrier = CarrierType::new(id)?;
            slots.extend(std::iter::repeat_n(carrier, count));
        }

        Fleet::new(slots)
    }

    /// Every vehicle gets a morning and an evening slot, kept next to each other.
    pub fn with_two_shifts(&self) -> Fleet {
        Fleet {
            slots: self
                .slots
                .iter()
                .flat_map(|&carrier| [carrier, carrier])
                .collect(),
        }
    }

    pub fn slots(&self) -> &[CarrierType] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn carrier(&self, slot: SlotIdx) -> CarrierType {
        self.slots[slot]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIdx, CarrierType)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, &carrier)| (SlotIdx::new(index), carrier))
    }

    /// Number of slots per carrier type id.
    pub fn composition(&self) -> Occurrences<u8> {
        self.slots.iter().map(CarrierType::id).collect()
    }
}

/// Accepts either a list of carrier types (`"1,1,2,7"`) or `type:count`
/// pairs (`"1:10,2:5"`), which may be mixed.
impl FromStr for Fleet {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |part: &str| {
            PlannerError::InvalidArgument(format!(
                "Invalid fleet entry '{part}', expected 'type' or 'type:count'"
            ))
        };

        let mut counts = Vec::new();
        for part in s.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            let (id, count) = match part.split_once(':') {
                Some((id, count)) => (id.trim(), count.trim()),
                None => (part, "1"),
            };

            let id = id.parse::<u8>().map_err(|_| invalid(part))?;
            let count = count.parse::<usize>().map_err(|_| invalid(part))?;
            counts.push((id, count));
        }

        Fleet::from_counts(&counts)
    }
}
