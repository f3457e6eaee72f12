use crate::{
    define_index_newtype,
    problem::units::{Grams, Liters, Seconds},
};

define_index_newtype!(NodeIdx, Node);

/// Node 0 of every instance.
pub const DEPOT: NodeIdx = NodeIdx::new(0);

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    weight: Grams,
    volume: Liters,
    service_duration: Seconds,
    coordinates: Option<(f64, f64)>,
}

impl Node {
    pub fn new(weight: Grams, volume: Liters, service_duration: Seconds) -> Self {
        Node {
            weight,
            volume,
            service_duration,
            coordinates: None,
        }
    }

    pub fn depot() -> Self {
        Node::new(0, 0, 0)
    }

    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.coordinates = Some((lat, lon));
        self
    }

    pub fn weight(&self) -> Grams {
        self.weight
    }

    pub fn volume(&self) -> Liters {
        self.volume
    }

    pub fn service_duration(&self) -> Seconds {
        self.service_duration
    }

    /// `(lat, lon)` when the instance provides them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.coordinates
    }
}
