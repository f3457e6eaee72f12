pub mod carrier;
pub mod city;
pub mod data_model;
pub mod fleet;
pub mod instance;
pub mod node;
pub mod travel_matrices;
pub mod units;
