pub mod cheapest_arc;
pub mod decoder;
pub mod engine;
pub mod feasibility;
pub mod planner;
pub mod report;
pub mod request;
pub mod routing_model;
pub mod search_params;
