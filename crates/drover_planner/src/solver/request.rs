use std::path::{Path, PathBuf};

use jiff::SignedDuration;

use crate::{
    error::PlannerError,
    problem::{
        carrier::check_toll,
        city::City,
        fleet::Fleet,
        units::{self, MilliEuros},
    },
    solver::search_params::SearchParameters,
};

/// Everything one planning run depends on. Immutable once built, so runs do
/// not share hidden state.
#[derive(Clone, Debug)]
pub struct PlanningRequest {
    city: City,
    fleet: Fleet,
    toll: MilliEuros,
    search: SearchParameters,
    instances_dir: PathBuf,
}

impl PlanningRequest {
    pub fn city(&self) -> City {
        self.city
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Tenths of a cent per kilometre.
    pub fn toll(&self) -> MilliEuros {
        self.toll
    }

    pub fn toll_per_km(&self) -> f64 {
        units::unscale(self.toll)
    }

    pub fn search(&self) -> &SearchParameters {
        &self.search
    }

    pub fn instances_dir(&self) -> &Path {
        &self.instances_dir
    }
}

#[derive(Default)]
pub struct PlanningRequestBuilder {
    city: Option<City>,
    fleet: Option<Fleet>,
    toll: MilliEuros,
    search: Option<SearchParameters>,
    instances_dir: Option<PathBuf>,
}

impl PlanningRequestBuilder {
    pub fn set_city(&mut self, city: City) -> &mut PlanningRequestBuilder {
        self.city = Some(city);
        self
    }

    pub fn set_fleet(&mut self, fleet: Fleet) -> &mut PlanningRequestBuilder {
        self.fleet = Some(fleet);
        self
    }

    pub fn set_toll(&mut self, toll: MilliEuros) -> &mut PlanningRequestBuilder {
        self.toll = toll;
        self
    }

    /// Toll in EUR per kilometre, converted to tenths of a cent.
    pub fn set_toll_per_km(
        &mut self,
        toll: f64,
    ) -> Result<&mut PlanningRequestBuilder, PlannerError> {
        if !toll.is_finite() {
            return Err(PlannerError::InvalidArgument(format!(
                "The toll must be a finite number, got {toll}"
            )));
        }

        self.toll = units::scale(toll);
        Ok(self)
    }

    pub fn set_search_parameters(&mut self, search: SearchParameters) -> &mut PlanningRequestBuilder {
        self.search = Some(search);
        self
    }

    pub fn set_instances_dir(&mut self, dir: impl Into<PathBuf>) -> &mut PlanningRequestBuilder {
        self.instances_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> Result<PlanningRequest, PlannerError> {
        let city = self
            .city
            .ok_or_else(|| PlannerError::InvalidArgument(String::from("Missing city")))?;
        let fleet = self
            .fleet
            .ok_or_else(|| PlannerError::InvalidArgument(String::from("Missing fleet")))?;

        check_toll(self.toll)?;

        let search = self.search.unwrap_or_default();
        if search.time_limit <= SignedDuration::ZERO {
            return Err(PlannerError::InvalidArgument(format!(
                "The time limit must be positive, got {}",
                search.time_limit
            )));
        }

        Ok(PlanningRequest {
            city,
            fleet,
            toll: self.toll,
            search,
            instances_dir: self
                .instances_dir
                .unwrap_or_else(|| PathBuf::from("instances")),
        })
    }
}
