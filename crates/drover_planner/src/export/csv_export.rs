use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::{error::PlannerError, solver::report::SummaryRecord};

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CsvSummaryRow<'a> {
    city: &'a str,
    toll: f64,
    #[serde(rename = "FSS")]
    fss: &'a str,
    #[serde(rename = "LSS")]
    lss: &'a str,
    max_time: i64,
    actual_time: f64,
    total_cost: f64,
    total_weight: f64,
    total_volume: f64,
    total_distance: f64,
    fleet: String,
    routes: String,
}

impl<'a> From<&'a SummaryRecord> for CsvSummaryRow<'a> {
    fn from(summary: &'a SummaryRecord) -> Self {
        CsvSummaryRow {
            city: summary.city,
            toll: summary.toll,
            fss: summary.first_solution_strategy,
            lss: summary.local_search_metaheuristic,
            max_time: summary.max_time,
            actual_time: summary.actual_time,
            total_cost: summary.total_cost,
            total_weight: summary.total_weight,
            total_volume: summary.total_volume,
            total_distance: summary.total_distance,
            fleet: summary.chosen_fleet.to_string(),
            routes: summary.routes.join("; "),
        }
    }
}

pub fn export_file_name(summary: &SummaryRecord) -> String {
    format!(
        "{}_{:.2}_{}_FSS{}_LSS{}.csv",
        summary.city,
        summary.toll,
        summary.max_time,
        summary.first_solution_strategy,
        summary.local_search_metaheuristic
    )
}

/// Writes the summary as a one-row CSV file into `dir`, creating it if
/// needed, and returns the path of the file.
pub fn export_csv(dir: &Path, summary: &SummaryRecord) -> Result<PathBuf, PlannerError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(summary));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.serialize(CsvSummaryRow::from(summary))?;
    writer.flush()?;

    info!("Summary written to {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use crate::utils::occurrences::count_occurrences;

    use super::*;

    fn summary() -> SummaryRecord {
        SummaryRecord {
            city: "NewYork",
            toll: 0.25,
            first_solution_strategy: "PATH_CHEAPEST_ARC",
            local_search_metaheuristic: "GUIDED_LOCAL_SEARCH",
            max_time: 60,
            actual_time: 12.5,
            total_cost: 38.287,
            total_weight: 400.5,
            total_volume: 0.85,
            total_distance: 16.0,
            total_time: String::from("01:02:00"),
            fleet: count_occurrences(&[1, 1, 2]),
            chosen_fleet: count_occurrences(&[1, 2]),
            routes: vec![String::from("0-2-1-0"), String::from("0-3-0")],
        }
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(&summary()),
            "NewYork_0.25_60_FSSPATH_CHEAPEST_ARC_LSSGUIDED_LOCAL_SEARCH.csv"
        );
    }

    #[test]
    fn test_export_csv() {
        let dir = std::env::temp_dir().join(format!("drover_export_{}", std::process::id()));

        let path = export_csv(&dir, &summary()).unwrap();

        assert_eq!(path.parent(), Some(dir.as_path()));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![
                "City",
                "Toll",
                "FSS",
                "LSS",
                "MaxTime",
                "ActualTime",
                "TotalCost",
                "TotalWeight",
                "TotalVolume",
                "TotalDistance",
                "Fleet",
                "Routes"
            ]
        );

        let rows = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "NewYork");
        assert_eq!(&rows[0][2], "PATH_CHEAPEST_ARC");
        assert_eq!(&rows[0][6], "38.287");
        assert_eq!(&rows[0][10], "{1: 1, 2: 1}");
        assert_eq!(&rows[0][11], "0-2-1-0; 0-3-0");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
