//! Vehicle usage summaries.

use std::sync::LazyLock;

use abax_client::{CallDescriptor, QueryParams};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct Usage {
    pub distance_driven_in_meters: f64,
    pub total_toll_stations_passed: u32,
    pub total_road_toll_cost: f64,
}

/// Private and corporate usage of one vehicle over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct UsageSummary {
    pub private_usage_summary: Usage,
    pub corporate_usage_summary: Usage,
}

/// Input for [`AbaxClient::get_usage_summary`](crate::AbaxClient::get_usage_summary).
///
/// The period cannot be longer than 3 months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetUsageSummaryInput {
    pub vehicle_id: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl GetUsageSummaryInput {
    pub fn new(vehicle_id: impl Into<String>, date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            date_from,
            date_to,
        }
    }
}

pub(crate) static GET_USAGE_SUMMARY: LazyLock<CallDescriptor<GetUsageSummaryInput, UsageSummary>> =
    LazyLock::new(|| {
        CallDescriptor::<GetUsageSummaryInput, _>::get_with(|input| {
            format!(
                "v1/vehicles/{}/usage-summary",
                urlencoding::encode(&input.vehicle_id)
            )
        })
        .query(|input| {
            QueryParams::new()
                .date("from", Some(input.date_from))
                .date("to", Some(input.date_to))
        })
        .parse_json()
    });

#[cfg(test)]
mod tests {
    use super::*;
    use abax_client::HttpResponse;
    use serde_json::json;

    #[test]
    fn test_usage_summary_request() {
        let input = GetUsageSummaryInput::new(
            "v1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let request = GET_USAGE_SUMMARY.build_request("https://api.abax.cloud", &input);

        assert_eq!(
            request.url(),
            "https://api.abax.cloud/v1/vehicles/v1/usage-summary"
        );
        assert_eq!(
            request.full_url().unwrap().query(),
            Some("from=2024-01-01&to=2024-03-31")
        );
    }

    #[test]
    fn test_parse_usage_summary() {
        let body = json!({
            "private_usage_summary": {
                "distance_driven_in_meters": 1200,
                "total_toll_stations_passed": 2,
                "total_road_toll_cost": 48.5
            },
            "corporate_usage_summary": {
                "distance_driven_in_meters": 56000,
                "total_toll_stations_passed": 11,
                "total_road_toll_cost": 310
            }
        });

        let summary = GET_USAGE_SUMMARY
            .parse(&HttpResponse::json_body(200, &body))
            .unwrap();
        assert_eq!(summary.corporate_usage_summary.total_toll_stations_passed, 11);

        let public = serde_json::to_value(&summary).unwrap();
        assert_eq!(public["privateUsageSummary"]["totalRoadTollCost"], 48.5);
        assert_eq!(public["corporateUsageSummary"]["distanceDrivenInMeters"], 56000.0);
    }

    #[test]
    fn test_missing_field_is_validation_error() {
        let body = json!({ "private_usage_summary": null });
        let err = GET_USAGE_SUMMARY
            .parse(&HttpResponse::json_body(200, &body))
            .unwrap_err();
        assert!(err.is_validation());
    }
}
