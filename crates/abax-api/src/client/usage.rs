use abax_client::{Error, ErrorKind, Result, Transport};
use tracing::instrument;

use crate::usage::{GetUsageSummaryInput, UsageSummary, GET_USAGE_SUMMARY};

impl<T: Transport> super::AbaxClient<T> {
    /// Get private and corporate usage of a vehicle over a period.
    #[instrument(skip(self))]
    pub async fn get_usage_summary(&self, input: GetUsageSummaryInput) -> Result<UsageSummary> {
        if input.vehicle_id.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput(
                "vehicle id must not be empty".to_string(),
            )));
        }
        self.executor.call(&GET_USAGE_SUMMARY, &input).await
    }
}
