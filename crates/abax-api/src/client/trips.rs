use abax_client::{run_batched, BatchMode, Page, Result, Transport, MAX_BATCH_SIZE};
use tracing::instrument;

use crate::trips::{
    ListTripsInput, Trip, TripExpense, TripOdometerValues, GET_ODOMETER_VALUES,
    LIST_TRIPS, LIST_TRIP_EXPENSES,
};

impl<T: Transport> super::AbaxClient<T> {
    /// Get a page of trips.
    ///
    /// Required scopes: `abax_profile`, `open_api`, `open_api.trips`.
    #[instrument(skip(self))]
    pub async fn list_trips(&self, input: ListTripsInput) -> Result<Page<Trip>> {
        self.list_paged(&LIST_TRIPS, &input).await
    }

    /// Get expenses and extras of trips, in the order of `trip_ids`.
    ///
    /// Ids are sent in batches of at most 150, all batches at once.
    #[instrument(skip_all, fields(trips = trip_ids.len()))]
    pub async fn list_trip_expenses(&self, trip_ids: &[String]) -> Result<Vec<TripExpense>> {
        run_batched(trip_ids, MAX_BATCH_SIZE, BatchMode::Concurrent, |batch| async move {
            let list = self.executor.call(&LIST_TRIP_EXPENSES, &batch.to_vec()).await?;
            Ok(list.items)
        })
        .await
    }

    /// Get odometer readings at the start and end of trips, in the order of
    /// `trip_ids`.
    ///
    /// Ids are sent in batches of at most 150, one batch after the other.
    #[instrument(skip_all, fields(trips = trip_ids.len()))]
    pub async fn get_odometer_values_of_trips(
        &self,
        trip_ids: &[String],
    ) -> Result<Vec<TripOdometerValues>> {
        run_batched(trip_ids, MAX_BATCH_SIZE, BatchMode::Sequential, |batch| async move {
            let list = self.executor.call(&GET_ODOMETER_VALUES, &batch.to_vec()).await?;
            Ok(list.items)
        })
        .await
    }
}
