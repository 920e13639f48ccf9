use abax_client::{Page, Result, Transport};
use tracing::instrument;

use crate::vehicles::{ListVehiclesInput, Vehicle, LIST_VEHICLES};

impl<T: Transport> super::AbaxClient<T> {
    /// Get a page of vehicles.
    ///
    /// Required scopes: `abax_profile`, `open_api`, `open_api.vehicles`.
    #[instrument(skip(self))]
    pub async fn list_vehicles(&self, input: ListVehiclesInput) -> Result<Page<Vehicle>> {
        self.list_paged(&LIST_VEHICLES, &input).await
    }
}
