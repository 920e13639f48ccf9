use abax_client::{Result, Transport};
use tracing::instrument;

use crate::capabilities::{Capability, LIST_CAPABILITIES};

impl<T: Transport> super::AbaxClient<T> {
    /// List the API capabilities granted to the current credential.
    #[instrument(skip(self))]
    pub async fn list_capabilities(&self) -> Result<Vec<Capability>> {
        Ok(self.executor.call(&LIST_CAPABILITIES, &()).await?.items)
    }
}
