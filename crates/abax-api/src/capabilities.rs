//! API capabilities granted to the caller.

use std::sync::LazyLock;

use abax_client::{CallDescriptor, ItemList};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    QueryEquipment,
    QueryEquipmentLocations,
    QueryPeople,
    QueryVehicles,
    QueryVehicleLocations,
    QueryVehicleLocationHistory,
    QueryVehicleDriveStates,
    QueryTrips,
    QueryTripRoute,
    QueryTripExpenseAndExtra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub capability: CapabilityKind,
}

pub(crate) static LIST_CAPABILITIES: LazyLock<CallDescriptor<(), ItemList<Capability>>> =
    LazyLock::new(|| CallDescriptor::<(), _>::get("v1/api-capabilities").parse_json());
