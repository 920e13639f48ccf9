//! Vehicle listing types.

use std::sync::LazyLock;

use abax_client::{CallDescriptor, Page, QueryParams};
use serde::{Deserialize, Serialize};

use crate::client::PagedInput;
use crate::shared::{
    Driver, Location, Measurement, Named, Organization, Unit, VehicleCommercialClass,
};

/// Fuel or energy source of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Unknown,
    Petrol,
    Electricity,
    Diesel,
    Lpg,
    DieselHybrid,
    PetrolHybrid,
}

/// Registration plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicensePlate {
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
}

/// A vehicle. The API already serves this payload in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Named>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Named>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<LicensePlate>,
    pub commercial_class: VehicleCommercialClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,
    pub organization: Organization,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer: Option<Measurement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Measurement>,
    pub fuel_type: FuelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_emissions: Option<f64>,
}

/// Input for [`AbaxClient::list_vehicles`](crate::AbaxClient::list_vehicles).
///
/// A `page_size` of [`PAGE_SIZE_ALL`](abax_client::PAGE_SIZE_ALL) fetches every page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListVehiclesInput {
    /// Defaults to 1 on the server.
    pub page: Option<u32>,
    /// Defaults to 1500 on the server.
    pub page_size: Option<u32>,
}

impl ListVehiclesInput {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

impl PagedInput for ListVehiclesInput {
    fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    fn at_page(&self, page: u32, page_size: u32) -> Self {
        Self::page(page, page_size)
    }
}

pub(crate) static LIST_VEHICLES: LazyLock<CallDescriptor<ListVehiclesInput, Page<Vehicle>>> =
    LazyLock::new(|| {
        CallDescriptor::<ListVehiclesInput, _>::get("v1/vehicles")
            .query(|input| {
                QueryParams::new()
                    .opt("page", input.page)
                    .opt("page_size", input.page_size)
            })
            .parse_json()
    });
