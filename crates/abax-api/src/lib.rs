//! # abax-api
//!
//! Typed client for the ABAX Open API.
//!
//! ## Features
//!
//! - **Vehicles** - Paged vehicle listings
//! - **Trips** - Trip listings, expenses and odometer readings
//! - **Equipment** - Equipment lookups, listings and usage logs
//! - **Usage summaries** - Private and corporate usage per vehicle
//! - **Capabilities** - What the current credential may query
//!
//! Every call goes through the `abax-client` executor, so rate-limited
//! requests are retried and failures come back as [`abax_client::Error`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use abax_api::{AbaxClient, ListVehiclesInput};
//! use abax_client::PAGE_SIZE_ALL;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), abax_client::Error> {
//!     let client = AbaxClient::from_env()?;
//!
//!     let vehicles = client
//!         .list_vehicles(ListVehiclesInput { page: None, page_size: Some(PAGE_SIZE_ALL) })
//!         .await?;
//!
//!     for vehicle in &vehicles.items {
//!         println!("{} {:?}", vehicle.id, vehicle.alias);
//!     }
//!     Ok(())
//! }
//! ```

mod capabilities;
mod client;
mod equipment;
mod shared;
mod trips;
mod usage;
mod vehicles;

pub use capabilities::{Capability, CapabilityKind};
pub use client::AbaxClient;
pub use equipment::{
    Equipment, EquipmentLog, EquipmentUnitType, InputType, ListEquipmentInput,
    ListEquipmentLogsInput, OperatingHours, Temperature,
};
pub use shared::{
    Driver, Location, Measurement, Named, Organization, SignalSource, Unit, UnitHealth,
    UnitStatus, VehicleCommercialClass,
};
pub use trips::{
    Expense, Extra, ListTripsInput, OdometerReading, Trip, TripCommercialClass, TripExpense,
    TripLocation, TripOdometerValues, TripPoint, TripSource, TripVehicle,
};
pub use usage::{GetUsageSummaryInput, Usage, UsageSummary};
pub use vehicles::{FuelType, LicensePlate, ListVehiclesInput, Vehicle};
