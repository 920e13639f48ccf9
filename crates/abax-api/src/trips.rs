//! Trip listing, expense and odometer types.

use std::sync::LazyLock;

use abax_client::{CallDescriptor, ItemList, Page, QueryParams};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::PagedInput;
use crate::shared::{Driver, SignalSource, VehicleCommercialClass};

// ============================================================================
// Trips
// ============================================================================

/// Purpose class of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripCommercialClass {
    Unknown,
    PrivateTrip,
    BusinessTrip,
    Commute,
}

/// Whether a trip was recorded by the unit or entered by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripSource {
    Automatic,
    Manual,
}

/// Vehicle summary embedded in a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct TripVehicle {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub commercial_class: VehicleCommercialClass,
}

/// Position fix at the start or end of a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct TripLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
    pub signal_source: SignalSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_radius: Option<f64>,
}

/// Start or end point of a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPoint {
    pub location: TripLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct Trip {
    pub id: String,
    pub vehicle: TripVehicle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,
    pub start: TripPoint,
    pub finish: TripPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub commercial_class: TripCommercialClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub source: TripSource,
}

/// Input for [`AbaxClient::list_trips`](crate::AbaxClient::list_trips).
///
/// The period cannot be longer than 3 months. A `page_size` of
/// [`PAGE_SIZE_ALL`](abax_client::PAGE_SIZE_ALL) fetches every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTripsInput {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub vehicle_id: Option<String>,
}

impl ListTripsInput {
    pub fn new(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            page: None,
            page_size: None,
            date_from,
            date_to,
            vehicle_id: None,
        }
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    /// Fetch every trip in the period.
    pub fn all(mut self) -> Self {
        self.page = None;
        self.page_size = Some(abax_client::PAGE_SIZE_ALL);
        self
    }

    pub fn with_vehicle(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }
}

impl PagedInput for ListTripsInput {
    fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    fn at_page(&self, page: u32, page_size: u32) -> Self {
        self.clone().with_page(page, page_size)
    }
}

pub(crate) static LIST_TRIPS: LazyLock<CallDescriptor<ListTripsInput, Page<Trip>>> =
    LazyLock::new(|| {
        CallDescriptor::<ListTripsInput, _>::get("v1/trips")
            .query(|input| {
                QueryParams::new()
                    .opt("page", input.page)
                    .opt("page_size", input.page_size)
                    .date("date_from", Some(input.date_from))
                    .date("date_to", Some(input.date_to))
                    .opt("vehicle_id", input.vehicle_id.as_deref())
            })
            .parse_json()
    });

// ============================================================================
// Expenses
// ============================================================================

/// Costs registered on a trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easy_park_private: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easy_park_corporate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toll_road_admin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toll_charge: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ferry: Option<f64>,
}

/// Extra distances and passengers registered on a trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct Extra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_with_bad_road_in_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_with_trailer_in_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_with_caravan_in_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_with_canteen_in_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_with_heavy_load_in_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_with_dog_in_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_with_passenger_in_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct TripExpense {
    pub trip_id: String,
    pub expense: Expense,
    pub extra: Extra,
}

pub(crate) static LIST_TRIP_EXPENSES: LazyLock<CallDescriptor<Vec<String>, ItemList<TripExpense>>> =
    LazyLock::new(|| {
        CallDescriptor::<Vec<String>, _>::get("v1/trips/expense")
            .query(|trip_ids| QueryParams::new().list("trip_ids", trip_ids))
            .parse_json()
    });

// ============================================================================
// Odometer readings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdometerReading {
    pub value: f64,
    pub timestamp: String,
}

/// Odometer values at the start and end of a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct TripOdometerValues {
    pub trip_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_start: Option<OdometerReading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_finish: Option<OdometerReading>,
}

pub(crate) static GET_ODOMETER_VALUES: LazyLock<
    CallDescriptor<Vec<String>, ItemList<TripOdometerValues>>,
> = LazyLock::new(|| {
    CallDescriptor::<Vec<String>, _>::get("v1/trips/odometerReadings")
        .query(|trip_ids| QueryParams::new().list("trip_ids", trip_ids))
        .parse_json()
});
