//! Types shared by several endpoints.
//!
//! The ABAX API is not consistent about casing: vehicle and equipment log
//! payloads are camelCase, everything else is snake_case. Shared types
//! accept both spellings and always serialize camelCase.

use serde::{Deserialize, Serialize};

// ============================================================================
// Enumerations
// ============================================================================

/// Positioning technology behind a location fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalSource {
    Gps,
    Gsm,
}

/// Health of a tracking unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitHealth {
    Unknown,
    Healthy,
    Degraded,
    Unhealthy,
}

/// Activation status of a tracking unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    Unknown,
    Active,
    Deactivated,
}

/// Tax class of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleCommercialClass {
    Unknown,
    Private,
    Company,
    Commercial,
    CommercialWithPrivateUse,
}

// ============================================================================
// Records
// ============================================================================

/// Organization owning a vehicle or a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// A named manufacturer or model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}

/// Driver assigned to a vehicle or a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    #[serde(default, alias = "external_id", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "phone_number", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Tracking unit installed in a vehicle or on equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct Unit {
    pub id: String,
    #[serde(default, alias = "serialNumber", skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub health: UnitHealth,
    pub status: UnitStatus,
}

/// Last known position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "snake_case", serialize = "camelCase"))]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, alias = "inMovement", skip_serializing_if = "Option::is_none")]
    pub in_movement: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<f64>,
    pub timestamp: String,
    #[serde(alias = "signalSource")]
    pub signal_source: SignalSource,
    #[serde(default, alias = "accuracyRadius", skip_serializing_if = "Option::is_none")]
    pub accuracy_radius: Option<f64>,
}

/// A reading with an optional timestamp, such as a temperature or an odometer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
