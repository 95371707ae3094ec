//! Wire types for the rate-quote request body.
//!
//! Field declaration order tracks the upstream contract. The rate API is
//! strict about shape: `groupPackageCount` must sit on the line item (not
//! inside `dimensions`), and `preferredCurrency`, `shipDateStamp`, and
//! `packagingType` must all be present or the request is rejected.

use serde::{Deserialize, Serialize};

/// Pickup type sent on every quote
pub const PICKUP_TYPE: &str = "DROPOFF_AT_FEDEX_LOCATION";
/// Packaging type sent on every quote
pub const PACKAGING_TYPE: &str = "YOUR_PACKAGING";
/// Rate types requested on every quote
pub const RATE_REQUEST_TYPES: [&str; 3] = ["LIST", "ACCOUNT", "INCENTIVE"];
/// Weight unit for package line items
pub const WEIGHT_UNITS: &str = "KG";
/// Dimension unit for package line items
pub const DIMENSION_UNITS: &str = "CM";

/// Top-level rate-quote request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuoteRequest {
    /// Billing account wrapper.
    pub account_number: AccountNumber,
    /// Everything about the shipment being priced.
    pub requested_shipment: RequestedShipment,
}

/// Account number wrapper (`{"value": "..."}` on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNumber {
    /// The billing account number.
    pub value: String,
}

/// The shipment being priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedShipment {
    /// Origin party.
    pub shipper: Party,
    /// Destination party.
    pub recipient: Party,
    /// Currency the quote should be expressed in.
    pub preferred_currency: String,
    /// Tender date, formatted `YYYY-MM-DD`.
    pub ship_date_stamp: String,
    /// How the shipment reaches the carrier.
    pub pickup_type: String,
    /// Carrier packaging classification.
    pub packaging_type: String,
    /// Which rate tables to quote from.
    pub rate_request_type: Vec<String>,
    /// The packages in the shipment.
    pub requested_package_line_items: Vec<RequestedPackageLineItem>,
}

/// A shipper or recipient, reduced to the address the rate API needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// The party's address.
    pub address: Address,
}

/// Postal endpoint of a shipment leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Postal or ZIP code.
    pub postal_code: String,
    /// Two-letter ISO country code, uppercase.
    pub country_code: String,
}

impl Address {
    /// Creates an address, trimming whitespace and uppercasing the country.
    #[must_use]
    pub fn new(postal_code: impl AsRef<str>, country_code: impl AsRef<str>) -> Self {
        Self {
            postal_code: postal_code.as_ref().trim().to_string(),
            country_code: country_code.as_ref().trim().to_ascii_uppercase(),
        }
    }
}

/// One package in the shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedPackageLineItem {
    /// Always 1; the API requires it at this level.
    pub group_package_count: u32,
    /// Package weight.
    pub weight: Weight,
    /// Package dimensions.
    pub dimensions: RequestedDimensions,
}

/// Weight with its unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weight {
    /// Unit of measure, `KG` here.
    pub units: String,
    /// Weight value.
    pub value: f64,
}

/// Dimensions with their unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedDimensions {
    /// Length value.
    pub length: f64,
    /// Width value.
    pub width: f64,
    /// Height value.
    pub height: f64,
    /// Unit of measure, `CM` here.
    pub units: String,
}
