//! Rate-request payload assembly and pre-flight validation.
//!
//! The rate API rejects misshapen bodies with opaque errors, so the payload
//! is built in exactly one place and checked locally before any network or
//! token cost is spent on it.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::ShippingError;
use crate::types::package::PackageDimensions;
use crate::types::rates::{
    AccountNumber, Address, DIMENSION_UNITS, PACKAGING_TYPE, PICKUP_TYPE, Party,
    RATE_REQUEST_TYPES, RateQuoteRequest, RequestedDimensions, RequestedPackageLineItem,
    RequestedShipment, WEIGHT_UNITS, Weight,
};

/// Date format the rate API expects for `shipDateStamp`.
const SHIP_DATE_FORMAT: &str = "%Y-%m-%d";

/// The default tender date: one day out, date only.
///
/// Same-day tender gets quotes rejected for some routes, so "tomorrow" is
/// the safe default when the caller does not pick a date.
#[must_use]
pub fn default_ship_date(now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::hours(24)).date_naive()
}

/// Assembles the rate-quote body for a single-package shipment.
///
/// Uses the fixed pickup type, packaging type, and rate tables every quote
/// sends; only the account, addresses, package, currency, and date vary per
/// request.
#[must_use]
pub fn build_rate_request(
    account_number: &str,
    dimensions: &PackageDimensions,
    origin: &Address,
    destination: &Address,
    currency: &str,
    ship_date: NaiveDate,
) -> RateQuoteRequest {
    RateQuoteRequest {
        account_number: AccountNumber {
            value: account_number.to_string(),
        },
        requested_shipment: RequestedShipment {
            shipper: Party {
                address: origin.clone(),
            },
            recipient: Party {
                address: destination.clone(),
            },
            preferred_currency: currency.to_string(),
            ship_date_stamp: ship_date.format(SHIP_DATE_FORMAT).to_string(),
            pickup_type: PICKUP_TYPE.to_string(),
            packaging_type: PACKAGING_TYPE.to_string(),
            rate_request_type: RATE_REQUEST_TYPES.iter().map(|t| (*t).to_string()).collect(),
            requested_package_line_items: vec![RequestedPackageLineItem {
                group_package_count: 1,
                weight: Weight {
                    units: WEIGHT_UNITS.to_string(),
                    value: dimensions.weight_kg,
                },
                dimensions: RequestedDimensions {
                    length: dimensions.length_cm,
                    width: dimensions.width_cm,
                    height: dimensions.height_cm,
                    units: DIMENSION_UNITS.to_string(),
                },
            }],
        },
    }
}

/// Checks a built payload against the upstream's required shape.
///
/// Collects every problem instead of stopping at the first, so one round
/// trip tells the caller everything that needs fixing. Any problem makes
/// the whole request a `Validation` failure; nothing is sent upstream.
pub fn validate(payload: &RateQuoteRequest) -> Result<(), ShippingError> {
    let mut problems: Vec<String> = Vec::new();
    let shipment = &payload.requested_shipment;

    if payload.account_number.value.trim().is_empty() {
        problems.push("accountNumber.value is empty".to_string());
    }
    check_address(&shipment.shipper.address, "shipper", &mut problems);
    check_address(&shipment.recipient.address, "recipient", &mut problems);
    if shipment.preferred_currency.trim().is_empty() {
        problems.push("preferredCurrency is empty".to_string());
    }
    if shipment.ship_date_stamp.trim().is_empty() {
        problems.push("shipDateStamp is empty".to_string());
    }
    if shipment.pickup_type.trim().is_empty() {
        problems.push("pickupType is empty".to_string());
    }
    if shipment.packaging_type.trim().is_empty() {
        problems.push("packagingType is empty".to_string());
    }
    if shipment.rate_request_type.is_empty() {
        problems.push("rateRequestType is empty".to_string());
    }
    if shipment.requested_package_line_items.is_empty() {
        problems.push("requestedPackageLineItems is empty".to_string());
    }
    for (index, item) in shipment.requested_package_line_items.iter().enumerate() {
        if item.group_package_count == 0 {
            problems.push(format!("lineItems[{index}].groupPackageCount must be at least 1"));
        }
        if item.weight.value <= 0.0 {
            problems.push(format!("lineItems[{index}].weight.value must be positive"));
        }
        let dims = &item.dimensions;
        if dims.length <= 0.0 || dims.width <= 0.0 || dims.height <= 0.0 {
            problems.push(format!("lineItems[{index}].dimensions must all be positive"));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ShippingError::validation(
            format!("rate request failed pre-flight checks: {}", problems.join("; ")),
            "The rate request is missing required shipment details.",
        )
        .with_details(serde_json::json!({ "problems": problems })))
    }
}

fn check_address(address: &Address, leg: &str, problems: &mut Vec<String>) {
    if address.postal_code.trim().is_empty() {
        problems.push(format!("{leg}.address.postalCode is empty"));
    }
    if address.country_code.trim().is_empty() {
        problems.push(format!("{leg}.address.countryCode is empty"));
    }
}
