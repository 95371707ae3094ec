//! Rate-reply normalization.
//!
//! The carrier reports the same monetary total in different places and
//! encodings depending on rate type, service, and account configuration:
//! directly on the rated shipment detail, nested one level down, per
//! package, or under an alternate field name; as a bare number, a numeric
//! string, or a `{value, currency}` wrapper. This module hides all of that
//! behind one prioritized extraction and hands callers a flat
//! [`NormalizedRate`] list.

use serde_json::Value;

use crate::context::RequestContext;
use crate::error::ShippingError;
use crate::types::reply::{NormalizedRate, RateReply, RateReplyDetail};

/// Transit label used when the carrier supplied none.
const UNKNOWN_TRANSIT: &str = "Unknown";

/// User-facing message when a reply yields nothing usable.
const NO_OPTIONS_MSG: &str = "No shipping options are available for this route.";

/// A monetary amount with the currency that accompanied it, if any.
#[derive(Debug, Clone, PartialEq)]
struct Money {
    amount: f64,
    currency: Option<String>,
}

/// Flattens a carrier reply into normalized rates.
///
/// Reply details that lack both a service label and a usable charge are
/// skipped rather than failing the whole reply; the error comes only when
/// nothing at all survives. Amounts without an accompanying currency take
/// `fallback_currency` (the currency the quote was requested in).
pub fn normalize(
    reply: &RateReply,
    fallback_currency: &str,
    ctx: &RequestContext,
) -> Result<Vec<NormalizedRate>, ShippingError> {
    let details: &[RateReplyDetail] = reply
        .output
        .as_ref()
        .map(|output| output.rate_reply_details.as_slice())
        .unwrap_or_default();

    if details.is_empty() {
        return Err(ShippingError::rate_parsing(
            "carrier reply contains no rateReplyDetails",
            NO_OPTIONS_MSG,
        ));
    }

    let mut rates = Vec::new();
    for detail in details {
        let Some(service) = service_label(detail) else {
            tracing::warn!(
                request_id = %ctx.request_id(),
                "skipping reply detail with neither serviceName nor serviceType"
            );
            continue;
        };

        let (transit_time, delivery_date) = schedule_for(detail);

        for shipment in &detail.rated_shipment_details {
            let Some(money) = extract_total_charge(shipment) else {
                tracing::debug!(
                    request_id = %ctx.request_id(),
                    service = %service,
                    "shipment detail carried no usable charge, skipped"
                );
                continue;
            };
            rates.push(NormalizedRate {
                service: service.clone(),
                cost: money.amount,
                currency: money
                    .currency
                    .unwrap_or_else(|| fallback_currency.to_string()),
                transit_time: transit_time.clone(),
                delivery_date: delivery_date.clone(),
                rate_type: shipment
                    .get("rateType")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            });
        }
    }

    if rates.is_empty() {
        return Err(ShippingError::rate_parsing(
            "no rated shipment detail yielded a positive charge in any known location",
            NO_OPTIONS_MSG,
        ));
    }

    tracing::debug!(
        request_id = %ctx.request_id(),
        count = rates.len(),
        "normalized carrier reply"
    );
    Ok(rates)
}

/// Service label: display name first, service code as fallback.
fn service_label(detail: &RateReplyDetail) -> Option<String> {
    detail
        .service_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| {
            detail
                .service_type
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty())
        })
        .map(str::to_string)
}

/// Transit estimate and delivery date, preferring the operational detail
/// over the commit block.
fn schedule_for(detail: &RateReplyDetail) -> (String, Option<String>) {
    let operational = detail.operational_detail.as_ref();
    let commit = detail.commit.as_ref();

    let transit = operational
        .and_then(|o| o.transit_time.clone())
        .or_else(|| commit.and_then(|c| c.transit_time.clone()))
        .unwrap_or_else(|| UNKNOWN_TRANSIT.to_string());

    let delivery = operational
        .and_then(|o| o.delivery_date.clone())
        .or_else(|| {
            commit
                .and_then(|c| c.date_detail.as_ref())
                .and_then(|d| d.day_format.clone())
        });

    (transit, delivery)
}

/// Walks the candidate charge locations in trust order until one yields a
/// positive amount. A candidate that exists but fails the amount rules
/// contributes nothing and the walk moves on.
fn extract_total_charge(shipment: &Value) -> Option<Money> {
    money_field(shipment, "totalNetCharge")
        .or_else(|| nested_rate_detail_charge(shipment))
        .or_else(|| package_level_charge(shipment))
        .or_else(|| money_field(shipment, "totalNetFedExCharge"))
}

/// `shipmentRateDetail.totalNetCharge`, one level down.
fn nested_rate_detail_charge(shipment: &Value) -> Option<Money> {
    money_field(shipment.get("shipmentRateDetail")?, "totalNetCharge")
}

/// `netCharge` of the first per-package breakdown that has a usable one.
fn package_level_charge(shipment: &Value) -> Option<Money> {
    shipment
        .get("ratedPackages")?
        .as_array()?
        .iter()
        .filter_map(|package| package.get("packageRateDetail"))
        .find_map(|detail| money_field(detail, "netCharge"))
}

/// Reads `container[field]` as money. The amount may be a bare number, a
/// numeric string, or a `{value}` wrapper; the currency is taken from
/// whichever object sits closest to the amount.
fn money_field(container: &Value, field: &str) -> Option<Money> {
    let candidate = container.get(field)?;
    let amount = amount_of(candidate)?;
    let currency = currency_of(candidate).or_else(|| currency_of(container));
    Some(Money { amount, currency })
}

/// Unwraps the three amount encodings, rejecting non-numeric and
/// non-positive values.
fn amount_of(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        Value::Object(_) => amount_of(value.get("value")?)?,
        _ => return None,
    };
    (raw.is_finite() && raw > 0.0).then_some(raw)
}

/// A non-empty `currency` string on the given object.
fn currency_of(value: &Value) -> Option<String> {
    value
        .get("currency")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}
