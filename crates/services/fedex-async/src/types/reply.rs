//! Wire types for the rate-quote reply, and the normalized rate handed to
//! callers.
//!
//! Only the stable outer layers of the reply are typed. The interesting
//! part, `ratedShipmentDetails`, changes shape depending on rate type,
//! service, and account configuration, so it stays raw JSON for the
//! normalizer's prioritized extraction.

use serde::{Deserialize, Serialize};

/// Top-level rate-quote reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateReply {
    /// Carrier-assigned id for this transaction, useful in support tickets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// The reply payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<RateOutput>,
}

/// Payload of a rate reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOutput {
    /// One entry per quoted service.
    #[serde(default)]
    pub rate_reply_details: Vec<RateReplyDetail>,
    /// Carrier-side notices attached to the reply.
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

/// Carrier notice attached to an otherwise successful reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Carrier alert code.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable alert text.
    #[serde(default)]
    pub message: Option<String>,
    /// NOTE / WARNING severity marker.
    #[serde(default)]
    pub alert_type: Option<String>,
}

/// One quoted service in the reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateReplyDetail {
    /// Service code, e.g. `FEDEX_INTERNATIONAL_PRIORITY`.
    #[serde(default)]
    pub service_type: Option<String>,
    /// Display name, e.g. `FedEx International Priority®`.
    #[serde(default)]
    pub service_name: Option<String>,
    /// Priced variants of this service; shape varies, kept raw.
    #[serde(default)]
    pub rated_shipment_details: Vec<serde_json::Value>,
    /// Transit estimates.
    #[serde(default)]
    pub operational_detail: Option<OperationalDetail>,
    /// Committed delivery information.
    #[serde(default)]
    pub commit: Option<CommitDetail>,
}

/// Transit estimates for a quoted service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalDetail {
    /// Transit duration label, e.g. `TWO_DAYS`.
    #[serde(default)]
    pub transit_time: Option<String>,
    /// Estimated delivery timestamp.
    #[serde(default)]
    pub delivery_date: Option<String>,
}

/// Committed delivery information for a quoted service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDetail {
    /// Transit duration label, used when the operational detail has none.
    #[serde(default)]
    pub transit_time: Option<String>,
    /// Committed date container.
    #[serde(default)]
    pub date_detail: Option<CommitDateDetail>,
}

/// Committed date container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDateDetail {
    /// Committed delivery date, formatted by the carrier.
    #[serde(default)]
    pub day_format: Option<String>,
}

/// A single priced shipping option, the only artifact callers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRate {
    /// Service label (display name when available, else the service code).
    pub service: String,
    /// Total charge, strictly positive.
    pub cost: f64,
    /// ISO currency code the cost is expressed in.
    pub currency: String,
    /// Transit duration label, `Unknown` when the carrier gave none.
    pub transit_time: String,
    /// Estimated delivery date, when the carrier gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    /// Which rate table produced the price (`LIST`, `ACCOUNT`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_deserializes_a_realistic_body() {
        let reply: RateReply = serde_json::from_value(serde_json::json!({
            "transactionId": "tx-5150",
            "output": {
                "rateReplyDetails": [{
                    "serviceType": "FEDEX_INTERNATIONAL_PRIORITY",
                    "serviceName": "FedEx International Priority",
                    "ratedShipmentDetails": [{
                        "rateType": "ACCOUNT",
                        "totalNetCharge": 118.2
                    }],
                    "operationalDetail": {
                        "transitTime": "TWO_DAYS",
                        "deliveryDate": "2026-09-01T10:00:00"
                    },
                    "commit": {
                        "dateDetail": { "dayFormat": "2026-09-01" }
                    }
                }],
                "alerts": [{
                    "code": "ORIGIN.STATEORPROVINCECODE.CHANGED",
                    "message": "Origin state changed",
                    "alertType": "NOTE"
                }]
            }
        }))
        .unwrap();

        assert_eq!(reply.transaction_id.as_deref(), Some("tx-5150"));
        let output = reply.output.unwrap();
        assert_eq!(output.rate_reply_details.len(), 1);
        assert_eq!(output.alerts.len(), 1);

        let detail = &output.rate_reply_details[0];
        assert_eq!(detail.service_name.as_deref(), Some("FedEx International Priority"));
        assert_eq!(detail.rated_shipment_details.len(), 1);
        assert_eq!(
            detail
                .operational_detail
                .as_ref()
                .and_then(|o| o.transit_time.as_deref()),
            Some("TWO_DAYS")
        );
    }

    #[test]
    fn reply_tolerates_missing_sections() {
        let reply: RateReply = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(reply.output.is_none());

        let reply: RateReply =
            serde_json::from_value(serde_json::json!({ "output": {} })).unwrap();
        let output = reply.output.unwrap();
        assert!(output.rate_reply_details.is_empty());
        assert!(output.alerts.is_empty());
    }

    #[test]
    fn normalized_rate_omits_absent_optionals() {
        let rate = NormalizedRate {
            service: "FedEx International Economy".to_string(),
            cost: 92.4,
            currency: "USD".to_string(),
            transit_time: "Unknown".to_string(),
            delivery_date: None,
            rate_type: None,
        };
        let value = serde_json::to_value(&rate).unwrap();
        assert!(value.get("deliveryDate").is_none());
        assert!(value.get("rateType").is_none());
        assert_eq!(value.get("transitTime"), Some(&serde_json::json!("Unknown")));
    }
}
