//! Quote orchestration: request validation, the pipeline, and the one
//! place pipeline errors become HTTP responses.

use std::fmt;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fedex_async::config::{Config, Credentials};
use fedex_async::context::RequestContext;
use fedex_async::currency;
use fedex_async::error::{ErrorKind, ShippingError};
use fedex_async::normalize;
use fedex_async::payload;
use fedex_async::redact;
use fedex_async::types::rates::Address;
use fedex_async::types::reply::NormalizedRate;

use crate::state::AppState;

/// Inbound quote request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Catalog collection the item belongs to.
    #[serde(default)]
    pub collection: Option<String>,
    /// Size key within the collection.
    #[serde(default)]
    pub size: Option<String>,
    /// Destination country, two-letter ISO code.
    #[serde(default)]
    pub country: Option<String>,
    /// Destination postal code.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Origin country override; requires `originPostalCode` too.
    #[serde(default)]
    pub origin_country: Option<String>,
    /// Origin postal code override; requires `originCountry` too.
    #[serde(default)]
    pub origin_postal_code: Option<String>,
    /// Currency the quote should be expressed in.
    #[serde(default)]
    pub preferred_currency: Option<String>,
    /// Tender date override, `YYYY-MM-DD`.
    #[serde(default)]
    pub ship_date: Option<String>,
    /// Per-request carrier credentials.
    #[serde(default)]
    pub fedex_config: Option<CredentialOverride>,
}

/// Per-request credential override (`fedexConfig` on the wire).
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialOverride {
    /// Billing account number.
    #[serde(default)]
    pub account_number: Option<String>,
    /// OAuth client id.
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: Option<String>,
}

// Hand-written so a stray {:?} can never print credentials.
impl fmt::Debug for CredentialOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialOverride")
            .field("account_number", &"[REDACTED]")
            .field("client_id", &"[REDACTED]")
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Successful response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Always `true` here.
    pub success: bool,
    /// The normalized shipping options.
    pub rates: Vec<NormalizedRate>,
    /// Correlation id for support and log lookup.
    pub request_id: String,
}

/// Failure response envelope. `error` carries only the user-safe message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `false` here.
    pub success: bool,
    /// User-safe description of the failure.
    pub error: String,
    /// Correlation id for support and log lookup.
    pub request_id: String,
    /// Failure classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorKind>,
}

/// Builds the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/quotes", post(create_quote))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// `POST /api/v1/quotes` - the single quote entry point.
async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Response {
    let ctx = RequestContext::new();

    tracing::info!(
        request_id = %ctx.request_id(),
        body = %redact::redacted(&serde_json::to_value(&request).unwrap_or_default()),
        "quote requested"
    );

    match quote_rates(&state, request, &ctx).await {
        Ok(rates) => {
            tracing::info!(
                request_id = %ctx.request_id(),
                count = rates.len(),
                "quote succeeded"
            );
            (
                StatusCode::OK,
                Json(QuoteResponse {
                    success: true,
                    rates,
                    request_id: ctx.request_id().to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => error_response(&err, &ctx),
    }
}

/// Runs the full quote pipeline: validate input, look up dimensions,
/// resolve the currency and credentials, authenticate, build and validate
/// the payload, request rates, and normalize the reply.
async fn quote_rates(
    state: &AppState,
    request: QuoteRequest,
    ctx: &RequestContext,
) -> Result<Vec<NormalizedRate>, ShippingError> {
    let input = validate_input(request)?;

    let dimensions = state
        .dimensions
        .get(&input.collection, &input.size)?
        .ok_or_else(|| {
            ShippingError::validation(
                format!(
                    "no dimensions for collection '{}' size '{}'",
                    input.collection, input.size
                ),
                "Unknown collection or size.",
            )
        })?;
    tracing::debug!(
        request_id = %ctx.request_id(),
        collection = %input.collection,
        size = %input.size,
        billed_weight_kg = dimensions.billed_weight(),
        "resolved package dimensions"
    );

    let quote_currency =
        currency::resolve(input.preferred_currency.as_deref(), &input.destination.country_code);

    let credentials =
        resolve_credentials(input.credential_override, state.fedex.config().credentials())?;

    let token = state.fedex.oauth().token(&credentials, ctx).await?;

    let origin = input.origin_override.unwrap_or_else(|| state.origin.clone());
    let ship_date = input
        .ship_date
        .unwrap_or_else(|| payload::default_ship_date(Utc::now()));
    let body = payload::build_rate_request(
        &credentials.account_number,
        &dimensions,
        &origin,
        &input.destination,
        &quote_currency,
        ship_date,
    );
    payload::validate(&body)?;

    let reply = state.fedex.rates().quote(&token, &body, ctx).await?;
    normalize::normalize(&reply, &quote_currency, ctx)
}

/// Input after shape validation: everything the pipeline needs, owned.
#[derive(Debug)]
struct QuoteInput {
    collection: String,
    size: String,
    destination: Address,
    origin_override: Option<Address>,
    preferred_currency: Option<String>,
    ship_date: Option<NaiveDate>,
    credential_override: Option<CredentialOverride>,
}

/// Checks the inbound body shape, collecting every problem into one
/// `Validation` error instead of stopping at the first.
fn validate_input(request: QuoteRequest) -> Result<QuoteInput, ShippingError> {
    let mut problems: Vec<String> = Vec::new();

    let collection = required(request.collection, "collection", &mut problems);
    let size = required(request.size, "size", &mut problems);
    let postal_code = required(request.postal_code, "postalCode", &mut problems);
    let country = required(request.country, "country", &mut problems).to_ascii_uppercase();
    if !country.is_empty() && !is_country_code(&country) {
        problems.push("country must be a two-letter ISO code".to_string());
    }

    let origin_override = match (request.origin_country, request.origin_postal_code) {
        (None, None) => None,
        (Some(origin_country), Some(origin_postal)) => {
            let origin_country = origin_country.trim().to_ascii_uppercase();
            let origin_postal = origin_postal.trim().to_string();
            if !is_country_code(&origin_country) {
                problems.push("originCountry must be a two-letter ISO code".to_string());
            }
            if origin_postal.is_empty() {
                problems.push("originPostalCode must not be blank".to_string());
            }
            Some(Address::new(origin_postal, origin_country))
        }
        _ => {
            problems.push(
                "originCountry and originPostalCode must be provided together".to_string(),
            );
            None
        }
    };

    let ship_date = match request
        .ship_date
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
    {
        None => None,
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                problems.push("shipDate must be formatted YYYY-MM-DD".to_string());
                None
            }
        },
    };

    if problems.is_empty() {
        Ok(QuoteInput {
            collection,
            size,
            destination: Address::new(postal_code, country),
            origin_override,
            preferred_currency: request.preferred_currency,
            ship_date,
            credential_override: request.fedex_config,
        })
    } else {
        Err(ShippingError::validation(
            format!("invalid quote request: {}", problems.join("; ")),
            "Missing or invalid quote fields. Collection, size, destination country and postal code are required.",
        )
        .with_details(serde_json::json!({ "problems": problems })))
    }
}

fn required(value: Option<String>, name: &str, problems: &mut Vec<String>) -> String {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => v,
        None => {
            problems.push(format!("{name} is required"));
            String::new()
        }
    }
}

fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Picks the credentials for this request: a request-supplied override
/// wins, otherwise the process configuration. Whatever source wins must
/// pass shape validation; having no source at all is a `Configuration`
/// failure, not a validation one.
fn resolve_credentials(
    override_cfg: Option<CredentialOverride>,
    fallback: Option<&Credentials>,
) -> Result<Credentials, ShippingError> {
    if let Some(cfg) = override_cfg {
        let credentials = Credentials::new(
            cfg.account_number.unwrap_or_default(),
            cfg.client_id.unwrap_or_default(),
            cfg.client_secret.unwrap_or_default(),
        );
        credentials.validate()?;
        return Ok(credentials);
    }

    match fallback {
        Some(credentials) => {
            credentials.validate()?;
            Ok(credentials.clone())
        }
        None => Err(ShippingError::configuration(
            "no carrier credentials: none in the request and none configured via FEDEX_* env",
            "Carrier credentials are not configured.",
        )),
    }
}

/// Maps a pipeline error to the externally visible envelope and status.
fn error_response(err: &ShippingError, ctx: &RequestContext) -> Response {
    tracing::error!(
        request_id = %ctx.request_id(),
        kind = ?err.kind,
        message = %err.message,
        "quote failed"
    );
    let status = StatusCode::from_u16(err.kind.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: err.user_message.clone(),
            request_id: ctx.request_id().to_string(),
            error_type: Some(err.kind),
        }),
    )
        .into_response()
}
