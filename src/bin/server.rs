//! REST API server for input masks and field validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! fieldmask-server
//!
//! # With custom port
//! fieldmask-server --port 8080
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;

use axum::{
    extract::Query,
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use fieldmask::detect::{detect_brand, matching_brands};
use fieldmask::{
    apply_mask_with, luhn_checksum, validate_field, EditIntent, FormValidator, FormatId,
    MaskOptions, ValidationContext, ValidationOutcome,
};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Field Mask API",
        version = "0.1.0",
        description = "Keystroke-level input masks and declarative field validation rules. No auth or rate limiting.",
        license(name = "MIT"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Masking", description = "Incremental input masks"),
        (name = "Validation", description = "Rule-list validation of single fields and whole forms"),
        (name = "Detection", description = "Card brand detection"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        mask_handler,
        validate_handler,
        validate_form_handler,
        detect_handler,
        health,
    ),
    components(schemas(
        MaskRequest,
        MaskResponse,
        ValidateRequest,
        ValidateResponse,
        FormFieldRequest,
        FormRequest,
        FormResponse,
        DetectQuery,
        DetectResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"format": "date", "value": "2512", "deleting": false}))]
struct MaskRequest {
    /// Format identifier: phone, date, daterange, monthyear, monthyearrange,
    /// shortmonthyear, shortmonthyearrange, time, shorttime, minutesecond,
    /// cpf, cnpj, cpfcnpj, cep, creditcard, number, latitude, longitude, uuid
    format: String,
    /// Current field content
    value: String,
    /// True when the keystroke removed characters
    #[serde(default)]
    deleting: bool,
    /// Decimals kept by the coordinate masks
    #[serde(skip_serializing_if = "Option::is_none")]
    precision: Option<usize>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({"value": "25/12/", "max_length": 10, "is_complete": false}))]
struct MaskResponse {
    /// Reformatted value to write back into the field
    value: String,
    /// Maximum length the field should accept
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<usize>,
    /// Whether the value has the complete shape of its format
    is_complete: bool,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"value": "4532 0151 1283 0366", "rules": "required creditcard"}))]
struct ValidateRequest {
    /// Field content
    value: String,
    /// Whitespace-separated rule list
    rules: String,
    /// Other field values, for `eq` rules
    #[serde(default)]
    fields: HashMap<String, String>,
    /// Date used by `today` bounds and age rules (YYYY-MM-DD). Defaults to the server date.
    #[serde(default)]
    today: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({"valid": true, "annotations": {"cardbrand": "visa"}}))]
struct ValidateResponse {
    /// Whether every rule passed
    valid: bool,
    /// Keyword of the first failing rule
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_rule: Option<String>,
    /// Facts learned while validating (cardbrand, documenttype)
    annotations: BTreeMap<String, String>,
}

impl From<ValidationOutcome> for ValidateResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        Self {
            valid: outcome.valid,
            failed_rule: outcome.failed_rule,
            annotations: outcome.annotations,
        }
    }
}

#[derive(Deserialize, ToSchema)]
struct FormFieldRequest {
    /// Field name
    name: String,
    /// Field content; missing means empty
    #[serde(default)]
    value: String,
    /// Whitespace-separated rule list
    rules: String,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"fields": [
    {"name": "password", "value": "Abc123!", "rules": "required password strong"},
    {"name": "confirm", "value": "Abc123!", "rules": "required eq password"}
]}))]
struct FormRequest {
    /// Fields in validation order
    fields: Vec<FormFieldRequest>,
    /// Date used by `today` bounds and age rules (YYYY-MM-DD)
    #[serde(default)]
    today: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct FormResponse {
    /// Whether every field passed
    valid: bool,
    /// First invalid field
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_field: Option<String>,
    /// Per-field results, up to the first invalid field
    fields: BTreeMap<String, ValidateResponse>,
}

#[derive(Deserialize, ToSchema, IntoParams)]
struct DetectQuery {
    /// Card number
    card: String,
}

#[derive(Serialize, ToSchema)]
struct DetectResponse {
    /// Detected brand class (`visa`, `elo`, ...)
    brand: Option<String>,
    /// Display name of the brand
    display_name: Option<String>,
    /// Every matching brand class, in detection order
    matches: Vec<String>,
    /// Whether the number passes the Luhn check
    luhn: bool,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

type ApiError = (StatusCode, String);

// ============================================================================
// Handlers
// ============================================================================

/// Apply an input mask
#[utoipa::path(
    post,
    path = "/mask",
    request_body = MaskRequest,
    responses(
        (status = 200, description = "Masked value", body = MaskResponse),
        (status = 400, description = "Unknown format")
    ),
    tag = "Masking"
)]
async fn mask_handler(Json(req): Json<MaskRequest>) -> Result<Json<MaskResponse>, ApiError> {
    let format: FormatId = req
        .format
        .parse()
        .map_err(|e: fieldmask::MaskError| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut options = MaskOptions::new();
    if let Some(precision) = req.precision {
        options = options.with_precision(precision);
    }

    let out = apply_mask_with(
        format,
        &req.value,
        EditIntent::from_deleting(req.deleting),
        &options,
    );
    Ok(Json(MaskResponse {
        value: out.value,
        max_length: out.max_length,
        is_complete: out.is_complete,
    }))
}

/// Validate a single field
#[utoipa::path(
    post,
    path = "/validate",
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidateResponse),
        (status = 400, description = "Malformed date in `today`")
    ),
    tag = "Validation"
)]
async fn validate_handler(
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let today = parse_today(req.today.as_deref())?;
    let mut ctx = ValidationContext::new().with_fields(&req.fields);
    if let Some(today) = today {
        ctx = ctx.with_today(today);
    }

    Ok(Json(validate_field(&req.value, &req.rules, &ctx).into()))
}

/// Validate a whole form
#[utoipa::path(
    post,
    path = "/validate/form",
    request_body = FormRequest,
    responses(
        (status = 200, description = "Form validation result", body = FormResponse),
        (status = 400, description = "Malformed date in `today`")
    ),
    tag = "Validation"
)]
async fn validate_form_handler(
    Json(req): Json<FormRequest>,
) -> Result<Json<FormResponse>, ApiError> {
    let today = parse_today(req.today.as_deref())?;

    let mut form = FormValidator::new();
    let mut values = HashMap::new();
    for field in req.fields {
        form = form.field(field.name.clone(), &field.rules);
        values.insert(field.name, field.value);
    }

    let mut ctx = ValidationContext::new();
    if let Some(today) = today {
        ctx = ctx.with_today(today);
    }
    let outcome = form.validate(&values, &ctx);

    Ok(Json(FormResponse {
        valid: outcome.valid,
        invalid_field: outcome.invalid_field,
        fields: outcome
            .fields
            .into_iter()
            .map(|(name, result)| (name, result.into()))
            .collect(),
    }))
}

/// Detect card brand from number
#[utoipa::path(
    get,
    path = "/detect",
    params(DetectQuery),
    responses(
        (status = 200, description = "Detected brand", body = DetectResponse)
    ),
    tag = "Detection"
)]
async fn detect_handler(Query(query): Query<DetectQuery>) -> Json<DetectResponse> {
    let brand = detect_brand(&query.card);
    Json(DetectResponse {
        brand: brand.map(|b| b.name().to_string()),
        display_name: brand.map(|b| b.display_name().to_string()),
        matches: matching_brands(&query.card)
            .into_iter()
            .map(|b| b.name().to_string())
            .collect(),
        luhn: luhn_checksum(&query.card),
    })
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_today(today: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    today
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid date '{}': {}", s, e)))
        })
        .transpose()
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse args
    let port: u16 = std::env::args()
        .skip_while(|a| a != "--port")
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    // Build router with Swagger UI
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/mask", post(mask_handler))
        .route("/validate", post(validate_handler))
        .route("/validate/form", post(validate_form_handler))
        .route("/detect", get(detect_handler))
        .route("/health", get(health))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}:{}/swagger-ui/", "localhost", port);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%e, "failed to bind {}", addr);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(%e, "server stopped");
        std::process::exit(1);
    }
}
