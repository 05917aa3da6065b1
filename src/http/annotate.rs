//! Annotation resources.
//!
//! # Data Flow
//! ```text
//! GET query / POST form
//!     → AnnotateParams (raw strings)
//!     → validate thresholds, resolve spotter and disambiguator by name
//!     → tokenize → spot → disambiguate → filter
//!     → JSON with namespace-prefixed resource URIs
//! ```

use std::time::Instant;

use axum::extract::{Form, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::filter::{apply_thresholds, Thresholds};
use crate::http::server::AppState;
use crate::lifecycle::ServiceContext;
use crate::observability::metrics;
use crate::policy::InputError;
use crate::strategy::SurfaceFormOccurrence;

const DEFAULT_POLICY: &str = "Default";

/// Parameters accepted by both resources.
///
/// Numbers arrive as strings so malformed values produce the same error
/// messages as out-of-range ones.
#[derive(Debug, Default, Deserialize)]
pub struct AnnotateParams {
    pub text: Option<String>,
    pub confidence: Option<String>,
    pub support: Option<String>,
    pub spotter: Option<String>,
    pub disambiguator: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAnnotation {
    pub uri: String,
    pub support: u32,
    pub surface_form: String,
    pub offset: usize,
    pub similarity_score: f64,
    pub percentage_of_second_rank: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationResponse {
    pub text: String,
    pub confidence: f64,
    pub support: u32,
    pub spotter: String,
    pub disambiguator: String,
    pub resources: Vec<ResourceAnnotation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotResponse {
    pub text: String,
    pub spotter: String,
    pub surface_forms: Vec<SurfaceFormOccurrence>,
}

pub async fn annotate_get(
    State(state): State<AppState>,
    Query(params): Query<AnnotateParams>,
) -> Result<Json<AnnotationResponse>, InputError> {
    annotate(&state, params)
}

pub async fn annotate_post(
    State(state): State<AppState>,
    Form(params): Form<AnnotateParams>,
) -> Result<Json<AnnotationResponse>, InputError> {
    annotate(&state, params)
}

pub async fn spot_get(
    State(state): State<AppState>,
    Query(params): Query<AnnotateParams>,
) -> Result<Json<SpotResponse>, InputError> {
    spot(&state, params)
}

pub async fn spot_post(
    State(state): State<AppState>,
    Form(params): Form<AnnotateParams>,
) -> Result<Json<SpotResponse>, InputError> {
    spot(&state, params)
}

fn annotate(
    state: &AppState,
    params: AnnotateParams,
) -> Result<Json<AnnotationResponse>, InputError> {
    let start = Instant::now();
    let result = annotate_text(&state.context, params);
    metrics::record_request("annotate", status_of(&result), start);
    result.map(Json)
}

fn spot(state: &AppState, params: AnnotateParams) -> Result<Json<SpotResponse>, InputError> {
    let start = Instant::now();
    let result = spot_text(&state.context, params);
    metrics::record_request("spot", status_of(&result), start);
    result.map(Json)
}

fn status_of<T>(result: &Result<T, InputError>) -> u16 {
    if result.is_ok() {
        200
    } else {
        400
    }
}

/// Spot, disambiguate and filter `params.text`.
pub fn annotate_text(
    context: &ServiceContext,
    params: AnnotateParams,
) -> Result<AnnotationResponse, InputError> {
    let text = params.text.ok_or(InputError::MissingParameter("text"))?;
    let thresholds = Thresholds {
        confidence: parse_confidence(params.confidence.as_deref())?,
        support: parse_support(params.support.as_deref())?,
    };
    let spotter_name = params.spotter.unwrap_or_else(|| DEFAULT_POLICY.to_string());
    let disambiguator_name = params
        .disambiguator
        .unwrap_or_else(|| DEFAULT_POLICY.to_string());

    let spotter = context.resolve_spotter(&spotter_name)?;
    let disambiguator = context.resolve_disambiguator(&disambiguator_name)?;

    let tokens = context.tokenize(&text);
    let occurrences = spotter.extract(&text, &tokens);
    let disambiguated = disambiguator.disambiguate(&tokens, &occurrences);
    let kept = match context.combined_filters() {
        Some(filters) => filters.filter(disambiguated, &thresholds),
        None => apply_thresholds(disambiguated, &thresholds),
    };

    tracing::debug!(
        spotter = %spotter_name,
        disambiguator = %disambiguator_name,
        spotted = occurrences.len(),
        annotated = kept.len(),
        "Text annotated"
    );

    let resources = kept
        .into_iter()
        .map(|o| ResourceAnnotation {
            uri: context.prefixed_uri(&o.resource),
            support: o.support,
            surface_form: o.surface_form,
            offset: o.offset,
            similarity_score: o.similarity_score,
            percentage_of_second_rank: o.percentage_of_second_rank,
        })
        .collect();

    Ok(AnnotationResponse {
        text,
        confidence: thresholds.confidence,
        support: thresholds.support,
        spotter: spotter_name,
        disambiguator: disambiguator_name,
        resources,
    })
}

/// Spot `params.text` without disambiguating.
pub fn spot_text(
    context: &ServiceContext,
    params: AnnotateParams,
) -> Result<SpotResponse, InputError> {
    let text = params.text.ok_or(InputError::MissingParameter("text"))?;
    let spotter_name = params.spotter.unwrap_or_else(|| DEFAULT_POLICY.to_string());
    let spotter = context.resolve_spotter(&spotter_name)?;

    let tokens = context.tokenize(&text);
    let surface_forms = spotter.extract(&text, &tokens);

    Ok(SpotResponse {
        text,
        spotter: spotter_name,
        surface_forms,
    })
}

fn parse_confidence(raw: Option<&str>) -> Result<f64, InputError> {
    let Some(raw) = raw else {
        return Ok(0.0);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(value),
        _ => Err(InputError::OutOfRange {
            parameter: "confidence",
            value: raw.to_string(),
            expected: "a number between 0.0 and 1.0",
        }),
    }
}

fn parse_support(raw: Option<&str>) -> Result<u32, InputError> {
    let Some(raw) = raw else {
        return Ok(0);
    };
    raw.trim()
        .parse::<u32>()
        .map_err(|_| InputError::OutOfRange {
            parameter: "support",
            value: raw.to_string(),
            expected: "a non-negative integer",
        })
}
