//! WASM entry points for the browser wizard.
//!
//! Every function takes JSON strings and returns a DTO tagged by `status`.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::catalog::FieldDescriptor;
use crate::config::{ConfigAction, IntegrationConfig, IntegrationSubmission};
use crate::discover::{self, DiscoveryOptions, DiscoveryReport};
use crate::error::MapperError;
use crate::mapping::{self, FieldMapping, GenerateOptions, MappingPreview, Transform};
use crate::schema::{self, SelectOption, TargetField, TargetSchema};
use crate::{parse, template};

/// Discover the field catalog of one `{ event, call }` payload.
#[wasm_bindgen]
pub fn discover_fields(payload_json: &str) -> JsValue {
    to_js(&discover_fields_inner(payload_json))
}

fn discover_fields_inner(payload_json: &str) -> Reply<Vec<FieldDescriptor>> {
    match parse::parse_event(payload_json) {
        Ok(event) => Reply::Success(discover::discover(&event)),
        Err(errors) => Reply::errors(errors),
    }
}

/// Discover over a recent-calls response. `options_json` may be empty for defaults.
#[wasm_bindgen]
pub fn discover_recent_calls(calls_json: &str, options_json: &str) -> JsValue {
    to_js(&discover_recent_calls_inner(calls_json, options_json))
}

fn discover_recent_calls_inner(calls_json: &str, options_json: &str) -> Reply<DiscoveryReport> {
    let options = match optional_json::<DiscoveryOptions>(options_json, "discovery options") {
        Ok(o) => o.unwrap_or_default(),
        Err(e) => return Reply::errors(vec![e]),
    };
    match parse::parse_recent_calls(calls_json) {
        Ok(events) => Reply::Success(discover::discover_recent(&events, &options)),
        Err(errors) => Reply::errors(errors),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    catalog: Vec<FieldDescriptor>,
    schema: TargetSchema,
    #[serde(default)]
    existing: Vec<FieldMapping>,
    #[serde(default)]
    force: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateDto {
    outcome: &'static str,
    mappings: Vec<FieldMapping>,
}

/// Run the mapping generator. Request: `{ catalog, schema, existing?, force? }`.
#[wasm_bindgen]
pub fn generate_mappings(request_json: &str) -> JsValue {
    to_js(&generate_mappings_inner(request_json))
}

fn generate_mappings_inner(request_json: &str) -> Reply<GenerateDto> {
    let request = match required_json::<GenerateRequest>(request_json, "generate request") {
        Ok(r) => r,
        Err(e) => return Reply::errors(vec![e]),
    };
    let outcome = mapping::generate_mappings(
        request.existing,
        &request.catalog,
        &request.schema,
        GenerateOptions { force: request.force },
    );
    Reply::Success(GenerateDto {
        outcome: outcome.status(),
        mappings: outcome.into_mappings(),
    })
}

/// The target-field catalog for a schema.
#[wasm_bindgen]
pub fn target_fields(schema_json: &str) -> JsValue {
    to_js(&target_fields_inner(schema_json))
}

fn target_fields_inner(schema_json: &str) -> Reply<Vec<TargetField>> {
    match schema::parse_schema(schema_json) {
        Ok(s) => Reply::Success(schema::target_fields(&s)),
        Err(errors) => Reply::errors(errors),
    }
}

/// Options for a two-level target. With an empty `level1` this lists level-1
/// choices; otherwise the level-2 choices under `level1`.
#[wasm_bindgen]
pub fn level_options(target_id: &str, schema_json: &str, level1: &str) -> JsValue {
    to_js(&level_options_inner(target_id, schema_json, level1))
}

fn level_options_inner(target_id: &str, schema_json: &str, level1: &str) -> Reply<Vec<SelectOption>> {
    let Some(kind) = schema::two_level_kind(target_id) else {
        return Reply::errors(vec![MapperError::map(
            "M003",
            format!("Target '{}' is not a two-level field", target_id),
            Some(target_id.to_string()),
        )]);
    };
    let target_schema = match schema::parse_schema(schema_json) {
        Ok(s) => s,
        Err(errors) => return Reply::errors(errors),
    };
    if level1.trim().is_empty() {
        Reply::Success(schema::level1_options(kind, &target_schema))
    } else {
        Reply::Success(schema::level2_options(kind, &target_schema, Some(level1)))
    }
}

/// Advisory transform for a source descriptor and target id; `null` when none applies.
#[wasm_bindgen]
pub fn suggest_transform(source_json: &str, target_id: &str) -> JsValue {
    to_js(&suggest_transform_inner(source_json, target_id))
}

fn suggest_transform_inner(source_json: &str, target_id: &str) -> Reply<Option<Transform>> {
    match required_json::<FieldDescriptor>(source_json, "field descriptor") {
        Ok(source) => Reply::Success(mapping::suggest_transform(&source, target_id)),
        Err(e) => Reply::errors(vec![e]),
    }
}

#[derive(Deserialize)]
struct ValidateRequest {
    mappings: Vec<FieldMapping>,
    catalog: Vec<FieldDescriptor>,
    schema: TargetSchema,
}

/// Validate mappings. Request: `{ mappings, catalog, schema }`.
/// Returns `success` with an empty list, or `errors` with every finding.
#[wasm_bindgen]
pub fn validate_mappings(request_json: &str) -> JsValue {
    to_js(&validate_mappings_inner(request_json))
}

fn validate_mappings_inner(request_json: &str) -> Reply<Vec<MapperError>> {
    let request = match required_json::<ValidateRequest>(request_json, "validate request") {
        Ok(r) => r,
        Err(e) => return Reply::errors(vec![e]),
    };
    let findings = mapping::validate_mappings(&request.mappings, &request.catalog, &request.schema);
    if findings.is_empty() {
        Reply::Success(findings)
    } else {
        Reply::errors(findings)
    }
}

/// Preview mapping values against a sample payload.
#[wasm_bindgen]
pub fn preview_mappings(mappings_json: &str, payload_json: &str) -> JsValue {
    to_js(&preview_mappings_inner(mappings_json, payload_json))
}

fn preview_mappings_inner(mappings_json: &str, payload_json: &str) -> Reply<Vec<MappingPreview>> {
    let mappings = match required_json::<Vec<FieldMapping>>(mappings_json, "mappings") {
        Ok(m) => m,
        Err(e) => return Reply::errors(vec![e]),
    };
    match parse::parse_event(payload_json) {
        Ok(event) => Reply::Success(mapping::preview_mappings(&mappings, &event)),
        Err(errors) => Reply::errors(errors),
    }
}

/// Apply one reducer action to a config document and return the next document.
#[wasm_bindgen]
pub fn reduce_config(config_json: &str, action_json: &str) -> JsValue {
    to_js(&reduce_config_inner(config_json, action_json))
}

fn reduce_config_inner(config_json: &str, action_json: &str) -> Reply<IntegrationConfig> {
    let config = if config_json.trim().is_empty() {
        IntegrationConfig::default()
    } else {
        match IntegrationConfig::from_json(config_json) {
            Ok(c) => c,
            Err(e) => return Reply::errors(vec![MapperError::config("C000", e.to_string())]),
        }
    };
    let action = match required_json::<ConfigAction>(action_json, "config action") {
        Ok(a) => a,
        Err(e) => return Reply::errors(vec![e]),
    };
    match config.reduce(action) {
        Ok(next) => Reply::Success(next),
        Err(e) => Reply::errors(vec![MapperError::config("C000", e.to_string())]),
    }
}

/// Readiness findings, or the backend submission document when ready.
#[wasm_bindgen]
pub fn submit_config(config_json: &str) -> JsValue {
    to_js(&submit_config_inner(config_json))
}

fn submit_config_inner(config_json: &str) -> Reply<IntegrationSubmission> {
    let config = match IntegrationConfig::from_json(config_json) {
        Ok(c) => c,
        Err(e) => return Reply::errors(vec![MapperError::config("C000", e.to_string())]),
    };
    let findings = config.readiness();
    if !findings.is_empty() {
        return Reply::errors(findings);
    }
    Reply::Success(config.to_submission())
}

/// Render a `{{call.*}}` template against a sample payload.
#[wasm_bindgen]
pub fn render_template(template_text: &str, payload_json: &str) -> JsValue {
    to_js(&render_template_inner(template_text, payload_json))
}

fn render_template_inner(template_text: &str, payload_json: &str) -> Reply<String> {
    match parse::parse_event(payload_json) {
        Ok(event) => Reply::Success(template::render(template_text, &event)),
        Err(errors) => Reply::errors(errors),
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: String,
    stage: String,
    message: String,
    field_id: Option<String>,
}

impl From<MapperError> for ErrorDto {
    fn from(e: MapperError) -> Self {
        ErrorDto {
            code: e.code,
            stage: e.stage.to_string(),
            message: e.message,
            field_id: e.field_id,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", content = "data")]
enum Reply<T> {
    #[serde(rename = "success")]
    Success(T),
    #[serde(rename = "errors")]
    Errors(Vec<ErrorDto>),
}

impl<T> Reply<T> {
    fn errors(errors: Vec<MapperError>) -> Self {
        Reply::Errors(errors.into_iter().map(ErrorDto::from).collect())
    }
}

fn to_js<T: Serialize>(reply: &Reply<T>) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    reply.serialize(&serializer).unwrap_or(JsValue::NULL)
}

fn required_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, MapperError> {
    serde_json::from_str(json)
        .map_err(|e| MapperError::parse("P001", format!("Failed to parse {} JSON: {}", what, e)))
}

fn optional_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<Option<T>, MapperError> {
    if json.trim().is_empty() {
        return Ok(None);
    }
    required_json(json, what).map(Some)
}
