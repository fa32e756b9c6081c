//! Turns a raw batch response into a [`Profile`].
//!
//! The batch endpoint answers with one JSON array whose elements correspond,
//! by position, to the sub-requests of the template that was sent:
//!
//! ```json
//! [
//!   {"code": 200, "headers": [...], "body": "{\"id\": \"100001\", ...}"},
//!   {"code": 400, "headers": [...], "body": "{\"error\": {...}}"},
//!   null
//! ]
//! ```
//!
//! Each element succeeds or fails on its own. A failed element only leaves
//! its slot empty and adds a [`Diagnostic`]; the rest of the array is still
//! reconciled. The only fatal case is a response that is not an array at all.

use crate::catalog::{BatchTemplate, Slot, SlotKind};
use crate::errors::{GraphError, Result};
use crate::metrics_defs::{SLOT_FAILED, SLOT_POPULATED};
use crate::profile::{Diagnostic, DiagnosticKind, Profile};
use http::StatusCode;
use serde_json::{Map, Value};

/// Longest payload excerpt written to the log for a decode failure.
const LOG_PAYLOAD_LIMIT: usize = 512;

/// Reconciles `raw` against the template it was requested with.
///
/// Never fails because of an individual element. Returns
/// [`GraphError::MalformedBatch`] when `raw` is not a JSON array.
pub fn reconcile(template: &BatchTemplate, raw: &[u8]) -> Result<Profile> {
    let elements: Vec<Value> = serde_json::from_slice(raw).map_err(|e| {
        tracing::error!(error = %e, "batch response is not a JSON array");
        GraphError::MalformedBatch(e)
    })?;

    if elements.len() < template.len() {
        tracing::warn!(
            received = elements.len(),
            expected = template.len(),
            "batch response is shorter than its template"
        );
    }

    let mut profile = Profile::new();

    for (position, element) in elements.iter().enumerate() {
        let Some(slot) = template.slot(position) else {
            tracing::debug!(position, "ignoring sub-response beyond the template");
            continue;
        };

        match check_name(slot, element).and_then(|()| apply(slot.kind, element, &mut profile)) {
            Ok(true) => {
                shared::counter!(SLOT_POPULATED, "slot" => slot.kind.label()).increment(1);
            }
            Ok(false) => {}
            Err(kind) => record(&mut profile, position, slot.kind, kind),
        }
    }

    if let Some(id) = profile.me.as_ref().and_then(|me| me.id.clone()) {
        profile.id = id;
    }

    Ok(profile)
}

/// Rejects an element that echoes a `name` other than its slot's.
///
/// Elements are correlated by position only. An echoed name that disagrees
/// means the array is out of step with the template, so the element is not
/// decoded against a schema it may not match.
fn check_name(slot: &Slot, element: &Value) -> std::result::Result<(), DiagnosticKind> {
    let Some(found) = element.get("name").and_then(Value::as_str) else {
        return Ok(());
    };
    if slot.request.name.as_deref() == Some(found) {
        return Ok(());
    }
    Err(DiagnosticKind::NameMismatch {
        expected: slot.request.name.clone(),
        found: found.to_string(),
    })
}

/// Decodes a single element into `profile`.
///
/// Returns whether a slot was filled, or why the element was skipped.
fn apply(
    kind: SlotKind,
    element: &Value,
    profile: &mut Profile,
) -> std::result::Result<bool, DiagnosticKind> {
    let object = element.as_object().ok_or(DiagnosticKind::NotAnObject)?;

    let code = status_code(object);
    if code != Some(StatusCode::OK.as_u16()) {
        return Err(DiagnosticKind::Status { code });
    }

    let body = object
        .get("body")
        .and_then(Value::as_str)
        .ok_or(DiagnosticKind::MissingBody)?;

    kind.decode_into(body, profile)
        .map_err(|e| DiagnosticKind::Decode {
            error: e.to_string(),
            payload: body.to_string(),
        })
}

/// Reads `code` as an HTTP status, accepting integral floats.
fn status_code(object: &Map<String, Value>) -> Option<u16> {
    let code = object.get("code")?;
    let code = match code.as_u64() {
        Some(code) => code,
        None => {
            let float = code.as_f64()?;
            if float.fract() != 0.0 || float < 0.0 {
                return None;
            }
            float as u64
        }
    };
    u16::try_from(code).ok()
}

fn record(profile: &mut Profile, position: usize, slot: SlotKind, kind: DiagnosticKind) {
    // Reference positions only feed ids to later sub-requests. Their failure
    // shows up on the dependent position, so it is not reported twice.
    let silent = slot.is_reference()
        && matches!(
            kind,
            DiagnosticKind::Status { .. } | DiagnosticKind::NotAnObject
        );
    if silent {
        tracing::debug!(position, ?kind, "reference sub-request failed");
        return;
    }

    let diagnostic = Diagnostic {
        position,
        slot: slot.label(),
        kind,
    };

    match &diagnostic.kind {
        DiagnosticKind::Decode { error, payload } => {
            tracing::error!(
                position,
                slot = diagnostic.slot,
                error = %error,
                payload = %excerpt(payload),
                "could not decode sub-response"
            );
        }
        _ => {
            tracing::warn!(position, slot = diagnostic.slot, "{diagnostic}");
        }
    }

    shared::counter!(
        SLOT_FAILED,
        "slot" => diagnostic.slot,
        "reason" => diagnostic.kind.reason()
    )
    .increment(1);

    profile.diagnostics.push(diagnostic);
}

fn excerpt(payload: &str) -> &str {
    match payload.char_indices().nth(LOG_PAYLOAD_LIMIT) {
        Some((end, _)) => &payload[..end],
        None => payload,
    }
}
