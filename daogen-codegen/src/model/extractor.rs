//! Interface model extractor: classifies raw methods by query intent

use tracing::trace;

use super::declaration::{RawInterface, RawMarker, RawMethod};
use super::interface::{DaoInterfaceDefinition, DaoMethodDefinition, QueryIntent};

/// Marker requesting a persist method
pub const PERSIST_MARKER: &str = "persist";

/// Marker requesting an ad-hoc query method
pub const QUERY_MARKER: &str = "query";

/// Recognized markers, highest precedence first
pub const RECOGNIZED_MARKERS: [&str; 2] = [PERSIST_MARKER, QUERY_MARKER];

fn precedence(marker: &RawMarker) -> Option<usize> {
    RECOGNIZED_MARKERS.iter().position(|m| *m == marker.name)
}

/// Build the typed interface model from a raw declaration.
///
/// Never fails: methods without a recognized marker are left out, and any
/// recognized markers beyond the highest-precedence one are recorded on the
/// method for the generator to reject.
pub fn extract_interface(raw: &RawInterface) -> DaoInterfaceDefinition {
    let methods = raw
        .methods
        .iter()
        .filter_map(|method| {
            let extracted = extract_method(method);
            if extracted.is_none() {
                trace!(
                    "{}::{} has no recognized marker, ignoring",
                    raw.name,
                    method.name
                );
            }
            extracted
        })
        .collect();

    DaoInterfaceDefinition {
        name: raw.name.clone(),
        namespace: raw.namespace.clone(),
        methods,
    }
}

/// Names of methods that carry no recognized marker
pub fn ignored_methods(raw: &RawInterface) -> Vec<&str> {
    raw.methods
        .iter()
        .filter(|m| !m.markers.iter().any(|marker| precedence(marker).is_some()))
        .map(|m| m.name.as_str())
        .collect()
}

fn extract_method(method: &RawMethod) -> Option<DaoMethodDefinition> {
    let mut recognized: Vec<(usize, &RawMarker)> = method
        .markers
        .iter()
        .filter_map(|marker| precedence(marker).map(|p| (p, marker)))
        .collect();
    // stable: equal markers keep declaration order
    recognized.sort_by_key(|(p, _)| *p);

    let mut recognized = recognized.into_iter().map(|(_, marker)| marker);
    let primary = recognized.next()?;
    let conflicting_markers = recognized.map(|m| m.name.clone()).collect();

    Some(DaoMethodDefinition {
        name: method.name.clone(),
        parameters: method.parameters.clone(),
        return_type: method.return_type.clone(),
        intent: intent_from_marker(primary),
        conflicting_markers,
    })
}

fn intent_from_marker(marker: &RawMarker) -> QueryIntent {
    if marker.name == PERSIST_MARKER {
        QueryIntent::Persist {
            entity: marker.argument("entity").map(str::to_string),
        }
    } else {
        QueryIntent::AdHocQuery {
            query_text: marker.argument("text").unwrap_or_default().to_string(),
            result_shape: marker.argument("result").map(str::to_string),
        }
    }
}
