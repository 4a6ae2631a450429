//! Canonical patch model and the normalization pass
//!
//! `normalize` expands definition references and the two knob encodings into
//! one canonical representation. Definitions act as read-only templates; every
//! instance field overrides the corresponding definition field when present
//! (field-level override, never whole-object replacement).

use std::collections::BTreeMap;

use crate::config::raw::{
    KnobOverride, KnobSpec, Offset, RawConnection, RawDefinition, RawKnobs, RawModule, RawPatch,
};
use crate::error::ValidationError;
use crate::renderer::OptionOverrides;

/// A resolved module template
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub kind: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub knobs: Vec<KnobSpec>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// One concrete placed module with all defaults resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub kind: String,
    /// Top-left offset of the module within the patch
    pub position: Offset,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub knobs: Vec<KnobSpec>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// A validated connection between two `"<module>:<port>"` endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub color: String,
}

/// The canonical configuration consumed by the layout pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Patch {
    pub title: Option<String>,
    pub definitions: BTreeMap<String, Definition>,
    pub modules: Vec<Module>,
    pub connections: Vec<Connection>,
    pub options: Option<OptionOverrides>,
}

const DEFAULT_CONNECTION_COLOR: &str = "#333";

/// Normalize a raw configuration into the canonical model.
///
/// Fails with [`ValidationError`] when required structure is absent: a missing
/// `modules` sequence, a module without a `name`, or a connection without both
/// endpoints. Error variants carry the offending index where applicable.
pub fn normalize(raw: RawPatch) -> Result<Patch, ValidationError> {
    let definitions: BTreeMap<String, Definition> = raw
        .definitions
        .into_iter()
        .map(|(key, def)| {
            let resolved = resolve_definition(&key, def);
            (key, resolved)
        })
        .collect();

    let raw_modules = raw.modules.ok_or(ValidationError::MissingModules)?;

    let modules = raw_modules
        .into_iter()
        .enumerate()
        .map(|(index, module)| resolve_module(index, module, &definitions))
        .collect::<Result<Vec<_>, _>>()?;

    let connections = raw
        .connections
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, conn)| resolve_connection(index, conn))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Patch {
        title: raw.title,
        definitions,
        modules,
        connections,
        options: raw.options,
    })
}

fn resolve_definition(key: &str, def: RawDefinition) -> Definition {
    Definition {
        kind: def.kind.unwrap_or_else(|| key.to_string()),
        inputs: def.inputs,
        outputs: def.outputs,
        knobs: def.knobs,
        width: def.width,
        height: def.height,
    }
}

fn resolve_module(
    index: usize,
    module: RawModule,
    definitions: &BTreeMap<String, Definition>,
) -> Result<Module, ValidationError> {
    let name = module
        .name
        .ok_or_else(|| ValidationError::unnamed_module(index))?;

    let base = module
        .definition
        .as_ref()
        .and_then(|key| definitions.get(key));

    let kind = module
        .kind
        .or_else(|| module.definition.clone())
        .or_else(|| base.map(|d| d.kind.clone()))
        .unwrap_or_else(|| "default".to_string());

    let knobs = resolve_knobs(module.knobs, base);

    Ok(Module {
        name,
        kind,
        position: module.position.unwrap_or_default(),
        inputs: module
            .inputs
            .or_else(|| base.map(|d| d.inputs.clone()))
            .unwrap_or_default(),
        outputs: module
            .outputs
            .or_else(|| base.map(|d| d.outputs.clone()))
            .unwrap_or_default(),
        knobs,
        width: module.width.or_else(|| base.and_then(|d| d.width)),
        height: module.height.or_else(|| base.and_then(|d| d.height)),
    })
}

/// Resolve the instance knob encoding against the definition's knob list.
///
/// A positional list is fully-specified and taken verbatim. A named override
/// map is applied knob-by-knob onto the definition's list: `value`, `position`
/// and `radius` can be overridden, `positions` is always inherited. Map
/// entries naming a knob the definition does not declare are ignored.
fn resolve_knobs(knobs: Option<RawKnobs>, base: Option<&Definition>) -> Vec<KnobSpec> {
    let base_knobs = base.map(|d| d.knobs.as_slice()).unwrap_or_default();

    match knobs {
        None => base_knobs.to_vec(),
        Some(RawKnobs::List(list)) => list,
        Some(RawKnobs::Named(overrides)) => base_knobs
            .iter()
            .map(|knob| apply_override(knob, overrides.get(&knob.name)))
            .collect(),
    }
}

fn apply_override(knob: &KnobSpec, over: Option<&KnobOverride>) -> KnobSpec {
    let mut resolved = knob.clone();
    match over {
        None => {}
        Some(KnobOverride::Value(value)) => resolved.value = *value,
        Some(KnobOverride::Detailed {
            value,
            position,
            radius,
        }) => {
            if let Some(value) = value {
                resolved.value = *value;
            }
            if let Some(position) = position {
                resolved.position = Some(*position);
            }
            if let Some(radius) = radius {
                resolved.radius = Some(*radius);
            }
        }
    }
    resolved
}

fn resolve_connection(index: usize, conn: RawConnection) -> Result<Connection, ValidationError> {
    match (conn.from, conn.to) {
        (Some(from), Some(to)) => Ok(Connection {
            from,
            to,
            color: conn
                .color
                .unwrap_or_else(|| DEFAULT_CONNECTION_COLOR.to_string()),
        }),
        _ => Err(ValidationError::incomplete_connection(index)),
    }
}

impl From<Patch> for RawPatch {
    /// Re-encode a canonical patch in raw form.
    ///
    /// Normalizing the result is a no-op: knobs come back as the verbatim
    /// list encoding and every resolved field is carried explicitly.
    fn from(patch: Patch) -> Self {
        RawPatch {
            title: patch.title,
            definitions: patch
                .definitions
                .into_iter()
                .map(|(key, def)| {
                    (
                        key,
                        RawDefinition {
                            kind: Some(def.kind),
                            inputs: def.inputs,
                            outputs: def.outputs,
                            knobs: def.knobs,
                            width: def.width,
                            height: def.height,
                        },
                    )
                })
                .collect(),
            modules: Some(
                patch
                    .modules
                    .into_iter()
                    .map(|module| RawModule {
                        name: Some(module.name),
                        kind: Some(module.kind),
                        definition: None,
                        position: Some(module.position),
                        inputs: Some(module.inputs),
                        outputs: Some(module.outputs),
                        knobs: Some(RawKnobs::List(module.knobs)),
                        width: module.width,
                        height: module.height,
                    })
                    .collect(),
            ),
            connections: Some(
                patch
                    .connections
                    .into_iter()
                    .map(|conn| RawConnection {
                        from: Some(conn.from),
                        to: Some(conn.to),
                        color: Some(conn.color),
                    })
                    .collect(),
            ),
            options: patch.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: serde_json::Value) -> RawPatch {
        serde_json::from_value(json).expect("fixture should deserialize")
    }

    #[test]
    fn test_missing_modules_is_fatal() {
        let err = normalize(raw(serde_json::json!({}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingModules);
    }

    #[test]
    fn test_unnamed_module_reports_index() {
        let err = normalize(raw(serde_json::json!({
            "modules": [{"name": "Osc"}, {"inputs": ["in"]}]
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::UnnamedModule { index: 1 });
    }

    #[test]
    fn test_incomplete_connection_reports_index() {
        let err = normalize(raw(serde_json::json!({
            "modules": [{"name": "Osc"}],
            "connections": [{"from": "Osc:out"}]
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::IncompleteConnection { index: 0 });
    }

    #[test]
    fn test_definition_type_defaults_to_key() {
        let patch = normalize(raw(serde_json::json!({
            "definitions": {"vco": {"outputs": ["saw"]}},
            "modules": []
        })))
        .unwrap();
        assert_eq!(patch.definitions["vco"].kind, "vco");
        assert_eq!(patch.definitions["vco"].outputs, vec!["saw"]);
    }

    #[test]
    fn test_module_inherits_definition_fields() {
        let patch = normalize(raw(serde_json::json!({
            "definitions": {
                "vco": {
                    "inputs": ["fm"],
                    "outputs": ["saw", "sqr"],
                    "knobs": [{"name": "freq", "value": 0.5}],
                    "width": 140
                }
            },
            "modules": [{"name": "Osc1", "definition": "vco"}]
        })))
        .unwrap();

        let module = &patch.modules[0];
        assert_eq!(module.kind, "vco");
        assert_eq!(module.inputs, vec!["fm"]);
        assert_eq!(module.outputs, vec!["saw", "sqr"]);
        assert_eq!(module.knobs.len(), 1);
        assert_eq!(module.width, Some(140.0));
        assert_eq!(module.height, None);
        assert_eq!(module.position, Offset::default());
    }

    #[test]
    fn test_instance_fields_override_definition() {
        let patch = normalize(raw(serde_json::json!({
            "definitions": {"vco": {"outputs": ["saw"], "width": 140}},
            "modules": [{
                "name": "Osc1",
                "definition": "vco",
                "outputs": ["sine"],
                "width": 90
            }]
        })))
        .unwrap();

        let module = &patch.modules[0];
        assert_eq!(module.outputs, vec!["sine"]);
        assert_eq!(module.width, Some(90.0));
    }

    #[test]
    fn test_unknown_definition_reference_is_ignored() {
        let patch = normalize(raw(serde_json::json!({
            "modules": [{"name": "Osc1", "definition": "nope"}]
        })))
        .unwrap();
        // The reference still names the module's type, but supplies no defaults
        assert_eq!(patch.modules[0].kind, "nope");
        assert!(patch.modules[0].inputs.is_empty());
    }

    #[test]
    fn test_knob_list_encoding_bypasses_definition() {
        let patch = normalize(raw(serde_json::json!({
            "definitions": {"vco": {"knobs": [{"name": "freq"}, {"name": "pw"}]}},
            "modules": [{
                "name": "Osc1",
                "definition": "vco",
                "knobs": [{"name": "detune", "value": 0.1}]
            }]
        })))
        .unwrap();

        let knobs = &patch.modules[0].knobs;
        assert_eq!(knobs.len(), 1);
        assert_eq!(knobs[0].name, "detune");
    }

    #[test]
    fn test_named_overrides_resolve_against_definition() {
        let patch = normalize(raw(serde_json::json!({
            "definitions": {"vcf": {"knobs": [
                {"name": "cutoff", "value": 0.5, "radius": 12,
                 "positions": ["LP", "BP", "HP"]},
                {"name": "res", "value": 0.2}
            ]}},
            "modules": [{
                "name": "Filter",
                "definition": "vcf",
                "knobs": {
                    "cutoff": {"value": 2, "radius": 18},
                    "ghost": 0.9
                }
            }]
        })))
        .unwrap();

        let knobs = &patch.modules[0].knobs;
        assert_eq!(knobs.len(), 2);
        // Overridden fields win; positions is inherited untouched
        assert_eq!(knobs[0].value, 2.0);
        assert_eq!(knobs[0].radius, Some(18.0));
        assert_eq!(
            knobs[0].positions,
            Some(vec!["LP".to_string(), "BP".to_string(), "HP".to_string()])
        );
        // Knob absent from the map keeps its definition defaults
        assert_eq!(knobs[1].value, 0.2);
    }

    #[test]
    fn test_bare_number_override_sets_value_only() {
        let patch = normalize(raw(serde_json::json!({
            "definitions": {"vca": {"knobs": [{"name": "gain", "value": 0.5, "radius": 11}]}},
            "modules": [{"name": "Amp", "definition": "vca", "knobs": {"gain": 0.8}}]
        })))
        .unwrap();

        let knob = &patch.modules[0].knobs[0];
        assert_eq!(knob.value, 0.8);
        assert_eq!(knob.radius, Some(11.0));
    }

    #[test]
    fn test_connection_color_defaults() {
        let patch = normalize(raw(serde_json::json!({
            "modules": [],
            "connections": [{"from": "a:x", "to": "b:y"}]
        })))
        .unwrap();
        assert_eq!(patch.connections[0].color, "#333");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let patch = normalize(raw(serde_json::json!({
            "title": "Demo",
            "definitions": {"vco": {"outputs": ["saw"], "knobs": [{"name": "freq"}]}},
            "modules": [
                {"name": "Osc", "definition": "vco", "knobs": {"freq": 0.7}},
                {"name": "Out", "inputs": ["in"], "position": {"x": 200, "y": 40}}
            ],
            "connections": [{"from": "Osc:saw", "to": "Out:in"}]
        })))
        .unwrap();

        let again = normalize(RawPatch::from(patch.clone())).unwrap();
        assert_eq!(patch, again);
    }
}
