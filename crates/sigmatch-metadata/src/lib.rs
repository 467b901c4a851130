//! Declarative data model for command signatures.
//!
//! Signatures are usually declared in JSON (see the `sigmatch` CLI manifest)
//! and converted into validated [`sigmatch::Signature`] values here. The
//! conversion is the only place where the "options shape" of a declaration
//! is checked.

use serde::{Deserialize, Serialize};
use sigmatch::{Arity, Parameter, Signature, SignatureError, SignatureResult, ValueType};
use thiserror::Error;

fn default_types() -> Vec<ValueType> {
    vec![ValueType::String]
}

fn is_default_types(types: &[ValueType]) -> bool {
    types == [ValueType::String]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParameterSpec {
    pub name: String,
    #[serde(
        rename = "type",
        default = "default_types",
        skip_serializing_if = "is_default_types"
    )]
    pub types: Vec<ValueType>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub variadic: bool,
}

impl ParameterSpec {
    pub fn arity(&self) -> Arity {
        match (self.optional, self.variadic) {
            (false, false) => Arity::Required,
            (true, false) => Arity::Optional,
            (false, true) => Arity::VariadicRequired,
            (true, true) => Arity::VariadicOptional,
        }
    }

    pub fn to_parameter(&self) -> Parameter {
        Parameter::new(self.name.clone(), self.types.iter().copied())
            .description(&self.description)
            .with_arity(self.arity())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SignatureSpec {
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSpec>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Whether `value` has the shape of a signature declaration (a JSON object).
pub fn is_options_object_valid(value: &serde_json::Value) -> bool {
    value.is_object()
}

impl SignatureSpec {
    /// Decode a declaration from an arbitrary JSON value.
    pub fn from_json(value: &serde_json::Value) -> SignatureResult<Self> {
        if !is_options_object_valid(value) {
            return Err(SignatureError::InvalidOptions(format!(
                "expected an object, got {value}"
            )));
        }
        Self::deserialize(value).map_err(|e| SignatureError::InvalidOptions(e.to_string()))
    }

    /// Build the validated signature this declaration describes.
    pub fn build(&self) -> SignatureResult<Signature> {
        let parameters = self.parameters.iter().map(ParameterSpec::to_parameter).collect();
        Signature::new(&self.command, parameters)
    }
}

/// A list of signature declarations, tried in order.
///
/// Entries are kept as raw JSON so each one goes through
/// [`SignatureSpec::from_json`] and its shape check when built.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignatureManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub signatures: Vec<serde_json::Value>,
}

/// A declaration that failed to build, with its position in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("signature #{index}: {error}")]
pub struct ManifestError {
    pub index: usize,
    #[source]
    pub error: SignatureError,
}

impl SignatureManifest {
    pub fn new(specs: &[SignatureSpec]) -> serde_json::Result<Self> {
        let signatures = specs
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(Self {
            schema_version: Some(1),
            signatures,
        })
    }

    /// Build every declared signature, stopping at the first invalid one.
    pub fn build_all(&self) -> Result<Vec<Signature>, ManifestError> {
        self.signatures
            .iter()
            .enumerate()
            .map(|(index, value)| {
                SignatureSpec::from_json(value)
                    .and_then(|spec| spec.build())
                    .map_err(|error| ManifestError { index, error })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parameter_spec_defaults_to_required_string() {
        let spec: ParameterSpec = serde_json::from_value(json!({ "name": "baz" })).unwrap();
        assert_eq!(spec.types, vec![ValueType::String]);
        assert!(!spec.optional);
        assert!(!spec.variadic);
        assert_eq!(spec.to_parameter().to_string(), "<baz>");
    }

    #[test]
    fn signature_spec_builds_signature() {
        let spec = SignatureSpec::from_json(&json!({
            "command": ["foo", "bar"],
            "parameters": [
                { "name": "baz", "type": ["string"], "description": "baz parameter", "optional": true }
            ]
        }))
        .unwrap();
        let signature = spec.build().unwrap();
        assert_eq!(signature.to_string(), "foo bar [baz]");
        assert_eq!(signature.parameters()[0].help(), "baz parameter");
    }

    #[test]
    fn from_json_rejects_non_objects() {
        for value in [json!(null), json!(["foo"]), json!("foo bar"), json!(3)] {
            let err = SignatureSpec::from_json(&value).unwrap_err();
            assert!(matches!(err, SignatureError::InvalidOptions(_)), "{value}");
        }
        let err = SignatureSpec::from_json(&json!({ "parameters": [] })).unwrap_err();
        assert!(matches!(err, SignatureError::InvalidOptions(_)));
    }

    #[test]
    fn build_reports_layout_errors() {
        let spec = SignatureSpec::from_json(&json!({
            "command": ["foo"],
            "parameters": [
                { "name": "rest", "variadic": true },
                { "name": "last", "optional": true }
            ]
        }))
        .unwrap();
        assert_eq!(spec.build().unwrap_err(), SignatureError::ParameterAfterVariadic);
    }

    #[test]
    fn manifest_build_all_reports_failing_index() {
        let manifest: SignatureManifest = serde_json::from_value(json!({
            "schemaVersion": 1,
            "signatures": [
                { "command": ["ok"] },
                { "command": [] }
            ]
        }))
        .unwrap();
        let err = manifest.build_all().unwrap_err();
        assert_eq!(err.index, 1);
        assert!(matches!(err.error, SignatureError::InvalidCommand(_)));
        assert!(err.to_string().starts_with("signature #1: Invalid signature command"));
    }

    #[test]
    fn manifest_round_trips_specs() {
        let specs = vec![SignatureSpec {
            command: vec!["cp".to_string()],
            parameters: vec![ParameterSpec {
                name: "files".to_string(),
                types: vec![ValueType::String],
                description: String::new(),
                optional: false,
                variadic: true,
            }],
            description: "copy files".to_string(),
        }];
        let manifest = SignatureManifest::new(&specs).unwrap();
        assert_eq!(manifest.schema_version, Some(1));
        assert!(manifest.signatures.iter().all(is_options_object_valid));
        assert_eq!(manifest.signatures[0]["description"], "copy files");

        let signatures = manifest.build_all().unwrap();
        assert_eq!(signatures.len(), 1);
        assert_eq!(signatures[0].to_string(), "cp <files...>");
    }

    #[test]
    fn parameter_spec_flags_map_to_arity() {
        let cases = [
            (json!({ "name": "a" }), Arity::Required, "<a>"),
            (json!({ "name": "a", "optional": true }), Arity::Optional, "[a]"),
            (json!({ "name": "a", "variadic": true }), Arity::VariadicRequired, "<a...>"),
            (
                json!({ "name": "a", "optional": true, "variadic": true }),
                Arity::VariadicOptional,
                "[a...]",
            ),
        ];
        for (value, arity, rendered) in cases {
            let spec: ParameterSpec = serde_json::from_value(value).unwrap();
            let parameter = spec.to_parameter();
            assert_eq!(parameter.arity(), arity);
            assert_eq!(parameter.to_string(), rendered);
        }
    }
}
