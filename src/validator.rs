//! Structural validation of raw JSON against the schema registry.
//!
//! Validation never stops at the first problem: every schema failure and
//! every cross-field rule violation is collected into one
//! [`ValidationReport`]. Reports are sorted by path and free of duplicates,
//! so validating the same document twice yields the same report.

use crate::error::{Error, Result};
use crate::model::{DocumentKind, EntityType};
use crate::registry::SchemaRegistry;
use jsonschema::JSONSchema;
use jsonschema::error::ValidationErrorKind;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// One step into a JSON document.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Location of a value inside a JSON document, from the root.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    pub fn root() -> Self {
        JsonPath(Vec::new())
    }

    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.into()));
        JsonPath(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        JsonPath(segments)
    }

    /// Path relative to the enclosing array of a multi-document input.
    pub fn within(&self, index: usize) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.push(PathSegment::Index(index));
        segments.extend(self.0.iter().cloned());
        JsonPath(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names along the path, with indices rendered as numbers.
    pub fn to_strings(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|segment| match segment {
                PathSegment::Field(name) => name.clone(),
                PathSegment::Index(index) => index.to_string(),
            })
            .collect()
    }

    /// Resolve a JSON Pointer (`/broader/0/uri`) against `instance` so that
    /// numeric keys of objects stay field names.
    pub fn from_pointer(pointer: &str, instance: &Value) -> Self {
        let mut segments = Vec::new();
        let mut current = Some(instance);
        for raw in pointer.split('/').skip(1) {
            let token = raw.replace("~1", "/").replace("~0", "~");
            let segment = match (current, token.parse::<usize>()) {
                (Some(Value::Array(_)), Ok(index)) => PathSegment::Index(index),
                _ => PathSegment::Field(token),
            };
            current = match (&segment, current) {
                (PathSegment::Index(index), Some(Value::Array(items))) => items.get(*index),
                (PathSegment::Field(name), Some(Value::Object(map))) => map.get(name),
                _ => None,
            };
            segments.push(segment);
        }
        JsonPath(segments)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Field(name)
                    if !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
                {
                    write!(f, ".{name}")?
                }
                PathSegment::Field(name) => write!(f, "[{name:?}]")?,
            }
        }
        Ok(())
    }
}

impl<const N: usize> From<[&str; N]> for JsonPath {
    fn from(fields: [&str; N]) -> Self {
        JsonPath(
            fields
                .into_iter()
                .map(|name| PathSegment::Field(name.to_string()))
                .collect(),
        )
    }
}

/// A single failed constraint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Violation {
    pub path: JsonPath,
    /// The constraint that failed, in words.
    pub expected: String,
    /// Offending value; `None` when the value is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual {
            Some(actual) => write!(f, "{}: expected {}, found {actual}", self.path, self.expected),
            None => write!(f, "{}: expected {}, found nothing", self.path, self.expected),
        }
    }
}

/// Every violation found in one document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationReport {
    pub kind: DocumentKind,
    pub strict: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &JsonPath> {
        self.violations.iter().map(|violation| &violation.path)
    }

    /// Whether some violation sits exactly at `path`.
    pub fn has_path(&self, path: &JsonPath) -> bool {
        self.paths().any(|candidate| candidate == path)
    }

    /// Nest every path under `index`, for documents read from an array.
    pub(crate) fn within(mut self, index: usize) -> Self {
        for violation in &mut self.violations {
            violation.path = violation.path.within(index);
        }
        self
    }

    fn normalize(&mut self) {
        self.violations.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.expected.cmp(&b.expected))
        });
        self.violations
            .dedup_by(|a, b| a.path == b.path && a.expected == b.expected && a.actual == b.actual);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.strict { " (strict)" } else { "" };
        write!(
            f,
            "{} violation(s) of the {} schema{mode}",
            self.violations.len(),
            self.kind
        )?;
        for violation in &self.violations {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

/// Checks documents against a [`SchemaRegistry`].
#[derive(Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r SchemaRegistry,
    strict: bool,
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Validator {
            registry,
            strict: false,
        }
    }

    /// In strict mode fields outside the JSKOS vocabulary are violations.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Determine the entity type of `value`, preferring `hint` when given.
    pub fn resolve_type(&self, value: &Value, hint: Option<EntityType>) -> Result<EntityType> {
        let object = as_document(value)?;
        match hint {
            Some(entity_type) => Ok(entity_type),
            None => self.infer_from_object(object),
        }
    }

    /// Infer the entity type from the `type` discriminator, or failing that
    /// from which entity vocabulary the document's fields belong to.
    pub fn infer_type(&self, value: &Value) -> Result<EntityType> {
        self.infer_from_object(as_document(value)?)
    }

    fn infer_from_object(&self, object: &Map<String, Value>) -> Result<EntityType> {
        if let Some(declared) = object.get("type") {
            let uris: Vec<&str> = match declared {
                Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                Value::String(uri) => vec![uri.as_str()],
                _ => Vec::new(),
            };
            let matched: BTreeSet<EntityType> = uris
                .iter()
                .filter_map(|uri| EntityType::from_type_uri(uri))
                .collect();
            let mut matched = matched.into_iter();
            match (matched.next(), matched.next()) {
                (Some(entity_type), None) => {
                    tracing::debug!(%entity_type, source = "type", "inferred entity type");
                    return Ok(entity_type);
                }
                (Some(first), Some(second)) => {
                    let mut candidates = vec![first, second];
                    candidates.extend(matched);
                    return Err(Error::AmbiguousType { candidates });
                }
                (None, _) => {
                    if let Some(first) = uris.first() {
                        return Err(Error::UnknownEntityType((*first).to_string()));
                    }
                }
            }
        }

        let vocabulary = self.registry.vocabulary();
        let present: Vec<&str> = object
            .keys()
            .map(String::as_str)
            .filter(|key| vocabulary.contains(*key))
            .collect();
        let candidates: Vec<EntityType> = self
            .registry
            .entity_types()
            .filter(|entity_type| {
                let schema = self.registry.schema_for(*entity_type);
                present.iter().all(|key| schema.knows(key))
                    && entity_type
                        .signature_fields()
                        .iter()
                        .any(|field| object.contains_key(*field))
            })
            .collect();
        match candidates.as_slice() {
            [entity_type] => {
                tracing::debug!(entity_type = %entity_type, source = "shape", "inferred entity type");
                Ok(*entity_type)
            }
            _ => Err(Error::AmbiguousType { candidates }),
        }
    }

    /// Collect every violation of `value` against the `entity_type` schema
    /// and the JSKOS rules schemas cannot express.
    pub fn report(&self, value: &Value, entity_type: EntityType) -> ValidationReport {
        let schema = self.registry.schema_for(entity_type);
        let mut violations = Vec::new();
        schema_violations(schema.compiled(self.strict), value, &mut violations);
        check_rules(entity_type, value, &JsonPath::root(), &mut violations);

        let mut report = ValidationReport {
            kind: entity_type.into(),
            strict: self.strict,
            violations,
        };
        report.normalize();
        report
    }

    /// Collect every violation of a KOS wrapper document. Top concepts are
    /// checked with the concept rules at `hasTopConcept[i]`.
    pub fn report_kos(&self, value: &Value) -> Result<ValidationReport> {
        let schema = self.registry.kos_schema()?;
        let mut violations = Vec::new();
        schema_violations(schema.compiled(self.strict), value, &mut violations);
        if let Some(object) = value.as_object() {
            let root = JsonPath::root();
            check_nested(EntityType::Concept, object, &["hasTopConcept"], &root, &mut violations);
        }

        let mut report = ValidationReport {
            kind: DocumentKind::Kos,
            strict: self.strict,
            violations,
        };
        report.normalize();
        Ok(report)
    }

    pub fn validate_kos(&self, value: &Value) -> Result<()> {
        as_document(value)?;
        let report = self.report_kos(value)?;
        if report.is_valid() {
            return Ok(());
        }
        tracing::debug!(
            strict = self.strict,
            violations = report.len(),
            "KOS document failed validation"
        );
        Err(Error::SchemaViolation(report))
    }

    /// Validate `value`, returning the entity type it was checked as.
    pub fn validate(&self, value: &Value, hint: Option<EntityType>) -> Result<EntityType> {
        let entity_type = self.resolve_type(value, hint)?;
        let report = self.report(value, entity_type);
        if report.is_valid() {
            Ok(entity_type)
        } else {
            tracing::debug!(
                %entity_type,
                strict = self.strict,
                violations = report.len(),
                "document failed validation"
            );
            Err(Error::SchemaViolation(report))
        }
    }
}

fn as_document(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        Error::MalformedInput(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(value)
        ))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn schema_violations(compiled: &JSONSchema, value: &Value, out: &mut Vec<Violation>) {
    let Err(errors) = compiled.validate(value) else {
        return;
    };
    for error in errors {
        let path = JsonPath::from_pointer(&error.instance_path.to_string(), value);
        match &error.kind {
            ValidationErrorKind::Required { property } => {
                let field = property
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| property.to_string());
                out.push(Violation {
                    path: path.field(field),
                    expected: "required field".to_string(),
                    actual: None,
                });
            }
            ValidationErrorKind::AdditionalProperties { unexpected } => {
                for key in unexpected {
                    out.push(Violation {
                        path: path.field(key.clone()),
                        expected: "only JSKOS fields (strict mode)".to_string(),
                        actual: error.instance.get(key).cloned(),
                    });
                }
            }
            _ => out.push(Violation {
                path,
                expected: error.to_string(),
                actual: Some(error.instance.clone().into_owned()),
            }),
        }
    }
}

const CONCEPT_LISTS: [&str; 9] = [
    "narrower",
    "broader",
    "related",
    "previous",
    "next",
    "ancestors",
    "memberSet",
    "memberList",
    "memberChoice",
];
const BUNDLE_MEMBERS: [&str; 3] = ["memberSet", "memberList", "memberChoice"];

fn check_rules(entity_type: EntityType, value: &Value, path: &JsonPath, out: &mut Vec<Violation>) {
    let Some(object) = value.as_object() else {
        return;
    };
    match entity_type {
        EntityType::Concept => check_concept(object, path, out),
        EntityType::ConceptScheme => check_scheme(object, path, out),
        EntityType::Mapping => check_mapping(object, path, out),
        EntityType::Registry => check_registry(object, path, out),
        EntityType::Concordance => check_concordance(object, path, out),
    }
}

fn members<'a>(object: &'a Map<String, Value>, field: &str) -> impl Iterator<Item = (usize, &'a Value)> {
    object
        .get(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .enumerate()
        .filter(|(_, member)| member.is_object())
}

fn check_nested(
    entity_type: EntityType,
    object: &Map<String, Value>,
    fields: &[&str],
    path: &JsonPath,
    out: &mut Vec<Violation>,
) {
    for field in fields {
        if let Some(nested) = object.get(*field).filter(|nested| nested.is_object()) {
            check_rules(entity_type, nested, &path.field(*field), out);
            continue;
        }
        for (index, member) in members(object, field) {
            check_rules(entity_type, member, &path.field(*field).index(index), out);
        }
    }
}

fn check_concept(object: &Map<String, Value>, path: &JsonPath, out: &mut Vec<Violation>) {
    if let Some(own) = object.get("uri").and_then(Value::as_str) {
        for field in ["broader", "narrower"] {
            for (index, member) in members(object, field) {
                if member.get("uri").and_then(Value::as_str) == Some(own) {
                    out.push(Violation {
                        path: path.field(field).index(index),
                        expected: format!("{field} concept other than the concept itself"),
                        actual: Some(member.clone()),
                    });
                }
            }
        }
    }
    check_nested(EntityType::Concept, object, &CONCEPT_LISTS, path, out);
    check_nested(EntityType::ConceptScheme, object, &["inScheme", "topConceptOf"], path, out);
    check_nested(EntityType::Mapping, object, &["mappings"], path, out);
}

fn check_scheme(object: &Map<String, Value>, path: &JsonPath, out: &mut Vec<Violation>) {
    check_nested(EntityType::Concept, object, &["topConcepts", "concepts", "types"], path, out);
}

fn check_mapping(object: &Map<String, Value>, path: &JsonPath, out: &mut Vec<Violation>) {
    for side in ["from", "to"] {
        let Some(bundle) = object.get(side).and_then(Value::as_object) else {
            continue;
        };
        let has_member = BUNDLE_MEMBERS
            .iter()
            .any(|field| members(bundle, field).next().is_some());
        if !has_member {
            out.push(Violation {
                path: path.field(side),
                expected: "concept bundle with at least one member".to_string(),
                actual: Some(Value::Object(bundle.clone())),
            });
        }
        check_nested(EntityType::Concept, bundle, &BUNDLE_MEMBERS, &path.field(side), out);
    }
    check_nested(EntityType::ConceptScheme, object, &["fromScheme", "toScheme"], path, out);
}

fn check_concordance(object: &Map<String, Value>, path: &JsonPath, out: &mut Vec<Violation>) {
    check_nested(EntityType::ConceptScheme, object, &["fromScheme", "toScheme"], path, out);
    check_nested(EntityType::Mapping, object, &["mappings"], path, out);
}

fn check_registry(object: &Map<String, Value>, path: &JsonPath, out: &mut Vec<Violation>) {
    check_nested(EntityType::Concept, object, &["concepts", "types"], path, out);
    check_nested(EntityType::ConceptScheme, object, &["schemes"], path, out);
    check_nested(EntityType::Mapping, object, &["mappings"], path, out);
    check_nested(EntityType::Concordance, object, &["concordances"], path, out);
    check_nested(EntityType::Registry, object, &["registries"], path, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> Validator<'static> {
        Validator::new(SchemaRegistry::builtin().unwrap())
    }

    #[test]
    fn pointer_resolution_distinguishes_indices_from_numeric_keys() {
        let instance = json!({"broader": [{"uri": "x"}], "prefLabel": {"0": "zero"}});
        let path = JsonPath::from_pointer("/broader/0/uri", &instance);
        assert_eq!(
            path.segments(),
            [
                PathSegment::Field("broader".into()),
                PathSegment::Index(0),
                PathSegment::Field("uri".into())
            ]
        );
        let numeric_key = JsonPath::from_pointer("/prefLabel/0", &instance);
        assert_eq!(numeric_key, JsonPath::from(["prefLabel", "0"]));
        assert_eq!(path.to_string(), "$.broader[0].uri");
        assert_eq!(JsonPath::from(["@context"]).to_string(), "$[\"@context\"]");
    }

    #[test]
    fn missing_uri_is_reported_at_uri() {
        let report = validator().report(&json!({"prefLabel": {"en": "Cat"}}), EntityType::Concept);
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations[0].path, JsonPath::from(["uri"]));
        assert_eq!(report.violations[0].actual, None);
    }

    #[test]
    fn collects_every_violation() {
        let doc = json!({
            "prefLabel": {"en": 42},
            "notation": "not-a-list",
            "created": "yesterday"
        });
        let report = validator().report(&doc, EntityType::Concept);
        assert!(report.has_path(&JsonPath::from(["uri"])));
        assert!(report.has_path(&JsonPath::from(["notation"])));
        assert!(report.has_path(&JsonPath::from(["created"])));
        assert!(report.paths().any(|path| path.segments().first()
            == Some(&PathSegment::Field("prefLabel".into()))));
        assert!(report.len() >= 4);
    }

    #[test]
    fn reports_are_idempotent() {
        let doc = json!({"uri": "http://example.org/c1", "broader": [{"uri": 7}], "x": 1});
        let v = validator().strict(true);
        let first = v.report(&doc, EntityType::Concept);
        let second = v.report(&doc, EntityType::Concept);
        assert_eq!(first, second);
        assert!(!first.is_valid());
    }

    #[test]
    fn nested_violations_point_into_the_member() {
        let doc = json!({
            "uri": "http://example.org/c1",
            "narrower": [null, {"uri": "http://example.org/c2", "prefLabel": "Dog"}]
        });
        let report = validator().report(&doc, EntityType::Concept);
        assert!(
            report.has_path(&JsonPath::root().field("narrower").index(1).field("prefLabel")),
            "{report}"
        );
    }

    #[test]
    fn strict_mode_names_each_unknown_field() {
        let doc = json!({"uri": "http://example.org/c1", "x-a": 1, "x-b": 2});
        let lenient = validator().report(&doc, EntityType::Concept);
        assert!(lenient.is_valid());
        let strict = validator().strict(true).report(&doc, EntityType::Concept);
        let paths: Vec<String> = strict.paths().map(JsonPath::to_string).collect();
        assert_eq!(paths, ["$[\"x-a\"]", "$[\"x-b\"]"]);
        assert_eq!(strict.violations[0].actual, Some(json!(1)));
    }

    #[test]
    fn empty_mapping_side_is_a_violation() {
        let doc = json!({
            "uri": "http://example.org/m1",
            "from": {"memberSet": [{"uri": "http://example.org/a"}]},
            "to": {"memberSet": []}
        });
        let err = validator().validate(&doc, None).unwrap_err();
        let report = err.report().unwrap();
        assert_eq!(report.kind, EntityType::Mapping);
        assert!(report.has_path(&JsonPath::from(["to"])));
        assert!(!report.has_path(&JsonPath::from(["from"])));
    }

    #[test]
    fn concept_cannot_be_its_own_broader() {
        let doc = json!({
            "uri": "http://example.org/c1",
            "broader": [{"uri": "http://example.org/c0"}, {"uri": "http://example.org/c1"}]
        });
        let report = validator().report(&doc, EntityType::Concept);
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations[0].path, JsonPath::root().field("broader").index(1));
    }

    #[test]
    fn rules_apply_to_nested_entities() {
        let doc = json!({
            "uri": "http://example.org/voc",
            "concepts": [{
                "uri": "http://example.org/c1",
                "mappings": [{"from": {"memberSet": []}, "to": {"memberSet": [{"uri": "urn:x"}]}}]
            }]
        });
        let report = validator().report(&doc, EntityType::ConceptScheme);
        assert!(report.has_path(
            &JsonPath::root()
                .field("concepts")
                .index(0)
                .field("mappings")
                .index(0)
                .field("from")
        ));
    }

    #[test]
    fn statements_are_checked_in_place() {
        let doc = json!({
            "uri": "http://example.org/c1",
            "annotations": [{"target": "http://example.org/c1"}],
            "qualifiedDates": {"urn:example:birthDate": [{"date": "someday"}]},
            "occurrences": [{"count": -1}]
        });
        let report = validator().report(&doc, EntityType::Concept);
        let annotation = JsonPath::root().field("annotations").index(0);
        assert!(report.has_path(&annotation.field("id")), "{report}");
        assert!(report.has_path(
            &JsonPath::root()
                .field("qualifiedDates")
                .field("urn:example:birthDate")
                .index(0)
                .field("date")
        ));
        assert!(report.has_path(&JsonPath::root().field("occurrences").index(0).field("count")));
    }

    #[test]
    fn kos_reports_wrapper_and_concept_violations() {
        let doc = json!({
            "id": "https://example.org/kos",
            "type": "ConceptScheme",
            "title": {"en": "Example"},
            "hasTopConcept": [
                {"uri": "https://example.org/c1", "broader": [{"uri": "https://example.org/c1"}]}
            ]
        });
        let report = validator().report_kos(&doc).unwrap();
        assert_eq!(report.kind, DocumentKind::Kos);
        let paths: Vec<String> = report.paths().map(JsonPath::to_string).collect();
        assert_eq!(paths, ["$.description", "$.hasTopConcept[0].broader[0]"]);

        assert!(matches!(
            validator().validate_kos(&json!("kos")),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn infers_type_from_discriminator() {
        let v = validator();
        let scheme = json!({"type": ["http://www.w3.org/2004/02/skos/core#ConceptScheme"]});
        assert_eq!(v.infer_type(&scheme).unwrap(), EntityType::ConceptScheme);
        let exact = json!({"type": "http://www.w3.org/2004/02/skos/core#exactMatch"});
        assert_eq!(v.infer_type(&exact).unwrap(), EntityType::Mapping);
        let unknown = json!({"type": ["http://example.org/Thing"]});
        assert!(matches!(v.infer_type(&unknown), Err(Error::UnknownEntityType(uri)) if uri == "http://example.org/Thing"));
        let both = json!({"type": [
            "http://www.w3.org/2004/02/skos/core#Concept",
            "http://www.w3.org/2004/02/skos/core#ConceptScheme"
        ]});
        assert!(matches!(
            v.infer_type(&both),
            Err(Error::AmbiguousType { candidates }) if candidates.len() == 2
        ));
    }

    #[test]
    fn infers_type_from_shape() {
        let v = validator();
        let concept = json!({"uri": "urn:c", "broader": [{"uri": "urn:b"}]});
        assert_eq!(v.infer_type(&concept).unwrap(), EntityType::Concept);
        let mapping = json!({"from": {"memberSet": []}, "to": {"memberSet": []}});
        assert_eq!(v.infer_type(&mapping).unwrap(), EntityType::Mapping);
        let scheme = json!({"uri": "urn:s", "topConcepts": []});
        assert_eq!(v.infer_type(&scheme).unwrap(), EntityType::ConceptScheme);
        let bare = json!({"uri": "urn:x", "prefLabel": {"en": "X"}});
        assert!(matches!(
            v.infer_type(&bare),
            Err(Error::AmbiguousType { candidates }) if candidates.is_empty()
        ));
    }

    #[test]
    fn hint_overrides_inference_and_non_objects_are_malformed() {
        let v = validator();
        let doc = json!({"type": ["http://www.w3.org/2004/02/skos/core#Concept"]});
        assert_eq!(
            v.resolve_type(&doc, Some(EntityType::Registry)).unwrap(),
            EntityType::Registry
        );
        assert!(matches!(
            v.resolve_type(&json!([1, 2]), Some(EntityType::Concept)),
            Err(Error::MalformedInput(_))
        ));
    }
}
