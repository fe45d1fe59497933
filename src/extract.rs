//! Extraction facade and the recursive field walker.

use std::rc::Rc;

use tracing::trace;

use crate::error::ExtractError;
use crate::tag::{self, TagResolution};
use crate::value::{Field, FieldMap, Record, Value};
use crate::visited::VisitedGuard;

/// Flattens records into dotted-path field maps.
///
/// Configuration is immutable after construction, so one instance can be
/// shared by any number of callers; each call owns its own cycle guard and
/// result map.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    tag_required: bool,
    exclude_nils: bool,
}

impl Extractor {
    /// An extractor with both policies off: every field is included and
    /// absent values appear as their empty representation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::default()
    }

    /// Flatten `root` into a map from dotted path to leaf value.
    ///
    /// `root` must be a record or a single-level reference to one;
    /// anything else is an [`ExtractError::InvalidRoot`] naming the kind
    /// actually observed.
    pub fn extract_fields(&self, root: &Value) -> Result<FieldMap, ExtractError> {
        let mut walker = FieldExtractor {
            policy: *self,
            visited: VisitedGuard::new(),
        };
        walker.extract(root)
    }
}

/// Builds an [`Extractor`]; each method sets exactly one policy flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractorBuilder {
    tag_required: bool,
    exclude_nils: bool,
}

impl ExtractorBuilder {
    /// Only emit fields carrying an explicit `flat` or `json` key.
    pub fn tag_required(mut self, required: bool) -> Self {
        self.tag_required = required;
        self
    }

    /// Skip fields whose kind can be absent and currently is (absent
    /// references, empty sequences and maps, explicit nulls).
    pub fn exclude_nils(mut self, exclude: bool) -> Self {
        self.exclude_nils = exclude;
        self
    }

    pub fn build(self) -> Extractor {
        Extractor {
            tag_required: self.tag_required,
            exclude_nils: self.exclude_nils,
        }
    }
}

/// One extraction call: the policy plus the per-call cycle guard.
struct FieldExtractor {
    policy: Extractor,
    visited: VisitedGuard,
}

impl FieldExtractor {
    fn extract(&mut self, root: &Value) -> Result<FieldMap, ExtractError> {
        match root {
            Value::Record(record) => self.record_fields(record),
            Value::Ref(Some(target)) => {
                // The root's own location participates, so a back-edge
                // pointing at the root truncates like any other revisit.
                self.visited.visit(Rc::as_ptr(target));
                let inner = target.borrow();
                match &*inner {
                    Value::Record(record) => self.record_fields(record),
                    other => Err(ExtractError::InvalidRoot(other.kind())),
                }
            }
            other => Err(ExtractError::InvalidRoot(other.kind())),
        }
    }

    fn record_fields(&mut self, record: &Record) -> Result<FieldMap, ExtractError> {
        let mut out = FieldMap::with_capacity(record.len());
        for field in record.fields() {
            self.field_entries(field, &mut out)?;
        }
        Ok(out)
    }

    /// The per-field pipeline: tag resolution, nils policy, cycle check,
    /// then recursion or leaf emission.
    fn field_entries(&mut self, field: &Field, out: &mut FieldMap) -> Result<(), ExtractError> {
        let name = match tag::resolve(field.tag(), field.name(), self.policy.tag_required)? {
            TagResolution::Excluded => {
                trace!("[EXTRACT] field '{}' excluded by tag policy", field.name());
                return Ok(());
            }
            TagResolution::Name(name) => name,
        };

        // The nils policy looks at the un-dereferenced value.
        if self.policy.exclude_nils && field.value().is_nilable() && field.value().is_absent() {
            return Ok(());
        }

        match field.value() {
            Value::Ref(Some(target)) => {
                if !self.visited.visit(Rc::as_ptr(target)) {
                    trace!("[EXTRACT] field '{}' already visited, truncating", field.name());
                    return Ok(());
                }
                let inner = target.borrow();
                self.emit(&name, &inner, out)
            }
            value => self.emit(&name, value, out),
        }
    }

    /// Emit one dereferenced value under `name`, recursing into records.
    fn emit(&mut self, name: &str, value: &Value, out: &mut FieldMap) -> Result<(), ExtractError> {
        if let Value::Record(record) = value {
            let sub = self.record_fields(record)?;
            if sub.is_empty() {
                // Every child was excluded: keep the record visible as a
                // single leaf instead of dropping it.
                out.insert(name.to_string(), value.clone());
            } else {
                for (path, leaf) in sub {
                    out.insert(join_names(name, &path), leaf);
                }
            }
        } else {
            out.insert(name.to_string(), value.clone());
        }
        Ok(())
    }
}

fn join_names(prefix: &str, suffix: &str) -> String {
    format!("{prefix}.{suffix}")
}
