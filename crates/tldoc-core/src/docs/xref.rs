//! Type to constructor/function associations
//!
//! The index answers two questions for every type: which constructors
//! produce it, and which functions return it. Both keys and members keep the
//! order in which they first appear in the schema.

use indexmap::IndexMap;
use tracing::warn;

use crate::schema::SchemaObject;

/// Objects grouped by type key, keys in order of first appearance
type Groups<'a> = IndexMap<&'a str, Vec<&'a SchemaObject>>;

/// Cross-reference index built once from the whole schema
#[derive(Debug, Default)]
pub struct CrossReferenceIndex<'a> {
    constructors: Groups<'a>,
    functions: Groups<'a>,
}

impl<'a> CrossReferenceIndex<'a> {
    /// Group constructors by the type they produce and functions by the
    /// type they return, in a single pass
    pub fn build(objects: &'a [SchemaObject]) -> Self {
        let mut index = Self::default();
        for object in objects {
            if object.result.is_empty() {
                warn!(name = %object.fullname(), "definition without a result type is not indexed");
                continue;
            }
            let groups = if object.is_function {
                &mut index.functions
            } else {
                &mut index.constructors
            };
            groups
                .entry(object.result.as_str())
                .or_default()
                .push(object);
        }
        index
    }

    /// Constructors producing `type_key`, in schema order
    pub fn constructors_for(&self, type_key: &str) -> &[&'a SchemaObject] {
        group(&self.constructors, type_key)
    }

    /// Functions whose result is `type_key`, in schema order
    pub fn functions_returning(&self, type_key: &str) -> &[&'a SchemaObject] {
        group(&self.functions, type_key)
    }

    /// Every type with at least one constructor
    pub fn types(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.constructors.keys().copied()
    }

    /// Result types of functions that no constructor produces
    pub fn unconstructed_results(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.functions
            .keys()
            .copied()
            .filter(|key| !self.constructors.contains_key(*key))
    }
}

fn group<'g, 'a>(groups: &'g Groups<'a>, type_key: &str) -> &'g [&'a SchemaObject] {
    groups.get(type_key).map_or(&[][..], Vec::as_slice)
}
