use crate::types::{EnumValueDef, FieldSignature, OperationKind, TypeDef, TypeDefKind, TypeRef};
use crate::{Result, SchemaError};
use apollo_compiler::ast;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use std::collections::HashMap;
use std::sync::Arc;

/// An immutable index over a validated schema.
///
/// Holds both the validated `apollo_compiler` schema (needed to validate
/// incoming documents) and a flat map from type name to [`TypeDef`] so that
/// resolution-time lookups never walk the AST.
#[derive(Debug)]
pub struct SchemaIndex {
    schema: Valid<Schema>,
    types: HashMap<Arc<str>, TypeDef>,
    /// Abstract type name → concrete object types, sorted by name.
    possible_types: HashMap<Arc<str>, Vec<Arc<str>>>,
}

impl SchemaIndex {
    /// Parse and validate SDL, then build the index.
    ///
    /// `source_name` is only used in diagnostics (e.g. `"schema.graphql"`).
    #[tracing::instrument(skip(sdl), fields(source = source_name, bytes = sdl.len()))]
    pub fn parse(sdl: &str, source_name: &str) -> Result<Self> {
        let schema = Schema::parse(sdl, source_name)
            .map_err(|e| SchemaError::Parse(e.errors.to_string()))?;
        let schema = schema
            .validate()
            .map_err(|e| SchemaError::Validation(e.errors.to_string()))?;

        let mut types = HashMap::new();
        for (name, extended) in &schema.types {
            if extended.is_built_in() {
                continue;
            }
            let type_def = build_type_def(name.as_str(), extended);
            types.insert(type_def.name.clone(), type_def);
        }

        let possible_types = build_possible_types(&types);

        tracing::debug!(types = types.len(), "schema index built");

        Ok(Self {
            schema,
            types,
            possible_types,
        })
    }

    /// The validated schema, for executable-document validation.
    #[must_use]
    pub const fn schema(&self) -> &Valid<Schema> {
        &self.schema
    }

    /// Look up a type definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Look up a field signature by type and field name.
    #[must_use]
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldSignature> {
        self.types.get(type_name)?.fields.get(field_name)
    }

    /// The root type name for an operation kind, if the schema defines one.
    #[must_use]
    pub fn root_type(&self, kind: OperationKind) -> Option<&str> {
        let op = match kind {
            OperationKind::Query => ast::OperationType::Query,
            OperationKind::Mutation => ast::OperationType::Mutation,
            OperationKind::Subscription => ast::OperationType::Subscription,
        };
        self.schema.root_operation(op).map(|name| name.as_str())
    }

    /// Whether the named type is an interface or union.
    #[must_use]
    pub fn is_abstract(&self, name: &str) -> bool {
        self.types
            .get(name)
            .is_some_and(|def| def.kind.is_abstract())
    }

    /// The concrete object types an abstract type can resolve to, sorted by
    /// name. For an object type, the type itself. Empty for unknown names.
    #[must_use]
    pub fn possible_types(&self, name: &str) -> &[Arc<str>] {
        self.possible_types.get(name).map_or(&[], Vec::as_slice)
    }

    /// Whether an instance of `concrete` satisfies a fragment type condition.
    ///
    /// True when the names are equal, when `concrete` implements the
    /// `condition` interface, or when `concrete` is a member of the
    /// `condition` union.
    #[must_use]
    pub fn type_matches(&self, concrete: &str, condition: &str) -> bool {
        if concrete == condition {
            return true;
        }
        self.possible_types(condition)
            .iter()
            .any(|name| name.as_ref() == concrete)
    }

    /// Names of all schema-defined types (built-ins excluded).
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(AsRef::as_ref)
    }

    /// Whether a scalar name is one of the five built-in scalars.
    #[must_use]
    pub fn is_builtin_scalar(name: &str) -> bool {
        matches!(name, "Int" | "Float" | "String" | "Boolean" | "ID")
    }
}

fn build_type_def(name: &str, extended: &ExtendedType) -> TypeDef {
    let name: Arc<str> = Arc::from(name);
    let mut def = TypeDef {
        name: name.clone(),
        kind: TypeDefKind::Scalar,
        fields: HashMap::new(),
        implements: Vec::new(),
        union_members: Vec::new(),
        enum_values: Vec::new(),
        description: None,
    };

    match extended {
        ExtendedType::Object(obj) => {
            def.kind = TypeDefKind::Object;
            def.description = obj.description.as_deref().map(Arc::from);
            def.implements = obj
                .implements_interfaces
                .iter()
                .map(|i| Arc::from(i.name.as_str()))
                .collect();
            for (field_name, field) in &obj.fields {
                def.fields.insert(
                    Arc::from(field_name.as_str()),
                    field_signature(field_name.as_str(), &field.ty, field.description.as_deref()),
                );
            }
        }
        ExtendedType::Interface(interface) => {
            def.kind = TypeDefKind::Interface;
            def.description = interface.description.as_deref().map(Arc::from);
            def.implements = interface
                .implements_interfaces
                .iter()
                .map(|i| Arc::from(i.name.as_str()))
                .collect();
            for (field_name, field) in &interface.fields {
                def.fields.insert(
                    Arc::from(field_name.as_str()),
                    field_signature(field_name.as_str(), &field.ty, field.description.as_deref()),
                );
            }
        }
        ExtendedType::Union(union_) => {
            def.kind = TypeDefKind::Union;
            def.description = union_.description.as_deref().map(Arc::from);
            def.union_members = union_
                .members
                .iter()
                .map(|m| Arc::from(m.name.as_str()))
                .collect();
        }
        ExtendedType::Enum(enum_) => {
            def.kind = TypeDefKind::Enum;
            def.description = enum_.description.as_deref().map(Arc::from);
            def.enum_values = enum_
                .values
                .iter()
                .map(|(value_name, value)| EnumValueDef {
                    name: Arc::from(value_name.as_str()),
                    is_deprecated: value.directives.get("deprecated").is_some(),
                })
                .collect();
        }
        ExtendedType::Scalar(scalar) => {
            def.kind = TypeDefKind::Scalar;
            def.description = scalar.description.as_deref().map(Arc::from);
        }
        ExtendedType::InputObject(input) => {
            def.kind = TypeDefKind::InputObject;
            def.description = input.description.as_deref().map(Arc::from);
            for (field_name, field) in &input.fields {
                def.fields.insert(
                    Arc::from(field_name.as_str()),
                    field_signature(field_name.as_str(), &field.ty, field.description.as_deref()),
                );
            }
        }
    }

    def
}

fn field_signature(name: &str, ty: &ast::Type, description: Option<&str>) -> FieldSignature {
    FieldSignature {
        name: Arc::from(name),
        type_ref: type_ref(ty),
        description: description.map(Arc::from),
    }
}

/// Flatten an `ast::Type` into a [`TypeRef`].
fn type_ref(ty: &ast::Type) -> TypeRef {
    match ty {
        ast::Type::Named(name) => TypeRef {
            name: Arc::from(name.as_str()),
            is_list: false,
            is_non_null: false,
            inner_non_null: false,
        },
        ast::Type::NonNullNamed(name) => TypeRef {
            name: Arc::from(name.as_str()),
            is_list: false,
            is_non_null: true,
            inner_non_null: false,
        },
        ast::Type::List(inner) => {
            let inner = type_ref(inner);
            TypeRef {
                name: inner.name,
                is_list: true,
                is_non_null: false,
                inner_non_null: inner.is_non_null,
            }
        }
        ast::Type::NonNullList(inner) => {
            let inner = type_ref(inner);
            TypeRef {
                name: inner.name,
                is_list: true,
                is_non_null: true,
                inner_non_null: inner.is_non_null,
            }
        }
    }
}

/// Map every abstract type to its sorted concrete object types, and every
/// object type to itself.
fn build_possible_types(types: &HashMap<Arc<str>, TypeDef>) -> HashMap<Arc<str>, Vec<Arc<str>>> {
    let mut possible: HashMap<Arc<str>, Vec<Arc<str>>> = HashMap::new();

    for def in types.values() {
        match def.kind {
            TypeDefKind::Object => {
                possible
                    .entry(def.name.clone())
                    .or_default()
                    .push(def.name.clone());
                for interface in &def.implements {
                    possible
                        .entry(interface.clone())
                        .or_default()
                        .push(def.name.clone());
                }
            }
            TypeDefKind::Union => {
                let entry = possible.entry(def.name.clone()).or_default();
                entry.extend(def.union_members.iter().cloned());
            }
            _ => {}
        }
    }

    for members in possible.values_mut() {
        members.sort();
        members.dedup();
    }

    possible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_sdl() {
        let err = SchemaIndex::parse("type Query {", "test.graphql");
        assert!(err.is_err());
    }

    #[test]
    fn type_ref_flattens_wrappers() {
        let schema = SchemaIndex::parse(
            "type Query { names: [String!]!, maybe: String }",
            "test.graphql",
        )
        .unwrap();
        let names = schema.field("Query", "names").unwrap();
        assert_eq!(names.type_ref.name.as_ref(), "String");
        assert!(names.type_ref.is_list);
        assert!(names.type_ref.is_non_null);
        assert!(names.type_ref.inner_non_null);

        let maybe = schema.field("Query", "maybe").unwrap();
        assert!(!maybe.type_ref.is_list);
        assert!(!maybe.type_ref.is_non_null);
    }
}
