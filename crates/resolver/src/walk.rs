use crate::defaults::DefaultValueGenerator;
use crate::{ResolveError, ResolveOptions, ResolverSettings, Result};
use apollo_compiler::executable::{Field, Selection, SelectionSet};
use apollo_compiler::{ExecutableDocument, Node};
use graphql_mock_registry::{shallow_merge, MockRegistry, MockValue};
use graphql_mock_schema::{SchemaIndex, TypeDefKind, TypeRef};
use serde_json::json;
use std::sync::Arc;

/// Resolves request documents against a schema index and a mock registry.
///
/// One resolver is built per worker and shared across sessions; all
/// per-request state lives on the stack of [`resolve`](Self::resolve).
#[derive(Debug, Clone)]
pub struct QueryResolver {
    schema: Arc<SchemaIndex>,
    settings: ResolverSettings,
}

impl QueryResolver {
    #[must_use]
    pub fn new(schema: Arc<SchemaIndex>) -> Self {
        Self::with_settings(schema, ResolverSettings::default())
    }

    #[must_use]
    pub const fn with_settings(schema: Arc<SchemaIndex>, settings: ResolverSettings) -> Self {
        Self { schema, settings }
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<SchemaIndex> {
        &self.schema
    }

    /// Resolve one request to its response `data` object.
    ///
    /// The document is parsed and validated against the schema; the named
    /// operation is selected; then either an operation mock short-circuits
    /// the walk or the selection set is resolved type by type.
    #[tracing::instrument(skip_all, fields(operation = operation_name.unwrap_or("<anonymous>")))]
    pub fn resolve(
        &self,
        registry: &MockRegistry,
        source: &str,
        variables: &MockValue,
        operation_name: Option<&str>,
        options: ResolveOptions,
    ) -> Result<MockValue> {
        let document = ExecutableDocument::parse_and_validate(
            self.schema.schema(),
            source,
            "request.graphql",
        )
        .map_err(|e| {
            let message = e.errors.to_string();
            if options.log_graphql_errors {
                tracing::error!(%message, "query validation failed");
            }
            ResolveError::QueryValidation(message)
        })?;

        let operation = document.operations.get(operation_name).map_err(|_| {
            ResolveError::OperationNotFound {
                name: operation_name.unwrap_or("<anonymous>").to_owned(),
            }
        })?;

        if operation.operation_type == apollo_compiler::ast::OperationType::Subscription {
            return Err(ResolveError::QueryValidation(
                "subscription operations are not supported".to_owned(),
            ));
        }

        let walk = Walk {
            schema: &self.schema,
            registry,
            document: &document,
            options,
            defaults: DefaultValueGenerator::new(self.settings.seed),
            default_list_length: self.settings.default_list_length,
        };

        let op_name = operation.name.as_ref().map(apollo_compiler::Name::as_str);
        if let Some(name) = op_name {
            if let Some(factory) = registry.operation_mock(name) {
                let data = factory.produce(variables);
                walk.check_mock_shape(
                    name,
                    "",
                    operation.selection_set.ty.as_str(),
                    &operation.selection_set,
                    &data,
                )?;
                return Ok(data);
            }
        }
        if options.warn_on_missing_operation_mocks {
            tracing::warn!(
                operation = op_name.unwrap_or("<anonymous>"),
                "no operation mock registered, falling back to type-level resolution"
            );
        }

        let root_type = operation.selection_set.ty.as_str();
        walk.resolve_composite(root_type, false, &[&operation.selection_set], None, "")
    }
}

/// Per-request walk state. Borrows everything; resolution allocates only
/// the output value graph.
struct Walk<'a> {
    schema: &'a SchemaIndex,
    registry: &'a MockRegistry,
    document: &'a ExecutableDocument,
    options: ResolveOptions,
    defaults: DefaultValueGenerator,
    default_list_length: usize,
}

impl<'a> Walk<'a> {
    /// Resolve an object value: discriminate the concrete type, layer the
    /// data sources (type mock, then fixture by key field, then the
    /// parent-provided seed), and resolve each selected field against the
    /// merged partial.
    fn resolve_composite(
        &self,
        declared_type: &str,
        declared_abstract: bool,
        selection_sets: &[&'a SelectionSet],
        parent_seed: Option<&MockValue>,
        path: &str,
    ) -> Result<MockValue> {
        let seed_typename = parent_seed
            .and_then(|seed| seed.get("__typename"))
            .and_then(MockValue::as_str);
        let concrete: String = if let Some(name) = seed_typename {
            name.to_owned()
        } else if declared_abstract {
            self.schema
                .possible_types(declared_type)
                .first()
                .map(|name| name.as_ref().to_owned())
                .ok_or_else(|| {
                    ResolveError::unresolved(
                        declared_type,
                        "__typename",
                        "abstract type has no possible object types",
                    )
                })?
        } else {
            declared_type.to_owned()
        };

        let mut base = self
            .registry
            .type_mock_output(&concrete)
            .unwrap_or_else(|| MockValue::Object(serde_json::Map::new()));
        if !base.is_object() {
            return Err(ResolveError::unresolved(
                &concrete,
                "*",
                "type mock for a composite type must produce an object",
            ));
        }

        if let Some(key_field) = self.registry.policies().key_field(&concrete) {
            let key_value = parent_seed
                .and_then(|seed| seed.get(key_field))
                .or_else(|| base.get(key_field))
                .cloned();
            if let Some(key_value) = key_value {
                if !key_value.is_null() {
                    if let Some(fixture) = self.registry.fixture_for(&concrete, &key_value) {
                        base = shallow_merge(base, fixture.clone());
                    }
                }
            }
        }

        if let Some(seed) = parent_seed {
            base = shallow_merge(base, seed.clone());
        }

        let mut fields = Vec::new();
        for selection_set in selection_sets {
            self.collect_fields(&concrete, selection_set, &mut fields);
        }

        // Keys the parent explicitly provided pass through verbatim even
        // when unselected (a signed-in viewer mock's `avatarURL` shows up
        // whether or not the query asks for it); resolved selections then
        // overwrite their own keys.
        let mut output = match parent_seed {
            Some(MockValue::Object(seed_map)) => seed_map.clone(),
            _ => serde_json::Map::new(),
        };
        for (response_key, group) in group_by_response_key(&fields) {
            let field = group[0];
            if field.name.as_str() == "__typename" {
                output.insert(response_key.to_owned(), json!(concrete.clone()));
                continue;
            }
            let signature = self
                .schema
                .field(&concrete, field.name.as_str())
                .ok_or_else(|| {
                    ResolveError::unresolved(
                        &concrete,
                        field.name.as_str(),
                        "field is not defined on this type",
                    )
                })?;
            let child_sets: Vec<&SelectionSet> = group
                .iter()
                .map(|f| &f.selection_set)
                .filter(|selection_set| !selection_set.selections.is_empty())
                .collect();
            let child_path = join_path(path, response_key);
            let value = self.resolve_field(
                &concrete,
                field.name.as_str(),
                &signature.type_ref,
                &child_sets,
                base.get(field.name.as_str()),
                &child_path,
            )?;
            output.insert(response_key.to_owned(), value);
        }

        // Polymorphic objects always carry their concrete type, selected
        // or not: the client cache needs it to discriminate.
        if declared_abstract && !output.contains_key("__typename") {
            output.insert("__typename".to_owned(), json!(concrete));
        }

        Ok(MockValue::Object(output))
    }

    fn resolve_field(
        &self,
        parent_type: &str,
        field_name: &str,
        declared: &TypeRef,
        selection_sets: &[&'a SelectionSet],
        seed: Option<&MockValue>,
        path: &str,
    ) -> Result<MockValue> {
        if let Some(MockValue::Null) = seed {
            if declared.is_non_null {
                return Err(ResolveError::unresolved(
                    parent_type,
                    field_name,
                    "mock provided null for a non-null field",
                ));
            }
            return Ok(MockValue::Null);
        }
        if declared.is_list {
            return self.resolve_list(parent_type, field_name, declared, selection_sets, seed, path);
        }
        self.resolve_element(parent_type, field_name, declared, selection_sets, seed, path)
    }

    fn resolve_list(
        &self,
        parent_type: &str,
        field_name: &str,
        declared: &TypeRef,
        selection_sets: &[&'a SelectionSet],
        seed: Option<&MockValue>,
        path: &str,
    ) -> Result<MockValue> {
        match seed {
            Some(MockValue::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{index}]");
                    if item.is_null() {
                        if declared.inner_non_null {
                            return Err(ResolveError::unresolved(
                                parent_type,
                                field_name,
                                "mock provided a null element for a non-null list element type",
                            ));
                        }
                        out.push(MockValue::Null);
                        continue;
                    }
                    out.push(self.resolve_element(
                        parent_type,
                        field_name,
                        declared,
                        selection_sets,
                        Some(item),
                        &item_path,
                    )?);
                }
                Ok(MockValue::Array(out))
            }
            Some(other) => Err(ResolveError::unresolved(
                parent_type,
                field_name,
                format!("expected an array mock for a list field, got `{other}`"),
            )),
            None => {
                let mut out = Vec::with_capacity(self.default_list_length);
                for index in 0..self.default_list_length {
                    let item_path = format!("{path}[{index}]");
                    out.push(self.resolve_element(
                        parent_type,
                        field_name,
                        declared,
                        selection_sets,
                        None,
                        &item_path,
                    )?);
                }
                Ok(MockValue::Array(out))
            }
        }
    }

    fn resolve_element(
        &self,
        parent_type: &str,
        field_name: &str,
        declared: &TypeRef,
        selection_sets: &[&'a SelectionSet],
        seed: Option<&MockValue>,
        path: &str,
    ) -> Result<MockValue> {
        let type_name = declared.name.as_ref();
        let Some(type_def) = self.schema.get(type_name) else {
            // Built-in scalar: not part of the index.
            return self.resolve_leaf(parent_type, field_name, type_name, seed, path);
        };
        match type_def.kind {
            kind if kind.is_composite() => {
                if selection_sets.is_empty() {
                    return Err(ResolveError::unresolved(
                        parent_type,
                        field_name,
                        "composite field selected without a selection set",
                    ));
                }
                self.resolve_composite(type_name, kind.is_abstract(), selection_sets, seed, path)
            }
            TypeDefKind::Enum => {
                if let Some(seed) = seed {
                    return Ok(seed.clone());
                }
                if let Some(mock) = self.registry.type_mock_output(type_name) {
                    return Ok(mock);
                }
                self.defaults
                    .enum_value(
                        type_def.enum_values.iter().map(|v| v.name.as_ref()),
                        type_name,
                        path,
                    )
                    .map(|value| json!(value))
                    .ok_or_else(|| {
                        ResolveError::unresolved(
                            parent_type,
                            field_name,
                            "enum type declares no values",
                        )
                    })
            }
            TypeDefKind::Scalar => {
                self.resolve_leaf(parent_type, field_name, type_name, seed, path)
            }
            _ => Err(ResolveError::unresolved(
                parent_type,
                field_name,
                format!("type `{type_name}` cannot appear in an output position"),
            )),
        }
    }

    /// Leaf precedence: seed value, then a scalar-typed mock, then a
    /// built-in default. Custom scalars with no mock are a hard failure.
    fn resolve_leaf(
        &self,
        parent_type: &str,
        field_name: &str,
        scalar_name: &str,
        seed: Option<&MockValue>,
        path: &str,
    ) -> Result<MockValue> {
        if let Some(seed) = seed {
            return Ok(seed.clone());
        }
        if let Some(mock) = self.registry.type_mock_output(scalar_name) {
            return Ok(mock);
        }
        match self.defaults.scalar(scalar_name, path) {
            Some(value) => {
                if self.options.log_graphql_errors {
                    tracing::debug!(
                        coordinate = format!("{parent_type}.{field_name}"),
                        scalar = scalar_name,
                        "no mock covers this field, generated a default value"
                    );
                }
                Ok(value)
            }
            None => Err(ResolveError::unresolved(
                parent_type,
                field_name,
                format!("custom scalar `{scalar_name}` has no registered mock"),
            )),
        }
    }

    /// Flatten a selection set's fields for a concrete type, applying
    /// fragment spreads and inline fragments whose type condition matches.
    fn collect_fields(
        &self,
        concrete: &str,
        selection_set: &'a SelectionSet,
        out: &mut Vec<&'a Node<Field>>,
    ) {
        for selection in &selection_set.selections {
            match selection {
                Selection::Field(field) => out.push(field),
                Selection::FragmentSpread(spread) => {
                    if let Some(fragment) = spread.fragment_def(self.document) {
                        if self
                            .schema
                            .type_matches(concrete, fragment.type_condition().as_str())
                        {
                            self.collect_fields(concrete, &fragment.selection_set, out);
                        }
                    }
                }
                Selection::InlineFragment(inline) => {
                    let applies = inline.type_condition.as_ref().is_none_or(|condition| {
                        self.schema.type_matches(concrete, condition.as_str())
                    });
                    if applies {
                        self.collect_fields(concrete, &inline.selection_set, out);
                    }
                }
            }
        }
    }

    /// Verify an operation mock's output covers the selection set: every
    /// requested response key must be present, recursively through objects
    /// and list elements. Gaps are fatal unless
    /// `warn_on_missing_operation_mocks` downgrades them to warnings.
    fn check_mock_shape(
        &self,
        operation_name: &str,
        path: &str,
        declared_type: &str,
        selection_set: &'a SelectionSet,
        value: &MockValue,
    ) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        if let MockValue::Array(items) = value {
            for (index, item) in items.iter().enumerate() {
                self.check_mock_shape(
                    operation_name,
                    &format!("{path}[{index}]"),
                    declared_type,
                    selection_set,
                    item,
                )?;
            }
            return Ok(());
        }
        let Some(object) = value.as_object() else {
            // Scalar leaf; a validated document has no sub-selections here.
            return Ok(());
        };

        let concrete = object
            .get("__typename")
            .and_then(MockValue::as_str)
            .unwrap_or(declared_type);

        let mut fields = Vec::new();
        self.collect_fields(concrete, selection_set, &mut fields);

        for (response_key, group) in group_by_response_key(&fields) {
            let field = group[0];
            let Some(child) = object.get(response_key) else {
                let coordinate = format!("{concrete}.{}", field.name);
                if self.options.warn_on_missing_operation_mocks {
                    tracing::warn!(
                        operation = operation_name,
                        coordinate = %coordinate,
                        "operation mock is missing a requested field"
                    );
                    continue;
                }
                return Err(ResolveError::UnresolvedField {
                    coordinate,
                    reason: format!(
                        "operation mock for `{operation_name}` is missing this requested field"
                    ),
                });
            };
            if field.name.as_str() == "__typename" {
                continue;
            }
            if let Some(signature) = self.schema.field(concrete, field.name.as_str()) {
                let child_path = join_path(path, response_key);
                for f in &group {
                    if !f.selection_set.selections.is_empty() {
                        self.check_mock_shape(
                            operation_name,
                            &child_path,
                            signature.type_ref.name.as_ref(),
                            &f.selection_set,
                            child,
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Group collected fields by response key, preserving first-seen order.
/// Duplicate keys come from fragment merging; their sub-selections are
/// resolved together.
fn group_by_response_key<'a>(
    fields: &[&'a Node<Field>],
) -> Vec<(&'a str, Vec<&'a Node<Field>>)> {
    let mut groups: Vec<(&str, Vec<&Node<Field>>)> = Vec::new();
    for field in fields.iter().copied() {
        let key = field.response_key().as_str();
        if let Some((_, existing)) = groups.iter_mut().find(|(k, _)| *k == key) {
            existing.push(field);
        } else {
            groups.push((key, vec![field]));
        }
    }
    groups
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{path}.{key}")
    }
}
