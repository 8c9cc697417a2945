//! Plan interpreter for the decode path.
//!
//! One loop over field headers; per header, one plan lookup and one `match`
//! on the compiled [`Operation`]. Unknown tags are skipped by wire type.

use tagwire_core::{DataFormat, Message, PrimitiveKind, TypeShape, Value};
use tagwire_plan::{ContainerKind, DecodePlan, ElementOp, FieldOp, Operation, Registry, SchemaId};
use tagwire_wire::{WireError, WireReader, WireType, expected_wire_type};
use tracing::{debug, warn};

use crate::{
    error::{DecodeError, wire_error},
    options::{DecodeOptions, MismatchPolicy},
};

pub(crate) struct Decoder<'a> {
    registry: &'a Registry,
    options: DecodeOptions,
    reader: WireReader,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(registry: &'a Registry, options: DecodeOptions, reader: WireReader) -> Self {
        Self {
            registry,
            options,
            reader,
            depth: 0,
        }
    }

    /// Decode the whole buffer with the plan of `root`.
    pub(crate) fn decode_root(
        mut self,
        root: SchemaId,
        instance: Option<Message>,
    ) -> Result<Message, DecodeError> {
        let message = self.decode_message(root, instance)?;
        self.reader
            .check_fully_consumed()
            .map_err(|e| wire_error(&self.registry.plan(root).name, 0, e))?;
        Ok(message)
    }

    fn decode_message(
        &mut self,
        id: SchemaId,
        existing: Option<Message>,
    ) -> Result<Message, DecodeError> {
        let registry = self.registry;
        let plan = registry.plan(id);
        let mut message = match existing {
            Some(existing) if plan.shape == TypeShape::Reference && self.accepts(id, &existing) => {
                existing
            }
            _ if plan.ensure_instance || plan.shape == TypeShape::Value => {
                Message::new(plan.name.as_str())
            }
            _ => {
                debug!(schema = %plan.name, "allocating abstract placeholder");
                Message::new(plan.name.as_str())
            }
        };

        self.decode_fields(plan, &mut message)?;

        if registry
            .plan_by_name(message.type_name())
            .is_some_and(|p| p.is_abstract)
        {
            return Err(DecodeError::AbstractInstance {
                type_name: message.type_name().to_string(),
            });
        }
        Ok(message)
    }

    /// Whether an existing instance can be merged into by the plan of `id`.
    fn accepts(&self, id: SchemaId, existing: &Message) -> bool {
        self.registry
            .id(existing.type_name())
            .is_some_and(|actual| self.registry.is_ancestor_or_self(id, actual))
    }

    fn decode_fields(&mut self, plan: &DecodePlan, message: &mut Message) -> Result<(), DecodeError> {
        while let Some(header) = self
            .reader
            .read_field_header()
            .map_err(|e| wire_error(&plan.name, 0, e))?
        {
            match plan.get(header.tag) {
                Some(field) => self.decode_field(plan, field, message)?,
                None => {
                    debug!(
                        schema = %plan.name,
                        tag = header.tag,
                        wire_type = %header.wire_type,
                        offset = self.reader.field_offset(),
                        "skipping unknown field"
                    );
                    self.reader
                        .skip_field()
                        .map_err(|e| wire_error(&plan.name, header.tag, e))?;
                }
            }
        }
        Ok(())
    }

    fn decode_field(
        &mut self,
        plan: &DecodePlan,
        field: &FieldOp,
        message: &mut Message,
    ) -> Result<(), DecodeError> {
        match field.op {
            Operation::Scalar { kind, format } => {
                let value = self
                    .read_scalar(plan, field, kind, format)?
                    .unwrap_or_else(|| kind.default_value());
                store(plan, field, message, value)
            }
            Operation::Bytes => {
                if !self.check_wire_type(plan, field, WireType::LengthDelimited)? {
                    return Ok(());
                }
                let mut buf = match current_value(field, message) {
                    Some(Value::Bytes(buf)) => buf,
                    _ => Vec::new(),
                };
                self.reader
                    .append_bytes(&mut buf)
                    .map_err(|e| wire_error(&plan.name, field.tag, e))?;
                store(plan, field, message, Value::Bytes(buf))
            }
            Operation::Message { schema } => {
                if !self.check_wire_type(plan, field, WireType::LengthDelimited)? {
                    return Ok(());
                }
                let existing = match current_value(field, message) {
                    Some(Value::Message(existing)) => Some(*existing),
                    _ => None,
                };
                let nested =
                    self.sub_item(plan, field, |this| this.decode_message(schema, existing))?;
                store(plan, field, message, Value::message(nested))
            }
            Operation::Repeated { container, element } => {
                self.decode_repeated(plan, field, container, element, message)
            }
            Operation::Dispatch { schema } => {
                if !self.check_wire_type(plan, field, WireType::LengthDelimited)? {
                    return Ok(());
                }
                self.reshape(message, schema);
                let derived = self.registry.plan(schema);
                self.sub_item(plan, field, |this| this.decode_fields(derived, message))
            }
        }
    }

    /// Clear the target collection, then read elements for as long as the
    /// next header repeats the field's tag.
    fn decode_repeated(
        &mut self,
        plan: &DecodePlan,
        field: &FieldOp,
        container: ContainerKind,
        element: ElementOp,
        message: &mut Message,
    ) -> Result<(), DecodeError> {
        let mut items = match current_value(field, message) {
            Some(Value::Array(items) | Value::List(items) | Value::Set(items)) => items,
            _ => Vec::new(),
        };
        items.clear();

        loop {
            self.decode_element(plan, field, container, element, &mut items)?;
            let repeats = self
                .reader
                .try_read_field_header(field.tag)
                .map_err(|e| wire_error(&plan.name, field.tag, e))?;
            if !repeats {
                break;
            }
        }

        let value = match container {
            ContainerKind::Array => Value::Array(items),
            ContainerKind::List => Value::List(items),
            ContainerKind::Set => Value::Set(items),
        };
        store(plan, field, message, value)
    }

    fn decode_element(
        &mut self,
        plan: &DecodePlan,
        field: &FieldOp,
        container: ContainerKind,
        element: ElementOp,
        items: &mut Vec<Value>,
    ) -> Result<(), DecodeError> {
        match element {
            ElementOp::Scalar { kind, format } => {
                let packed = kind.is_packable()
                    && self
                        .reader
                        .current_header()
                        .is_some_and(|h| h.wire_type == WireType::LengthDelimited);
                if packed {
                    return self
                        .reader
                        .read_packed(kind, format, |value| push_element(container, items, value))
                        .map_err(|e| wire_error(&plan.name, field.tag, e));
                }
                if let Some(value) = self.read_scalar(plan, field, kind, format)? {
                    push_element(container, items, value);
                }
                Ok(())
            }
            ElementOp::Message { schema } => {
                if !self.check_wire_type(plan, field, WireType::LengthDelimited)? {
                    return Ok(());
                }
                let nested = self.sub_item(plan, field, |this| this.decode_message(schema, None))?;
                push_element(container, items, Value::message(nested));
                Ok(())
            }
        }
    }

    /// `None` when a mismatched value was skipped under the resilient policy.
    fn read_scalar(
        &mut self,
        plan: &DecodePlan,
        field: &FieldOp,
        kind: PrimitiveKind,
        format: DataFormat,
    ) -> Result<Option<Value>, DecodeError> {
        if !self.check_wire_type(plan, field, expected_wire_type(kind, format))? {
            return Ok(None);
        }
        self.reader
            .read_scalar(kind, format)
            .map(Some)
            .map_err(|e| wire_error(&plan.name, field.tag, e))
    }

    /// `Ok(false)` when the value was skipped under the resilient policy.
    fn check_wire_type(
        &mut self,
        plan: &DecodePlan,
        field: &FieldOp,
        expected: WireType,
    ) -> Result<bool, DecodeError> {
        let offset = self.reader.field_offset();
        let actual = self
            .reader
            .current()
            .map_err(|e| wire_error(&plan.name, field.tag, e))?
            .wire_type;
        if actual == expected {
            return Ok(true);
        }
        match self.options.mismatch {
            MismatchPolicy::Strict => Err(DecodeError::TypeMismatch {
                schema: plan.name.clone(),
                tag: field.tag,
                offset,
                expected,
                actual,
            }),
            MismatchPolicy::Resilient => {
                warn!(
                    schema = %plan.name,
                    member = %field.name,
                    tag = field.tag,
                    %expected,
                    %actual,
                    offset,
                    "wire type mismatch, value skipped"
                );
                self.reader
                    .skip_field()
                    .map_err(|e| wire_error(&plan.name, field.tag, e))?;
                Ok(false)
            }
        }
    }

    /// Enter the current length-delimited field, run `body` inside it and
    /// require the body to end exactly at the declared length.
    fn sub_item<T>(
        &mut self,
        plan: &DecodePlan,
        field: &FieldOp,
        body: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        let fail = |e: WireError| wire_error(&plan.name, field.tag, e);
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::DepthExceeded {
                schema: plan.name.clone(),
                max_depth: self.options.max_depth,
                offset: self.reader.field_offset(),
            });
        }
        let token = self.reader.start_sub_item().map_err(fail)?;
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        let value = result?;
        self.reader.end_sub_item(token).map_err(fail)?;
        Ok(value)
    }

    /// Give `message` the shape of `derived` before the arm's fields are read.
    ///
    /// An instance that already is `derived` or one of its descendants keeps
    /// its type. A sibling shape keeps only fields declared by the common
    /// ancestors.
    fn reshape(&self, message: &mut Message, derived: SchemaId) {
        let registry = self.registry;
        let derived_name = registry.plan(derived).name.as_str();
        let Some(current) = registry.id(message.type_name()) else {
            message.reshape(derived_name);
            return;
        };
        if registry.is_ancestor_or_self(derived, current) {
            return;
        }
        if !registry.is_ancestor_or_self(current, derived) {
            let mut shared = Vec::new();
            if let Some(common) = registry.common_ancestor(current, derived) {
                for id in registry.ancestors(common) {
                    shared.extend(registry.plan(id).members().map(|op| op.tag));
                }
            }
            debug!(
                from = message.type_name(),
                to = derived_name,
                "reshaping instance across sibling types"
            );
            message.retain(|tag, _| shared.contains(&tag));
        }
        message.reshape(derived_name);
    }
}

/// Current value of a member: read through its getter, or moved out of the
/// instance.
fn current_value(field: &FieldOp, message: &mut Message) -> Option<Value> {
    match &field.getter {
        Some(getter) => getter.get(message),
        None => message.take(field.tag),
    }
}

fn store(
    plan: &DecodePlan,
    field: &FieldOp,
    message: &mut Message,
    value: Value,
) -> Result<(), DecodeError> {
    match &field.setter {
        Some(setter) => setter
            .set(message, value)
            .map_err(|source| DecodeError::Accessor {
                schema: plan.name.clone(),
                member: field.name.clone(),
                source,
            }),
        None => {
            message.set(field.tag, value);
            Ok(())
        }
    }
}

fn push_element(container: ContainerKind, items: &mut Vec<Value>, value: Value) {
    match container {
        ContainerKind::Set => Value::set_insert(items, value),
        ContainerKind::Array | ContainerKind::List => items.push(value),
    }
}
