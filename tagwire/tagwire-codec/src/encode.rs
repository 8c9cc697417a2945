//! Plan-driven encoder: the mirror of the decode interpreter.

use tagwire_core::{DataFormat, Message, PrimitiveKind, Value, ValueTypeError};
use tagwire_plan::{DecodePlan, ElementOp, FieldOp, Operation, Registry, SchemaId};
use tagwire_wire::{WireType, WireWriter};

use crate::error::EncodeError;

pub(crate) struct Encoder<'a> {
    registry: &'a Registry,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Write the fields of `message` with the plan of `id`, descending into
    /// the subtype arm that leads to the message's concrete type.
    pub(crate) fn encode_message(
        &self,
        id: SchemaId,
        message: &Message,
        w: &mut WireWriter,
    ) -> Result<(), EncodeError> {
        let plan = self.registry.plan(id);
        let actual = self
            .registry
            .id(message.type_name())
            .filter(|actual| self.registry.is_ancestor_or_self(id, *actual))
            .ok_or_else(|| EncodeError::InstanceMismatch {
                expected: plan.name.clone(),
                actual: message.type_name().to_string(),
            })?;
        self.encode_fields(plan, actual, message, w)
    }

    fn encode_fields(
        &self,
        plan: &DecodePlan,
        actual: SchemaId,
        message: &Message,
        w: &mut WireWriter,
    ) -> Result<(), EncodeError> {
        for field in plan.ops() {
            if let Operation::Dispatch { schema } = field.op {
                if self.registry.is_ancestor_or_self(schema, actual) {
                    let derived = self.registry.plan(schema);
                    w.write_sub_item(field.tag, |w| {
                        self.encode_fields(derived, actual, message, w)
                    })?;
                }
                continue;
            }

            let owned;
            let value = match &field.getter {
                Some(getter) => {
                    owned = getter.get(message);
                    owned.as_ref()
                }
                None => message.get(field.tag),
            };
            if let Some(value) = value {
                self.encode_member(plan, field, value, w)?;
            }
        }
        Ok(())
    }

    fn encode_member(
        &self,
        plan: &DecodePlan,
        field: &FieldOp,
        value: &Value,
        w: &mut WireWriter,
    ) -> Result<(), EncodeError> {
        let mismatch = |err: ValueTypeError| EncodeError::ValueMismatch {
            schema: plan.name.clone(),
            member: field.name.clone(),
            expected: err.expected,
            actual: err.actual,
        };
        match field.op {
            Operation::Scalar { kind, format } => {
                encode_scalar(plan, field, kind, format, value, w)
            }
            Operation::Bytes => {
                let bytes = value.try_bytes().map_err(mismatch)?;
                w.write_field_header(field.tag, WireType::LengthDelimited);
                w.write_raw_length_delimited(bytes);
                Ok(())
            }
            Operation::Message { schema } => {
                let nested = value.try_message().map_err(mismatch)?;
                w.write_sub_item(field.tag, |w| self.encode_message(schema, nested, w))
            }
            // One header per element; an empty collection writes nothing.
            Operation::Repeated { element, .. } => {
                for item in value.try_elements().map_err(mismatch)? {
                    match element {
                        ElementOp::Scalar { kind, format } => {
                            encode_scalar(plan, field, kind, format, item, w)?;
                        }
                        ElementOp::Message { schema } => {
                            let nested = item.try_message().map_err(mismatch)?;
                            w.write_sub_item(field.tag, |w| {
                                self.encode_message(schema, nested, w)
                            })?;
                        }
                    }
                }
                Ok(())
            }
            Operation::Dispatch { .. } => Ok(()),
        }
    }
}

fn encode_scalar(
    plan: &DecodePlan,
    field: &FieldOp,
    kind: PrimitiveKind,
    format: DataFormat,
    value: &Value,
    w: &mut WireWriter,
) -> Result<(), EncodeError> {
    if value.primitive_kind() != Some(kind) {
        return Err(EncodeError::ValueMismatch {
            schema: plan.name.clone(),
            member: field.name.clone(),
            expected: kind.type_name().to_string(),
            actual: value.variant_name(),
        });
    }
    w.write_scalar(field.tag, format, value)?;
    Ok(())
}
