use std::mem;

use tracing::trace;
use wbxml_types::{Primitive, PropertyBuilder, Record};

use crate::error::ProtocolError;
use crate::event::ContentSink;

/// Builds one [`Primitive`] from a stream of [`ContentSink`] events.
///
/// The cursor into the tree is a stack of open records, owned by value:
/// `record_start` pushes a new record, `record_end` pops it and appends it
/// to the record now on top (or keeps it as the root when the stack is
/// empty). No node holds a reference to its parent.
///
/// ```text
///   Idle ──document_start──▶ Active ──document_end──▶ Complete(Primitive)
///    ▲                                                      │
///    └──────────────── reset / take_primitive ──────────────┘
/// ```
///
/// The partially built tree is never exposed: [`primitive`](Self::primitive)
/// only succeeds in `Complete`.
#[derive(Debug, Default)]
pub struct PrimitiveContentHandler {
    state: State,
    stack: Vec<Record>,
    root: Option<Record>,
    property: Option<PendingProperty>,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Active,
    Complete(Primitive),
}

/// A property between `property_start` and `property_end`.
///
/// `param_type` holds a parameter type until its value arrives.
#[derive(Debug, Default)]
struct PendingProperty {
    builder: PropertyBuilder,
    param_type: Option<String>,
}

impl PendingProperty {
    fn check_no_dangling_param(&self) -> Result<(), ProtocolError> {
        match &self.param_type {
            Some(param_type) => Err(ProtocolError::DanglingParamType {
                param_type: param_type.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl PrimitiveContentHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished primitive.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::NoPrimitive`] unless `document_end` completed since
    /// the last reset.
    pub fn primitive(&self) -> Result<&Primitive, ProtocolError> {
        match &self.state {
            State::Complete(primitive) => Ok(primitive),
            _ => Err(ProtocolError::NoPrimitive),
        }
    }

    /// Move the finished primitive out, returning the handler to idle.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::NoPrimitive`] unless `document_end` completed since
    /// the last reset. The handler is left untouched in that case.
    pub fn take_primitive(&mut self) -> Result<Primitive, ProtocolError> {
        match mem::take(&mut self.state) {
            State::Complete(primitive) => Ok(primitive),
            other => {
                self.state = other;
                Err(ProtocolError::NoPrimitive)
            }
        }
    }

    /// Number of records currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn ensure_active(&self) -> Result<(), ProtocolError> {
        match self.state {
            State::Active => Ok(()),
            _ => Err(ProtocolError::NotStarted),
        }
    }

    fn open_property(&mut self, event: &'static str) -> Result<&mut PendingProperty, ProtocolError> {
        self.ensure_active()?;
        self.property
            .as_mut()
            .ok_or(ProtocolError::NoOpenProperty { event })
    }
}

impl ContentSink for PrimitiveContentHandler {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn document_start(&mut self) -> Result<(), ProtocolError> {
        if matches!(self.state, State::Active) {
            return Err(ProtocolError::AlreadyStarted);
        }
        self.reset();
        self.state = State::Active;
        Ok(())
    }

    fn document_end(&mut self) -> Result<(), ProtocolError> {
        self.ensure_active()?;
        if self.property.is_some() {
            return Err(ProtocolError::UnclosedProperty);
        }
        if !self.stack.is_empty() {
            return Err(ProtocolError::UnclosedRecords {
                open: self.stack.len(),
            });
        }
        let root = self.root.take().ok_or(ProtocolError::EmptyDocument)?;

        trace!(primitive_type = root.record_type(), "document complete");
        self.state = State::Complete(Primitive::from_root(root));
        Ok(())
    }

    fn record_start(&mut self, record_type: &str) -> Result<(), ProtocolError> {
        self.ensure_active()?;
        if self.property.is_some() {
            return Err(ProtocolError::RecordInsideProperty {
                record_type: record_type.to_owned(),
            });
        }
        if self.stack.is_empty() && self.root.is_some() {
            return Err(ProtocolError::MultipleRoots {
                record_type: record_type.to_owned(),
            });
        }

        trace!(record_type, depth = self.stack.len(), "record start");
        self.stack.push(Record::new(record_type)?);
        Ok(())
    }

    fn record_end(&mut self) -> Result<(), ProtocolError> {
        self.ensure_active()?;
        if self.property.is_some() {
            return Err(ProtocolError::UnclosedProperty);
        }
        let record = self.stack.pop().ok_or(ProtocolError::UnmatchedRecordEnd)?;

        match self.stack.last_mut() {
            Some(parent) => {
                parent.add_record(record);
            }
            None => self.root = Some(record),
        }
        Ok(())
    }

    fn property_start(&mut self) -> Result<(), ProtocolError> {
        self.ensure_active()?;
        if self.property.is_some() {
            return Err(ProtocolError::NestedProperty);
        }
        if self.stack.is_empty() {
            return Err(ProtocolError::PropertyOutsideRecord);
        }
        self.property = Some(PendingProperty::default());
        Ok(())
    }

    fn property_name(&mut self, name: &str) -> Result<(), ProtocolError> {
        let pending = self.open_property("property_name")?;
        pending.check_no_dangling_param()?;
        if pending.builder.has_name() {
            return Err(ProtocolError::DuplicatePropertyName);
        }
        pending.builder.set_name(name);
        Ok(())
    }

    fn property_param_type(&mut self, param_type: &str) -> Result<(), ProtocolError> {
        let pending = self.open_property("property_param_type")?;
        pending.check_no_dangling_param()?;
        if !pending.builder.has_name() {
            return Err(ProtocolError::NameNotSet {
                event: "property_param_type",
            });
        }
        if pending.builder.has_values() {
            return Err(ProtocolError::ParamAfterValues);
        }
        pending.param_type = Some(param_type.to_owned());
        Ok(())
    }

    fn property_param_value(&mut self, value: &str) -> Result<(), ProtocolError> {
        let pending = self.open_property("property_param_value")?;
        let param_type = pending
            .param_type
            .take()
            .ok_or(ProtocolError::ParamValueWithoutType)?;
        pending.builder.push_param(param_type, value);
        Ok(())
    }

    fn property_values(&mut self, values: Vec<String>) -> Result<(), ProtocolError> {
        let pending = self.open_property("property_values")?;
        pending.check_no_dangling_param()?;
        if !pending.builder.has_name() {
            return Err(ProtocolError::NameNotSet {
                event: "property_values",
            });
        }
        if pending.builder.has_values() {
            return Err(ProtocolError::DuplicateValues);
        }
        pending.builder.set_values(values);
        Ok(())
    }

    fn property_end(&mut self) -> Result<(), ProtocolError> {
        self.ensure_active()?;
        let pending = self.property.take().ok_or(ProtocolError::NoOpenProperty {
            event: "property_end",
        })?;
        pending.check_no_dangling_param()?;
        let property = pending.builder.build()?;

        trace!(name = property.name(), "property");
        let current = self
            .stack
            .last_mut()
            .ok_or(ProtocolError::PropertyOutsideRecord)?;
        current.add_property(property);
        Ok(())
    }
}
