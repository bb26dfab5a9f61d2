//! Constructible bases.
//!
//! A base pairs a construction behavior with its own class-level members
//! ("statics"). Chains start from any [`Constructible`].

use std::fmt;
use std::sync::Arc;

use crate::error::ChainError;
use crate::member::{Behavior, Member, MemberSet};
use crate::receiver::Receiver;
use crate::value::Value;

pub trait Constructible: Send + Sync {
    fn name(&self) -> &str;

    /// Build the underlying instance value from constructor arguments.
    fn construct(&self, args: &[Value]) -> Result<Value, ChainError>;

    /// Class-level members present before any wrapping.
    fn statics(&self) -> MemberSet;
}

impl<T: Constructible + ?Sized> Constructible for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn construct(&self, args: &[Value]) -> Result<Value, ChainError> {
        (**self).construct(args)
    }

    fn statics(&self) -> MemberSet {
        (**self).statics()
    }
}

type ConstructorFn = dyn Fn(&[Value]) -> Result<Value, ChainError> + Send + Sync;

/// User-defined base.
#[derive(Clone)]
pub struct Base {
    name: String,
    constructor: Arc<ConstructorFn>,
    statics: MemberSet,
}

impl Base {
    pub fn new<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ChainError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            constructor: Arc::new(constructor),
            statics: MemberSet::new(),
        }
    }

    /// A base whose instances are empty objects; arguments are ignored.
    pub fn record(name: impl Into<String>) -> Self {
        Self::new(name, |_| Ok(Value::empty_object()))
    }

    /// Subclass `parent`: construction forwards to it and its statics are
    /// inherited, to be added to or shadowed by this base's own.
    pub fn extending<P>(parent: P, name: impl Into<String>) -> Self
    where
        P: Constructible + 'static,
    {
        let statics = parent.statics();
        Self {
            name: name.into(),
            constructor: Arc::new(move |args: &[Value]| parent.construct(args)),
            statics,
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.statics.insert(key, Member::Data(value.into()));
        self
    }

    pub fn with_behavior<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&dyn Receiver, &[Value]) -> Result<Value, ChainError> + Send + Sync + 'static,
    {
        self.statics.insert(key, Member::Behavior(Behavior::new(f)));
        self
    }
}

impl Constructible for Base {
    fn name(&self) -> &str {
        &self.name
    }

    fn construct(&self, args: &[Value]) -> Result<Value, ChainError> {
        (self.constructor)(args)
    }

    fn statics(&self) -> MemberSet {
        self.statics.clone()
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Base")
            .field("name", &self.name)
            .field("statics", &self.statics.keys().collect::<Vec<_>>())
            .finish()
    }
}
