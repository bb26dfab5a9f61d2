//! Wrapped types and the chaining operation.
//!
//! Each [`Chainable`] is one immutable step: the root produced by wrapping a
//! base, or the result of extending a previous step. A step holds the base's
//! construction behavior, the cumulative member set and the name of the
//! chaining operation. Extending allocates a new step and never touches the
//! receiver, so siblings branched from one step stay independent.

use std::fmt;
use std::sync::Arc;

use crate::base::Constructible;
use crate::error::ChainError;
use crate::instance::Instance;
use crate::member::{Member, MemberSet};
use crate::receiver::{self, Receiver};
use crate::value::Value;

/// Name of the chaining operation when none is given.
pub const DEFAULT_OP: &str = "next";

struct Step {
    base: Arc<dyn Constructible>,
    members: MemberSet,
    op_name: Arc<str>,
    parent: Option<Chainable>,
    depth: usize,
}

// Unlink the lineage iteratively; a nested Arc drop per step would
// recurse as deep as the chain.
impl Drop for Step {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            next = Arc::into_inner(parent.step).and_then(|mut step| step.parent.take());
        }
    }
}

/// A constructible type carrying an accumulated member set.
/// Cloning is O(1) and yields the same type.
#[derive(Clone)]
pub struct Chainable {
    step: Arc<Step>,
}

impl Chainable {
    /// Wrap `base` with the default operation name.
    pub fn wrap<B>(base: B) -> Self
    where
        B: Constructible + 'static,
    {
        Self::wrap_shared(Arc::new(base), None)
    }

    /// Wrap `base` with a custom operation name.
    pub fn wrap_named<B>(base: B, op_name: &str) -> Self
    where
        B: Constructible + 'static,
    {
        Self::wrap_shared(Arc::new(base), Some(op_name))
    }

    /// Start a chain from a shared base. An absent or empty operation name
    /// falls back to [`DEFAULT_OP`]. The base's statics seed the member set;
    /// a static with the operation's name is replaced by the operation.
    pub fn wrap_shared(base: Arc<dyn Constructible>, op_name: Option<&str>) -> Self {
        let op_name: Arc<str> = match op_name {
            Some(name) if !name.is_empty() => name.into(),
            _ => DEFAULT_OP.into(),
        };
        let mut members = base.statics();
        if members.insert(&*op_name, Member::Extend).is_some() {
            log::debug!("static `{op_name}` of {} replaced by the chaining operation", base.name());
        }
        log::debug!(
            "wrapped {} with operation `{op_name}` ({} statics)",
            base.name(),
            members.len() - 1
        );
        Self {
            step: Arc::new(Step {
                base,
                members,
                op_name,
                parent: None,
                depth: 0,
            }),
        }
    }

    /// Produce the next type in the chain: this type's members overridden
    /// key-wise by `new_members`. Construction and the operation name carry
    /// over unchanged.
    pub fn extend(&self, new_members: MemberSet) -> Self {
        let mut members = self.step.members.clone();
        let added = new_members.len();
        let overridden = members.merge(new_members);
        for key in &overridden {
            log::trace!("`{key}` overridden at depth {}", self.step.depth + 1);
        }
        log::trace!(
            "extended {} to depth {} (+{} members, {} overridden)",
            self.name(),
            self.step.depth + 1,
            added - overridden.len(),
            overridden.len()
        );
        Self {
            step: Arc::new(Step {
                base: self.step.base.clone(),
                members,
                op_name: self.step.op_name.clone(),
                parent: Some(self.clone()),
                depth: self.step.depth + 1,
            }),
        }
    }

    /// Invoke the chaining operation by name. Fails when `name` is not
    /// the operation chosen at the root, or a later member replaced it.
    pub fn op(&self, name: &str, new_members: MemberSet) -> Result<Self, ChainError> {
        match self.step.members.get(name) {
            Some(Member::Extend) => Ok(self.extend(new_members)),
            _ => Err(ChainError::UnknownOperation {
                name: name.to_string(),
                owner: self.describe(),
            }),
        }
    }

    /// Build an instance; arguments go to the base unchanged.
    pub fn construct(&self, args: &[Value]) -> Result<Instance, ChainError> {
        let value = self.step.base.construct(args)?;
        Ok(Instance::new(self.clone(), value))
    }

    /// Name of the base this chain was started from.
    pub fn name(&self) -> &str {
        self.step.base.name()
    }

    pub fn op_name(&self) -> &str {
        &self.step.op_name
    }

    pub fn members(&self) -> &MemberSet {
        &self.step.members
    }

    pub fn member(&self, key: &str) -> Option<&Member> {
        self.step.members.get(key)
    }

    /// Zero for the root.
    pub fn depth(&self) -> usize {
        self.step.depth
    }

    pub fn parent(&self) -> Option<&Chainable> {
        self.step.parent.as_ref()
    }

    /// This type followed by its predecessors, back to the root.
    pub fn lineage(&self) -> impl Iterator<Item = &Chainable> {
        std::iter::successors(Some(self), |ty| ty.parent())
    }

    /// Identity, not structural equality.
    pub fn same_type(&self, other: &Chainable) -> bool {
        Arc::ptr_eq(&self.step, &other.step)
    }

    /// True when `ancestor` is this type or one of its predecessors.
    pub fn is_descendant_of(&self, ancestor: &Chainable) -> bool {
        self.lineage().any(|ty| ty.same_type(ancestor))
    }
}

impl Receiver for Chainable {
    fn describe(&self) -> String {
        format!("{}#{}", self.name(), self.depth())
    }

    fn lookup(&self, key: &str) -> Option<Member> {
        self.step.members.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.step.members.keys().map(str::to_string).collect()
    }

    fn call(&self, key: &str, args: &[Value]) -> Result<Value, ChainError> {
        receiver::invoke(self, key, args)
    }
}

/// A wrapped type can itself be the base of a new chain; its members become
/// that chain's statics.
impl Constructible for Chainable {
    fn name(&self) -> &str {
        Chainable::name(self)
    }

    fn construct(&self, args: &[Value]) -> Result<Value, ChainError> {
        self.step.base.construct(args)
    }

    fn statics(&self) -> MemberSet {
        self.step.members.clone()
    }
}

impl fmt::Debug for Chainable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chainable")
            .field("base", &self.name())
            .field("op", &self.op_name())
            .field("depth", &self.depth())
            .field("members", &self.step.members.keys().collect::<Vec<_>>())
            .finish()
    }
}
