//! Constructed values and their late-bound member view.

use std::sync::Arc;

use crate::FxIndexSet;
use crate::chain::Chainable;
use crate::error::ChainError;
use crate::member::Member;
use crate::receiver::{self, Receiver};
use crate::value::Value;

/// A value built by a [`Chainable`], seen through that type's members.
///
/// Own fields of the constructed value shadow composed members. The
/// chaining operation is class-level only and is not visible here.
#[derive(Debug, Clone)]
pub struct Instance {
    ty: Chainable,
    value: Value,
}

impl Instance {
    pub(crate) fn new(ty: Chainable, value: Value) -> Self {
        Self { ty, value }
    }

    /// The type this instance was constructed from.
    pub fn ty(&self) -> &Chainable {
        &self.ty
    }

    /// The value produced by the base constructor.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// True when constructed from `ty` or from any type extended from it.
    pub fn is_instance_of(&self, ty: &Chainable) -> bool {
        self.ty.is_descendant_of(ty)
    }

    /// Set an own field. Only object-valued instances have fields.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), ChainError> {
        let key = key.into();
        match &mut self.value {
            Value::Object(fields) => {
                Arc::make_mut(fields).insert(key, value);
                Ok(())
            }
            other => Err(ChainError::behavior(format!(
                "cannot set field `{key}` on non-object instance {}",
                other.to_text()
            ))),
        }
    }
}

impl Receiver for Instance {
    fn describe(&self) -> String {
        format!("instance of {}", self.ty.describe())
    }

    fn lookup(&self, key: &str) -> Option<Member> {
        if let Some(own) = self.value.get(key) {
            return Some(Member::Data(own.clone()));
        }
        match self.ty.member(key) {
            Some(Member::Extend) | None => None,
            Some(member) => Some(member.clone()),
        }
    }

    fn keys(&self) -> Vec<String> {
        // Own fields first; a member keeps the slot of the field it is shadowed by.
        let mut keys: FxIndexSet<String> = self
            .value
            .as_object()
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default();
        keys.extend(
            self.ty
                .members()
                .iter()
                .filter(|(_, member)| !member.is_extend())
                .map(|(key, _)| key.to_string()),
        );
        keys.into_iter().collect()
    }

    fn call(&self, key: &str, args: &[Value]) -> Result<Value, ChainError> {
        receiver::invoke(self, key, args)
    }
}
