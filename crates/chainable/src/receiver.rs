//! Late-bound member resolution.
//!
//! Behaviors never capture the member set they were defined against. They
//! get the concrete receiver at call time and look siblings up through it, so
//! a behavior added early in a chain sees members added at any later step.

use crate::error::ChainError;
use crate::member::Member;
use crate::value::Value;

pub trait Receiver {
    /// Human readable owner used in errors.
    fn describe(&self) -> String;

    /// Resolve `key` against this receiver's full composed shape.
    fn lookup(&self, key: &str) -> Option<Member>;

    /// Every key visible through this receiver.
    fn keys(&self) -> Vec<String>;

    /// Invoke a behavior member with this receiver as its context.
    fn call(&self, key: &str, args: &[Value]) -> Result<Value, ChainError>;

    fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Read a data member.
    fn get(&self, key: &str) -> Result<Value, ChainError> {
        match self.lookup(key) {
            Some(Member::Data(value)) => Ok(value),
            Some(_) => Err(ChainError::NotData { key: key.to_string() }),
            None => Err(ChainError::missing(key, self.describe())),
        }
    }
}

/// Shared body of [`Receiver::call`].
pub(crate) fn invoke(receiver: &dyn Receiver, key: &str, args: &[Value]) -> Result<Value, ChainError> {
    match receiver.lookup(key) {
        Some(Member::Behavior(behavior)) => {
            log::trace!("calling `{key}` on {}", receiver.describe());
            behavior.invoke(receiver, args)
        }
        Some(_) => Err(ChainError::NotCallable { key: key.to_string() }),
        None => Err(ChainError::missing(key, receiver.describe())),
    }
}
