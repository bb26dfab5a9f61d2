//! Members and member sets.
//!
//! A member set is the whole class-level shape accumulated by a chain up to
//! one step. Merging is right-biased by key: the incoming set always wins.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::FxIndexMap;
use crate::error::ChainError;
use crate::receiver::Receiver;
use crate::value::Value;

type BehaviorFn = dyn Fn(&dyn Receiver, &[Value]) -> Result<Value, ChainError> + Send + Sync;

/// A function member. The receiver is supplied on every call, so sibling
/// members are resolved against whatever value the behavior ends up invoked on.
#[derive(Clone)]
pub struct Behavior {
    f: Arc<BehaviorFn>,
}

impl Behavior {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn Receiver, &[Value]) -> Result<Value, ChainError> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    pub fn invoke(&self, receiver: &dyn Receiver, args: &[Value]) -> Result<Value, ChainError> {
        (self.f)(receiver, args)
    }

    pub fn ptr_eq(&self, other: &Behavior) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Behavior(..)")
    }
}

#[derive(Debug, Clone)]
pub enum Member {
    Data(Value),
    Behavior(Behavior),
    /// Marks the chaining operation. Lives under the name chosen at the root
    /// and is overridable like any other member.
    Extend,
}

impl Member {
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Member::Data(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_extend(&self) -> bool {
        matches!(self, Member::Extend)
    }

    /// Short tag used in descriptions and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Member::Data(_) => "data",
            Member::Behavior(_) => "behavior",
            Member::Extend => "extend",
        }
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Member::Data(a), Member::Data(b)) => a == b,
            (Member::Behavior(a), Member::Behavior(b)) => a.ptr_eq(b),
            (Member::Extend, Member::Extend) => true,
            _ => false,
        }
    }
}

impl From<Value> for Member {
    fn from(v: Value) -> Self {
        Member::Data(v)
    }
}

impl From<Behavior> for Member {
    fn from(b: Behavior) -> Self {
        Member::Behavior(b)
    }
}

/// Keyed members with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberSet {
    entries: FxIndexMap<String, Member>,
}

impl MemberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add or replace a data member.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, Member::Data(value.into()));
        self
    }

    /// Builder: add or replace a behavior member.
    pub fn behavior<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&dyn Receiver, &[Value]) -> Result<Value, ChainError> + Send + Sync + 'static,
    {
        self.insert(key, Member::Behavior(Behavior::new(f)));
        self
    }

    /// Insert a member, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, member: Member) -> Option<Member> {
        self.entries.insert(key.into(), member)
    }

    pub fn get(&self, key: &str) -> Option<&Member> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.entries.iter().map(|(k, m)| (k.as_str(), m))
    }

    /// Merge `other` into `self`. Keys of `other` win; returns the keys that
    /// were overridden.
    pub fn merge(&mut self, other: MemberSet) -> Vec<String> {
        let mut overridden = Vec::new();
        for (key, member) in other.entries {
            if self.entries.contains_key(&key) {
                overridden.push(key.clone());
            }
            self.entries.insert(key, member);
        }
        overridden
    }

    /// Non-mutating merge.
    pub fn merged(&self, other: MemberSet) -> MemberSet {
        let mut next = self.clone();
        next.merge(other);
        next
    }
}

impl<K: Into<String>, M: Into<Member>> FromIterator<(K, M)> for MemberSet {
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        let mut set = MemberSet::new();
        for (key, member) in iter {
            set.insert(key, member.into());
        }
        set
    }
}

/// Data members serialize as their value; behaviors and the chaining
/// operation serialize as a kind tag.
impl Serialize for MemberSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, member) in &self.entries {
            match member {
                Member::Data(value) => map.serialize_entry(key, value)?,
                other => map.serialize_entry(key, &format!("<{}>", other.kind()))?,
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_right_biased() {
        let mut left = MemberSet::new().data("a", "a").data("keep", 1);
        let overridden = left.merge(MemberSet::new().data("a", "z").data("b", "b"));

        assert_eq!(overridden, vec!["a".to_string()]);
        assert_eq!(left.get("a"), Some(&Member::Data(Value::from("z"))));
        assert_eq!(left.get("keep"), Some(&Member::Data(Value::int(1))));
        assert_eq!(left.get("b"), Some(&Member::Data(Value::from("b"))));
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn merged_leaves_receiver_untouched() {
        let base = MemberSet::new().data("c", 0);
        let next = base.merged(MemberSet::new().data("c", 1));

        assert_eq!(base.get("c").and_then(Member::as_data), Some(&Value::int(0)));
        assert_eq!(next.get("c").and_then(Member::as_data), Some(&Value::int(1)));
    }

    #[test]
    fn behavior_can_replace_data() {
        let set = MemberSet::new()
            .data("a", 1)
            .behavior("a", |_, _| Ok(Value::int(2)));
        assert_eq!(set.get("a").map(Member::kind), Some("behavior"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serializes_members_by_kind() {
        let mut set = MemberSet::new()
            .data("a", "a")
            .behavior("getA", |this, _| this.get("a"));
        set.insert("next", Member::Extend);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"a": "a", "getA": "<behavior>", "next": "<extend>"})
        );
    }
}
