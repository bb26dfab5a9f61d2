//! Chainable types.
//!
//! Wrap any [`Constructible`] base to get a [`Chainable`]: a type that builds
//! instances exactly like the base and exposes one extra operation (`next`
//! unless named otherwise) producing a new type with more members merged on
//! top. Behaviors resolve their siblings through the receiver they are
//! invoked on, so a behavior added early in a chain can use members added
//! later.
//!
//! ```
//! use chainable::{Base, Chainable, MemberSet, Receiver, Value};
//!
//! let a = Chainable::wrap(Base::record("Plain")).extend(MemberSet::new().data("a", "a"));
//! let b = a.extend(MemberSet::new().behavior("getA", |this, _| this.get("a")));
//! let z = b.extend(MemberSet::new().data("a", "z"));
//!
//! assert_eq!(b.call("getA", &[]), Ok(Value::from("a")));
//! assert_eq!(z.construct(&[]).unwrap().call("getA", &[]), Ok(Value::from("z")));
//! ```

pub mod base;
pub mod builtins;
pub mod chain;
pub mod error;
pub mod instance;
pub mod member;
pub mod receiver;
pub mod value;

pub use base::{Base, Constructible};
pub use chain::{Chainable, DEFAULT_OP};
pub use error::ChainError;
pub use instance::Instance;
pub use member::{Behavior, Member, MemberSet};
pub use receiver::Receiver;
pub use value::Value;

/// Insertion-ordered map with the Fx hasher, used for member sets and object fields.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
pub type FxIndexSet<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;
