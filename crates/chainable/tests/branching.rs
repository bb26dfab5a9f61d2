//! Extending never mutates the receiver.

use std::thread;

use chainable::{Base, Chainable, MemberSet, Receiver, Value};

#[test]
fn sibling_branches_are_independent() {
    let receiver = Chainable::wrap(Base::record("Plain")).extend(MemberSet::new().data("c", 0));
    let before = receiver.members().clone();

    let branch_a = receiver.extend(MemberSet::new().data("c", 1).data("only_a", true));
    let branch_b = receiver.extend(MemberSet::new().data("c", 2));

    assert_eq!(branch_a.get("c"), Ok(Value::int(1)));
    assert_eq!(branch_b.get("c"), Ok(Value::int(2)));
    assert_eq!(receiver.get("c"), Ok(Value::int(0)));
    assert!(!branch_b.has("only_a"));
    assert!(!receiver.has("only_a"));
    assert_eq!(receiver.members(), &before);
    assert!(branch_a.parent().is_some_and(|p| p.same_type(&receiver)));
    assert!(branch_b.parent().is_some_and(|p| p.same_type(&receiver)));
}

#[test]
fn receiver_without_the_key_stays_without_it() {
    let receiver = Chainable::wrap(Base::record("Plain"));
    let _a = receiver.extend(MemberSet::new().data("c", 1));
    let _b = receiver.extend(MemberSet::new().data("c", 2));
    assert!(!receiver.has("c"));
}

#[test]
fn concurrent_extension_from_one_receiver() {
    let receiver = Chainable::wrap(Base::record("Shared"))
        .extend(MemberSet::new().behavior("getC", |this, _| this.get("c")));

    let branches: Vec<Chainable> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let receiver = &receiver;
                scope.spawn(move || receiver.extend(MemberSet::new().data("c", i)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, branch) in branches.iter().enumerate() {
        assert_eq!(branch.call("getC", &[]), Ok(Value::int(i as i64)));
        assert_eq!(branch.depth(), 2);
    }
    assert!(!receiver.has("c"));
}
