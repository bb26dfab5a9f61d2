//! Instances of any step are built exactly as the base builds them.

use chainable::{Base, ChainError, Chainable, Constructible, MemberSet, Receiver, Value, builtins};

fn account() -> Base {
    Base::new("Account", |args| match args {
        [Value::String(owner), balance] => Ok(Value::object([
            ("owner", Value::String(owner.clone())),
            ("balance", balance.clone()),
        ])),
        _ => Err(ChainError::Construct {
            base: "Account".to_string(),
            reason: format!("expected (owner, balance), got {} arguments", args.len()),
        }),
    })
}

#[test]
fn construction_matches_the_base() {
    let args = [Value::from("ada"), Value::int(100)];
    let direct = account().construct(&args).unwrap();

    let ty = Chainable::wrap(account())
        .extend(MemberSet::new().data("currency", "EUR"))
        .extend(MemberSet::new().behavior("summary", |this, _| {
            Ok(Value::string(format!(
                "{}: {} {}",
                this.get("owner")?.to_text(),
                this.get("balance")?.to_text(),
                this.get("currency")?.to_text()
            )))
        }));
    let instance = ty.construct(&args).unwrap();

    assert_eq!(instance.value(), &direct);
    assert_eq!(instance.call("summary", &[]), Ok(Value::from("ada: 100 EUR")));
    assert!(instance.ty().same_type(&ty));
}

#[test]
fn constructor_errors_propagate() {
    let ty = Chainable::wrap(account()).extend(MemberSet::new().data("currency", "EUR"));
    assert!(matches!(ty.construct(&[]), Err(ChainError::Construct { .. })));
}

#[test]
fn builtin_instances_keep_their_value() {
    let ty = Chainable::wrap(builtins::string()).extend(MemberSet::new().data("a", "a"));
    let s = ty.construct(&[Value::int(7)]).unwrap();

    assert_eq!(s.value(), &Value::from("7"));
    assert_eq!(s.get("a"), Ok(Value::from("a")));
    assert_eq!(s.into_value(), builtins::string().construct(&[Value::int(7)]).unwrap());
}

#[test]
fn instance_shape_is_the_type_at_construction() {
    let ty = Chainable::wrap(Base::record("Plain")).extend(MemberSet::new().data("a", 1));
    let early = ty.construct(&[]).unwrap();
    let _later = ty.extend(MemberSet::new().data("b", 2));

    assert!(!early.has("b"));
    assert_eq!(early.keys(), vec!["a"]);
}
