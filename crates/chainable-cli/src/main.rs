use anyhow::{Context, Result, anyhow};
use chainable::{Base, Chainable, MemberSet, Receiver, Value, builtins};
use clap::{Parser as ClapParser, Subcommand};

#[derive(ClapParser)]
#[command(name = "chainable")]
#[command(about = "Build chains of extended types and inspect them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the string chain demo (a, then b + logA, then c + logABC)
    Demo {
        /// Name of the chaining operation
        #[arg(long, default_value = chainable::DEFAULT_OP)]
        op: String,
    },
    /// Wrap a builtin base and print the members of every step
    Describe {
        /// Builtin base: string, number, boolean or object
        #[arg(long, default_value = "object")]
        base: String,
        /// Name of the chaining operation
        #[arg(long, default_value = chainable::DEFAULT_OP)]
        op: String,
        /// One extension step as comma separated key=value pairs; repeatable
        #[arg(long = "step")]
        steps: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { op } => run_demo(&op)?,
        Commands::Describe { base, op, steps } => describe(&base, &op, &steps)?,
    }

    Ok(())
}

/// String-backed chain whose last step calls behaviors from earlier steps.
fn run_demo(op: &str) -> Result<()> {
    let base_string = Chainable::wrap_named(
        Base::extending(builtins::string(), "BaseString"),
        op,
    );
    // Empty names fall back to the default when wrapping.
    let op = base_string.op_name();

    let string_a = base_string.op(op, MemberSet::new().data("a", "a"))?;

    let string_b = string_a.op(
        op,
        MemberSet::new().data("b", "b").behavior("logA", |this, _| {
            let a = this.get("a")?;
            println!("{}", a.to_text());
            Ok(a)
        }),
    )?;

    let string_c = string_b.op(
        op,
        MemberSet::new().data("c", "c").behavior("logABC", |this, _| {
            let a = this.call("logA", &[])?;
            let (b, c) = (this.get("b")?, this.get("c")?);
            println!("{} {}", b.to_text(), c.to_text());
            Ok(Value::list([a, b, c]))
        }),
    )?;

    log::info!("built {:?}", string_c);

    let class_level = string_c.call("logABC", &[])?;
    let instance = string_c.construct(&[Value::from("hello")])?;
    let instance_level = instance.call("logABC", &[])?;

    println!(
        "{}",
        serde_json::json!({
            "op": string_c.op_name(),
            "depth": string_c.depth(),
            "members": string_c.members(),
            "class_level": class_level,
            "instance": instance.value(),
            "instance_level": instance_level,
        })
    );
    Ok(())
}

fn describe(base: &str, op: &str, steps: &[String]) -> Result<()> {
    let described = describe_chain(base, op, steps)?;
    println!("{}", serde_json::to_string_pretty(&described)?);
    Ok(())
}

fn describe_chain(base: &str, op: &str, steps: &[String]) -> Result<Vec<serde_json::Value>> {
    let base = builtins::by_name(base).ok_or_else(|| anyhow!("unknown base `{base}`"))?;
    let mut ty = Chainable::wrap_named(base, op);
    let op = ty.op_name().to_string();
    let mut described = vec![describe_step(&ty)];

    for step in steps {
        let members = parse_step(step).with_context(|| format!("invalid step `{step}`"))?;
        ty = ty.op(&op, members)?;
        described.push(describe_step(&ty));
    }

    Ok(described)
}

fn describe_step(ty: &Chainable) -> serde_json::Value {
    serde_json::json!({
        "type": ty.describe(),
        "op": ty.op_name(),
        "members": ty.members(),
    })
}

fn parse_step(step: &str) -> Result<MemberSet> {
    step.split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("expected key=value, got `{pair}`"))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(anyhow!("empty key in `{pair}`"));
            }
            Ok((key.to_string(), parse_value(value.trim())))
        })
        .collect()
}

fn parse_value(text: &str) -> Value {
    if let Ok(i) = text.parse::<i64>() {
        Value::int(i)
    } else if let Ok(f) = text.parse::<f64>() {
        Value::float(f)
    } else if let Ok(b) = text.parse::<bool>() {
        Value::bool(b)
    } else {
        Value::string(text)
    }
}
