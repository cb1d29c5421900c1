//! Two records built independently with the same content: reuse hands back
//! the old one, so an identity check is enough to skip work downstream.
//!
//! Run with `RUST_LOG=trace cargo run --example basic` to see the reuser's
//! trace output.

use tola_reuse::{list, record, Reuser, Symbol, Timestamp, Value};

fn build(tag: &Symbol, now: Timestamp) -> Value {
    record! {
        "foo" => 42,
        "bar" => list![1, 6],
        "z" => now,
        tag => 8,
    }
}

fn main() {
    env_logger::init();

    let s = Symbol::described("s");
    let now = Timestamp::now();

    let x = build(&s, now);
    let y = build(&s, now);

    let outcome = Reuser::new().reuse_with_stats(&y, &x);

    println!("{:?}", outcome.value);
    println!("{}", outcome.value.same(&x)); // true
    println!("{:?}", outcome.stats);

    // One changed field: the record is rebuilt, the untouched list is shared
    let z = record! {
        "foo" => 43,
        "bar" => list![1, 6],
        "z" => now,
        &s => 8,
    };
    let partial = Reuser::new().reuse(&z, &x);
    let bar = |v: &Value| v.as_record().and_then(|r| r.get("bar")).cloned();
    println!("{}", partial.same(&x)); // false
    println!(
        "{}",
        bar(&partial).zip(bar(&x)).is_some_and(|(a, b)| a.same(&b))
    ); // true
}
