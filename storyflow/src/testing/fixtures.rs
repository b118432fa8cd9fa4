//! Reference stories used across the test-suite.
//!
//! Each function returns the registry of one owner type. Numeric steps read
//! integer arguments and abort with a reason when one is missing.

use crate::context::Context;
use crate::contracts::Contract;
use crate::core::Outcome;
use crate::pipeline::{StepRegistry, StoryDefinition};
use serde_json::{json, Value};

fn story(owner: &str, name: &str, arguments: &[&str], slots: &[&str]) -> StoryDefinition {
    StoryDefinition {
        owner: owner.to_string(),
        name: name.to_string(),
        arguments: arguments.iter().map(|s| (*s).to_string()).collect(),
        slots: slots.iter().map(|s| (*s).to_string()).collect(),
        contract: Contract::new(),
    }
}

fn int(ctx: &Context, key: &str) -> Option<i64> {
    ctx.get(key).ok().and_then(Value::as_i64)
}

fn not_an_integer(key: &str) -> Outcome {
    Outcome::abort_because(format!("'{key}' is not an integer"))
}

fn one(_ctx: &Context) -> Outcome {
    Outcome::next()
}

/// Aborts when `a > 1`, ends the story when `b < 0`, otherwise sets `c = 4`.
fn two(ctx: &Context) -> Outcome {
    let Some(a) = int(ctx, "a") else {
        return not_an_integer("a");
    };
    let Some(b) = int(ctx, "b") else {
        return not_an_integer("b");
    };
    if a > 1 {
        Outcome::abort()
    } else if b < 0 {
        Outcome::skip()
    } else {
        Outcome::next_value("c", 4)
    }
}

/// Returns `b - c`.
fn three(ctx: &Context) -> Outcome {
    let Some(b) = int(ctx, "b") else {
        return not_an_integer("b");
    };
    let Some(c) = int(ctx, "c") else {
        return not_an_integer("c");
    };
    Outcome::returning(b - c)
}

/// Sets `a = d - 1` and `b = d + 1`.
fn before(ctx: &Context) -> Outcome {
    let Some(d) = int(ctx, "d") else {
        return not_an_integer("d");
    };
    Outcome::next_with([("a", json!(d - 1)), ("b", json!(d + 1))])
}

/// Returns `d * 2`.
fn after(ctx: &Context) -> Outcome {
    let Some(d) = int(ctx, "d") else {
        return not_an_integer("d");
    };
    Outcome::returning(d * 2)
}

fn simple_steps(registry: StepRegistry) -> StepRegistry {
    registry.step("one", one).step("two", two).step("three", three)
}

fn ctx_repr_steps(registry: StepRegistry) -> StepRegistry {
    registry
        .step("one", |_ctx: &Context| Outcome::next_value("bbb", 1))
        .step("two", |_ctx: &Context| Outcome::next_value("c", 2))
        .step("three", |_ctx: &Context| Outcome::next_value("dd", 3))
        .step("four", |ctx: &Context| Outcome::returning(ctx.render()))
}

/// `Empty.x`: a story with no slots.
#[must_use]
pub fn empty() -> StepRegistry {
    StepRegistry::new("Empty").story(story("Empty", "x", &[], &[]))
}

/// `EmptySubstory.y`: runs the empty story `x`.
#[must_use]
pub fn empty_substory() -> StepRegistry {
    StepRegistry::new("EmptySubstory")
        .story(story("EmptySubstory", "x", &[], &[]))
        .story(story("EmptySubstory", "y", &[], &["x"]))
}

/// `Simple.x(a, b)`: `one`, `two`, `three`.
#[must_use]
pub fn simple() -> StepRegistry {
    simple_steps(StepRegistry::new("Simple"))
        .story(story("Simple", "x", &["a", "b"], &["one", "two", "three"]))
}

/// `SimpleSubstory.y(d)`: `before`, `x`, `after`, and `SimpleSubstory.z`:
/// `first` (ends the story), `x`.
#[must_use]
pub fn simple_substory() -> StepRegistry {
    simple_steps(StepRegistry::new("SimpleSubstory"))
        .step("before", before)
        .step("after", after)
        .step("first", |_ctx: &Context| Outcome::skip())
        .story(story("SimpleSubstory", "x", &["a", "b"], &["one", "two", "three"]))
        .story(story("SimpleSubstory", "y", &["d"], &["before", "x", "after"]))
        .story(story("SimpleSubstory", "z", &["a", "b"], &["first", "x"]))
}

/// `SubstoryDI.y(d)`: `before`, `x`, `after`, where `x` must be injected.
#[must_use]
pub fn substory_di() -> StepRegistry {
    StepRegistry::new("SubstoryDI")
        .step("before", before)
        .step("after", after)
        .story(story("SubstoryDI", "y", &["d"], &["before", "x", "after"]))
}

/// `SimpleCtxRepr.x(aaaa)`: sets three keys and returns the rendered context.
#[must_use]
pub fn simple_ctx_repr() -> StepRegistry {
    ctx_repr_steps(StepRegistry::new("SimpleCtxRepr")).story(story(
        "SimpleCtxRepr",
        "x",
        &["aaaa"],
        &["one", "two", "three", "four"],
    ))
}

/// `SimpleSubstoryCtxRepr.y(e)`: sets `aaaa` and runs its own `x`.
#[must_use]
pub fn simple_substory_ctx_repr() -> StepRegistry {
    ctx_repr_steps(StepRegistry::new("SimpleSubstoryCtxRepr"))
        .step("before", |_ctx: &Context| Outcome::next_value("aaaa", 0))
        .story(story(
            "SimpleSubstoryCtxRepr",
            "x",
            &["aaaa"],
            &["one", "two", "three", "four"],
        ))
        .story(story("SimpleSubstoryCtxRepr", "y", &["e"], &["before", "x"]))
}

/// `SubstoryDICtxRepr.y(e)`: sets `aaaa` and runs an injected `x`.
#[must_use]
pub fn substory_di_ctx_repr() -> StepRegistry {
    StepRegistry::new("SubstoryDICtxRepr")
        .step("before", |_ctx: &Context| Outcome::next_value("aaaa", 0))
        .story(story("SubstoryDICtxRepr", "y", &["e"], &["before", "x"]))
}

/// `ExistedKey.x(a)`: tries to set its own argument again.
#[must_use]
pub fn existed_key() -> StepRegistry {
    StepRegistry::new("ExistedKey")
        .step("one", |_ctx: &Context| Outcome::next_value("a", 1))
        .story(story("ExistedKey", "x", &["a"], &["one"]))
}

/// `AttributeAccess.x()`: returns a value held by the owner itself.
#[must_use]
pub fn attribute_access() -> StepRegistry {
    let clients = true;
    StepRegistry::new("AttributeAccess")
        .step("one", move |_ctx: &Context| Outcome::returning(clients))
        .story(story("AttributeAccess", "x", &[], &["one"]))
}

/// `ImplementationDI.x(arg)`: returns `f(arg)`.
#[must_use]
pub fn implementation_di<F>(f: F) -> StepRegistry
where
    F: Fn(i64) -> i64 + Send + Sync + 'static,
{
    StepRegistry::new("ImplementationDI")
        .step("one", move |ctx: &Context| match int(ctx, "arg") {
            Some(arg) => Outcome::returning(f(arg)),
            None => not_an_integer("arg"),
        })
        .story(story("ImplementationDI", "x", &["arg"], &["one"]))
}
