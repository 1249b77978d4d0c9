// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry fixtures that record every call they receive.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::{Args, ClassBuilder, HandlerError, Registry};

/// A recorded invocation: `(target, positional args)`.
pub type Call = (String, Vec<Value>);

#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn record(&self, target: &str, args: &[Value]) {
        self.calls.lock().push((target.to_string(), args.to_vec()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn targets(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(target, _)| target.clone()).collect()
    }
}

pub struct MyClass {
    name: String,
}

/// `mymod` with functions `f`, `boom`, `panics` and class `MyClass`,
/// plus `broken` whose class `Broken` always fails to construct.
pub fn recording_registry() -> (Registry, CallLog) {
    let log = CallLog::default();
    let (f_log, boom_log, panic_log, new_log, method_log) =
        (log.clone(), log.clone(), log.clone(), log.clone(), log.clone());

    let registry = Registry::builder()
        .function("mymod", "f", move |args: Args| {
            f_log.record("mymod.f", &args.positional);
            let a: i64 = args.get(0)?;
            let b: i64 = args.get(1)?;
            Ok(json!(a + b))
        })
        .function("mymod", "boom", move |args: Args| {
            boom_log.record("mymod.boom", &args.positional);
            Err(HandlerError::msg("boom"))
        })
        .function("mymod", "panics", move |args: Args| {
            panic_log.record("mymod.panics", &args.positional);
            panic!("handler panicked");
        })
        .class(
            "mymod",
            "MyClass",
            ClassBuilder::new(move |args: Args| {
                new_log.record("mymod:MyClass", &args.positional);
                Ok(MyClass { name: args.get(0)? })
            })
            .method("method", move |this: &mut MyClass, args| {
                method_log.record("mymod:MyClass.method", &args.positional);
                Ok(json!(this.name))
            }),
        )
        .class(
            "broken",
            "Broken",
            ClassBuilder::<MyClass>::new(|_| Err(HandlerError::msg("cannot build"))),
        )
        .module("empty")
        .build();

    (registry, log)
}
