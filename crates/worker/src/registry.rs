// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler registry: what a job path and callable resolve to.
//!
//! Modules hold free functions and classes. A class is a constructor plus a
//! method table; each job builds a fresh instance, so instances never
//! outlive the job that created them.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tw_core::{CallableLocation, Kwargs, Locate, LocateError};

use crate::error::HandlerError;

pub type HandlerResult = Result<Value, HandlerError>;

type FunctionHandler = Arc<dyn Fn(Args) -> HandlerResult + Send + Sync>;
pub(crate) type Instance = Box<dyn Any + Send>;
type Constructor = Arc<dyn Fn(Args) -> Result<Instance, HandlerError> + Send + Sync>;
type MethodHandler = Arc<dyn Fn(&mut (dyn Any + Send), Args) -> HandlerResult + Send + Sync>;

/// Positional and keyword arguments passed to a handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub positional: Vec<Value>,
    pub keyword: Kwargs,
}

impl Args {
    pub fn new(positional: Vec<Value>, keyword: Kwargs) -> Self {
        Self { positional, keyword }
    }

    /// Positional argument `index`, deserialized.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T, HandlerError> {
        let value = self
            .positional
            .get(index)
            .ok_or_else(|| HandlerError::MissingArgument(index.to_string()))?;
        serde_json::from_value(value.clone())
            .map_err(|source| HandlerError::InvalidArgument { name: index.to_string(), source })
    }

    /// Keyword argument `name`, deserialized; `None` when absent.
    pub fn kwarg<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, HandlerError> {
        self.keyword
            .get(name)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|source| {
                    HandlerError::InvalidArgument { name: name.to_string(), source }
                })
            })
            .transpose()
    }

    /// Positional `index`, else keyword `name`, else `default`.
    pub fn arg_or<T: DeserializeOwned>(
        &self,
        index: usize,
        name: &str,
        default: T,
    ) -> Result<T, HandlerError> {
        if index < self.positional.len() {
            return self.get(index);
        }
        Ok(self.kwarg(name)?.unwrap_or(default))
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A registered class: constructor and methods on the constructed value.
pub(crate) struct Class {
    construct: Constructor,
    methods: HashMap<String, MethodHandler>,
}

impl Class {
    pub(crate) fn construct(&self, args: Args) -> Result<Instance, HandlerError> {
        (self.construct)(args)
    }

    pub(crate) fn method(&self, name: &str) -> Option<&MethodHandler> {
        self.methods.get(name)
    }
}

#[derive(Default)]
pub(crate) struct Module {
    functions: HashMap<String, FunctionHandler>,
    classes: HashMap<String, Class>,
}

impl Module {
    pub(crate) fn function(&self, name: &str) -> Option<&FunctionHandler> {
        self.functions.get(name)
    }

    pub(crate) fn class(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }
}

/// Typed builder for a class of instance type `T`.
pub struct ClassBuilder<T> {
    construct: Constructor,
    methods: HashMap<String, MethodHandler>,
    _instance: PhantomData<fn() -> T>,
}

impl<T: Any + Send> ClassBuilder<T> {
    pub fn new<C>(construct: C) -> Self
    where
        C: Fn(Args) -> Result<T, HandlerError> + Send + Sync + 'static,
    {
        Self {
            construct: Arc::new(move |args| construct(args).map(|t| Box::new(t) as Instance)),
            methods: HashMap::new(),
            _instance: PhantomData,
        }
    }

    pub fn method<M>(mut self, name: &str, method: M) -> Self
    where
        M: Fn(&mut T, Args) -> HandlerResult + Send + Sync + 'static,
    {
        let handler: MethodHandler = Arc::new(move |instance: &mut (dyn Any + Send), args| {
            match instance.downcast_mut::<T>() {
                Some(this) => method(this, args),
                None => Err(HandlerError::msg("instance does not match its class")),
            }
        });
        self.methods.insert(name.to_string(), handler);
        self
    }

    fn build(self) -> Class {
        Class { construct: self.construct, methods: self.methods }
    }
}

/// Immutable lookup table from module paths to handlers. Cheap to clone.
#[derive(Clone, Default)]
pub struct Registry {
    modules: Arc<HashMap<String, Module>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub(crate) fn module(&self, path: &str) -> Option<&Module> {
        self.modules.get(path)
    }

    pub fn has_module(&self, path: &str) -> bool {
        self.modules.contains_key(path)
    }

    /// A registered target by path (`module` or `module:Class`) and member name.
    pub fn target<'a>(&'a self, path: &'a str, name: &'a str) -> Registered<'a> {
        Registered { registry: self, path, name }
    }

    fn contains(&self, path: &str, name: &str) -> bool {
        let (module, class) = match path.split_once(':') {
            Some((module, class)) => (module, Some(class)),
            None => (path, None),
        };
        let Some(module) = self.module(module) else {
            return false;
        };
        match class {
            Some(class) => module.class(class).is_some_and(|c| c.method(name).is_some()),
            None => module.function(name).is_some(),
        }
    }
}

/// A reference into a [`Registry`]; locates only if the target is registered.
#[derive(Clone, Copy)]
pub struct Registered<'a> {
    registry: &'a Registry,
    path: &'a str,
    name: &'a str,
}

impl Locate for Registered<'_> {
    fn locate(&self) -> Result<CallableLocation, LocateError> {
        if self.registry.contains(self.path, self.name) {
            Ok(CallableLocation::new(self.path, self.name))
        } else {
            Err(LocateError::NotCallable(format!("{}.{}", self.path, self.name)))
        }
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    modules: HashMap<String, Module>,
}

impl RegistryBuilder {
    /// Register a module-level function.
    pub fn function<F>(mut self, module: &str, name: &str, function: F) -> Self
    where
        F: Fn(Args) -> HandlerResult + Send + Sync + 'static,
    {
        self.modules
            .entry(module.to_string())
            .or_default()
            .functions
            .insert(name.to_string(), Arc::new(function));
        self
    }

    /// Register a class under `module`.
    pub fn class<T: Any + Send>(mut self, module: &str, name: &str, class: ClassBuilder<T>) -> Self {
        self.modules
            .entry(module.to_string())
            .or_default()
            .classes
            .insert(name.to_string(), class.build());
        self
    }

    /// Register an empty module (importable, but with no members).
    pub fn module(mut self, module: &str) -> Self {
        self.modules.entry(module.to_string()).or_default();
        self
    }

    pub fn build(self) -> Registry {
        Registry { modules: Arc::new(self.modules) }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
