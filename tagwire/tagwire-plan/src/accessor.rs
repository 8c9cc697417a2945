//! Externally supplied accessor functions.
//!
//! Members whose values must not be read or written directly name a getter
//! and/or setter. The names are resolved against an [`AccessorTable`] once,
//! at plan-compile time.

use std::{collections::HashMap, fmt, sync::Arc};

use tagwire_core::{Message, Value, ValueTypeError};

type GetFn = dyn Fn(&Message) -> Option<Value> + Send + Sync;
type SetFn = dyn Fn(&mut Message, Value) -> Result<(), ValueTypeError> + Send + Sync;

/// Reads a member's current value from an instance.
#[derive(Clone)]
pub struct Getter {
    name: Arc<str>,
    func: Arc<GetFn>,
}

impl Getter {
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&Message) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, message: &Message) -> Option<Value> {
        (self.func)(message)
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Getter({})", self.name)
    }
}

/// Stores a decoded member value into an instance.
#[derive(Clone)]
pub struct Setter {
    name: Arc<str>,
    func: Arc<SetFn>,
}

impl Setter {
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&mut Message, Value) -> Result<(), ValueTypeError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&self, message: &mut Message, value: Value) -> Result<(), ValueTypeError> {
        (self.func)(message, value)
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Setter({})", self.name)
    }
}

/// Name → accessor mapping consulted by the plan compiler.
#[derive(Debug, Clone, Default)]
pub struct AccessorTable {
    getters: HashMap<String, Getter>,
    setters: HashMap<String, Setter>,
}

impl AccessorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_getter<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&Message) -> Option<Value> + Send + Sync + 'static,
    {
        self.register_getter(name, func);
        self
    }

    pub fn with_setter<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&mut Message, Value) -> Result<(), ValueTypeError> + Send + Sync + 'static,
    {
        self.register_setter(name, func);
        self
    }

    pub fn register_getter<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&Message) -> Option<Value> + Send + Sync + 'static,
    {
        self.getters.insert(name.to_string(), Getter::new(name, func));
    }

    pub fn register_setter<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&mut Message, Value) -> Result<(), ValueTypeError> + Send + Sync + 'static,
    {
        self.setters.insert(name.to_string(), Setter::new(name, func));
    }

    pub fn getter(&self, name: &str) -> Option<&Getter> {
        self.getters.get(name)
    }

    pub fn setter(&self, name: &str) -> Option<&Setter> {
        self.setters.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.getters.is_empty() && self.setters.is_empty()
    }
}
