//! Resolver handle for concurrent callers
//!
//! Every registration and override application goes through one mutex per
//! registry, so the cycle guard and memoization observe a consistent registry
//! mid-resolution. Independent runs should use independent handles.

use std::sync::{Arc, Mutex, MutexGuard};

use error_stack::Report;

use super::TypeResolver;
use crate::descriptor::{Describe, TypeDescriptor};
use crate::error::{Error, Result};
use crate::schema::{FieldOverrides, SchemaObject, SchemaRegistry};

/// Cloneable, thread-safe handle to one [`TypeResolver`]
#[derive(Debug, Clone, Default)]
pub struct SharedResolver {
    inner: Arc<Mutex<TypeResolver>>,
}

impl SharedResolver {
    /// Create a handle around a fresh resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `descriptor` under the lock
    pub fn resolve(&self, descriptor: &TypeDescriptor) -> Result<SchemaObject> {
        Ok(self.lock()?.resolve(descriptor))
    }

    /// Resolve the descriptor of `T` under the lock
    pub fn resolve_type<T: Describe + ?Sized>(&self) -> Result<SchemaObject> {
        Ok(self.lock()?.resolve_type::<T>())
    }

    /// Apply overrides under the lock
    pub fn apply_overrides(
        &self,
        schema: &SchemaObject,
        overrides: &FieldOverrides,
    ) -> Result<SchemaObject> {
        Ok(self.lock()?.apply_overrides(schema, overrides))
    }

    /// Run `f` with exclusive access to the resolver
    pub fn with_resolver<R>(&self, f: impl FnOnce(&mut TypeResolver) -> R) -> Result<R> {
        Ok(f(&mut *self.lock()?))
    }

    /// Copy of the registry as it stands
    pub fn snapshot(&self) -> Result<SchemaRegistry> {
        Ok(self.lock()?.registry().clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, TypeResolver>> {
        self.inner
            .lock()
            .map_err(|e| Report::new(Error::RegistryPoisoned(e.to_string())))
    }
}

impl From<TypeResolver> for SharedResolver {
    fn from(resolver: TypeResolver) -> Self {
        Self {
            inner: Arc::new(Mutex::new(resolver)),
        }
    }
}
