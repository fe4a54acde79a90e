//! Process-wide cache of built schemas, keyed by type.
//!
//! Schemas are built outside the lock. If two threads race to build the same
//! type, the first one inserted wins and the other result is dropped.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::{Mapped, Schema, SchemaError};

type SchemaMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

static SCHEMAS: LazyLock<RwLock<SchemaMap>> = LazyLock::new(Default::default);

thread_local! {
    /// Types whose schema is being built on this thread, outermost first.
    static BUILDING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

/// Removes its type from the build stack when dropped, even on panic.
struct BuildGuard;

impl BuildGuard {
    fn enter(id: TypeId) -> Option<Self> {
        BUILDING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&id) {
                None
            } else {
                stack.push(id);
                Some(BuildGuard)
            }
        })
    }
}

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

fn lookup<T: Mapped>(id: TypeId) -> Option<Arc<Schema<T>>> {
    let schemas = SCHEMAS.read().unwrap_or_else(PoisonError::into_inner);
    let cached = Arc::clone(schemas.get(&id)?);
    cached.downcast::<Schema<T>>().ok()
}

pub(super) fn get_or_build<T: Mapped>() -> Result<Arc<Schema<T>>, SchemaError> {
    let id = TypeId::of::<T>();
    if let Some(schema) = lookup::<T>(id) {
        return Ok(schema);
    }

    let type_name = std::any::type_name::<T>();
    let schema = {
        let Some(_guard) = BuildGuard::enter(id) else {
            return Err(SchemaError::CyclicSection {
                type_name: type_name.to_string(),
            });
        };
        Arc::new(Schema::<T>::build()?)
    };
    tracing::debug!(
        type_name,
        fields = schema.descriptor().fields().len(),
        "Built mapping schema"
    );

    let mut schemas = SCHEMAS.write().unwrap_or_else(PoisonError::into_inner);
    let cached = schemas
        .entry(id)
        .or_insert_with(|| Arc::clone(&schema) as Arc<dyn Any + Send + Sync>);
    Ok(Arc::clone(cached).downcast::<Schema<T>>().unwrap_or(schema))
}
