//! Mapping engine integration tests
//!
//! Tests are organized by operation: saving objects, loading in strict mode,
//! loading in lenient mode, default projection and full round trips.

mod defaults;
mod lenient;
