/*! Integration tests for confmap.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - tree: Tests for the configuration tree model
 * - schema: Tests for schema construction and validation
 * - mapper: Tests for loading and saving mapped types, organized by operation
 * - adapter: Tests for the INI and JSON format adapters
 * - facade: Tests for reader, writer and file entry points
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("confmap=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod mapper;
mod schema;
