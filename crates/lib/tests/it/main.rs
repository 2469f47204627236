/*! Integration tests for Immutree.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - set: Tests for the path setter (sharing, no-op writes, vivification)
 * - merge: Tests for the merge engine (shallow, deep, replace, mergers)
 * - update: Tests for the updater and path-scoped merges
 * - without: Tests for key removal
 * - array: Tests for the sequence primitives
 * - chain: Tests for the chaining builder
 * - path: Tests for path parsing and construction
 * - concurrency: Tests for sharing values across threads
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("immutree=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod chain;
mod helpers;
mod set;
mod update;
mod without;
