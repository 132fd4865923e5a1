//! Async runtime for the CLI binary.

use crate::error::Result;
use std::future::Future;

/// Run `future` on a fresh multi-threaded runtime.
///
/// The runtime is shut down without waiting on blocking tasks, so a provider
/// call left behind by the extraction timeout does not delay exit.
pub fn run_to_completion<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}
