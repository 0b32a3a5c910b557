//! Shared thread pool for counter-seeded bootstrap iterations.

use std::sync::OnceLock;

use rayon::ThreadPool;

static THREAD_POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

/// Get or initialize the shared pool, one worker per logical CPU.
///
/// Returns `None` if the pool could not be built; callers then fall back to
/// rayon's global pool.
pub fn get_thread_pool() -> Option<&'static ThreadPool> {
    THREAD_POOL
        .get_or_init(|| {
            rayon::ThreadPoolBuilder::new()
                .thread_name(|i| format!("copula-bootstrap-{i}"))
                .build()
                .map_err(|err| tracing::warn!("falling back to the global rayon pool: {}", err))
                .ok()
        })
        .as_ref()
}

/// Execute a parallel operation on the shared pool.
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    match get_thread_pool() {
        Some(pool) => pool.install(op),
        None => op(),
    }
}
