#[macro_use]
extern crate tracing;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{oneshot, Semaphore};

pub type SharedExecutorPool = Arc<ExecutorPool>;

/// A thread pool that waits for a given task to complete
/// before resolving the future.
///
/// Corrections are CPU bound, this keeps them off the async scheduler
/// while capping how many can run at once.
pub struct ExecutorPool {
    limiter: Semaphore,
    thread_pool: rayon::ThreadPool,
    concurrency: usize,
}

impl ExecutorPool {
    /// Creates a new thread pool with a set concurrency.
    ///
    /// The set concurrency determines the number of threads spawned,
    /// a concurrency of `0` is treated as `1`.
    pub fn create(max_concurrency: usize) -> Result<Self> {
        let concurrency = max_concurrency.max(1);
        let limiter = Semaphore::new(concurrency);
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .thread_name(|n| format!("correction-worker-{}", n))
            .num_threads(concurrency)
            .panic_handler(|_| error!("correction worker panicked while running a task"))
            .build()?;

        Ok(Self {
            limiter,
            thread_pool,
            concurrency,
        })
    }

    #[inline]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Spawns a new function into the pool and returns
    /// the results once complete.
    ///
    /// A task that panics resolves to an error rather than taking
    /// the worker down with it.
    pub async fn spawn<F, T>(&self, func: F) -> Result<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let _permit = self.limiter.acquire().await?;
        let (tx, rx) = oneshot::channel();
        self.thread_pool.spawn(move || {
            let result = func();
            let _ = tx.send(result);
        });

        Ok(rx.await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_returns_result() -> Result<()> {
        let pool = ExecutorPool::create(2)?;

        let value = pool.spawn(|| "goreng".len()).await?;
        assert_eq!(value, 6);

        Ok(())
    }

    #[tokio::test]
    async fn test_runs_off_the_calling_thread() -> Result<()> {
        let pool = ExecutorPool::create(1)?;

        let name = pool
            .spawn(|| std::thread::current().name().map(String::from))
            .await?;

        assert_eq!(name.as_deref(), Some("correction-worker-0"));

        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_spawns() -> Result<()> {
        let pool = Arc::new(ExecutorPool::create(0)?);
        assert_eq!(pool.concurrency(), 1);

        let mut handles = Vec::new();
        for i in 0..8u64 {
            let pool = pool.clone();
            handles.push(tokio::spawn(async move { pool.spawn(move || i * 2).await }));
        }

        let mut total = 0;
        for handle in handles {
            total += handle.await??;
        }

        assert_eq!(total, (0..8u64).map(|i| i * 2).sum::<u64>());

        Ok(())
    }

    #[tokio::test]
    async fn test_panicking_task_is_an_error() -> Result<()> {
        let pool = ExecutorPool::create(1)?;

        let res = pool.spawn(|| -> usize { panic!("boom") }).await;
        assert!(res.is_err());

        let value = pool.spawn(|| 1usize).await?;
        assert_eq!(value, 1);

        Ok(())
    }
}
