use rayoff as rayon;

pub use rayon::iter;
pub use rayon::prelude;
pub use rayon::slice;
pub use rayon::ThreadPoolBuildError;

pub use rayon::current_num_threads;
pub use rayon::join;
pub use rayon::scope;

#[derive(Debug, Default)]
pub struct ThreadPoolBuilder {
    builder: rayon::ThreadPoolBuilder,
}

impl ThreadPoolBuilder {
    pub fn new() -> Self {
        Self {
            builder: rayon::ThreadPoolBuilder::new(),
        }
    }
    pub fn num_threads(self, num_threads: usize) -> Self {
        Self {
            builder: self.builder.num_threads(num_threads),
        }
    }
    /// Runs `f` against a pool whose threads live exactly as long as the call.
    pub fn build_scoped<R>(
        self,
        f: impl FnOnce(&ThreadPool<'_>) -> R,
    ) -> Result<R, ThreadPoolBuildError> {
        self.builder
            .thread_name(|i| format!("edist-worker-{i}"))
            .panic_handler(|_| {
                log::error!("Asynchronous task panicked.");
            })
            .build_scoped(
                |thread| thread.run(),
                |pool| {
                    let pool = ThreadPool::new(pool);
                    f(&pool)
                },
            )
    }
}

pub struct ThreadPool<'a> {
    pool: &'a rayon::ThreadPool,
}

impl<'a> ThreadPool<'a> {
    fn new(pool: &'a rayon::ThreadPool) -> Self {
        Self { pool }
    }
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
    pub fn current_num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::*;

    #[test]
    fn scoped_pool_runs_work() {
        let sum = ThreadPoolBuilder::new()
            .num_threads(3)
            .build_scoped(|pool| {
                assert_eq!(pool.current_num_threads(), 3);
                pool.install(|| (0..1000u64).into_par_iter().sum::<u64>())
            })
            .unwrap();
        assert_eq!(sum, 499_500);
    }
}
