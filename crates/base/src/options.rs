use crate::error::OptionsError;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct KernelOptions {
    /// Worker threads for the distance kernel. `1` keeps it on the caller's thread.
    #[serde(default = "KernelOptions::default_threads")]
    #[validate(range(min = 1, max = 256))]
    pub threads: u16,
    /// Minimum `rows * cols * dims` before the work is split across threads.
    #[serde(default = "KernelOptions::default_parallel_threshold")]
    #[validate(range(min = 1))]
    pub parallel_threshold: u64,
}

impl KernelOptions {
    fn default_threads() -> u16 {
        1
    }
    fn default_parallel_threshold() -> u64 {
        65536
    }
    pub fn check(&self) -> Result<(), OptionsError> {
        self.validate().map_err(|e| OptionsError::Invalid {
            reason: e.to_string(),
        })
    }
    /// Whether a problem of this size should take the parallel path.
    pub fn is_parallel(&self, rows: usize, cols: usize, dims: usize) -> bool {
        if self.threads <= 1 {
            return false;
        }
        let work = (rows as u64)
            .saturating_mul(cols as u64)
            .saturating_mul(dims as u64);
        work >= self.parallel_threshold
    }
}

impl Default for KernelOptions {
    fn default() -> Self {
        Self {
            threads: Self::default_threads(),
            parallel_threshold: Self::default_parallel_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_toml() {
        let options: KernelOptions = toml::from_str("").unwrap();
        assert_eq!(options, KernelOptions::default());
        assert!(options.check().is_ok());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<KernelOptions>("block_size = 4").is_err());
    }

    #[test]
    fn range_checks() {
        let options: KernelOptions = toml::from_str("threads = 0").unwrap();
        assert!(matches!(options.check(), Err(OptionsError::Invalid { .. })));
        let options: KernelOptions = toml::from_str("threads = 300").unwrap();
        assert!(options.check().is_err());
        let options: KernelOptions = toml::from_str("parallel_threshold = 0").unwrap();
        assert!(options.check().is_err());
        let options: KernelOptions =
            toml::from_str("threads = 8\nparallel_threshold = 10").unwrap();
        assert!(options.check().is_ok());
    }

    #[test]
    fn parallel_decision() {
        let serial = KernelOptions::default();
        assert!(!serial.is_parallel(1000, 1000, 1000));
        let options = KernelOptions {
            threads: 4,
            parallel_threshold: 100,
        };
        assert!(!options.is_parallel(2, 2, 2));
        assert!(options.is_parallel(5, 5, 4));
        assert!(options.is_parallel(usize::MAX, usize::MAX, 2));
    }
}
