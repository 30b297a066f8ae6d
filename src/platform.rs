//! Host platform detection.
//!
//! Release indexes describe artifacts in uname terms (`Linux`, `Darwin`,
//! `x86_64`, `aarch64`), so the compile-time constants are mapped to the
//! same vocabulary.

/// The host platform in the vocabulary used by release indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Kernel name as reported by `uname -s`, e.g. `Linux`.
    pub os: String,
    /// Machine architecture as reported by `uname -m`, e.g. `x86_64`.
    pub machine: String,
}

impl Platform {
    /// Detect the platform this binary was compiled for.
    pub fn detect() -> Self {
        let os = match std::env::consts::OS {
            "linux" => "Linux",
            "macos" => "Darwin",
            other => other,
        };
        Self {
            os: os.to_string(),
            machine: std::env::consts::ARCH.to_string(),
        }
    }

    /// An explicit platform, for tests and cross-provisioning.
    pub fn new(os: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            machine: machine.into(),
        }
    }
}
