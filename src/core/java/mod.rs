pub mod runtime;
pub mod version;

pub use runtime::{java_command, read_java_version};
pub use version::{detect_runtime_version, parse_runtime_version, RuntimeVersion};
