pub mod args;
pub mod command;
pub mod process;

pub use args::{parse_args, ParsedArgs};
pub use command::{get_classpath_separator, LaunchPlan};
pub use process::{execute, InvocationMode};
