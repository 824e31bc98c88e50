// ─── Checker Launcher Core ───
// Rewrites a javac command line into a run of the type-annotations compiler.
//
// Architecture:
//   core/
//     config    : Startup configuration (file + environment)
//     java/     : Java executable lookup + runtime version detection
//     install/  : Self archive location + support archive resolution
//     launch/   : Argument extraction, command assembly, process invocation

pub mod config;
pub mod error;
pub mod install;
pub mod java;
pub mod launch;
