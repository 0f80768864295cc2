//! Batch task runner
//!
//! Runs a list of external commands, or a function over a list of
//! arguments, on a bounded pool of workers and returns the results in input
//! order.
//!
//! ```no_run
//! use utilkit::runner::{run_commands, CommandSpec, RunnerConfig};
//!
//! # async fn demo() -> utilkit::runner::RunnerResult<()> {
//! let config = RunnerConfig::with_workers(4)?;
//! let specs = vec![
//!     CommandSpec::from_argv(["ls", "-l"])?,
//!     CommandSpec::from_argv(["uname", "-a"])?,
//! ];
//! for result in run_commands(&config, specs).await {
//!     println!("{:?}", result?.stdout);
//! }
//! # Ok(())
//! # }
//! ```

mod command;
mod error;
mod pool;

pub use command::{CommandOutput, CommandSpec};
pub use error::{RunnerError, RunnerResult};
pub use pool::{run_calls, run_commands, timed, timed_async, RunnerConfig};
