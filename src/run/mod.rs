//! End-to-end runs.
//!
//! This module combines [`crate::resolve`], [`crate::position`] and [`crate::output`] into a single workflow. It's
//! what the CLI uses, but it's also useful for running that same flow within-process.
//!
//! ## Example
//!
//! ```
//! # use gotopos::run;
//!
//! // First, let's define a mocked I/O. Replace this with whatever you need.
//! #[derive(Default)]
//! struct MockIo {
//!     stdout: Vec<u8>,
//! }
//!
//! impl run::OsFacade for MockIo {
//!     fn read_stdin(&self) -> std::io::Result<String> {
//!         Ok(":c-3\n".to_string())
//!     }
//!
//!     fn stdout(&mut self) -> impl std::io::Write {
//!         &mut self.stdout
//!     }
//!
//!     fn write_error(&mut self, err: run::Error) {
//!         eprintln!("{err}")
//!     }
//! }
//!
//! // Now, use it:
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! // Define our "CLI" options. Use the defaults, but say that the cursor is on line 10. With no input, the prompt
//! // text comes from stdin.
//! let mut run_options = run::RunOptions::default();
//! run_options.reference_line = Some(10);
//!
//! let mut os_facade = MockIo::default();
//! let resolved = run::run(&run_options, &mut os_facade);
//! let stdout_text = String::from_utf8(os_facade.stdout)?;
//!
//! assert_eq!(resolved, true);
//! assert_eq!(stdout_text, "7\n");
//! #
//! #     Ok(())
//! # }
//! ```
mod cli;
mod run_main;

pub use cli::*;
pub use run_main::*;
