use crate::output;
use crate::position::Position;
use crate::resolve::{resolve, ResolveError};
use crate::run::cli::OutputFormat;
use crate::run::RunOptions;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::{env, io};

/// The run's overall possible error.
#[derive(Debug)]
pub enum Error {
    /// The prompt text didn't resolve to a position.
    ///
    /// This comes from [`resolve`].
    Resolve(ResolveInputError),

    /// Couldn't read the prompt text from stdin.
    InputReadError(io::Error),

    /// Couldn't write the result to stdout.
    OutputWriteError(io::Error),
}

impl std::error::Error for Error {}

/// A [`ResolveError`], along with the input that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolveInputError {
    input: String,
    error: ResolveError,
}

impl ResolveInputError {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> &ResolveError {
        &self.error
    }
}

impl std::error::Error for ResolveInputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl Display for ResolveInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error.render(&self.input))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Resolve(err) => {
                match err.error {
                    ResolveError::NoActiveContext => writeln!(f, "Can't resolve relative position:")?,
                    ResolveError::InvalidFormat(_) => writeln!(f, "Syntax error in position:")?,
                }
                writeln!(f, "{err}")
            }
            Error::InputReadError(err) => {
                if env::var("GOTOPOS_PORTABLE_ERRORS").unwrap_or_default().is_empty() {
                    writeln!(f, "{err} while reading stdin")
                } else {
                    writeln!(f, "{} while reading stdin", err.kind())
                }
            }
            Error::OutputWriteError(err) => {
                if env::var("GOTOPOS_PORTABLE_ERRORS").unwrap_or_default().is_empty() {
                    writeln!(f, "{err} while writing output")
                } else {
                    writeln!(f, "{} while writing output", err.kind())
                }
            }
        }
    }
}

/// A simple facade for handling I/O.
///
/// This trait lets you do "I/O-y stuff" like mocking out stdin. The [`run`] method uses it.
pub trait OsFacade {
    /// Read stdin (or your mock of it) to a `String`.
    fn read_stdin(&self) -> io::Result<String>;

    /// Get a writer for stdout (or your mock of it).
    fn stdout(&mut self) -> impl Write;

    /// Handle an error.
    fn write_error(&mut self, err: Error);

    /// Gets the prompt text.
    ///
    /// The default implementation (which you should feel free to use) returns `input` if it's there, and otherwise
    /// the first line of stdin, without its line ending. Empty stdin is an empty input.
    fn read_input(&self, input: &Option<String>) -> Result<String, Error> {
        if let Some(input) = input {
            return Ok(input.clone());
        }
        let stdin = self.read_stdin().map_err(Error::InputReadError)?;
        let first_line = stdin.lines().next().unwrap_or_default();
        Ok(first_line.to_string())
    }
}

/// Runs the end-to-end flow: reads the input, resolves it, optionally clamps it, and writes it to stdout.
///
/// Returns whether the input resolved. Any error is passed to [`OsFacade::write_error`].
pub fn run(options: &RunOptions, os: &mut impl OsFacade) -> bool {
    match run_or_error(options, os) {
        Ok(_) => true,
        Err(err) => {
            os.write_error(err);
            false
        }
    }
}

fn run_or_error(options: &RunOptions, os: &mut impl OsFacade) -> Result<Position, Error> {
    let input = os.read_input(&options.input)?;
    let position = match resolve(&input, options.reference_position()) {
        Ok(position) => position,
        Err(error) => {
            return Err(Error::Resolve(ResolveInputError { input, error }));
        }
    };

    let position = match options.buffer_bounds() {
        Some(bounds) => position.clamp_to(&bounds),
        None => position,
    };

    if !options.quiet {
        let mut stdout = os.stdout();
        let written = match options.output {
            OutputFormat::Text => output::write_text(&position, &mut stdout),
            OutputFormat::Json => output::write_json(&position, &mut stdout),
        };
        written.map_err(Error::OutputWriteError)?;
    }

    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::RunOptionsBuilder;
    use crate::util::utils_for_test::*;

    #[derive(Default)]
    struct MockIo {
        stdin: Option<String>,
        stdout: Vec<u8>,
        errors: Vec<String>,
    }

    impl OsFacade for MockIo {
        fn read_stdin(&self) -> io::Result<String> {
            match &self.stdin {
                Some(stdin) => Ok(stdin.clone()),
                None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "no stdin")),
            }
        }

        fn stdout(&mut self) -> impl Write {
            &mut self.stdout
        }

        fn write_error(&mut self, err: Error) {
            self.errors.push(err.to_string());
        }
    }

    impl MockIo {
        fn stdout_str(&self) -> &str {
            std::str::from_utf8(&self.stdout).unwrap()
        }
    }

    #[test]
    fn absolute_from_arg() {
        let options = RunOptionsBuilder::default().input(Some("42 7".to_string())).build().unwrap();
        let mut io = MockIo::default();
        assert!(run(&options, &mut io));
        assert_eq!(io.stdout_str(), "42 7\n");
        assert!(io.errors.is_empty());
    }

    #[test]
    fn relative_from_stdin() {
        let options = RunOptionsBuilder::default().reference_line(Some(10)).build().unwrap();
        let mut io = MockIo {
            stdin: Some(":c+5\nignored second line\n".to_string()),
            ..Default::default()
        };
        assert!(run(&options, &mut io));
        assert_eq!(io.stdout_str(), "15\n");
    }

    #[test]
    fn stdin_with_crlf() {
        let options = RunOptions::default();
        let mut io = MockIo {
            stdin: Some("12 3\r\n".to_string()),
            ..Default::default()
        };
        assert!(run(&options, &mut io));
        assert_eq!(io.stdout_str(), "12 3\n");
    }

    #[test]
    fn empty_stdin_is_invalid() {
        let options = RunOptions::default();
        let mut io = MockIo {
            stdin: Some(String::new()),
            ..Default::default()
        };
        assert!(!run(&options, &mut io));
        assert_eq!(io.stdout_str(), "");
        let error = get_only_error(&io);
        assert!(error.starts_with("Syntax error in position:\n"), "{error}");
    }

    #[test]
    fn relative_without_reference() {
        let options = RunOptionsBuilder::default().input(Some(":c+5".to_string())).build().unwrap();
        let mut io = MockIo::default();
        assert!(!run(&options, &mut io));
        assert_eq!(
            get_only_error(&io),
            "Can't resolve relative position:\nno reference position is available for relative input\n"
        );
    }

    #[test]
    fn clamped() {
        let options = RunOptionsBuilder::default()
            .input(Some(":c-20".to_string()))
            .reference_line(Some(10))
            .line_count(Some(50))
            .build()
            .unwrap();
        let mut io = MockIo::default();
        assert!(run(&options, &mut io));
        assert_eq!(io.stdout_str(), "1\n");
    }

    #[test]
    fn not_clamped() {
        let options = RunOptionsBuilder::default()
            .input(Some(":c-20".to_string()))
            .reference_line(Some(10))
            .build()
            .unwrap();
        let mut io = MockIo::default();
        assert!(run(&options, &mut io));
        assert_eq!(io.stdout_str(), "-10\n");
    }

    #[test]
    fn json() {
        let options = RunOptionsBuilder::default()
            .input(Some("300 12".to_string()))
            .line_count(Some(100))
            .max_column(Some(10))
            .output(OutputFormat::Json)
            .build()
            .unwrap();
        let mut io = MockIo::default();
        assert!(run(&options, &mut io));
        assert_eq!(io.stdout_str(), "{\"line\":100,\"column\":10}\n");
    }

    #[test]
    fn quiet() {
        let options = RunOptionsBuilder::default()
            .input(Some("3".to_string()))
            .quiet(true)
            .build()
            .unwrap();
        let mut io = MockIo::default();
        assert!(run(&options, &mut io));
        assert_eq!(io.stdout_str(), "");
    }

    #[test]
    fn stdin_read_failure() {
        let options = RunOptions::default();
        let mut io = MockIo::default();
        assert!(!run(&options, &mut io));
        let error = get_only_error(&io);
        assert!(error.ends_with(" while reading stdin\n"), "{error}");
    }

    #[test]
    fn resolve_input_error_keeps_input() {
        let options = RunOptionsBuilder::default().input(Some("abc".to_string())).build().unwrap();
        let mut io = MockIo::default();
        let result = run_or_error(&options, &mut io);
        unwrap!(result, Err(Error::Resolve(err)));
        assert_eq!(err.input(), "abc");
        assert_eq!(err.error().kind(), crate::resolve::ErrorKind::InvalidFormat);
    }

    fn get_only_error(io: &MockIo) -> &str {
        assert_eq!(io.errors.len(), 1, "{:?}", io.errors);
        &io.errors[0]
    }
}
