use crate::position::{BufferBounds, Position};
use clap::{Parser, ValueEnum};
use derive_builder::Builder;
use std::fmt::{Display, Formatter};

macro_rules! create_options_structs {
    (
        $(
            $(#[$meta:meta])*
            clap $clap:tt
            pub $name:ident : $ty:ty
        ),* $(,)?
    ) => {
        #[derive(Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Parser)]
        #[command(version, about, long_about = None)]
        #[doc(hidden)]
        pub struct CliOptions {
            $(
            $(#[$meta])*
            #[arg$clap]
            pub(crate) $name: $ty,
            )*

            // clap-only stuff:

            /// The text typed into the prompt, like "42", "42 7", ":c+5" or ":c-3".
            ///
            /// If this isn't provided, the first line of standard input is used.
            #[arg(value_name = "position")]
            pub(crate) input: Option<String>,
        }

        /// Options analogous to the gotopos CLI's switches.
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Builder)]
        #[builder(default)]
        pub struct RunOptions {
            $(
            $(#[$meta])*
            pub $name: $ty,
            )*

            /// The prompt text. `None` means to read it from stdin.
            pub input: Option<String>,
        }

        impl From<CliOptions> for RunOptions {
            fn from(value: CliOptions) -> Self {
                Self {
                    $($name: value.$name,)*
                    input: value.input,
                }
            }
        }
    };
}

create_options_structs! {
    /// The line the cursor is on.
    ///
    /// Relative input (":c+5", ":c-3") is resolved against this line. Without it, relative input fails.
    clap(long = "line", value_name = "LINE", value_parser = clap::value_parser!(i64).range(1..))
    pub reference_line: Option<i64>,

    /// The column the cursor is on. Requires --line.
    clap(long = "column", value_name = "COLUMN", requires = "reference_line", value_parser = clap::value_parser!(i64).range(1..))
    pub reference_column: Option<i64>,

    /// Clamp the result into a buffer with this many lines.
    ///
    /// Without this, the result is printed exactly as resolved, which can be past the end of the buffer or (for
    /// relative input) before its first line.
    clap(long, value_name = "N", value_parser = clap::value_parser!(i64).range(1..))
    pub line_count: Option<i64>,

    /// Clamp the result's column to at most this. Requires --line-count.
    clap(long, value_name = "N", requires = "line_count", value_parser = clap::value_parser!(i64).range(1..))
    pub max_column: Option<i64>,

    /// Specifies the output format.
    clap(short, long, default_value_t = OutputFormat::Text)
    pub output: OutputFormat,

    /// Quiet: do not print anything to stdout. The exit code will still be 0 if the input resolved, and non-0 if it
    /// didn't.
    clap(long, short)
    pub quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            reference_line: None,
            reference_column: None,
            line_count: None,
            max_column: None,
            output: OutputFormat::Text,
            quiet: false,
            input: None,
        }
    }
}

impl RunOptions {
    /// The cursor position described by `--line` and `--column`, if there is one.
    pub fn reference_position(&self) -> Option<Position> {
        self.reference_line
            .map(|line| Position::new(line, Some(self.reference_column.unwrap_or(1))))
    }

    /// The buffer described by `--line-count` and `--max-column`, if there is one.
    pub fn buffer_bounds(&self) -> Option<BufferBounds> {
        self.line_count.map(|line_count| BufferBounds {
            line_count,
            max_column: self.max_column,
        })
    }
}

/// Output formats, analogous to `--output` in the CLI.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum OutputFormat {
    /// Output the position as "LINE" or "LINE COLUMN", the same form the input accepts.
    #[default]
    Text,

    /// Output the position as a JSON object, like {"line":15,"column":3}. The column is omitted if there isn't one.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let self_str = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        f.write_str(self_str)
    }
}

#[cfg(test)]
mod tests {
    use crate::position::{BufferBounds, Position};
    use crate::run::cli::{CliOptions, OutputFormat};
    use crate::run::{RunOptions, RunOptionsBuilder};
    use crate::util::utils_for_test::*;
    use clap::error::ErrorKind;
    use clap::{Error, Parser};

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        CliOptions::command().debug_assert();
    }

    #[test]
    fn no_args() {
        let result = CliOptions::try_parse_from(["gotopos"]);
        unwrap!(result, Ok(cli));
        assert_eq!(cli.input, None);
        let run_opts: RunOptions = cli.into();
        assert_eq!(run_opts.reference_position(), None);
        assert_eq!(run_opts.buffer_bounds(), None);
    }

    #[test]
    fn no_args_equals_default() {
        let result = CliOptions::try_parse_from(["gotopos"]);
        unwrap!(result, Ok(cli));
        let from_cli: RunOptions = cli.into();
        assert_eq!(from_cli, RunOptions::default());
    }

    #[test]
    fn builder_defaults_equal_default() {
        let built = RunOptionsBuilder::default().build().unwrap();
        assert_eq!(built, RunOptions::default());
    }

    #[test]
    fn input_only() {
        let result = CliOptions::try_parse_from(["gotopos", "42 7"]);
        unwrap!(result, Ok(cli));
        let run_opts: RunOptions = cli.into();
        assert_eq!(run_opts.input.as_deref(), Some("42 7"));
    }

    #[test]
    fn input_after_double_dash() {
        let result = CliOptions::try_parse_from(["gotopos", "--line", "10", "--", ":c-3"]);
        unwrap!(result, Ok(cli));
        let run_opts: RunOptions = cli.into();
        assert_eq!(run_opts.input.as_deref(), Some(":c-3"));
    }

    #[test]
    fn reference_line_only() {
        let result = CliOptions::try_parse_from(["gotopos", "--line", "10", ":c+5"]);
        unwrap!(result, Ok(cli));
        let run_opts: RunOptions = cli.into();
        assert_eq!(run_opts.reference_position(), Some(Position::new(10, Some(1))));
    }

    #[test]
    fn reference_line_and_column() {
        let result = CliOptions::try_parse_from(["gotopos", "--line", "10", "--column", "3", ":c+5"]);
        unwrap!(result, Ok(cli));
        let run_opts: RunOptions = cli.into();
        assert_eq!(run_opts.reference_position(), Some(Position::new(10, Some(3))));
    }

    #[test]
    fn bounds() {
        let result = CliOptions::try_parse_from(["gotopos", "--line-count", "100", "--max-column", "80", "5"]);
        unwrap!(result, Ok(cli));
        let run_opts: RunOptions = cli.into();
        assert_eq!(run_opts.buffer_bounds(), Some(BufferBounds::new(100).with_max_column(80)));
    }

    #[test]
    fn json_output() {
        let result = CliOptions::try_parse_from(["gotopos", "-o", "json", "5"]);
        unwrap!(result, Ok(cli));
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn column_without_line() {
        let result = CliOptions::try_parse_from(["gotopos", "--column", "3", "5"]);
        check_err(
            &result,
            "the following required arguments were not provided:",
        );
    }

    #[test]
    fn max_column_without_line_count() {
        let result = CliOptions::try_parse_from(["gotopos", "--max-column", "3", "5"]);
        check_err(
            &result,
            "the following required arguments were not provided:",
        );
    }

    #[test]
    fn zero_reference_line() {
        let result = CliOptions::try_parse_from(["gotopos", "--line", "0", "5"]);
        check_err_kind(&result, ErrorKind::ValueValidation);
        check_err_starts_with(&result, "invalid value '0' for '--line <LINE>'");
    }

    #[test]
    fn zero_reference_column() {
        let result = CliOptions::try_parse_from(["gotopos", "--line", "10", "--column", "0", "5"]);
        check_err_kind(&result, ErrorKind::ValueValidation);
        check_err_starts_with(&result, "invalid value '0' for '--column <COLUMN>'");
    }

    fn check_err(result: &Result<CliOptions, Error>, expect: &str) {
        let first_line = first_err_line(result);
        let mut expect_full = "error: ".to_string();
        expect_full.push_str(expect);
        assert_eq!(first_line, expect_full);
    }

    fn check_err_starts_with(result: &Result<CliOptions, Error>, expect: &str) {
        let first_line = first_err_line(result);
        let mut expect_full = "error: ".to_string();
        expect_full.push_str(expect);
        assert!(
            first_line.starts_with(&expect_full),
            "expected {first_line:?} to start with {expect_full:?}"
        );
    }

    fn check_err_kind(result: &Result<CliOptions, Error>, expect: ErrorKind) {
        unwrap!(result, Err(e));
        assert_eq!(e.kind(), expect);
    }

    fn first_err_line(result: &Result<CliOptions, Error>) -> String {
        unwrap!(result, Err(e));
        let e_str = e.to_string();
        e_str.split('\n').next().expect("no error string found").to_string()
    }
}
