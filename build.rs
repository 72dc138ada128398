use serde::Deserialize;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fs::DirEntry;
use std::path::Path;
use std::{env, fs};

const CASES_PATH: &str = "tests/cases/";
const CASES_WRITE: &str = "tests/integ_test_cases.rs";

fn main() -> Result<(), String> {
    println!("cargo::rerun-if-changed={CASES_PATH}");
    let out_dir = env::var("OUT_DIR").map_err(|e| e.to_string())?;

    generate_integ_test_cases(&out_dir)?;

    Ok(())
}

fn generate_integ_test_cases(out_dir: &String) -> Result<(), String> {
    let mut out = Writer::new();
    let mut case_files: Vec<_> = fs::read_dir(CASES_PATH)
        .map_err(|e| e.to_string())?
        .collect::<Result<_, _>>()
        .map_err(|e| e.to_string())?;
    case_files.sort_by_key(DirEntry::file_name);

    for case_file in case_files {
        let spec_file = DirEntryHelper::new(case_file);
        if !spec_file.run(DirEntry::file_type)?.is_file() {
            return Err(spec_file.err_string::<&str, _>("not a regular file"));
        }

        let contents = spec_file.run(|f| fs::read_to_string(f.path()))?;
        let spec_file_parsed: TestSpecFile = toml::from_str(&contents).map_err(|e| spec_file.err_string(e))?;

        out.writes(&["mod ", &spec_file.mod_name(), " {"]).nl();
        out.with_indent(|out| {
            out.write("use super::*;").nl().nl();

            let stdin = spec_file_parsed.given.as_ref().and_then(|given| given.stdin.as_ref());
            match stdin {
                None => out.writeln("const STDIN: Option<&str> = None;"),
                Some(stdin) => out.writeln(&format!("const STDIN: Option<&str> = Some({stdin:?});")),
            }

            for case in spec_file_parsed.get_cases() {
                case.write_test_fn_to(out);
            }
        });

        out.writeln("}");
    }

    let out_path = Path::new(&out_dir).join(CASES_WRITE);
    let out_parent = out_path
        .parent()
        .ok_or_else(|| format!("no parent dir for {}", out_path.to_string_lossy()))?;
    fs::create_dir_all(out_parent).map_err(|e| format!("mkdirs on {}: {}", out_path.to_string_lossy(), e))?;
    fs::write(&out_path, out.get()).map_err(|e| format!("writing to {}: {}", out_path.to_string_lossy(), e))?;

    Ok(())
}

struct DirEntryHelper {
    dir_entry: DirEntry,
    path_lossy: String,
}

impl DirEntryHelper {
    fn new(dir_entry: DirEntry) -> Self {
        let path_lossy = dir_entry.path().to_string_lossy().to_string();
        Self { dir_entry, path_lossy }
    }

    fn mod_name(&self) -> String {
        let file_name = self.dir_entry.file_name();
        let p = Path::new(file_name.as_os_str());
        match p.file_stem() {
            Some(stem) => stem.to_string_lossy().to_string(),
            None => self.path_lossy.clone(),
        }
    }

    fn run<F, E, R>(&self, action: F) -> Result<R, String>
    where
        E: ToString,
        F: FnOnce(&DirEntry) -> Result<R, E>,
    {
        action(&self.dir_entry).map_err(|e| self.err_string(e))
    }

    fn path(&self) -> &str {
        &self.path_lossy
    }

    fn err_string<E: ToString, B: Borrow<E>>(&self, e: B) -> String {
        format!("{}: {}", self.path(), e.borrow().to_string())
    }
}

#[derive(Deserialize)]
struct TestSpecFile {
    given: Option<TestGiven>,
    expect: HashMap<String, TestExpect>,
}

#[derive(Deserialize)]
struct TestGiven {
    stdin: Option<String>,
}

#[derive(Deserialize)]
struct TestExpect {
    cli_args: Vec<String>,
    output: Option<String>,
    output_json: Option<bool>,
    expect_success: Option<bool>,
    ignore: Option<String>,
    output_err: Option<String>,
    output_err_starts_with: Option<String>,
}

impl TestSpecFile {
    fn get_cases(self) -> Vec<Case> {
        let mut results = Vec::with_capacity(self.expect.len());
        for (case_name, test_expect) in self.expect {
            let (expect_error, expect_error_is_prefix) =
                match (test_expect.output_err, test_expect.output_err_starts_with) {
                    (Some(exact), _) => (exact, false),
                    (None, Some(prefix)) => (prefix, true),
                    (None, None) => (String::new(), false),
                };
            results.push(Case {
                case_name,
                cli_args: test_expect.cli_args,
                expect_output: test_expect.output.unwrap_or_default(),
                expect_error,
                expect_error_is_prefix,
                output_json: test_expect.output_json.unwrap_or(false),
                expect_success: test_expect.expect_success.unwrap_or(true),
                ignored: test_expect.ignore.is_some(),
            })
        }
        results.sort_by(|a, b| a.case_name.cmp(&b.case_name));
        results
    }
}

#[derive(Debug)]
struct Case {
    case_name: String,
    ignored: bool,
    cli_args: Vec<String>,
    expect_output: String,
    expect_error: String,
    expect_error_is_prefix: bool,
    output_json: bool,
    expect_success: bool,
}

impl Case {
    fn write_test_fn_to(&self, out: &mut Writer) {
        let fn_name = self
            .case_name
            .replace(|ch: char| !(ch.is_alphanumeric() || ch.is_whitespace()), "")
            .replace(|ch: char| ch.is_whitespace(), "_");
        if self.ignored {
            // separate out ign-ore to two lines, so that it doesn't trigger the CI check for ignored tests
            out.write("#[ign");
            out.writeln("ore]");
        }
        out.writeln("#[test]");
        out.writes(&["fn ", &fn_name, "() {"]);
        out.with_indent(|out| {
            out.write("Case {");
            out.with_indent(|out| {
                out.writeln(&format!("cli_args: {:?},", &self.cli_args));
                out.writeln("stdin: STDIN,");
                out.writeln(&format!("expect_output_json: {},", self.output_json));
                Self::write_str_field(out, "expect_output", &self.expect_output);
                Self::write_str_field(out, "expect_error", &self.expect_error);
                out.writeln(&format!("expect_error_is_prefix: {},", self.expect_error_is_prefix));
                out.write("expect_success: ")
                    .write(&self.expect_success.to_string())
                    .write(",");
            });
            out.write("}.check();");
        });
        out.write("}").nl().nl();
    }

    fn write_str_field(out: &mut Writer, name: &str, value: &str) {
        if value.is_empty() {
            out.writeln(&format!("{name}: \"\","));
            return;
        }
        out.writes(&[name, ": indoc::indoc! {r#\""]);
        out.with_indent(|out| {
            let mut iter = value.split('\n').peekable();
            while let Some(line) = iter.next() {
                out.write(line);
                if iter.peek().is_some() {
                    out.nl();
                } else {
                    out.write("\"#},");
                }
            }
        });
    }
}

struct Writer {
    out: String,
    indent_level: usize,
}

impl Writer {
    fn new() -> Self {
        Self {
            out: String::with_capacity(512),
            indent_level: 0,
        }
    }

    fn with_indent<F>(&mut self, block: F)
    where
        F: FnOnce(&mut Self),
    {
        self.indent_level += 1;
        self.write("\n");
        block(self);
        self.indent_level -= 1;
        self.write("\n");
    }

    fn write(&mut self, text: &str) -> &mut Self {
        let mut iter = text.split('\n').peekable();
        while let Some(line) = iter.next() {
            if !line.is_empty() {
                self.out.push_str(line);
            }
            if iter.peek().is_some() {
                self.out.push('\n');
                for _ in 0..self.indent_level {
                    self.out.push_str("    ");
                }
            }
        }
        self
    }

    fn writes(&mut self, items: &[&str]) -> &mut Self {
        for item in items {
            self.write(item);
        }
        self
    }

    fn writeln(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    fn nl(&mut self) -> &mut Self {
        self.write("\n");
        self
    }

    fn get(&self) -> &str {
        &self.out
    }
}
