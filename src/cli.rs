//! Minimal CLI: resolver dumps → (spec | kotlin)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{info, Level};

use crate::codegen::{self, Codegen};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{self, Corpus, Document};
use crate::jq_exec::JqFilter;
use crate::pipeline::{generate_all, Generated};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// synthesize configurable fakes for interfaces and abstract classes described by a resolver dump
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// verbosity level (-v WARN, -vv INFO, -vvv DEBUG, -vvvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// no log output and no skip notes; failures are still reported
    #[arg(short, long, default_value_t = false, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the synthetic type specifications and diagnostics as JSON
    Spec(SpecOut),
    /// render Kotlin fakes
    Kotlin(KotlinOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the document inside each input (e.g. /output/fakes)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each input; every output value is one document
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// exit with an error if any member could not be generated
    #[arg(long, default_value_t = false)]
    deny_failures: bool,
}

#[derive(clap::Parser, Debug)]
struct SpecOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct KotlinOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory; one file per fake under its package path (stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_corpus(&self) -> Result<Corpus> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let jq = self.jq_expr.as_deref().map(JqFilter::compile).transpose()?;
        let mut corpus = Corpus::new();
        for source_path in &source_paths {
            self.load_into(source_path, jq.as_ref(), &mut corpus)?;
        }
        info!(
            inputs = source_paths.len(),
            targets = corpus.targets.len(),
            records = corpus.records.len(),
            "loaded descriptors"
        );
        Ok(corpus)
    }

    fn load_into(&self, source_path: &Path, jq: Option<&JqFilter>, corpus: &mut Corpus) -> Result<()> {
        let source_path_str = source_path.to_string_lossy().to_string();
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read source file ({source_path_str})"))?;
        let mut json_value = serde_json::from_str::<serde_json::Value>(&source)
            .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;

        if let Some(pointer) = self.json_pointer.as_ref() {
            json_value = document::select_pointer(json_value, pointer)
                .with_context(|| format!("in {source_path_str}"))?;
        }

        let documents = match jq {
            None => vec![json_value],
            Some(filter) => filter
                .documents(&json_value)
                .with_context(|| format!("failed to apply jq expression to source file ({source_path_str})"))?,
        };
        for value in documents {
            let document = Document::from_value(value)
                .with_context(|| format!("invalid descriptor document ({source_path_str})"))?;
            corpus.add(document);
        }
        Ok(())
    }

    fn generate(&self, quiet: bool) -> Result<Vec<Generated>> {
        let corpus = self.load_corpus()?;
        let generated = generate_all(&corpus.targets, &corpus.records);

        let mut failures = 0;
        for diagnostic in generated.iter().flat_map(|g| &g.diagnostics) {
            if diagnostic.is_failure() {
                failures += 1;
            }
            if diagnostic.severity == Severity::Note && quiet {
                continue;
            }
            report(diagnostic);
        }
        if self.deny_failures && failures > 0 {
            bail!("{failures} member(s) could not be generated");
        }
        Ok(generated)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Maps `-v`/`--quiet` to a tracing level; `None` means no subscriber.
    pub fn verbosity_level(&self) -> Option<Level> {
        if self.quiet {
            return None;
        }
        match self.verbose {
            0 => Some(Level::ERROR),
            1 => Some(Level::WARN),
            2 => Some(Level::INFO),
            3 => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        }
    }

    pub fn init_logging(&self) {
        if let Some(level) = self.verbosity_level() {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Spec(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let generated = target.input_settings.generate(self.quiet)?;
                let json_src = serde_json::to_string_pretty(&generated)?;
                match target.out.as_ref() {
                    Some(out) => write_file(out, &json_src)?,
                    None => println!("{json_src}"),
                }
            }
            Command::Kotlin(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let generated = target.input_settings.generate(self.quiet)?;
                match target.out_dir.as_ref() {
                    Some(out_dir) => {
                        for item in &generated {
                            let path = out_dir.join(codegen::file_path(&item.spec));
                            write_file(&path, &codegen::render(&item.spec))?;
                        }
                    }
                    None => {
                        let mut cg = Codegen::new();
                        for item in &generated {
                            cg.emit(&item.spec);
                        }
                        print!("{}", cg.into_string());
                    }
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn report(diagnostic: &Diagnostic) {
    let label = match diagnostic.severity {
        Severity::Note => "note:".cyan().bold(),
        Severity::Warning => "warning:".yellow().bold(),
    };
    eprintln!("{label} {diagnostic}");
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched = glob::glob(pattern)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                // an explicit glob that matched nothing is a mistake worth surfacing
                bail!("glob pattern matched no files: {pattern}");
            }
            // glob yields alphabetical order already; keep it explicit for stable output
            matched.sort();
            out.extend(matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        let cli = CommandLineInterface::parse_from(["fake-synth", "-vvv", "spec", "-i", "a.json"]);
        assert_eq!(cli.verbosity_level(), Some(Level::DEBUG));
        let cli = CommandLineInterface::parse_from(["fake-synth", "kotlin", "--quiet", "-i", "a.json"]);
        assert_eq!(cli.verbosity_level(), None);
    }

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["does/not/exist.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("does/not/exist.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        assert!(resolve_file_path_patterns(["/definitely/not/here/*.json"]).is_err());
    }

    fn fixture_settings(pattern: &str, deny_failures: bool) -> InputSettings {
        InputSettings {
            json_pointer: None,
            jq_expr: None,
            input: vec![format!("{}/fixtures/{pattern}", env!("CARGO_MANIFEST_DIR"))],
            deny_failures,
        }
    }

    #[test]
    fn fixtures_load_into_one_corpus() {
        let corpus = fixture_settings("*.json", false).load_corpus().unwrap();
        let names: Vec<_> = corpus.targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Clock", "OrderRepository"]);
        assert!(corpus.records.get("OrderDetails").is_some());
    }

    #[test]
    fn deny_failures_turns_diagnostics_into_an_error() {
        assert!(fixture_settings("abstract_clock.json", false).generate(true).is_ok());
        let error = fixture_settings("abstract_clock.json", true).generate(true).unwrap_err();
        assert_eq!(error.to_string(), "1 member(s) could not be generated");
    }

    #[test]
    fn jq_expression_reshapes_each_input() {
        let mut settings = fixture_settings("order_repository.json", false);
        settings.jq_expr = Some("{ targets: .targets }".into());
        let corpus = settings.load_corpus().unwrap();
        assert_eq!(corpus.targets.len(), 1);
        assert!(corpus.records.is_empty());
    }

    #[test]
    fn command_line_is_well_formed() {
        use clap::CommandFactory;
        CommandLineInterface::command().debug_assert();
    }
}
