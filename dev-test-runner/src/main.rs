//! Golden-file check: every `fixtures/<name>.json` is generated and rendered,
//! then compared with `fixtures/<name>.expected.kt` (and, if present,
//! `fixtures/<name>.diagnostics.txt`).
//!
//! `--bless` rewrites the golden files from the current output.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fake_synth::codegen::Codegen;
use fake_synth::document::{Corpus, Document};
use fake_synth::generate_all;
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t\r]+$").unwrap());

struct Outcome {
    source: String,
    diagnostics: String,
}

fn main() -> ExitCode {
    let bless = std::env::args().any(|arg| arg == "--bless");
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");

    let mut inputs = match std::fs::read_dir(&fixtures) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect::<Vec<_>>(),
        Err(error) => {
            eprintln!("cannot read {}: {error}", fixtures.display());
            return ExitCode::FAILURE;
        }
    };
    inputs.sort();

    let mut failed = 0;
    for input in &inputs {
        let name = input.file_stem().unwrap().to_string_lossy().to_string();
        let outcome = match run_fixture(input) {
            Ok(outcome) => outcome,
            Err(error) => {
                eprintln!("[FAIL] {name}: {error}");
                failed += 1;
                continue;
            }
        };

        let kotlin_path = sibling(input, "expected.kt");
        let diagnostics_path = sibling(input, "diagnostics.txt");
        if bless {
            std::fs::write(&kotlin_path, &outcome.source).unwrap();
            if !outcome.diagnostics.is_empty() {
                std::fs::write(&diagnostics_path, &outcome.diagnostics).unwrap();
            }
            println!("[BLESS] {name}");
            continue;
        }

        let mut mismatches = Vec::new();
        match std::fs::read_to_string(&kotlin_path) {
            Ok(expected) if normalize(&expected) == normalize(&outcome.source) => {}
            Ok(expected) => mismatches.push(format!("--- expected\n{expected}--- actual\n{}", outcome.source)),
            Err(error) => mismatches.push(format!("missing {}: {error}", kotlin_path.display())),
        }
        if let Ok(expected) = std::fs::read_to_string(&diagnostics_path) {
            if normalize(&expected) != normalize(&outcome.diagnostics) {
                mismatches.push(format!(
                    "--- expected diagnostics\n{expected}--- actual diagnostics\n{}",
                    outcome.diagnostics
                ));
            }
        }

        if mismatches.is_empty() {
            println!("[PASS] {name}");
        } else {
            failed += 1;
            eprintln!("[FAIL] {name}");
            for mismatch in mismatches {
                eprintln!("{mismatch}");
            }
        }
    }

    println!("{} fixture(s), {failed} failed", inputs.len());
    if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn run_fixture(input: &Path) -> Result<Outcome, String> {
    let text = std::fs::read_to_string(input).map_err(|e| e.to_string())?;
    let document = Document::parse(&text).map_err(|e| e.to_string())?;
    let mut corpus = Corpus::new();
    corpus.add(document);

    let generated = generate_all(&corpus.targets, &corpus.records);
    let mut cg = Codegen::new();
    let mut diagnostics = String::new();
    for item in &generated {
        cg.emit(&item.spec);
        for diagnostic in &item.diagnostics {
            diagnostics.push_str(&diagnostic.to_string());
            diagnostics.push('\n');
        }
    }
    Ok(Outcome { source: cg.into_string(), diagnostics })
}

fn sibling(input: &Path, suffix: &str) -> PathBuf {
    input.with_extension(suffix)
}

fn normalize(text: &str) -> String {
    TRAILING_WS.replace_all(text, "").trim_end().to_string()
}
