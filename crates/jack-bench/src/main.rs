use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{ArgAction, Parser};
use serde::Serialize;

use jack_lexer::Lexer;
use jack_parser::Parser as JackParser;

#[derive(Parser, Debug)]
#[command(name = "jack-bench", about = "Time the Jack tokenizer and parser")]
struct Cli {
    /// Specific script(s) to run (by file stem, e.g. Square). If omitted, runs all discovered scripts.
    #[arg(short = 't', long = "test", action = ArgAction::Append)]
    tests: Vec<String>,

    /// Iterations per script (measured)
    #[arg(short = 'n', long = "iterations", default_value_t = 50)]
    iterations: u32,

    /// Warmup iterations (not measured)
    #[arg(short = 'w', long = "warmup", default_value_t = 5)]
    warmup: u32,

    /// Output JSON file path; default: benchmark/results/<timestamp>.json
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Include the samples/ directory tree in discovery
    #[arg(long = "include-samples", default_value_t = false)]
    include_samples: bool,

    /// List discovered scripts and exit
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    iterations: u32,
    tokens: usize,
    output_lines: usize,
    diagnostics: usize,
    avg_total_ms: f64,
    min_total_ms: f64,
    max_total_ms: f64,
    avg_lex_ms: f64,
    avg_parse_ms: f64,
}

#[derive(Debug, Serialize)]
struct OutputDoc {
    timestamp: String,
    analyzer_version: String,
    benchmarks: Vec<BenchResult>,
}

#[derive(Debug, Clone)]
struct ScriptCase {
    name: String,
    path: PathBuf,
}

/// Shape of one scan+parse run, recorded from the last measured iteration.
#[derive(Debug, Default, Clone, Copy)]
struct RunShape {
    tokens: usize,
    output_lines: usize,
    diagnostics: usize,
}

fn workspace_root() -> PathBuf {
    // crates/jack-bench -> crates -> root
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent().unwrap()
        .parent().unwrap()
        .to_path_buf()
}

fn collect_jack_files(dir: &Path, out: &mut Vec<ScriptCase>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for e in entries.flatten() {
        let p = e.path();
        if p.is_dir() {
            collect_jack_files(&p, out);
        } else if p.extension().and_then(|s| s.to_str()) == Some("jack") {
            let name = p.file_stem().and_then(|s| s.to_str()).unwrap_or("").to_string();
            out.push(ScriptCase { name, path: p });
        }
    }
}

fn discover_scripts(include_samples: bool) -> Vec<ScriptCase> {
    let root = workspace_root();
    let mut out = Vec::new();

    let mut candidates = vec![root.join("benchmark/scripts")];
    if include_samples { candidates.push(root.join("samples")); }

    for dir in candidates {
        if dir.exists() { collect_jack_files(&dir, &mut out); }
    }

    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn read_script(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

fn measure_script(src: &str, iterations: u32, warmup: u32) -> (Vec<f64>, Vec<f64>, Vec<f64>, RunShape) {
    for _ in 0..warmup {
        let tokens = Lexer::new(src).tokenize();
        JackParser::new(tokens).parse_class().expect("parse error");
    }

    let mut totals = Vec::with_capacity(iterations as usize);
    let mut lexes = Vec::with_capacity(iterations as usize);
    let mut parses = Vec::with_capacity(iterations as usize);
    let mut shape = RunShape::default();

    for _i in 0..iterations {
        let t0 = Instant::now();
        let mut t = Instant::now();

        let tokens = Lexer::new(src).tokenize();
        let token_count = tokens.len();
        let t_lex = t.elapsed();

        t = Instant::now();
        let output = JackParser::new(tokens).parse_class().expect("parse error");
        let t_parse = t.elapsed();

        let total = t0.elapsed();

        shape = RunShape {
            tokens: token_count,
            output_lines: output.lines.len(),
            diagnostics: output.diagnostics.len(),
        };
        lexes.push(dur_ms(t_lex));
        parses.push(dur_ms(t_parse));
        totals.push(dur_ms(total));
    }

    (totals, lexes, parses, shape)
}

fn dur_ms(d: std::time::Duration) -> f64 { d.as_secs_f64() * 1000.0 }

fn stats(vals: &[f64]) -> (f64, f64, f64) {
    let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = if vals.is_empty() { 0.0 } else { vals.iter().sum::<f64>() / (vals.len() as f64) };
    (avg, min, max)
}

fn ensure_dir(p: &Path) {
    if let Err(e) = fs::create_dir_all(p) {
        panic!("Failed to create {}: {}", p.display(), e);
    }
}

fn main() {
    let cli = Cli::parse();

    let mut scripts = discover_scripts(cli.include_samples);

    if cli.list {
        println!("Discovered scripts:");
        for s in &scripts { println!("- {} ({})", s.name, s.path.display()); }
        return;
    }

    if !cli.tests.is_empty() {
        let wanted: std::collections::HashSet<_> = cli.tests.iter().map(|s| s.to_lowercase()).collect();
        scripts.retain(|s| wanted.contains(&s.name.to_lowercase()));
        if scripts.is_empty() {
            eprintln!("No matching scripts. Use --list to see available.");
            std::process::exit(2);
        }
    }

    if scripts.is_empty() {
        eprintln!("No .jack scripts found in benchmark/scripts or samples.");
        std::process::exit(2);
    }

    let mut results = Vec::new();

    for case in &scripts {
        let src = read_script(&case.path);
        let (totals, lexes, parses, shape) = measure_script(&src, cli.iterations, cli.warmup);
        let (avg_t, min_t, max_t) = stats(&totals);
        let (avg_l, _, _) = stats(&lexes);
        let (avg_p, _, _) = stats(&parses);

        println!(
            "{:>14}: total avg={:.3}ms min={:.3}ms max={:.3}ms | lex={:.3}ms parse={:.3}ms | tokens={} lines={} errors={}",
            case.name, avg_t, min_t, max_t, avg_l, avg_p, shape.tokens, shape.output_lines, shape.diagnostics
        );

        results.push(BenchResult {
            name: case.name.clone(),
            iterations: cli.iterations,
            tokens: shape.tokens,
            output_lines: shape.output_lines,
            diagnostics: shape.diagnostics,
            avg_total_ms: avg_t,
            min_total_ms: min_t,
            max_total_ms: max_t,
            avg_lex_ms: avg_l,
            avg_parse_ms: avg_p,
        });
    }

    let out_path = if let Some(p) = cli.output.clone() {
        p
    } else {
        let results_dir = workspace_root().join("benchmark/results");
        ensure_dir(&results_dir);
        // Windows-safe filename timestamp
        let ts_file = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%SZ").to_string();
        results_dir.join(format!("{}.json", ts_file))
    };

    let doc = OutputDoc {
        timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
        benchmarks: results,
    };

    let json = serde_json::to_string_pretty(&doc).expect("serialize json");
    if let Some(parent) = out_path.parent() { ensure_dir(parent); }
    fs::write(&out_path, json).expect("write results json");

    println!("\nSaved results to {}", out_path.display());
}
