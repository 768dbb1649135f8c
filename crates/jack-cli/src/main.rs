mod common;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser as ClapParser;
use owo_colors::OwoColorize;
use jack_lexer::{CommentState, Lexer};
use jack_parser::{tokens_xml, DiagnosticMode, Parser};
use jack_syntax::error::{error, Error, Result};

use common::{note, render_error, warn};

#[derive(ClapParser, Debug)]
#[command(name = "jack-analyzer", version, about = "Parse Jack classes into XML parse trees")]
struct Cli {
    /// `.jack` files, or directories whose `.jack` files are analysed in name order
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Directory for the generated files; default: next to each source
    #[arg(short = 'o', long = "out-dir")]
    out_dir: Option<PathBuf>,

    /// Print the XML to stdout instead of writing files
    #[arg(long = "stdout", default_value_t = false)]
    stdout: bool,

    /// Emit the flat token listing instead of the parse tree
    #[arg(long = "tokens", default_value_t = false)]
    tokens: bool,

    /// Stop at the first grammar error instead of recording it and continuing
    #[arg(long = "strict", default_value_t = false)]
    strict: bool,

    /// Report each file as it is processed
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn mode(&self) -> DiagnosticMode {
        if self.strict {
            DiagnosticMode::Strict
        } else {
            DiagnosticMode::Recover
        }
    }
}

fn collect_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for p in paths {
        if p.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(p)
                .map_err(|e| Error::new(format!("Failed to read {}: {}", p.display(), e)))?
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("jack"))
                .collect();
            found.sort();
            if found.is_empty() {
                warn(&format!("no .jack files in {}", p.display()));
            }
            out.extend(found);
        } else if p.exists() {
            out.push(p.clone());
        } else {
            return error(format!("File not found: {}", p.display()));
        }
    }
    Ok(out)
}

fn output_path(cli: &Cli, source: &Path) -> PathBuf {
    let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    let suffix = if cli.tokens { "T" } else { "" };
    let name = format!("Out{}{}.xml", stem, suffix);
    match &cli.out_dir {
        Some(dir) => dir.join(name),
        None => source.with_file_name(name),
    }
}

/// Analyse one file. `Ok(false)` means grammar errors were reported.
fn analyze_file(cli: &Cli, path: &Path) -> Result<bool> {
    let src = fs::read_to_string(path)
        .map_err(|e| Error::new(format!("Failed to read {}: {}", path.display(), e)))?;

    let mut lexer = Lexer::new(&src);
    let tokens = lexer.tokenize();
    if lexer.comment_state() == CommentState::Block {
        warn(&format!("{}: block comment is never closed", path.display()));
    }
    if cli.verbose {
        note(&format!("{}: {} tokens", path.display(), tokens.len()));
    }

    let (lines, clean) = if cli.tokens {
        (tokens_xml(&tokens), true)
    } else {
        let output = match Parser::with_mode(tokens, cli.mode()).parse_class() {
            Ok(o) => o,
            Err(e) => {
                render_error("Parse error", path, &src, &e);
                return Ok(false);
            }
        };
        for d in &output.diagnostics {
            render_error("error", path, &src, &Error::at_line(d.message.clone(), d.line));
        }
        let clean = output.is_clean();
        (output.lines, clean)
    };

    let mut text = lines.join("\n");
    text.push('\n');
    if cli.stdout {
        print!("{}", text);
    } else {
        let out_path = output_path(cli, path);
        fs::write(&out_path, text)
            .map_err(|e| Error::new(format!("Failed to write {}: {}", out_path.display(), e)))?;
        if cli.verbose {
            note(&format!("wrote {}", out_path.display()));
        }
    }
    Ok(clean)
}

fn run(cli: &Cli) -> i32 {
    let sources = match collect_sources(&cli.paths) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e.msg.red());
            return 1;
        }
    };
    if let Some(dir) = &cli.out_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to create {}: {}", dir.display(), e).red()
            );
            return 1;
        }
    }

    let mut failed = 0usize;
    for path in &sources {
        match analyze_file(cli, path) {
            Ok(true) => {}
            Ok(false) => failed += 1,
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e.msg.red());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "{}",
            format!("{} of {} file(s) had errors", failed, sources.len()).red().bold()
        );
        1
    } else {
        if cli.verbose {
            note(&format!("{} file(s) analysed", sources.len()));
        }
        0
    }
}

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(&cli));
}
