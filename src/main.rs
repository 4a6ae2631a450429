//! Patch Illustrator CLI
//!
//! Usage:
//!   patch-illustrator [OPTIONS] [FILE]
//!
//! Reads a patch description (JSON, or TOML by extension / --toml) from a
//! file or stdin and writes the rendered SVG to stdout or --output.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use patch_illustrator::{render, RawPatch};

#[derive(Parser)]
#[command(name = "patch-illustrator")]
#[command(about = "Render modular-synthesizer patch descriptions as SVG")]
struct Cli {
    /// Input patch file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Write SVG to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat the input as TOML regardless of file extension
    #[arg(long)]
    toml: bool,
}

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so the SVG on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let is_toml = cli.toml
        || cli
            .input
            .as_ref()
            .and_then(|p| p.extension())
            .is_some_and(|ext| ext == "toml");

    let raw: RawPatch = if is_toml {
        match toml::from_str(&source) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("Error parsing TOML patch: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match serde_json::from_str(&source) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("Error parsing JSON patch: {}", e);
                std::process::exit(1);
            }
        }
    };

    let svg = match render(raw) {
        Ok(svg) => svg,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &svg) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => println!("{}", svg),
    }
}

fn print_intro() {
    println!(
        r#"Patch Illustrator - render modular-synth patch descriptions as SVG

USAGE:
    patch-illustrator [OPTIONS] [FILE]
    echo '<json>' | patch-illustrator

OPTIONS:
    -o, --output <FILE>  Write SVG to a file instead of stdout
    --toml               Treat input as TOML regardless of extension
    -h, --help           Print help

QUICK START:
    echo '{{"modules":[{{"name":"Osc","outputs":["out"]}},
                     {{"name":"Amp","inputs":["in"]}}],
           "connections":[{{"from":"Osc:out","to":"Amp:in"}}]}}' \
        | patch-illustrator > patch.svg

This draws two modules with a curved connection between their ports.
Connections that reference unknown ports are skipped with a warning on
stderr (set RUST_LOG=off to silence them)."#
    );
}
