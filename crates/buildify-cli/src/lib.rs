//! Buildify export command
//!
//! Reads a document snapshot (JSON) and writes the generated source files,
//! either into an output directory or to stdout.

use buildify_codegen::{DEFAULT_COMPONENT_NAME, OutputConfig, OutputFormat, StylingStrategy, generate_document};
use buildify_core::{Document, SnapshotError};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "buildify-export")]
#[command(about = "Generate UI source code from a Buildify document snapshot")]
pub struct Cli {
    /// Snapshot file (reads from stdin if not provided)
    pub input: Option<PathBuf>,

    /// Target format: react, vue or web-components
    #[arg(short, long, default_value_t = OutputFormat::React)]
    pub format: OutputFormat,

    /// Styling strategy: inline, stylesheet or css-in-js
    #[arg(short, long, default_value_t = StylingStrategy::Inline)]
    pub styling: StylingStrategy,

    /// Emit TypeScript
    #[arg(short, long)]
    pub typescript: bool,

    /// Name of the generated top-level component
    #[arg(short = 'n', long, default_value = DEFAULT_COMPONENT_NAME)]
    pub component_name: String,

    /// Directory to write files into (prints to stdout if not provided)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl Cli {
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new()
            .with_format(self.format)
            .with_styling(self.styling)
            .with_typescript(self.typescript)
            .with_component_name(self.component_name.clone())
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Error reading '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Error reading from stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("Error writing '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Error writing output: {0}")]
    Stdout(#[source] io::Error),
    #[error("Invalid document: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Run an export. `stdin` is read when no input file is given and `stdout`
/// receives the files when no output directory is given.
///
/// Returns the paths written, empty when printing.
pub fn run(cli: &Cli, stdin: impl Read, stdout: impl Write) -> Result<Vec<PathBuf>, CliError> {
    let json = read_input(cli.input.as_deref(), stdin)?;
    let document = Document::from_json(&json)?;
    let config = cli.output_config();
    log::info!(
        "Exporting {} components as {} ({})",
        document.len(),
        config.format,
        config.styling
    );

    let code = generate_document(&document, &config);
    let files = code.files(&config);
    match &cli.out {
        Some(dir) => write_files(dir, &files),
        None => {
            print_files(&files, stdout).map_err(CliError::Stdout)?;
            Ok(Vec::new())
        }
    }
}

fn read_input(path: Option<&Path>, mut stdin: impl Read) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer).map_err(CliError::Stdin)?;
            Ok(buffer)
        }
    }
}

fn write_files(dir: &Path, files: &[(&'static str, &str)]) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        fs::write(&path, contents).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Single files print as-is; several get a `// name` banner each.
fn print_files(files: &[(&'static str, &str)], mut out: impl Write) -> io::Result<()> {
    if let [(_, contents)] = files {
        return out.write_all(contents.as_bytes());
    }
    for (i, (name, contents)) in files.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "// {name}")?;
        out.write_all(contents.as_bytes())?;
    }
    Ok(())
}
