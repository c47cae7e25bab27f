use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use objweld::{dump::Summary, LoadOptions, Loaded};

mod cli;

/// Errors related to dumping a single file.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("failed to load {0:?}: {1}")]
    Load(PathBuf, #[source] objweld::Error),
    #[error(transparent)]
    Output(#[from] io::Error),
}

fn dump_file(
    out: &mut impl Write,
    path: &Path,
    options: &LoadOptions,
    summary: bool,
) -> Result<(), DumpError> {
    let Loaded { mesh, warnings }: Loaded = objweld::load_path(path, options)
        .map_err(|e| DumpError::Load(path.to_owned(), e))?;
    tracing::info!(
        path = ?path,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        warnings = warnings.len(),
        "loaded mesh"
    );
    if summary {
        writeln!(out, "{}", Summary::from(&mesh))?;
    } else {
        write!(out, "{mesh}")?;
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);

    let options = cli.load_options();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failed = 0usize;

    for path in &cli.files {
        if let Err(e) = dump_file(&mut out, path, &options, cli.summary) {
            tracing::error!("{e}");
            failed += 1;
        }
    }

    if let Err(e) = out.flush() {
        tracing::error!(?e, "failed to flush output");
        return ExitCode::FAILURE;
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        tracing::warn!(failed, total = cli.files.len(), "some files could not be dumped");
        ExitCode::FAILURE
    }
}
