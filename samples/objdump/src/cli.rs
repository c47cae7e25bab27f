use std::path::PathBuf;

use clap::ValueHint;
use objweld::{DegeneratePolicy, LoadOptions, VertexOrder};

/// Layout of log lines on stderr
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogFormat::Compact => "compact",
            LogFormat::Full => "full",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        })
    }
}

/// Order of vertices in the output
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Order {
    /// Order in which each vertex is first referenced by a face
    FirstUse,
    /// Sorted by (position, texcoord, normal) index
    Sorted,
}

impl From<Order> for VertexOrder {
    fn from(value: Order) -> Self {
        match value {
            Order::FirstUse => VertexOrder::FirstUse,
            Order::Sorted => VertexOrder::Sorted,
        }
    }
}

/// Handling of polygons with fewer than 3 corners
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Degenerate {
    /// Fail to load the file
    Reject,
    /// Drop the polygon and keep going
    Skip,
}

impl From<Degenerate> for DegeneratePolicy {
    fn from(value: Degenerate) -> Self {
        match value {
            Degenerate::Reject => DegeneratePolicy::Reject,
            Degenerate::Skip => DegeneratePolicy::Skip,
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,objweld=info,objdump=info",
        env = "OBJDUMP_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Order of vertices in the welded mesh
    #[arg(short, long, value_enum, default_value_t = Order::FirstUse)]
    pub order: Order,
    /// Handling of polygons with fewer than 3 corners
    #[arg(short, long, value_enum, default_value_t = Degenerate::Reject)]
    pub degenerate: Degenerate,
    /// Resolve negative face indices relative to the end of each attribute list
    #[arg(short, long)]
    pub relative_indices: bool,
    /// Print only the number of vertices, texcoords, normals, and faces of each mesh
    #[arg(short, long)]
    pub summary: bool,
    /// Files to dump
    #[arg(num_args = 1.., required = true, value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            relative_indices: self.relative_indices,
            degenerate: self.degenerate.into(),
            order: self.order.into(),
        }
    }
}

/// Install the global subscriber; logs go to stderr so dumps on stdout stay clean
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
