use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.4.0"
/// Format for dev builds: "v0.4.0\ndev: abc1234 2024-01-15"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("TASKLIST_GIT_HASH");
    const COMMIT_DATE: &str = env!("TASKLIST_COMMIT_DATE");
    const IS_RELEASE: &str = env!("TASKLIST_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    bin_name = "tasklist",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "A small task list with a console and a REST front end", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to tasklist.toml in the OS config dir)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Directory holding datastore.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Use a throwaway in-memory store
    #[arg(long, global = true, conflicts_with = "data_dir", help_heading = "Options")]
    pub memory: bool,

    /// Entity kind records are stored under
    #[arg(long, global = true, value_name = "KIND", help_heading = "Options")]
    pub kind: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactive console (default)
    #[command(display_order = 1)]
    Shell,

    /// Run a single console command and exit
    #[command(display_order = 2)]
    Exec {
        /// Command words, e.g. `new buy milk` or `done 3`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Serve the REST controller
    #[command(display_order = 3)]
    Serve {
        /// Listen address (defaults to the configured bind address)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}
