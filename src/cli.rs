use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ffopt
#[derive(Parser, Debug)]
#[command(name = "ffopt", version)]
#[command(about = "Apply privacy and security settings to Firefox profiles via user.js")]
pub struct Args {
    /// Only operate on this profile (name from profiles.ini or directory name)
    #[arg(short, long, conflicts_with = "target")]
    pub profile: Option<String>,

    /// Directory containing profiles.ini (defaults to the platform location)
    #[arg(long, value_name = "DIR", env = "MOZ_PROFILES_DIR")]
    pub profiles_dir: Option<PathBuf>,

    /// Operate on this override file directly, skipping profile discovery
    #[arg(short, long, value_name = "FILE")]
    pub target: Option<PathBuf>,

    /// Print discovered profiles as JSON and exit
    #[arg(long, conflicts_with_all = ["profile", "target"])]
    pub list: bool,

    /// Release endpoint used by "Check for updates"
    #[arg(long, value_name = "URL", default_value = ffopt::DEFAULT_RELEASES_URL)]
    pub update_url: String,

    /// Log filter, e.g. "ffopt=debug" (overrides FFOPT_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }
}
