mod cli;

use anyhow::Context;
use cli::Args;
use ffopt::{list_profiles, Catalog, GithubReleases, Menu, OverrideFiles, Target};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = args
        .log
        .clone()
        .or_else(|| std::env::var("FFOPT_LOG").ok())
        .unwrap_or_else(|| "ffopt=warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = ffopt::VERSION, "ffopt starting");

    if args.list {
        let profiles = list_profiles(args.profiles_dir.as_deref())
            .context("Failed to list profiles. Make sure Firefox is installed.")?;
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    let targets = resolve_targets(&args)?;
    println!("Found {} target(s).", targets.len());

    let updates = GithubReleases::new(args.update_url.clone());
    let stdin = std::io::stdin();
    let mut menu = Menu::new(
        stdin.lock(),
        std::io::stdout(),
        Catalog::builtin(),
        targets,
        &updates,
    );
    menu.run().context("Failed to read user input")?;
    Ok(())
}

fn resolve_targets(args: &Args) -> anyhow::Result<Vec<Target>> {
    if let Some(file) = &args.target {
        return Ok(vec![Target {
            label: file.display().to_string(),
            files: OverrideFiles::for_file(file.clone()),
        }]);
    }

    let profiles_dir = args.profiles_dir.as_deref();

    if let Some(name) = &args.profile {
        let path = ffopt::find_profile_path(name, profiles_dir).with_context(|| {
            format!(
                "Failed to find profile '{}'. Use 'ffopt --list' to see available profiles.",
                name
            )
        })?;
        return Ok(vec![Target {
            label: path.display().to_string(),
            files: OverrideFiles::for_profile(&path),
        }]);
    }

    let profiles = list_profiles(profiles_dir)
        .context("Failed to discover Firefox profiles. Make sure Firefox is installed.")?;
    if profiles.is_empty() {
        anyhow::bail!("No Firefox profiles found.");
    }

    Ok(profiles
        .into_iter()
        .map(|p| Target {
            label: p.path.display().to_string(),
            files: OverrideFiles::for_profile(&p.path),
        })
        .collect())
}
