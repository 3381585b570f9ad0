use anyhow::Result;
use clap::Parser;
use git_dash::app::App;
use git_dash::config::cli::Cli;
use git_dash::config::file::ConfigFile;
use git_dash::config::AppConfig;
use git_dash::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config file if it exists
    let config_path = cli.config.clone().unwrap_or_else(ConfigFile::default_path);
    let file_config = if config_path.exists() {
        ConfigFile::load(&config_path)?
    } else {
        ConfigFile::default()
    };

    let mut config = AppConfig {
        gui: file_config.gui,
        labels: file_config.labels,
        listing: file_config.listing,
        in_demo: cli.demo,
        log_file: cli.log_file.clone(),
    };

    // CLI arguments win over the config file
    if let Some(files) = cli.files {
        config.listing.files = Some(files);
    }
    if let Some(commit_files) = cli.commit_files {
        config.listing.commit_files = Some(commit_files);
    }
    if let Some(submodules) = cli.submodules {
        config.listing.submodules = Some(submodules);
    }
    if let Some(mode) = cli.portrait_mode {
        config.gui.portrait_mode = mode;
    }

    let guard = logging::init(config.log_file.clone())?;
    tracing::info!(
        config = %config_path.display(),
        log_file = %guard.log_file.display(),
        "starting git-dash"
    );

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Run app
    let mut app = App::new(config).await?;
    let result = app.run(&mut terminal).await;

    // Restore terminal
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    result
}
