use super::PortraitMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "git-dash")]
#[command(about = "Terminal dashboard for working-tree and commit file listings")]
pub struct Cli {
    /// Working-tree listing (`git status --porcelain` output)
    #[arg(short, long, value_name = "PATH")]
    pub files: Option<PathBuf>,

    /// Commit file listing (`git diff --name-status` output)
    #[arg(short, long, value_name = "PATH")]
    pub commit_files: Option<PathBuf>,

    /// The repository's `.gitmodules` file
    #[arg(long, value_name = "PATH")]
    pub submodules: Option<PathBuf>,

    /// Override the configured portrait mode
    #[arg(long, value_enum)]
    pub portrait_mode: Option<PortraitMode>,

    /// Presentation mode: hides transient status text
    #[arg(long)]
    pub demo: bool,

    /// Log file path (defaults to the user data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}
