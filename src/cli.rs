use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "nuget-warden",
    about = "Scan .NET projects for blocked NuGet packages",
    version
)]
pub struct Cli {
    /// Path to the blocked packages file
    #[arg(long, default_value = "blocked-packages.yaml", value_name = "FILE")]
    pub config: PathBuf,

    /// Directory to scan [default: current directory]
    #[arg(long = "project-dir", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Scan mode: 'direct' for *.csproj PackageReference, 'central' for Directory.Packages.props
    #[arg(long, default_value = "direct", value_name = "MODE")]
    pub mode: String,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
