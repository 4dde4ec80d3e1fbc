use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seo-audit")]
#[command(about = "Crawls a site with a headless browser and writes an SEO audit report")]
#[command(version)]
pub struct Args {
    /// Base URL to audit; only pages under this prefix are checked
    #[arg(long)]
    pub url: Option<String>,

    /// Maximum number of pages to check
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Path of the Markdown report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// WebDriver server URL (overrides WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Navigation timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub no_headless: bool,
}
