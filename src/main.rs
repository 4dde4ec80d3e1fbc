use clap::Parser;
use seo_audit::{AuditConfig, AuditError, AuditOutcome, Auditor};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let auditor = match build_auditor(args) {
        Ok(auditor) => auditor,
        Err(e) => {
            ::log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Note: the audit drives a browser through a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Using WebDriver at {} (set WEBDRIVER_URL or --webdriver-url to change it)",
        auditor.config().webdriver_url
    );

    let start_time = std::time::Instant::now();
    match auditor.run().await {
        Ok(outcome) => {
            print_summary(&outcome);
            ::log::info!(
                "Audit complete in {:.2} seconds",
                start_time.elapsed().as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("SEO audit failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Defaults, then the config file, then WEBDRIVER_URL, then CLI flags
fn build_auditor(args: Args) -> Result<Auditor, AuditError> {
    let mut auditor = Auditor::from_config(AuditConfig::default());
    if let Some(path) = &args.config {
        auditor = auditor.with_config_file(path)?;
    }

    if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL")
        && !webdriver_url.is_empty()
    {
        auditor = auditor.with_webdriver_url(&webdriver_url);
    }

    if let Some(url) = &args.url {
        auditor = auditor.with_base_url(url);
    }
    if let Some(max_pages) = args.max_pages {
        auditor = auditor.with_max_pages(max_pages);
    }
    if let Some(output) = args.output {
        auditor = auditor.with_report_path(output);
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        auditor = auditor.with_webdriver_url(webdriver_url);
    }
    if let Some(timeout) = args.timeout {
        auditor = auditor.with_navigation_timeout(timeout);
    }
    if args.no_headless {
        auditor = auditor.with_headless(false);
    }

    // fail fast on a bad base URL before a browser is started
    auditor.config().normalized_base_url()?;
    Ok(auditor)
}

fn print_summary(outcome: &AuditOutcome) {
    let summary = &outcome.results.summary;

    println!();
    println!("SEO Audit Summary");
    println!("=================");
    println!("Pages checked:            {}", summary.pages_checked);
    println!("Missing titles:           {}", summary.missing_titles);
    println!("Missing descriptions:     {}", summary.missing_descriptions);
    println!("Missing canonical URLs:   {}", summary.missing_canonical);
    println!("Missing structured data:  {}", summary.missing_structured_data);
    println!("Invalid structured data:  {}", summary.invalid_structured_data);
    println!("Images without alt text:  {}", summary.images_without_alt);
    println!("Pages without H1:         {}", summary.empty_h1);
    println!("Pages with multiple H1:   {}", summary.multiple_h1);
    println!("Duplicate titles:         {}", summary.duplicated_titles().count());
    println!(
        "Duplicate descriptions:   {}",
        summary.duplicated_descriptions().count()
    );
    if !outcome.results.failed.is_empty() {
        println!("Unreachable pages:        {}", outcome.results.failed.len());
    }
    println!();
    println!("Detailed report: {}", outcome.report_path.display());
}
