// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use shop_lazyload::{
    deliver, render_products, AppError, CommandLineInput, DeliveryTarget, ListingObserver,
    LoadController, LoaderConfig, ShopHttpClient, TriggerOutcome, TriggerSource,
};
use std::fs;
use std::sync::Arc;

const DETAILED_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}";
const LOG_FILE_NAME: &str = "shop_lazyload.log";

/// Routes logs to stderr and to a debug-level file in the temp directory.
///
/// Stdout is left to the product output.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (console_level, console_pattern) = if verbose {
        (LevelFilter::Debug, DETAILED_PATTERN)
    } else {
        (LevelFilter::Warn, "{l}: {m}{n}")
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(console_pattern)))
        .build();
    let file = FileAppender::builder()
        .append(false)
        .encoder(Box::new(PatternEncoder::new(DETAILED_PATTERN)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("stderr", Box::new(stderr)),
        )
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(
            Root::builder()
                .appenders(["stderr", "file"])
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging to {}", log_file_path.display());
    Ok(())
}

/// Logs grid notifications.
struct GridLogger;

impl ListingObserver for GridLogger {
    fn content_changed(&self, appended: usize, total: usize) {
        log::info!("Grid grew by {} to {} products", appended, total);
    }
}

/// Tallies of one crawl.
#[derive(Debug, Default)]
struct CrawlReport {
    loads: u32,
    appended: usize,
    failures: u32,
    drained: bool,
    blocked: bool,
}

/// Opens a listing, presses "load more" until it runs dry, and delivers
/// what it collected.
struct ListingCrawl<'a> {
    config: &'a LoaderConfig,
    client: ShopHttpClient,
}

impl<'a> ListingCrawl<'a> {
    fn new(config: &'a LoaderConfig) -> Result<Self, AppError> {
        let client = ShopHttpClient::new(config.session.as_ref())?;
        Ok(Self { config, client })
    }

    /// Loads the listing page and attaches a controller to it.
    async fn open(&self) -> Result<LoadController, AppError> {
        let document = self.client.fetch_listing_page(&self.config.location).await?;
        let controller = LoadController::init(
            self.config.location.clone(),
            &document,
            Arc::new(self.client.clone()),
            self.config.settings.clone(),
        )?
        .ok_or_else(|| AppError::NotAListing(self.config.location.to_string()))?;

        controller.subscribe(Arc::new(GridLogger));
        Ok(controller)
    }

    /// Issues triggers until the listing is drained, a cycle fails, or the
    /// load cap is reached. Uses the "load more" control when the page has
    /// one, the scroll source otherwise.
    async fn drain(&self, controller: &LoadController) -> CrawlReport {
        let mut report = CrawlReport::default();
        let source = if controller.triggers().explicit {
            TriggerSource::Explicit
        } else {
            TriggerSource::Scroll
        };

        while report.loads < self.config.max_loads {
            report.loads += 1;
            match controller.trigger(source).await {
                TriggerOutcome::Loaded { appended, .. } => report.appended += appended,
                TriggerOutcome::Drained { appended, .. } => {
                    report.appended += appended;
                    report.drained = true;
                    break;
                }
                TriggerOutcome::Failed(err) => {
                    report.failures += 1;
                    if let Some(banner) = controller.feedback().banner {
                        eprintln!("⚠️  {}", banner);
                    }
                    log::error!("Stopping after failed load: {}", err);
                    break;
                }
                TriggerOutcome::Skipped(reason) => {
                    log::warn!("Load skipped: {:?}", reason);
                    report.drained = controller.state().exhausted;
                    report.blocked = !report.drained;
                    break;
                }
            }
        }

        report
    }

    fn deliver_products(&self, controller: &LoadController) -> Result<usize, AppError> {
        let container = controller.container();
        let content = render_products(container.lock().items(), self.config.format)?;
        let target = match &self.config.output_file {
            Some(path) => DeliveryTarget::WriteFile {
                path: path.clone(),
                content,
            },
            None => DeliveryTarget::PrintToStdout { content },
        };
        deliver(&target)
    }

    fn report_completion(&self, controller: &LoadController, report: &CrawlReport) {
        let state = controller.state();
        let total = controller.container().lock().len();

        eprintln!(
            "📄 {} products ({} loaded in {} requests), last page {}",
            total, report.appended, report.loads, state.current_page
        );
        if report.drained {
            eprintln!("✓ Listing fully loaded");
        } else if report.blocked {
            eprintln!("⚠️  The page offers no way to load more products.");
        } else if report.failures == 0 {
            eprintln!(
                "⚠️  Load limit reached ({}). More products may exist.",
                self.config.max_loads
            );
        }
        if let Some(path) = &self.config.output_file {
            eprintln!("✓ Products saved to {}", path.display());
        }
    }
}

async fn execute(config: &LoaderConfig) -> Result<(), AppError> {
    let crawl = ListingCrawl::new(config)?;
    let controller = crawl.open().await?;
    let report = crawl.drain(&controller).await;
    crawl.deliver_products(&controller)?;
    crawl.report_completion(&controller, &report);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = LoaderConfig::resolve(cli)?;

    execute(&config).await?;

    Ok(())
}
