use bundle_graph::adapters::outbound::console::StderrProgressReporter;
use bundle_graph::adapters::outbound::filesystem::OutputDirectory;
use bundle_graph::application::dto::InspectionRequest;
use bundle_graph::application::factories::{DataSourceFactory, RendererFactory};
use bundle_graph::application::use_cases::InspectBundlesUseCase;
use bundle_graph::cli::Args;
use bundle_graph::config::{self, RunConfig};
use bundle_graph::ports::inbound::GraphInspectionPort;
use bundle_graph::shared::error::ExitCode;
use bundle_graph::shared::Result;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "bundle_graph=debug"
    } else {
        "bundle_graph=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    // Defaults, then config file, then CLI flags
    let file_config = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&std::env::current_dir()?)?,
    };
    let mut run_config = RunConfig::default();
    if let Some(file_config) = file_config {
        run_config = run_config.merge_file(file_config);
    }
    let run_config = args.merge_into(run_config);
    run_config.validate()?;

    tracing::debug!(
        source = ?run_config.source,
        namespace = %run_config.namespace,
        output_dir = %run_config.output_dir.display(),
        concurrency = run_config.concurrency,
        attempts = run_config.attempts,
        "resolved configuration"
    );

    // Create adapters (Dependency Injection)
    let data_source = DataSourceFactory::create(&run_config)?;
    let renderer = RendererFactory::create(run_config.format);
    let output = OutputDirectory::new(run_config.output_dir.clone());
    let progress_reporter = StderrProgressReporter::new();

    let use_case = InspectBundlesUseCase::new(data_source, renderer, output, progress_reporter);

    let request = InspectionRequest::new(
        run_config.root_name(),
        run_config.render_images,
        run_config.concurrency,
    )
    .with_stats_file_name(run_config.stats_file.clone());

    let response = use_case.inspect(request).await?;

    if response.is_complete() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::PartialFailure)
    }
}
