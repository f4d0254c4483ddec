use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use pos_payments::application::service::PaymentService;
use pos_payments::config::Settings;
use pos_payments::domain::evaluator::PaymentEvaluator;
use pos_payments::domain::rules::MethodRegistry;
use pos_payments::error::PaymentError;
use pos_payments::interfaces::csv::payment_reader::PaymentReader;
use pos_payments::interfaces::csv::writers::{MethodWriter, OutcomeWriter, ReportWriter};
use pos_payments::telemetry;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List supported payment methods with their modifier bounds and points rate
    Methods,
    /// Evaluate payment requests from a CSV file and record the accepted ones
    Process {
        /// Input payments CSV file
        input: PathBuf,
    },
    /// Hourly sales between --start (inclusive) and --end (exclusive)
    Report {
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        end: DateTime<Utc>,
        /// Payments CSV to record before reporting
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Default)]
struct Summary {
    accepted: usize,
    rejected: usize,
    unreadable: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.settings.log_level);

    // A registry gap is a configuration defect: refuse to start.
    let registry = MethodRegistry::standard().into_diagnostic()?;
    let store = cli.settings.open_store().into_diagnostic()?;
    let service = PaymentService::new(PaymentEvaluator::new(registry), store);

    let stdout = io::stdout();
    match cli.command {
        Command::Methods => {
            MethodWriter::new(stdout.lock())
                .write_methods(service.evaluator().registry().rules())
                .into_diagnostic()?;
        }
        Command::Process { input } => {
            let mut outcomes = OutcomeWriter::new(stdout.lock());
            ingest(&service, &input, Some(&mut outcomes)).await?;
            outcomes.flush().into_diagnostic()?;
        }
        Command::Report { start, end, input } => {
            if let Some(input) = input {
                ingest::<io::Sink>(&service, &input, None).await?;
            }
            let buckets = service.sales_report(start, end).await.into_diagnostic()?;
            ReportWriter::new(stdout.lock())
                .write_buckets(&buckets)
                .into_diagnostic()?;
        }
    }

    Ok(())
}

/// Runs every row of `input` through the service, optionally echoing each outcome.
///
/// Unreadable rows and rejections are logged and skipped; storage failures abort.
async fn ingest<W: Write>(
    service: &PaymentService,
    input: &Path,
    mut outcomes: Option<&mut OutcomeWriter<W>>,
) -> Result<Summary> {
    let file = File::open(input).into_diagnostic()?;
    let reader = PaymentReader::new(file);
    let mut summary = Summary::default();

    for (index, request) in reader.payments().enumerate() {
        let row = index + 1;
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                warn!(row, "Error reading payment: {}", e);
                summary.unreadable += 1;
                continue;
            }
        };

        match service.process_payment(&request).await {
            Ok(record) => {
                summary.accepted += 1;
                if let Some(writer) = outcomes.as_deref_mut() {
                    writer.accepted(row, &record).into_diagnostic()?;
                }
            }
            Err(PaymentError::Rejected(rejection)) => {
                summary.rejected += 1;
                warn!(
                    row,
                    kind = %rejection.kind,
                    field = rejection.field.as_deref().unwrap_or("-"),
                    "Payment rejected: {}",
                    rejection.message
                );
                if let Some(writer) = outcomes.as_deref_mut() {
                    writer
                        .rejected(row, &request.customer_id, &request.payment_method, &rejection)
                        .into_diagnostic()?;
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }

    info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        unreadable = summary.unreadable,
        "input processed"
    );
    Ok(summary)
}
