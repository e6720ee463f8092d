use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pay_fees::application::pay_fees::PayFeesStore;
use pay_fees::config::Config;
use pay_fees::domain::fee::FilingData;
use pay_fees::domain::ports::{FeeScheduleResolverRef, PaymentAccountResolverRef};
use pay_fees::infrastructure::pay_api::PayApiClient;
use pay_fees::infrastructure::tracing_alerts::TracingAlertSink;
use pay_fees::interfaces::csv::fee_action_reader::{FeeAction, FeeActionReader, FeeActionType};
use pay_fees::interfaces::csv::fee_writer::FeeWriter;
use pay_fees::telemetry;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Fee actions CSV file (`action, fee_code` rows)
    input: PathBuf,

    /// Path to a JSON configuration file
    #[arg(long, env = "PAY_FEES_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the pay-api. Without it, fees and payment accounts come from the config file.
    #[arg(long, env = "PAY_API_URL")]
    pay_api_url: Option<Url>,

    /// Bearer token sent to the pay-api
    #[arg(long, env = "PAY_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Account whose payment method should be initialized
    #[arg(long, env = "PAY_FEES_ACCOUNT_ID")]
    account_id: Option<u64>,

    /// Folio number attached to the fee lookups
    #[arg(long)]
    folio: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).into_diagnostic()?;

    let (fee_schedule, payment_accounts): (FeeScheduleResolverRef, PaymentAccountResolverRef) =
        match cli.pay_api_url.or_else(|| config.pay_api_url.clone()) {
            Some(url) => {
                info!(%url, "using pay-api");
                let mut client = PayApiClient::new(url).with_timeout(Duration::from_secs(30));
                if let Some(token) = cli.token {
                    client = client.with_token(token);
                }
                let client = Arc::new(client);
                let fee_schedule: FeeScheduleResolverRef = client.clone();
                let payment_accounts: PaymentAccountResolverRef = client;
                (fee_schedule, payment_accounts)
            }
            None => {
                let fee_schedule: FeeScheduleResolverRef = Arc::new(config.fee_schedule());
                let payment_accounts: PaymentAccountResolverRef =
                    Arc::new(config.payment_account_store());
                (fee_schedule, payment_accounts)
            }
        };

    let mut store = PayFeesStore::new(fee_schedule, payment_accounts, Arc::new(TracingAlertSink))
        .with_fee_types(config.fee_type_table());
    if let Some(account_id) = cli.account_id.or(config.account_id) {
        store = store.with_account_id(account_id);
    }

    let file = File::open(&cli.input).into_diagnostic()?;
    let mut actions: Vec<FeeAction> = Vec::new();
    for action in FeeActionReader::new(file).actions() {
        match action {
            Ok(action) => actions.push(action),
            Err(e) => warn!("Error reading fee action: {e}"),
        }
    }

    // Resolve every fee the actions refer to up front, in file order.
    let fee_types = config.fee_type_table();
    let mut filings: Vec<FilingData> = Vec::new();
    for action in &actions {
        if let Some(filing) = fee_types.get(&action.fee_code)
            && !filings.iter().any(|known| known.same_fee(filing))
        {
            filings.push(filing.clone());
        }
    }
    store.load_fee_types_and_charges(cli.folio, filings).await;

    for action in &actions {
        match action.action {
            FeeActionType::Add => store.add_pay_fees(&action.fee_code).await,
            FeeActionType::Remove => store.remove_pay_fees(&action.fee_code).await,
        }
    }

    if store.account_id().is_some() {
        store.init_payment_method().await;
        let state = store.payment_state().await;
        let selected = store.user_selected_payment_method().await;
        let allowed = store.allowed_payment_methods().await;
        info!(?state, ?selected, ?allowed, "payment method");
    }

    let fees = store.fees().await;
    let stdout = io::stdout();
    let mut writer = FeeWriter::new(stdout.lock());
    writer.write_fees(&fees).into_diagnostic()?;

    Ok(())
}
