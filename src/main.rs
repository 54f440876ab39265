use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use cletech::api::{self, admin, ApiClient, PurchaseQuery};
use cletech::bulk::{is_valid_capacity, parse_bulk_csv, parse_bulk_input, quote_bulk, BulkParse, PurchaseIntent};
use cletech::config::{self, Settings};
use cletech::error::{ApiError, ValidationError};
use cletech::models::{AppState, Gateway, PurchaseStatus};
use cletech::network::Network;
use cletech::output;
use cletech::phone::{format_phone_for_display, validate_phone, Msisdn};
use cletech::services::{watch_activity, write_purchases_csv, PurchaseSession};
use cletech::store::StoreView;
use cletech::utils::{format_capacity, format_cedis, parse_float_prefix};

#[derive(Parser)]
#[command(
    name = "cletech",
    author,
    version,
    about = "Cletech data bundle command-line tool",
    long_about = r#"Cletech: buy and manage mobile data bundles from the terminal.

Buy single bundles or whole lists of numbers, check your wallet, manage
purchases, API keys and withdrawals as an admin, and serve the agent
storefront. API credentials come from environment variables or an .env file
(API_BASE_URL, API_TOKEN).

Examples:
  1) Buy 2 GB of MTN data:
      cletech buy 0241234567 2 --network mtn
  2) Preview a bulk list without buying:
      cletech bulk numbers.txt --dry-run
  3) Serve the storefront:
      cletech serve --port 8080
"#,
    after_help = "Use `cletech <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// API token to use instead of API_TOKEN
    #[arg(long, global = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the agent storefront web server
    Serve {
        /// Host to bind to (default: HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (default: PORT or 8080)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate configuration (env vars / API credentials)
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Check that the API base URL and token are configured, then fetch the product catalog to confirm the API is reachable.")]
    CheckConfig,
    /// List the product catalog grouped by network
    Products {
        /// Only show this network
        #[arg(long, short = 'n')]
        network: Option<String>,
    },
    /// Format or validate phone numbers
    Phone {
        #[command(subcommand)]
        sub: PhoneCommands,
    },
    /// Buy a single bundle
    #[command(about = "Buy a data bundle", long_about = "Buy one bundle for a phone number. Capacity is in GB (0.1 to 100). Paying with the wallet re-reads the balance afterwards.")]
    Buy {
        phone: String,
        capacity: String,
        /// Network (default: DEFAULT_NETWORK or MTN)
        #[arg(long, short = 'n')]
        network: Option<String>,
        /// Payment method (wallet|paystack)
        #[arg(long, default_value = "wallet")]
        gateway: String,
    },
    /// Buy bundles for a list of numbers
    #[command(about = "Buy bundles in bulk", long_about = "Read `phoneNumber capacity` pairs, one per line (use `-` for stdin). Bad lines are reported and skipped. The preview shows each row priced against the catalog before anything is bought.")]
    Bulk {
        file: PathBuf,
        /// Network for every row (default: DEFAULT_NETWORK or MTN)
        #[arg(long, short = 'n')]
        network: Option<String>,
        /// Payment method (wallet|paystack)
        #[arg(long, default_value = "wallet")]
        gateway: String,
        /// Treat the input as a CSV spreadsheet export
        #[arg(long)]
        csv: bool,
        /// Upload the file and let the server parse it (xlsx/xls/csv)
        #[arg(long, conflicts_with = "csv")]
        server_parse: bool,
        /// Only show the preview; do not buy
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the wallet balance
    Balance,
    /// Show recent purchases
    Activity {
        /// Number of entries to show
        #[arg(long, default_value = "10")]
        limit: usize,
        /// Keep polling
        #[arg(long)]
        watch: bool,
        /// Poll interval in seconds (default: ACTIVITY_POLL_SECS or 30)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Admin dashboard actions
    Admin {
        #[command(subcommand)]
        sub: AdminCommands,
    },
    /// Agent storefront
    Store {
        #[command(subcommand)]
        sub: StoreCommands,
    },
}

#[derive(Subcommand)]
enum PhoneCommands {
    /// Print a number as 0XX XXX XXXX
    Format { input: String },
    /// Check whether a number is a valid Ghanaian mobile number
    Validate { input: String },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Manage purchases
    Purchases {
        #[command(subcommand)]
        sub: PurchaseCommands,
    },
    /// Manage API keys
    ApiKeys {
        #[command(subcommand)]
        sub: ApiKeyCommands,
    },
    /// Review withdrawal requests
    Withdrawals {
        #[command(subcommand)]
        sub: WithdrawalCommands,
    },
    /// Credit a user's wallet
    #[command(about = "Credit a user's wallet", long_about = "Add funds to a user's wallet. The amount is in cedis and must be positive.")]
    Credit {
        user_id: String,
        amount: f64,
        /// Description recorded with the transaction
        #[arg(long, default_value = "Admin credit")]
        note: String,
    },
}

#[derive(Subcommand)]
enum PurchaseCommands {
    /// List purchases
    List {
        /// Page number (1-indexed)
        #[arg(long, short = 'p', default_value = "1")]
        page: usize,
        /// Purchases per page
        #[arg(long, default_value = "20")]
        per_page: usize,
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
        /// Filter by network
        #[arg(long)]
        network: Option<String>,
    },
    /// Change the status of a purchase
    SetStatus { purchase_id: String, status: String },
    /// Export purchases to CSV
    Export {
        /// Output file
        #[arg(long, short = 'o')]
        out: PathBuf,
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },
}

#[derive(Subcommand)]
enum ApiKeyCommands {
    List,
    /// Create a key; the full key is shown once
    Create { name: String },
    Revoke { key_id: String },
}

#[derive(Subcommand)]
enum WithdrawalCommands {
    List {
        #[arg(long)]
        status: Option<String>,
    },
    Approve { withdrawal_id: String },
    Reject {
        withdrawal_id: String,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
enum StoreCommands {
    /// Show a store's products for one network
    Show {
        /// Store slug (default: STORE_SLUG)
        slug: Option<String>,
        #[arg(long, short = 'n')]
        network: Option<String>,
    },
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{}", Paint::new(msg.to_string()).red());
    process::exit(1);
}

fn fail_api(context: &str, e: ApiError) -> ! {
    tracing::debug!(error = ?e, "{}", context);
    fail(format!("{}: {}", context, e))
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn resolve_network(arg: Option<&str>, settings: &Settings) -> Network {
    match arg {
        Some(raw) => raw.parse().unwrap_or_else(|e| fail(e)),
        None => settings.default_network,
    }
}

fn resolve_gateway(raw: &str) -> Gateway {
    raw.parse().unwrap_or_else(|e| fail(e))
}

fn build_client(settings: &Settings) -> ApiClient {
    ApiClient::new(settings).unwrap_or_else(|e| fail(e))
}

fn read_input(path: &Path) -> Vec<u8> {
    let result = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).map(|_| buf)
    } else {
        std::fs::read(path)
    };
    result.unwrap_or_else(|e| fail(format!("Failed to read {}: {}", path.display(), e)))
}

async fn start_server(settings: Settings, host: &str, port: u16) {
    let client = build_client(&settings);
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            fail(format!("Invalid host/port format: {}", e));
        }
    };
    let app = cletech::routes::build_router(AppState::new(client, settings));
    tracing::info!(%addr, "Starting storefront server");
    println!("{} {}", Paint::new("Storefront running on").green(), Paint::new(format!("http://{}", addr)).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                fail(format!("Server error: {}", e));
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

async fn run_bulk(
    settings: &Settings,
    file: &Path,
    network: Network,
    gateway: Gateway,
    csv: bool,
    server_parse: bool,
    dry_run: bool,
) {
    let client = build_client(settings);
    let bytes = read_input(file);

    let parsed: BulkParse = if server_parse {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        api::parse_spreadsheet(&client, &file_name, bytes, network)
            .await
            .unwrap_or_else(|e| fail_api("Failed to parse spreadsheet", e))
    } else if csv {
        parse_bulk_csv(bytes.as_slice(), network).unwrap_or_else(|e| fail(e))
    } else {
        parse_bulk_input(&String::from_utf8_lossy(&bytes), network)
    };

    output::print_parse_errors(&parsed.errors);
    if parsed.purchases.is_empty() {
        fail("No valid purchases found");
    }

    let catalog = api::load_products(&client)
        .await
        .unwrap_or_else(|e| fail_api("Failed to load products", e));
    let quote = quote_bulk(&parsed.purchases, &catalog.products);
    output::print_bulk_preview(&quote);

    if dry_run {
        println!("{}", Paint::new("Dry run: nothing was bought").dim());
        return;
    }

    let balance = if gateway.debits_wallet() {
        match api::load_balance(&client).await {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::warn!(error = %e, "Could not load wallet balance before bulk purchase");
                None
            }
        }
    } else {
        None
    };

    let session = PurchaseSession::new(client);
    let pb = spinner(&format!("Submitting {} purchases...", parsed.purchases.len()));
    let outcome = session
        .submit_bulk(&parsed.purchases, network, gateway, quote.total, balance)
        .await;
    pb.finish_and_clear();
    output::print_outcome(&outcome);
    if !outcome.is_success() {
        process::exit(1);
    }
}

async fn run_buy(settings: &Settings, phone: &str, capacity: &str, network: Network, gateway: Gateway) {
    let phone = Msisdn::parse(phone).unwrap_or_else(|e| fail(e));
    let capacity_gb = parse_float_prefix(capacity);
    if !is_valid_capacity(capacity_gb) {
        fail(ValidationError::InvalidCapacity(capacity.to_string()));
    }
    let client = build_client(settings);

    match api::load_products(&client).await {
        Ok(catalog) => match catalog.find(network.as_str(), capacity_gb) {
            Some(p) if !p.in_stock => fail(format!("{} {} is out of stock", network.label(), format_capacity(capacity_gb))),
            Some(p) => println!(
                "{} {} {} to {} for {}",
                Paint::new("Buying").bold(),
                network.label(),
                format_capacity(capacity_gb),
                phone.display(),
                Paint::new(format_cedis(p.price)).cyan()
            ),
            None => println!(
                "{}",
                Paint::new(format!("No {} {} bundle in the catalog; the server will decide", network.label(), format_capacity(capacity_gb))).yellow()
            ),
        },
        Err(e) => tracing::warn!(error = %e, "Could not load catalog before purchase"),
    }

    let intent = PurchaseIntent { phone_number: phone.as_str().to_string(), capacity: capacity_gb, network };
    let session = PurchaseSession::new(client);
    let pb = spinner("Submitting purchase...");
    let outcome = session.submit_single(&intent, gateway).await;
    pb.finish_and_clear();
    output::print_outcome(&outcome);
    if !outcome.is_success() {
        process::exit(1);
    }
}

async fn run_admin(settings: &Settings, sub: AdminCommands) {
    let client = build_client(settings);
    match sub {
        AdminCommands::Purchases { sub } => match sub {
            PurchaseCommands::List { page, per_page, status, network } => {
                let query = PurchaseQuery {
                    page,
                    per_page,
                    status: status.as_deref().map(PurchaseStatus::parse),
                    network: network.map(|n| resolve_network(Some(n.as_str()), settings).as_str().to_string()),
                };
                let result = admin::load_purchases(&client, &query)
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to load purchases", e));
                output::print_purchase_page(&result, per_page);
            }
            PurchaseCommands::SetStatus { purchase_id, status } => {
                let status = PurchaseStatus::parse(&status);
                if !PurchaseStatus::settable().contains(&status) {
                    let settable = PurchaseStatus::settable();
                    let allowed: Vec<&str> = settable.iter().map(|s| s.as_str()).collect();
                    fail(format!("Unknown status '{}'. Use one of: {}", status, allowed.join(", ")));
                }
                let resp = admin::update_purchase_status(&client, &purchase_id, &status)
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to update purchase", e));
                println!(
                    "{} {} → {}",
                    Paint::new(resp.message.unwrap_or_else(|| "Status updated".into())).green(),
                    purchase_id,
                    output::status_badge(&status)
                );
            }
            PurchaseCommands::Export { out, status } => {
                let query = PurchaseQuery {
                    per_page: 100,
                    status: status.as_deref().map(PurchaseStatus::parse),
                    ..PurchaseQuery::default()
                };
                let rows = admin::load_all_purchases(&client, &query)
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to load purchases", e));
                let file = std::fs::File::create(&out)
                    .unwrap_or_else(|e| fail(format!("Failed to create {}: {}", out.display(), e)));
                let count = write_purchases_csv(&rows, file)
                    .unwrap_or_else(|e| fail(format!("Failed to write {}: {}", out.display(), e)));
                println!("{} {} purchases to {}", Paint::new("Exported").green(), count, out.display());
            }
        },
        AdminCommands::ApiKeys { sub } => match sub {
            ApiKeyCommands::List => {
                let keys = admin::load_api_keys(&client)
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to load API keys", e));
                output::print_api_keys(&keys);
            }
            ApiKeyCommands::Create { name } => {
                if name.trim().is_empty() {
                    fail("Key name must not be empty");
                }
                let key = admin::create_api_key(&client, &name)
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to create API key", e));
                println!("{} '{}'", Paint::new("Created API key").green(), key.name);
                if let Some(full) = &key.key {
                    println!("{} {}", Paint::new("Key:").bold(), Paint::new(full).cyan());
                    println!("{}", Paint::new("Store it now; it will not be shown again.").yellow());
                }
            }
            ApiKeyCommands::Revoke { key_id } => {
                admin::revoke_api_key(&client, &key_id)
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to revoke API key", e));
                println!("{} {}", Paint::new("Revoked API key").green(), key_id);
            }
        },
        AdminCommands::Withdrawals { sub } => match sub {
            WithdrawalCommands::List { status } => {
                let rows = admin::load_withdrawals(&client, status.as_deref())
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to load withdrawals", e));
                output::print_withdrawals(&rows);
            }
            WithdrawalCommands::Approve { withdrawal_id } => {
                let resp = admin::approve_withdrawal(&client, &withdrawal_id)
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to approve withdrawal", e));
                println!("{}", Paint::new(resp.message.unwrap_or_else(|| format!("Withdrawal {} approved", withdrawal_id))).green());
            }
            WithdrawalCommands::Reject { withdrawal_id, reason } => {
                let resp = admin::reject_withdrawal(&client, &withdrawal_id, reason.as_deref())
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to reject withdrawal", e));
                println!("{}", Paint::new(resp.message.unwrap_or_else(|| format!("Withdrawal {} rejected", withdrawal_id))).green());
            }
        },
        AdminCommands::Credit { user_id, amount, note } => {
            if !(amount.is_finite() && amount > 0.0) {
                fail(format!("Invalid amount: {}", amount));
            }
            let resp = admin::credit_wallet(&client, &user_id, amount, &note)
                .await
                .unwrap_or_else(|e| fail_api("Failed to credit wallet", e));
            println!(
                "{}",
                Paint::new(resp.message.unwrap_or_else(|| format!("Credited {} to {}", format_cedis(amount), user_id))).green()
            );
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());
    let settings = Settings::from_env().with_token(cli.token);

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(config::get_host);
            let port = port.unwrap_or_else(config::get_port);
            start_server(settings, &host, port).await;
        }
        Commands::CheckConfig => {
            let mut ok = true;
            println!("{} {}", Paint::new("API base URL:").bold(), settings.api_base_url);
            if std::env::var("API_BASE_URL").map(|v| v.trim().is_empty()).unwrap_or(true) {
                eprintln!("{}", Paint::new(format!("API_BASE_URL is not configured; using {}", config::FALLBACK_API_BASE_URL)).yellow());
            }
            if settings.api_token.is_empty() {
                eprintln!("{}", Paint::new("API_TOKEN is not configured").red());
                ok = false;
            }
            let client = build_client(&settings);
            match api::load_products(&client).await {
                Ok(catalog) => println!(
                    "{}",
                    Paint::new(format!("API reachable ({} products in {} networks)", catalog.products.len(), catalog.grouped.len())).green()
                ),
                Err(e) => {
                    eprintln!("{}: {}", Paint::new("Configuration appears invalid").red(), e);
                    ok = false;
                }
            }
            if !ok {
                process::exit(1);
            }
        }
        Commands::Products { network } => {
            let client = build_client(&settings);
            let catalog = api::load_products(&client)
                .await
                .unwrap_or_else(|e| fail_api("Failed to load products", e));
            let filter = network.map(|n| resolve_network(Some(n.as_str()), &settings));
            output::print_catalog(&catalog, filter.as_ref().map(|n| n.as_str()));
        }
        Commands::Phone { sub } => match sub {
            PhoneCommands::Format { input } => println!("{}", format_phone_for_display(&input)),
            PhoneCommands::Validate { input } => {
                if validate_phone(&input) {
                    println!("{} {}", Paint::new("Valid:").green(), format_phone_for_display(&input));
                } else {
                    fail(format!("Invalid phone number: {}", input));
                }
            }
        },
        Commands::Buy { phone, capacity, network, gateway } => {
            let network = resolve_network(network.as_deref(), &settings);
            let gateway = resolve_gateway(&gateway);
            run_buy(&settings, &phone, &capacity, network, gateway).await;
        }
        Commands::Bulk { file, network, gateway, csv, server_parse, dry_run } => {
            let network = resolve_network(network.as_deref(), &settings);
            let gateway = resolve_gateway(&gateway);
            run_bulk(&settings, &file, network, gateway, csv, server_parse, dry_run).await;
        }
        Commands::Balance => {
            let client = build_client(&settings);
            let balance = api::load_balance(&client)
                .await
                .unwrap_or_else(|e| fail_api("Failed to load balance", e));
            println!("{} {}", Paint::new("Wallet balance:").bold(), Paint::new(format_cedis(balance)).cyan());
        }
        Commands::Activity { limit, watch, interval } => {
            let client = build_client(&settings);
            if watch {
                let every = interval
                    .filter(|s| *s > 0)
                    .map(Duration::from_secs)
                    .unwrap_or(settings.activity_poll_interval);
                println!("{}", Paint::new(format!("Polling every {}s, press Ctrl-C to stop", every.as_secs())).dim());
                watch_activity(&client, every, limit, None, |items| {
                    println!("{}", Paint::new(chrono::Local::now().format("%H:%M:%S").to_string()).dim());
                    output::print_activity(items);
                })
                .await;
            } else {
                let items = api::recent_activity(&client, limit)
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to load activity", e));
                output::print_activity(&items);
            }
        }
        Commands::Admin { sub } => run_admin(&settings, sub).await,
        Commands::Store { sub } => match sub {
            StoreCommands::Show { slug, network } => {
                let slug = slug
                    .or_else(|| settings.store_slug.clone())
                    .unwrap_or_else(|| fail("No store slug given and STORE_SLUG is not set"));
                let client = build_client(&settings);
                let store = api::load_agent_store(&client, &slug)
                    .await
                    .unwrap_or_else(|e| fail_api("Failed to load store", e));
                let view = StoreView::build(&store.products, network.as_deref());
                output::print_store(&store, &view);
            }
        },
    }
}
