//! Nelo wallet CLI — the presentation layer's stand-in.
//!
//! Drives the wallet core against the durable LMDB backend: provisioning,
//! balance operations, audit history, and a simulated proximity tap that
//! runs the full initiator/responder exchange in process.

use anyhow::{bail, Context};
use clap::Parser;
use nelo_crypto::{derive_wallet_id, device_keys_from_private, device_keys_from_seed,
    generate_device_keys};
use nelo_exchange::receive_payment;
use nelo_ledger::Ledger;
use nelo_nullables::NullChannel;
use nelo_payment::DeviceSigner;
use nelo_store_lmdb::{LmdbCounterStore, LmdbEnvironment, LmdbLedgerStore, LmdbWalletStore};
use nelo_types::{Amount, DeviceKeys, PrivateKey, WalletParams};
use nelo_utils::format_minor;
use nelo_verification::Verifier;
use nelo_wallet_core::OfflineWallet;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "nelo", about = "Nelo wallet — offline payment core")]
struct Cli {
    /// Data directory for wallet storage and the device key.
    #[arg(long, default_value = "./nelo_data", env = "NELO_DATA_DIR")]
    data_dir: PathBuf,

    /// Path to a TOML file overriding the standard wallet parameters.
    #[arg(long, env = "NELO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Provision a new wallet in the data directory.
    Init {
        /// 32-byte hex seed for deterministic keys (testing only).
        #[arg(long)]
        seed: Option<String>,
    },
    /// Show balances and the counter position.
    Balance,
    /// Fund the online balance (amount in minor units).
    Recharge { amount: u64 },
    /// Move funds from the online balance into the offline wallet.
    Load { amount: u64 },
    /// Print the audit history, newest first.
    History,
    /// Simulate a proximity tap paying a merchant (amount in minor units).
    Pay { amount: u64 },
}

type CliWallet = OfflineWallet<LmdbWalletStore, LmdbCounterStore, LmdbLedgerStore, DeviceSigner>;

fn load_params(config: Option<&Path>) -> anyhow::Result<WalletParams> {
    match config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let params: WalletParams =
                toml::from_str(&contents).context("failed to parse config file")?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(params)
        }
        None => Ok(WalletParams::standard()),
    }
}

fn key_file(data_dir: &Path) -> PathBuf {
    data_dir.join("device.key")
}

fn load_keys(data_dir: &Path) -> anyhow::Result<DeviceKeys> {
    let path = key_file(data_dir);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("no device key at {} — run `nelo init` first", path.display()))?;
    let bytes = hex::decode(contents.trim()).context("device key file is not valid hex")?;
    let key: [u8; 32] = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("device key must be 32 bytes"))?;
    Ok(device_keys_from_private(PrivateKey(key)))
}

fn open_wallet(env: &LmdbEnvironment, data_dir: &Path, params: WalletParams) -> anyhow::Result<CliWallet> {
    let keys = load_keys(data_dir)?;
    let id = derive_wallet_id(&keys.public);
    let wallet = OfflineWallet::open(
        id,
        DeviceSigner::new(keys),
        params,
        env.wallet_store(),
        env.counter_store(),
        env.ledger_store(),
    )?;
    Ok(wallet)
}

fn init_wallet(
    env: &LmdbEnvironment,
    data_dir: &Path,
    params: WalletParams,
    seed: Option<String>,
) -> anyhow::Result<()> {
    if key_file(data_dir).exists() {
        bail!("device key already exists in {}", data_dir.display());
    }
    let keys = match seed {
        Some(s) => {
            let bytes = hex::decode(s.trim()).context("seed is not valid hex")?;
            let seed: [u8; 32] = bytes
                .try_into()
                .map_err(|_| anyhow::anyhow!("seed must be 32 bytes"))?;
            device_keys_from_seed(&seed)
        }
        None => generate_device_keys(),
    };
    let id = derive_wallet_id(&keys.public);
    std::fs::write(key_file(data_dir), hex::encode(keys.private.0))
        .context("failed to write device key")?;
    OfflineWallet::provision(
        id.clone(),
        DeviceSigner::new(keys),
        params,
        env.wallet_store(),
        env.counter_store(),
        env.ledger_store(),
    )?;
    println!("wallet provisioned: {id}");
    Ok(())
}

async fn simulated_tap(env: &LmdbEnvironment, wallet: &CliWallet, amount: Amount) -> anyhow::Result<()> {
    // The merchant reader lives in-process: a fixed identity with durable
    // verifier state, so replay checks behave exactly as across real taps.
    let merchant = derive_wallet_id(&device_keys_from_seed(&[0xEE; 32]).public);
    let verifier = Verifier::new(env.verifier_store());
    let merchant_ledger = Ledger::new(env.ledger_store(), wallet.params().ledger_cap);
    let timeout = Duration::from_millis(wallet.params().exchange_timeout_ms);

    let (mut payer_ch, mut reader_ch) = NullChannel::pair();
    let (payload, received) = tokio::join!(
        wallet.authorize(amount, &mut payer_ch),
        receive_payment(&mut reader_ch, &verifier, &merchant_ledger, &merchant, timeout),
    );
    let payload = payload?;
    received?;

    println!(
        "paid {} (tx {}, counter {})",
        format_minor(payload.amount, payload.currency),
        payload.id,
        payload.counter
    );
    println!(
        "offline balance: {}",
        format_minor(wallet.offline_balance()?, wallet.params().currency)
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nelo_utils::init_tracing();

    let cli = Cli::parse();
    let params = load_params(cli.config.as_deref())?;
    std::fs::create_dir_all(&cli.data_dir)
        .with_context(|| format!("failed to create {}", cli.data_dir.display()))?;
    let env = LmdbEnvironment::open(&cli.data_dir.join("db"))?;

    match cli.command {
        Command::Init { seed } => init_wallet(&env, &cli.data_dir, params, seed)?,
        Command::Balance => {
            let wallet = open_wallet(&env, &cli.data_dir, params)?;
            let currency = wallet.params().currency;
            println!("wallet:  {}", wallet.id());
            println!("online:  {}", format_minor(wallet.online_balance()?, currency));
            println!("offline: {}", format_minor(wallet.offline_balance()?, currency));
            println!("counter: {}", wallet.counter_position()?);
        }
        Command::Recharge { amount } => {
            let wallet = open_wallet(&env, &cli.data_dir, params)?;
            let currency = wallet.params().currency;
            let new_balance = wallet.recharge(Amount::new(amount))?;
            println!("online balance: {}", format_minor(new_balance, currency));
        }
        Command::Load { amount } => {
            let wallet = open_wallet(&env, &cli.data_dir, params)?;
            let currency = wallet.params().currency;
            wallet.transfer_online_to_offline(Amount::new(amount))?;
            println!(
                "online:  {}",
                format_minor(wallet.online_balance()?, currency)
            );
            println!(
                "offline: {}",
                format_minor(wallet.offline_balance()?, currency)
            );
        }
        Command::History => {
            let wallet = open_wallet(&env, &cli.data_dir, params)?;
            let history = wallet.history()?;
            if history.is_empty() {
                println!("no entries");
            }
            for entry in history {
                let amount = match (entry.amount, entry.currency) {
                    (Some(amount), Some(currency)) => format_minor(amount, currency),
                    _ => "-".to_string(),
                };
                println!(
                    "{:>13}  {:<12} {:<7} {:>12}  {}",
                    entry.timestamp.as_millis(),
                    format!("{:?}", entry.kind),
                    format!("{:?}", entry.status),
                    amount,
                    entry.metadata.as_deref().unwrap_or("")
                );
            }
        }
        Command::Pay { amount } => {
            let wallet = open_wallet(&env, &cli.data_dir, params)?;
            simulated_tap(&env, &wallet, Amount::new(amount)).await?;
        }
    }

    Ok(())
}
