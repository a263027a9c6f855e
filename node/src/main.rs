//! Entry point for the Neo N3 full node process.
//!
//! Wires together the ledger, P2P network, mempool, and (optionally) the
//! dBFT consensus service around a loaded [`neo_config::Configuration`],
//! then blocks until a shutdown signal arrives.
//!
//! This binary is deliberately thin: it has no interactive console, no
//! RPC front-end, and no plugin host. Operators who need those integrate
//! against the library crates directly.

mod ledger_adapter;
mod network_adapter;

use clap::Parser;
use ledger_adapter::LedgerAdapter;
use network_adapter::NetworkAdapter;
use neo_config::{Configuration, NetworkType, ProtocolSettings};
use neo_consensus::mempool_adapter::MempoolAdapter;
use neo_consensus::{ConsensusService, ConsensusServiceConfig};
use neo_core::ShutdownCoordinator;
use neo_ledger::{Blockchain, MemoryPool, MempoolConfig};
use neo_network::{NetworkCommand, P2pNode};
use neo_wallets::KeyPair;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Command-line flags for a single node process.
#[derive(Debug, Parser)]
#[command(name = "neo-node", about = "Neo N3 full node")]
struct Args {
    /// Network to join.
    #[arg(long, value_enum, default_value = "testnet")]
    network: CliNetwork,

    /// Directory the node stores its chain database and configuration in.
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Tracing filter directive, e.g. "info" or "neo_consensus=debug,info".
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Participate in dBFT consensus using an ephemeral validator key.
    ///
    /// Intended for private networks and development; production
    /// validators provision their consensus key out of band.
    #[arg(long, default_value_t = false)]
    consensus: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliNetwork {
    Mainnet,
    Testnet,
    Private,
}

impl From<CliNetwork> for NetworkType {
    fn from(value: CliNetwork) -> Self {
        match value {
            CliNetwork::Mainnet => NetworkType::MainNet,
            CliNetwork::Testnet => NetworkType::TestNet,
            CliNetwork::Private => NetworkType::Private,
        }
    }
}

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_target(true)
        .init();
}

fn load_configuration(args: &Args) -> anyhow::Result<Configuration> {
    let config_path = args.data_dir.join("config.toml");
    if config_path.exists() {
        info!(path = %config_path.display(), "loading configuration");
        return Ok(Configuration::load(&config_path)?);
    }

    info!("no configuration file found, using network defaults");
    let config = match args.network {
        CliNetwork::Mainnet => Configuration::mainnet(&args.data_dir),
        CliNetwork::Testnet => Configuration::testnet(&args.data_dir),
        CliNetwork::Private => {
            let validator = KeyPair::generate()?;
            let protocol = ProtocolSettings::private(vec![validator.compressed_public_key()]);
            Configuration::ephemeral(protocol, &args.data_dir)
        }
    };
    config.validate()?;
    Ok(config)
}

fn p2p_network_config(network: NetworkType, config: &Configuration) -> neo_network::NetworkConfig {
    let mut net_config = match network {
        NetworkType::MainNet => neo_network::NetworkConfig::default(),
        NetworkType::TestNet => neo_network::NetworkConfig::testnet(),
        NetworkType::Private => neo_network::NetworkConfig::private(),
    };
    net_config.max_peers = config.network.max_outbound_connections + config.network.max_inbound_connections;
    net_config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    std::fs::create_dir_all(&args.data_dir)?;
    let config = load_configuration(&args)?;
    let network: NetworkType = args.network.into();

    info!(network = %network, data_dir = %args.data_dir.display(), "starting node");

    let blockchain = Arc::new(Blockchain::new(network).await?);
    info!(height = blockchain.get_height().await, "ledger ready");

    let mempool = Arc::new(MemoryPool::new(MempoolConfig::default()));

    let (cmd_tx, cmd_rx) = mpsc::channel::<NetworkCommand>(256);
    let p2p = Arc::new(P2pNode::new(p2p_network_config(network, &config), cmd_rx)?);

    let shutdown = Arc::new(ShutdownCoordinator::new());

    if config.network.enabled {
        p2p.start().await?;
        let run_handle = {
            let p2p = p2p.clone();
            tokio::spawn(async move {
                if let Err(e) = p2p.run().await {
                    warn!(error = %e, "p2p node stopped with an error");
                }
            })
        };
        drop(run_handle);
    } else {
        info!("networking disabled by configuration");
    }

    let consensus_handle = if args.consensus {
        let validator_key = KeyPair::generate()?;
        let validator_hash = validator_key.get_script_hash();
        warn!(
            validator = %validator_hash,
            "consensus enabled with an ephemeral validator key; this key is not persisted"
        );

        let ledger_service = Arc::new(LedgerAdapter::new(
            blockchain.clone(),
            config.protocol.standby_committee.clone(),
        ));
        let network_service = Arc::new(NetworkAdapter::new(
            p2p.clone(),
            cmd_tx.clone(),
            config.protocol.network,
            validator_hash,
        ));
        let mempool_service = Arc::new(MempoolAdapter::new(mempool.clone()));

        let mut service = ConsensusService::new(
            ConsensusServiceConfig::default(),
            validator_hash,
            ledger_service,
            network_service,
            mempool_service,
        );

        Some(tokio::spawn(async move {
            if let Err(e) = service.start().await {
                warn!(error = %e, "consensus service stopped with an error");
            }
        }))
    } else {
        None
    };

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    shutdown.initiate_shutdown("ctrl-c".to_string()).await.ok();

    if let Some(handle) = consensus_handle {
        handle.abort();
    }

    Ok(())
}
