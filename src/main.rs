//! Stickies
//!
//! Runs the relay and a headless local participant.
//! Usage: `stickies [name] [port]`

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stickies::{
    game::{InputFrame, Player, SimConfig, WorldState},
    network::{GameSession, RelayConfig, RelayHub, RelayServer, SharedWorld},
    TICK_RATE, VERSION,
};

/// Ticks between heartbeat log lines.
const HEARTBEAT_TICKS: u64 = 600;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Stickies v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "player".to_string());
    let mut relay_config = RelayConfig::default();
    if let Some(port) = args.next() {
        match port.parse::<u16>() {
            Ok(port) => relay_config.bind_addr.set_port(port),
            Err(e) => {
                error!("Invalid port {:?}: {}", port, e);
                return ExitCode::FAILURE;
            }
        }
    }

    let world: SharedWorld = Arc::new(RwLock::new(WorldState::default_world()));
    let hub = Arc::new(RelayHub::new(relay_config.outbound_queue));

    let server = match RelayServer::bind(&relay_config, hub.clone(), world.clone(), &name).await {
        Ok(server) => Arc::new(server),
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let runner = server.clone();
    let relay_task = tokio::spawn(async move { runner.run().await });

    let color = Player::random_color(&mut rand::thread_rng());
    let mut session = GameSession::join(world, hub, SimConfig::default(), &name, color).await;

    let mut ticker = tokio::time::interval(Duration::from_secs(1) / TICK_RATE);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = session.tick(InputFrame::new()).await;
                if result.tick % HEARTBEAT_TICKS == 0 {
                    let peers = server.hub().connection_count().await;
                    let players = session.world().read().await.players.len();
                    info!("Tick {}: {} connections, {} players known", result.tick, peers, players);
                }
            }
            _ = &mut shutdown => {
                info!("Shutting down");
                break;
            }
        }
    }

    server.shutdown();
    match relay_task.await {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            error!("Relay stopped: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Relay task failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
