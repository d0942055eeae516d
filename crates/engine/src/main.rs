//! Boss bar engine - demo host.
//!
//! Drives the engine on in-process adapters: a few scripted viewers on
//! different protocol versions, a shared logical bar, a teleport and a
//! countdown. Packets are reported through `tracing` instead of a socket.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bossbar_domain::{Location, ProtocolVersion, ViewerEvent, ViewerId};
use bossbar_engine::infrastructure::config::BarConfig;
use bossbar_engine::infrastructure::native::TracingBossBarFactory;
use bossbar_engine::infrastructure::ports::{BossBar, BossBarFactory};
use bossbar_engine::infrastructure::scheduler::TickScheduler;
use bossbar_engine::infrastructure::transport::TracingTransport;
use bossbar_engine::infrastructure::viewers::InMemoryViewers;
use bossbar_engine::{App, Ports};

const DEMO_TICKS: u64 = 160;

struct Viewers {
    legacy_1_7: ViewerId,
    legacy_1_8: ViewerId,
    native: ViewerId,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bossbar_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BarConfig::from_env()?;
    tracing::info!(?config, "Starting boss bar demo host");

    let transport = Arc::new(TracingTransport::new());
    let scheduler = Arc::new(TickScheduler::new());
    let locator = Arc::new(InMemoryViewers::new(config.view_distance));

    let mut app = App::new(
        &config,
        Ports {
            transport: transport.clone(),
            versions: locator.clone(),
            viewers: locator.clone(),
            scheduler: scheduler.clone(),
            native_bars: Arc::new(TracingBossBarFactory),
        },
    );

    let viewers = Viewers {
        legacy_1_7: ViewerId::new(),
        legacy_1_8: ViewerId::new(),
        native: ViewerId::new(),
    };
    let spawn = Location::new(0.5, 64.0, 0.5);
    for (viewer, version) in [
        (viewers.legacy_1_7, ProtocolVersion::V1_7_10),
        (viewers.legacy_1_8, ProtocolVersion::V1_8),
        (viewers.native, ProtocolVersion::V1_9),
    ] {
        locator.connect(viewer, version, spawn);
        app.lifecycle.handle_event(&ViewerEvent::Connected { viewer });
    }

    let mut bar = app.boss_bars.new_boss_bar();
    bar.set_title("Welcome to the server");
    for viewer in [viewers.legacy_1_7, viewers.legacy_1_8, viewers.native] {
        bar.add_viewer(viewer);
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_millis));
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }

        for task in scheduler.advance() {
            app.lifecycle.run_task(task);
        }

        let tick = scheduler.current_tick();
        run_script(tick, &app, &locator, &viewers, bar.as_mut())?;
        if tick >= DEMO_TICKS {
            break;
        }
    }

    bar.close();
    app.shutdown();
    tracing::info!(
        packets = transport.packets_sent(),
        bytes = transport.bytes_sent(),
        "Demo finished"
    );
    Ok(())
}

fn run_script(
    tick: u64,
    app: &App,
    locator: &InMemoryViewers,
    viewers: &Viewers,
    bar: &mut dyn BossBar,
) -> anyhow::Result<()> {
    match tick {
        20 => bar.set_progress(0.5)?,
        40 => {
            let to = Location::new(250.0, 72.0, -40.0).with_rotation(90.0, 10.0);
            locator.move_to(viewers.legacy_1_8, to);
            app.lifecycle.handle_event(&ViewerEvent::Teleported {
                viewer: viewers.legacy_1_8,
                to,
            });
        }
        60 => {
            bar.remove_viewer(viewers.legacy_1_7);
            app.bars
                .set_message_timed(viewers.legacy_1_7, "Event starts soon", 3)?;
        }
        100 => bar.set_title("Event running"),
        140 => {
            locator.disconnect(viewers.legacy_1_8);
            app.lifecycle.handle_event(&ViewerEvent::Disconnected {
                viewer: viewers.legacy_1_8,
            });
        }
        _ => {}
    }
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
