//! CLI entrypoint for keybow-host
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then runs the device loop until Ctrl-C.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use keybow_application::{
    AutoLights, DeviceLoop, HidController, HidTransportPort, HostCapabilities, KeypadScriptPort,
    LightArbiter, LightDriverPort, MidiTransportPort, NullHidTransport, NullMidiTransport,
    NullSerialPort, SerialPort,
};
use keybow_infrastructure::{
    ConfigLoader, FileConfig, LineKeySource, PngPatternLibrary, SandboxedFileStore, open_hid,
    open_lights, open_midi, open_serial,
};
use keybow_presentation::{Cli, ConsoleLightDriver, format_issue, format_session_banner};
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufRead, BufReader};
use tokio::task::block_in_place;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    if let Some(script) = &cli.script {
        config.script.path = script.clone();
    }

    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", format_issue(issue));
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("configuration has errors");
    }

    info!("Starting keybow-host");

    // === Dependency Injection ===
    let devices = Devices::open(&config, cli.simulate);
    let host = HostCapabilities {
        keys: Arc::new(config.key_table()),
        hid: Arc::new(Mutex::new(HidController::new(devices.hid, devices.midi))),
        lights: Arc::new(LightArbiter::new(config.lights.count, config.lights.auto)),
        patterns: Arc::new(PngPatternLibrary::new(&config.lights.patterns_dir)),
        files: Arc::new(SandboxedFileStore::with_root(
            &config.storage.root,
            &config.storage.subdir,
        )),
        serial: devices.serial,
    };

    print!(
        "{}",
        format_session_banner(&config.script.path, &host.keys, cli.simulate)
    );

    let render = tokio::spawn(render_lights(
        Arc::clone(&host.lights),
        devices.lights,
        Duration::from_millis(config.lights.frame_interval_ms),
    ));

    // Listen before the script loads so an early Ctrl-C is not lost
    let interrupt = tokio::spawn(tokio::signal::ctrl_c());
    let interrupted = async move {
        match interrupt.await {
            Ok(Ok(())) => info!("Interrupted"),
            Ok(Err(e)) => warn!("Failed to listen for Ctrl-C: {}", e),
            Err(e) => warn!("Ctrl-C listener stopped: {}", e),
        }
    };

    let script = start_script(&config.script.path, host.clone())?;
    let device = DeviceLoop::new(script, host);
    let keys = LineKeySource::new(BufReader::new(tokio::io::stdin()));
    run(
        &device,
        keys,
        Duration::from_millis(config.tick.interval_ms),
        interrupted,
    )
    .await;

    block_in_place(|| device.shutdown());
    render.abort();
    Ok(())
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins if set.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout belongs to the simulated LEDs
    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let Some(path) = &cli.log_file else {
        registry.with(console).init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file {} does not name a file", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));

    registry
        .with(console)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Ok(Some(guard))
}

/// Output devices, real or simulated.
struct Devices {
    hid: Box<dyn HidTransportPort>,
    midi: Box<dyn MidiTransportPort>,
    serial: Arc<Mutex<dyn SerialPort>>,
    lights: Box<dyn LightDriverPort>,
}

impl Devices {
    fn open(config: &FileConfig, simulate: bool) -> Self {
        if simulate {
            info!("Simulating devices");
            return Self {
                hid: Box::new(NullHidTransport),
                midi: Box::new(NullMidiTransport),
                serial: Arc::new(Mutex::new(NullSerialPort)),
                lights: Box::new(ConsoleLightDriver::stdout()),
            };
        }
        Self {
            hid: open_hid(&config.devices),
            midi: open_midi(&config.devices),
            serial: open_serial(&config.devices),
            lights: open_lights(&config.devices, config.lights.brightness),
        }
    }
}

#[cfg(feature = "scripting")]
fn start_script(path: &Path, host: HostCapabilities) -> Result<impl KeypadScriptPort> {
    keybow_infrastructure::LuaScriptingEngine::initialize(path, host)
        .context("failed to start the Lua engine")
}

#[cfg(not(feature = "scripting"))]
fn start_script(path: &Path, _host: HostCapabilities) -> Result<impl KeypadScriptPort> {
    warn!(
        "Built without scripting; ignoring {} and using fallback key codes",
        path.display()
    );
    Ok(keybow_application::NoScriptingEngine)
}

/// Push dirty light buffers to the driver and advance auto lights.
///
/// Runs on its own task so a sleeping script does not freeze animations.
async fn render_lights(
    lights: Arc<LightArbiter>,
    mut driver: Box<dyn LightDriverPort>,
    frame_interval: Duration,
) {
    let auto = AutoLights::new(Arc::clone(&lights), frame_interval);
    let mut frame = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        frame.tick().await;
        auto.step();
        if let Some(buffer) = lights.take_dirty()
            && let Err(e) = driver.show(buffer.pixels())
        {
            warn!("Failed to update LEDs: {}", e);
        }
    }
}

/// Feed key events and ticks to the script until `shutdown` completes.
///
/// Script calls may sleep, so they run under `block_in_place`. The same
/// `shutdown` future is polled on every pass of the loop.
async fn run<S, R>(
    device: &DeviceLoop<S>,
    mut keys: LineKeySource<R>,
    tick_interval: Duration,
    shutdown: impl Future<Output = ()>,
) where
    S: KeypadScriptPort,
    R: AsyncBufRead + Unpin,
{
    tokio::pin!(shutdown);
    block_in_place(|| device.start());

    let mut input_open = true;
    let mut tick = tokio::time::interval(tick_interval.max(Duration::from_millis(1)));
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ticking = device.script().has_tick();

    loop {
        tokio::select! {
            () = &mut shutdown => break,

            event = keys.next_event(), if input_open => match event {
                Ok(Some(event)) => {
                    block_in_place(|| device.handle_key(event));
                }
                Ok(None) => {
                    info!("Key input closed; still running until Ctrl-C");
                    input_open = false;
                }
                Err(e) => {
                    warn!("Key input failed: {}", e);
                    input_open = false;
                }
            },

            _ = tick.tick(), if ticking => {
                block_in_place(|| device.tick());
            }
        }
    }
}
