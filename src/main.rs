use anyhow::Result;
use parallax_config::AppConfig;
use parallax_sensor::synthetic::SyntheticSource;
use parallax_sensor::{TiltFeed, TiltInterpreter};
use parallax_view::ParallaxView;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parallax_app=info,parallax_sensor=info".into()),
        )
        .init();

    info!("Parallax motion demo starting");

    // Load config.
    let config = parallax_config::load_config().unwrap_or_else(|e| {
        warn!(?e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    info!(
        sensitivity = config.sensor.tilt_sensitivity,
        rate_hz = config.sensor.sample_rate_hz,
        intensity = config.view.parallax_intensity,
        "Config loaded"
    );

    let mut interpreter = TiltInterpreter::new();
    interpreter.set_tilt_sensitivity(config.sensor.tilt_sensitivity)?;

    // A synthetic sway generator stands in for the platform sensor stream;
    // one full wobble every 8 seconds at the configured sample rate.
    let source = SyntheticSource::new(u64::from(config.sensor.sample_rate_hz) * 8, 0.35);
    let feed = TiltFeed::spawn(
        source,
        interpreter,
        config.sensor.sample_rate_hz,
        config.sensor.screen_rotation,
    );

    let (width, height) = config.view.viewport;
    let mut view = ParallaxView::new(width as f32, height as f32);
    view.set_parallax_intensity(config.view.parallax_intensity)?;

    let mut updates = feed.subscribe();
    let mut frame_count: u64 = 0;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("Tilt feed stopped");
                    break;
                }
                let tilt = *updates.borrow_and_update();
                let offset = view.apply_tilt(tilt);

                frame_count += 1;
                if frame_count % 60 == 0 {
                    info!(
                        x = offset.x,
                        y = offset.y,
                        yaw = tilt.yaw,
                        pitch = tilt.pitch,
                        roll = tilt.roll,
                        "Parallax offset"
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    // Save config on exit.
    if let Err(e) = parallax_config::save_config(&config) {
        error!(?e, "Failed to save config");
    }

    Ok(())
}
