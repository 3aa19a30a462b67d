use wellness_core::Locale;

use crate::common::{build_coordinator, now_local};

/// Host the tick loop: one-second cadence, events printed as JSON lines,
/// clean stop on Ctrl-C.
pub fn run(locale: Locale, demo: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut coordinator = build_coordinator(locale, demo, true);
    coordinator.presenter_mut().request_permission();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()?;

    runtime.block_on(async move {
        for event in coordinator.start_all(now_local()) {
            println!("{}", serde_json::to_string(&event)?);
        }

        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    for event in coordinator.tick(now_local()) {
                        println!("{}", serde_json::to_string(&event)?);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    coordinator.stop_all();
                    tracing::info!("shutting down");
                    return Ok(());
                }
            }
        }
    })
}
