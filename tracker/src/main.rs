use tracker::{setup_environment, AppState};

fn main() -> anyhow::Result<()> {
    let config = setup_environment();

    tracing::info!(work_dir = %config.work_dir, "Tracker starting");

    let state = AppState::initialize(config)?;

    match state.current_role() {
        Some(role) => tracing::info!(?role, "Session restored"),
        None => tracing::info!("No active session, login required"),
    }
    tracing::info!(
        users = state.directory().users().len(),
        orders = state.orders().store().len(),
        "Ready"
    );

    Ok(())
}
