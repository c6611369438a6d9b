use anyhow::Result;
use chrono::Local;

use crate::commands::load_services;
use crate::render::render_action;

pub async fn run() -> Result<()> {
    let services = load_services()?;
    let today = Local::now().date_naive();

    let actions = bdaycal_core::sync::plan(
        &services.directory,
        &services.calendar,
        &services.config,
        today,
    )
    .await;

    if actions.is_empty() {
        println!("Calendar is in sync.");
        return Ok(());
    }

    for action in &actions {
        println!("  {}", render_action(action));
    }

    println!("\n{} pending action(s). Run `bdaycal sync` to apply.", actions.len());

    Ok(())
}
