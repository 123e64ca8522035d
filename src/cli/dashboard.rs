//! Dashboard CLI command

use crate::config::settings::Settings;
use crate::display::format_dashboard;
use crate::error::PantryResult;
use crate::services::DashboardService;
use crate::storage::Storage;

/// Print the dashboard, as text or as JSON
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    json: bool,
) -> PantryResult<()> {
    let service = DashboardService::new(storage, settings.user_id, settings.recent_items_limit);
    let summary = service.summary(settings.today())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_dashboard(&summary, settings));
    }

    Ok(())
}
