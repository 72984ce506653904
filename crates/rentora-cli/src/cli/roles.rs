//! Role overview (`rentora roles`).

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use rentora_types::role::Role;

use crate::state::AppState;

/// Show each role's configured wizard step sequence and whether the
/// profile enables it.
pub fn show_roles(state: &AppState, json: bool) -> Result<()> {
    let wizard = &state.config.wizard;
    let profile = &state.config.profile;

    if json {
        let map: serde_json::Map<String, serde_json::Value> = Role::ALL
            .iter()
            .map(|role| {
                let steps: Vec<String> = wizard
                    .sequence_for(*role)
                    .unwrap_or(&wizard.default)
                    .iter()
                    .map(|step| step.to_string())
                    .collect();
                (
                    role.to_string(),
                    serde_json::json!({
                        "enabled": profile.roles.contains(role),
                        "steps": steps,
                    }),
                )
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Role").fg(Color::White),
        Cell::new("Enabled").fg(Color::White),
        Cell::new("Steps").fg(Color::White),
    ]);

    for role in Role::ALL {
        let enabled = if profile.roles.contains(&role) {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        let steps: Vec<&str> = wizard
            .sequence_for(role)
            .unwrap_or(&wizard.default)
            .iter()
            .map(|step| step.label())
            .collect();
        table.add_row(vec![
            Cell::new(role.to_string()).fg(Color::Cyan),
            enabled,
            Cell::new(steps.join(" > ")),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
