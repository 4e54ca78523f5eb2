use colored::*;
use core_discovery::DiscoveredResource;
use core_mapping::ResourceRecord;

pub fn run(file_path: &str, json: bool) -> anyhow::Result<()> {
    let config = app_utils::load(file_path)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    let resources = config.discover();

    if json {
        let records: Vec<ResourceRecord> =
            resources.iter().map(DiscoveredResource::to_record).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("{} {}", "Discovering resources:".bold(), file_path);
    println!("  {} Routes: {}", "✓".green(), config.routes.len());
    println!(
        "  {} Mode: {}",
        "✓".green(),
        if config.discovery.flat { "flat" } else { "nested" }
    );

    let mut actions = 0;
    for resource in &resources {
        println!();
        println!(
            "  {} {} {}",
            "●".cyan(),
            resource.name().bold(),
            resource.path().dimmed()
        );
        for action in &resource.actions {
            let path = action.path.as_deref().unwrap_or(resource.path());
            println!("      {:<16} {}", action.name, path.dimmed());
        }
        actions += resource.action_names().len();
    }

    println!();
    if resources.is_empty() {
        println!("{} No resources discovered", "⚠".yellow().bold());
    } else {
        println!(
            "{} Discovered {} resource(s) with {} action(s)",
            "✓".green().bold(),
            resources.len(),
            actions
        );
    }

    Ok(())
}
