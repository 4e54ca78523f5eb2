use colored::*;
use tracing::debug;

pub fn run(file_path: &str, request_path: &str) -> anyhow::Result<()> {
    let config = app_utils::load(file_path)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    let registry = config.build_registry();
    debug!(
        resources = registry.resource_count(),
        bindings = registry.bindings().len(),
        "registry ready"
    );

    println!("{} {}", "Resolving path:".bold(), request_path);

    let found = registry
        .get_resource_by_path(request_path)
        .ok_or_else(|| anyhow::anyhow!("No resource matches {}", request_path))?;

    println!("  {} Resource: {}", "✓".green(), found.resource_name.cyan());
    println!("  {} Type: {}", "✓".green(), found.resource.resource_type);
    println!("  {} Template: {}", "✓".green(), found.resource.path);

    if found.context.is_empty() {
        println!("  {} Context: (none)", "✓".green());
    } else {
        println!("  {} Context:", "✓".green());
        for (name, value) in &found.context {
            println!("      {} = {}", name, value);
        }
    }

    let actions: Vec<&str> = found
        .resource
        .actions
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    println!("  {} Actions: {}", "✓".green(), actions.join(", "));

    Ok(())
}
