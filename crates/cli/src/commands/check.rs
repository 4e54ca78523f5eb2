use colored::*;
use core_mapping::{CompiledPattern, ResourceDefinition};
use std::collections::{BTreeMap, HashSet};

/// Problem with a template, in registration order
#[derive(Debug, PartialEq, Eq)]
pub enum Finding {
    /// The registry will skip this template
    Unusable { template: String, error: String },
    /// An earlier binding of another resource answers this template's paths
    Shadowed {
        template: String,
        resource: String,
        by_template: String,
        by_resource: String,
    },
}

/// Replay registration order and report templates that first-match-wins
/// resolution will never (or not always) route to their own resource.
///
/// A later template counts as shadowed when an earlier binding of another
/// resource matches its sample path (`/items/featured` after `/items/:id`).
pub fn template_findings<'a>(
    resources: impl IntoIterator<Item = &'a ResourceDefinition>,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut owners: BTreeMap<String, String> = BTreeMap::new();
    let mut bound: Vec<(CompiledPattern, String)> = Vec::new();

    for resource in resources {
        let templates = std::iter::once(resource.path.as_str())
            .chain(resource.actions.iter().filter_map(|a| a.path.as_deref()));

        for template in templates {
            // Identical templates are bound once, to the first owner
            if let Some(owner) = owners.get(template) {
                if owner != &resource.name {
                    findings.push(Finding::Shadowed {
                        template: template.to_string(),
                        resource: resource.name.clone(),
                        by_template: template.to_string(),
                        by_resource: owner.clone(),
                    });
                }
                continue;
            }

            let pattern = match CompiledPattern::compile(template) {
                Ok(pattern) => pattern,
                Err(e) => {
                    findings.push(Finding::Unusable {
                        template: template.to_string(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let sample = pattern.sample_path();
            if let Some((earlier, owner)) = bound.iter().find(|(p, _)| p.is_match(&sample)) {
                if owner != &resource.name {
                    findings.push(Finding::Shadowed {
                        template: template.to_string(),
                        resource: resource.name.clone(),
                        by_template: earlier.template().to_string(),
                        by_resource: owner.clone(),
                    });
                }
            }

            owners.insert(template.to_string(), resource.name.clone());
            bound.push((pattern, resource.name.clone()));
        }
    }

    findings
}

pub fn run(file_path: &str) -> anyhow::Result<()> {
    println!("{} {}", "Checking config:".bold(), file_path);

    // Parsing validates every declared resource
    let config = app_utils::load(file_path)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    println!("  {} Declared resources: {}", "✓".green(), config.resources.len());
    println!("  {} Routes: {}", "✓".green(), config.routes.len());

    let discovered: Vec<ResourceDefinition> = config
        .discover()
        .into_iter()
        .map(|r| r.into_definition())
        .collect();
    println!("  {} Discovered resources: {}", "✓".green(), discovered.len());

    let mut warnings = 0;

    // Duplicate declared names
    let mut seen_names = HashSet::new();
    for resource in &config.resources {
        if !seen_names.insert(resource.name.as_str()) {
            println!(
                "  {} Resource '{}' is declared more than once",
                "⚠".yellow(),
                resource.name
            );
            warnings += 1;
        }
    }

    // Declared resources register before discovered ones
    for finding in template_findings(config.resources.iter().chain(&discovered)) {
        match finding {
            Finding::Unusable { template, error } => {
                println!("  {} Template {} is skipped: {}", "⚠".yellow(), template, error);
            }
            Finding::Shadowed {
                template,
                resource,
                by_template,
                by_resource,
            } => {
                println!(
                    "  {} Template {} of '{}' is shadowed by {} of '{}'",
                    "⚠".yellow(),
                    template,
                    resource,
                    by_template,
                    by_resource
                );
            }
        }
        warnings += 1;
    }

    // Summary
    println!();
    if warnings == 0 {
        println!("{} Config is valid!", "✓".green().bold());
    } else {
        println!(
            "{} Config is valid with {} warning(s)",
            "⚠".yellow().bold(),
            warnings
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_mapping::ActionDefinition;

    #[test]
    fn test_parameter_template_shadows_later_literal() {
        let resources = [
            ResourceDefinition::new("items", "/items/:id"),
            ResourceDefinition::new("featured", "/items/featured"),
        ];

        assert_eq!(
            template_findings(&resources),
            [Finding::Shadowed {
                template: "/items/featured".into(),
                resource: "featured".into(),
                by_template: "/items/:id".into(),
                by_resource: "items".into(),
            }]
        );
    }

    #[test]
    fn test_literal_first_is_not_shadowed() {
        let resources = [
            ResourceDefinition::new("featured", "/items/featured"),
            ResourceDefinition::new("items", "/items/:id"),
        ];
        assert!(template_findings(&resources).is_empty());
    }

    #[test]
    fn test_identical_template_of_other_resource() {
        let resources = [
            ResourceDefinition::new("a", "/shared"),
            ResourceDefinition::new("b", "/shared/"),
            ResourceDefinition::new("c", "/shared"),
        ];

        let findings = template_findings(&resources);
        assert_eq!(findings.len(), 2);
        assert!(matches!(
            &findings[1],
            Finding::Shadowed { resource, by_template, .. } if resource == "c" && by_template == "/shared"
        ));
    }

    #[test]
    fn test_same_resource_overlap_is_fine() {
        let resources = [ResourceDefinition::new("items", "/items/:id")
            .with_action(ActionDefinition::new("view").with_path("/items/:id"))
            .with_action(ActionDefinition::new("featured").with_path("/items/featured"))];
        assert!(template_findings(&resources).is_empty());
    }

    #[test]
    fn test_unusable_template_reported() {
        let long = format!("/{}", "a".repeat(300));
        let resources = [ResourceDefinition::new("long", long)];
        assert!(matches!(
            template_findings(&resources).as_slice(),
            [Finding::Unusable { .. }]
        ));
    }
}
