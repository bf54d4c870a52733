//! List policies command.

use anyhow::Result;
use signals_config::AppConfig;
use signals_policy::PolicyRegistry;

pub async fn run(config: &AppConfig) -> Result<()> {
    let registry = PolicyRegistry::new();

    println!("Available Policies");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in registry.list() {
        let marker = if info.name == config.policy.name {
            " (active)"
        } else {
            ""
        };
        println!("  {}{}", info.name, marker);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        println!("  defaults: {}", info.default_config);
        println!();
    }

    println!("Use --policy <name> or set policy.name to select a policy.");

    Ok(())
}
