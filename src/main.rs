//! Gemforge - socketed weapon powers
//!
//! Builds the power registry, assembles the configured weapon loadouts,
//! fills open sockets, prints each weapon's tooltip, and saves the result.
//!
//! Usage: `gemforge [save-name]` (defaults to `latest`)

mod loadout;
mod save;
mod settings;

use anyhow::{bail, Context, Result};
use gemforge_core::TooltipType;
use gemforge_power::{register_builtin, PowerRegistry};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use loadout::{verify_round_trip, Loadout};
use settings::GemforgeSettings;

fn build_registry(settings: &GemforgeSettings) -> Result<PowerRegistry> {
    let registry = PowerRegistry::new();
    if settings.sockets.register_builtin {
        register_builtin(&registry).context("Failed to register builtin powers")?;
    }
    registry.freeze();
    Ok(registry)
}

fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Gemforge...");

    let save_name = std::env::args().nth(1).unwrap_or_else(|| "latest".to_string());
    let settings = GemforgeSettings::load();
    if !GemforgeSettings::exists() {
        // Write defaults so they can be edited
        settings.save()?;
    }
    let registry = build_registry(&settings)?;
    info!("{} powers available", registry.len() - 1);

    let mut rng = match settings.sockets.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut loadouts = settings
        .loadouts
        .iter()
        .map(|l| Loadout::from_settings(l, &registry))
        .collect::<Result<Vec<_>>>()?;
    if settings.sockets.fill_empty {
        loadouts = loadouts
            .iter()
            .map(|l| l.fill_random(&registry, &mut rng))
            .collect();
    }

    for loadout in &loadouts {
        verify_round_trip(&loadout.component, &registry)
            .with_context(|| format!("Loadout '{}' failed to round trip", loadout.name))?;
        for line in loadout.tooltip(TooltipType::Basic) {
            println!("{}", line.plain());
        }
        println!(
            "  max use time: {} ticks, sockets fillable: {}",
            loadout.component.max_use_time(&loadout.stack),
            loadout.component.can_be_filled()
        );
        println!();
    }

    save::save_loadouts(&save_name, &loadouts)?;
    let restored = save::load_loadouts(&save_name, &registry)?;
    if restored != loadouts {
        bail!("Save '{}' did not restore the same loadouts", save_name);
    }

    for slot in save::list_saves()? {
        info!(
            "Save '{}': {} loadouts ({})",
            slot.filename, slot.loadout_count, slot.timestamp
        );
    }

    Ok(())
}
