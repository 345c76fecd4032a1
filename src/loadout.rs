//! Weapon loadouts: an item stack plus its power component

use anyhow::{bail, Context, Result};
use gemforge_core::{Identifier, ItemStack, Text, TooltipContext, TooltipType};
use gemforge_power::builtin::{is_nether_key, is_runic_key};
use gemforge_power::{GemPowerComponent, PowerEntry, PowerRegistry};
use rand::Rng;
use tracing::{debug, info};

use crate::settings::LoadoutSettings;

/// A named weapon with its sockets
#[derive(Debug, Clone, PartialEq)]
pub struct Loadout {
    pub name: String,
    pub stack: ItemStack,
    pub component: GemPowerComponent,
}

fn resolve_preset(
    registry: &PowerRegistry,
    preset: Option<&str>,
    has_socket: bool,
    slot: &str,
    fits_slot: fn(&Identifier) -> bool,
    name: &str,
) -> Result<Option<PowerEntry>> {
    let Some(raw) = preset else {
        return Ok(None);
    };
    if !has_socket {
        bail!("Loadout '{}' presets a {} power but has no {} socket", name, slot, slot);
    }
    let key: Identifier = raw
        .parse()
        .with_context(|| format!("Invalid {} power id '{}' in loadout '{}'", slot, raw, name))?;
    if !fits_slot(&key) {
        bail!("Loadout '{}' puts '{}' in its {} socket, which only takes {} powers", name, key, slot, slot);
    }
    let entry = registry
        .resolve(&key)
        .with_context(|| format!("Loadout '{}'", name))?;
    Ok(Some(entry))
}

impl Loadout {
    /// Assemble a loadout from settings, resolving presets in `registry`
    pub fn from_settings(settings: &LoadoutSettings, registry: &PowerRegistry) -> Result<Self> {
        let item: Identifier = settings
            .item
            .parse()
            .with_context(|| format!("Invalid item id '{}'", settings.item))?;
        let runic = resolve_preset(
            registry,
            settings.runic_power.as_deref(),
            settings.runic_socket,
            "runic",
            is_runic_key,
            &settings.name,
        )?;
        let nether = resolve_preset(
            registry,
            settings.nether_power.as_deref(),
            settings.nether_socket,
            "nether",
            is_nether_key,
            &settings.name,
        )?;

        let component = GemPowerComponent::create_empty(settings.runic_socket, settings.nether_socket)
            .fill(
                |_, current| runic.unwrap_or_else(|| current.clone()),
                |_, current| nether.unwrap_or_else(|| current.clone()),
            );
        debug!("Assembled loadout '{}': {:?}", settings.name, component);

        Ok(Self {
            name: settings.name.clone(),
            stack: ItemStack::new(item, 1),
            component,
        })
    }

    /// Fill each open socket with a random power made for that socket
    pub fn fill_random<R: Rng + ?Sized>(&self, registry: &PowerRegistry, rng: &mut R) -> Self {
        let mut pick = |has_socket: bool, current: &PowerEntry, for_slot: fn(&Identifier) -> bool| {
            if has_socket && current.is_empty() {
                registry
                    .random_non_empty(&mut *rng, |e| for_slot(e.key()))
                    .unwrap_or_else(|| current.clone())
            } else {
                current.clone()
            }
        };
        let runic = pick(
            self.component.has_runic_power(),
            self.component.runic_power(),
            is_runic_key,
        );
        let nether = pick(
            self.component.has_nether_power(),
            self.component.nether_power(),
            is_nether_key,
        );
        let component = self.component.fill(|_, _| runic, |_, _| nether);
        if component != self.component {
            info!(
                "Filled '{}': runic {}, nether {}",
                self.name,
                component.runic_power().key(),
                component.nether_power().key()
            );
        }

        Self {
            component,
            ..self.clone()
        }
    }

    /// Tooltip lines as shown on the item
    pub fn tooltip(&self, tooltip_type: TooltipType) -> Vec<Text> {
        let mut tooltip = vec![Text::literal(self.name.clone())];
        self.component
            .append_tooltip(&self.stack, &TooltipContext::default(), &mut tooltip, tooltip_type);
        tooltip
    }
}

/// Encode and decode both wire forms, failing if either changes the component
pub fn verify_round_trip(component: &GemPowerComponent, registry: &PowerRegistry) -> Result<()> {
    let json = component.to_json().context("Failed to encode component record")?;
    let from_json = GemPowerComponent::from_json(&json, registry).context("Failed to decode component record")?;
    if &from_json != component {
        bail!("Persistent round trip changed component: {}", json);
    }

    let bytes = component.to_bytes().context("Failed to encode component packet")?;
    let from_bytes = GemPowerComponent::decode(&mut bytes.as_slice(), registry)
        .context("Failed to decode component packet")?;
    if &from_bytes != component {
        bail!("Network round trip changed component: {:?}", bytes);
    }
    Ok(())
}
