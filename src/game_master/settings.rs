//! JSON deserialization structures for game master record payloads.
//!
//! Only the fields the pipeline reads are declared. A payload that does not
//! deserialize into its settings struct means the record does not apply.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSettings {
    pub base_stamina: Option<u32>,
    pub base_attack: Option<u32>,
    pub base_defense: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonSettings {
    pub pokemon_id: String,
    #[serde(rename = "type")]
    pub primary_type: String,
    #[serde(rename = "type2")]
    pub secondary_type: Option<String>,
    pub stats: Option<StatsSettings>,
    #[serde(default)]
    pub quick_moves: Vec<String>,
    #[serde(default)]
    pub cinematic_moves: Vec<String>,
    #[serde(default)]
    pub elite_quick_move: Vec<String>,
    #[serde(default)]
    pub elite_cinematic_move: Vec<String>,
    #[serde(default)]
    pub temp_evo_overrides: Vec<TempEvoOverride>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempEvoOverride {
    /// Absent on some placeholder entries, which are skipped.
    pub temp_evo_id: Option<String>,
    pub stats: Option<StatsSettings>,
    pub type_override1: Option<String>,
    pub type_override2: Option<String>,
    pub average_height_m: Option<f64>,
    pub average_weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSettings {
    pub pokemon_type: String,
    pub duration_ms: f64,
    #[serde(default)]
    pub power: f64,
    #[serde(default)]
    pub energy_delta: f64,
    pub animation_id: Option<u32>,
    pub critical_chance: Option<f64>,
    pub damage_window_start_ms: Option<f64>,
    pub damage_window_end_ms: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatMoveSettings {
    pub power: f64,
    #[serde(default)]
    pub energy_delta: f64,
    #[serde(default)]
    pub duration_turns: u32,
    pub buffs: Option<BuffSettings>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuffSettings {
    #[serde(default)]
    pub buff_activation_chance: f64,
    pub attacker_attack_stat_stage_change: Option<i32>,
    pub attacker_defense_stat_stage_change: Option<i32>,
    pub target_attack_stat_stage_change: Option<i32>,
    pub target_defense_stat_stage_change: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryEvolutionSettings {
    pub pokemon_id: Option<String>,
    #[serde(default)]
    pub temporary_evolutions: Vec<TemporaryEvolutionAsset>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryEvolutionAsset {
    pub temporary_evolution_id: String,
    #[serde(default)]
    pub asset_bundle_value: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    pub pokemon: Option<String>,
    #[serde(default)]
    pub forms: Vec<FormEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEntry {
    pub form: String,
    #[serde(default)]
    pub asset_bundle_value: u32,
    pub asset_bundle_suffix: Option<String>,
    #[serde(default)]
    pub is_costume: bool,
}

/// Deserializes a payload section, treating any shape mismatch as "does not apply".
pub fn decode<T: serde::de::DeserializeOwned>(section: &Value) -> Option<T> {
    match T::deserialize(section) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::trace!("payload does not apply: {err}");
            None
        }
    }
}
