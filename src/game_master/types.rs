use bon::Builder;

use crate::game_types::{DexNr, MoveId, PokemonType};

use super::keys;
use super::settings::{
    BuffSettings, CombatMoveSettings, FormEntry, MoveSettings, PokemonSettings, StatsSettings,
    TempEvoOverride,
};
use super::template::TemplateKey;

#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PokemonStats {
    stamina: u32,
    attack: u32,
    defense: u32,
}

impl PokemonStats {
    /// Stats are only present once `baseStamina` is; unreleased entries carry an empty block.
    fn from_settings(stats: &StatsSettings) -> Option<Self> {
        let stamina = stats.base_stamina?;
        Some(
            PokemonStats::builder()
                .stamina(stamina)
                .attack(stats.base_attack.unwrap_or_default())
                .defense(stats.base_defense.unwrap_or_default())
                .build(),
        )
    }

    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }
}

/// A temporary ("mega"/"primal") evolution declared by a pokemon's `tempEvoOverrides`.
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct TemporaryEvolution {
    /// Owning pokemon id plus the trimmed evolution id, e.g. `VENUSAUR_MEGA`.
    id: String,
    stats: Option<PokemonStats>,
    primary_type: PokemonType,
    secondary_type: Option<PokemonType>,
    #[builder(default)]
    asset_bundle_id: u32,
    average_height_m: Option<f64>,
    average_weight_kg: Option<f64>,
}

impl TemporaryEvolution {
    fn from_override(evolution: &TempEvoOverride, owner: &Pokemon) -> Option<Self> {
        let temp_evo_id = evolution.temp_evo_id.as_deref()?;

        let primary_type = evolution
            .type_override1
            .as_deref()
            .map(PokemonType::from_game_master)
            .unwrap_or_else(|| owner.primary_type.clone());
        let secondary_type = match &evolution.type_override1 {
            Some(_) => evolution
                .type_override2
                .as_deref()
                .map(PokemonType::from_game_master),
            None => owner.secondary_type.clone(),
        };

        Some(
            TemporaryEvolution::builder()
                .id(Self::evolution_id(&owner.id, temp_evo_id))
                .maybe_stats(evolution.stats.as_ref().and_then(PokemonStats::from_settings))
                .primary_type(primary_type)
                .maybe_secondary_type(secondary_type)
                .maybe_average_height_m(evolution.average_height_m)
                .maybe_average_weight_kg(evolution.average_weight_kg)
                .build(),
        )
    }

    /// Composite key shared by a pokemon's declared evolutions and the
    /// `TEMPORARY_EVOLUTION_*` asset records: `VENUSAUR` + `TEMP_EVOLUTION_MEGA`
    /// gives `VENUSAUR_MEGA`.
    pub fn evolution_id(pokemon_id: &str, temp_evo_id: &str) -> String {
        let suffix = temp_evo_id
            .get(keys::TEMP_EVOLUTION_PREFIX.len()..)
            .unwrap_or_default();
        format!("{pokemon_id}{suffix}")
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stats(&self) -> Option<&PokemonStats> {
        self.stats.as_ref()
    }

    pub fn primary_type(&self) -> &PokemonType {
        &self.primary_type
    }

    pub fn secondary_type(&self) -> Option<&PokemonType> {
        self.secondary_type.as_ref()
    }

    pub fn asset_bundle_id(&self) -> u32 {
        self.asset_bundle_id
    }

    pub fn set_asset_bundle_id(&mut self, asset_bundle_id: u32) {
        self.asset_bundle_id = asset_bundle_id;
    }

    pub fn average_height_m(&self) -> Option<f64> {
        self.average_height_m
    }

    pub fn average_weight_kg(&self) -> Option<f64> {
        self.average_weight_kg
    }
}

/// One visual variant from a `FORMS_*` record.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct PokemonForm {
    id: String,
    #[builder(default)]
    asset_bundle_value: u32,
    asset_bundle_suffix: Option<String>,
    #[builder(default)]
    is_costume: bool,
}

impl PokemonForm {
    pub(crate) fn from_entry(entry: FormEntry) -> Self {
        PokemonForm::builder()
            .id(entry.form)
            .asset_bundle_value(entry.asset_bundle_value)
            .maybe_asset_bundle_suffix(entry.asset_bundle_suffix)
            .is_costume(entry.is_costume)
            .build()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn asset_bundle_value(&self) -> u32 {
        self.asset_bundle_value
    }

    pub fn asset_bundle_suffix(&self) -> Option<&str> {
        self.asset_bundle_suffix.as_deref()
    }

    pub fn is_costume(&self) -> bool {
        self.is_costume
    }
}

#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Pokemon {
    dex_nr: DexNr,
    id: String,
    form_id: String,
    primary_type: PokemonType,
    secondary_type: Option<PokemonType>,
    stats: Option<PokemonStats>,
    #[builder(default)]
    quick_move_names: Vec<String>,
    #[builder(default)]
    cinematic_move_names: Vec<String>,
    #[builder(default)]
    elite_quick_move_names: Vec<String>,
    #[builder(default)]
    elite_cinematic_move_names: Vec<String>,
    #[builder(default)]
    temporary_evolutions: Vec<TemporaryEvolution>,
    form: Option<PokemonForm>,
    #[builder(default)]
    region_forms: Vec<Pokemon>,
}

impl Pokemon {
    pub(crate) fn from_game_master(key: &TemplateKey, settings: PokemonSettings) -> Self {
        let mut pokemon = Pokemon::builder()
            .dex_nr(DexNr::from(key.number))
            .id(settings.pokemon_id)
            .form_id(key.name.clone())
            .primary_type(PokemonType::from_game_master(&settings.primary_type))
            .maybe_secondary_type(
                settings
                    .secondary_type
                    .as_deref()
                    .map(PokemonType::from_game_master),
            )
            .maybe_stats(settings.stats.as_ref().and_then(PokemonStats::from_settings))
            .quick_move_names(settings.quick_moves)
            .cinematic_move_names(settings.cinematic_moves)
            .elite_quick_move_names(settings.elite_quick_move)
            .elite_cinematic_move_names(settings.elite_cinematic_move)
            .build();

        let temporary_evolutions = settings
            .temp_evo_overrides
            .iter()
            .filter_map(|evolution| TemporaryEvolution::from_override(evolution, &pokemon))
            .collect();
        pokemon.temporary_evolutions = temporary_evolutions;

        pokemon
    }

    pub fn dex_nr(&self) -> DexNr {
        self.dex_nr
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn primary_type(&self) -> &PokemonType {
        &self.primary_type
    }

    pub fn secondary_type(&self) -> Option<&PokemonType> {
        self.secondary_type.as_ref()
    }

    pub fn stats(&self) -> Option<&PokemonStats> {
        self.stats.as_ref()
    }

    pub fn quick_move_names(&self) -> &[String] {
        &self.quick_move_names
    }

    pub fn cinematic_move_names(&self) -> &[String] {
        &self.cinematic_move_names
    }

    pub fn elite_quick_move_names(&self) -> &[String] {
        &self.elite_quick_move_names
    }

    pub fn elite_cinematic_move_names(&self) -> &[String] {
        &self.elite_cinematic_move_names
    }

    pub fn temporary_evolutions(&self) -> &[TemporaryEvolution] {
        &self.temporary_evolutions
    }

    pub fn temporary_evolutions_mut(&mut self) -> &mut [TemporaryEvolution] {
        &mut self.temporary_evolutions
    }

    pub fn has_temporary_evolutions(&self) -> bool {
        !self.temporary_evolutions.is_empty()
    }

    pub fn form(&self) -> Option<&PokemonForm> {
        self.form.as_ref()
    }

    pub fn set_form(&mut self, form: PokemonForm) {
        self.form = Some(form);
    }

    pub fn region_forms(&self) -> &[Pokemon] {
        &self.region_forms
    }

    pub fn region_forms_mut(&mut self) -> &mut [Pokemon] {
        &mut self.region_forms
    }

    pub fn add_region_form(&mut self, region_form: Pokemon) {
        self.region_forms.push(region_form);
    }

    /// Whether this record is a cosmetic clone (shadow, purified, costume copy,
    /// `_NORMAL` duplicate or numbered event form) rather than a species of its own.
    pub fn is_suppressed_variant(&self) -> bool {
        is_suppressed_form_id(&self.form_id)
    }
}

/// The suppression filter over a pokemon form id.
pub fn is_suppressed_form_id(form_id: &str) -> bool {
    if keys::SUPPRESSED_FORM_MARKERS
        .iter()
        .any(|marker| form_id.contains(marker))
    {
        return true;
    }

    // Trailing `_####`, e.g. PIKACHU_2020
    let bytes = form_id.as_bytes();
    bytes.len() >= 5
        && bytes[bytes.len() - 5] == b'_'
        && bytes[bytes.len() - 4..].iter().all(u8::is_ascii_digit)
}

#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatMoveBuffs {
    /// Activation chance in whole percent.
    activation_chance: u32,
    attacker_attack_stat_stage_change: Option<i32>,
    attacker_defense_stat_stage_change: Option<i32>,
    target_attack_stat_stage_change: Option<i32>,
    target_defense_stat_stage_change: Option<i32>,
}

impl CombatMoveBuffs {
    fn from_settings(buffs: &BuffSettings) -> Self {
        CombatMoveBuffs::builder()
            .activation_chance((buffs.buff_activation_chance * 100.0) as u32)
            .maybe_attacker_attack_stat_stage_change(buffs.attacker_attack_stat_stage_change)
            .maybe_attacker_defense_stat_stage_change(buffs.attacker_defense_stat_stage_change)
            .maybe_target_attack_stat_stage_change(buffs.target_attack_stat_stage_change)
            .maybe_target_defense_stat_stage_change(buffs.target_defense_stat_stage_change)
            .build()
    }

    pub fn activation_chance(&self) -> u32 {
        self.activation_chance
    }

    pub fn attacker_attack_stat_stage_change(&self) -> Option<i32> {
        self.attacker_attack_stat_stage_change
    }

    pub fn attacker_defense_stat_stage_change(&self) -> Option<i32> {
        self.attacker_defense_stat_stage_change
    }

    pub fn target_attack_stat_stage_change(&self) -> Option<i32> {
        self.target_attack_stat_stage_change
    }

    pub fn target_defense_stat_stage_change(&self) -> Option<i32> {
        self.target_defense_stat_stage_change
    }
}

/// Trainer-battle numbers for a move, from its `COMBAT_V####_MOVE_*` record.
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct PokemonCombatMove {
    power: f64,
    energy: f64,
    #[builder(default)]
    duration_turns: u32,
    buffs: Option<CombatMoveBuffs>,
}

impl PokemonCombatMove {
    pub(crate) fn from_game_master(settings: &CombatMoveSettings) -> Self {
        PokemonCombatMove::builder()
            .power(settings.power)
            .energy(settings.energy_delta)
            .duration_turns(settings.duration_turns)
            .maybe_buffs(settings.buffs.as_ref().map(CombatMoveBuffs::from_settings))
            .build()
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn duration_turns(&self) -> u32 {
        self.duration_turns
    }

    pub fn buffs(&self) -> Option<&CombatMoveBuffs> {
        self.buffs.as_ref()
    }
}

#[derive(Builder, Debug, Clone, PartialEq)]
pub struct PokemonMove {
    id: MoveId,
    name: String,
    pokemon_type: PokemonType,
    duration_ms: f64,
    is_fast: bool,
    power: f64,
    energy: f64,
    animation_id: Option<u32>,
    critical_chance: Option<f64>,
    damage_window_start_ms: Option<f64>,
    damage_window_end_ms: Option<f64>,
    combat_move: Option<PokemonCombatMove>,
}

impl PokemonMove {
    pub(crate) fn from_game_master(key: &TemplateKey, settings: &MoveSettings) -> Self {
        // Fast moves generate energy; charged moves spend it.
        let is_fast = key.name.ends_with(keys::FAST_MOVE_SUFFIX)
            || settings.energy_delta > 0.0;

        PokemonMove::builder()
            .id(MoveId::from(key.number))
            .name(key.name.clone())
            .pokemon_type(PokemonType::from_game_master(&settings.pokemon_type))
            .duration_ms(settings.duration_ms)
            .is_fast(is_fast)
            .power(settings.power)
            .energy(settings.energy_delta)
            .maybe_animation_id(settings.animation_id)
            .maybe_critical_chance(settings.critical_chance)
            .maybe_damage_window_start_ms(settings.damage_window_start_ms)
            .maybe_damage_window_end_ms(settings.damage_window_end_ms)
            .build()
    }

    pub fn id(&self) -> MoveId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pokemon_type(&self) -> &PokemonType {
        &self.pokemon_type
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn is_fast_move(&self) -> bool {
        self.is_fast
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn animation_id(&self) -> Option<u32> {
        self.animation_id
    }

    pub fn critical_chance(&self) -> Option<f64> {
        self.critical_chance
    }

    pub fn damage_window_ms(&self) -> Option<(f64, f64)> {
        Some((self.damage_window_start_ms?, self.damage_window_end_ms?))
    }

    pub fn combat_move(&self) -> Option<&PokemonCombatMove> {
        self.combat_move.as_ref()
    }

    pub fn set_combat_move(&mut self, combat_move: PokemonCombatMove) {
        self.combat_move = Some(combat_move);
    }
}
