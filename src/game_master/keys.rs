//! Constants for game master record keys and identifier fragments.
//!
//! These replace string literals that would otherwise be scattered across the
//! classifier, the parser passes and the renderer.

// Record envelope keys
pub const TEMPLATE_ID: &str = "templateId";
pub const DATA: &str = "data";

// Payload keys (inside "data")
pub const POKEMON_SETTINGS: &str = "pokemonSettings";
pub const MOVE_SETTINGS: &str = "moveSettings";
pub const COMBAT_MOVE: &str = "combatMove";
pub const TEMPORARY_EVOLUTION_SETTINGS: &str = "temporaryEvolutionSettings";
pub const FORM_SETTINGS: &str = "formSettings";

// Form id markers that mark a pokemon record as a cosmetic clone of its base
pub const FORM_PURIFIED: &str = "_PURIFIED";
pub const FORM_SHADOW: &str = "_SHADOW";
pub const FORM_NORMAL: &str = "_NORMAL";
pub const FORM_COPY: &str = "_COPY";

/// Substring markers of the suppression filter. Trailing `_####` suffixes are
/// matched separately.
pub const SUPPRESSED_FORM_MARKERS: &[&str] = &[FORM_PURIFIED, FORM_SHADOW, FORM_NORMAL, FORM_COPY];

/// `TEMP_EVOLUTION`, stripped from `TEMP_EVOLUTION_MEGA` etc. to build evolution ids.
pub const TEMP_EVOLUTION_PREFIX: &str = "TEMP_EVOLUTION";

/// Suffix that marks a move as a fast (quick) move.
pub const FAST_MOVE_SUFFIX: &str = "_FAST";

/// Base URL of the pokemon icon assets.
pub const ASSETS_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeMiners/pogo_assets/master/Images/Pokemon";

/// Build the icon URL (e.g. dex 3, bundle 51 -> `.../pokemon_icon_003_51.png`).
pub fn pokemon_icon_url(dex_nr: u16, asset_bundle_value: u32) -> String {
    format!("{ASSETS_BASE_URL}/pokemon_icon_{dex_nr:03}_{asset_bundle_value:02}.png")
}

// Translation text keys
pub const TEXT_POKEMON_NAME: &str = "pokemon_name_";
pub const TEXT_POKEMON_TYPE: &str = "pokemon_type_";
pub const TEXT_MOVE_NAME: &str = "move_name_";
pub const TEXT_FORM: &str = "form_";

// Output blob names
pub const POKEDEX_BLOB: &str = "pokedex.json";
pub const POKEDEX_DIR: &str = "pokedex";
