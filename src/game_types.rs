//! Game concept types that describe Pokemon GO data.
//!
//! These types represent identifiers and enumerations that show up all over the
//! game master -- numeric template keys, elemental types, generations -- and are
//! useful to any tool working with the export, not just the Pokedex renderer.

use std::fmt;

use convert_case::{Case, Casing};

use crate::recognized::Recognized;

// =============================================================================
// Identity Types
// =============================================================================

/// National Pokedex number, the `####` group of a `V####_POKEMON_*` template.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DexNr(u16);

impl DexNr {
    pub fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for DexNr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for DexNr {
    fn from(v: u16) -> Self {
        DexNr(v)
    }
}

/// Move number, the `####` group of a `V####_MOVE_*` template. Combat
/// overlays (`COMBAT_V####_MOVE_*`) share the same number space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MoveId(u16);

impl MoveId {
    pub fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for MoveId {
    fn from(v: u16) -> Self {
        MoveId(v)
    }
}

// =============================================================================
// Generations
// =============================================================================

/// Main-series generation a species was introduced in, derived from its dex number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Generation(u8);

impl Generation {
    /// Last dex number of each generation, in order.
    const LAST_DEX_NR: [u16; 8] = [151, 251, 386, 493, 649, 721, 809, 905];

    pub fn from_dex_nr(dex_nr: DexNr) -> Self {
        let generation = Self::LAST_DEX_NR
            .iter()
            .position(|last| dex_nr.raw() <= *last)
            .unwrap_or(Self::LAST_DEX_NR.len());

        Generation(generation as u8 + 1)
    }

    pub fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Elemental Types
// =============================================================================

/// Prefix of every type identifier in the game master (`POKEMON_TYPE_FIRE`).
pub const TYPE_PREFIX: &str = "POKEMON_TYPE_";

/// The 18 elemental types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementalType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl ElementalType {
    pub const ALL: &[ElementalType] = &[
        Self::Normal,
        Self::Fighting,
        Self::Flying,
        Self::Poison,
        Self::Ground,
        Self::Rock,
        Self::Bug,
        Self::Ghost,
        Self::Steel,
        Self::Fire,
        Self::Water,
        Self::Grass,
        Self::Electric,
        Self::Psychic,
        Self::Ice,
        Self::Dragon,
        Self::Dark,
        Self::Fairy,
    ];

    /// Display name, which is also the canonical key used for translation lookups.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Fighting => "Fighting",
            Self::Flying => "Flying",
            Self::Poison => "Poison",
            Self::Ground => "Ground",
            Self::Rock => "Rock",
            Self::Bug => "Bug",
            Self::Ghost => "Ghost",
            Self::Steel => "Steel",
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Grass => "Grass",
            Self::Electric => "Electric",
            Self::Psychic => "Psychic",
            Self::Ice => "Ice",
            Self::Dragon => "Dragon",
            Self::Dark => "Dark",
            Self::Fairy => "Fairy",
        }
    }
}

impl fmt::Display for ElementalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type as referenced by the game master. Unknown identifiers are preserved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PokemonType(Recognized<ElementalType>);

impl PokemonType {
    /// Parse a game master identifier such as `POKEMON_TYPE_FIRE`. The prefix
    /// is optional and matching is case-insensitive.
    pub fn from_game_master(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        let short = upper.strip_prefix(TYPE_PREFIX).unwrap_or(&upper);

        let recognized = ElementalType::ALL
            .iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(short))
            .copied()
            .map(Recognized::Known)
            .unwrap_or_else(|| Recognized::Unknown(upper.clone()));

        PokemonType(recognized)
    }

    pub fn known(&self) -> Option<ElementalType> {
        self.0.known().copied()
    }

    /// Canonical type name (`Fire`), used as the translation key.
    pub fn type_name(&self) -> String {
        match self.0.as_ref() {
            Recognized::Known(ty) => ty.name().to_string(),
            Recognized::Unknown(raw) => raw
                .strip_prefix(TYPE_PREFIX)
                .unwrap_or(raw)
                .to_case(Case::Pascal),
        }
    }

    /// The identifier as it appears in the game master (`POKEMON_TYPE_FIRE`).
    pub fn game_master_name(&self) -> String {
        match self.0.as_ref() {
            Recognized::Known(ty) => format!("{TYPE_PREFIX}{}", ty.name().to_ascii_uppercase()),
            Recognized::Unknown(raw) => raw.clone(),
        }
    }
}

impl From<ElementalType> for PokemonType {
    fn from(value: ElementalType) -> Self {
        PokemonType(Recognized::Known(value))
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_game_master_type_names() {
        let fire = PokemonType::from_game_master("POKEMON_TYPE_FIRE");
        assert_eq!(fire.known(), Some(ElementalType::Fire));
        assert_eq!(fire.type_name(), "Fire");
        assert_eq!(fire.game_master_name(), "POKEMON_TYPE_FIRE");

        let lower = PokemonType::from_game_master("pokemon_type_dragon");
        assert_eq!(lower.known(), Some(ElementalType::Dragon));
    }

    #[test]
    fn keeps_unknown_types() {
        let stellar = PokemonType::from_game_master("POKEMON_TYPE_STELLAR");
        assert_eq!(stellar.known(), None);
        assert_eq!(stellar.type_name(), "Stellar");
        assert_eq!(stellar.game_master_name(), "POKEMON_TYPE_STELLAR");
    }

    #[test]
    fn generation_boundaries() {
        assert_eq!(Generation::from_dex_nr(DexNr::from(1)).raw(), 1);
        assert_eq!(Generation::from_dex_nr(DexNr::from(151)).raw(), 1);
        assert_eq!(Generation::from_dex_nr(DexNr::from(152)).raw(), 2);
        assert_eq!(Generation::from_dex_nr(DexNr::from(809)).raw(), 7);
        assert_eq!(Generation::from_dex_nr(DexNr::from(905)).raw(), 8);
        assert_eq!(Generation::from_dex_nr(DexNr::from(906)).raw(), 9);
    }
}
