//! Rendering of linked pokemon into the denormalized public JSON shape.
//!
//! Rendering never mutates the collections. Every localized field is a map
//! from language name to the translated string, or `null` when a language has
//! no entry.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::game_master::keys;
use crate::game_master::types::{Pokemon, PokemonForm, PokemonStats, TemporaryEvolution};
use crate::game_master::{GameMaster, MoveCollection};
use crate::game_types::{DexNr, Generation, PokemonType};
use crate::translations::Translations;

/// A JSON object whose keys keep their insertion order. Re-inserting a key
/// replaces its value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn insert(&mut self, key: String, value: V) {
        match self.0.iter_mut().find(|(entry, _)| *entry == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0
            .iter()
            .find(|(entry, _)| entry == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = OrderedMap(Vec::new());
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

pub type LocalizedNames = OrderedMap<Option<String>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedType {
    #[serde(rename = "type")]
    pub type_name: String,
    pub names: LocalizedNames,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderedCombatMove {
    pub energy: f64,
    pub power: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedMove {
    /// The move name as referenced by pokemon, e.g. `VINE_WHIP_FAST`.
    pub id: String,
    pub power: f64,
    pub energy: f64,
    pub duration_ms: f64,
    #[serde(rename = "type")]
    pub pokemon_type: RenderedType,
    pub names: LocalizedNames,
    pub combat: Option<RenderedCombatMove>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedAssets {
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedForm {
    pub id: String,
    pub names: LocalizedNames,
    pub assets: RenderedAssets,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedMegaEvolution {
    pub id: String,
    pub names: LocalizedNames,
    pub stats: Option<PokemonStats>,
    pub primary_type: RenderedType,
    pub secondary_type: Option<RenderedType>,
    pub assets: RenderedAssets,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPokemon {
    pub id: String,
    pub form_id: String,
    pub dex_nr: DexNr,
    pub generation: Generation,
    pub names: LocalizedNames,
    pub stats: Option<PokemonStats>,
    pub primary_type: RenderedType,
    pub secondary_type: Option<RenderedType>,
    pub quick_moves: OrderedMap<RenderedMove>,
    pub cinematic_moves: OrderedMap<RenderedMove>,
    pub elite_quick_moves: OrderedMap<RenderedMove>,
    pub elite_cinematic_moves: OrderedMap<RenderedMove>,
    pub assets: RenderedAssets,
    pub forms: Vec<RenderedForm>,
    pub region_forms: Vec<RenderedPokemon>,
    pub has_mega_evolution: bool,
    pub mega_evolutions: OrderedMap<RenderedMegaEvolution>,
}

/// Renders pokemon with names from every configured language.
pub struct PokemonRenderer<'a> {
    translations: &'a [&'a dyn Translations],
}

impl<'a> PokemonRenderer<'a> {
    pub fn new(translations: &'a [&'a dyn Translations]) -> Self {
        Self { translations }
    }

    fn localized<F>(&self, lookup: F) -> LocalizedNames
    where
        F: Fn(&dyn Translations) -> Option<String>,
    {
        self.translations
            .iter()
            .map(|translations| {
                (
                    translations.language_name().to_string(),
                    lookup(*translations),
                )
            })
            .collect()
    }

    fn render_type(&self, pokemon_type: &PokemonType) -> RenderedType {
        let type_name = pokemon_type.type_name();
        let names = self.localized(|translations| {
            translations.type_name(&type_name).map(str::to_string)
        });

        RenderedType { type_name, names }
    }

    fn render_moves(&self, move_names: &[String], moves: &MoveCollection) -> OrderedMap<RenderedMove> {
        move_names
            .iter()
            .filter_map(|move_name| {
                let pokemon_move = moves.get_by_name(move_name)?;
                let rendered = RenderedMove {
                    id: move_name.clone(),
                    power: pokemon_move.power(),
                    energy: pokemon_move.energy(),
                    duration_ms: pokemon_move.duration_ms(),
                    pokemon_type: self.render_type(pokemon_move.pokemon_type()),
                    names: self.localized(|translations| {
                        translations.move_name(pokemon_move.id()).map(str::to_string)
                    }),
                    combat: pokemon_move
                        .combat_move()
                        .map(|combat_move| RenderedCombatMove {
                            energy: combat_move.energy(),
                            power: combat_move.power(),
                        }),
                };

                Some((move_name.clone(), rendered))
            })
            .collect()
    }

    fn render_form(&self, pokemon: &Pokemon, form: &PokemonForm) -> RenderedForm {
        // RATTATA_ALOLA -> ALOLA
        let suffix = form
            .id()
            .strip_prefix(pokemon.id())
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(form.id());

        RenderedForm {
            id: form.id().to_string(),
            names: self.localized(|translations| {
                translations.form_name(suffix, form.id()).map(str::to_string)
            }),
            assets: RenderedAssets {
                image: keys::pokemon_icon_url(pokemon.dex_nr().raw(), form.asset_bundle_value()),
            },
        }
    }

    /// Evolution `i` of a pokemon takes name `i + 1` of its dex number; name
    /// `0` is the species itself.
    fn render_mega_evolution(
        &self,
        pokemon: &Pokemon,
        index: usize,
        evolution: &TemporaryEvolution,
    ) -> RenderedMegaEvolution {
        RenderedMegaEvolution {
            id: evolution.id().to_string(),
            names: self.localized(|translations| {
                translations
                    .pokemon_names(pokemon.dex_nr())
                    .get(index + 1)
                    .cloned()
            }),
            stats: evolution.stats().copied(),
            primary_type: self.render_type(evolution.primary_type()),
            secondary_type: evolution.secondary_type().map(|ty| self.render_type(ty)),
            assets: RenderedAssets {
                image: keys::pokemon_icon_url(pokemon.dex_nr().raw(), evolution.asset_bundle_id()),
            },
        }
    }

    pub fn render(&self, pokemon: &Pokemon, moves: &MoveCollection) -> RenderedPokemon {
        let asset_bundle_value = pokemon
            .form()
            .map(PokemonForm::asset_bundle_value)
            .unwrap_or_default();

        RenderedPokemon {
            id: pokemon.id().to_string(),
            form_id: pokemon.form_id().to_string(),
            dex_nr: pokemon.dex_nr(),
            generation: Generation::from_dex_nr(pokemon.dex_nr()),
            names: self.localized(|translations| {
                translations.pokemon_names(pokemon.dex_nr()).first().cloned()
            }),
            stats: pokemon.stats().copied(),
            primary_type: self.render_type(pokemon.primary_type()),
            secondary_type: pokemon.secondary_type().map(|ty| self.render_type(ty)),
            quick_moves: self.render_moves(pokemon.quick_move_names(), moves),
            cinematic_moves: self.render_moves(pokemon.cinematic_move_names(), moves),
            elite_quick_moves: self.render_moves(pokemon.elite_quick_move_names(), moves),
            elite_cinematic_moves: self.render_moves(pokemon.elite_cinematic_move_names(), moves),
            assets: RenderedAssets {
                image: keys::pokemon_icon_url(pokemon.dex_nr().raw(), asset_bundle_value),
            },
            forms: pokemon
                .form()
                .map(|form| self.render_form(pokemon, form))
                .into_iter()
                .collect(),
            region_forms: pokemon
                .region_forms()
                .iter()
                .map(|region_form| self.render(region_form, moves))
                .collect(),
            has_mega_evolution: pokemon.has_temporary_evolutions(),
            mega_evolutions: pokemon
                .temporary_evolutions()
                .iter()
                .enumerate()
                .map(|(index, evolution)| {
                    (
                        evolution.id().to_string(),
                        self.render_mega_evolution(pokemon, index, evolution),
                    )
                })
                .collect(),
        }
    }

    /// Renders every top-level pokemon, keyed by species id.
    pub fn render_all(&self, game_master: &GameMaster) -> BTreeMap<String, RenderedPokemon> {
        game_master
            .pokemon()
            .iter()
            .map(|pokemon| {
                (
                    pokemon.id().to_string(),
                    self.render(pokemon, game_master.moves()),
                )
            })
            .collect()
    }
}
