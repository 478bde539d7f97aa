use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use bon::Builder;
use itertools::Itertools;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::error::{ErrorKind, IResult, failure_from_kind};
use crate::game_types::{DexNr, MoveId};

use super::collections::{MoveCollection, PokemonCollection};
use super::keys;
use super::record::Record;
use super::settings::{
    CombatMoveSettings, FormSettings, MoveSettings, PokemonSettings, TemporaryEvolutionSettings,
    decode,
};
use super::template::{RecordClass, TemplateKey, classify};
use super::types::{Pokemon, PokemonCombatMove, PokemonForm, PokemonMove, TemporaryEvolution};

/// How pokemon records that share a species id are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VariantMerge {
    /// Records are merged in the order they appear. A cosmetic variant seen
    /// before its base has nothing to fold into and is dropped.
    #[default]
    SourceOrder,
    /// All pokemon records are collected first, one base is picked per
    /// species, and every other record is folded into it. The result does not
    /// depend on record order.
    Deferred,
}

#[derive(Builder, Debug, Clone, Default)]
pub struct ParserOptions {
    #[builder(default)]
    variant_merge: VariantMerge,
}

/// Counters collected over one parser run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Records per classification label.
    pub classified: BTreeMap<&'static str, usize>,
    pub unrecognized: usize,
    pub duplicate_moves: usize,
    pub region_forms: usize,
    pub dropped_variants: usize,
    pub combat_moves_linked: usize,
    pub combat_moves_dropped: usize,
    pub temporary_evolutions_linked: usize,
    pub temporary_evolutions_dropped: usize,
    pub forms_linked: usize,
    pub forms_dropped: usize,
}

/// The linked object model produced from one game master snapshot.
#[derive(Debug, Clone, Default)]
pub struct GameMaster {
    pokemon: PokemonCollection,
    moves: MoveCollection,
    stats: ParseStats,
}

impl GameMaster {
    pub fn pokemon(&self) -> &PokemonCollection {
        &self.pokemon
    }

    pub fn moves(&self) -> &MoveCollection {
        &self.moves
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }
}

/// Builds the pokemon and move collections from raw game master records.
///
/// Records are classified once, then consumed by five passes in a fixed
/// order: moves, pokemon, combat moves, temporary evolutions, forms. Each
/// later pass only attaches data onto entities built by an earlier one.
#[derive(Debug, Clone, Default)]
pub struct MasterDataParser {
    options: ParserOptions,
}

impl MasterDataParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn parse(&self, records: &[Record]) -> IResult<GameMaster> {
        let mut stats = ParseStats::default();
        let classified = classify_records(records, &mut stats);

        let mut moves = parse_moves(&classified, &mut stats);
        let mut pokemon = match self.options.variant_merge {
            VariantMerge::SourceOrder => parse_pokemon(&classified, &mut stats)?,
            VariantMerge::Deferred => parse_pokemon_deferred(&classified, &mut stats)?,
        };

        link_combat_moves(&classified, &mut moves, &mut stats);
        link_temporary_evolutions(&classified, &mut pokemon, &mut stats);
        link_forms(&classified, &mut pokemon, &mut stats);

        info!(
            records = records.len(),
            unrecognized = stats.unrecognized,
            pokemon = pokemon.len(),
            moves = moves.len(),
            region_forms = stats.region_forms,
            combat_moves = stats.combat_moves_linked,
            temporary_evolutions = stats.temporary_evolutions_linked,
            forms = stats.forms_linked,
            "parsed game master"
        );

        Ok(GameMaster {
            pokemon,
            moves,
            stats,
        })
    }
}

type Classified<'a> = Vec<(RecordClass, &'a Record)>;

fn classify_records<'a>(records: &'a [Record], stats: &mut ParseStats) -> Classified<'a> {
    #[cfg(feature = "parallel")]
    let classes: Vec<Option<RecordClass>> = records
        .par_iter()
        .map(|record| classify(record.template_id()))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let classes: Vec<Option<RecordClass>> = records
        .iter()
        .map(|record| classify(record.template_id()))
        .collect();

    let classified: Classified<'a> = classes
        .into_iter()
        .zip(records)
        .filter_map(|(class, record)| class.map(|class| (class, record)))
        .collect();

    stats.unrecognized = records.len() - classified.len();
    stats.classified = classified
        .iter()
        .map(|(class, _)| class.label())
        .counts()
        .into_iter()
        .collect();

    classified
}

fn parse_moves(classified: &Classified<'_>, stats: &mut ParseStats) -> MoveCollection {
    let mut moves = MoveCollection::new();

    for (class, record) in classified {
        let Some(key) = class.pokemon_move_ref() else {
            continue;
        };
        let Some(settings) = record
            .section(keys::MOVE_SETTINGS)
            .and_then(decode::<MoveSettings>)
        else {
            trace!("{} has no usable move settings", record.template_id());
            continue;
        };

        if let Err(err) = moves.add(PokemonMove::from_game_master(key, &settings)) {
            warn!("skipping {}: {err}", record.template_id());
            stats.duplicate_moves += 1;
        }
    }

    moves
}

fn build_pokemon(key: &TemplateKey, record: &Record) -> Option<Pokemon> {
    let settings = record
        .section(keys::POKEMON_SETTINGS)
        .and_then(decode::<PokemonSettings>)?;

    Some(Pokemon::from_game_master(key, settings))
}

fn pokemon_records<'a>(classified: &'a Classified<'_>) -> impl Iterator<Item = Pokemon> + 'a {
    classified.iter().filter_map(|(class, record)| {
        let key = class.pokemon_ref()?;
        let pokemon = build_pokemon(key, record);
        if pokemon.is_none() {
            trace!("{} has no usable pokemon settings", record.template_id());
        }
        pokemon
    })
}

/// Attach `pokemon` to `base` as a regional variant. Two non-cosmetic records
/// with the same form id are a duplicate declaration.
fn fold_into_base(base: &mut Pokemon, pokemon: Pokemon, stats: &mut ParseStats) -> IResult<()> {
    if !pokemon.is_suppressed_variant() {
        let declared = base.form_id() == pokemon.form_id()
            || base
                .region_forms()
                .iter()
                .any(|region_form| region_form.form_id() == pokemon.form_id());
        if declared {
            return Err(failure_from_kind(ErrorKind::DuplicatePokemon {
                id: pokemon.id().to_string(),
                form_id: pokemon.form_id().to_string(),
            }));
        }
    }

    trace!("{} folded into {}", pokemon.form_id(), base.form_id());
    base.add_region_form(pokemon);
    stats.region_forms += 1;

    Ok(())
}

fn parse_pokemon(classified: &Classified<'_>, stats: &mut ParseStats) -> IResult<PokemonCollection> {
    let mut collection = PokemonCollection::new();

    for pokemon in pokemon_records(classified) {
        match collection.get_mut(pokemon.id()) {
            Some(base) => fold_into_base(base, pokemon, stats)?,
            None if pokemon.is_suppressed_variant() => {
                debug!(
                    "dropping {}: no {} declared before it",
                    pokemon.form_id(),
                    pokemon.id()
                );
                stats.dropped_variants += 1;
            }
            None => collection.add(pokemon)?,
        }
    }

    Ok(collection)
}

fn parse_pokemon_deferred(
    classified: &Classified<'_>,
    stats: &mut ParseStats,
) -> IResult<PokemonCollection> {
    let entries: Vec<Pokemon> = pokemon_records(classified).collect();

    // Species id -> index of its base entry
    let mut bases: HashMap<&str, usize> = HashMap::new();
    for (index, pokemon) in entries.iter().enumerate() {
        let is_canonical = pokemon.form_id() == pokemon.id();
        match bases.entry(pokemon.id()) {
            Entry::Vacant(entry) => {
                if !pokemon.is_suppressed_variant() {
                    entry.insert(index);
                }
            }
            Entry::Occupied(mut entry) => {
                let current = &entries[*entry.get()];
                if is_canonical && current.form_id() != current.id() {
                    entry.insert(index);
                }
            }
        }
    }

    let base_indexes: Vec<usize> = bases.values().copied().sorted().collect();
    let mut entries: Vec<Option<Pokemon>> = entries.into_iter().map(Some).collect();

    let mut collection = PokemonCollection::new();
    for index in base_indexes {
        if let Some(base) = entries[index].take() {
            collection.add(base)?;
        }
    }

    for pokemon in entries.into_iter().flatten() {
        match collection.get_mut(pokemon.id()) {
            Some(base) => fold_into_base(base, pokemon, stats)?,
            None => {
                debug!("dropping {}: {} has no base form", pokemon.form_id(), pokemon.id());
                stats.dropped_variants += 1;
            }
        }
    }

    Ok(collection)
}

fn link_combat_moves(classified: &Classified<'_>, moves: &mut MoveCollection, stats: &mut ParseStats) {
    for (class, record) in classified {
        let Some(key) = class.combat_move_ref() else {
            continue;
        };
        // Overlays without a power value do not apply
        let Some(settings) = record
            .section(keys::COMBAT_MOVE)
            .and_then(decode::<CombatMoveSettings>)
        else {
            trace!("{} has no usable combat settings", record.template_id());
            continue;
        };

        match moves.get_mut(MoveId::from(key.number)) {
            Some(pokemon_move) => {
                pokemon_move.set_combat_move(PokemonCombatMove::from_game_master(&settings));
                stats.combat_moves_linked += 1;
            }
            None => {
                debug!("{} references unknown move {}", record.template_id(), key.number);
                stats.combat_moves_dropped += 1;
            }
        }
    }
}

fn link_temporary_evolutions(
    classified: &Classified<'_>,
    collection: &mut PokemonCollection,
    stats: &mut ParseStats,
) {
    for (class, record) in classified {
        let Some(key) = class.temporary_evolution_ref() else {
            continue;
        };
        let Some(settings) = record
            .section(keys::TEMPORARY_EVOLUTION_SETTINGS)
            .and_then(decode::<TemporaryEvolutionSettings>)
        else {
            continue;
        };
        let Some(pokemon) = collection.get_by_dex_nr_mut(DexNr::from(key.number)) else {
            debug!("{} references unknown pokemon", record.template_id());
            stats.temporary_evolutions_dropped += settings.temporary_evolutions.len();
            continue;
        };

        for asset in &settings.temporary_evolutions {
            let evolution_id =
                TemporaryEvolution::evolution_id(pokemon.id(), &asset.temporary_evolution_id);
            match pokemon
                .temporary_evolutions_mut()
                .iter_mut()
                .find(|evolution| evolution.id() == evolution_id)
            {
                Some(evolution) => {
                    evolution.set_asset_bundle_id(asset.asset_bundle_value);
                    stats.temporary_evolutions_linked += 1;
                }
                None => {
                    debug!("{evolution_id} is not declared by its pokemon");
                    stats.temporary_evolutions_dropped += 1;
                }
            }
        }
    }
}

fn link_forms(classified: &Classified<'_>, collection: &mut PokemonCollection, stats: &mut ParseStats) {
    for (class, record) in classified {
        let Some(key) = class.forms_ref() else {
            continue;
        };
        let Some(settings) = record
            .section(keys::FORM_SETTINGS)
            .and_then(decode::<FormSettings>)
        else {
            continue;
        };
        let Some(pokemon) = collection.get_by_dex_nr_mut(DexNr::from(key.number)) else {
            debug!("{} references unknown pokemon", record.template_id());
            stats.forms_dropped += settings.forms.len();
            continue;
        };

        let normal_form_id = format!("{}{}", pokemon.id(), keys::FORM_NORMAL);
        for entry in settings.forms {
            let form = PokemonForm::from_entry(entry);
            if form.id().eq_ignore_ascii_case(&normal_form_id) {
                pokemon.set_form(form);
                stats.forms_linked += 1;
                continue;
            }

            match pokemon
                .region_forms_mut()
                .iter_mut()
                .find(|region_form| region_form.form_id().eq_ignore_ascii_case(form.id()))
            {
                Some(region_form) => {
                    region_form.set_form(form);
                    stats.forms_linked += 1;
                }
                None => {
                    trace!("form {} has no matching variant", form.id());
                    stats.forms_dropped += 1;
                }
            }
        }
    }
}
