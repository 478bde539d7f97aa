use std::collections::HashMap;

use crate::error::{ErrorKind, IResult, failure_from_kind};
use crate::game_types::{DexNr, MoveId};

use super::types::{Pokemon, PokemonMove};

/// Top-level pokemon in insertion order, indexed by species id and dex number.
///
/// Regional variants live inside their base entry and are not indexed here.
#[derive(Debug, Default, Clone)]
pub struct PokemonCollection {
    pokemon: Vec<Pokemon>,
    by_id: HashMap<String, usize>,
    by_dex_nr: HashMap<DexNr, usize>,
}

impl PokemonCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pokemon: Pokemon) -> IResult<()> {
        if self.by_id.contains_key(pokemon.id()) {
            return Err(failure_from_kind(ErrorKind::DuplicatePokemon {
                id: pokemon.id().to_string(),
                form_id: pokemon.form_id().to_string(),
            }));
        }

        let index = self.pokemon.len();
        self.by_id.insert(pokemon.id().to_string(), index);
        // First pokemon registered for a number keeps it
        self.by_dex_nr.entry(pokemon.dex_nr()).or_insert(index);
        self.pokemon.push(pokemon);

        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Pokemon> {
        self.by_id.get(id).map(|index| &self.pokemon[*index])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Pokemon> {
        let index = *self.by_id.get(id)?;
        self.pokemon.get_mut(index)
    }

    pub fn get_by_dex_nr(&self, dex_nr: DexNr) -> Option<&Pokemon> {
        self.by_dex_nr.get(&dex_nr).map(|index| &self.pokemon[*index])
    }

    pub fn get_by_dex_nr_mut(&mut self, dex_nr: DexNr) -> Option<&mut Pokemon> {
        let index = *self.by_dex_nr.get(&dex_nr)?;
        self.pokemon.get_mut(index)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pokemon> {
        self.pokemon.iter()
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }
}

impl<'a> IntoIterator for &'a PokemonCollection {
    type Item = &'a Pokemon;
    type IntoIter = std::slice::Iter<'a, Pokemon>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Moves in insertion order, indexed by numeric id and by name.
#[derive(Debug, Default, Clone)]
pub struct MoveCollection {
    moves: Vec<PokemonMove>,
    by_id: HashMap<MoveId, usize>,
    by_name: HashMap<String, usize>,
}

impl MoveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pokemon_move: PokemonMove) -> IResult<()> {
        if self.by_id.contains_key(&pokemon_move.id()) {
            return Err(failure_from_kind(ErrorKind::DuplicateMove {
                id: pokemon_move.id().raw(),
            }));
        }

        let index = self.moves.len();
        self.by_id.insert(pokemon_move.id(), index);
        self.by_name
            .entry(pokemon_move.name().to_string())
            .or_insert(index);
        self.moves.push(pokemon_move);

        Ok(())
    }

    pub fn get(&self, id: MoveId) -> Option<&PokemonMove> {
        self.by_id.get(&id).map(|index| &self.moves[*index])
    }

    pub fn get_mut(&mut self, id: MoveId) -> Option<&mut PokemonMove> {
        let index = *self.by_id.get(&id)?;
        self.moves.get_mut(index)
    }

    /// Lookup by the name pokemon use in their move lists, e.g. `VINE_WHIP_FAST`.
    pub fn get_by_name(&self, name: &str) -> Option<&PokemonMove> {
        self.by_name.get(name).map(|index| &self.moves[*index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PokemonMove> {
        self.moves.iter()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl<'a> IntoIterator for &'a MoveCollection {
    type Item = &'a PokemonMove;
    type IntoIter = std::slice::Iter<'a, PokemonMove>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::game_master::settings::{MoveSettings, PokemonSettings, decode};
    use crate::game_master::template::TemplateKey;
    use crate::game_master::types::PokemonForm;

    fn pokemon(number: u16, id: &str, form_id: &str) -> Pokemon {
        let settings: PokemonSettings = decode(&json!({
            "pokemonId": id,
            "type": "POKEMON_TYPE_NORMAL"
        }))
        .expect("pokemon settings");
        let key = TemplateKey {
            number,
            name: form_id.to_string(),
        };
        Pokemon::from_game_master(&key, settings)
    }

    fn pokemon_move(number: u16, name: &str) -> PokemonMove {
        let settings: MoveSettings = decode(&json!({
            "pokemonType": "POKEMON_TYPE_NORMAL",
            "durationMs": 500
        }))
        .expect("move settings");
        let key = TemplateKey {
            number,
            name: name.to_string(),
        };
        PokemonMove::from_game_master(&key, &settings)
    }

    #[test]
    fn pokemon_lookups() {
        let mut collection = PokemonCollection::new();
        collection.add(pokemon(19, "RATTATA", "RATTATA")).unwrap();
        collection.add(pokemon(20, "RATICATE", "RATICATE")).unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("RATICATE").map(Pokemon::dex_nr), Some(DexNr::from(20)));
        assert_eq!(
            collection.get_by_dex_nr(DexNr::from(19)).map(Pokemon::id),
            Some("RATTATA")
        );
        assert!(collection.get("PIDGEY").is_none());
        assert!(collection.get_by_dex_nr(DexNr::from(16)).is_none());

        let ids: Vec<_> = collection.iter().map(Pokemon::id).collect();
        assert_eq!(ids, ["RATTATA", "RATICATE"]);
    }

    #[test]
    fn duplicate_pokemon_is_rejected() {
        let mut collection = PokemonCollection::new();
        collection.add(pokemon(19, "RATTATA", "RATTATA")).unwrap();

        let err = collection
            .add(pokemon(19, "RATTATA", "RATTATA"))
            .expect_err("duplicate");
        assert!(matches!(err.kind, ErrorKind::DuplicatePokemon { .. }));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn first_pokemon_keeps_dex_number() {
        let mut collection = PokemonCollection::new();
        collection.add(pokemon(29, "NIDORAN_FEMALE", "NIDORAN_FEMALE")).unwrap();
        collection.add(pokemon(29, "NIDORAN_MALE", "NIDORAN_MALE")).unwrap();

        assert_eq!(
            collection.get_by_dex_nr(DexNr::from(29)).map(Pokemon::id),
            Some("NIDORAN_FEMALE")
        );
    }

    #[test]
    fn mutations_are_visible_through_every_index() {
        let mut collection = PokemonCollection::new();
        collection.add(pokemon(19, "RATTATA", "RATTATA")).unwrap();

        let form = PokemonForm::builder().id("RATTATA_NORMAL".to_string()).build();
        collection
            .get_by_dex_nr_mut(DexNr::from(19))
            .expect("rattata")
            .set_form(form);

        let via_id = collection.get("RATTATA").and_then(Pokemon::form);
        assert_eq!(via_id.map(PokemonForm::id), Some("RATTATA_NORMAL"));
    }

    #[test]
    fn move_lookups() {
        let mut moves = MoveCollection::new();
        moves.add(pokemon_move(13, "WRAP")).unwrap();
        moves.add(pokemon_move(214, "VINE_WHIP_FAST")).unwrap();

        assert_eq!(moves.get(MoveId::from(13)).map(PokemonMove::name), Some("WRAP"));
        assert_eq!(
            moves.get_by_name("VINE_WHIP_FAST").map(PokemonMove::id),
            Some(MoveId::from(214))
        );
        assert!(moves.get_by_name("HYPER_BEAM").is_none());

        let err = moves.add(pokemon_move(13, "WRAP_GREEN")).expect_err("duplicate");
        assert!(matches!(err.kind, ErrorKind::DuplicateMove { id: 13 }));
        assert!(moves.get_by_name("WRAP_GREEN").is_none());
    }
}
