//! Localized names for pokemon, types, moves and forms.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ErrorKind, IResult, failure_from_kind};
use crate::game_master::keys;
use crate::game_types::{DexNr, MoveId};

/// Name lookups for a single language.
pub trait Translations {
    fn language_name(&self) -> &str;
    /// All names registered for a dex number: the species name first, followed
    /// by the names of its temporary evolutions.
    fn pokemon_names(&self, dex_nr: DexNr) -> &[String];
    /// `type_name` is the canonical type name, e.g. `Fire`.
    fn type_name(&self, type_name: &str) -> Option<&str>;
    fn move_name(&self, id: MoveId) -> Option<&str>;
    /// Forms are looked up by their full id (`RATTATA_ALOLA`) first, then by
    /// the suffix shared across species (`ALOLA`).
    fn form_name(&self, suffix: &str, form_id: &str) -> Option<&str>;
}

/// An in-memory translation table.
///
/// Type and form keys are stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationCollection {
    language_name: String,
    pokemon_names: HashMap<DexNr, Vec<String>>,
    type_names: HashMap<String, String>,
    move_names: HashMap<MoveId, String>,
    form_names: HashMap<String, String>,
}

/// JSON table form of a [`TranslationCollection`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationTable {
    language_name: String,
    #[serde(default)]
    pokemon_names: HashMap<DexNr, Vec<String>>,
    #[serde(default)]
    type_names: HashMap<String, String>,
    #[serde(default)]
    move_names: HashMap<MoveId, String>,
    #[serde(default)]
    form_names: HashMap<String, String>,
}

/// Game text export: a flat `[key, value, key, value, ...]` list.
#[derive(Debug, Deserialize)]
struct TextExport {
    data: Vec<String>,
}

static POKEMON_NAME_KEY: LazyLock<Regex> = LazyLock::new(|| {
    text_key_pattern(&format!(
        r"^{}(?P<dex>[0-9]{{4}})(?:_(?P<index>[0-9]{{4}}))?$",
        keys::TEXT_POKEMON_NAME
    ))
});
static TYPE_NAME_KEY: LazyLock<Regex> =
    LazyLock::new(|| text_key_pattern(&format!(r"^{}(?P<type>.+)$", keys::TEXT_POKEMON_TYPE)));
static MOVE_NAME_KEY: LazyLock<Regex> = LazyLock::new(|| {
    text_key_pattern(&format!(r"^{}(?P<id>[0-9]{{4}})$", keys::TEXT_MOVE_NAME))
});
static FORM_NAME_KEY: LazyLock<Regex> =
    LazyLock::new(|| text_key_pattern(&format!(r"^{}(?P<form>.+)$", keys::TEXT_FORM)));

fn text_key_pattern(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|err| panic!("invalid text key pattern {pattern}: {err}"))
}

impl TranslationCollection {
    pub fn new(language_name: impl Into<String>) -> Self {
        Self {
            language_name: language_name.into(),
            ..Default::default()
        }
    }

    pub fn with_pokemon_name(mut self, dex_nr: DexNr, name: impl Into<String>) -> Self {
        self.add_pokemon_name(dex_nr, name);
        self
    }

    pub fn with_type_name(mut self, type_name: &str, name: impl Into<String>) -> Self {
        self.add_type_name(type_name, name);
        self
    }

    pub fn with_move_name(mut self, id: MoveId, name: impl Into<String>) -> Self {
        self.add_move_name(id, name);
        self
    }

    pub fn with_form_name(mut self, form: &str, name: impl Into<String>) -> Self {
        self.add_form_name(form, name);
        self
    }

    /// Appends a name to the dex number's list. The first name added is the
    /// species name.
    pub fn add_pokemon_name(&mut self, dex_nr: DexNr, name: impl Into<String>) {
        self.pokemon_names.entry(dex_nr).or_default().push(name.into());
    }

    pub fn add_type_name(&mut self, type_name: &str, name: impl Into<String>) {
        self.type_names
            .insert(type_name.to_ascii_lowercase(), name.into());
    }

    pub fn add_move_name(&mut self, id: MoveId, name: impl Into<String>) {
        self.move_names.insert(id, name.into());
    }

    pub fn add_form_name(&mut self, form: &str, name: impl Into<String>) {
        self.form_names.insert(form.to_ascii_lowercase(), name.into());
    }

    /// Builds a collection from the game's flat text keys.
    ///
    /// `pokemon_name_0003` is the species name; `pokemon_name_0003_0001` and
    /// up are extra names (mega evolutions), kept in suffix order after it.
    /// Extra names of a dex number without a species name are skipped.
    /// Keys matching none of the known patterns are ignored.
    pub fn from_text_pairs<K, V, I>(language_name: impl Into<String>, pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut collection = Self::new(language_name);
        let mut species: BTreeMap<DexNr, String> = BTreeMap::new();
        let mut extra: BTreeMap<(DexNr, u16), String> = BTreeMap::new();
        let mut ignored = 0usize;

        for (key, value) in pairs {
            let key = key.as_ref();

            if let Some(captures) = POKEMON_NAME_KEY.captures(key) {
                let Some(dex_nr) = captures
                    .name("dex")
                    .and_then(|dex| dex.as_str().parse::<u16>().ok())
                    .map(DexNr::from)
                else {
                    continue;
                };
                match captures
                    .name("index")
                    .and_then(|index| index.as_str().parse::<u16>().ok())
                {
                    Some(index) => {
                        extra.insert((dex_nr, index), value.into());
                    }
                    None => {
                        species.insert(dex_nr, value.into());
                    }
                }
            } else if let Some(captures) = MOVE_NAME_KEY.captures(key) {
                if let Some(id) = captures
                    .name("id")
                    .and_then(|id| id.as_str().parse::<u16>().ok())
                {
                    collection.add_move_name(MoveId::from(id), value);
                }
            } else if let Some(captures) = TYPE_NAME_KEY.captures(key) {
                if let Some(type_name) = captures.name("type") {
                    collection.add_type_name(type_name.as_str(), value);
                }
            } else if let Some(captures) = FORM_NAME_KEY.captures(key) {
                if let Some(form) = captures.name("form") {
                    collection.add_form_name(form.as_str(), value);
                }
            } else {
                ignored += 1;
            }
        }

        for (dex_nr, name) in species {
            collection.add_pokemon_name(dex_nr, name);
        }
        for ((dex_nr, index), name) in extra {
            // Index 0 is reserved for the species name
            if !collection.pokemon_names.contains_key(&dex_nr) {
                debug!("skipping extra name {index} of {dex_nr}: no species name");
                continue;
            }
            collection.add_pokemon_name(dex_nr, name);
        }

        trace!("ignored {ignored} text keys");
        collection
    }

    /// Loads the game's text export (`{"data": [key, value, ...]}`).
    pub fn from_text_export(language_name: impl Into<String>, text: &str) -> IResult<Self> {
        let language_name = language_name.into();
        let export: TextExport = serde_json::from_str(text)?;

        if export.data.len() % 2 != 0 {
            return Err(failure_from_kind(ErrorKind::InvalidTranslations {
                language: language_name,
                detail: "text export has an odd number of entries".to_string(),
            }));
        }

        Ok(Self::from_text_pairs(
            language_name,
            export.data.into_iter().tuples::<(String, String)>(),
        ))
    }

    /// Loads a JSON translation table.
    pub fn from_json(text: &str) -> IResult<Self> {
        let table: TranslationTable = serde_json::from_str(text)?;
        let mut collection = Self::new(table.language_name);

        collection.pokemon_names = table.pokemon_names;
        collection.move_names = table.move_names;
        for (type_name, name) in table.type_names {
            collection.add_type_name(&type_name, name);
        }
        for (form, name) in table.form_names {
            collection.add_form_name(&form, name);
        }

        Ok(collection)
    }

    /// Reads either supported format from disk. A text export carries no
    /// language name, so the file stem is used (`English.json` -> `English`).
    pub fn read(path: impl AsRef<Path>) -> IResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&text)?;

        if document.get("data").is_some_and(Value::is_array) {
            let language_name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            debug!("loading text export {} as {language_name}", path.display());
            Self::from_text_export(language_name, &text)
        } else {
            debug!("loading translation table {}", path.display());
            Self::from_json(&text)
        }
    }
}

impl Translations for TranslationCollection {
    fn language_name(&self) -> &str {
        &self.language_name
    }

    fn pokemon_names(&self, dex_nr: DexNr) -> &[String] {
        self.pokemon_names
            .get(&dex_nr)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn type_name(&self, type_name: &str) -> Option<&str> {
        self.type_names
            .get(&type_name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn move_name(&self, id: MoveId) -> Option<&str> {
        self.move_names.get(&id).map(String::as_str)
    }

    fn form_name(&self, suffix: &str, form_id: &str) -> Option<&str> {
        self.form_names
            .get(&form_id.to_ascii_lowercase())
            .or_else(|| self.form_names.get(&suffix.to_ascii_lowercase()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn text_pairs_order_extra_names_by_suffix() {
        let translations = TranslationCollection::from_text_pairs(
            "English",
            [
                ("pokemon_name_0006_0002", "Mega Charizard Y"),
                ("pokemon_name_0006", "Charizard"),
                ("pokemon_name_0006_0001", "Mega Charizard X"),
                ("pokemon_name_0001", "Bulbasaur"),
            ],
        );

        assert_eq!(translations.language_name(), "English");
        assert_eq!(
            translations.pokemon_names(DexNr::from(6)),
            ["Charizard", "Mega Charizard X", "Mega Charizard Y"]
        );
        assert_eq!(translations.pokemon_names(DexNr::from(1)), ["Bulbasaur"]);
        assert!(translations.pokemon_names(DexNr::from(2)).is_empty());
    }

    #[test]
    fn extra_names_without_species_name_are_skipped() {
        let translations = TranslationCollection::from_text_pairs(
            "English",
            [
                ("pokemon_name_0150_0001", "Mega Mewtwo X"),
                ("pokemon_name_0150_0002", "Mega Mewtwo Y"),
                ("pokemon_name_0003_0001", "Mega Venusaur"),
                ("pokemon_name_0003", "Venusaur"),
            ],
        );

        assert!(translations.pokemon_names(DexNr::from(150)).is_empty());
        assert_eq!(
            translations.pokemon_names(DexNr::from(3)),
            ["Venusaur", "Mega Venusaur"]
        );
    }

    #[test]
    fn text_pairs_types_moves_and_forms() {
        let translations = TranslationCollection::from_text_pairs(
            "German",
            [
                ("pokemon_type_fire", "Feuer"),
                ("move_name_0021", "Flammenrad"),
                ("form_alola", "Alola-Form"),
                ("form_rattata_alola", "Alola-Rattfratz"),
                ("quest_title", "ignored"),
            ],
        );

        assert_eq!(translations.type_name("Fire"), Some("Feuer"));
        assert_eq!(translations.type_name("Water"), None);
        assert_eq!(translations.move_name(MoveId::from(21)), Some("Flammenrad"));
        assert_eq!(translations.move_name(MoveId::from(22)), None);
        assert_eq!(
            translations.form_name("ALOLA", "RATTATA_ALOLA"),
            Some("Alola-Rattfratz")
        );
        assert_eq!(translations.form_name("ALOLA", "RAICHU_ALOLA"), Some("Alola-Form"));
        assert_eq!(translations.form_name("GALARIAN", "MEOWTH_GALARIAN"), None);
    }

    #[test]
    fn text_export_format() {
        let text = r#"{"data": ["pokemon_name_0025", "Pikachu", "move_name_0013", "Wrap"]}"#;
        let translations = TranslationCollection::from_text_export("English", text).expect("export");
        assert_eq!(translations.pokemon_names(DexNr::from(25)), ["Pikachu"]);
        assert_eq!(translations.move_name(MoveId::from(13)), Some("Wrap"));

        let err = TranslationCollection::from_text_export("English", r#"{"data": ["key"]}"#)
            .expect_err("odd entries");
        assert!(matches!(err.kind, ErrorKind::InvalidTranslations { .. }));
    }

    #[test]
    fn json_table_format() {
        let text = r#"{
            "languageName": "French",
            "pokemonNames": { "3": ["Florizarre", "Méga-Florizarre"] },
            "typeNames": { "Grass": "Plante" },
            "moveNames": { "214": "Fouet Lianes" },
            "formNames": { "ALOLA": "Forme d'Alola" }
        }"#;

        let translations = TranslationCollection::from_json(text).expect("table");
        assert_eq!(translations.language_name(), "French");
        assert_eq!(translations.pokemon_names(DexNr::from(3)).len(), 2);
        assert_eq!(translations.type_name("grass"), Some("Plante"));
        assert_eq!(translations.move_name(MoveId::from(214)), Some("Fouet Lianes"));
        assert_eq!(translations.form_name("ALOLA", "VULPIX_ALOLA"), Some("Forme d'Alola"));
    }

    #[test]
    fn builder_inserts() {
        let translations = TranslationCollection::new("English")
            .with_pokemon_name(DexNr::from(3), "Venusaur")
            .with_pokemon_name(DexNr::from(3), "Mega Venusaur")
            .with_type_name("Grass", "Grass")
            .with_move_name(MoveId::from(214), "Vine Whip")
            .with_form_name("NORMAL", "Normal");

        assert_eq!(
            translations.pokemon_names(DexNr::from(3)),
            ["Venusaur", "Mega Venusaur"]
        );
        assert_eq!(translations.form_name("NORMAL", "VENUSAUR_NORMAL"), Some("Normal"));
    }
}
