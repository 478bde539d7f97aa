//! Classification of game master records by their template identifier.
//!
//! Every record kind the pipeline understands is one row of [`TEMPLATES`]. A
//! record is matched against the rows in order, once, and the resulting
//! [`RecordClass`] is what every parser pass consumes.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use variantly::Variantly;

/// The numeric key and trailing name fragment extracted from a template id.
///
/// For `COMBAT_V0021_MOVE_FLAME_WHEEL` this is `(21, "FLAME_WHEEL")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    pub number: u16,
    pub name: String,
}

/// Which known record shape a template identifier describes.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum RecordClass {
    /// `V####_POKEMON_<FORM>`
    Pokemon(TemplateKey),
    /// `V####_MOVE_<NAME>`
    PokemonMove(TemplateKey),
    /// `COMBAT_V####_MOVE_<NAME>`
    CombatMove(TemplateKey),
    /// `TEMPORARY_EVOLUTION_V####_POKEMON_<NAME>`
    TemporaryEvolution(TemplateKey),
    /// `FORMS_V####_POKEMON_<NAME>`
    Forms(TemplateKey),
}

impl RecordClass {
    /// Short label used in logs and parse statistics.
    pub fn label(&self) -> &'static str {
        match self {
            RecordClass::Pokemon(_) => "pokemon",
            RecordClass::PokemonMove(_) => "move",
            RecordClass::CombatMove(_) => "combat_move",
            RecordClass::TemporaryEvolution(_) => "temporary_evolution",
            RecordClass::Forms(_) => "forms",
        }
    }
}

struct Template {
    pattern: Regex,
    build: fn(TemplateKey) -> RecordClass,
}

impl Template {
    fn new(pattern: &str, build: fn(TemplateKey) -> RecordClass) -> Self {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|err| panic!("invalid template pattern {pattern}: {err}"));

        Self { pattern, build }
    }

    fn matches(&self, template_id: &str) -> Option<RecordClass> {
        let captures = self.pattern.captures(template_id)?;
        let number = captures.name("number")?.as_str().parse::<u16>().ok()?;
        // Matching is case-insensitive, so the name is stored in the game's own casing
        let name = captures
            .name("name")
            .map(|name| name.as_str().to_ascii_uppercase())
            .unwrap_or_default();

        Some((self.build)(TemplateKey { number, name }))
    }
}

/// Ordered template table; the first matching row wins.
static TEMPLATES: LazyLock<Vec<Template>> = LazyLock::new(|| {
    vec![
        Template::new(
            r"^V(?P<number>[0-9]{4})_POKEMON_(?P<name>.*)$",
            RecordClass::Pokemon,
        ),
        Template::new(
            r"^V(?P<number>[0-9]{4})_MOVE_(?P<name>.*)$",
            RecordClass::PokemonMove,
        ),
        Template::new(
            r"^COMBAT_V(?P<number>[0-9]{4})_MOVE_(?P<name>.*)$",
            RecordClass::CombatMove,
        ),
        Template::new(
            r"^TEMPORARY_EVOLUTION_V(?P<number>[0-9]{4})_POKEMON_(?P<name>.*)$",
            RecordClass::TemporaryEvolution,
        ),
        Template::new(
            r"^FORMS_V(?P<number>[0-9]{4})_POKEMON_(?P<name>.*)$",
            RecordClass::Forms,
        ),
    ]
});

/// Classify a template identifier, or `None` when no known template matches.
pub fn classify(template_id: &str) -> Option<RecordClass> {
    TEMPLATES
        .iter()
        .find_map(|template| template.matches(template_id))
}

#[cfg(test)]
mod test {
    use super::*;

    fn key(number: u16, name: &str) -> TemplateKey {
        TemplateKey {
            number,
            name: name.to_string(),
        }
    }

    #[test]
    fn classifies_every_template() {
        assert_eq!(
            classify("V0001_POKEMON_BULBASAUR"),
            Some(RecordClass::Pokemon(key(1, "BULBASAUR")))
        );
        assert_eq!(
            classify("V0021_MOVE_FLAME_WHEEL"),
            Some(RecordClass::PokemonMove(key(21, "FLAME_WHEEL")))
        );
        assert_eq!(
            classify("COMBAT_V0021_MOVE_FLAME_WHEEL"),
            Some(RecordClass::CombatMove(key(21, "FLAME_WHEEL")))
        );
        assert_eq!(
            classify("TEMPORARY_EVOLUTION_V0003_POKEMON_VENUSAUR"),
            Some(RecordClass::TemporaryEvolution(key(3, "VENUSAUR")))
        );
        assert_eq!(
            classify("FORMS_V0019_POKEMON_RATTATA"),
            Some(RecordClass::Forms(key(19, "RATTATA")))
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            classify("v0019_pokemon_rattata_alola"),
            Some(RecordClass::Pokemon(key(19, "RATTATA_ALOLA")))
        );
        assert_eq!(
            classify("Combat_V0253_Move_Dragon_Tail_Fast"),
            Some(RecordClass::CombatMove(key(253, "DRAGON_TAIL_FAST")))
        );
    }

    #[test]
    fn anchored_templates_do_not_overlap() {
        // The combat template embeds the move template; anchoring keeps them apart.
        let combat = classify("COMBAT_V0013_MOVE_WRAP").expect("combat move");
        assert!(combat.is_combat_move());
        assert!(!combat.is_pokemon_move());
        assert_eq!(combat.label(), "combat_move");
    }

    #[test]
    fn unknown_templates_are_not_classified() {
        assert_eq!(classify("COMBAT_LEAGUE_DEFAULT_GREAT"), None);
        assert_eq!(classify("SPAWN_V0001_POKEMON_BULBASAUR"), None);
        assert_eq!(classify("V001_POKEMON_BULBASAUR"), None);
        assert_eq!(classify(""), None);
    }
}
