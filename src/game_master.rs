//! Parsing of the game master export into linked pokemon and move collections.

pub mod collections;
pub mod keys;
pub mod parser;
pub mod record;
pub mod settings;
pub mod template;
pub mod types;

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ErrorKind, IResult, failure_from_kind};

pub use collections::{MoveCollection, PokemonCollection};
pub use parser::{GameMaster, MasterDataParser, ParseStats, ParserOptions, VariantMerge};
pub use record::Record;

/// Decode the records of a game master document. The root must be an array;
/// elements that are not records are skipped.
pub fn records_from_str(text: &str) -> IResult<Vec<Record>> {
    let Value::Array(elements) = serde_json::from_str::<Value>(text)? else {
        return Err(failure_from_kind(ErrorKind::InvalidGameMaster));
    };

    let total = elements.len();
    let records: Vec<Record> = elements.into_iter().filter_map(Record::from_value).collect();
    if records.len() != total {
        debug!("skipped {} elements without a templateId", total - records.len());
    }

    Ok(records)
}

pub fn parse_game_master(text: &str, options: ParserOptions) -> IResult<GameMaster> {
    let records = records_from_str(text)?;
    MasterDataParser::new(options).parse(&records)
}

pub fn read_game_master(path: impl AsRef<Path>, options: ParserOptions) -> IResult<GameMaster> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_game_master(&text, options)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_non_array_root() {
        let err = parse_game_master(r#"{"templateId": "V0001_MOVE_X"}"#, ParserOptions::default())
            .expect_err("object root");
        assert!(matches!(err.kind, ErrorKind::InvalidGameMaster));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_game_master("[{", ParserOptions::default()).expect_err("invalid json");
        assert!(matches!(err.kind, ErrorKind::SerdeJson { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_game_master("/nonexistent/GAME_MASTER.json", ParserOptions::default())
            .expect_err("missing file");
        assert!(matches!(err.kind, ErrorKind::IoError(_)));
    }

    #[test]
    fn parses_document() {
        let text = r#"[
            {"templateId": "V0013_MOVE_WRAP", "data": {"moveSettings": {
                "pokemonType": "POKEMON_TYPE_NORMAL", "power": 60, "durationMs": 2900, "energyDelta": -33}}},
            {"templateId": "V0023_POKEMON_EKANS", "data": {"pokemonSettings": {
                "pokemonId": "EKANS", "type": "POKEMON_TYPE_POISON", "cinematicMoves": ["WRAP"]}}},
            "not a record",
            {"data": {}}
        ]"#;

        let game_master = parse_game_master(text, ParserOptions::default()).expect("game master");
        assert_eq!(game_master.pokemon().len(), 1);
        assert_eq!(game_master.moves().len(), 1);
        assert_eq!(records_from_str(text).expect("records").len(), 2);
    }
}
