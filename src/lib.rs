/// Error definitions
pub mod error;
/// Parsing the game master export into linked pokemon and move collections
pub mod game_master;
/// Game concept types (dex numbers, move ids, elemental types) useful across Pokemon GO tools.
pub mod game_types;
/// Writing rendered pokedex output to a directory or a custom sink
pub mod output;
/// Generic wrapper for values that may or may not match a known variant.
pub mod recognized;
/// Rendering pokemon into the public, translated JSON shape
pub mod render;
/// Per-language name lookups and loaders for the game's text exports
pub mod translations;
