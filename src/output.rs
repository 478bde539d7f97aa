use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{ErrorKind, IResult};
use crate::game_master::keys;
use crate::render::RenderedPokemon;

/// Destination for rendered output, addressed by slash-separated blob names.
pub trait BlobSink {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<(), ErrorKind>;
}

/// Writes blobs as files under a root directory, creating parent directories.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BlobSink for DirectorySink {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<(), ErrorKind> {
        let path = name
            .split('/')
            .fold(self.root.clone(), |path, part| path.join(part));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!("writing {}", path.display());
        std::fs::write(&path, bytes)?;

        Ok(())
    }
}

pub struct BlobSinkWithCallback<F> {
    callback: F,
}

impl<F> BlobSinkWithCallback<F>
where
    F: Fn(&str, &[u8]) -> Result<(), ErrorKind>,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> BlobSink for BlobSinkWithCallback<F>
where
    F: Fn(&str, &[u8]) -> Result<(), ErrorKind>,
{
    fn store(&self, name: &str, bytes: &[u8]) -> Result<(), ErrorKind> {
        (self.callback)(name, bytes)
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<Vec<u8>, ErrorKind> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };

    Ok(bytes)
}

/// Stores the full pokedex as `pokedex.json` plus one `pokedex/<ID>.json` per species.
pub fn write_pokedex(
    sink: &dyn BlobSink,
    rendered: &BTreeMap<String, RenderedPokemon>,
    pretty: bool,
) -> IResult<()> {
    sink.store(keys::POKEDEX_BLOB, &to_json(rendered, pretty)?)?;

    for (id, pokemon) in rendered {
        let name = format!("{}/{id}.json", keys::POKEDEX_DIR);
        sink.store(&name, &to_json(pokemon, pretty)?)?;
    }

    info!("wrote {} pokemon", rendered.len());
    Ok(())
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use super::*;
    use crate::game_master::{ParserOptions, parse_game_master};
    use crate::render::PokemonRenderer;

    fn rendered() -> BTreeMap<String, RenderedPokemon> {
        let text = r#"[
            {"templateId": "V0016_POKEMON_PIDGEY", "data": {"pokemonSettings": {
                "pokemonId": "PIDGEY", "type": "POKEMON_TYPE_NORMAL", "type2": "POKEMON_TYPE_FLYING"}}},
            {"templateId": "V0019_POKEMON_RATTATA", "data": {"pokemonSettings": {
                "pokemonId": "RATTATA", "type": "POKEMON_TYPE_NORMAL"}}}
        ]"#;
        let game_master = parse_game_master(text, ParserOptions::default()).expect("game master");
        PokemonRenderer::new(&[]).render_all(&game_master)
    }

    #[test]
    fn directory_sink_writes_nested_blobs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = DirectorySink::new(dir.path());

        write_pokedex(&sink, &rendered(), true).expect("write");

        let pokedex = std::fs::read_to_string(dir.path().join("pokedex.json")).expect("pokedex");
        let pokedex: serde_json::Value = serde_json::from_str(&pokedex).expect("json");
        assert_eq!(pokedex["PIDGEY"]["dexNr"], 16);

        let rattata = std::fs::read_to_string(dir.path().join("pokedex").join("RATTATA.json"))
            .expect("rattata");
        assert!(rattata.contains("\"formId\": \"RATTATA\""));
    }

    #[test]
    fn callback_sink_receives_every_blob() {
        let names = Mutex::new(Vec::new());
        let sink = BlobSinkWithCallback::new(|name: &str, bytes: &[u8]| {
            assert!(!bytes.is_empty());
            names.lock().unwrap().push(name.to_string());
            Ok(())
        });

        write_pokedex(&sink, &rendered(), false).expect("write");

        assert_eq!(
            names.into_inner().unwrap(),
            ["pokedex.json", "pokedex/PIDGEY.json", "pokedex/RATTATA.json"]
        );
    }

    #[test]
    fn sink_errors_propagate() {
        let sink = BlobSinkWithCallback::new(|_: &str, _: &[u8]| {
            Err(ErrorKind::IoError(std::io::Error::other("disk full")))
        });

        let err = write_pokedex(&sink, &rendered(), false).expect_err("failing sink");
        assert!(matches!(err.kind, ErrorKind::IoError(_)));
    }
}
