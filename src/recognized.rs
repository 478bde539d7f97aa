/// A value from the game master that either parsed into a known variant `T`,
/// or is a raw identifier we have no typed representation for yet.
///
/// Niantic adds new enum values (types, forms, buffs) between app releases.
/// Rather than dropping a record when that happens, the raw identifier is
/// kept so it still shows up in the rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recognized<T, Raw = String> {
    Known(T),
    Unknown(Raw),
}

impl<T, Raw> Recognized<T, Raw> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Recognized::Known(t) => Some(t),
            Recognized::Unknown(_) => None,
        }
    }

    pub fn as_ref(&self) -> Recognized<&T, &Raw> {
        match self {
            Recognized::Known(t) => Recognized::Known(t),
            Recognized::Unknown(raw) => Recognized::Unknown(raw),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_and_unknown_accessors() {
        let known: Recognized<u8> = Recognized::Known(3);
        let unknown: Recognized<u8> = Recognized::Unknown("POKEMON_TYPE_STELLAR".to_string());

        assert_eq!(known.known(), Some(&3));
        assert_eq!(unknown.known(), None);
        assert_eq!(known.as_ref(), Recognized::Known(&3));
        assert!(matches!(
            unknown.as_ref(),
            Recognized::Unknown(raw) if raw == "POKEMON_TYPE_STELLAR"
        ));
    }
}
