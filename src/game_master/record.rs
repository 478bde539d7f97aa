use serde_json::Value;

use super::keys;

/// One entry of the game master: the template identifier plus its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    template_id: String,
    data: Value,
}

impl Record {
    pub fn new(template_id: impl Into<String>, data: Value) -> Self {
        Self {
            template_id: template_id.into(),
            data,
        }
    }

    /// Decodes a single top-level array element. Elements that are not objects
    /// or carry no string `templateId` are not records and yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut object) = value else {
            return None;
        };

        let template_id = match object.remove(keys::TEMPLATE_ID)? {
            Value::String(template_id) => template_id,
            _ => return None,
        };
        let data = object.remove(keys::DATA).unwrap_or(Value::Null);

        Some(Self { template_id, data })
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Returns the payload section stored under `key`, if it is a non-empty object.
    pub fn section(&self, key: &str) -> Option<&Value> {
        self.data
            .get(key)
            .filter(|section| section.as_object().is_some_and(|object| !object.is_empty()))
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_records() {
        let record = Record::from_value(json!({
            "templateId": "V0001_POKEMON_BULBASAUR",
            "data": { "pokemonSettings": { "pokemonId": "BULBASAUR" } }
        }))
        .expect("record");

        assert_eq!(record.template_id(), "V0001_POKEMON_BULBASAUR");
        assert!(record.section("pokemonSettings").is_some());
        assert!(record.section("moveSettings").is_none());
    }

    #[test]
    fn skips_non_records() {
        assert!(Record::from_value(json!(42)).is_none());
        assert!(Record::from_value(json!({ "data": {} })).is_none());
        assert!(Record::from_value(json!({ "templateId": 7 })).is_none());
    }

    #[test]
    fn missing_data_is_empty_payload() {
        let record = Record::from_value(json!({ "templateId": "V0001_MOVE_X" })).expect("record");
        assert_eq!(record.data(), &Value::Null);
        assert!(record.section("moveSettings").is_none());
    }

    #[test]
    fn empty_sections_do_not_apply() {
        let record = Record::new("V0001_POKEMON_BULBASAUR", json!({ "pokemonSettings": {} }));
        assert!(record.section("pokemonSettings").is_none());
    }
}
