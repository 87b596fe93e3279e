use async_trait::async_trait;
use mongodb::{Client, Collection, bson::{Bson, Document}};
use serde_json::Value;
use tracing::{debug, info, error};
use crate::domain::{error::IngestionError, models::IngestedDocument, ports::DataRepository};

pub struct MongoDataRepository {
    client: Client,
    database: String,
}

impl MongoDataRepository {
    pub fn new(client: Client, database: String) -> Self {
        debug!("Initializing MongoDB data repository for database: {}", database);
        Self { client, database }
    }
}

/// Converts a parsed JSON object to BSON without reshaping it.
///
/// Integers that fit in `i64` become `Int64`; anything wider is stored as a
/// `Double`, since BSON has no unsigned type.
pub fn to_bson_document(document: &IngestedDocument) -> Document {
    document
        .iter()
        .map(|(key, value)| (key.clone(), json_to_bson(value)))
        .collect()
}

fn json_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Bson::Int64(i),
            None => {
                let wide = n.as_f64().unwrap_or(f64::NAN);
                debug!("Storing number {} as a double", n);
                Bson::Double(wide)
            }
        },
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(to_bson_document(map)),
    }
}

fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DataRepository for MongoDataRepository {
    async fn insert_document(&self, target_collection: &str, document: &IngestedDocument) -> Result<String, IngestionError> {
        let collection: Collection<Document> = self.client.database(&self.database).collection(target_collection);
        debug!("Inserting one document into {}.{}", self.database, target_collection);

        let doc = to_bson_document(document);

        let result = collection
            .insert_one(doc, None)
            .await
            .map_err(|e| {
                error!("Failed to insert document into {}: {}", target_collection, e);
                IngestionError::Database(e.to_string())
            })?;

        let inserted_id = id_to_string(&result.inserted_id);
        info!("✅ Successfully inserted document {} into collection: {}", inserted_id, target_collection);
        Ok(inserted_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use crate::infrastructure::parsers::parse_json;
    use serde_json::json;

    #[test]
    fn test_conversion_preserves_structure() {
        let parsed = match json!({"a": 1, "b": "x", "c": [true, null], "d": {"e": 2.5}}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };

        let bson = to_bson_document(&parsed);
        assert_eq!(bson.get_str("b").unwrap(), "x");
        assert_eq!(bson.get_array("c").unwrap(), &vec![Bson::Boolean(true), Bson::Null]);
        assert_eq!(bson.get_document("d").unwrap(), &doc! { "e": 2.5 });
        assert_eq!(bson.get("a"), Some(&Bson::Int64(1)));
    }

    #[test]
    fn test_integer_wider_than_i64_is_stored_as_double() {
        let parsed = parse_json(br#"{"big":18446744073709551615,"neg":-9223372036854775808,"nested":{"n":[18446744073709551615]}}"#).unwrap();

        let bson = to_bson_document(&parsed);
        assert_eq!(bson.get("big"), Some(&Bson::Double(18446744073709551615_f64)));
        assert_eq!(bson.get("neg"), Some(&Bson::Int64(i64::MIN)));
        assert_eq!(
            bson.get_document("nested").unwrap().get_array("n").unwrap(),
            &vec![Bson::Double(u64::MAX as f64)]
        );
    }

    #[test]
    fn test_inserted_id_formatting() {
        let oid = ObjectId::new();
        assert_eq!(id_to_string(&Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(id_to_string(&Bson::String("custom".into())), "custom");
    }
}
