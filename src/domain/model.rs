use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// 三層選單的層級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Country,
    Port,
    Item,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Country => write!(f, "country"),
            Level::Port => write!(f, "port"),
            Level::Item => write!(f, "item"),
        }
    }
}

/// 不透明的識別碼，一律以文字比對。
///
/// 服務端有時回數字、有時回字串，兩種都接受；
/// 原本的形式會保留下來，組 `filter` 時照原樣送回。
#[derive(Debug, Clone)]
pub struct EntityId {
    text: String,
    numeric: bool,
}

impl EntityId {
    /// 空字串代表「未選擇」，其餘原樣比對
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self {
                text: raw.to_string(),
                numeric: false,
            })
        }
    }

    pub fn number(n: impl Into<serde_json::Number>) -> Self {
        Self {
            text: n.into().to_string(),
            numeric: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// 放進 `filter` 查詢時的 JSON 值，維持服務端給的型別
    pub fn filter_value(&self) -> serde_json::Value {
        if self.numeric {
            if let Ok(n) = self.text.parse::<serde_json::Number>() {
                return serde_json::Value::Number(n);
            }
        }
        serde_json::Value::String(self.text.clone())
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.filter_value() {
            serde_json::Value::Number(n) => n.serialize(serializer),
            _ => serializer.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(EntityId::number(n)),
            RawId::Text(s) => EntityId::parse(&s)
                .ok_or_else(|| serde::de::Error::custom("identifier cannot be empty")),
        }
    }
}

/// `null` 與缺欄位都當 0
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "id_negara")]
    pub id: EntityId,
    #[serde(rename = "nama_negara")]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(rename = "id_pelabuhan")]
    pub id: EntityId,
    #[serde(rename = "nama_pelabuhan")]
    pub display_name: String,
    #[serde(rename = "id_negara")]
    pub country_id: EntityId,
}

impl Port {
    /// `filter` 條件中指向國家的欄位
    pub const PARENT_KEY: &'static str = "id_negara";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "id_barang")]
    pub id: EntityId,
    #[serde(rename = "nama_barang")]
    pub display_name: String,
    #[serde(rename = "id_pelabuhan")]
    pub port_id: EntityId,
    #[serde(rename = "harga")]
    pub unit_price: f64,
    #[serde(rename = "diskon", default, deserialize_with = "null_as_zero")]
    pub discount_percent: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl Item {
    /// `filter` 條件中指向港口的欄位
    pub const PARENT_KEY: &'static str = "id_pelabuhan";

    /// 折扣後總價，不做四捨五入
    pub fn discounted_total(&self) -> f64 {
        self.unit_price * (1.0 - self.discount_percent / 100.0)
    }
}

/// 目前的選擇狀態
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub country: Option<EntityId>,
    pub port: Option<EntityId>,
    pub item: Option<Item>,
    pub total: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_id_accepts_number_and_string() {
        let from_number: EntityId = serde_json::from_value(json!(10)).unwrap();
        let from_text: EntityId = serde_json::from_value(json!("10")).unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_str(), "10");

        assert!(serde_json::from_value::<EntityId>(json!("")).is_err());
    }

    #[test]
    fn test_filter_value_keeps_wire_form() {
        let numeric: EntityId = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(numeric.filter_value(), json!(1));

        let padded: EntityId = serde_json::from_value(json!("007")).unwrap();
        assert_eq!(padded.filter_value(), json!("007"));

        let decimal: EntityId = serde_json::from_value(json!(10.0)).unwrap();
        assert_eq!(decimal.as_str(), "10.0");
        assert_eq!(decimal.filter_value(), json!(10.0));

        assert_eq!(EntityId::parse("ID-JKT").unwrap().filter_value(), json!("ID-JKT"));
        assert_eq!(EntityId::number(-3i64).filter_value(), json!(-3));
    }

    #[test]
    fn test_wire_form_does_not_affect_equality() {
        let numeric: EntityId = serde_json::from_value(json!(5)).unwrap();
        assert!(numeric.is_numeric());
        assert_eq!(numeric, EntityId::parse("5").unwrap());
        assert_eq!(serde_json::to_value(&numeric).unwrap(), json!(5));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!(EntityId::parse("").is_none());
        assert_eq!(EntityId::parse(" 5 ").unwrap().as_str(), " 5 ");
        assert_ne!(EntityId::parse(" 5 ").unwrap(), EntityId::parse("5").unwrap());
    }

    #[test]
    fn test_item_wire_format() {
        let item: Item = serde_json::from_value(json!({
            "id_barang": 5,
            "nama_barang": "Rice",
            "id_pelabuhan": 10,
            "harga": 100000,
            "diskon": 10,
            "description": "Premium rice"
        }))
        .unwrap();

        assert_eq!(item.id.as_str(), "5");
        assert_eq!(item.port_id.as_str(), "10");
        assert_eq!(item.description.as_deref(), Some("Premium rice"));
        assert!((item.discounted_total() - 90000.0).abs() < 1e-6);
    }

    #[test]
    fn test_item_optional_fields_default() {
        let item: Item = serde_json::from_value(json!({
            "id_barang": "7",
            "nama_barang": "Salt",
            "id_pelabuhan": "10",
            "harga": 2500.5
        }))
        .unwrap();

        assert_eq!(item.discount_percent, 0.0);
        assert!(item.description.is_none());
        assert_eq!(item.discounted_total(), 2500.5);
    }

    #[test]
    fn test_item_null_discount_and_description() {
        let items: Vec<Item> = serde_json::from_value(json!([
            {
                "id_barang": 5,
                "nama_barang": "Rice",
                "id_pelabuhan": 10,
                "harga": 100000,
                "diskon": 10,
                "description": "Premium rice"
            },
            {
                "id_barang": 6,
                "nama_barang": "Sugar",
                "id_pelabuhan": 10,
                "harga": 20000,
                "diskon": null,
                "description": null
            }
        ]))
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].discount_percent, 0.0);
        assert!(items[1].description.is_none());
        assert_eq!(items[1].discounted_total(), 20000.0);
    }
}
