//! 出貨模型

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::inventory::quantity_of;
use crate::{InventoryMap, Quantity};

/// 單一倉庫的出貨記錄
///
/// JSON 形式為單鍵物件：`{"owd": {"apple": 5}}`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentRecord {
    /// 倉庫名稱
    pub warehouse: String,

    /// 出貨數量
    pub items: InventoryMap,
}

impl ShipmentRecord {
    /// 創建新的出貨記錄
    pub fn new(warehouse: impl Into<String>, items: InventoryMap) -> Self {
        Self {
            warehouse: warehouse.into(),
            items,
        }
    }

    /// 查詢物料出貨數量
    pub fn quantity_of(&self, item: &str) -> Quantity {
        quantity_of(&self.items, item)
    }

    /// 出貨總數量
    pub fn total_quantity(&self) -> Quantity {
        self.items.values().sum()
    }
}

/// 完整出貨結果，依倉庫輸入順序排列
///
/// 空列表表示訂單無法完成。
pub type Shipment = Vec<ShipmentRecord>;

/// 加總出貨結果中某物料的數量
pub fn shipped_quantity(shipment: &[ShipmentRecord], item: &str) -> Quantity {
    shipment.iter().map(|record| record.quantity_of(item)).sum()
}

impl Serialize for ShipmentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.warehouse, &self.items)?;
        map.end()
    }
}

struct ShipmentRecordVisitor;

impl<'de> Visitor<'de> for ShipmentRecordVisitor {
    type Value = ShipmentRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a single-key map of warehouse name to shipped items")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ShipmentRecord, A::Error> {
        let (warehouse, items) = access
            .next_entry::<String, InventoryMap>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        if access.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }

        Ok(ShipmentRecord { warehouse, items })
    }
}

impl<'de> Deserialize<'de> for ShipmentRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ShipmentRecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::inventory;

    #[test]
    fn test_shipment_record_json_shape() {
        let record = ShipmentRecord::new("owd", inventory([("apple", 5), ("banana", 1)]));

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"owd":{"apple":5,"banana":1}}"#
        );
        assert_eq!(record.total_quantity(), 6);
    }

    #[test]
    fn test_shipment_record_rejects_multiple_keys() {
        let parsed = serde_json::from_str::<ShipmentRecord>(r#"{"owd":{"a":1},"bobs":{"a":1}}"#);
        assert!(parsed.is_err());

        let parsed = serde_json::from_str::<ShipmentRecord>("{}");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_shipped_quantity_across_records() {
        let shipment: Shipment = serde_json::from_str(
            r#"[{"owd":{"apple":7}},{"bobs":{"apple":2,"pear":1}}]"#,
        )
        .unwrap();

        assert_eq!(shipment.len(), 2);
        assert_eq!(shipment[1].warehouse, "bobs");
        assert_eq!(shipped_quantity(&shipment, "apple"), 9);
        assert_eq!(shipped_quantity(&shipment, "kiwi"), 0);
    }
}
