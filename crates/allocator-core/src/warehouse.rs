//! 倉庫輸入記錄

use serde::{Deserialize, Serialize};

use crate::{InventoryMap, Quantity};

/// 倉庫輸入記錄（名稱 + 庫存）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    /// 倉庫名稱
    pub name: String,

    /// 現有庫存
    #[serde(default)]
    pub inventory: InventoryMap,
}

impl WarehouseRecord {
    /// 創建新的倉庫記錄
    pub fn new(name: impl Into<String>, inventory: InventoryMap) -> Self {
        Self {
            name: name.into(),
            inventory,
        }
    }

    /// 建構器模式：設置物料庫存
    pub fn with_item(mut self, item: impl Into<String>, quantity: Quantity) -> Self {
        self.inventory.insert(item.into(), quantity);
        self
    }
}
