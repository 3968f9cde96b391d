//! 倉庫執行期狀態（可用庫存 + 預留暫存區）

use allocator_core::inventory::quantity_of;
use allocator_core::{InventoryMap, Quantity, ShipmentRecord, WarehouseRecord};

/// 單一倉庫
///
/// 對任一物料，`可用 + 預留` 恆等於本次分配開始前的數量；
/// 預留由可用庫存扣除，與加入暫存區同時完成。
#[derive(Debug, Clone)]
pub struct Warehouse {
    name: String,
    available: InventoryMap,
    reserved: InventoryMap,
}

impl Warehouse {
    /// 創建新的倉庫
    pub fn new(name: impl Into<String>, inventory: InventoryMap) -> Self {
        Self {
            name: name.into(),
            available: inventory,
            reserved: InventoryMap::new(),
        }
    }

    /// 由輸入記錄創建（複製庫存，不修改呼叫端資料）
    pub fn from_record(record: &WarehouseRecord) -> Self {
        Self::new(record.name.clone(), record.inventory.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 可用數量，缺少的物料為 0
    pub fn quantity_available(&self, item: &str) -> Quantity {
        quantity_of(&self.available, item)
    }

    /// 已預留但尚未出貨的數量
    pub fn quantity_reserved(&self, item: &str) -> Quantity {
        quantity_of(&self.reserved, item)
    }

    pub fn has_reservations(&self) -> bool {
        !self.reserved.is_empty()
    }

    /// 預留庫存
    ///
    /// 預留 `min(可用, quantity)`，同一物料多次預留會累加。
    /// 數量為 0 或無可用庫存時不做任何事。回傳實際預留數量。
    pub fn reserve(&mut self, item: &str, quantity: Quantity) -> Quantity {
        let available = self.quantity_available(item);
        if quantity == 0 || available == 0 {
            return 0;
        }

        let actual = available.min(quantity);
        self.available.insert(item.to_string(), available - actual);
        *self.reserved.entry(item.to_string()).or_insert(0) += actual;

        tracing::debug!(
            "倉庫 {} 預留 {} x{}（剩餘可用 {}）",
            self.name,
            item,
            actual,
            available - actual
        );

        actual
    }

    /// 取消所有預留，數量歸還可用庫存
    pub fn cancel_reservations(&mut self) {
        for (item, quantity) in std::mem::take(&mut self.reserved) {
            *self.available.entry(item).or_insert(0) += quantity;
        }
    }

    /// 將預留轉為出貨記錄並清空暫存區
    ///
    /// 無預留時回傳 `None`，該倉庫不應出現在出貨結果中。
    pub fn finalize_shipment(&mut self) -> Option<ShipmentRecord> {
        if self.reserved.is_empty() {
            return None;
        }

        let items = std::mem::take(&mut self.reserved);
        Some(ShipmentRecord::new(self.name.clone(), items))
    }
}

impl From<&WarehouseRecord> for Warehouse {
    fn from(record: &WarehouseRecord) -> Self {
        Self::from_record(record)
    }
}
