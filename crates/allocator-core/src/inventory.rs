//! 庫存數量模型

use std::collections::BTreeMap;

/// 數量（非負整數，負數在輸入邊界即被拒絕）
pub type Quantity = u64;

/// 物料 → 數量
///
/// 缺少的物料與數量為 0 的物料同樣表示「無庫存」。
pub type InventoryMap = BTreeMap<String, Quantity>;

/// 由 (物料, 數量) 組建庫存映射
pub fn inventory<I, K>(entries: I) -> InventoryMap
where
    I: IntoIterator<Item = (K, Quantity)>,
    K: Into<String>,
{
    entries
        .into_iter()
        .map(|(item, quantity)| (item.into(), quantity))
        .collect()
}

/// 查詢物料數量，缺少時為 0
pub fn quantity_of(map: &InventoryMap, item: &str) -> Quantity {
    map.get(item).copied().unwrap_or(0)
}
