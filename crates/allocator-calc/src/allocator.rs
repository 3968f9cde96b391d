//! 訂單分配主流程

use std::collections::HashSet;

use allocator_core::{
    AllocError, AllocatorConfig, Order, Quantity, Shipment, ShortagePolicy, WarehouseRecord,
};
use uuid::Uuid;

use crate::sourcing::{SourcingCalculator, SourcingLeg, SourcingPlan};
use crate::warehouse::Warehouse;
use crate::{AllocationResult, AllocationStatus, AllocationWarning, Shortfall};

/// 訂單分配器
///
/// 不保存任何分配狀態：訂單與倉庫皆在每次呼叫時傳入。
#[derive(Debug, Clone, Default)]
pub struct InventoryAllocator {
    config: AllocatorConfig,
}

impl InventoryAllocator {
    /// 創建新的分配器
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// 分配訂單，回傳出貨結果
    ///
    /// 訂單無法完成時回傳空列表。
    pub fn allocate(
        &self,
        order: &Order,
        warehouses: &[WarehouseRecord],
    ) -> allocator_core::Result<Shipment> {
        Ok(self.allocate_detailed(order, warehouses)?.shipment)
    }

    /// 分配訂單，回傳含狀態與警告的完整結果
    ///
    /// 每次呼叫都由輸入記錄重新建立倉庫，呼叫端資料不會被修改。
    pub fn allocate_detailed(
        &self,
        order: &Order,
        warehouses: &[WarehouseRecord],
    ) -> allocator_core::Result<AllocationResult> {
        if self.config.reject_duplicate_warehouses {
            Self::check_unique_names(warehouses)?;
        }

        let mut warehouses: Vec<Warehouse> = warehouses.iter().map(Warehouse::from_record).collect();
        Ok(self.allocate_in_place(order, &mut warehouses))
    }

    /// 對呼叫端持有的倉庫執行一次分配
    ///
    /// 成功出貨的數量會從倉庫扣除，可用於同一批庫存依序處理多張訂單。
    /// 呼叫前倉庫不得有未結的預留，否則取消時會一併歸還、提交時會一併出貨。
    pub fn allocate_in_place(&self, order: &Order, warehouses: &mut [Warehouse]) -> AllocationResult {
        debug_assert!(
            warehouses.iter().all(|w| !w.has_reservations()),
            "倉庫在分配前已有未結的預留"
        );

        let pass_id = Uuid::new_v4();
        let span = tracing::info_span!("allocation", %pass_id);
        let _guard = span.enter();

        tracing::info!(
            "開始分配：訂單 {} 項，倉庫 {} 個",
            order.len(),
            warehouses.len()
        );

        let start_time = std::time::Instant::now();
        let mut result = AllocationResult::empty(pass_id);
        let mut shortfalls = Vec::new();
        // 提交前累積的提示，訂單取消時一併捨棄
        let mut pending = Vec::new();

        for line in order {
            if line.is_empty() {
                tracing::debug!("物料 {} 數量為 0，略過", line.item);
                continue;
            }

            let plan = SourcingCalculator::plan(&line.item, line.quantity, warehouses);
            tracing::debug!("物料 {} x{} 貨源: {:?}", line.item, line.quantity, plan);

            match plan {
                SourcingPlan::SingleWarehouse(leg) => {
                    Self::reserve_legs(&line.item, &[leg], warehouses);
                }
                SourcingPlan::Distributed(legs) => {
                    Self::reserve_legs(&line.item, &legs, warehouses);
                    pending.push(AllocationWarning::info(
                        &line.item,
                        format!("由 {} 個倉庫分批出貨", legs.len()),
                    ));
                }
                SourcingPlan::Shortage {
                    requested,
                    available,
                    legs,
                } => match self.config.shortage_policy {
                    ShortagePolicy::AllOrNothing => {
                        tracing::warn!(
                            "物料 {} 庫存不足：需要 {}, 可用 {}，取消整張訂單",
                            line.item,
                            requested,
                            available
                        );
                        Self::rollback(warehouses);

                        result.status = AllocationStatus::Unfulfillable {
                            item: line.item.clone(),
                            requested,
                            available,
                        };
                        result.add_warning(AllocationWarning::error(
                            &line.item,
                            format!("庫存不足：需要 {}, 可用 {}", requested, available),
                        ));
                        result.calculation_time_ms = Some(start_time.elapsed().as_millis());
                        return result;
                    }
                    ShortagePolicy::ShipAvailable => {
                        let shipped = Self::reserve_legs(&line.item, &legs, warehouses);
                        tracing::warn!(
                            "物料 {} 庫存不足：需要 {}, 出貨 {}",
                            line.item,
                            requested,
                            shipped
                        );
                        pending.push(AllocationWarning::warning(
                            &line.item,
                            format!("庫存不足：需要 {}, 出貨 {}", requested, shipped),
                        ));
                        shortfalls.push(Shortfall {
                            item: line.item.clone(),
                            requested,
                            shipped,
                        });
                    }
                },
            }
        }

        result.shipment = Self::commit(warehouses);
        result.warnings.extend(pending);
        if !shortfalls.is_empty() {
            result.status = AllocationStatus::Partial { shortfalls };
        }
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "分配完成，出貨倉庫 {} 個，耗時 {:?}",
            result.shipment.len(),
            start_time.elapsed()
        );

        result
    }

    /// 依取貨明細預留，回傳實際預留總數
    fn reserve_legs(item: &str, legs: &[SourcingLeg], warehouses: &mut [Warehouse]) -> Quantity {
        legs.iter()
            .filter_map(|leg| {
                warehouses
                    .get_mut(leg.warehouse_index)
                    .map(|warehouse| warehouse.reserve(item, leg.quantity))
            })
            .sum()
    }

    /// 取消所有倉庫的預留
    fn rollback(warehouses: &mut [Warehouse]) {
        for warehouse in warehouses.iter_mut() {
            warehouse.cancel_reservations();
        }
    }

    /// 提交所有倉庫的預留，依倉庫順序收集非空出貨記錄
    fn commit(warehouses: &mut [Warehouse]) -> Shipment {
        warehouses
            .iter_mut()
            .filter_map(Warehouse::finalize_shipment)
            .collect()
    }

    fn check_unique_names(warehouses: &[WarehouseRecord]) -> allocator_core::Result<()> {
        let mut seen = HashSet::new();
        for record in warehouses {
            if !seen.insert(record.name.as_str()) {
                return Err(AllocError::DuplicateWarehouse(record.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocator_core::inventory::inventory;
    use allocator_core::ShipmentRecord;

    fn record(name: &str, stock: &[(&str, u64)]) -> WarehouseRecord {
        WarehouseRecord::new(name, inventory(stock.iter().copied()))
    }

    #[test]
    fn test_distributed_with_multiple_items() {
        let order = Order::new()
            .with_item("apple", 10)
            .with_item("banana", 5);
        let warehouses = vec![
            record("owd", &[("apple", 5), ("banana", 5)]),
            record("dm", &[("apple", 5)]),
        ];

        let shipment = InventoryAllocator::default().allocate(&order, &warehouses).unwrap();

        assert_eq!(
            shipment,
            vec![
                ShipmentRecord::new("owd", inventory([("apple", 5), ("banana", 5)])),
                ShipmentRecord::new("dm", inventory([("apple", 5)])),
            ]
        );
    }

    #[test]
    fn test_all_or_nothing_rolls_back_earlier_items() {
        let order = Order::new().with_item("apple", 3).with_item("kiwi", 1);
        let mut warehouses = vec![Warehouse::new("owd", inventory([("apple", 3)]))];

        let result = InventoryAllocator::default().allocate_in_place(&order, &mut warehouses);

        assert!(result.shipment.is_empty());
        assert_eq!(
            result.status,
            AllocationStatus::Unfulfillable {
                item: "kiwi".to_string(),
                requested: 1,
                available: 0,
            }
        );
        assert_eq!(warehouses[0].quantity_available("apple"), 3);
        assert!(!warehouses[0].has_reservations());
    }

    #[test]
    fn test_rollback_discards_split_notice() {
        // apple 需分批出貨，kiwi 無庫存，整張訂單取消後不應留下分批提示
        let order = Order::new().with_item("apple", 9).with_item("kiwi", 1);
        let warehouses = vec![record("owd", &[("apple", 7)]), record("bobs", &[("apple", 2)])];

        let result = InventoryAllocator::default()
            .allocate_detailed(&order, &warehouses)
            .unwrap();

        assert!(result.shipment.is_empty());
        assert!(matches!(
            result.status,
            AllocationStatus::Unfulfillable { ref item, .. } if item == "kiwi"
        ));
        assert_eq!(result.warnings_with(crate::WarningSeverity::Info).count(), 0);
        assert_eq!(
            result.warnings,
            vec![AllocationWarning::error("kiwi", "庫存不足：需要 1, 可用 0")]
        );
    }

    #[test]
    fn test_split_notice_kept_on_success() {
        let order = Order::new().with_item("apple", 9);
        let warehouses = vec![record("owd", &[("apple", 7)]), record("bobs", &[("apple", 2)])];

        let result = InventoryAllocator::default()
            .allocate_detailed(&order, &warehouses)
            .unwrap();

        assert!(result.is_fulfilled());
        assert_eq!(
            result.warnings,
            vec![AllocationWarning::info("apple", "由 2 個倉庫分批出貨")]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "未結的預留")]
    fn test_outstanding_reservations_rejected() {
        let mut warehouses = vec![Warehouse::new("owd", inventory([("apple", 5)]))];
        warehouses[0].reserve("apple", 2);

        InventoryAllocator::default()
            .allocate_in_place(&Order::new().with_item("apple", 1), &mut warehouses);
    }

    #[test]
    fn test_ship_available_policy() {
        let order = Order::new().with_item("apple", 3).with_item("kiwi", 4);
        let warehouses = vec![
            record("owd", &[("apple", 3), ("kiwi", 1)]),
            record("dm", &[("kiwi", 2)]),
        ];
        let allocator = InventoryAllocator::new(
            AllocatorConfig::new().with_shortage_policy(ShortagePolicy::ShipAvailable),
        );

        let result = allocator.allocate_detailed(&order, &warehouses).unwrap();

        assert_eq!(
            result.shipment,
            vec![
                ShipmentRecord::new("owd", inventory([("apple", 3), ("kiwi", 1)])),
                ShipmentRecord::new("dm", inventory([("kiwi", 2)])),
            ]
        );
        match &result.status {
            AllocationStatus::Partial { shortfalls } => {
                assert_eq!(shortfalls.len(), 1);
                assert_eq!(shortfalls[0].item, "kiwi");
                assert_eq!(shortfalls[0].missing(), 1);
            }
            other => panic!("expected partial, got {other:?}"),
        }
        assert!(result
            .warnings
            .iter()
            .any(|w| w.item == "kiwi" && w.severity == crate::WarningSeverity::Warning));
    }

    #[test]
    fn test_sequential_orders_share_inventory() {
        let allocator = InventoryAllocator::default();
        let mut warehouses = vec![
            Warehouse::new("owd", inventory([("apple", 5)])),
            Warehouse::new("dm", inventory([("apple", 5)])),
        ];

        let first = allocator.allocate_in_place(&Order::new().with_item("apple", 4), &mut warehouses);
        assert_eq!(first.shipment, vec![ShipmentRecord::new("owd", inventory([("apple", 4)]))]);

        // 第二張訂單只能從剩餘庫存出貨
        let second = allocator.allocate_in_place(&Order::new().with_item("apple", 5), &mut warehouses);
        assert_eq!(
            second.shipment,
            vec![ShipmentRecord::new("dm", inventory([("apple", 5)]))]
        );

        let third = allocator.allocate_in_place(&Order::new().with_item("apple", 2), &mut warehouses);
        assert!(!third.is_fulfilled());
        assert_eq!(warehouses[0].quantity_available("apple"), 1);
    }

    #[test]
    fn test_duplicate_warehouse_names() {
        let order = Order::new().with_item("apple", 2);
        let warehouses = vec![record("owd", &[("apple", 1)]), record("owd", &[("apple", 1)])];

        // 預設：重名倉庫各自獨立
        let shipment = InventoryAllocator::default().allocate(&order, &warehouses).unwrap();
        assert_eq!(shipment.len(), 2);

        let strict =
            InventoryAllocator::new(AllocatorConfig::new().with_reject_duplicate_warehouses(true));
        let err = strict.allocate(&order, &warehouses).unwrap_err();
        assert!(matches!(err, AllocError::DuplicateWarehouse(ref name) if name == "owd"));
    }

    #[test]
    fn test_empty_order() {
        let warehouses = vec![record("owd", &[("apple", 1)])];

        let result = InventoryAllocator::default()
            .allocate_detailed(&Order::new(), &warehouses)
            .unwrap();

        assert!(result.is_fulfilled());
        assert!(result.shipment.is_empty());
        assert!(result.calculation_time_ms.is_some());
    }
}
