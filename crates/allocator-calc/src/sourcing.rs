//! 物料貨源決策

use allocator_core::Quantity;

use crate::warehouse::Warehouse;

/// 單一倉庫的取貨數量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcingLeg {
    /// 倉庫在列表中的位置
    pub warehouse_index: usize,
    /// 取貨數量
    pub quantity: Quantity,
}

impl SourcingLeg {
    pub fn new(warehouse_index: usize, quantity: Quantity) -> Self {
        Self {
            warehouse_index,
            quantity,
        }
    }
}

/// 物料貨源決策結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcingPlan {
    /// 第一個足量的倉庫獨自出貨
    SingleWarehouse(SourcingLeg),
    /// 多倉庫分批出貨
    Distributed(Vec<SourcingLeg>),
    /// 所有倉庫合計仍不足
    Shortage {
        requested: Quantity,
        available: Quantity,
        /// 盡量出貨時可取的數量
        legs: Vec<SourcingLeg>,
    },
}

impl SourcingPlan {
    pub fn is_feasible(&self) -> bool {
        !matches!(self, SourcingPlan::Shortage { .. })
    }

    /// 所有取貨明細
    pub fn legs(&self) -> &[SourcingLeg] {
        match self {
            SourcingPlan::SingleWarehouse(leg) => std::slice::from_ref(leg),
            SourcingPlan::Distributed(legs) => legs,
            SourcingPlan::Shortage { legs, .. } => legs,
        }
    }

    /// 計劃取貨總數量
    pub fn planned_quantity(&self) -> Quantity {
        self.legs().iter().map(|leg| leg.quantity).sum()
    }
}

/// 貨源計算器（只讀，不修改倉庫）
pub struct SourcingCalculator;

impl SourcingCalculator {
    /// 決定物料的出貨倉庫
    ///
    /// 1. 依列表順序，第一個可獨自滿足的倉庫勝出（first-fit）
    /// 2. 否則合計所有倉庫，足夠則依序貪婪取貨
    /// 3. 合計不足則回傳 `Shortage`
    ///
    /// `quantity` 應大於 0；數量為 0 的明細由呼叫端略過。
    pub fn plan(item: &str, quantity: Quantity, warehouses: &[Warehouse]) -> SourcingPlan {
        let mut total_available: Quantity = 0;

        for (index, warehouse) in warehouses.iter().enumerate() {
            let available = warehouse.quantity_available(item);
            if available >= quantity {
                return SourcingPlan::SingleWarehouse(SourcingLeg::new(index, quantity));
            }
            total_available = total_available.saturating_add(available);
        }

        let legs = Self::greedy_legs(item, quantity, warehouses);

        if total_available < quantity {
            SourcingPlan::Shortage {
                requested: quantity,
                available: total_available,
                legs,
            }
        } else {
            SourcingPlan::Distributed(legs)
        }
    }

    /// 依倉庫順序取 `min(可用, 尚缺)`，補足即停止
    fn greedy_legs(item: &str, quantity: Quantity, warehouses: &[Warehouse]) -> Vec<SourcingLeg> {
        let mut legs = Vec::new();
        let mut remaining = quantity;

        for (index, warehouse) in warehouses.iter().enumerate() {
            if remaining == 0 {
                break;
            }

            let available = warehouse.quantity_available(item);
            if available == 0 {
                continue;
            }

            let take = available.min(remaining);
            legs.push(SourcingLeg::new(index, take));
            remaining -= take;
        }

        legs
    }
}
