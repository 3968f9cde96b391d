//! # Allocation Engine
//!
//! 訂單分配引擎：倉庫預留、貨源決策與全有或全無的提交/回滾

pub mod allocator;
pub mod sourcing;
pub mod warehouse;

// Re-export 主要類型
pub use allocator::InventoryAllocator;
pub use sourcing::{SourcingCalculator, SourcingLeg, SourcingPlan};
pub use warehouse::Warehouse;

use std::fmt;

use allocator_core::{Quantity, Shipment};
use serde::Serialize;
use uuid::Uuid;

/// 分配結果
#[derive(Debug, Clone, Serialize)]
pub struct AllocationResult {
    /// 本次分配 ID
    pub pass_id: Uuid,

    /// 分配狀態
    pub status: AllocationStatus,

    /// 出貨結果（無法完成時為空）
    pub shipment: Shipment,

    /// 警告信息
    pub warnings: Vec<AllocationWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl AllocationResult {
    /// 創建空的分配結果
    pub fn empty(pass_id: Uuid) -> Self {
        Self {
            pass_id,
            status: AllocationStatus::Fulfilled,
            shipment: Shipment::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: AllocationWarning) {
        self.warnings.push(warning);
    }

    /// 依嚴重程度篩選警告
    pub fn warnings_with(
        &self,
        severity: WarningSeverity,
    ) -> impl Iterator<Item = &AllocationWarning> + '_ {
        self.warnings.iter().filter(move |w| w.severity == severity)
    }

    pub fn is_fulfilled(&self) -> bool {
        self.status == AllocationStatus::Fulfilled
    }
}

/// 分配狀態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AllocationStatus {
    /// 所有物料皆已滿足
    Fulfilled,
    /// 物料不足，整張訂單取消
    Unfulfillable {
        item: String,
        requested: Quantity,
        available: Quantity,
    },
    /// 盡量出貨：部分物料短缺
    Partial { shortfalls: Vec<Shortfall> },
}

/// 物料短缺
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub item: String,
    pub requested: Quantity,
    pub shipped: Quantity,
}

impl Shortfall {
    /// 未出貨數量
    pub fn missing(&self) -> Quantity {
        self.requested - self.shipped
    }
}

/// 分配過程中針對單一物料的提示
///
/// 訂單取消時只保留導致取消的 `Error`，其餘提示隨預留一併捨棄。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationWarning {
    pub item: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl AllocationWarning {
    pub fn new(
        item: impl Into<String>,
        message: impl Into<String>,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            item: item.into(),
            message: message.into(),
            severity,
        }
    }

    /// 分批出貨等不影響結果的提示
    pub fn info(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(item, message, WarningSeverity::Info)
    }

    /// 盡量出貨模式下的短缺
    pub fn warning(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(item, message, WarningSeverity::Warning)
    }

    /// 導致整張訂單取消的短缺
    pub fn error(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(item, message, WarningSeverity::Error)
    }
}

impl fmt::Display for AllocationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.item, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WarningSeverity::Info => "提示",
            WarningSeverity::Warning => "警告",
            WarningSeverity::Error => "錯誤",
        };
        f.write_str(label)
    }
}
