//! 分配配置模型

use serde::{Deserialize, Serialize};

/// 物料庫存不足時的處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShortagePolicy {
    /// 任一物料不足即取消整張訂單，回滾所有預留（預設）
    #[default]
    AllOrNothing,
    /// 不足的物料盡量出貨現有庫存，並在結果中記錄缺貨警告
    ShipAvailable,
}

/// 分配器配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// 缺貨策略
    pub shortage_policy: ShortagePolicy,

    /// 是否拒絕重複的倉庫名稱
    /// - false: 重名倉庫視為獨立倉庫，依輸入順序處理（預設）
    /// - true: 分配前檢查，重名即返回錯誤
    pub reject_duplicate_warehouses: bool,
}

impl AllocatorConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置缺貨策略
    pub fn with_shortage_policy(mut self, policy: ShortagePolicy) -> Self {
        self.shortage_policy = policy;
        self
    }

    /// 建構器模式：設置是否拒絕重複倉庫名稱
    pub fn with_reject_duplicate_warehouses(mut self, reject: bool) -> Self {
        self.reject_duplicate_warehouses = reject;
        self
    }

    /// 是否採用全有或全無策略
    pub fn is_all_or_nothing(&self) -> bool {
        self.shortage_policy == ShortagePolicy::AllOrNothing
    }
}
