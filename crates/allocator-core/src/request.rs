//! 分配請求（輸入邊界）

use serde::{Deserialize, Serialize};

use crate::{AllocatorConfig, Order, WarehouseRecord};

/// 一次分配所需的完整輸入
///
/// ```
/// # use allocator_core::AllocationRequest;
/// let request = AllocationRequest::from_json(
///     r#"{"order": {"apple": 1}, "warehouses": [{"name": "owd", "inventory": {"apple": 1}}]}"#,
/// ).unwrap();
/// assert_eq!(request.warehouses.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// 訂單
    pub order: Order,

    /// 倉庫列表（順序即優先順序）
    pub warehouses: Vec<WarehouseRecord>,

    /// 分配配置
    #[serde(default)]
    pub config: AllocatorConfig,
}

impl AllocationRequest {
    /// 創建新的分配請求
    pub fn new(order: Order, warehouses: Vec<WarehouseRecord>) -> Self {
        Self {
            order,
            warehouses,
            config: AllocatorConfig::default(),
        }
    }

    /// 建構器模式：設置配置
    pub fn with_config(mut self, config: AllocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// 由 JSON 解析請求
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
