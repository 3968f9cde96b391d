//! # Allocator Core
//!
//! 訂單分配的核心資料模型與類型定義

pub mod config;
pub mod inventory;
pub mod order;
pub mod request;
pub mod shipment;
pub mod warehouse;

// Re-export 主要類型
pub use config::{AllocatorConfig, ShortagePolicy};
pub use inventory::{InventoryMap, Quantity};
pub use order::{Order, OrderLine};
pub use request::AllocationRequest;
pub use shipment::{Shipment, ShipmentRecord};
pub use warehouse::WarehouseRecord;

/// 分配錯誤類型
///
/// 庫存不足不屬於錯誤，以空的出貨結果表示。
#[derive(Debug, thiserror::Error)]
pub enum AllocError {
    #[error("數量不可為負數: {item} = {quantity}")]
    NegativeQuantity { item: String, quantity: i64 },

    #[error("訂單中物料重複: {0}")]
    DuplicateOrderItem(String),

    #[error("倉庫名稱重複: {0}")]
    DuplicateWarehouse(String),

    #[error("無效的輸入資料: {0}")]
    InvalidInput(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AllocError>;
