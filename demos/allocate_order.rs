//! 訂單分配示例
//!
//! 用法：`cargo run --example allocate_order -- [request.json]`
//! 未指定檔案時使用內建範例。日誌等級由 `RUST_LOG` 控制。

use anyhow::Context;
use inventory_allocator::{AllocationRequest, InventoryAllocator};
use tracing_subscriber::EnvFilter;

const SAMPLE_REQUEST: &str = r#"{
    "order": {"apple": 9, "cheese": 30, "banana": 0},
    "warehouses": [
        {"name": "owd", "inventory": {"apple": 7, "cheese": 10}},
        {"name": "johns", "inventory": {"cheese": 10}},
        {"name": "bobs", "inventory": {"apple": 2, "cheese": 30}}
    ]
}"#;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("無法讀取請求檔案: {path}"))?,
        None => SAMPLE_REQUEST.to_string(),
    };

    let request = AllocationRequest::from_json(&json).context("請求格式錯誤")?;
    println!("=== 訂單分配示例 ===\n");
    println!("訂單: {}", serde_json::to_string(&request.order)?);
    for warehouse in &request.warehouses {
        println!("  - 倉庫 {}: {:?}", warehouse.name, warehouse.inventory);
    }

    let allocator = InventoryAllocator::new(request.config.clone());
    let result = allocator.allocate_detailed(&request.order, &request.warehouses)?;

    println!("\n狀態: {:?}", result.status);
    for warning in &result.warnings {
        println!("  {warning}");
    }
    println!("\n出貨:");
    println!("{}", serde_json::to_string_pretty(&result.shipment)?);

    Ok(())
}
