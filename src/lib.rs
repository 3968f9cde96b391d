//! # Inventory Allocator
//!
//! 將客戶訂單分配到多個倉庫：單一倉庫優先（first-fit），不足時多倉庫分批，
//! 合計仍不足則整張訂單回滾。
//!
//! ```
//! use inventory_allocator::{InventoryAllocator, Order, WarehouseRecord};
//!
//! let order = Order::new().with_item("apple", 9);
//! let warehouses = vec![
//!     WarehouseRecord::new("owd", Default::default()).with_item("apple", 7),
//!     WarehouseRecord::new("bobs", Default::default()).with_item("apple", 2),
//! ];
//!
//! let shipment = InventoryAllocator::default().allocate(&order, &warehouses).unwrap();
//! assert_eq!(shipment.len(), 2);
//! assert_eq!(shipment[0].quantity_of("apple"), 7);
//! ```

pub use allocator_calc::{
    AllocationResult, AllocationStatus, AllocationWarning, InventoryAllocator, Shortfall,
    SourcingCalculator, SourcingLeg, SourcingPlan, Warehouse, WarningSeverity,
};
pub use allocator_core::inventory::{self, inventory, quantity_of};
pub use allocator_core::shipment::shipped_quantity;
pub use allocator_core::{
    AllocError, AllocationRequest, AllocatorConfig, InventoryMap, Order, OrderLine, Quantity,
    Result, Shipment, ShipmentRecord, ShortagePolicy, WarehouseRecord,
};
