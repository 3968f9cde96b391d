//! 訂單模型

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{AllocError, Quantity};

/// 訂單明細
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// 物料
    pub item: String,

    /// 需求數量
    pub quantity: Quantity,
}

impl OrderLine {
    pub fn new(item: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }

    /// 數量為 0 的明細不參與分配
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

/// 客戶訂單（物料 → 需求數量）
///
/// 明細依加入順序保存，分配時也依此順序處理。
/// JSON 形式為物料到數量的物件，例如 `{"apple": 5, "banana": 2}`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    lines: Vec<OrderLine>,
}

impl Order {
    /// 創建空訂單
    pub fn new() -> Self {
        Self::default()
    }

    /// 設置物料需求數量
    ///
    /// 物料已存在時原位取代數量，保留原本的處理順序。
    pub fn add(&mut self, item: impl Into<String>, quantity: Quantity) {
        let item = item.into();
        match self.lines.iter_mut().find(|line| line.item == item) {
            Some(line) => line.quantity = quantity,
            None => self.lines.push(OrderLine { item, quantity }),
        }
    }

    /// 建構器模式：設置物料需求數量
    pub fn with_item(mut self, item: impl Into<String>, quantity: Quantity) -> Self {
        self.add(item, quantity);
        self
    }

    /// 由有號數量設置物料需求（輸入邊界）
    pub fn try_add(&mut self, item: impl Into<String>, quantity: i64) -> crate::Result<()> {
        let item = item.into();
        let quantity = Quantity::try_from(quantity)
            .map_err(|_| AllocError::NegativeQuantity { item: item.clone(), quantity })?;
        self.add(item, quantity);
        Ok(())
    }

    /// 查詢物料需求數量，未訂購時為 0
    pub fn quantity_of(&self, item: &str) -> Quantity {
        self.lines
            .iter()
            .find(|line| line.item == item)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.lines.iter().any(|line| line.item == item)
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 需要實際出貨的明細數（排除數量 0）
    pub fn active_line_count(&self) -> usize {
        self.lines.iter().filter(|line| !line.is_empty()).count()
    }
}

impl<K: Into<String>> FromIterator<(K, Quantity)> for Order {
    fn from_iter<T: IntoIterator<Item = (K, Quantity)>>(iter: T) -> Self {
        let mut order = Order::new();
        for (item, quantity) in iter {
            order.add(item, quantity);
        }
        order
    }
}

impl<'a> IntoIterator for &'a Order {
    type Item = &'a OrderLine;
    type IntoIter = std::slice::Iter<'a, OrderLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl Serialize for Order {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lines.len()))?;
        for line in &self.lines {
            map.serialize_entry(&line.item, &line.quantity)?;
        }
        map.end()
    }
}

/// JSON 中的數量：非負值直接取 `u64`，負值另行回報
#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Unsigned(Quantity),
    Signed(i64),
}

struct OrderVisitor;

impl<'de> Visitor<'de> for OrderVisitor {
    type Value = Order;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of item name to quantity")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Order, A::Error> {
        let mut order = Order::new();
        while let Some((item, quantity)) = access.next_entry::<String, RawQuantity>()? {
            if order.contains(&item) {
                return Err(de::Error::custom(AllocError::DuplicateOrderItem(item)));
            }
            match quantity {
                RawQuantity::Unsigned(quantity) => order.add(item, quantity),
                RawQuantity::Signed(quantity) => {
                    order.try_add(item, quantity).map_err(de::Error::custom)?
                }
            }
        }
        Ok(order)
    }
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderVisitor)
    }
}
