use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Quantity at or below which a component counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

/// One inventory component, as stored in the `components` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: Option<i64>, // ⇔ components.id (None until the store assigns one)
    pub name: String,    // ⇔ components.name
    #[serde(rename = "type")]
    pub kind: String, // ⇔ components.type
    pub quantity: i32,   // ⇔ components.quantity
    pub location: Option<String>, // ⇔ components.location (NULL = none)
    pub purchase_timestamp: Option<i64>, // ⇔ components.purchase_timestamp (epoch seconds)
}

impl Component {
    /// Build a not-yet-stored component.
    /// Empty location strings and a zero timestamp are treated as absent.
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        quantity: i32,
        location: Option<String>,
        purchase_timestamp: Option<i64>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: kind.into(),
            quantity,
            location: location.filter(|l| !l.is_empty()),
            purchase_timestamp: purchase_timestamp.filter(|ts| *ts != 0),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.location = if location.is_empty() {
            None
        } else {
            Some(location)
        };
        self
    }

    pub fn with_purchase_timestamp(mut self, ts: i64) -> Self {
        self.purchase_timestamp = if ts == 0 { None } else { Some(ts) };
        self
    }

    /// `quantity <= threshold`.
    pub fn is_low_stock(&self, threshold: i32) -> bool {
        self.quantity <= threshold
    }

    /// Same as `is_low_stock(DEFAULT_LOW_STOCK_THRESHOLD)`.
    pub fn is_low_stock_default(&self) -> bool {
        self.is_low_stock(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    pub fn location_str(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    pub fn purchase_date(&self) -> Option<DateTime<Local>> {
        self.purchase_timestamp
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|utc| utc.with_timezone(&Local))
    }

    /// Purchase date as `YYYY-MM-DD` (local time), or "No date".
    pub fn purchase_date_string(&self) -> String {
        match self.purchase_date() {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => "No date".to_string(),
        }
    }

    /// True when every stored field except `id` matches.
    pub fn same_content(&self, other: &Component) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.quantity == other.quantity
            && self.location == other.location
            && self.purchase_timestamp == other.purchase_timestamp
    }
}
