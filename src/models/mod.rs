pub mod component;

pub use component::{Component, DEFAULT_LOW_STOCK_THRESHOLD};
