use crate::db::DatabaseManager;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

/// Aggregate figures about the stored inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStats {
    pub components: i64,
    pub total_units: i64,
    pub types: usize,
    pub low_stock: usize,
    pub undated: i64,
}

pub fn collect_stats(db: &DatabaseManager, threshold: i32) -> AppResult<InventoryStats> {
    let conn = db.connection()?;

    let (components, total_units, undated): (i64, i64, i64) = conn.query_row(
        "SELECT COUNT(*),
                IFNULL(SUM(quantity), 0),
                IFNULL(SUM(CASE WHEN purchase_timestamp IS NULL THEN 1 ELSE 0 END), 0)
         FROM components",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    Ok(InventoryStats {
        components,
        total_units,
        types: db.get_component_types()?.len(),
        low_stock: db.get_low_stock_components(threshold)?.len(),
        undated,
    })
}

pub fn print_db_info(db: &DatabaseManager, threshold: i32) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db.path()).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!(
        "{}• File:{} {}{}{}",
        CYAN,
        RESET,
        YELLOW,
        db.path().display(),
        RESET
    );
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COUNTS
    //
    let stats = collect_stats(db, threshold)?;
    println!(
        "{}• Components:{} {}{}{}",
        CYAN, RESET, GREEN, stats.components, RESET
    );
    println!("{}• Total units:{} {}", CYAN, RESET, stats.total_units);
    println!("{}• Types:{} {}", CYAN, RESET, stats.types);

    //
    // 3) LOW STOCK
    //
    let low = if stats.low_stock > 0 {
        format!("{YELLOW}{}{RESET}", stats.low_stock)
    } else {
        format!("{GREY}0{RESET}")
    };
    println!("{}• Low stock (<= {}):{} {}", CYAN, threshold, RESET, low);
    println!("{}• Without purchase date:{} {}", CYAN, RESET, stats.undated);

    println!();
    Ok(())
}
