//! Synthetic CSV fixtures shared by the compute tests.
//!
//! Store 1 carries the cleaning edge cases (a zero-sales day, a closed day,
//! a zero-customers day), store 2 a gapless month for forecasting, and
//! store 99 has transactions but no metadata row so the join drops it.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use model::DataSources;
use tempfile::TempDir;

use crate::loader::{load_datasets, LoadedData};

/// Store-1 sales values the cleaning step must keep.
pub fn retained_store1_sales() -> Vec<i64> {
    vec![100, 120, 150, 110, 90, 105, 95, 115]
}

pub fn write_fixture(dir: &Path) -> DataSources {
    let mut train = String::from("Store,Date,Sales,Customers,Open,Promo\n");
    // Store 1: 10 daily rows, one Sales=0, one Open=0, one Customers=0.
    let store1 = [
        (1, 100, 10, 1, 0),
        (2, 120, 12, 1, 1),
        (3, 0, 0, 1, 0),
        (4, 150, 15, 1, 1),
        (5, 130, 13, 0, 0),
        (6, 110, 11, 1, 0),
        (7, 90, 9, 1, 0),
        (8, 105, 0, 1, 1),
        (9, 95, 10, 1, 0),
        (10, 115, 11, 1, 1),
    ];
    for (day, sales, customers, open, promo) in store1 {
        train.push_str(&format!(
            "1,2015-01-{day:02},{sales},{customers},{open},{promo}\n"
        ));
    }
    // Store 2: a gapless month, always open.
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    for i in 0..30i64 {
        let date = start + chrono::Duration::days(i);
        let sales = 200 + (i % 7) * 10 + i;
        let promo = i % 2;
        train.push_str(&format!("2,{date},{sales},20,1,{promo}\n"));
    }
    // Store 99: no metadata row, must vanish in the join.
    train.push_str("99,2015-01-01,500,50,1,0\n");
    train.push_str("99,2015-01-02,510,51,1,0\n");

    let store = "Store,StoreType,Assortment,CompetitionDistance,Promo2SinceYear\n\
                 1,a,basic,10,2012\n\
                 2,b,extra,,\n\
                 3,c,basic,30,2014\n";

    let sources = DataSources::from_data_dir(dir);
    fs::write(&sources.transactions, train).unwrap();
    fs::write(&sources.stores, store).unwrap();
    sources
}

pub fn load_fixture() -> (TempDir, LoadedData) {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_fixture(dir.path());
    let data = load_datasets(&sources).unwrap();
    (dir, data)
}
