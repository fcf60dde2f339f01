#[cfg(test)]
pub mod test_utils {
    use crate::config::initialize_app_state_with_dir;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Write the synthetic CSV pair the integration tests run against.
    ///
    /// Store 1 carries the cleaning edge cases (a zero-sales day, a closed
    /// day, a zero-customers day), store 2 a gapless month for
    /// forecasting, and store 99 has no metadata row so the join drops it.
    pub fn write_fixture_csvs(dir: &Path) {
        let mut train = String::from("Store,Date,Sales,Customers,Open,Promo\n");
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
        for i in 0..30i64 {
            let day = 1 + i;
            let sales = 200 + (i % 7) * 10 + i;
            let promo = i % 2;
            train.push_str(&format!("2,2015-01-{day:02},{sales},20,1,{promo}\n"));
        }
        train.push_str("99,2015-01-01,500,50,1,0\n");

        let store = "Store,StoreType,Assortment,CompetitionDistance,Promo2SinceYear\n\
                     1,a,basic,10,2012\n\
                     2,b,extra,,\n\
                     3,c,basic,30,2014\n";

        fs::write(dir.join("train.csv"), train).unwrap();
        fs::write(dir.join("store.csv"), store).unwrap();
    }

    /// Create AppState backed by a fresh fixture directory. The TempDir
    /// must outlive the state or the sources disappear.
    pub async fn setup_test_app_state() -> (TempDir, AppState) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture_csvs(dir.path());
        let state = initialize_app_state_with_dir(dir.path().to_str().unwrap())
            .await
            .expect("Failed to initialize app state");
        (dir, state)
    }

    /// Create a full application router for testing
    pub async fn setup_test_app() -> (TempDir, Router) {
        let (dir, state) = setup_test_app_state().await;
        (dir, create_router(state))
    }
}
