use crate::store::DayStateStore;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DayStateStore>,
    pub epoch: NaiveDate,
}

impl AppState {
    pub fn new(store: DayStateStore, epoch: NaiveDate) -> Self {
        Self {
            store: Arc::new(store),
            epoch,
        }
    }
}
