use crate::store::Stores;
use std::time::Duration;

pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub revalidate: Duration,
}

impl AppState {
    pub fn new(stores: Stores) -> Self {
        Self {
            stores,
            revalidate: DEFAULT_REVALIDATE,
        }
    }

    pub fn with_revalidate(mut self, revalidate: Duration) -> Self {
        self.revalidate = revalidate;
        self
    }
}
