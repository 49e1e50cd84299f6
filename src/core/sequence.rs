use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 每個區塊各自遞增的請求編號
#[derive(Debug, Clone, Default)]
pub struct RegionSequencer {
    latest: Arc<Mutex<HashMap<String, u64>>>,
}

impl RegionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, region_id: &str) -> u64 {
        let mut latest = self.latest.lock().unwrap_or_else(|p| p.into_inner());
        let ticket = latest.entry(region_id.to_string()).or_insert(0);
        *ticket += 1;
        *ticket
    }

    pub fn is_latest(&self, region_id: &str, ticket: u64) -> bool {
        let latest = self.latest.lock().unwrap_or_else(|p| p.into_inner());
        latest.get(region_id).copied() == Some(ticket)
    }
}
