//! Battery RAM and RTC persistence seam.
//!
//! The core never touches the filesystem. Hosts implement [`SaveStore`] and
//! call [`restore`] after loading a cartridge and [`flush`] whenever they
//! want dirty state written out.

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::machine::GameBoy;

/// Keyed storage for battery-backed cartridge state.
pub trait SaveStore {
    fn load_ram(&mut self, key: &str) -> Result<Option<Vec<u8>>>;
    fn save_ram(&mut self, key: &str, data: &[u8]) -> Result<()>;
    fn load_rtc_epoch(&mut self, key: &str) -> Result<Option<u64>>;
    fn save_rtc_epoch(&mut self, key: &str, epoch: u64) -> Result<()>;
}

/// In-memory store, useful for tests and hosts that persist elsewhere.
#[derive(Default, Debug)]
pub struct MemorySaveStore {
    ram: HashMap<String, Vec<u8>>,
    rtc: HashMap<String, u64>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemorySaveStore {
    fn load_ram(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.ram.get(key).cloned())
    }

    fn save_ram(&mut self, key: &str, data: &[u8]) -> Result<()> {
        self.ram.insert(key.to_owned(), data.to_vec());
        Ok(())
    }

    fn load_rtc_epoch(&mut self, key: &str) -> Result<Option<u64>> {
        Ok(self.rtc.get(key).copied())
    }

    fn save_rtc_epoch(&mut self, key: &str, epoch: u64) -> Result<()> {
        self.rtc.insert(key.to_owned(), epoch);
        Ok(())
    }
}

/// Load persisted battery RAM and clock epoch into `gb`, if any exist.
pub fn restore(gb: &mut GameBoy, store: &mut dyn SaveStore) -> Result<()> {
    let key = gb.save_key();

    if gb.battery_ram().is_some() {
        if let Some(data) = store.load_ram(&key)? {
            gb.load_battery_ram(&data)
                .with_context(|| format!("restoring battery RAM for {key}"))?;
            log::info!("GB save: restored {} bytes of RAM for {}", data.len(), key);
        }
    }

    if gb.rtc_epoch().is_some() {
        if let Some(epoch) = store.load_rtc_epoch(&key)? {
            gb.set_rtc_epoch(epoch);
        }
    }

    Ok(())
}

/// Write battery RAM and clock epoch if they changed. Returns whether
/// anything was written.
pub fn flush(gb: &mut GameBoy, store: &mut dyn SaveStore) -> Result<bool> {
    if !gb.take_ram_dirty() {
        return Ok(false);
    }

    let key = gb.save_key();
    if let Some(ram) = gb.battery_ram() {
        store
            .save_ram(&key, ram)
            .with_context(|| format!("saving battery RAM for {key}"))?;
    }
    if let Some(epoch) = gb.rtc_epoch() {
        store.save_rtc_epoch(&key, epoch)?;
    }
    log::debug!("GB save: flushed {}", key);
    Ok(true)
}
