//! Mock implementations for testing
//!
//! This module provides mock implementations of the platform traits for use
//! in unit and integration tests. They record every call for assertion.

use std::collections::BTreeMap;
use std::vec::Vec;

use embedded_hal::i2c::ErrorKind;

use crate::audio::{ComponentDriver, ComponentRegistrar, DaiDriver};
use crate::regmap::{RegisterDef, RegisterMap, RegmapError};

/// In-memory register map.
///
/// Holds one value per register (the chip and its cache are the same thing
/// here), logs reads and writes, and can be told to fail bus transactions
/// for a given register.
#[derive(Debug, Default)]
pub struct MockRegmap {
    values: BTreeMap<u8, u8>,
    defaults: Vec<(u8, u8)>,
    reads: Vec<u8>,
    writes: Vec<(u8, u8)>,
    fail_reads: Option<u8>,
    fail_writes: Option<u8>,
    cache_resets: usize,
}

impl MockRegmap {
    /// Every register reads as zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers start at the reset values of `table`.
    pub fn with_defaults(table: &[RegisterDef]) -> Self {
        let defaults: Vec<(u8, u8)> = table
            .iter()
            .filter_map(|def| def.reset.map(|reset| (def.addr, reset)))
            .collect();
        Self {
            values: defaults.iter().copied().collect(),
            defaults,
            ..Self::default()
        }
    }

    /// Set a register as the hardware would, without logging a write.
    pub fn set(&mut self, reg: u8, val: u8) {
        self.values.insert(reg, val);
    }

    /// Current value of a register.
    pub fn get(&self, reg: u8) -> u8 {
        self.values.get(&reg).copied().unwrap_or(0)
    }

    /// Registers read, in order.
    pub fn reads(&self) -> &[u8] {
        &self.reads
    }

    /// `(register, value)` writes, in order.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    /// Forget logged reads and writes.
    pub fn clear_log(&mut self) {
        self.reads.clear();
        self.writes.clear();
    }

    /// Make every read of `reg` fail with a bus error.
    pub fn fail_reads_from(&mut self, reg: u8) {
        self.fail_reads = Some(reg);
    }

    /// Make every write to `reg` fail with a bus error.
    pub fn fail_writes_to(&mut self, reg: u8) {
        self.fail_writes = Some(reg);
    }

    /// Stop injecting failures.
    pub fn clear_failures(&mut self) {
        self.fail_reads = None;
        self.fail_writes = None;
    }

    /// Number of [`RegisterMap::reset_cache`] calls.
    pub fn cache_resets(&self) -> usize {
        self.cache_resets
    }
}

impl RegisterMap for MockRegmap {
    type Error = ErrorKind;

    fn read(&mut self, reg: u8) -> Result<u8, RegmapError<Self::Error>> {
        self.reads.push(reg);
        if self.fail_reads == Some(reg) {
            return Err(RegmapError::Bus(ErrorKind::Other));
        }
        Ok(self.get(reg))
    }

    fn write(&mut self, reg: u8, val: u8) -> Result<(), RegmapError<Self::Error>> {
        if self.fail_writes == Some(reg) {
            return Err(RegmapError::Bus(ErrorKind::Other));
        }
        self.writes.push((reg, val));
        self.values.insert(reg, val);
        Ok(())
    }

    fn reset_cache(&mut self) -> Result<(), RegmapError<Self::Error>> {
        self.cache_resets = self.cache_resets.saturating_add(1);
        self.values = self.defaults.iter().copied().collect();
        Ok(())
    }
}

/// Error returned by a refusing [`MockRegistrar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationRefused;

/// Records component registrations.
#[derive(Debug, Default)]
pub struct MockRegistrar {
    components: Vec<&'static str>,
    dais: Vec<&'static str>,
    refuse: bool,
}

impl MockRegistrar {
    /// Accepts every registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses every registration.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// Names of registered components.
    pub fn components(&self) -> &[&'static str] {
        &self.components
    }

    /// Names of registered DAIs.
    pub fn dais(&self) -> &[&'static str] {
        &self.dais
    }
}

impl ComponentRegistrar for MockRegistrar {
    type Error = RegistrationRefused;

    fn register_component(
        &mut self,
        component: &ComponentDriver,
        dais: &[DaiDriver],
    ) -> Result<(), Self::Error> {
        if self.refuse {
            return Err(RegistrationRefused);
        }
        self.components.push(component.name);
        self.dais.extend(dais.iter().map(|dai| dai.name));
        Ok(())
    }
}
