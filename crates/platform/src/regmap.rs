//! Register map abstraction
//!
//! A codec driver describes its registers once, through [`RegmapConfig`],
//! and talks to the chip through [`RegisterMap`]. Reads of volatile
//! registers always reach the bus; every other register is served from a
//! cache seeded with the reset defaults.
//!
//! [`I2cRegmap`] is the implementation for chips with an 8-bit address /
//! 8-bit value I²C register interface.

use core::marker::PhantomData;

use embedded_hal::i2c::I2c;
use heapless::LinearMap;
use thiserror_no_std::Error;

/// One entry of a chip's register table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDef {
    /// Register address
    pub addr: u8,
    /// Datasheet name
    pub name: &'static str,
    /// Power-on value; `None` for read-only status registers
    pub reset: Option<u8>,
}

impl RegisterDef {
    /// A configuration register with a power-on default.
    pub const fn config(addr: u8, name: &'static str, reset: u8) -> Self {
        Self {
            addr,
            name,
            reset: Some(reset),
        }
    }

    /// A read-only status register.
    pub const fn status(addr: u8, name: &'static str) -> Self {
        Self {
            addr,
            name,
            reset: None,
        }
    }
}

/// Returns `true` if `table` is sorted by strictly ascending address.
///
/// Strict ordering implies address uniqueness. Intended for `const`
/// assertions next to a register table.
// Const evaluation: the loop index stays below `table.len()`.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
pub const fn table_is_strictly_ascending(table: &[RegisterDef]) -> bool {
    let mut i = 1;
    while i < table.len() {
        if table[i].addr <= table[i - 1].addr {
            return false;
        }
        i += 1;
    }
    true
}

/// Static description of a chip's register map.
pub trait RegmapConfig {
    /// Highest register address.
    const MAX_REGISTER: u8;

    /// Register table, ascending by address.
    const REGISTERS: &'static [RegisterDef];

    /// Whether `reg` may be read.
    fn readable(reg: u8) -> bool;

    /// Whether `reg` must bypass the cache.
    fn volatile(reg: u8) -> bool;

    /// Whether `reg` may be written.
    fn writeable(reg: u8) -> bool {
        Self::readable(reg) && !Self::volatile(reg)
    }

    /// Power-on value of `reg`, if it has one.
    fn reset_value(reg: u8) -> Option<u8> {
        Self::REGISTERS
            .iter()
            .find(|def| def.addr == reg)
            .and_then(|def| def.reset)
    }
}

/// Register access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegmapError<E> {
    /// The bus transaction did not complete.
    #[error("register bus transaction failed")]
    Bus(E),
    /// The register is not readable.
    #[error("register {0:#04x} is not readable")]
    NotReadable(u8),
    /// The register is read-only or outside the map.
    #[error("register {0:#04x} is not writeable")]
    NotWriteable(u8),
    /// No room left in the register cache.
    #[error("register cache full while caching {0:#04x}")]
    CacheFull(u8),
}

/// Byte-wide register access.
pub trait RegisterMap {
    /// Bus error type
    type Error: core::fmt::Debug;

    /// Read a register.
    ///
    /// Volatile registers are read from the bus, the rest from the cache.
    fn read(&mut self, reg: u8) -> Result<u8, RegmapError<Self::Error>>;

    /// Write a register and update the cache.
    fn write(&mut self, reg: u8, val: u8) -> Result<(), RegmapError<Self::Error>>;

    /// Drop cached values and reload the power-on defaults.
    ///
    /// Called after the chip has been reset.
    fn reset_cache(&mut self) -> Result<(), RegmapError<Self::Error>>;

    /// Read-modify-write the bits selected by `mask`.
    ///
    /// The write is skipped when the register already holds the value.
    /// Returns whether the register changed.
    fn update_bits(
        &mut self,
        reg: u8,
        mask: u8,
        val: u8,
    ) -> Result<bool, RegmapError<Self::Error>> {
        let orig = self.read(reg)?;
        let new = (orig & !mask) | (val & mask);
        if new == orig {
            return Ok(false);
        }
        self.write(reg, new)?;
        Ok(true)
    }

    /// Set every bit in `bits`.
    fn set_bits(&mut self, reg: u8, bits: u8) -> Result<bool, RegmapError<Self::Error>> {
        self.update_bits(reg, bits, bits)
    }

    /// Clear every bit in `bits`.
    fn clear_bits(&mut self, reg: u8, bits: u8) -> Result<bool, RegmapError<Self::Error>> {
        self.update_bits(reg, bits, 0)
    }
}

impl<M: RegisterMap + ?Sized> RegisterMap for &mut M {
    type Error = M::Error;

    fn read(&mut self, reg: u8) -> Result<u8, RegmapError<Self::Error>> {
        M::read(self, reg)
    }

    fn write(&mut self, reg: u8, val: u8) -> Result<(), RegmapError<Self::Error>> {
        M::write(self, reg, val)
    }

    fn reset_cache(&mut self) -> Result<(), RegmapError<Self::Error>> {
        M::reset_cache(self)
    }

    fn update_bits(
        &mut self,
        reg: u8,
        mask: u8,
        val: u8,
    ) -> Result<bool, RegmapError<Self::Error>> {
        M::update_bits(self, reg, mask, val)
    }
}

/// Maximum number of cached registers.
pub const CACHE_CAPACITY: usize = 128;

/// Cached register map over an 8-bit address / 8-bit value I²C device.
///
/// Reads are one `write_read` per register (1 address byte out, 1 data byte
/// in); sequential multi-byte reads are never issued.
pub struct I2cRegmap<I, C> {
    i2c: I,
    address: u8,
    cache: LinearMap<u8, u8, CACHE_CAPACITY>,
    _config: PhantomData<C>,
}

impl<I: I2c, C: RegmapConfig> I2cRegmap<I, C> {
    /// Bind a register map to the device at `address` on `i2c`.
    ///
    /// No bus traffic happens here; the cache is seeded from the defaults.
    pub fn new(i2c: I, address: u8) -> Result<Self, RegmapError<I::Error>> {
        let mut map = Self {
            i2c,
            address,
            cache: LinearMap::new(),
            _config: PhantomData,
        };
        map.seed_cache()?;
        Ok(map)
    }

    /// 7-bit bus address of the device.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Cached value of `reg`, without touching the bus.
    pub fn cached(&self, reg: u8) -> Option<u8> {
        self.cache.get(&reg).copied()
    }

    /// Write back every cached register that differs from its reset value.
    ///
    /// Restores the configuration after the chip lost power while the cache
    /// was kept.
    pub fn sync(&mut self) -> Result<(), RegmapError<I::Error>> {
        for def in C::REGISTERS {
            let (Some(reset), Some(val)) = (def.reset, self.cached(def.addr)) else {
                continue;
            };
            if val != reset && C::writeable(def.addr) {
                self.bus_write(def.addr, val)?;
            }
        }
        Ok(())
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.i2c
    }

    fn seed_cache(&mut self) -> Result<(), RegmapError<I::Error>> {
        self.cache.clear();
        for def in C::REGISTERS {
            if let Some(reset) = def.reset {
                self.cache_insert(def.addr, reset)?;
            }
        }
        Ok(())
    }

    fn cache_insert(&mut self, reg: u8, val: u8) -> Result<(), RegmapError<I::Error>> {
        self.cache
            .insert(reg, val)
            .map(|_| ())
            .map_err(|_| RegmapError::CacheFull(reg))
    }

    fn bus_read(&mut self, reg: u8) -> Result<u8, RegmapError<I::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(RegmapError::Bus)?;
        let [val] = buf;
        Ok(val)
    }

    fn bus_write(&mut self, reg: u8, val: u8) -> Result<(), RegmapError<I::Error>> {
        self.i2c
            .write(self.address, &[reg, val])
            .map_err(RegmapError::Bus)
    }
}

impl<I: I2c, C: RegmapConfig> RegisterMap for I2cRegmap<I, C> {
    type Error = I::Error;

    fn read(&mut self, reg: u8) -> Result<u8, RegmapError<Self::Error>> {
        if reg > C::MAX_REGISTER || !C::readable(reg) {
            return Err(RegmapError::NotReadable(reg));
        }
        if C::volatile(reg) {
            return self.bus_read(reg);
        }
        if let Some(val) = self.cached(reg) {
            return Ok(val);
        }
        let val = self.bus_read(reg)?;
        self.cache_insert(reg, val)?;
        Ok(val)
    }

    fn write(&mut self, reg: u8, val: u8) -> Result<(), RegmapError<Self::Error>> {
        if reg > C::MAX_REGISTER || !C::writeable(reg) {
            return Err(RegmapError::NotWriteable(reg));
        }
        self.bus_write(reg, val)?;
        if !C::volatile(reg) {
            self.cache_insert(reg, val)?;
        }
        Ok(())
    }

    fn reset_cache(&mut self) -> Result<(), RegmapError<Self::Error>> {
        self.seed_cache()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x48;

    /// Two config registers, a gap, and a volatile status register.
    struct TestMap;

    impl RegmapConfig for TestMap {
        const MAX_REGISTER: u8 = 0x41;
        const REGISTERS: &'static [RegisterDef] = &[
            RegisterDef::config(0x00, "SYSTEM", 0x00),
            RegisterDef::config(0x07, "FILTER_MUTE", 0x80),
            RegisterDef::status(0x40, "CHIP_ID"),
            RegisterDef::status(0x41, "READBACK"),
        ];

        fn readable(reg: u8) -> bool {
            reg <= 0x41
        }

        fn volatile(reg: u8) -> bool {
            reg >= 0x40
        }
    }

    fn map(expectations: &[I2cTransaction]) -> (I2cRegmap<I2cMock, TestMap>, I2cMock) {
        let i2c = I2cMock::new(expectations);
        let handle = i2c.clone();
        (I2cRegmap::new(i2c, ADDR).unwrap(), handle)
    }

    #[test]
    fn table_order_check_rejects_duplicates() {
        let dup = [
            RegisterDef::config(0x01, "A", 0),
            RegisterDef::config(0x01, "B", 0),
        ];
        assert!(!table_is_strictly_ascending(&dup));
        assert!(table_is_strictly_ascending(TestMap::REGISTERS));
    }

    #[test]
    fn cached_register_read_does_not_touch_bus() {
        let (mut regmap, mut handle) = map(&[]);
        assert_eq!(regmap.read(0x07).unwrap(), 0x80);
        assert_eq!(regmap.read(0x07).unwrap(), 0x80);
        handle.done();
    }

    #[test]
    fn volatile_register_is_read_through_every_time() {
        let (mut regmap, mut handle) = map(&[
            I2cTransaction::write_read(ADDR, vec![0x40], vec![0x70]),
            I2cTransaction::write_read(ADDR, vec![0x40], vec![0x71]),
        ]);
        assert_eq!(regmap.read(0x40).unwrap(), 0x70);
        assert_eq!(regmap.read(0x40).unwrap(), 0x71);
        assert_eq!(regmap.cached(0x40), None);
        handle.done();
    }

    #[test]
    fn uncached_register_is_read_once_then_cached() {
        let (mut regmap, mut handle) = map(&[I2cTransaction::write_read(
            ADDR,
            vec![0x09],
            vec![0x5A],
        )]);
        assert_eq!(regmap.read(0x09).unwrap(), 0x5A);
        assert_eq!(regmap.read(0x09).unwrap(), 0x5A);
        handle.done();
    }

    #[test]
    fn write_updates_cache() {
        let (mut regmap, mut handle) = map(&[I2cTransaction::write(ADDR, vec![0x07, 0x81])]);
        regmap.write(0x07, 0x81).unwrap();
        assert_eq!(regmap.cached(0x07), Some(0x81));
        assert_eq!(regmap.read(0x07).unwrap(), 0x81);
        handle.done();
    }

    #[test]
    fn status_register_write_is_refused_without_bus_traffic() {
        let (mut regmap, mut handle) = map(&[]);
        assert_eq!(regmap.write(0x40, 0x00), Err(RegmapError::NotWriteable(0x40)));
        assert_eq!(regmap.write(0x42, 0x00), Err(RegmapError::NotWriteable(0x42)));
        handle.done();
    }

    #[test]
    fn read_beyond_map_is_refused() {
        let (mut regmap, mut handle) = map(&[]);
        assert_eq!(regmap.read(0x42), Err(RegmapError::NotReadable(0x42)));
        handle.done();
    }

    #[test]
    fn update_bits_skips_write_when_unchanged() {
        let (mut regmap, mut handle) = map(&[I2cTransaction::write(ADDR, vec![0x07, 0x81])]);
        assert!(!regmap.clear_bits(0x07, 0x01).unwrap());
        assert!(regmap.set_bits(0x07, 0x01).unwrap());
        assert!(!regmap.set_bits(0x07, 0x01).unwrap());
        handle.done();
    }

    #[test]
    fn failed_write_leaves_cache_untouched() {
        let (mut regmap, mut handle) = map(&[
            I2cTransaction::write(ADDR, vec![0x07, 0x81]).with_error(ErrorKind::Other)
        ]);
        assert_eq!(
            regmap.write(0x07, 0x81),
            Err(RegmapError::Bus(ErrorKind::Other))
        );
        assert_eq!(regmap.cached(0x07), Some(0x80));
        handle.done();
    }

    #[test]
    fn reset_cache_restores_defaults() {
        let (mut regmap, mut handle) = map(&[I2cTransaction::write(ADDR, vec![0x00, 0x01])]);
        regmap.write(0x00, 0x01).unwrap();
        regmap.reset_cache().unwrap();
        assert_eq!(regmap.cached(0x00), Some(0x00));
        handle.done();
    }

    #[test]
    fn sync_writes_back_only_non_default_values() {
        let (mut regmap, mut handle) = map(&[
            I2cTransaction::write(ADDR, vec![0x07, 0x81]),
            I2cTransaction::write(ADDR, vec![0x07, 0x81]),
        ]);
        regmap.write(0x07, 0x81).unwrap();
        regmap.sync().unwrap();
        handle.done();
    }
}
