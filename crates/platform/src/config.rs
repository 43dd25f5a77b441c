//! Static device configuration
//!
//! Board-level parameters a driver reads once at attach time, e.g. the
//! frequency of the reference clock wired to a codec. On a device-tree
//! system these come from the platform description; board code without one
//! fills a [`StaticProperties`] table.

use heapless::Vec;

/// Source of named device properties.
pub trait DeviceProperties {
    /// Look up a 32-bit property.
    fn read_u32(&self, name: &str) -> Option<u32>;
}

/// Fixed-capacity property table.
///
/// ```rust
/// use platform::{DeviceProperties, StaticProperties};
///
/// let props = StaticProperties::<4>::new()
///     .with("clock-frequency", 49_152_000)
///     .unwrap();
/// assert_eq!(props.read_u32("clock-frequency"), Some(49_152_000));
/// assert_eq!(props.read_u32("missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticProperties<const N: usize> {
    entries: Vec<(&'static str, u32), N>,
}

impl<const N: usize> StaticProperties<N> {
    /// Empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set `name`, replacing an earlier value.
    ///
    /// # Errors
    ///
    /// Returns the entry back if the table is full.
    pub fn insert(&mut self, name: &'static str, value: u32) -> Result<(), (&'static str, u32)> {
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
            return Ok(());
        }
        self.entries.push((name, value))
    }

    /// Builder form of [`insert`][Self::insert].
    pub fn with(mut self, name: &'static str, value: u32) -> Result<Self, (&'static str, u32)> {
        self.insert(name, value)?;
        Ok(self)
    }
}

impl<const N: usize> DeviceProperties for StaticProperties<N> {
    fn read_u32(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|&(_, value)| value)
    }
}
