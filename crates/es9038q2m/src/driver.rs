//! ES9038Q2M device instance
//!
//! Communicates with the chip through a [`RegisterMap`], normally an
//! [`I2cRegmap`] over a blocking `embedded_hal::i2c::I2c` bus.
//!
//! The audio stream itself is delivered over I²S by the host's serial audio
//! peripheral; that path does not go through this driver. The driver only
//! programs the serial format, the master-mode clock generator, mute and
//! volume.
//!
//! # Lifecycle
//!
//! ```text
//! probe ──► set_fmt ──► hw_params ──► mute_stream(false) ──► … ──► drop
//!   │          ▲            │
//!   │          └────────────┘  (renegotiated per stream)
//!   └─ chip id check, soft reset, registration
//! ```

use embedded_hal::i2c::I2c;
use platform::{
    BiasLevel, ClockRole, ComponentRegistrar, ControlValues, DaiFormat, DaiOps, DeviceProperties,
    FrameFormat, HwParams, I2cAddr, I2cRegmap, MixerControl, RegisterMap, SampleRateHz, SampleWidth,
    StreamDirection,
};

use crate::clock_math::{nco_ratio, nco_writes};
use crate::controls::{CONTROLS, MASTER_PLAYBACK_VOLUME, MUTE_SWITCH, VOLUME_TLV};
use crate::dai::{COMPONENT, DAI};
use crate::error::Error;
use crate::registers::*;

/// Property holding the reference clock frequency in Hz.
pub const CLOCK_FREQUENCY_PROPERTY: &str = "clock-frequency";

/// Channel count of the only stream.
const CHANNELS: u8 = 2;

/// ES9038Q2M DAC driver
pub struct Es9038q2m<M> {
    regmap: M,
    address: u8,
    clock_frequency: u32,
    fmt: Option<DaiFormat>,
    rate: Option<SampleRateHz>,
}

impl<I: I2c> Es9038q2m<I2cRegmap<I, Es9038q2mRegisters>> {
    /// Bring up the chip at `address` on `i2c`.
    ///
    /// Reads the reference clock from `properties`, verifies the chip id,
    /// soft-resets the chip and registers the component with `registrar`.
    /// Nothing is written to the chip unless the id matches.
    pub fn probe<P, R>(
        i2c: I,
        address: u8,
        properties: &P,
        registrar: &mut R,
    ) -> Result<Self, Error<I::Error>>
    where
        P: DeviceProperties + ?Sized,
        R: ComponentRegistrar,
    {
        let clock_frequency = read_clock_frequency::<_, I::Error>(properties)?;
        let address = I2cAddr::try_new(address)
            .map_err(|_| Error::InvalidArgument("reserved I2C address"))?
            .get();
        let regmap = I2cRegmap::new(i2c, address)?;
        Self::init(regmap, address, clock_frequency, registrar)
    }

    /// Rewrite every non-default register from the cache.
    ///
    /// For use after the chip lost power while the instance was kept.
    pub fn resume(&mut self) -> Result<(), Error<I::Error>> {
        self.regmap.sync()?;
        Ok(())
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.regmap.release()
    }
}

impl<M: RegisterMap> Es9038q2m<M> {
    /// Same as [`probe`][Es9038q2m::probe] over an already constructed register map.
    ///
    /// `address` is only recorded for reporting.
    pub fn attach<P, R>(
        regmap: M,
        address: u8,
        properties: &P,
        registrar: &mut R,
    ) -> Result<Self, Error<M::Error>>
    where
        P: DeviceProperties + ?Sized,
        R: ComponentRegistrar,
    {
        let clock_frequency = read_clock_frequency::<_, M::Error>(properties)?;
        Self::init(regmap, address, clock_frequency, registrar)
    }

    fn init<R: ComponentRegistrar>(
        mut regmap: M,
        address: u8,
        clock_frequency: u32,
        registrar: &mut R,
    ) -> Result<Self, Error<M::Error>> {
        let chip_id = match regmap.read(REG_CHIP_ID) {
            Ok(id) => id,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::error!("ES9038Q2M: failed to read chip ID");
                #[cfg(feature = "tracing")]
                tracing::error!(address, "ES9038Q2M: failed to read chip ID");
                return Err(err.into());
            }
        };

        if !is_es9038q2m(chip_id) {
            #[cfg(feature = "defmt")]
            defmt::error!("ES9038Q2M: unexpected chip ID {=u8:#x}", chip_id);
            #[cfg(feature = "tracing")]
            tracing::error!(chip_id, "ES9038Q2M: unexpected chip ID");
            return Err(Error::ChipIdMismatch { found: chip_id });
        }

        #[cfg(feature = "defmt")]
        defmt::info!("ES9038Q2M DAC initialized at address {=u8:#x}", address);
        #[cfg(feature = "tracing")]
        tracing::info!(address, "ES9038Q2M DAC initialized");

        regmap.write(REG_SYSTEM, SYSTEM_SOFT_RESET)?;
        regmap.reset_cache()?;

        if registrar.register_component(&COMPONENT, &[DAI]).is_err() {
            #[cfg(feature = "defmt")]
            defmt::error!("ES9038Q2M: failed to register component");
            #[cfg(feature = "tracing")]
            tracing::error!("ES9038Q2M: failed to register component");
            return Err(Error::Registration);
        }

        Ok(Self {
            regmap,
            address,
            clock_frequency,
            fmt: None,
            rate: None,
        })
    }

    /// Negotiate clocking role and serial frame format.
    ///
    /// Only whole-codec master or slave is supported, with I²S, left- or
    /// right-justified framing. The request is rejected before any register
    /// is touched.
    pub fn set_fmt(&mut self, fmt: DaiFormat) -> Result<(), Error<M::Error>> {
        let master = match fmt.role {
            ClockRole::CodecMaster => MASTER_MODE_ENABLE,
            ClockRole::CodecSlave => 0,
            ClockRole::CodecBitclockMaster | ClockRole::CodecFrameMaster => {
                return Err(Error::InvalidArgument("mixed clock roles"));
            }
        };
        let mode = match fmt.format {
            FrameFormat::I2s => INPUT_SEL_MODE_I2S,
            FrameFormat::LeftJustified => INPUT_SEL_MODE_LJ,
            FrameFormat::RightJustified => INPUT_SEL_MODE_RJ,
            FrameFormat::DspA | FrameFormat::DspB | FrameFormat::Ac97 | FrameFormat::Pdm => {
                return Err(Error::InvalidArgument("unsupported frame format"));
            }
        };

        self.regmap
            .update_bits(REG_MASTER_MODE, MASTER_MODE_ENABLE, master)?;
        // Serial input, automatic input detection off
        self.regmap.update_bits(
            REG_INPUT_SEL,
            INPUT_SEL_AUTO_MASK | INPUT_SEL_SOURCE_MASK,
            0,
        )?;
        self.regmap
            .update_bits(REG_INPUT_SEL, INPUT_SEL_MODE_MASK, mode)?;

        self.fmt = Some(fmt);
        Ok(())
    }

    /// Program sample width and rate for a stream.
    ///
    /// Soft start is disabled for the duration of the update. A bus failure
    /// part-way leaves it disabled; the recorded rate only changes once every
    /// write went through.
    pub fn hw_params(&mut self, params: &HwParams) -> Result<(), Error<M::Error>> {
        let width = SampleWidth::from_bits(params.width)
            .ok_or(Error::InvalidArgument("unsupported sample width"))?;
        let rate = SampleRateHz::new(params.rate)
            .map_err(|_| Error::InvalidArgument("sample rate out of range"))?;
        if params.channels != CHANNELS {
            return Err(Error::InvalidArgument("unsupported channel count"));
        }
        // Slave mode would need the rate derived from the incoming clocks.
        if !matches!(
            self.fmt,
            Some(DaiFormat {
                role: ClockRole::CodecMaster,
                ..
            })
        ) {
            return Err(Error::UnsupportedClocking);
        }
        let nco = nco_ratio(rate.get(), self.clock_frequency)
            .ok_or(Error::InvalidArgument("zero reference clock"))?;
        let width_bits = match width {
            SampleWidth::Bits16 => INPUT_SEL_BITS_16,
            SampleWidth::Bits24 => INPUT_SEL_BITS_24,
            SampleWidth::Bits32 => INPUT_SEL_BITS_32,
        };

        self.regmap.clear_bits(REG_SOFT_START, SOFT_START_ENABLE)?;
        self.regmap
            .update_bits(REG_INPUT_SEL, INPUT_SEL_BITS_MASK, width_bits)?;
        self.regmap.clear_bits(REG_MASTER_MODE, MASTER_MODE_128FS)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ES9038Q2M: {=u32} Hz, NCO {=u32}", rate.get(), nco);
        #[cfg(feature = "tracing")]
        tracing::debug!(rate = rate.get(), nco, "ES9038Q2M: programming NCO");

        for (reg, byte) in nco_writes(nco) {
            self.regmap.write(reg, byte)?;
        }
        self.regmap.set_bits(REG_SOFT_START, SOFT_START_ENABLE)?;

        self.rate = Some(rate);
        Ok(())
    }

    /// Mute or unmute the output.
    ///
    /// The chip only plays back, so `direction` does not select anything.
    pub fn mute_stream(
        &mut self,
        mute: bool,
        _direction: StreamDirection,
    ) -> Result<(), Error<M::Error>> {
        let bits = if mute { FILTER_MUTE_MUTE } else { 0 };
        self.regmap
            .update_bits(REG_FILTER_MUTE, FILTER_MUTE_MUTE, bits)?;
        Ok(())
    }

    /// Accept a bias level change. Power sequencing is left to the board.
    pub fn set_bias_level(&mut self, _level: BiasLevel) -> Result<(), Error<M::Error>> {
        Ok(())
    }

    // ── Controls ────────────────────────────────────────────────────────────

    /// Look up a control by name.
    pub fn control(name: &str) -> Option<&'static MixerControl> {
        CONTROLS.iter().find(|control| control.name == name)
    }

    /// Read a control by name.
    pub fn control_get(&mut self, name: &str) -> Result<ControlValues, Error<M::Error>> {
        let control = Self::control(name).ok_or(Error::InvalidArgument("unknown control"))?;
        Ok(control.get(&mut self.regmap)?)
    }

    /// Write a control by name. Returns whether any register changed.
    pub fn control_put(&mut self, name: &str, values: &[u8]) -> Result<bool, Error<M::Error>> {
        let control = Self::control(name).ok_or(Error::InvalidArgument("unknown control"))?;
        Ok(control.put(&mut self.regmap, values)?)
    }

    /// Current `(left, right)` volume, 0 (mute) to 255 (0 dB).
    pub fn volume(&mut self) -> Result<(u8, u8), Error<M::Error>> {
        let values = MASTER_PLAYBACK_VOLUME.get(&mut self.regmap)?;
        match *values.as_slice() {
            [left, right] => Ok((left, right)),
            _ => Err(Error::InvalidArgument("volume channel count")),
        }
    }

    /// Set `(left, right)` volume. Returns whether any register changed.
    pub fn set_volume(&mut self, left: u8, right: u8) -> Result<bool, Error<M::Error>> {
        Ok(MASTER_PLAYBACK_VOLUME.put(&mut self.regmap, &[left, right])?)
    }

    /// Current `(left, right)` gain in 0.01 dB.
    pub fn volume_db(&mut self) -> Result<(i32, i32), Error<M::Error>> {
        let (left, right) = self.volume()?;
        Ok((VOLUME_TLV.db_at(left), VOLUME_TLV.db_at(right)))
    }

    /// Whether the mute switch is on.
    pub fn mute_switch(&mut self) -> Result<bool, Error<M::Error>> {
        let values = MUTE_SWITCH.get(&mut self.regmap)?;
        Ok(values.first().is_some_and(|&v| v != 0))
    }

    /// Flip the mute switch. Returns whether the register changed.
    pub fn set_mute_switch(&mut self, on: bool) -> Result<bool, Error<M::Error>> {
        Ok(MUTE_SWITCH.put(&mut self.regmap, &[u8::from(on)])?)
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    /// 7-bit bus address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Reference clock frequency in Hz.
    pub fn clock_frequency(&self) -> u32 {
        self.clock_frequency
    }

    /// Negotiated DAI format, if any.
    pub fn format(&self) -> Option<DaiFormat> {
        self.fmt
    }

    /// Rate programmed by the last successful [`hw_params`][Self::hw_params].
    pub fn rate(&self) -> Option<SampleRateHz> {
        self.rate
    }

    /// Underlying register map.
    pub fn regmap(&self) -> &M {
        &self.regmap
    }

    /// Consume the driver and return the register map.
    pub fn into_regmap(self) -> M {
        self.regmap
    }
}

impl<M: RegisterMap> DaiOps for Es9038q2m<M> {
    type Error = Error<M::Error>;

    fn set_fmt(&mut self, fmt: DaiFormat) -> Result<(), Self::Error> {
        Es9038q2m::set_fmt(self, fmt)
    }

    fn hw_params(&mut self, params: &HwParams) -> Result<(), Self::Error> {
        Es9038q2m::hw_params(self, params)
    }

    fn mute_stream(&mut self, mute: bool, direction: StreamDirection) -> Result<(), Self::Error> {
        Es9038q2m::mute_stream(self, mute, direction)
    }
}

fn read_clock_frequency<P, E>(properties: &P) -> Result<u32, Error<E>>
where
    P: DeviceProperties + ?Sized,
{
    let Some(clock_frequency) = properties.read_u32(CLOCK_FREQUENCY_PROPERTY) else {
        #[cfg(feature = "defmt")]
        defmt::error!("ES9038Q2M: failed to retrieve clock frequency");
        #[cfg(feature = "tracing")]
        tracing::error!("ES9038Q2M: failed to retrieve clock frequency");
        return Err(Error::MissingConfig(CLOCK_FREQUENCY_PROPERTY));
    };
    if clock_frequency == 0 {
        return Err(Error::InvalidArgument("zero reference clock"));
    }

    #[cfg(feature = "defmt")]
    defmt::info!("ES9038Q2M: clock frequency {=u32} Hz", clock_frequency);
    #[cfg(feature = "tracing")]
    tracing::info!(clock_frequency, "ES9038Q2M: reference clock");

    Ok(clock_frequency)
}
