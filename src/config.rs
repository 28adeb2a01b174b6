//! Input controls and scenario configuration for the three demos.
//!
//! Every demo input is bound to a [`SliderSpec`] that declares its label,
//! bounds, step and default. Parameter structs take their `Default` from those
//! specs, so the CLI, the GUI and scenario files all start from the same
//! values.
//!
//! ## Scenario files
//!
//! A scenario is a TOML file overriding any subset of inputs:
//!
//! ```
//! use sonarlab::config::Scenario;
//!
//! let scenario: Scenario = "[active_space]\nnoise_level = 91\n".parse().unwrap();
//! assert_eq!(scenario.active_space.noise_level, 91.0);
//! assert_eq!(scenario.active_space.source_level, 165.0);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{CYLINDRICAL_SPREADING, SPHERICAL_SPREADING};
use crate::error::{Result, SonarError};

/// Bounded numeric input control
///
/// Values produced by the control are `min + k * step` for integer `k`, never
/// exceeding `max`. The default does not have to sit on that grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl SliderSpec {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Reject values outside the control's bounds.
    pub fn validate(&self, value: f64) -> Result<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(SonarError::OutOfRange {
                control: self.label,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Number of grid steps between `min` and the largest reachable value.
    fn max_steps(&self) -> u64 {
        ((self.max - self.min) / self.step).floor() as u64
    }

    /// Move a value onto the nearest grid point inside the bounds, the way a
    /// slider handle would settle.
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        let k = ((clamped - self.min) / self.step).round() as u64;
        self.min + k.min(self.max_steps()) as f64 * self.step
    }

    /// All values the control can take, in increasing order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.max_steps()).map(move |k| self.min + k as f64 * self.step)
    }
}

impl fmt::Display for SliderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.unit.is_empty() {
            String::new()
        } else {
            format!(" {}", self.unit)
        };
        write!(
            f,
            "{}: {}..={}{} step {} (default {})",
            self.label, self.min, self.max, unit, self.step, self.default
        )
    }
}

pub const AS_SOURCE_LEVEL: SliderSpec = SliderSpec {
    label: "Source Level (SL)",
    unit: "dB",
    min: 0.0,
    max: 200.0,
    step: 5.0,
    default: 165.0,
};

pub const AS_DETECTION_THRESHOLD: SliderSpec = SliderSpec {
    label: "Detection Threshold (DT)",
    unit: "dB",
    min: 0.0,
    max: 60.0,
    step: 5.0,
    default: 30.0,
};

pub const AS_NOISE_LEVEL: SliderSpec = SliderSpec {
    label: "Ambient Noise Level (NL)",
    unit: "dB",
    min: 75.0,
    max: 100.0,
    step: 2.0,
    default: 85.0,
};

pub const AS_PROCESSING_GAIN: SliderSpec = SliderSpec {
    label: "Processing Gain (PG)",
    unit: "dB",
    min: 0.0,
    max: 30.0,
    step: 3.0,
    default: 0.0,
};

pub const AS_GEOMETRIC_SPREADING: SliderSpec = SliderSpec {
    label: "Geometric Spreading",
    unit: "",
    min: CYLINDRICAL_SPREADING,
    max: SPHERICAL_SPREADING,
    step: 5.0,
    default: CYLINDRICAL_SPREADING,
};

pub const SL_DETECTION_THRESHOLD: SliderSpec = SliderSpec {
    label: "Detection threshold (DT)",
    unit: "dB",
    min: 0.0,
    max: 20.0,
    step: 1.0,
    default: 3.0,
};

pub const SL_TRANSMISSION_LOSS: SliderSpec = SliderSpec {
    label: "Propagation Loss (PL)",
    unit: "dB",
    min: 0.0,
    max: 120.0,
    step: 5.0,
    default: 60.0,
};

pub const SL_NOISE_LEVEL: SliderSpec = SliderSpec {
    label: "Noise Level (NL)",
    unit: "dB",
    min: 0.0,
    max: 120.0,
    step: 2.0,
    default: 64.0,
};

pub const SL_PROCESSING_GAIN: SliderSpec = SliderSpec {
    label: "Processing Gain (PG)",
    unit: "dB",
    min: 0.0,
    max: 30.0,
    step: 1.0,
    default: 0.0,
};

pub const WA_FREQUENCY: SliderSpec = SliderSpec {
    label: "Source signal frequency",
    unit: "Hz",
    min: 10.0,
    max: 100.0,
    step: 10.0,
    default: 20.0,
};

pub const WA_DISTANCE: SliderSpec = SliderSpec {
    label: "Receiver distance",
    unit: "m",
    min: 1.0,
    max: 10000.0,
    step: 5.0,
    default: 10.0,
};

/// The three demos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    /// Active space of sperm whale slow clicks
    ActiveSpace,
    /// Source level of the White Bellbird
    SourceLevel,
    /// Wave attenuation through the medium
    Attenuation,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::ActiveSpace, Demo::SourceLevel, Demo::Attenuation];

    pub fn title(self) -> &'static str {
        match self {
            Demo::ActiveSpace => "Active space",
            Demo::SourceLevel => "Source level",
            Demo::Attenuation => "Wave attenuation",
        }
    }

    pub fn controls(self) -> Vec<Control> {
        match self {
            Demo::ActiveSpace => ActiveSpaceInput::ALL
                .into_iter()
                .map(Control::ActiveSpace)
                .collect(),
            Demo::SourceLevel => SourceLevelInput::ALL
                .into_iter()
                .map(Control::SourceLevel)
                .collect(),
            Demo::Attenuation => AttenuationInput::ALL
                .into_iter()
                .map(Control::Attenuation)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveSpaceInput {
    SourceLevel,
    DetectionThreshold,
    NoiseLevel,
    ProcessingGain,
    GeometricSpreading,
}

impl ActiveSpaceInput {
    pub const ALL: [Self; 5] = [
        Self::SourceLevel,
        Self::DetectionThreshold,
        Self::NoiseLevel,
        Self::ProcessingGain,
        Self::GeometricSpreading,
    ];

    pub fn slider(self) -> &'static SliderSpec {
        match self {
            Self::SourceLevel => &AS_SOURCE_LEVEL,
            Self::DetectionThreshold => &AS_DETECTION_THRESHOLD,
            Self::NoiseLevel => &AS_NOISE_LEVEL,
            Self::ProcessingGain => &AS_PROCESSING_GAIN,
            Self::GeometricSpreading => &AS_GEOMETRIC_SPREADING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLevelInput {
    DetectionThreshold,
    TransmissionLoss,
    NoiseLevel,
    ProcessingGain,
}

impl SourceLevelInput {
    pub const ALL: [Self; 4] = [
        Self::DetectionThreshold,
        Self::TransmissionLoss,
        Self::NoiseLevel,
        Self::ProcessingGain,
    ];

    pub fn slider(self) -> &'static SliderSpec {
        match self {
            Self::DetectionThreshold => &SL_DETECTION_THRESHOLD,
            Self::TransmissionLoss => &SL_TRANSMISSION_LOSS,
            Self::NoiseLevel => &SL_NOISE_LEVEL,
            Self::ProcessingGain => &SL_PROCESSING_GAIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttenuationInput {
    Frequency,
    Distance,
}

impl AttenuationInput {
    pub const ALL: [Self; 2] = [Self::Frequency, Self::Distance];

    pub fn slider(self) -> &'static SliderSpec {
        match self {
            Self::Frequency => &WA_FREQUENCY,
            Self::Distance => &WA_DISTANCE,
        }
    }
}

/// Any input of any demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    ActiveSpace(ActiveSpaceInput),
    SourceLevel(SourceLevelInput),
    Attenuation(AttenuationInput),
}

impl Control {
    pub fn slider(self) -> &'static SliderSpec {
        match self {
            Control::ActiveSpace(input) => input.slider(),
            Control::SourceLevel(input) => input.slider(),
            Control::Attenuation(input) => input.slider(),
        }
    }

    pub fn demo(self) -> Demo {
        match self {
            Control::ActiveSpace(_) => Demo::ActiveSpace,
            Control::SourceLevel(_) => Demo::SourceLevel,
            Control::Attenuation(_) => Demo::Attenuation,
        }
    }
}

/// Inputs of the active-space demo (sonar equation at maximum range)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActiveSpaceParams {
    /// Source level in dB re 1 µPa @ 1 m
    pub source_level: f64,
    /// Detection threshold in dB
    pub detection_threshold: f64,
    /// Ambient noise level in dB
    pub noise_level: f64,
    /// Processing gain in dB
    pub processing_gain: f64,
    /// Coefficient `a` in `PL = a·log10(r)`
    pub geometric_spreading: f64,
}

impl ActiveSpaceParams {
    pub fn get(&self, input: ActiveSpaceInput) -> f64 {
        match input {
            ActiveSpaceInput::SourceLevel => self.source_level,
            ActiveSpaceInput::DetectionThreshold => self.detection_threshold,
            ActiveSpaceInput::NoiseLevel => self.noise_level,
            ActiveSpaceInput::ProcessingGain => self.processing_gain,
            ActiveSpaceInput::GeometricSpreading => self.geometric_spreading,
        }
    }

    pub fn set(&mut self, input: ActiveSpaceInput, value: f64) {
        let field = match input {
            ActiveSpaceInput::SourceLevel => &mut self.source_level,
            ActiveSpaceInput::DetectionThreshold => &mut self.detection_threshold,
            ActiveSpaceInput::NoiseLevel => &mut self.noise_level,
            ActiveSpaceInput::ProcessingGain => &mut self.processing_gain,
            ActiveSpaceInput::GeometricSpreading => &mut self.geometric_spreading,
        };
        *field = value;
    }

    pub fn validate(&self) -> Result<()> {
        for input in ActiveSpaceInput::ALL {
            input.slider().validate(self.get(input))?;
        }
        Ok(())
    }
}

impl Default for ActiveSpaceParams {
    fn default() -> Self {
        Self {
            source_level: AS_SOURCE_LEVEL.default,
            detection_threshold: AS_DETECTION_THRESHOLD.default,
            noise_level: AS_NOISE_LEVEL.default,
            processing_gain: AS_PROCESSING_GAIN.default,
            geometric_spreading: AS_GEOMETRIC_SPREADING.default,
        }
    }
}

/// Inputs of the source-level demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceLevelParams {
    pub detection_threshold: f64,
    pub transmission_loss: f64,
    pub noise_level: f64,
    pub processing_gain: f64,
}

impl SourceLevelParams {
    pub fn get(&self, input: SourceLevelInput) -> f64 {
        match input {
            SourceLevelInput::DetectionThreshold => self.detection_threshold,
            SourceLevelInput::TransmissionLoss => self.transmission_loss,
            SourceLevelInput::NoiseLevel => self.noise_level,
            SourceLevelInput::ProcessingGain => self.processing_gain,
        }
    }

    pub fn set(&mut self, input: SourceLevelInput, value: f64) {
        let field = match input {
            SourceLevelInput::DetectionThreshold => &mut self.detection_threshold,
            SourceLevelInput::TransmissionLoss => &mut self.transmission_loss,
            SourceLevelInput::NoiseLevel => &mut self.noise_level,
            SourceLevelInput::ProcessingGain => &mut self.processing_gain,
        };
        *field = value;
    }

    pub fn validate(&self) -> Result<()> {
        for input in SourceLevelInput::ALL {
            input.slider().validate(self.get(input))?;
        }
        Ok(())
    }
}

impl Default for SourceLevelParams {
    fn default() -> Self {
        Self {
            detection_threshold: SL_DETECTION_THRESHOLD.default,
            transmission_loss: SL_TRANSMISSION_LOSS.default,
            noise_level: SL_NOISE_LEVEL.default,
            processing_gain: SL_PROCESSING_GAIN.default,
        }
    }
}

/// Inputs of the wave-attenuation demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttenuationParams {
    pub frequency_hz: f64,
    /// Source-to-receiver distance; must stay >= 1 m so TL is non-negative
    pub distance_m: f64,
}

impl AttenuationParams {
    pub fn get(&self, input: AttenuationInput) -> f64 {
        match input {
            AttenuationInput::Frequency => self.frequency_hz,
            AttenuationInput::Distance => self.distance_m,
        }
    }

    pub fn set(&mut self, input: AttenuationInput, value: f64) {
        match input {
            AttenuationInput::Frequency => self.frequency_hz = value,
            AttenuationInput::Distance => self.distance_m = value,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for input in AttenuationInput::ALL {
            input.slider().validate(self.get(input))?;
        }
        Ok(())
    }
}

impl Default for AttenuationParams {
    fn default() -> Self {
        Self {
            frequency_hz: WA_FREQUENCY.default,
            distance_m: WA_DISTANCE.default,
        }
    }
}

/// Inputs for all three demos
///
/// Loaded from TOML; any missing section or key keeps its slider default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub active_space: ActiveSpaceParams,
    pub source_level: SourceLevelParams,
    pub attenuation: AttenuationParams,
}

impl Scenario {
    /// Read and validate a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let scenario: Scenario = text.parse()?;
        log::info!("Loaded scenario from {}", path.display());
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        self.active_space.validate()?;
        self.source_level.validate()?;
        self.attenuation.validate()
    }

    pub fn get(&self, control: Control) -> f64 {
        match control {
            Control::ActiveSpace(input) => self.active_space.get(input),
            Control::SourceLevel(input) => self.source_level.get(input),
            Control::Attenuation(input) => self.attenuation.get(input),
        }
    }

    pub fn set(&mut self, control: Control, value: f64) {
        match control {
            Control::ActiveSpace(input) => self.active_space.set(input, value),
            Control::SourceLevel(input) => self.source_level.set(input, value),
            Control::Attenuation(input) => self.attenuation.set(input, value),
        }
    }
}

impl FromStr for Scenario {
    type Err = SonarError;

    fn from_str(s: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(s)?;
        scenario.validate()?;
        Ok(scenario)
    }
}
