//! Slider-to-band classification and derived display metrics.
//!
//! Every [`Domain`] owns one literal threshold table. The first threshold
//! with `value < threshold` selects the band; a value at or above every
//! threshold (or NaN) falls into the table's catch-all band. Out-of-range
//! inputs are never rejected, they saturate into the nearest band.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BandError;
use crate::model::Discipline;

/// Ordered `(threshold, label)` pairs plus the catch-all label.
#[derive(Debug, Clone, Copy)]
pub struct BandTable {
    pub cuts: &'static [(f64, &'static str)],
    pub fallback: &'static str,
}

impl BandTable {
    pub fn classify(&self, value: f64) -> &'static str {
        self.cuts
            .iter()
            .find(|(threshold, _)| value < *threshold)
            .map(|(_, label)| *label)
            .unwrap_or(self.fallback)
    }

    /// All labels, lowest band first.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cuts
            .iter()
            .map(|(_, label)| *label)
            .chain(std::iter::once(self.fallback))
    }
}

/// Range of the input control that feeds a domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub unit: &'static str,
}

impl SliderSpec {
    /// Clamp into range and round to the nearest step.
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }
}

static STRESS_STRAIN: BandTable = BandTable {
    cuts: &[(40.0, "Elastic Region"), (70.0, "Plastic Region")],
    fallback: "Near Failure",
};

static SLOPE_STABILITY: BandTable = BandTable {
    cuts: &[(30.0, "Stable"), (45.0, "Marginally Stable")],
    fallback: "Unstable",
};

static TRAFFIC_LEVEL: BandTable = BandTable {
    cuts: &[
        (30.0, "A - Free Flow"),
        (50.0, "C - Stable"),
        (70.0, "D - Approaching Unstable"),
    ],
    fallback: "F - Congested",
};

static WATER_QUALITY: BandTable = BandTable {
    cuts: &[(30.0, "Poor - Unsafe"), (60.0, "Fair - Needs Improvement")],
    fallback: "Excellent - Safe",
};

static AIR_QUALITY: BandTable = BandTable {
    cuts: &[(30.0, "Good"), (60.0, "Moderate")],
    fallback: "Unhealthy",
};

static HEALTH_IMPACT: BandTable = BandTable {
    cuts: &[(30.0, "Minimal"), (60.0, "Moderate")],
    fallback: "Significant",
};

static BEAM_DEFLECTION: BandTable = BandTable {
    cuts: &[],
    fallback: "Beam Deflection",
};

static SOIL_COMPACTION: BandTable = BandTable {
    cuts: &[],
    fallback: "Soil Compaction",
};

static SIGNAL_TIMING: BandTable = BandTable {
    cuts: &[],
    fallback: "Signal Timing",
};

/// Treatment levels above which coagulation, sedimentation, filtration and
/// disinfection switch on.
const TREATMENT_STAGES: [f64; 4] = [20.0, 40.0, 60.0, 80.0];

/// Fixed yellow plus red time of the signal cycle, in seconds.
const SIGNAL_CLEARANCE_S: f64 = 30.0;

/// A visualization whose slider value can be banded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    BeamDeflection,
    StressStrain,
    SoilCompaction,
    SlopeStability,
    TrafficLevel,
    SignalTiming,
    WaterQuality,
    AirQuality,
}

impl Domain {
    pub const ALL: [Domain; 8] = [
        Domain::BeamDeflection,
        Domain::StressStrain,
        Domain::SoilCompaction,
        Domain::SlopeStability,
        Domain::TrafficLevel,
        Domain::SignalTiming,
        Domain::WaterQuality,
        Domain::AirQuality,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Domain::BeamDeflection => "beam-deflection",
            Domain::StressStrain => "stress-strain",
            Domain::SoilCompaction => "soil-compaction",
            Domain::SlopeStability => "slope-stability",
            Domain::TrafficLevel => "traffic-level",
            Domain::SignalTiming => "signal-timing",
            Domain::WaterQuality => "water-quality",
            Domain::AirQuality => "air-quality",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Domain::BeamDeflection => "Beam Deflection",
            Domain::StressStrain => "Stress-Strain Curve",
            Domain::SoilCompaction => "Soil Compaction",
            Domain::SlopeStability => "Slope Stability",
            Domain::TrafficLevel => "Traffic Flow",
            Domain::SignalTiming => "Signal Timing",
            Domain::WaterQuality => "Water Treatment",
            Domain::AirQuality => "Air Pollution",
        }
    }

    pub fn discipline(&self) -> Discipline {
        match self {
            Domain::BeamDeflection | Domain::StressStrain => Discipline::Structural,
            Domain::SoilCompaction | Domain::SlopeStability => Discipline::Geotechnical,
            Domain::TrafficLevel | Domain::SignalTiming => Discipline::Transportation,
            Domain::WaterQuality | Domain::AirQuality => Discipline::Environmental,
        }
    }

    pub fn table(&self) -> &'static BandTable {
        match self {
            Domain::BeamDeflection => &BEAM_DEFLECTION,
            Domain::StressStrain => &STRESS_STRAIN,
            Domain::SoilCompaction => &SOIL_COMPACTION,
            Domain::SlopeStability => &SLOPE_STABILITY,
            Domain::TrafficLevel => &TRAFFIC_LEVEL,
            Domain::SignalTiming => &SIGNAL_TIMING,
            Domain::WaterQuality => &WATER_QUALITY,
            Domain::AirQuality => &AIR_QUALITY,
        }
    }

    pub fn slider(&self) -> SliderSpec {
        let (min, max, default, unit) = match self {
            Domain::BeamDeflection => (0.0, 100.0, 50.0, "kN"),
            Domain::StressStrain => (0.0, 100.0, 30.0, "%"),
            Domain::SoilCompaction => (30.0, 100.0, 60.0, "%"),
            Domain::SlopeStability => (15.0, 60.0, 30.0, "deg"),
            Domain::TrafficLevel => (0.0, 100.0, 50.0, "%"),
            Domain::SignalTiming => (10.0, 60.0, 30.0, "s"),
            Domain::WaterQuality => (0.0, 100.0, 50.0, "%"),
            Domain::AirQuality => (0.0, 100.0, 40.0, "%"),
        };
        SliderSpec {
            min,
            max,
            step: 5.0,
            default,
            unit,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Domain {
    type Err = BandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Domain::ALL
            .into_iter()
            .find(|d| d.id() == wanted)
            .ok_or_else(|| BandError::UnknownDomain(s.to_string()))
    }
}

/// Value of a derived metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Integer(i64),
    Text(&'static str),
    Flag(bool),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{n:.2}"),
            MetricValue::Integer(i) => write!(f, "{i}"),
            MetricValue::Text(t) => f.write_str(t),
            MetricValue::Flag(true) => f.write_str("yes"),
            MetricValue::Flag(false) => f.write_str("no"),
        }
    }
}

/// A named display value computed from the slider input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: &'static str,
    pub value: MetricValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

fn number(name: &'static str, value: f64, unit: &'static str) -> Metric {
    Metric {
        name,
        value: MetricValue::Number(value),
        unit: Some(unit),
    }
}

fn integer(name: &'static str, value: i64, unit: Option<&'static str>) -> Metric {
    Metric {
        name,
        value: MetricValue::Integer(value),
        unit,
    }
}

fn text(name: &'static str, value: &'static str) -> Metric {
    Metric {
        name,
        value: MetricValue::Text(value),
        unit: None,
    }
}

fn flag(name: &'static str, value: bool) -> Metric {
    Metric {
        name,
        value: MetricValue::Flag(value),
        unit: None,
    }
}

/// Output of [`band_for`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandResult {
    pub domain: Domain,
    pub value: f64,
    pub label: &'static str,
    pub metrics: Vec<Metric>,
}

impl BandResult {
    /// Look up a derived metric by name.
    pub fn metric(&self, name: &str) -> Option<&MetricValue> {
        self.metrics
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.value)
    }
}

/// Classify `value` for `domain` and compute its derived metrics.
pub fn band_for(domain: Domain, value: f64) -> BandResult {
    let label = domain.table().classify(value);
    let metrics = match domain {
        Domain::BeamDeflection => {
            let deflection = deflection_cm(value);
            vec![
                number("deflection", deflection, "cm"),
                number("arrow_offset", deflection * 10.0 + 30.0, "px"),
            ]
        }
        Domain::StressStrain => vec![
            text("behaviour", stress_behaviour(value)),
            number("curve_x", 10.0 + value * 0.75, "%"),
            number("curve_y", 90.0 - value * 0.7, "%"),
        ],
        Domain::SoilCompaction => vec![
            number("density", value, "%"),
            number("air_voids", (100.0 - value) / 2.0, "%"),
            integer("bearing_capacity", (value * 2.5).round() as i64, Some("kPa")),
            number("layer_opacity", value / 100.0 * 0.8 + 0.2, "ratio"),
            number("layer_height_factor", 1.0 - value / 100.0 * 0.3, "ratio"),
        ],
        Domain::SlopeStability => vec![
            text("guidance", slope_guidance(value)),
            flag("failure_surface", value > 35.0),
        ],
        Domain::TrafficLevel => vec![
            integer("flow", (value * 20.0).round() as i64, Some("vph")),
            integer("speed", (65.0 - value * 0.4).round() as i64, Some("mph")),
            integer("density", (value * 0.8).round() as i64, Some("vpm")),
            integer("vehicle_count", vehicle_count(value) as i64, None),
        ],
        Domain::SignalTiming => vec![
            number("cycle_length", value + SIGNAL_CLEARANCE_S, "s"),
            integer(
                "green_share",
                (value / (value + SIGNAL_CLEARANCE_S) * 100.0).round() as i64,
                Some("%"),
            ),
            text("active_lamp", active_lamp(value)),
        ],
        Domain::WaterQuality => vec![
            number("turbidity", turbidity_ntu(value), "NTU"),
            number("bacteria", bacteria_cfu(value), "CFU/ml"),
            integer("active_stages", treatment_stages(value) as i64, None),
        ],
        Domain::AirQuality => vec![
            number("pm25", value, "ug/m3"),
            text("health_impact", HEALTH_IMPACT.classify(value)),
            integer("cloud_count", (value / 15.0).floor() as i64 + 1, None),
            number("cloud_opacity", value / 100.0, "ratio"),
            flag("trees_visible", value < 50.0),
        ],
    };

    tracing::trace!(domain = %domain, value, label, "banded");
    BandResult {
        domain,
        value,
        label,
        metrics,
    }
}

/// Same as [`band_for`], resolving the domain from its identifier.
pub fn band_for_id(domain: &str, value: f64) -> Result<BandResult, BandError> {
    Ok(band_for(domain.parse()?, value))
}

/// Simplified midspan deflection of the demo beam, in cm.
pub fn deflection_cm(load_kn: f64) -> f64 {
    load_kn / 100.0 * 5.0
}

/// Residual turbidity after treatment, never below 0.5 NTU.
pub fn turbidity_ntu(treatment_level: f64) -> f64 {
    (10.0 - treatment_level / 10.0).max(0.5)
}

/// Residual bacteria count after treatment, never below zero.
pub fn bacteria_cfu(treatment_level: f64) -> f64 {
    (100.0 - treatment_level).max(0.0)
}

/// Number of water-treatment stages switched on at this level.
pub fn treatment_stages(treatment_level: f64) -> usize {
    TREATMENT_STAGES
        .iter()
        .filter(|&&stage| treatment_level > stage)
        .count()
}

/// Vehicles drawn on the road for a traffic volume.
pub fn vehicle_count(volume: f64) -> usize {
    (volume.max(0.0) / 15.0).floor() as usize + 1
}

fn stress_behaviour(stress: f64) -> &'static str {
    match STRESS_STRAIN.classify(stress) {
        "Elastic Region" => "Material will return to original shape",
        "Plastic Region" => "Permanent deformation occurring",
        _ => "Material approaching breaking point",
    }
}

fn slope_guidance(angle: f64) -> &'static str {
    match SLOPE_STABILITY.classify(angle) {
        "Stable" => "Gravitational forces are safely within soil shear strength limits.",
        "Marginally Stable" => "Consider drainage improvements or slope reinforcement.",
        _ => "High risk of slope failure. Retaining structures or regrading recommended.",
    }
}

fn active_lamp(green_s: f64) -> &'static str {
    if green_s <= 20.0 {
        "green"
    } else if green_s <= 40.0 {
        "yellow"
    } else {
        "red"
    }
}
