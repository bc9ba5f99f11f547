use indexmap::IndexMap;

/// One plottable quantity of a shot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub path: &'static [&'static str],
    pub display_name: &'static str,
    pub category: &'static str,
    pub unit: &'static str,
}

impl FieldDescriptor {
    const fn new(
        path: &'static [&'static str],
        display_name: &'static str,
        category: &'static str,
        unit: &'static str,
    ) -> Self {
        Self {
            path,
            display_name,
            category,
            unit,
        }
    }

    /// Dotted identity used by sessions, e.g. `shot.setpoints.flow`.
    #[must_use]
    pub fn key(&self) -> String {
        self.path.join(".")
    }

    /// `"Flow (ml/s)"`, or just the name for unitless fields.
    #[must_use]
    pub fn label_with_unit(&self) -> String {
        if self.unit.is_empty() {
            self.display_name.to_owned()
        } else {
            format!("{} ({})", self.display_name, self.unit)
        }
    }
}

pub const FIELD_REGISTRY: &[FieldDescriptor] = &[
    FieldDescriptor::new(&["shot", "pressure"], "Pressure", "Shot", "bar"),
    FieldDescriptor::new(&["shot", "flow"], "Flow", "Shot", "ml/s"),
    FieldDescriptor::new(&["shot", "weight"], "Weight", "Shot", "g"),
    FieldDescriptor::new(&["shot", "gravimetric_flow"], "Gravimetric Flow", "Shot", "g/s"),
    FieldDescriptor::new(
        &["shot", "setpoints", "pressure"],
        "Pressure Setpoint",
        "Setpoints",
        "bar",
    ),
    FieldDescriptor::new(&["shot", "setpoints", "flow"], "Flow Setpoint", "Setpoints", "ml/s"),
    FieldDescriptor::new(&["shot", "setpoints", "power"], "Power Setpoint", "Setpoints", "%"),
    FieldDescriptor::new(&["sensors", "motor_speed"], "Motor Speed", "Motor", "rpm"),
    FieldDescriptor::new(&["sensors", "motor_power"], "Motor Power", "Motor", "%"),
    FieldDescriptor::new(&["sensors", "motor_current"], "Motor Current", "Motor", "A"),
    FieldDescriptor::new(&["sensors", "motor_temp"], "Motor Temp", "Motor", "°C"),
    FieldDescriptor::new(&["sensors", "motor_position"], "Motor Position", "Motor", "mm"),
    FieldDescriptor::new(&["sensors", "external_1"], "External Temp 1", "Temperature", "°C"),
    FieldDescriptor::new(&["sensors", "external_2"], "External Temp 2", "Temperature", "°C"),
    FieldDescriptor::new(&["sensors", "bar_up"], "Bar Up Temp", "Temperature", "°C"),
    FieldDescriptor::new(&["sensors", "bar_mid_up"], "Bar Mid Up Temp", "Temperature", "°C"),
    FieldDescriptor::new(
        &["sensors", "bar_mid_down"],
        "Bar Mid Down Temp",
        "Temperature",
        "°C",
    ),
    FieldDescriptor::new(&["sensors", "bar_down"], "Bar Down Temp", "Temperature", "°C"),
    FieldDescriptor::new(&["sensors", "tube"], "Tube Temp", "Temperature", "°C"),
    FieldDescriptor::new(&["sensors", "lam_temp"], "LAM Temp", "Temperature", "°C"),
    FieldDescriptor::new(&["sensors", "pressure_sensor"], "Pressure Sensor Raw", "Other", ""),
    FieldDescriptor::new(&["sensors", "bandheater_power"], "Bandheater Power", "Other", "%"),
    FieldDescriptor::new(
        &["sensors", "bandheater_current"],
        "Bandheater Current",
        "Other",
        "A",
    ),
    FieldDescriptor::new(&["sensors", "weight_prediction"], "Weight Prediction", "Other", "g"),
    FieldDescriptor::new(&["sensors", "adc_0"], "ADC 0", "ADC", ""),
    FieldDescriptor::new(&["sensors", "adc_1"], "ADC 1", "ADC", ""),
    FieldDescriptor::new(&["sensors", "adc_2"], "ADC 2", "ADC", ""),
    FieldDescriptor::new(&["sensors", "adc_3"], "ADC 3", "ADC", ""),
];

/// Fields selected when a fresh session starts.
pub const DEFAULT_SELECTION: &[&str] = &["shot.pressure", "shot.flow", "shot.weight"];

const SHOT_PRESET: &[&str] = &[
    "shot.pressure",
    "shot.flow",
    "shot.weight",
    "shot.gravimetric_flow",
    "shot.setpoints.pressure",
    "shot.setpoints.flow",
    "shot.setpoints.power",
];

/// Looks a descriptor up by its dotted key.
#[must_use]
pub fn find_field(key: &str) -> Option<&'static FieldDescriptor> {
    FIELD_REGISTRY
        .iter()
        .find(|descriptor| descriptor.path.iter().copied().eq(key.split('.')))
}

/// Registry grouped by category, in first-appearance order.
#[must_use]
pub fn fields_by_category() -> IndexMap<&'static str, Vec<&'static FieldDescriptor>> {
    let mut groups: IndexMap<&'static str, Vec<&'static FieldDescriptor>> = IndexMap::new();
    for descriptor in FIELD_REGISTRY {
        groups.entry(descriptor.category).or_default().push(descriptor);
    }
    groups
}

/// Quick selection sets offered by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPreset {
    All,
    None,
    Shot,
    Temperatures,
}

impl SelectionPreset {
    /// Whether the preset selects the field with dotted `key`.
    #[must_use]
    pub fn includes(self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::None => false,
            Self::Shot => SHOT_PRESET.contains(&key),
            Self::Temperatures => {
                key.to_lowercase().contains("temp")
                    || key.starts_with("sensors.external")
                    || key.starts_with("sensors.bar")
                    || key == "sensors.tube"
            }
        }
    }
}
