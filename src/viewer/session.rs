use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    AxisSide, DEFAULT_SELECTION, FIELD_REGISTRY, SelectedField, SelectionPreset, ShotSettings,
    ShotSlot, StyleDirective, find_field,
};
use crate::error::{ShotError, ShotResult};

/// File suffix appended to saved sessions.
pub const SESSION_SUFFIX: &str = ".session.json";

/// Persistent presentation state of the viewer.
///
/// The field maps always hold one entry per registry field, in registry
/// order; keys outside the registry are dropped when a session is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub shot1_path: Option<PathBuf>,
    pub shot2_path: Option<PathBuf>,
    pub shot1_settings: ShotSettings,
    pub shot2_settings: ShotSettings,
    pub compare_mode: bool,
    pub field_checkboxes: IndexMap<String, bool>,
    pub field_secondary: IndexMap<String, bool>,
    pub field_styles: IndexMap<String, StyleDirective>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            shot1_path: None,
            shot2_path: None,
            shot1_settings: ShotSettings::default(),
            shot2_settings: ShotSettings::default(),
            compare_mode: false,
            field_checkboxes: FIELD_REGISTRY
                .iter()
                .map(|descriptor| {
                    let key = descriptor.key();
                    let selected = DEFAULT_SELECTION.contains(&key.as_str());
                    (key, selected)
                })
                .collect(),
            field_secondary: FIELD_REGISTRY
                .iter()
                .map(|descriptor| (descriptor.key(), false))
                .collect(),
            field_styles: IndexMap::new(),
        }
    }
}

impl SessionState {
    pub fn load(path: &Path) -> ShotResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| ShotError::io(path, err))?;
        let session = Self::from_json_str(&text)?;
        debug!(path = %path.display(), "session loaded");
        Ok(session)
    }

    /// Parses a session document, overlaying it on the defaults.
    pub fn from_json_str(input: &str) -> ShotResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let serde_json::Value::Object(mut root) = value else {
            return Err(ShotError::InvalidSession(
                "session root must be a JSON object".to_owned(),
            ));
        };
        let styles = root.remove("field_styles");
        let mut raw: Self = serde_json::from_value(serde_json::Value::Object(root))?;
        raw.field_styles = parse_styles(styles);
        Ok(raw.normalized())
    }

    /// Writes the session as pretty JSON and returns the path written,
    /// which always ends in [`SESSION_SUFFIX`].
    pub fn save(&self, path: &Path) -> ShotResult<PathBuf> {
        let path = with_session_suffix(path);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|err| ShotError::io(&path, err))?;
        info!(path = %path.display(), "session saved");
        Ok(path)
    }

    fn normalized(self) -> Self {
        let defaults = Self::default();
        let overlay = |loaded: &IndexMap<String, bool>, base: IndexMap<String, bool>| {
            base.into_iter()
                .map(|(key, default)| {
                    let value = loaded.get(&key).copied().unwrap_or(default);
                    (key, value)
                })
                .collect::<IndexMap<_, _>>()
        };

        let dropped = self
            .field_checkboxes
            .keys()
            .chain(self.field_secondary.keys())
            .chain(self.field_styles.keys())
            .filter(|key| find_field(key).is_none())
            .count();
        if dropped > 0 {
            debug!(dropped, "ignoring session entries for unknown fields");
        }

        Self {
            field_checkboxes: overlay(&self.field_checkboxes, defaults.field_checkboxes),
            field_secondary: overlay(&self.field_secondary, defaults.field_secondary),
            field_styles: FIELD_REGISTRY
                .iter()
                .filter_map(|descriptor| {
                    let key = descriptor.key();
                    let style = self.field_styles.get(&key)?.clone();
                    Some((key, style))
                })
                .collect(),
            ..self
        }
    }

    pub fn path(&self, slot: ShotSlot) -> Option<&Path> {
        match slot {
            ShotSlot::First => self.shot1_path.as_deref(),
            ShotSlot::Second => self.shot2_path.as_deref(),
        }
    }

    pub fn set_path(&mut self, slot: ShotSlot, path: Option<PathBuf>) {
        match slot {
            ShotSlot::First => self.shot1_path = path,
            ShotSlot::Second => self.shot2_path = path,
        }
    }

    #[must_use]
    pub fn settings(&self, slot: ShotSlot) -> ShotSettings {
        match slot {
            ShotSlot::First => self.shot1_settings,
            ShotSlot::Second => self.shot2_settings,
        }
    }

    pub fn set_settings(&mut self, slot: ShotSlot, settings: ShotSettings) {
        match slot {
            ShotSlot::First => self.shot1_settings = settings,
            ShotSlot::Second => self.shot2_settings = settings,
        }
    }

    /// Checked fields in registry order, each tagged with its axis.
    #[must_use]
    pub fn selected_fields(&self) -> Vec<SelectedField> {
        FIELD_REGISTRY
            .iter()
            .filter_map(|descriptor| {
                let key = descriptor.key();
                if !self.field_checkboxes.get(&key).copied().unwrap_or(false) {
                    return None;
                }
                let axis = if self.field_secondary.get(&key).copied().unwrap_or(false) {
                    AxisSide::Secondary
                } else {
                    AxisSide::Primary
                };
                Some(SelectedField { descriptor, axis })
            })
            .collect()
    }

    pub fn set_selected(&mut self, key: &str, selected: bool) -> ShotResult<()> {
        let entry = self
            .field_checkboxes
            .get_mut(key)
            .ok_or_else(|| ShotError::UnknownField(key.to_owned()))?;
        *entry = selected;
        Ok(())
    }

    pub fn set_secondary(&mut self, key: &str, secondary: bool) -> ShotResult<()> {
        let entry = self
            .field_secondary
            .get_mut(key)
            .ok_or_else(|| ShotError::UnknownField(key.to_owned()))?;
        *entry = secondary;
        Ok(())
    }

    /// Replaces the whole selection with `preset`.
    pub fn apply_preset(&mut self, preset: SelectionPreset) {
        for (key, selected) in &mut self.field_checkboxes {
            *selected = preset.includes(key);
        }
    }

    pub fn set_style(&mut self, key: &str, style: StyleDirective) -> ShotResult<()> {
        if find_field(key).is_none() {
            return Err(ShotError::UnknownField(key.to_owned()));
        }
        self.field_styles.insert(key.to_owned(), style);
        Ok(())
    }

    pub fn reset_style(&mut self, key: &str) {
        self.field_styles.shift_remove(key);
    }

    #[must_use]
    pub fn style_for(&self, key: &str) -> Option<&StyleDirective> {
        self.field_styles.get(key)
    }
}

/// Style entries are read one by one; an unreadable entry is dropped so the
/// rest of the session still loads.
fn parse_styles(raw: Option<serde_json::Value>) -> IndexMap<String, StyleDirective> {
    let entries = match raw {
        None | Some(serde_json::Value::Null) => return IndexMap::new(),
        Some(serde_json::Value::Object(entries)) => entries,
        Some(other) => {
            warn!(value = %other, "ignoring `field_styles`: not an object");
            return IndexMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(
            |(key, entry)| match serde_json::from_value::<StyleDirective>(entry) {
                Ok(style) => Some((key, style)),
                Err(err) => {
                    warn!(field = %key, %err, "dropping unreadable style entry");
                    None
                }
            },
        )
        .collect()
}

fn with_session_suffix(path: &Path) -> PathBuf {
    if path.to_string_lossy().ends_with(SESSION_SUFFIX) {
        return path.to_path_buf();
    }
    let mut raw = path.as_os_str().to_owned();
    raw.push(SESSION_SUFFIX);
    PathBuf::from(raw)
}
