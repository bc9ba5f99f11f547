use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::core::field::Record;
use crate::core::series::{ActualGoalSeries, build_actual_goal_series, build_series, raw_times};
use crate::core::time::{infer_time_scale, normalize_elapsed};
use crate::core::trim::trim_index;
use crate::error::{ShotError, ShotResult};

pub const UNKNOWN_PROFILE: &str = "Unknown Profile";

/// One loaded extraction log. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    source: Option<PathBuf>,
    profile_name: String,
    shot_time: Option<f64>,
    records: Vec<Record>,
    elapsed_s: Vec<f64>,
    time_scale: f64,
}

impl Shot {
    /// Reads and parses a shot document from disk.
    pub fn load(path: impl AsRef<Path>) -> ShotResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| ShotError::io(path, err))?;
        let mut shot = Self::from_json_str(&raw)?;
        shot.source = Some(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            records = shot.records.len(),
            time_scale = shot.time_scale,
            "loaded shot"
        );
        Ok(shot)
    }

    pub fn from_json_str(input: &str) -> ShotResult<Self> {
        let document: Value = serde_json::from_str(input)?;
        Self::from_document(document)
    }

    /// Builds a shot from an already parsed document.
    ///
    /// The whole document is rejected when the root is not an object, `data`
    /// is missing or not an array, or any element of `data` is not an object.
    pub fn from_document(document: Value) -> ShotResult<Self> {
        let Value::Object(mut root) = document else {
            return Err(ShotError::InvalidDocument(
                "document root must be a JSON object".to_owned(),
            ));
        };

        let data = match root.remove("data") {
            Some(Value::Array(data)) => data,
            _ => {
                return Err(ShotError::InvalidDocument(
                    "top-level key `data` must be a list".to_owned(),
                ));
            }
        };

        let mut records = Vec::with_capacity(data.len());
        for (index, entry) in data.into_iter().enumerate() {
            match entry {
                Value::Object(fields) => records.push(Record::new(fields)),
                _ => {
                    return Err(ShotError::InvalidDocument(format!(
                        "record {index} in `data` must be an object"
                    )));
                }
            }
        }

        let profile_name = root
            .get("profile_name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_PROFILE)
            .to_owned();
        let shot_time = root.get("time").and_then(Value::as_f64);

        let raw = raw_times(&records);
        let time_scale = infer_time_scale(&raw);
        let elapsed_s = normalize_elapsed(&raw);

        Ok(Self {
            source: None,
            profile_name,
            shot_time,
            records,
            elapsed_s,
            time_scale,
        })
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// Epoch seconds recorded at the document root, if any.
    #[must_use]
    pub fn shot_time(&self) -> Option<f64> {
        self.shot_time
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Zero-based elapsed seconds, one per record.
    #[must_use]
    pub fn elapsed_seconds(&self) -> &[f64] {
        &self.elapsed_s
    }

    /// Multiplier that was applied to raw time deltas.
    #[must_use]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Elapsed time of the last sample; `0.0` for an empty shot.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.elapsed_s.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn series<S: AsRef<str>>(&self, path: &[S]) -> Vec<f64> {
        build_series(&self.records, path)
    }

    #[must_use]
    pub fn actual_goal_series(&self) -> ActualGoalSeries {
        build_actual_goal_series(&self.records)
    }

    #[must_use]
    pub fn trim_index(&self, duration_bound: f64) -> usize {
        trim_index(&self.elapsed_s, duration_bound)
    }

    /// `"{profile} – {local date time}"`, or the bare profile name when the
    /// document has no (or a zero) timestamp.
    #[must_use]
    pub fn title(&self) -> String {
        match self.local_time() {
            Some(time) => format!(
                "{} – {}",
                self.profile_name,
                time.format("%Y-%m-%d %H:%M:%S")
            ),
            None => self.profile_name.clone(),
        }
    }

    /// Title of the actuals-versus-goals report: like [`Shot::title`] but
    /// spelling out `Unknown Time` instead of dropping the timestamp.
    #[must_use]
    pub fn report_title(&self) -> String {
        let time = self
            .shot_time
            .filter(|time| time.is_finite())
            .and_then(epoch_seconds_to_local)
            .map_or_else(
                || "Unknown Time".to_owned(),
                |time| time.format("%Y-%m-%d %H:%M:%S").to_string(),
            );
        format!("{} – {time}", self.profile_name)
    }

    /// File stem of the source, e.g. `07_27_36.shot`.
    #[must_use]
    pub fn short_name(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.profile_name.clone())
    }

    /// Compact label for slot pickers: local date and minute, else the stem.
    #[must_use]
    pub fn date_label(&self) -> String {
        match self.local_time() {
            Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
            None => self.short_name(),
        }
    }

    fn local_time(&self) -> Option<DateTime<Local>> {
        let seconds = self.shot_time.filter(|time| *time != 0.0 && time.is_finite())?;
        epoch_seconds_to_local(seconds)
    }
}

pub(crate) fn epoch_seconds_to_local(seconds: f64) -> Option<DateTime<Local>> {
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).map(|utc| utc.with_timezone(&Local))
}
