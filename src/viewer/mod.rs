//! Presentation state: the two shot slots plus the saved session, and the
//! single place that turns them into a [`PlotModel`].

mod discover;
mod session;

use std::path::Path;

use tracing::{info, warn};

pub use discover::{DiscoveredShot, SHOT_SUFFIX, discover_recent_shots};
pub use session::{SESSION_SUFFIX, SessionState};

use crate::core::{
    NO_DATA_TITLE, PlotModel, Readout, Shot, ShotSettings, ShotSlot, assemble_comparison,
    assemble_single,
};
use crate::error::ShotResult;

#[derive(Debug, Clone, Default)]
pub struct Viewer {
    shot1: Option<Shot>,
    shot2: Option<Shot>,
    session: SessionState,
}

impl Viewer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a viewer from a session. Shots that are missing or fail to
    /// load leave their slot empty.
    #[must_use]
    pub fn from_session(session: SessionState) -> Self {
        let mut viewer = Self {
            shot1: None,
            shot2: None,
            session,
        };
        for slot in [ShotSlot::First, ShotSlot::Second] {
            let Some(path) = viewer.session.path(slot).map(Path::to_path_buf) else {
                continue;
            };
            if !path.exists() {
                warn!(path = %path.display(), "session shot not found; slot left empty");
                viewer.session.set_path(slot, None);
                continue;
            }
            match Shot::load(&path) {
                Ok(shot) => *viewer.slot_mut(slot) = Some(shot),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to load session shot");
                    viewer.session.set_path(slot, None);
                }
            }
        }
        viewer
    }

    pub fn open_session(path: &Path) -> ShotResult<Self> {
        Ok(Self::from_session(SessionState::load(path)?))
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    #[must_use]
    pub fn shot(&self, slot: ShotSlot) -> Option<&Shot> {
        match slot {
            ShotSlot::First => self.shot1.as_ref(),
            ShotSlot::Second => self.shot2.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: ShotSlot) -> &mut Option<Shot> {
        match slot {
            ShotSlot::First => &mut self.shot1,
            ShotSlot::Second => &mut self.shot2,
        }
    }

    /// Loads a shot into `slot`, resetting that slot's settings. On failure
    /// the slot keeps its previous content.
    pub fn load_slot(&mut self, slot: ShotSlot, path: &Path) -> ShotResult<&Shot> {
        let shot = Shot::load(path)?;
        self.session.set_path(slot, Some(path.to_path_buf()));
        self.session.set_settings(slot, ShotSettings::default());
        Ok(&*self.slot_mut(slot).insert(shot))
    }

    /// Puts an already parsed shot into `slot`.
    pub fn set_shot(&mut self, slot: ShotSlot, shot: Shot) {
        self.session.set_path(slot, shot.source().map(Path::to_path_buf));
        self.session.set_settings(slot, ShotSettings::default());
        *self.slot_mut(slot) = Some(shot);
    }

    pub fn clear_slot(&mut self, slot: ShotSlot) {
        *self.slot_mut(slot) = None;
        self.session.set_path(slot, None);
        self.session.set_settings(slot, ShotSettings::default());
    }

    /// Fills both slots with the two most recent shots in `dir`.
    ///
    /// Returns how many slots were filled. Files that fail to load are
    /// skipped with a warning.
    pub fn auto_load_recent(&mut self, dir: &Path) -> ShotResult<usize> {
        let recent = discover_recent_shots(dir)?;
        let mut filled = 0;
        for (slot, found) in [ShotSlot::First, ShotSlot::Second].into_iter().zip(&recent) {
            match self.load_slot(slot, &found.path) {
                Ok(_) => filled += 1,
                Err(err) => {
                    warn!(path = %found.path.display(), error = %err, "failed to load recent shot");
                }
            }
        }
        info!(dir = %dir.display(), filled, "auto-loaded recent shots");
        Ok(filled)
    }

    /// Current chart content.
    ///
    /// Compare mode with both slots filled overlays the two shots; otherwise
    /// slot one is shown, or slot two when slot one is empty.
    #[must_use]
    pub fn plot_model(&self) -> PlotModel {
        let session = &self.session;
        let fields = session.selected_fields();

        match (&self.shot1, &self.shot2) {
            (None, None) => PlotModel::empty(NO_DATA_TITLE),
            (Some(first), Some(second)) if session.compare_mode => assemble_comparison(
                (first, session.shot1_settings),
                (second, session.shot2_settings),
                &fields,
                &session.field_styles,
            ),
            (Some(first), _) => {
                assemble_single(first, session.shot1_settings, &fields, &session.field_styles)
            }
            (None, Some(second)) => {
                assemble_single(second, session.shot2_settings, &fields, &session.field_styles)
            }
        }
    }

    #[must_use]
    pub fn readout(&self, time: f64) -> Readout {
        self.plot_model().readout(time)
    }
}
