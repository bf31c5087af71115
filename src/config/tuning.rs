//! Gameplay tuning, optionally overridden from a JSON file

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::camera::CameraTuning;
use crate::game::combat::CombatTuning;
use crate::game::physics::MovementTuning;

use super::ConfigError;

/// Every gameplay constant the simulation reads.
///
/// Missing sections or fields in an override file keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub movement: MovementTuning,
    pub combat: CombatTuning,
    pub camera: CameraTuning,
}

impl Tuning {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::TuningRead {
            path: path.display().to_string(),
            source,
        })?;
        let tuning: Tuning = serde_json::from_str(&raw)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the frame step outright
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        let c = &self.combat;
        let checks: [(&'static str, bool); 6] = [
            ("movement.max_fall_speed", m.max_fall_speed > 0.0),
            ("movement.jump_velocity", m.jump_velocity < 0.0),
            ("combat.bullet_radius", c.bullet_radius > 0.0),
            ("combat.parry_radius", c.parry_radius >= 0.0),
            ("camera.viewport_width", self.camera.viewport_width > 0.0),
            ("movement.gravity", m.gravity >= 0.0),
        ];

        match checks.iter().find(|(_, ok)| !ok) {
            Some((field, _)) => Err(ConfigError::InvalidTuning(*field)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "movement": {{ "move_speed": 5.5 }}, "combat": {{ "parry_radius": 64 }} }}"#)
            .expect("write");

        let tuning = Tuning::from_file(file.path()).expect("load");
        assert_eq!(tuning.movement.move_speed, 5.5);
        assert_eq!(tuning.movement.gravity, MovementTuning::default().gravity);
        assert_eq!(tuning.combat.parry_radius, 64.0);
        assert_eq!(tuning.camera, CameraTuning::default());
    }

    #[test]
    fn rejects_non_positive_fall_speed() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "movement": {{ "max_fall_speed": 0 }} }}"#).expect("write");

        let err = Tuning::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning("movement.max_fall_speed")));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = Tuning::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
