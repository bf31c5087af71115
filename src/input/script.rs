//! Scripted key timelines

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::FrameInput;

use super::ScriptError;

/// Keys the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Left,
    Right,
    Jump,
    Parry,
    Sword,
}

/// Keys held over the half-open interval `[from_ms, until_ms)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from_ms: f64,
    pub until_ms: f64,
    pub keys: Vec<Key>,
}

impl Segment {
    pub fn new(from_ms: f64, until_ms: f64, keys: &[Key]) -> Self {
        Self {
            from_ms,
            until_ms,
            keys: keys.to_vec(),
        }
    }

    fn covers(&self, now: f64) -> bool {
        self.from_ms <= now && now < self.until_ms
    }
}

/// A timeline of held keys, sampled once per frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub segments: Vec<Segment>,
}

impl InputScript {
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let raw = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ScriptError> {
        let script: InputScript = serde_json::from_str(raw)?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        match self
            .segments
            .iter()
            .position(|s| s.until_ms < s.from_ms)
        {
            Some(index) => Err(ScriptError::InvertedSegment { index }),
            None => Ok(()),
        }
    }

    /// Union of keys held by every segment covering `now`
    pub fn sample(&self, now: f64) -> FrameInput {
        let mut input = FrameInput::default();
        for key in self
            .segments
            .iter()
            .filter(|s| s.covers(now))
            .flat_map(|s| s.keys.iter())
        {
            match key {
                Key::Left => input.left = true,
                Key::Right => input.right = true,
                Key::Jump => input.jump = true,
                Key::Parry => input.parry = true,
                Key::Sword => input.sword = true,
            }
        }
        input
    }

    /// Time after which the script holds no more keys
    pub fn end_ms(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.until_ms)
            .fold(0.0, f64::max)
    }

    /// Built-in timeline: head right with a few jumps, then hold parry and
    /// swing the sword as the first turret comes into range.
    pub fn demo() -> Self {
        use Key::*;
        Self {
            segments: vec![
                Segment::new(1000.0, 9000.0, &[Right]),
                Segment::new(2400.0, 2700.0, &[Jump]),
                Segment::new(3600.0, 3900.0, &[Jump]),
                Segment::new(5000.0, 5300.0, &[Jump]),
                Segment::new(6000.0, 9000.0, &[Parry]),
                Segment::new(6200.0, 6300.0, &[Sword]),
                Segment::new(6600.0, 6700.0, &[Sword]),
                Segment::new(7000.0, 7100.0, &[Sword]),
                Segment::new(7400.0, 7500.0, &[Sword]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sampling_unions_overlapping_segments() {
        let script = InputScript {
            segments: vec![
                Segment::new(0.0, 100.0, &[Key::Right]),
                Segment::new(50.0, 60.0, &[Key::Jump, Key::Parry]),
            ],
        };

        let input = script.sample(55.0);
        assert!(input.right && input.jump && input.parry);
        assert!(!input.left && !input.sword);

        // Half-open at the end
        assert_eq!(script.sample(60.0), FrameInput { right: true, ..FrameInput::default() });
        assert_eq!(script.sample(100.0), FrameInput::default());
    }

    #[test]
    fn parses_snake_case_keys() {
        let script = InputScript::from_json(
            r#"{ "segments": [ { "from_ms": 0, "until_ms": 500, "keys": ["left", "sword"] } ] }"#,
        )
        .expect("parse");
        assert_eq!(script.segments[0].keys, vec![Key::Left, Key::Sword]);
        assert_eq!(script.end_ms(), 500.0);
    }

    #[test]
    fn rejects_inverted_segments() {
        let err = InputScript::from_json(
            r#"{ "segments": [
                { "from_ms": 0, "until_ms": 10, "keys": [] },
                { "from_ms": 30, "until_ms": 20, "keys": ["jump"] }
            ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::InvertedSegment { index: 1 }));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = InputScript::from_json(
            r#"{ "segments": [ { "from_ms": 0, "until_ms": 10, "keys": ["dash"] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let json = serde_json::to_string(&InputScript::demo()).expect("serialize");
        file.write_all(json.as_bytes()).expect("write");

        let script = InputScript::from_file(file.path()).expect("load");
        assert_eq!(script, InputScript::demo());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = InputScript::from_file(Path::new("/nowhere/run.json")).unwrap_err();
        assert!(matches!(err, ScriptError::Read { .. }));
        assert!(err.to_string().contains("/nowhere/run.json"));
    }
}
