//! Events produced while stepping a frame

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitCause {
    /// A parried projectile
    Reflected,
    Sword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RespawnReason {
    /// Dropped below the world
    Fell,
    /// Struck by an enemy projectile
    Shot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Jumped {
        /// True when the jump was granted by coyote time rather than ground
        coyote: bool,
    },
    Landed {
        platform: usize,
    },
    EnemyFired {
        enemy: usize,
        projectile: u64,
    },
    Parried {
        projectile: u64,
        /// Enemy the projectile was sent toward, if any was alive
        target: Option<usize>,
    },
    EnemyHit {
        enemy: usize,
        hp_left: u32,
        cause: HitCause,
    },
    EnemyDefeated {
        enemy: usize,
    },
    PlayerHit {
        projectile: u64,
    },
    Respawned {
        reason: RespawnReason,
    },
}

impl GameEvent {
    /// Events worth surfacing above debug level
    pub fn is_notable(&self) -> bool {
        matches!(
            self,
            GameEvent::Parried { .. }
                | GameEvent::EnemyDefeated { .. }
                | GameEvent::Respawned { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&GameEvent::EnemyHit {
            enemy: 2,
            hp_left: 5,
            cause: HitCause::Sword,
        })
        .expect("serialize");
        assert_eq!(json, r#"{"type":"enemy_hit","enemy":2,"hp_left":5,"cause":"sword"}"#);
    }

    #[test]
    fn only_outcome_events_are_notable() {
        assert!(GameEvent::Respawned { reason: RespawnReason::Fell }.is_notable());
        assert!(!GameEvent::Jumped { coyote: false }.is_notable());
    }
}
