//! Protocol module - JSON message types for the host boundary
//!
//! The host (webview bridge, test harness, bot) exchanges line-delimited
//! JSON with the driver: it pulls `Observation` snapshots and drains
//! `EventMessage`s. Field names use snake_case; the grid uses the wire
//! encoding of 0 for empty.

use serde::{Deserialize, Serialize};

use match3_core::SessionSnapshot;
use match3_types::{Coord, Phase, SessionEvent};

/// Wire form of the session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseName {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "one_selected")]
    OneSelected,
    #[serde(rename = "resolving")]
    Resolving,
}

impl From<Phase> for PhaseName {
    fn from(value: Phase) -> Self {
        match value {
            Phase::Idle => PhaseName::Idle,
            Phase::OneSelected => PhaseName::OneSelected,
            Phase::Resolving => PhaseName::Resolving,
        }
    }
}

/// Wire form of a cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u8,
    pub col: u8,
}

impl From<Coord> for CellRef {
    fn from(value: Coord) -> Self {
        Self {
            row: value.row,
            col: value.col,
        }
    }
}

impl From<CellRef> for Coord {
    fn from(value: CellRef) -> Self {
        Coord::new(value.row, value.col)
    }
}

/// Full game state snapshot for the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Row-major grid, 0 for empty, otherwise the tile kind
    pub grid: Vec<Vec<u8>>,
    pub score: u32,
    #[serde(rename = "moves_remaining")]
    pub moves_remaining: u32,
    pub phase: PhaseName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<CellRef>,
    #[serde(rename = "game_over")]
    pub game_over: bool,
    pub seed: u32,
    pub playable: bool,
}

impl Observation {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            grid: snapshot.grid.clone(),
            score: snapshot.score,
            moves_remaining: snapshot.moves_remaining,
            phase: snapshot.phase.into(),
            selected: snapshot.selected.map(CellRef::from),
            game_over: snapshot.game_over,
            seed: snapshot.seed,
            playable: snapshot.playable(),
        }
    }

    /// Encode as one line of JSON (line-delimited stream framing)
    pub fn encode_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    pub fn decode(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json.trim_end())
    }
}

/// Host-facing event, drained FIFO from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventMessage {
    #[serde(rename = "score_changed")]
    ScoreChanged { delta: u32, total: u32, chain: u32 },
    #[serde(rename = "game_over")]
    GameOver {
        #[serde(rename = "final_score")]
        final_score: u32,
    },
}

impl From<SessionEvent> for EventMessage {
    fn from(value: SessionEvent) -> Self {
        match value {
            SessionEvent::ScoreChanged {
                delta,
                total,
                chain,
            } => EventMessage::ScoreChanged {
                delta,
                total,
                chain,
            },
            SessionEvent::GameOver { final_score } => EventMessage::GameOver { final_score },
        }
    }
}

impl EventMessage {
    pub fn encode_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    pub fn decode(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match3_core::Session;
    use match3_types::GameConfig;

    #[test]
    fn test_observation_roundtrip() {
        let session = Session::new(GameConfig::default(), 42).unwrap();
        let obs = Observation::from_snapshot(&session.snapshot());

        let line = obs.encode_line().unwrap();
        assert!(line.ends_with('\n'));
        assert!(!line.trim_end().contains('\n'));

        let decoded = Observation::decode(&line).unwrap();
        assert_eq!(decoded, obs);
    }

    #[test]
    fn test_observation_field_names() {
        let session = Session::new(GameConfig::default(), 42).unwrap();
        let obs = Observation::from_snapshot(&session.snapshot());
        let json = serde_json::to_string(&obs).unwrap();

        assert!(json.contains("\"moves_remaining\":20"));
        assert!(json.contains("\"game_over\":false"));
        assert!(json.contains("\"phase\":\"idle\""));
        // No selection means the field is omitted entirely
        assert!(!json.contains("\"selected\""));
    }

    #[test]
    fn test_event_message_tagging() {
        let ev = EventMessage::ScoreChanged {
            delta: 30,
            total: 130,
            chain: 1,
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"type\":\"score_changed\""));
        assert_eq!(EventMessage::decode(&json).unwrap(), ev);

        let ev = EventMessage::GameOver { final_score: 990 };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"type\":\"game_over\""));
        assert!(json.contains("\"final_score\":990"));
        assert_eq!(EventMessage::decode(&json).unwrap(), ev);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Observation::decode("not json").is_err());
        assert!(EventMessage::decode("{\"type\":\"unknown\"}").is_err());
    }
}
