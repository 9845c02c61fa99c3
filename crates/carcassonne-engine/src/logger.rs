//! Append-only per-game event log.
//!
//! Each game writes one JSON object per line to `<log_dir>/<game_id>.jsonl`:
//! a `Start` record describing the deal, then every event the game produces.
//! Logging is best effort; a failed write is reported and otherwise ignored.

use crate::protocol::GameId;
use carcassonne_core::{Deck, GameEvent};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Serialize)]
struct StartRecord<'a> {
    event: &'static str,
    game_id: GameId,
    seed: u64,
    player_count: u8,
    deck: &'a Deck,
}

/// Writer for one game's log file
#[derive(Debug)]
pub struct GameLogger {
    game_id: GameId,
    path: PathBuf,
    writer: BufWriter<File>,
}

impl GameLogger {
    /// Open (or append to) the log file of `game_id` inside `dir`
    pub fn create(dir: &Path, game_id: GameId) -> io::Result<Self> {
        let path = dir.join(format!("{game_id}.jsonl"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            game_id,
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record how the game was dealt
    pub fn start(&mut self, seed: u64, player_count: u8, deck: &Deck) {
        let record = StartRecord {
            event: "Start",
            game_id: self.game_id,
            seed,
            player_count,
            deck,
        };
        self.write_or_warn(&record);
    }

    pub fn record(&mut self, event: &GameEvent) {
        self.write_or_warn(event);
    }

    fn write_or_warn<T: Serialize>(&mut self, value: &T) {
        if let Err(e) = self.write_line(value) {
            warn!(
                game_id = self.game_id,
                path = %self.path.display(),
                "Failed to write game log: {}",
                e
            );
        }
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carcassonne_core::TileSet;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let deck = Deck::shuffled(&TileSet::standard(), 3);

        let mut logger = GameLogger::create(dir.path(), 12).unwrap();
        logger.start(3, 2, &deck);
        logger.record(&GameEvent::GameFinished { scores: vec![5, 9] });

        let text = fs::read_to_string(dir.path().join("12.jsonl")).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "Start");
        assert_eq!(lines[0]["seed"], 3);
        assert_eq!(lines[0]["deck"]["tiles"].as_array().unwrap().len(), 71);
        assert_eq!(lines[1]["event"], "GameFinished");
        assert_eq!(lines[1]["scores"], serde_json::json!([5, 9]));
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        for _ in 0..2 {
            let mut logger = GameLogger::create(dir.path(), 1).unwrap();
            logger.record(&GameEvent::GameFinished { scores: vec![] });
        }
        let text = fs::read_to_string(dir.path().join("1.jsonl")).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_missing_directory_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(GameLogger::create(&missing, 1).is_err());
    }
}
