use alloc::format;
use alloc::string::{String, ToString};
use rand::prelude::*;

use crate::*;

enum Action {
    Reveal,
    Flag,
}

/// Owns at most one active round and turns line-oriented commands into
/// textual responses. No failure escapes as an error: everything degrades
/// to a message and the caller's loop keeps going.
pub struct Manager {
    round: Option<GameRound>,
    seeds: SmallRng,
}

impl Manager {
    pub fn new(seed: u64) -> Self {
        Self {
            round: None,
            seeds: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn parse_input(&mut self, message: &str) -> String {
        // a finished round is stale: the next command starts from a clean slate
        if self.round.as_ref().is_some_and(GameRound::is_ended) {
            log::debug!("dropping finished round");
            self.round = None;
        }

        let message = message.trim();
        if let Some(difficulty) = message.strip_prefix("new ") {
            return self.new_round(difficulty.trim());
        }
        if let Some(coords) = message.strip_prefix("reveal ") {
            return self.dispatch(coords, Action::Reveal);
        }
        if let Some(coords) = message.strip_prefix("flag ") {
            return self.dispatch(coords, Action::Flag);
        }
        if message == "help" {
            return String::new();
        }
        "Unrecognized command. Use 'help' for a list of commands.".to_string()
    }

    fn new_round(&mut self, difficulty: &str) -> String {
        match difficulty.parse::<Difficulty>() {
            Ok(difficulty) => {
                let round = GameRound::new(difficulty.config(), self.seeds.random());
                let preview = round.preview();
                self.round = Some(round);
                preview
            }
            Err(_) => {
                format!("Error: Unknown difficulty '{difficulty}'. Use easy, medium or hard.")
            }
        }
    }

    fn dispatch(&mut self, coords: &str, action: Action) -> String {
        let Some(round) = self.round.as_mut() else {
            return "Please use 'new' to start a round of minesweeper first.".to_string();
        };
        let Some(coords) = parse_coords(coords) else {
            return "Error: Could not parse value for x or y.".to_string();
        };

        let result = match action {
            Action::Reveal => round.reveal(coords).map(|_| ()),
            Action::Flag => round.flag(coords).map(|_| ()),
        };
        match result {
            Ok(()) => format!("{round}"),
            Err(GameError::OutOfBounds) => {
                "Error: Value for x or y is out of bounds.".to_string()
            }
            Err(GameError::BoardNotGenerated) => {
                "You have to reveal at least one field before you can use flag.".to_string()
            }
            Err(err) => format!("Error: {err}"),
        }
    }
}

fn parse_coords(text: &str) -> Option<Coord2> {
    let (x, y) = text.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn new_easy_returns_the_empty_board_preview() {
        let mut manager = Manager::new(1);

        let response = manager.parse_input("new easy");

        assert!(response.starts_with("New Game: 8 x 8 Bombs: 10\n"));
        assert!(response.contains('*'));
    }

    #[test]
    fn unknown_difficulty_is_reported() {
        let mut manager = Manager::new(1);

        let response = manager.parse_input("new impossible");

        assert_eq!(
            response,
            "Error: Unknown difficulty 'impossible'. Use easy, medium or hard."
        );
    }

    #[test]
    fn reveal_without_a_round_gives_guidance() {
        let mut manager = Manager::new(1);

        assert_eq!(
            manager.parse_input("reveal 1,1"),
            "Please use 'new' to start a round of minesweeper first."
        );
    }

    #[test]
    fn flag_before_the_first_reveal_gives_guidance() {
        let mut manager = Manager::new(1);
        manager.parse_input("new easy");

        assert_eq!(
            manager.parse_input("flag 3,3"),
            "You have to reveal at least one field before you can use flag."
        );
        assert!(!manager.round.as_ref().unwrap().is_initialized());
    }

    #[test]
    fn malformed_coordinates_are_reported() {
        let mut manager = Manager::new(1);
        manager.parse_input("new easy");

        assert_eq!(
            manager.parse_input("reveal a,b"),
            "Error: Could not parse value for x or y."
        );
        assert_eq!(
            manager.parse_input("reveal 12"),
            "Error: Could not parse value for x or y."
        );
    }

    #[test]
    fn out_of_bounds_coordinates_are_reported() {
        let mut manager = Manager::new(1);
        manager.parse_input("new easy");

        assert_eq!(
            manager.parse_input("reveal 100,0"),
            "Error: Value for x or y is out of bounds."
        );
        assert!(!manager.round.as_ref().unwrap().is_initialized());
    }

    #[test]
    fn help_is_an_empty_response_and_garbage_is_called_out() {
        let mut manager = Manager::new(1);

        assert_eq!(manager.parse_input("help"), "");
        assert_eq!(
            manager.parse_input("frobnicate"),
            "Unrecognized command. Use 'help' for a list of commands."
        );
    }

    #[test]
    fn a_finished_round_is_dropped_before_the_next_command() {
        let mut manager = Manager::new(1);
        let mut round = GameRound::with_bombs((2, 2), &[(0, 0)]);
        round.reveal((0, 0)).unwrap();
        manager.round = Some(round);

        assert_eq!(
            manager.parse_input("reveal 1,1"),
            "Please use 'new' to start a round of minesweeper first."
        );
        assert!(manager.round.is_none());
    }

    #[test]
    fn same_seed_and_commands_give_identical_transcripts() {
        let commands = ["new easy", "reveal 3,3", "flag 0,0", "reveal 7,7"];

        let transcript = |seed| {
            let mut manager = Manager::new(seed);
            commands
                .iter()
                .map(|command| manager.parse_input(command))
                .collect::<Vec<_>>()
        };

        assert_eq!(transcript(42), transcript(42));
    }

    #[test]
    fn reveal_responses_render_the_board() {
        let mut manager = Manager::new(9);
        manager.parse_input("new easy");

        let response = manager.parse_input("reveal 3,3");

        // column header plus eight row-prefixed lines
        assert!(response.contains("  0  1  2  3  4  5  6  7"));
        assert!(response.lines().count() >= 9);
    }
}
