//! UCI command parsing.

use std::time::Duration;

use corvus_core::{Board, Move};

use crate::error::UciError;

/// Parsed parameters for a `go` command.
///
/// Mirrors the UCI `go` subcommands relevant to time management and
/// search limits; `searchmoves` and `mate` are accepted but not acted on.
#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Milliseconds left on White's clock.
    pub wtime: Option<Duration>,
    /// Milliseconds left on Black's clock.
    pub btime: Option<Duration>,
    /// White's increment per move.
    pub winc: Option<Duration>,
    /// Black's increment per move.
    pub binc: Option<Duration>,
    /// Moves remaining until the next time control.
    pub movestogo: Option<u32>,
    /// Fixed search depth in plies.
    pub depth: Option<u8>,
    /// Fixed node budget.
    pub nodes: Option<u64>,
    /// Fixed time to use for this move.
    pub movetime: Option<Duration>,
    /// `go infinite` — search until `stop`.
    pub infinite: bool,
    /// `go ponder` — search the predicted opponent reply; clock starts on `ponderhit`.
    pub ponder: bool,
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- set up a board position with optional moves applied.
    Position(Board),
    /// `go [...]` -- start a search with the given limits.
    Go(GoParams),
    /// `ponderhit` -- the opponent played the predicted move; start the clock.
    PonderHit,
    /// `stop` -- halt the current search.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command (silently ignored per UCI spec).
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Command::Unknown(String::new()));
    }

    match tokens[0] {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "ponderhit" => Ok(Command::PonderHit),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "position" => parse_position(&tokens[1..]),
        "go" => parse_go(&tokens[1..]),
        _ => Ok(Command::Unknown(tokens[0].to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    if tokens.is_empty() {
        return Err(UciError::MalformedPosition);
    }

    let (mut board, rest) = if tokens[0] == "startpos" {
        let rest = &tokens[1..];
        (Board::starting_position(), rest)
    } else if tokens[0] == "fen" {
        // FEN is 6 space-separated fields
        if tokens.len() < 7 {
            return Err(UciError::InvalidFen {
                fen: tokens[1..].join(" "),
            });
        }
        let fen = tokens[1..7].join(" ");
        let board: Board = fen.parse().map_err(|_| UciError::InvalidFen {
            fen: fen.clone(),
        })?;
        (board, &tokens[7..])
    } else {
        return Err(UciError::MalformedPosition);
    };

    // Apply moves if present: "moves e2e4 d7d5 ..."
    if !rest.is_empty() && rest[0] == "moves" {
        for uci_str in &rest[1..] {
            let mv = Move::from_uci(uci_str, &board).ok_or_else(|| UciError::InvalidMove {
                uci_move: uci_str.to_string(),
            })?;
            board = board.make_move(mv);
        }
    }

    Ok(Command::Position(board))
}

/// Parse a millisecond value for a named `go` parameter.
fn parse_ms(param: &str, value: &str) -> Result<Duration, UciError> {
    let ms: u64 = value.parse().map_err(|_| UciError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })?;
    Ok(Duration::from_millis(ms))
}

/// Parse the `go` command arguments.
///
/// Supports the full set of timing and limit subcommands (`wtime`, `btime`,
/// `winc`, `binc`, `movestogo`, `depth`, `nodes`, `movetime`, `infinite`,
/// `ponder`). `searchmoves` and `mate` are consumed but otherwise ignored —
/// move restriction and mate-search are not part of this engine's contract.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        macro_rules! next_value {
            ($param:expr) => {{
                let v = tokens.get(i + 1).ok_or_else(|| UciError::MissingGoValue {
                    param: $param.to_string(),
                })?;
                i += 2;
                *v
            }};
        }

        match tokens[i] {
            "wtime" => params.wtime = Some(parse_ms("wtime", next_value!("wtime"))?),
            "btime" => params.btime = Some(parse_ms("btime", next_value!("btime"))?),
            "winc" => params.winc = Some(parse_ms("winc", next_value!("winc"))?),
            "binc" => params.binc = Some(parse_ms("binc", next_value!("binc"))?),
            "movestogo" => {
                let v = next_value!("movestogo");
                params.movestogo = Some(v.parse().map_err(|_| UciError::InvalidGoValue {
                    param: "movestogo".to_string(),
                    value: v.to_string(),
                })?);
            }
            "depth" => {
                let v = next_value!("depth");
                params.depth = Some(v.parse().map_err(|_| UciError::InvalidGoValue {
                    param: "depth".to_string(),
                    value: v.to_string(),
                })?);
            }
            "nodes" => {
                let v = next_value!("nodes");
                params.nodes = Some(v.parse().map_err(|_| UciError::InvalidGoValue {
                    param: "nodes".to_string(),
                    value: v.to_string(),
                })?);
            }
            "movetime" => params.movetime = Some(parse_ms("movetime", next_value!("movetime"))?),
            "infinite" => {
                params.infinite = true;
                i += 1;
            }
            "ponder" => {
                params.ponder = true;
                i += 1;
            }
            "searchmoves" => {
                // Consume the trailing list of UCI move strings (move
                // restriction is not part of this engine's search contract).
                i += 1;
                const GO_KEYWORDS: &[&str] = &[
                    "wtime", "btime", "winc", "binc", "movestogo", "depth", "nodes",
                    "movetime", "infinite", "ponder", "mate", "searchmoves",
                ];
                while i < tokens.len() && !GO_KEYWORDS.contains(&tokens[i]) {
                    i += 1;
                }
            }
            "mate" => {
                // Accepted but not acted on — mate-search is out of scope.
                i += 2;
            }
            _ => i += 1,
        }
    }

    Ok(Command::Go(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uci() {
        assert!(matches!(parse_command("uci").unwrap(), Command::Uci));
    }

    #[test]
    fn parse_isready() {
        assert!(matches!(parse_command("isready").unwrap(), Command::IsReady));
    }

    #[test]
    fn parse_quit() {
        assert!(matches!(parse_command("quit").unwrap(), Command::Quit));
    }

    #[test]
    fn parse_ucinewgame() {
        assert!(matches!(
            parse_command("ucinewgame").unwrap(),
            Command::UciNewGame
        ));
    }

    #[test]
    fn parse_ponderhit() {
        assert!(matches!(parse_command("ponderhit").unwrap(), Command::PonderHit));
    }

    #[test]
    fn parse_position_startpos() {
        let cmd = parse_command("position startpos").unwrap();
        assert!(matches!(cmd, Command::Position(_)));
    }

    #[test]
    fn parse_position_startpos_with_moves() {
        let cmd = parse_command("position startpos moves e2e4 e7e5").unwrap();
        assert!(matches!(cmd, Command::Position(_)));
    }

    #[test]
    fn parse_position_fen() {
        let cmd = parse_command(
            "position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        )
        .unwrap();
        assert!(matches!(cmd, Command::Position(_)));
    }

    #[test]
    fn parse_go_depth() {
        let cmd = parse_command("go depth 6").unwrap();
        match cmd {
            Command::Go(p) => assert_eq!(p.depth, Some(6)),
            _ => panic!("expected Go"),
        }
    }

    #[test]
    fn parse_go_default_is_empty() {
        let cmd = parse_command("go").unwrap();
        match cmd {
            Command::Go(p) => {
                assert_eq!(p.depth, None);
                assert!(!p.infinite);
                assert!(!p.ponder);
            }
            _ => panic!("expected Go with no limits set"),
        }
    }

    #[test]
    fn parse_go_infinite() {
        let cmd = parse_command("go infinite").unwrap();
        match cmd {
            Command::Go(p) => assert!(p.infinite),
            _ => panic!("expected Go"),
        }
    }

    #[test]
    fn parse_go_ponder() {
        let cmd = parse_command("go ponder wtime 60000 btime 60000").unwrap();
        match cmd {
            Command::Go(p) => {
                assert!(p.ponder);
                assert_eq!(p.wtime, Some(Duration::from_millis(60_000)));
            }
            _ => panic!("expected Go"),
        }
    }

    #[test]
    fn parse_go_movetime() {
        let cmd = parse_command("go movetime 5000").unwrap();
        match cmd {
            Command::Go(p) => assert_eq!(p.movetime, Some(Duration::from_millis(5000))),
            _ => panic!("expected Go"),
        }
    }

    #[test]
    fn parse_go_full_clock() {
        let cmd = parse_command("go wtime 300000 btime 300000 winc 2000 binc 2000 movestogo 30")
            .unwrap();
        match cmd {
            Command::Go(p) => {
                assert_eq!(p.wtime, Some(Duration::from_millis(300_000)));
                assert_eq!(p.btime, Some(Duration::from_millis(300_000)));
                assert_eq!(p.winc, Some(Duration::from_millis(2_000)));
                assert_eq!(p.binc, Some(Duration::from_millis(2_000)));
                assert_eq!(p.movestogo, Some(30));
            }
            _ => panic!("expected Go"),
        }
    }

    #[test]
    fn parse_go_nodes() {
        let cmd = parse_command("go nodes 100000").unwrap();
        match cmd {
            Command::Go(p) => assert_eq!(p.nodes, Some(100_000)),
            _ => panic!("expected Go"),
        }
    }

    #[test]
    fn parse_go_missing_value_errors() {
        let result = parse_command("go depth");
        assert!(result.is_err());
    }

    #[test]
    fn parse_go_invalid_value_errors() {
        let result = parse_command("go depth abc");
        assert!(result.is_err());
    }

    #[test]
    fn parse_unknown_command() {
        let cmd = parse_command("foobar").unwrap();
        assert!(matches!(cmd, Command::Unknown(_)));
    }

    #[test]
    fn parse_empty_line() {
        let cmd = parse_command("").unwrap();
        assert!(matches!(cmd, Command::Unknown(_)));
    }

    #[test]
    fn parse_position_missing_keyword() {
        let result = parse_command("position");
        assert!(result.is_err());
    }

    #[test]
    fn parse_position_invalid_fen() {
        let result = parse_command("position fen invalid");
        assert!(result.is_err());
    }

    #[test]
    fn parse_stop() {
        assert!(matches!(parse_command("stop").unwrap(), Command::Stop));
    }
}
