use std::io::{self, BufRead, Write};

use super::{ScriptedMoves, TerminalDisplay};
use crate::BoardDisplay;
use crate::evaluator::GameStatus;
use crate::game_logic::GameEngine;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal game on stdin/stdout.
///
/// Each input line is either a command or a move script such as `e2e4`.
pub fn run_interactive_terminal() {
    let mut engine = GameEngine::new();
    let mut display = TerminalDisplay::new();
    let mut moves = ScriptedMoves::new();

    clear_screen();
    draw_interface(&mut display, &mut engine);

    let stdin = io::stdin();
    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            log::error!("failed to flush stdout: {e}");
            break;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("failed to read input: {e}");
                break;
            }
        }

        match input.trim() {
            "" => continue,
            "q" => break,
            "r" => {
                engine = GameEngine::new();
                clear_screen();
                draw_interface(&mut display, &mut engine);
                println!("\nReset to initial position");
            }
            "p" => {
                clear_screen();
                draw_interface(&mut display, &mut engine);
            }
            script => {
                if let Err(e) = moves.push_script(script) {
                    println!("Invalid input: {e}");
                    continue;
                }
                let Ok(accepted) = engine.play_from(&mut moves);
                clear_screen();
                let status = draw_interface(&mut display, &mut engine);
                if accepted == 0 {
                    println!("\nIllegal move");
                }
                if status.is_some_and(GameStatus::is_terminal) {
                    println!("\nGame over. Press r to play again.");
                }
            }
        }
    }
}

/// Draws help text and the board, returning the status of the side to move.
fn draw_interface(display: &mut TerminalDisplay, engine: &mut GameEngine) -> Option<GameStatus> {
    println!("Chess Rules Engine");
    println!();
    println!("Commands: <from><to> (e.g. e2e4) | r (reset) | p (refresh) | q (quit)");
    println!();

    let turn = engine.turn();
    let status = match engine.query_game_status(turn) {
        Ok(status) => status,
        Err(e) => {
            log::error!("cannot evaluate position: {e}");
            return None;
        }
    };
    if let Err(e) = display.show(&engine.renderable_state(), turn, status) {
        log::error!("failed to draw board: {e}");
    }
    Some(status)
}
