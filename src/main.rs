use chess_rules_engine::mock;

fn main() {
    env_logger::init();
    log::info!("Chess Rules Engine - terminal");
    mock::run_interactive_terminal();
}
