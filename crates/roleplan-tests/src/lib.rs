pub mod fixtures;

pub use fixtures::{CommandRun, fixture_path, load_fixture, run_command};
