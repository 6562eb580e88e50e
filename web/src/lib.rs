use break_core::Difficulty;
use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Difficulty preset to start with
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,
}

fn parse_difficulty(label: &str) -> Result<Difficulty, String> {
    Difficulty::from_label(label).ok_or_else(|| {
        let known: Vec<_> = Difficulty::ALL.iter().map(|d| d.label()).collect();
        format!("unknown difficulty {label:?}, expected one of {}", known.join(", "))
    })
}

/// Arguments travel in the URL hash, e.g. `#-vv&--difficulty=break&--seed=42`.
fn parse_hash(hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(hash.split(['#', '&']))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let args = parse_hash(&location_hash).unwrap_or_else(|err| {
        gloo::console::warn!(format!("Ignoring bad arguments: {err}"));
        Args::default()
    });
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}, difficulty: {:?}", args.seed, args.difficulty);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    let props = game::GameProps {
        difficulty: args.difficulty.unwrap_or_default(),
        seed: args.seed,
    };
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_arguments_are_parsed() {
        let args = parse_hash("#-v&--difficulty=break&--seed=42").unwrap();

        assert_eq!(args.seed, Some(42));
        assert_eq!(args.difficulty, Some(Difficulty::Break));
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_hash("").unwrap();

        assert_eq!(args.seed, None);
        assert_eq!(args.difficulty, None);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        assert!(parse_difficulty("expert").is_err());
        assert!(parse_hash("#--difficulty=expert").is_err());
    }
}
