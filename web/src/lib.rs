use clap::Parser;
use memory_match_core::GameConfig;
use wasm_bindgen::prelude::*;

mod game;
pub mod scheduler;
pub mod storage;
mod utils;

pub use scheduler::TimerScheduler;
pub use storage::BrowserStorage;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// How many pairs to deal, sized after the viewport when absent
    #[arg(short, long)]
    pairs: Option<u16>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Viewports narrower than this get a 3x4 board instead of 4x4.
const NARROW_VIEWPORT_PX: f64 = 400.;

fn board_for_width(width: Option<f64>) -> GameConfig {
    match width {
        Some(width) if width < NARROW_VIEWPORT_PX => GameConfig::for_board(3, 4),
        _ => GameConfig::for_board(4, 4),
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let parsed = Args::try_parse_from(location_hash.split(['#', '&']));
    let log_level = match &parsed {
        Ok(args) => args.verbose.log_level(),
        Err(_) => Some(log::Level::Warn),
    };
    if let Some(log_level) = log_level {
        // Fails only when a logger is already installed.
        console_log::init_with_level(log_level).ok();
    }
    let args = parsed.unwrap_or_else(|err| {
        log::warn!("ignoring hash arguments: {}", err);
        Args::parse_from([""])
    });
    log::debug!("args: {:?}", args);

    let Some(root) = document().get_element_by_id("game") else {
        log::error!("could not find id=\"game\" element");
        return;
    };

    let config = match args.pairs {
        Some(pairs) => GameConfig::new(pairs),
        None => board_for_width(window().inner_width().ok().and_then(|width| width.as_f64())),
    };
    log::debug!("dealing {} pairs", config.pairs);

    let props = game::GameProps {
        config,
        seed: args.seed,
    };
    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}
