//! Desktop form entry point (requires the `gui` feature).

fn main() -> eframe::Result<()> {
    env_logger::init();
    freshness_predictor::gui::run()
}
