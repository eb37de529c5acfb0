use dioxus::logger::tracing::Level;

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialise logging: {e}");
    }
    dioxus::launch(hyperion::App);
}
