fn main() {
    if let Err(e) = medx::app::run() {
        eprintln!("{e:#}"); // pretty anyhow chain
        std::process::exit(1);
    }
}
