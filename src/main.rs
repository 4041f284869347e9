fn main() {
    if let Err(err) = diagram_eps_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
