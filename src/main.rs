fn main() {
    if let Err(e) = poolbalance_rs::adapters::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
