fn main() {
    if let Err(e) = microc_drv::main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
