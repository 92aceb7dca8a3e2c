fn main() {
    std::process::exit(magc_drv::run());
}
