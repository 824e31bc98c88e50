fn main() {
    std::process::exit(checker_launcher_lib::run());
}
