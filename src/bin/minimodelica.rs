fn main() {
    minimodelica::cli::run();
}
