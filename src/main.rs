fn main() -> Result<(), Box<dyn std::error::Error>> {
    code_companion::cli::main()
}
