fn main() -> anyhow::Result<()> {
    blogboard_frontend::run_frontend()
}
