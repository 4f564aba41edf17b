use anyhow::Result;

fn main() -> Result<()> {
    odup::cli::run()
}
