mod command;
mod input;
mod output;
mod session;

fn main() -> anyhow::Result<()> {
    command::run()
}
