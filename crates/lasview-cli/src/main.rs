mod command;
mod session;
mod tui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
