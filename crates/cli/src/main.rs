mod error;
mod render;
mod settings;
mod shell;

use crate::error::Result;

fn main() -> Result<()> {
    let settings = settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "cafetera={level},engine={level}",
            level = settings.level
        ))
        .init();

    let machine = engine::Machine::new(settings.capacity());
    let gate = engine::AdminGate::new(settings.admin_credentials());

    shell::Shell::new(machine, gate).run()
}
