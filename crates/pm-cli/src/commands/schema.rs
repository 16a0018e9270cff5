//! Schema export command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("{}", pm_web::graphql::sdl());
    Ok(())
}
