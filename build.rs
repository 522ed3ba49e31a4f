use std::error::Error;
use vergen::{BuildBuilder, Emitter};

fn main() -> Result<(), Box<dyn Error>> {
    // Configure and build the build instructions
    let build = BuildBuilder::default().build_timestamp(true).build()?;

    // Create emitter and add instructions
    Emitter::default().add_instructions(&build)?.emit()?;

    Ok(())
}
