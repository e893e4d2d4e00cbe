//! Runs the countdown timer widget as a standalone program.
//!
//! Type a duration in seconds, press `enter` to set it, then `s` to start,
//! `p` to pause, `r` to reset, `q` to quit.

use bubbletea_countdown::widget::Model as CountdownTimer;
use bubbletea_rs::Program;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<CountdownTimer>::builder().build()?;
    program.run().await?;
    Ok(())
}
