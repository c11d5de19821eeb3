use colored::Colorize;

use owl_wheel::WheelGeometry;

use super::SessionArgs;

pub fn run(args: &SessionArgs, index: Option<usize>, nonce: Option<&str>) -> Result<(), String> {
    let mut session = super::open_session(args)?;

    let receipt = match (index, nonce) {
        (Some(index), Some(nonce)) => session
            .complete_spin(index, nonce)
            .map_err(|e| e.to_string())?,
        _ => {
            let (proposal, table) = session.propose_spin().map_err(|e| e.to_string())?;
            let geometry = WheelGeometry::new(table.len());
            println!(
                "  Spinning {} times over {} segments of {:.1} deg, landing at {:.1} deg",
                proposal.rotations,
                table.len(),
                geometry.segment_degrees(),
                proposal.target_angle(table.len())
            );
            session
                .complete_spin(proposal.chosen_index, &proposal.nonce)
                .map_err(|e| e.to_string())?
        }
    };

    let band = match receipt.drawn.band.as_str() {
        "High" => receipt.drawn.band.red().bold(),
        _ => receipt.drawn.band.green(),
    };
    println!(
        "  Complication ({band} heat, #{} of {}): {}",
        receipt.drawn.index + 1,
        receipt.drawn.option_count,
        receipt.drawn.text.bold()
    );
    println!("  Nonce: {}", receipt.drawn.nonce);
    if receipt.replayed {
        println!("  {}", "Already recorded; nothing new written.".yellow());
    }

    Ok(())
}
