use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use owl_core::format_points;
use owl_mechanics::HeatBand;
use owl_mechanics::tier::{notoriety_response, unlocked_perks};

use super::SessionArgs;

pub fn run(args: &SessionArgs) -> Result<(), String> {
    let session = super::open_session(args)?;
    let standing = session.standing().map_err(|e| e.to_string())?;
    let records = session.records().map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Meter", "Total", "Tier", "Next"]);
    table.add_row(vec![
        "Renown".to_string(),
        format_points(standing.totals.renown_total),
        standing.renown_tier.to_string(),
        standing.renown_next.to_string(),
    ]);
    table.add_row(vec![
        "Notoriety".to_string(),
        format_points(standing.totals.notoriety_total),
        standing.notoriety_tier.to_string(),
        standing.notoriety_next.to_string(),
    ]);

    println!("{table}");
    println!();

    let band = standing.heat.band.to_string();
    let band = match standing.heat.band {
        HeatBand::Low => band.green(),
        HeatBand::High => band.red().bold(),
    };
    println!("  Heat: {band} (x{})", standing.heat.multiplier);

    let response = notoriety_response(standing.notoriety_tier);
    println!("  City: {} {}: {}", response.code, response.name, response.text);

    let perks = unlocked_perks(standing.renown_tier);
    if perks.is_empty() {
        println!("  Perks: none yet");
    } else {
        let codes: Vec<&str> = perks.iter().map(|p| p.code).collect();
        println!("  Perks: {}", codes.join(", "));
    }
    println!("  Ward: {} | {} records", session.ward(), records.len());

    Ok(())
}
