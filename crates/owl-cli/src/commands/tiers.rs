use comfy_table::{ContentArrangement, Table};

use owl_core::format_points;
use owl_mechanics::TierLadder;
use owl_mechanics::tier::{RENOWN_PERKS, notoriety_response};

use super::SessionArgs;

pub fn run(args: &SessionArgs) -> Result<(), String> {
    let config = args.config()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tier", "Renown", "Perk", "Notoriety", "City Response"]);

    let tiers = config
        .renown_ladder
        .max_tier()
        .max(config.notoriety_ladder.max_tier());
    for tier in 0..=tiers {
        let threshold = |ladder: &TierLadder| match tier {
            0 => "0".to_string(),
            t => ladder
                .thresholds()
                .get(t - 1)
                .map(|v| format_points(*v))
                .unwrap_or_else(|| "-".to_string()),
        };
        let perk = match tier {
            0 => "-".to_string(),
            t => RENOWN_PERKS
                .get(t - 1)
                .map(|p| format!("{} {}", p.code, p.name))
                .unwrap_or_else(|| "-".to_string()),
        };
        let r = notoriety_response(tier);
        let response = format!("{} {}: {}", r.code, r.name, r.text);

        table.add_row(vec![
            tier.to_string(),
            threshold(&config.renown_ladder),
            perk,
            threshold(&config.notoriety_ladder),
            response,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  Heat: High at Notoriety {}, severe at {}",
        format_points(config.heat.high_threshold()),
        format_points(config.heat.severe_threshold())
    );

    Ok(())
}
