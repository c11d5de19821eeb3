use owl_core::format_points;
use owl_mechanics::Adjustment;

use super::SessionArgs;

pub fn run(
    args: &SessionArgs,
    kind: &str,
    renown: f64,
    notoriety: f64,
    reason: Option<&str>,
) -> Result<(), String> {
    let adjustment = match Adjustment::parse(kind) {
        Some(named) => named,
        None if kind.eq_ignore_ascii_case("custom") => {
            let reason = reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or("custom adjustments need --reason")?;
            Adjustment::Custom {
                reason: reason.to_string(),
                renown,
                notoriety,
            }
        }
        None => {
            return Err(format!(
                "unknown adjustment \"{kind}\". Use: lie-low, charity, custom"
            ));
        }
    };

    let mut session = super::open_session(args)?;
    let record = session.adjust(&adjustment).map_err(|e| e.to_string())?;
    let totals = session.totals().map_err(|e| e.to_string())?;

    println!(
        "  {}: Renown {:+}, Notoriety {:+}",
        adjustment.reason(),
        record.renown_delta,
        record.notoriety_delta
    );
    println!(
        "  Totals: Renown {} | Notoriety {}",
        format_points(totals.renown_total),
        format_points(totals.notoriety_total)
    );

    Ok(())
}
