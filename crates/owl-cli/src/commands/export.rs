use std::path::Path;

use owl_core::export::ExportFormat;

use super::SessionArgs;

pub fn run(args: &SessionArgs, format: &str, output: Option<&Path>) -> Result<(), String> {
    let format = ExportFormat::parse(format).ok_or_else(|| {
        format!("unsupported format: \"{format}\". Use: csv, json, markdown, text")
    })?;
    let session = super::open_session(args)?;
    let content = session.export(format).map_err(|e| e.to_string())?;

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        print!("{content}");
    }

    Ok(())
}
