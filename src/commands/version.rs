use anyhow::Result;

use cssprobe::types::OutputFormat;

pub async fn handle_version(format: OutputFormat) -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const NAME: &str = env!("CARGO_PKG_NAME");

    match format {
        OutputFormat::Json => {
            let info = serde_json::json!({
                "name": NAME,
                "version": VERSION,
                "escaping": "css-escape",
                "requires_unique_id": true,
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Simple => println!("{} v{}", NAME, VERSION),
    }
    Ok(())
}
