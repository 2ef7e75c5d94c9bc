//! The `civlab band` command.

use anyhow::Result;

use civlab_core::banding::band_for_id;

pub fn execute(domain: String, value: f64, format: String) -> Result<()> {
    let result = band_for_id(&domain, value)?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        "text" => {
            let slider = result.domain.slider();
            println!("{} at {} {}", result.domain.title(), value, slider.unit);
            if value < slider.min || value > slider.max {
                println!(
                    "  (outside the slider range {}..{}, using the nearest band)",
                    slider.min, slider.max
                );
            }
            println!("Band: {}", result.label);
            for metric in &result.metrics {
                match metric.unit {
                    Some(unit) => println!("  {}: {} {unit}", metric.name, metric.value),
                    None => println!("  {}: {}", metric.name, metric.value),
                }
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
