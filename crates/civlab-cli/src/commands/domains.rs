//! The `civlab domains` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use civlab_core::banding::Domain;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Domain", "Discipline", "Slider", "Default", "Bands"]);

    for domain in Domain::ALL {
        let slider = domain.slider();
        let table_def = domain.table();
        let mut bands: Vec<String> = table_def
            .cuts
            .iter()
            .map(|(threshold, label)| format!("<{threshold} {label}"))
            .collect();
        bands.push(table_def.fallback.to_string());

        table.add_row(vec![
            Cell::new(domain.id()),
            Cell::new(domain.discipline()),
            Cell::new(format!(
                "{}..{} step {} {}",
                slider.min, slider.max, slider.step, slider.unit
            )),
            Cell::new(slider.default),
            Cell::new(bands.join("\n")),
        ]);
    }

    println!("{table}");
    Ok(())
}
