//! The `civlab animate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use civlab_core::animation::{vehicle_offsets, FlowAnimation, Lane};
use civlab_core::banding::vehicle_count;
use civlab_core::config::load_config_from;

/// Width of the rendered road in characters.
const ROAD_WIDTH: usize = 50;

pub async fn execute(volume: f64, frames: usize, config_path: Option<PathBuf>) -> Result<()> {
    anyhow::ensure!(
        (0.0..=100.0).contains(&volume),
        "volume must be between 0 and 100, got {volume}"
    );
    let config = load_config_from(config_path.as_deref())?;

    let vehicles = vehicle_count(volume);
    println!(
        "Traffic flow at volume {volume} ({vehicles} vehicles, tick {} ms)",
        config.animation_interval_ms
    );

    let animation = FlowAnimation::spawn(volume, config.animation_interval());
    let mut ticks = animation.subscribe();

    for _ in 0..frames {
        ticks
            .changed()
            .await
            .context("flow animation stopped unexpectedly")?;
        let position = *ticks.borrow_and_update();
        println!("{}", render_frame(position, vehicles));
    }

    animation.stop();
    Ok(())
}

/// Draw both lanes as `|upper|lower|` with `>` for each vehicle.
fn render_frame(position: f64, vehicles: usize) -> String {
    let mut upper = vec!['-'; ROAD_WIDTH];
    let mut lower = vec!['-'; ROAD_WIDTH];

    for placement in vehicle_offsets(position, vehicles) {
        let column = ((placement.offset / 100.0) * ROAD_WIDTH as f64) as usize;
        let column = column.min(ROAD_WIDTH - 1);
        match placement.lane {
            Lane::Upper => upper[column] = '>',
            Lane::Lower => lower[column] = '>',
        }
    }

    let upper: String = upper.into_iter().collect();
    let lower: String = lower.into_iter().collect();
    format!("{position:>6.2} |{upper}|{lower}|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_places_vehicles_in_lanes() {
        let frame = render_frame(0.0, 2);
        let (_, road) = frame.split_once('|').unwrap();
        let lanes: Vec<&str> = road.trim_end_matches('|').split('|').collect();
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0].find('>'), Some(0));
        assert_eq!(lanes[1].find('>'), Some(ROAD_WIDTH / 4));
    }

    #[test]
    fn empty_road_has_no_vehicles() {
        let frame = render_frame(42.0, 0);
        assert!(!frame.contains('>'));
        assert!(frame.starts_with(" 42.00"));
    }
}
