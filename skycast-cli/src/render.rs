//! Plain-text renderer for dashboard snapshots.

use skycast_core::dashboard::Renderer;
use skycast_core::icon::{Condition, icon_for};
use skycast_core::model::{LocationLabel, WeatherSnapshot};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&mut self, snapshot: &WeatherSnapshot, label: &LocationLabel) {
        let units = snapshot.units;
        let current = &snapshot.current;
        let condition = Condition::from_code(current.condition_code);

        println!();
        println!("{label}  ({})", condition.description());
        println!(
            "  {}{}  feels like {}{}",
            current.temperature.round(),
            units.symbol(),
            current.feels_like.round(),
            units.symbol(),
        );
        println!(
            "  wind {} {}   humidity {}%   precipitation {} {}",
            current.wind_speed.round(),
            units.wind_speed_unit(),
            current.humidity.round(),
            current.precipitation,
            units.precipitation_unit(),
        );

        if !snapshot.hourly.is_empty() {
            println!();
            for entry in &snapshot.hourly {
                let marker = if entry.is_current { ">" } else { " " };
                println!(
                    "{marker} {:>5}  {:>4}{}  {}",
                    entry.label,
                    entry.temperature.round(),
                    units.symbol(),
                    icon_for(entry.condition_code),
                );
            }
        }

        if !snapshot.daily.is_empty() {
            println!();
            for day in &snapshot.daily {
                println!(
                    "  {}  {:>4}{} / {:>4}{}  {}",
                    day.date.format("%a %b %e"),
                    day.max_temp.round(),
                    units.symbol(),
                    day.min_temp.round(),
                    units.symbol(),
                    icon_for(day.condition_code),
                );
            }
        }
    }

    fn city_not_found(&mut self, query: &str) {
        eprintln!("City not found: \"{query}\". Please try again.");
    }
}
