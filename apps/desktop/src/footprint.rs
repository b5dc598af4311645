//! Carbon-footprint form launched from the user screen. It never touches the registry.

use std::io::{BufRead, Write};

use desktop_integration::{BrowserOpener, FormRenderer, Notify, Prompt};
use thiserror::Error;
use tracing::{info, warn};

use crate::console::Console;

pub const TRANSPORT_KG_PER_KM: f64 = 0.21;
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.5;
pub const FOOD_KG_PER_KG: f64 = 0.13;

pub const BELOW_AVERAGE_LIMIT_KG: f64 = 4000.0;
pub const AVERAGE_LIMIT_KG: f64 = 10000.0;

pub const SDG13_URL: &str = "https://sdgs.un.org/goals/goal13";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Please insert a correct form of data.")]
pub struct InvalidNumber {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintInput {
    pub transport_km: f64,
    pub electricity_kwh: f64,
    pub food_kg: f64,
}

impl FootprintInput {
    pub fn parse(transport: &str, electricity: &str, food: &str) -> Result<Self, InvalidNumber> {
        Ok(Self {
            transport_km: parse_number("transport", transport)?,
            electricity_kwh: parse_number("electricity", electricity)?,
            food_kg: parse_number("food", food)?,
        })
    }

    /// Kilograms of CO2.
    pub fn footprint_kg(&self) -> f64 {
        self.transport_km * TRANSPORT_KG_PER_KM
            + self.electricity_kwh * ELECTRICITY_KG_PER_KWH
            + self.food_kg * FOOD_KG_PER_KG
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, InvalidNumber> {
    raw.trim().parse::<f64>().map_err(|_| InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceTier {
    BelowAverage,
    Average,
    AboveAverage,
}

impl AdviceTier {
    pub fn for_footprint(kg: f64) -> Self {
        if kg <= BELOW_AVERAGE_LIMIT_KG {
            AdviceTier::BelowAverage
        } else if kg <= AVERAGE_LIMIT_KG {
            AdviceTier::Average
        } else {
            AdviceTier::AboveAverage
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            AdviceTier::BelowAverage => {
                "Your carbon footprint is considered below average, keep up the effort to further \
                 decrease your carbon footprint. Consider participating in more recycling \
                 activities and share your experience with your friends and family."
            }
            AdviceTier::Average => {
                "Your carbon footprint is considered average in the world. Consider joining \
                 carpool activity, use energy-efficient appliances and reduce the intake of meat \
                 products."
            }
            AdviceTier::AboveAverage => {
                "Your carbon footprint is considered above average. Take into consideration to \
                 switch up your daily carbon usage. Switch off electric appliances and turn off \
                 water taps when not in used, consider the idea of taking public transportation \
                 and limit the intake of meat products."
            }
        }
    }
}

pub fn result_line(kg: f64) -> String {
    format!("Your carbon footprint is: {kg} kilograms of CO2")
}

pub struct FootprintForm<'a, R, W> {
    console: &'a mut Console<R, W>,
    opener: &'a dyn BrowserOpener,
    last_footprint_kg: f64,
}

impl<'a, R: BufRead, W: Write> FootprintForm<'a, R, W> {
    pub fn new(console: &'a mut Console<R, W>, opener: &'a dyn BrowserOpener) -> Self {
        Self {
            console,
            opener,
            last_footprint_kg: 0.0,
        }
    }

    fn calculate(&mut self) {
        let Some(transport) = self
            .console
            .ask_text("Transportation mode (kilometers):", None)
        else {
            return;
        };
        let Some(electricity) = self
            .console
            .ask_text("Energy consumption (kilowatt-hours):", None)
        else {
            return;
        };
        let Some(food) = self.console.ask_text("Food consumption (kilograms):", None) else {
            return;
        };

        match FootprintInput::parse(&transport, &electricity, &food) {
            Ok(input) => {
                self.last_footprint_kg = input.footprint_kg();
                self.console.emit(&result_line(self.last_footprint_kg));
            }
            Err(err) => {
                warn!(field = err.field, value = %err.value, "rejected footprint input");
                self.console.show(&err.to_string());
            }
        }
    }

    fn read_more(&mut self) {
        if let Err(err) = self.opener.open(SDG13_URL) {
            warn!(error = %err, "failed to open SDG 13 page");
            self.console.show("Unable to load.");
        }
    }
}

impl<R: BufRead, W: Write> FormRenderer for FootprintForm<'_, R, W> {
    fn render(&mut self) {
        loop {
            let choice = self.console.choose(
                "Carbon Footprint Calculator",
                &[
                    "Calculate carbon footprint",
                    "Suggestions",
                    "Read more about SDG 13",
                    "Exit",
                ],
            );
            match choice {
                Some(0) => self.calculate(),
                Some(1) => {
                    let tier = AdviceTier::for_footprint(self.last_footprint_kg);
                    self.console.emit(tier.advice());
                }
                Some(2) => self.read_more(),
                _ => break,
            }
        }
        info!("footprint form closed");
    }
}
