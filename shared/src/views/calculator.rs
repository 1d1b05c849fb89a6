use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculatorField {
    /// Kilometres.
    Distance,
    /// Kilometres per litre.
    Consumption,
    /// Currency per litre.
    Price,
}

impl CalculatorField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Consumption => "consumption",
            Self::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripEstimate {
    pub fuel_used_l: f64,
    pub cost: f64,
}

impl TripEstimate {
    /// Whole currency units.
    #[must_use]
    pub fn cost_label(&self) -> String {
        format!("{:.0}", self.cost.round())
    }

    #[must_use]
    pub fn fuel_label(&self) -> String {
        format!("{:.1}", self.fuel_used_l)
    }
}

/// `fuel = distance / consumption`, `cost = fuel * price`. All three
/// inputs must be finite and strictly positive.
pub fn estimate_trip(
    distance_km: f64,
    km_per_litre: f64,
    price_per_litre: f64,
) -> Result<TripEstimate, ValidationError> {
    for (field, value) in [
        (CalculatorField::Distance, distance_km),
        (CalculatorField::Consumption, km_per_litre),
        (CalculatorField::Price, price_per_litre),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::NotPositive {
                field: field.as_str(),
            });
        }
    }

    let fuel_used_l = distance_km / km_per_litre;
    Ok(TripEstimate {
        fuel_used_l,
        cost: fuel_used_l * price_per_litre,
    })
}

/// Raw text of the three inputs plus the last successful estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorForm {
    pub distance: String,
    pub consumption: String,
    pub price: String,
    pub estimate: Option<TripEstimate>,
}

impl CalculatorForm {
    pub fn set(&mut self, field: CalculatorField, value: String) {
        match field {
            CalculatorField::Distance => self.distance = value,
            CalculatorField::Consumption => self.consumption = value,
            CalculatorField::Price => self.price = value,
        }
    }

    fn parse_field(field: CalculatorField, raw: &str) -> Result<f64, ValidationError> {
        raw.trim()
            .replace(',', "")
            .parse::<f64>()
            .map_err(|_| ValidationError::NotANumber {
                field: field.as_str(),
            })
    }

    /// Estimate for the current inputs. On error the stored estimate is
    /// left as it was.
    pub fn calculate(&self) -> Result<TripEstimate, ValidationError> {
        let distance = Self::parse_field(CalculatorField::Distance, &self.distance)?;
        let consumption = Self::parse_field(CalculatorField::Consumption, &self.consumption)?;
        let price = Self::parse_field(CalculatorField::Price, &self.price)?;
        estimate_trip(distance, consumption, price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorView {
    pub distance: String,
    pub consumption: String,
    pub price: String,
    pub can_calculate: bool,
    pub result: Option<TripEstimateView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripEstimateView {
    pub cost: f64,
    pub fuel_used_l: f64,
    pub cost_label: String,
    pub fuel_label: String,
}

#[must_use]
pub fn view(form: &CalculatorForm) -> CalculatorView {
    CalculatorView {
        distance: form.distance.clone(),
        consumption: form.consumption.clone(),
        price: form.price.clone(),
        can_calculate: form.calculate().is_ok(),
        result: form.estimate.map(|e| TripEstimateView {
            cost: e.cost,
            fuel_used_l: e.fuel_used_l,
            cost_label: e.cost_label(),
            fuel_label: e.fuel_label(),
        }),
    }
}
