use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::pmi::PmiSchedule;
use crate::error::MortgageError;
use crate::types::{
    percent_of, require_non_negative, require_percentage, round_currency, Money, Percent,
    MONTHS_PER_YEAR,
};
use crate::MortgageResult;

/// Recurring ownership costs that sit on top of principal and interest.
///
/// Every field has a default so callers only override what they know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingCostAssumptions {
    /// Annual PMI premium as a percentage of the original loan amount.
    #[serde(default = "default_pmi_annual_percent")]
    pub pmi_annual_percent: Percent,
    /// PMI applies while loan-to-value is above this percentage.
    #[serde(default = "default_pmi_ltv_threshold_percent")]
    pub pmi_ltv_threshold_percent: Percent,
    /// Annual property tax as a percentage of the assessed (purchase) value.
    #[serde(default = "default_property_tax_annual_percent")]
    pub property_tax_annual_percent: Percent,
    /// Annual homeowner's insurance premium.
    #[serde(default = "default_annual_insurance")]
    pub annual_insurance: Money,
}

fn default_pmi_annual_percent() -> Percent {
    dec!(1)
}

fn default_pmi_ltv_threshold_percent() -> Percent {
    dec!(80)
}

fn default_property_tax_annual_percent() -> Percent {
    dec!(1.23)
}

fn default_annual_insurance() -> Money {
    dec!(1915)
}

impl Default for HousingCostAssumptions {
    fn default() -> Self {
        Self {
            pmi_annual_percent: default_pmi_annual_percent(),
            pmi_ltv_threshold_percent: default_pmi_ltv_threshold_percent(),
            property_tax_annual_percent: default_property_tax_annual_percent(),
            annual_insurance: default_annual_insurance(),
        }
    }
}

impl HousingCostAssumptions {
    pub fn validate(&self) -> MortgageResult<()> {
        require_percentage("pmi_annual_percent", self.pmi_annual_percent)?;
        require_percentage("pmi_ltv_threshold_percent", self.pmi_ltv_threshold_percent)?;
        require_percentage("property_tax_annual_percent", self.property_tax_annual_percent)?;
        require_non_negative("annual_insurance", self.annual_insurance)
    }
}

/// Monthly cost of owning the home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyHousingCost {
    pub principal_and_interest: Money,
    pub pmi: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub total: Money,
}

/// Combine the mortgage payment with PMI, property tax and insurance.
pub fn monthly_housing_cost(
    home_price: Money,
    monthly_payment: Money,
    pmi: &PmiSchedule,
    assumptions: &HousingCostAssumptions,
) -> MortgageResult<MonthlyHousingCost> {
    assumptions.validate()?;
    require_non_negative("home_price", home_price)?;
    if monthly_payment < Decimal::ZERO {
        return Err(MortgageError::invalid_parameter(
            "monthly_payment",
            "must be >= 0",
        ));
    }

    let months = Decimal::from(MONTHS_PER_YEAR);
    let property_tax =
        round_currency(percent_of(home_price, assumptions.property_tax_annual_percent) / months);
    let insurance = round_currency(assumptions.annual_insurance / months);
    let pmi_premium = if pmi.required {
        pmi.monthly_premium
    } else {
        Decimal::ZERO
    };

    Ok(MonthlyHousingCost {
        principal_and_interest: monthly_payment,
        pmi: pmi_premium,
        property_tax,
        insurance,
        total: monthly_payment + pmi_premium + property_tax + insurance,
    })
}
