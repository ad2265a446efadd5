//! What the buyer needs in cash and per month: funds to close, private
//! mortgage insurance, and the full monthly housing cost.

pub mod funds;
pub mod housing_cost;
pub mod pmi;

pub use funds::{check, AffordabilityCheck};
pub use housing_cost::{monthly_housing_cost, HousingCostAssumptions, MonthlyHousingCost};
pub use pmi::{pmi_schedule, PmiSchedule};
