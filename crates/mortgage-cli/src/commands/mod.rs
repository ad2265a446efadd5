pub mod affordability;
pub mod amortization;
pub mod analysis;
pub mod sensitivity;

use serde_json::Value;

/// Replace every `schedule` array under `value` with an empty one unless the
/// caller asked for the full schedule.
pub(crate) fn strip_schedules(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == "schedule" {
                    *child = Value::Array(Vec::new());
                } else {
                    strip_schedules(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_schedules),
        _ => {}
    }
}
