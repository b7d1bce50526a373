use serde::{Deserialize, Serialize};

/// One bar of a horizontal bar chart: a label and its value on a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}
