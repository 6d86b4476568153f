/// Operators that fly freight but carry no `CARGO` in their registered name.
static CARGO_OPERATORS: &[&str] = &[
    "ATLAS AIR",
    "FEDEX",
    "UPS AIRLINES",
    "POLAR AIR CARGO",
    "OMNI AIR EXPRESS",
    "SOUTHERN AIR",
    "AEROLOGIC",
    "CARGOLUX",
    "AIRBRIDGE CARGO",
    "VOLGA DNEPR A/L",
];

/// Whether an airline (as named in the call-sign registry) is a freight operator.
///
/// Registry names are upper case; the comparison is exact.
pub fn is_cargo(airline: &str) -> bool {
    airline.contains("CARGO") || CARGO_OPERATORS.contains(&airline)
}
