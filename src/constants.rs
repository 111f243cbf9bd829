/// Dataset identifier constants to ensure consistency across the codebase.
/// The order of `PROCESSING_ORDER` is the canonical batch order; stats rows
/// and stored tables always follow it.

pub const COVTYPE: &str = "covtype";
pub const KDDCUP_SF: &str = "kddcup_sf";
pub const KDDCUP_HTTP: &str = "kddcup_http";
pub const SHUTTLE: &str = "shuttle";
pub const CREDITCARD: &str = "creditcard";

/// Canonical processing order for the batch run.
pub const PROCESSING_ORDER: [&str; 5] = [COVTYPE, KDDCUP_SF, KDDCUP_HTTP, SHUTTLE, CREDITCARD];

/// Get all supported dataset identifiers, in processing order.
pub fn supported_datasets() -> Vec<&'static str> {
    PROCESSING_ORDER.to_vec()
}

/// Human-readable dataset title, for report and log output.
pub fn display_name(dataset_id: &str) -> &str {
    match dataset_id {
        COVTYPE => "Forest Cover Type",
        KDDCUP_SF => "KDD Cup '99 (SF)",
        KDDCUP_HTTP => "KDD Cup '99 (http)",
        SHUTTLE => "Statlog Shuttle",
        CREDITCARD => "Credit Card Fraud",
        other => other,
    }
}
