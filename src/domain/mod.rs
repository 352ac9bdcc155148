// Chart series derived from a prediction
pub mod chart;

// Domain-specific error types
pub mod errors;

// Result panel text
pub mod formatting;

// Request/response types and the service port
pub mod prediction;

// UI phase
pub mod view_state;
