//! Request types for the net pay API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoints.

use serde::{Deserialize, Serialize};

use crate::models::CalculationInput;
use crate::validation::CalculationForm;

/// Request body for the `/calculate` endpoint.
///
/// The calculation input fields sit at the top level of the body, alongside
/// an optional `save` flag that appends the result to the history ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The salary figures and policy toggles.
    #[serde(flatten)]
    pub input: CalculationInput,
    /// Whether to record the result in the history ledger.
    #[serde(default)]
    pub save: bool,
}

impl From<CalculationRequest> for CalculationInput {
    fn from(req: CalculationRequest) -> Self {
        req.input
    }
}

/// Request body for the `/calculate/form` endpoint.
///
/// Amounts arrive as the text a user typed, for example `"50,000"`, and are
/// parsed and checked before computing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationFormRequest {
    /// The raw form fields.
    #[serde(flatten)]
    pub form: CalculationForm,
    /// Whether to record the result in the history ledger.
    #[serde(default)]
    pub save: bool,
}
