use serde::{Deserialize, Serialize};

// Interpretation request and response
#[derive(Deserialize)]
pub struct InterpretRequest {
    pub emoji: String,
}

#[derive(Serialize)]
pub struct InterpretResponse {
    pub explanation: String,
}


// Explanation request and response
#[derive(Deserialize)]
pub struct ExplainRequest {
    pub emoji: String,
}

#[derive(Serialize)]
pub struct ExplainResponse {
    pub emoji: String,
    pub explanation: String,
}
