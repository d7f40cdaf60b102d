use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Error body used by services that answer `{"error": "..."}`.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
