//! Greeting repository implementation

use serde_json::json;
use crate::backend::connection::BackendConnection;
use crate::utils::errors::BackendResult;

#[derive(Debug, Clone)]
pub struct GreetingRepository {
    connection: BackendConnection,
}

impl GreetingRepository {
    pub fn new(connection: BackendConnection) -> Self {
        Self { connection }
    }

    /// Personalized greeting for a display name
    pub async fn greet(&self, name: &str) -> BackendResult<String> {
        self.connection.action("greetings:getGreeting", &json!({ "name": name })).await
    }
}
