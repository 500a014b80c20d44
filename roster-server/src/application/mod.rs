pub mod user_service;
pub mod workflow_relay;
