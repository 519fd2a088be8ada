pub mod deployment_client_trait;
pub mod moove_client;
