mod http_registry_gateway;

pub use http_registry_gateway::HttpRegistryGateway;
