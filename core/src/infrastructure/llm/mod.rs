pub mod flow_backend;
pub mod langflow_client;
pub mod local_flow;

pub use flow_backend::FlowBackend;
pub use langflow_client::LangflowHttpClient;
pub use local_flow::LocalFlowRunner;
