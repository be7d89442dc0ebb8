mod chat_data_port;

pub use chat_data_port::ChatDataPort;
