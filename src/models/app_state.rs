use crate::config::ServerConfig;

pub struct AppState {
    pub config: ServerConfig,
}
