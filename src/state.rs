use crate::config::Config;
use crate::store::ChainStore;

pub struct AppState {
    pub config: Config,
    pub store: ChainStore,
}
