use mongodb::Database;

use crate::registry::Registry;
use crate::registry::codegen::RandomCodeGenerator;
use crate::registry::store::MongoLinkStore;

pub struct AppState {
    pub db: Database,
    pub registry: Registry<MongoLinkStore, RandomCodeGenerator>,
    pub frontend_url: String,
}
