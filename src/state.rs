use std::sync::Arc;

use crate::services::conversation::ConversationHost;
use crate::services::relay::RuntimeClient;

pub struct AppState {
    pub conversations: Arc<ConversationHost>,
    pub runtime: Box<dyn RuntimeClient>,
}
