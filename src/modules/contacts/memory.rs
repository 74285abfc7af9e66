use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::interface::ContactRepository;
use super::model::ContactMessage;
use crate::error::Result;

#[derive(Default)]
pub struct MemoryContactRepository {
    messages: Mutex<HashMap<String, ContactMessage>>, // key: id
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn insert(&self, message: &ContactMessage) -> Result<()> {
        let mut messages = self.messages.lock().unwrap();
        messages.insert(message.id.clone(), message.clone());
        Ok(())
    }

    async fn list(&self, unread_only: bool) -> Result<Vec<ContactMessage>> {
        let messages = self.messages.lock().unwrap();
        let mut list: Vec<ContactMessage> = messages
            .values()
            .filter(|m| !unread_only || !m.is_read)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn mark_read(&self, id: &str) -> Result<bool> {
        let mut messages = self.messages.lock().unwrap();
        match messages.get_mut(id) {
            Some(message) => {
                message.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut messages = self.messages.lock().unwrap();
        Ok(messages.remove(id).is_some())
    }
}
