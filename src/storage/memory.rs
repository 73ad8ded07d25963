use std::collections::HashMap;

use super::StorageMedium;

#[derive(Debug, Default)]
pub struct MemoryMedium {
    items: HashMap<String, String>,
}

impl StorageMedium for MemoryMedium {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> anyhow::Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
