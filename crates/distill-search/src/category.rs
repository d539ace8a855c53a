//! Category resolution: identifier to category metadata lookup.

use std::collections::HashMap;

use crate::{
    error::StoreError,
    model::{Category, CategoryRecord},
    store::ContentStore,
};

/// Categories in store order, indexed by identifier
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    categories: Vec<Category>,
    by_id: HashMap<String, usize>,
}

impl CategoryMap {
    pub fn from_records(records: Vec<CategoryRecord>) -> Self {
        let categories: Vec<Category> = records.into_iter().map(Category::from).collect();
        let by_id = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();

        Self { categories, by_id }
    }

    pub fn get(&self, category_id: &str) -> Option<&Category> {
        self.by_id.get(category_id).map(|&i| &self.categories[i])
    }

    /// Title of the category, or an empty string when it is unknown
    pub fn title_of(&self, category_id: Option<&str>) -> &str {
        category_id
            .and_then(|id| self.get(id))
            .map_or("", |c| c.title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn into_vec(self) -> Vec<Category> {
        self.categories
    }
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.category_id,
            title: record.title,
            description: record.description.unwrap_or_default(),
            icon: record.icon,
            color: record.color,
            last_updated: None,
        }
    }
}

/// Load all categories and index them by identifier
pub async fn resolve_categories<S>(store: &S) -> Result<CategoryMap, StoreError>
where
    S: ContentStore + ?Sized,
{
    let records = store.get_all_categories().await?;
    Ok(CategoryMap::from_records(records))
}
