//! Tantivy-based search index module.
//!
//! Provides full-text search over published gallery images with field boosting.

use std::path::Path;
use std::sync::Arc;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, BoostQuery, Occur, QueryParser};
use tantivy::schema::{Field, Schema, Value, STORED, TEXT};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::GalleryImage;

/// Field boost values matching the weights the gallery page used client-side.
const BOOST_TITLE: f32 = 10.0;
const BOOST_TAGS: f32 = 7.5;
const BOOST_DESCRIPTION: f32 = 6.0;
const BOOST_AUTHOR: f32 = 3.0;
const BOOST_CATEGORY: f32 = 2.0;

/// Search result with image ID and relevance score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub image_id: String,
    pub score: f32,
}

/// Search index schema fields.
struct SearchFields {
    image_id: Field,
    title: Field,
    description: Field,
    tags: Field,
    author: Field,
    category: Field,
}

/// Tantivy search index for gallery images.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    writer: Arc<RwLock<IndexWriter>>,
    fields: SearchFields,
}

impl SearchIndex {
    /// Create or open a search index at the specified path.
    pub fn open(index_path: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(index_path)
            .map_err(|e| AppError::Search(format!("Failed to create index directory: {}", e)))?;

        // Define schema
        let mut schema_builder = Schema::builder();
        let image_id = schema_builder.add_text_field("image_id", STORED);
        let title = schema_builder.add_text_field("title", TEXT | STORED);
        let description = schema_builder.add_text_field("description", TEXT);
        let tags = schema_builder.add_text_field("tags", TEXT);
        let author = schema_builder.add_text_field("author", TEXT);
        let category = schema_builder.add_text_field("category", TEXT);
        let schema = schema_builder.build();

        let fields = SearchFields {
            image_id,
            title,
            description,
            tags,
            author,
            category,
        };

        // Try to open existing index or create new one
        let index = Index::open_in_dir(index_path)
            .or_else(|_| Index::create_in_dir(index_path, schema.clone()))
            .map_err(|e| AppError::Search(format!("Failed to open/create index: {}", e)))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| AppError::Search(format!("Failed to create reader: {}", e)))?;

        let writer = index
            .writer(50_000_000) // 50MB buffer
            .map_err(|e| AppError::Search(format!("Failed to create writer: {}", e)))?;

        Ok(Self {
            index,
            reader,
            writer: Arc::new(RwLock::new(writer)),
            fields,
        })
    }

    /// Rebuild the entire index from the image list.
    pub async fn rebuild(&self, images: &[GalleryImage]) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        // Clear existing index
        writer.delete_all_documents()?;

        // Only published images are searchable
        let mut indexed = 0;
        for image in images.iter().filter(|i| i.is_published) {
            let doc = self.create_document(image);
            writer.add_document(doc)?;
            indexed += 1;
        }

        writer.commit()?;

        // Reload reader to see new documents
        self.reader.reload()?;

        tracing::info!("Search index rebuilt with {} images", indexed);
        Ok(())
    }

    /// Index a single image, replacing any previous entry.
    ///
    /// Unpublished images are removed rather than indexed.
    pub async fn index_image(&self, image: &GalleryImage) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        let term = tantivy::Term::from_field_text(self.fields.image_id, &image.id);
        writer.delete_term(term);

        if image.is_published {
            let doc = self.create_document(image);
            writer.add_document(doc)?;
        }
        writer.commit()?;

        // Reload reader
        self.reader.reload()?;

        Ok(())
    }

    /// Remove an image from the index.
    pub async fn remove_image(&self, image_id: &str) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        let term = tantivy::Term::from_field_text(self.fields.image_id, image_id);
        writer.delete_term(term);
        writer.commit()?;

        self.reader.reload()?;

        Ok(())
    }

    /// Search for images matching the query.
    pub fn search(
        &self,
        query_str: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<SearchResult>, AppError> {
        if query_str.trim().is_empty() {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();

        // Create query parser for all searchable fields
        let query_parser = QueryParser::for_index(
            &self.index,
            vec![
                self.fields.title,
                self.fields.description,
                self.fields.tags,
                self.fields.author,
                self.fields.category,
            ],
        );

        // Parse the user query
        let base_query = query_parser
            .parse_query(query_str)
            .map_err(|e| AppError::Search(format!("Invalid search query: {}", e)))?;

        // Create field-specific boosted queries
        let mut subqueries: Vec<(Occur, Box<dyn tantivy::query::Query>)> = Vec::new();

        let field_queries = [
            (self.fields.title, BOOST_TITLE),
            (self.fields.tags, BOOST_TAGS),
            (self.fields.description, BOOST_DESCRIPTION),
            (self.fields.author, BOOST_AUTHOR),
            (self.fields.category, BOOST_CATEGORY),
        ];

        for (field, boost) in field_queries {
            let field_parser = QueryParser::for_index(&self.index, vec![field]);
            if let Ok(field_query) = field_parser.parse_query(query_str) {
                let boosted = BoostQuery::new(field_query, boost);
                subqueries.push((Occur::Should, Box::new(boosted)));
            }
        }

        // Combine with OR semantics
        let combined_query = if subqueries.is_empty() {
            base_query
        } else {
            Box::new(BooleanQuery::new(subqueries))
        };

        // Execute search with pagination
        let top_docs = searcher
            .search(&combined_query, &TopDocs::with_limit(limit + offset))
            .map_err(|e| AppError::Search(format!("Search failed: {}", e)))?;

        // Extract results with pagination
        let results: Vec<SearchResult> = top_docs
            .into_iter()
            .skip(offset)
            .take(limit)
            .filter_map(|(score, doc_address)| {
                let doc: TantivyDocument = searcher.doc(doc_address).ok()?;
                let image_id = doc.get_first(self.fields.image_id)?.as_str()?.to_string();
                Some(SearchResult { image_id, score })
            })
            .collect();

        Ok(results)
    }

    /// Create a Tantivy document from a gallery image.
    fn create_document(&self, image: &GalleryImage) -> TantivyDocument {
        let tags = image
            .tags
            .as_ref()
            .map(|t| t.join(" "))
            .unwrap_or_default();

        doc!(
            self.fields.image_id => image.id.clone(),
            self.fields.title => image.title.clone(),
            self.fields.description => image.description.clone().unwrap_or_default(),
            self.fields.tags => tags,
            self.fields.author => image.author.clone().unwrap_or_default(),
            self.fields.category => image.category.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GalleryCategory;
    use tempfile::TempDir;

    fn create_test_image(id: &str, title: &str, published: bool) -> GalleryImage {
        GalleryImage {
            id: id.to_string(),
            title: title.to_string(),
            description: Some(format!("{} description", title)),
            category: GalleryCategory::Events,
            file_url: format!("/uploads/{}.jpg", id),
            thumbnail_url: None,
            width: None,
            height: None,
            file_size: 2048,
            file_size_display: "2 KB".to_string(),
            tags: Some(vec!["school".to_string()]),
            author: None,
            is_published: published,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_index_creation() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        let images = vec![
            create_test_image("1", "Sports Day", true),
            create_test_image("2", "Carol Service", true),
        ];

        index.rebuild(&images).await.unwrap();

        let results = index.search("sports", 10, 0).unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].image_id, "1");
    }

    #[tokio::test]
    async fn test_unpublished_images_are_not_indexed() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        let images = vec![create_test_image("1", "Sports Day", false)];
        index.rebuild(&images).await.unwrap();

        let results = index.search("sports", 10, 0).unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_unpublishing_removes_from_index() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        let mut image = create_test_image("1", "Sports Day", true);
        index.index_image(&image).await.unwrap();
        assert!(!index.search("sports", 10, 0).unwrap().is_empty());

        image.is_published = false;
        index.index_image(&image).await.unwrap();
        assert!(index.search("sports", 10, 0).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        let results = index.search("", 10, 0).unwrap();
        assert!(results.is_empty());
    }
}
