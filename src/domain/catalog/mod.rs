//! Public catalog: content, courses and products

mod entity;
mod repository;

pub use entity::{ContentItem, Course, CourseLevel, Product};
pub use repository::{
    CatalogPage, CatalogQuery, ContentRepository, CourseRepository, ProductRepository,
};
